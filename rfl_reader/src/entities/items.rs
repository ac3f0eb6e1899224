use std::io;
use glam::{Mat3, Vec3};
use crate::{container::Context, cursor::Cursor, read_vstring, scene::Scene, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

#[derive(Readable, Debug, Clone, PartialEq)]
pub struct Item {
	pub object: ObjectHeader,
	pub count: u32,
	/// Milliseconds
	pub respawn_time: u32,
	pub team: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clutter {
	pub object: ObjectHeader,
	pub skin: String,
	pub links: Vec<u32>,
}

/// Multiplayer spawn location.
#[derive(Readable, Debug, Clone, PartialEq)]
pub struct RespawnPoint {
	pub uid: u32,
	pub pos: Vec3,
	pub rotation: Mat3,
	#[vstring]
	pub script_name: String,
	pub hidden: bool,
	pub team: u32,
	pub red_team: bool,
	pub blue_team: bool,
	pub bot: bool,
}

pub(crate) fn read_items(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_OBJECT_SIZE + 12, "item")?;
	for _ in 0..count {
		scene.items.push(Item::read(cursor)?);
	}
	Ok(())
}

pub(crate) fn read_clutter(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_OBJECT_SIZE + 6, "clutter")?;
	for _ in 0..count {
		let object = ObjectHeader::read(cursor)?;
		let skin = read_vstring(cursor)?;
		let links = ctx.read_links(cursor)?;
		scene.clutter.push(Clutter { object, skin, links });
	}
	Ok(())
}

pub(crate) fn read_respawn_points(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, 4 + 12 + 36 + 2 + 1 + 4 + 3, "respawn point")?;
	for _ in 0..count {
		scene.respawn_points.push(RespawnPoint::read(cursor)?);
	}
	Ok(())
}
