use std::io;
use byteorder::{ReadBytesExt, LE};
use crate::{container::Context, cursor::Cursor, read_vstring, scene::Scene, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

/// Keyframed movement parameters of a Legacy mover.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
	pub object: ObjectHeader,
	pub pause_time: f32,
	pub depart_travel_time: f32,
	pub return_travel_time: f32,
	pub acceleration_time: f32,
	pub deceleration_time: f32,
	pub trigger_event: u32,
	pub items: Vec<u32>,
}

#[derive(Readable)]
struct Timing {
	pause: f32,
	depart: f32,
	return_: f32,
	acceleration: f32,
	deceleration: f32,
	trigger_event: u32,
}

/// Named set of objects and brushes, optionally moving together.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
	pub name: String,
	pub is_moving: bool,
	pub objects: Vec<u32>,
	pub brushes: Vec<u32>,
	/// Alternate only, meaning unresolved
	pub unknown: Option<[u8; 8]>,
}

pub(crate) fn read_movers(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_OBJECT_SIZE + 24 + 4, "mover")?;
	for _ in 0..count {
		let object = ObjectHeader::read(cursor)?;
		let timing = Timing::read(cursor)?;
		let items = ctx.read_links(cursor)?;
		scene.movers.push(Mover {
			object,
			pause_time: timing.pause,
			depart_travel_time: timing.depart,
			return_travel_time: timing.return_,
			acceleration_time: timing.acceleration,
			deceleration_time: timing.deceleration,
			trigger_event: timing.trigger_event,
			items,
		});
	}
	Ok(())
}

pub(crate) fn read_groups(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, 2 + 2 + 8, "group")?;
	for _ in 0..count {
		let name = read_vstring(cursor)?;
		cursor.skip(1)?;
		let is_moving = bool::read(cursor)?;
		let unknown = match ctx.revision.is_alternate() {
			true => Some(cursor.read_u64::<LE>()?.to_le_bytes()),
			false => None,
		};
		let objects = ctx.read_links(cursor)?;
		let brushes = ctx.read_links(cursor)?;
		scene.groups.push(Group { name, is_moving, objects, brushes, unknown });
	}
	Ok(())
}
