use std::io::{self, Read};
use byteorder::{ReadBytesExt, LE};
use glam::Vec3;
use crate::{container::Context, cursor::Cursor, read_vstring, scene::Scene, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

const MIN_DECAL_SIZE: usize = MIN_OBJECT_SIZE + 12 + 2 + 4 + 1 + 4 + 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Decal {
	pub object: ObjectHeader,
	pub extents: Vec3,
	pub texture: String,
	/// 0..=255
	pub alpha: u32,
	pub self_illuminated: bool,
	pub tiling: u32,
	pub scale: f32,
	/// Alternate only, meaning unresolved
	pub unknown: Option<[u8; 12]>,
}

fn read_decal(cursor: &mut Cursor, alternate: bool) -> io::Result<Decal> {
	let object = ObjectHeader::read(cursor)?;
	let extents = Vec3::read(cursor)?;
	let texture = read_vstring(cursor)?;
	let alpha = cursor.read_u32::<LE>()?;
	let self_illuminated = bool::read(cursor)?;
	let tiling = cursor.read_u32::<LE>()?;
	let scale = cursor.read_f32::<LE>()?;
	let unknown = match alternate {
		true => {
			let mut unknown = [0; 12];
			cursor.read_exact(&mut unknown)?;
			Some(unknown)
		},
		false => None,
	};
	Ok(Decal { object, extents, texture, alpha, self_illuminated, tiling, scale, unknown })
}

pub(crate) fn read_decals(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_DECAL_SIZE, "decal")?;
	for _ in 0..count {
		scene.decals.push(read_decal(cursor, ctx.revision.is_alternate())?);
	}
	Ok(())
}
