use std::io;
use byteorder::{ReadBytesExt, LE};
use glam::Vec3;
use crate::{container::Context, cursor::Cursor, scene::Scene, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushShape {
	Sphere { radius: f32 },
	AlignedBox { extents: Vec3 },
	OrientedBox { extents: Vec3 },
}

/// Volume applying a force to whatever is inside.
#[derive(Debug, Clone, PartialEq)]
pub struct PushRegion {
	pub object: ObjectHeader,
	pub shape: PushShape,
	pub strength: f32,
	pub flags: u16,
	pub turbulence: u16,
}

/// Ladder or fence volume.
#[derive(Readable, Debug, Clone, PartialEq)]
pub struct ClimbingRegion {
	pub object: ObjectHeader,
	/// 0 ladder, 1 fence
	pub kind: u32,
	pub extents: Vec3,
}

fn read_push_region(cursor: &mut Cursor) -> io::Result<PushRegion> {
	let object = ObjectHeader::read(cursor)?;
	let shape = match cursor.read_u32::<LE>()? {
		0 => PushShape::Sphere { radius: cursor.read_f32::<LE>()? },
		1 => PushShape::AlignedBox { extents: Vec3::read(cursor)? },
		_ => PushShape::OrientedBox { extents: Vec3::read(cursor)? },
	};
	let strength = cursor.read_f32::<LE>()?;
	let flags = cursor.read_u16::<LE>()?;
	let turbulence = cursor.read_u16::<LE>()?;
	Ok(PushRegion { object, shape, strength, flags, turbulence })
}

pub(crate) fn read_push_regions(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_OBJECT_SIZE + 4 + 4 + 8, "push region")?;
	for _ in 0..count {
		scene.push_regions.push(read_push_region(cursor)?);
	}
	Ok(())
}

pub(crate) fn read_climbing_regions(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_OBJECT_SIZE + 16, "climbing region")?;
	for _ in 0..count {
		scene.climbing_regions.push(ClimbingRegion::read(cursor)?);
	}
	Ok(())
}
