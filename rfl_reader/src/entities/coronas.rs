use std::io;
use crate::{container::Context, cursor::Cursor, scene::{Color, Scene}, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

/// Glow marker. Not a light source on its own; the Alternate post pass turns
/// coloured ones into lights.
#[derive(Readable, Debug, Clone, PartialEq)]
pub struct Corona {
	pub object: ObjectHeader,
	pub color: Color,
	/// Degrees
	pub cone_angle: f32,
	pub intensity: f32,
	pub radius_distance: f32,
	pub radius_scale: f32,
	pub diminish_distance: f32,
	#[vstring]
	pub bitmap: String,
	#[vstring]
	pub volumetric_bitmap: String,
	pub volumetric_height: f32,
	pub volumetric_length: f32,
}

pub(crate) fn read_coronas(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_OBJECT_SIZE + 4 + 20 + 4 + 8, "corona")?;
	for _ in 0..count {
		scene.coronas.push(Corona::read(cursor)?);
	}
	Ok(())
}
