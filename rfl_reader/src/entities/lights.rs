use std::io;
use bitfield::bitfield;
use glam::{Mat3, Vec3};
use crate::{container::Context, cursor::Cursor, scene::{Color, Scene}, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

/// Alternate levels use inverse-square attenuation, Legacy levels a linear
/// falloff. Tripling the range is the closest fit between the two curves.
pub const ALTERNATE_RANGE_FACTOR: f32 = 3.0;
const MIN_LIGHT_SIZE: usize = MIN_OBJECT_SIZE + 4 + 4 + 13 * 4;

bitfield! {
	#[derive(Readable, Clone, Copy, PartialEq, Eq, Default)]
	pub struct LightFlags(u32);
	impl Debug;
	pub dynamic, set_dynamic: 0;
	pub fade, _: 1;
	pub shadow_casting, _: 2;
	pub enabled, set_enabled: 3;
	pub u8, kind_bits, set_kind_bits: 5, 4;
	pub u8, initial_state, _: 11, 8;
	pub runtime_shadow, _: 13;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
	Point,
	Spot,
	Tube,
	/// Selector value 3
	Unknown,
}

impl LightKind {
	fn bits(self) -> u8 {
		match self {
			LightKind::Point => 0,
			LightKind::Spot => 1,
			LightKind::Tube => 2,
			LightKind::Unknown => 3,
		}
	}
}

impl LightFlags {
	pub fn kind(&self) -> LightKind {
		match self.kind_bits() {
			0 => LightKind::Point,
			1 => LightKind::Spot,
			2 => LightKind::Tube,
			_ => LightKind::Unknown,
		}
	}
	
	pub fn set_kind(&mut self, kind: LightKind) {
		self.set_kind_bits(kind.bits());
	}
}

#[derive(Readable, Debug, Clone, PartialEq)]
pub struct Light {
	pub object: ObjectHeader,
	pub flags: LightFlags,
	pub color: Color,
	pub range: f32,
	/// Degrees, spot and tube lights
	pub fov: f32,
	pub fov_dropoff: f32,
	pub intensity_at_max_range: f32,
	pub dropoff_type: u32,
	pub tube_width: f32,
	pub on_intensity: f32,
	pub on_time: f32,
	pub on_time_variation: f32,
	pub off_intensity: f32,
	pub off_time: f32,
	pub off_time_variation: f32,
}

impl Light {
	/// Enabled dynamic light of the given kind, other fields zero.
	pub fn new(object: ObjectHeader, kind: LightKind, color: Color, range: f32, on_intensity: f32) -> Self {
		let mut flags = LightFlags::default();
		flags.set_kind(kind);
		flags.set_enabled(true);
		flags.set_dynamic(true);
		Self {
			object,
			flags,
			color,
			range,
			fov: 0.0,
			fov_dropoff: 0.0,
			intensity_at_max_range: 0.0,
			dropoff_type: 0,
			tube_width: 0.0,
			on_intensity,
			on_time: 0.0,
			on_time_variation: 0.0,
			off_intensity: 0.0,
			off_time: 0.0,
			off_time_variation: 0.0,
		}
	}
	
	pub fn uid(&self) -> u32 {
		self.object.uid
	}
	
	pub fn kind(&self) -> LightKind {
		self.flags.kind()
	}
	
	pub fn pos(&self) -> Vec3 {
		self.object.pos
	}
	
	pub fn rotation(&self) -> Mat3 {
		self.object.rotation
	}
}

pub(crate) fn read_lights(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_LIGHT_SIZE, "light")?;
	for _ in 0..count {
		let mut light = Light::read(cursor)?;
		if ctx.revision.is_alternate() {
			//the level's lightmap multiplier is applied once all sections are read
			light.on_intensity *= ctx.config.intensity_scale;
			light.range *= ALTERNATE_RANGE_FACTOR;
		}
		scene.lights.push(light);
	}
	Ok(())
}
