use std::io;
use crate::{container::Context, cursor::Cursor, scene::{Color, Scene}, Readable};
use super::{ObjectHeader, MIN_OBJECT_SIZE};

const MIN_EMITTER_SIZE: usize = MIN_OBJECT_SIZE + 4 + 12 + 2 + 12 * 4 + 8 + 4 + 12;
/// Alternate trailing bytes, meaning unresolved
const ALTERNATE_TAIL_SIZE: usize = 8;

#[derive(Readable, Debug, Clone, PartialEq)]
pub struct ParticleEmitter {
	pub object: ObjectHeader,
	/// 0 sphere, 1 plane
	pub shape: u32,
	pub sphere_radius: f32,
	pub plane_width: f32,
	pub plane_depth: f32,
	#[vstring]
	pub texture: String,
	pub spawn_delay: f32,
	pub spawn_randomize: f32,
	pub velocity: f32,
	pub velocity_randomize: f32,
	pub acceleration: f32,
	pub decay: f32,
	pub decay_randomize: f32,
	pub radius: f32,
	pub radius_randomize: f32,
	pub growth_rate: f32,
	pub gravity_multiplier: f32,
	pub random_direction: f32,
	pub particle_color: Color,
	pub fade_color: Color,
	pub flags: u32,
	pub time_on: f32,
	pub time_off: f32,
	pub active_distance: f32,
}

pub(crate) fn read_particle_emitters(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_EMITTER_SIZE, "particle emitter")?;
	for _ in 0..count {
		let emitter = ParticleEmitter::read(cursor)?;
		if ctx.revision.is_alternate() {
			cursor.skip(ALTERNATE_TAIL_SIZE)?;
		}
		scene.particle_emitters.push(emitter);
	}
	Ok(())
}
