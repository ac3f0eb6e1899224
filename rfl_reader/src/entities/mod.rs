//! Per-section entity decoders. Each reads a u32 record count followed by
//! records, pushing into the scene as it goes so a truncated section keeps
//! the records before the break.

pub mod coronas;
pub mod decals;
pub mod events;
pub mod items;
pub mod level_properties;
pub mod lightmaps;
pub mod lights;
pub mod movers;
pub mod particles;
pub mod regions;
pub mod triggers;

use glam::{Mat3, Vec3};
use crate::Readable;

pub use self::{
	coronas::Corona,
	decals::Decal,
	events::Event,
	items::{Clutter, Item, RespawnPoint},
	level_properties::LevelProperties,
	lightmaps::Lightmap,
	lights::{Light, LightFlags, LightKind},
	movers::{Group, Mover},
	particles::ParticleEmitter,
	regions::{ClimbingRegion, PushRegion, PushShape},
	triggers::{Trigger, TriggerShape},
};

/// Leading fields shared by most placed objects.
#[derive(Readable, Debug, Clone, PartialEq)]
pub struct ObjectHeader {
	/// Scene-local, not guaranteed unique
	pub uid: u32,
	#[vstring]
	pub class_name: String,
	pub pos: Vec3,
	pub rotation: Mat3,
	#[vstring]
	pub script_name: String,
	pub hidden: bool,
}

impl ObjectHeader {
	pub fn new(uid: u32, class_name: &str, pos: Vec3, rotation: Mat3) -> Self {
		Self {
			uid,
			class_name: class_name.into(),
			pos,
			rotation,
			script_name: String::new(),
			hidden: false,
		}
	}
	
	/// Forward axis of the basis.
	pub fn forward(&self) -> Vec3 {
		self.rotation.z_axis
	}
}

/// Smallest header: empty names.
pub(crate) const MIN_OBJECT_SIZE: usize = 4 + 2 + 12 + 36 + 2 + 1;
