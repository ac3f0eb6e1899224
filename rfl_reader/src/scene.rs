use bitfield::bitfield;
use itertools::chain;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use nonmax::NonMaxU32;
use shared::geom::{MinMax, MinMaxFromIterator};
use crate::{
	entities::{
		Clutter, ClimbingRegion, Corona, Decal, Event, Group, Item, LevelProperties, Light, Lightmap, Mover,
		ParticleEmitter, PushRegion, RespawnPoint, Trigger,
	},
	revision::Revision,
	Readable,
};

/// RGBA, each channel in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Vec4);

impl Color {
	pub fn from_bytes(rgba: [u8; 4]) -> Self {
		Color(Vec4::from_array(rgba.map(|c| c as f32 / 255.0)))
	}
	
	/// Alpha is ignored.
	pub fn is_black(&self) -> bool {
		self.0.truncate() == Vec3::ZERO
	}
}

bitfield! {
	#[derive(Readable, Clone, Copy, PartialEq, Eq)]
	pub struct FaceFlags(u16);
	impl Debug;
	pub show_sky, _: 0;
	pub mirrored, _: 1;
	pub liquid_surface, _: 2;
	pub detail, _: 3;
	pub scroll, _: 4;
	pub full_bright, _: 5;
	pub alpha, _: 6;
	pub holes, _: 7;
	pub u8, lightmap_resolution, _: 9, 8;
	pub portal, _: 10;
	pub invisible, _: 13;
	/// Not stored in files: set for Alternate faces whose alpha is zero.
	pub zero_alpha, set_zero_alpha: 15;
}

bitfield! {
	#[derive(Readable, Clone, Copy, PartialEq, Eq, Default)]
	pub struct BrushFlags(u32);
	impl Debug;
	pub portal, _: 0;
	pub air, _: 1;
	pub detail, _: 2;
	pub emits_steam, _: 4;
}

impl From<u16> for FaceFlags {
	fn from(bits: u16) -> Self {
		Self(bits)
	}
}

impl BrushFlags {
	pub fn bits(&self) -> u32 {
		self.0
	}

	/// Both set: an unidentified block follows the brush.
	pub fn has_unknown_block(&self) -> bool {
		self.air() && self.emits_steam()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
	/// Indices into Brush.vertices
	pub vertices: Vec<u32>,
	/// Index into Solid.textures, unchecked
	pub texture: i32,
	pub face_id: i32,
	pub flags: FaceFlags,
	pub smoothing_groups: u32,
	/// Lightmap surface
	pub surface: Option<NonMaxU32>,
	/// UV units per second
	pub scroll: Option<Vec2>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
	pub faces: Vec<Face>,
	pub textures: Vec<String>,
	pub flags: BrushFlags,
	pub life: i32,
	pub state: u32,
}

impl Solid {
	pub fn texture_name(&self, face: &Face) -> Option<&str> {
		usize::try_from(face.texture).ok().and_then(|i| self.textures.get(i)).map(String::as_str)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
	/// Not guaranteed unique
	pub uid: u32,
	pub pos: Vec3,
	pub rotation: Mat3,
	/// Deduplicated positions
	pub vertices: Vec<Vec3>,
	/// One per entry of `indices`
	pub uvs: Vec<Vec2>,
	/// One per entry of `indices` for static geometry, otherwise empty
	pub lightmap_uvs: Vec<Vec2>,
	/// Faces' vertex indices, concatenated in face order
	pub indices: Vec<u32>,
	pub solid: Solid,
}

impl Brush {
	/// Basis and position as one matrix.
	pub fn transform(&self) -> Mat4 {
		let mut transform = Mat4::from_mat3(self.rotation);
		transform.w_axis = self.pos.extend(1.0);
		transform
	}
	
	/// Local space.
	pub fn bounds(&self) -> Option<MinMax<Vec3>> {
		self.vertices.iter().copied().min_max()
	}
	
	pub fn world_bounds(&self) -> Option<MinMax<Vec3>> {
		let transform = self.transform();
		self.vertices.iter().map(|&v| transform.transform_point3(v)).min_max()
	}
}

/// Per-decode section counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionStats {
	pub decoded: u32,
	/// Known codes deliberately not decoded
	pub skipped: u32,
	pub unknown: u32,
	/// Decoder hit the end of its section early
	pub failed: u32,
}

#[derive(Debug, Clone)]
pub struct Scene {
	pub revision: Revision,
	pub timestamp: u32,
	pub level_name: String,
	pub mod_name: Option<String>,
	pub brushes: Vec<Brush>,
	pub lights: Vec<Light>,
	pub events: Vec<Event>,
	pub triggers: Vec<Trigger>,
	pub items: Vec<Item>,
	pub particle_emitters: Vec<ParticleEmitter>,
	pub push_regions: Vec<PushRegion>,
	pub climbing_regions: Vec<ClimbingRegion>,
	pub decals: Vec<Decal>,
	pub clutter: Vec<Clutter>,
	pub movers: Vec<Mover>,
	pub groups: Vec<Group>,
	pub respawn_points: Vec<RespawnPoint>,
	pub lightmaps: Vec<Lightmap>,
	pub coronas: Vec<Corona>,
	pub level_properties: Option<LevelProperties>,
	pub stats: SectionStats,
}

impl Scene {
	pub fn new(revision: Revision, timestamp: u32, level_name: String, mod_name: Option<String>) -> Self {
		Self {
			revision,
			timestamp,
			level_name,
			mod_name,
			brushes: vec![],
			lights: vec![],
			events: vec![],
			triggers: vec![],
			items: vec![],
			particle_emitters: vec![],
			push_regions: vec![],
			climbing_regions: vec![],
			decals: vec![],
			clutter: vec![],
			movers: vec![],
			groups: vec![],
			respawn_points: vec![],
			lightmaps: vec![],
			coronas: vec![],
			level_properties: None,
			stats: SectionStats::default(),
		}
	}
	
	/// 1.0 without level properties.
	pub fn lightmap_multiplier(&self) -> f32 {
		self.level_properties.as_ref().map_or(1.0, |props| props.lightmap_multiplier)
	}
	
	pub fn bounds(&self) -> Option<MinMax<Vec3>> {
		self.brushes.iter().filter_map(Brush::world_bounds).reduce(|a, b| a.union(&b))
	}
	
	/// Largest uid carried by any brush or entity.
	pub fn max_uid(&self) -> Option<u32> {
		chain!(
			self.brushes.iter().map(|brush| brush.uid),
			self.lights.iter().map(|light| light.object.uid),
			self.events.iter().map(|event| event.uid),
			self.triggers.iter().map(|trigger| trigger.uid),
			self.items.iter().map(|item| item.object.uid),
			self.particle_emitters.iter().map(|emitter| emitter.object.uid),
			self.push_regions.iter().map(|region| region.object.uid),
			self.climbing_regions.iter().map(|region| region.object.uid),
			self.decals.iter().map(|decal| decal.object.uid),
			self.clutter.iter().map(|clutter| clutter.object.uid),
			self.movers.iter().map(|mover| mover.object.uid),
			self.respawn_points.iter().map(|point| point.uid),
			self.coronas.iter().map(|corona| corona.object.uid),
		)
		.max()
	}
	
	pub fn entity_count(&self) -> usize {
		self.lights.len() + self.events.len() + self.triggers.len() + self.items.len()
			+ self.particle_emitters.len() + self.push_regions.len() + self.climbing_regions.len()
			+ self.decals.len() + self.clutter.len() + self.movers.len() + self.groups.len()
			+ self.respawn_points.len() + self.coronas.len()
	}
}
