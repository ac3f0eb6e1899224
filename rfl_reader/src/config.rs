use std::collections::HashMap;
use crate::scene::FaceFlags;

/// Which faces are dropped from a solid's face list. Dropped faces still
/// contribute their corners to the shared vertex list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceFilter {
	pub drop_invisible: bool,
	pub drop_holes: bool,
	pub drop_alpha: bool,
	pub drop_detail: bool,
	pub drop_liquid: bool,
	pub drop_portal: bool,
	pub drop_sky: bool,
}

impl FaceFilter {
	pub fn drops(&self, flags: FaceFlags) -> bool {
		(self.drop_invisible && flags.invisible())
			|| (self.drop_holes && flags.holes())
			|| (self.drop_alpha && flags.alpha())
			|| (self.drop_detail && flags.detail())
			|| (self.drop_liquid && flags.liquid_surface())
			|| (self.drop_portal && flags.portal())
			|| (self.drop_sky && flags.show_sky())
	}
}

/// Selects which of the two mutually exclusive geometry sections is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeometrySource {
	/// Whole-level static geometry (0x100), one brush.
	#[default]
	StaticGeometry,
	/// Movable brush list (0x02000000).
	Brushes,
}

/// Texture renaming for Alternate-revision levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TextureTranslation {
	#[default]
	Disabled,
	/// Case-insensitive lookup, names without an entry are kept.
	Table(HashMap<String, String>),
	/// Insert a prefix in front of the file name.
	Prefix(String),
}

impl TextureTranslation {
	pub fn table<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		TextureTranslation::Table(
			entries.into_iter().map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into())).collect(),
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeConfig {
	pub face_filter: FaceFilter,
	pub triangulate: bool,
	pub geometry_source: GeometrySource,
	pub texture_translation: TextureTranslation,
	/// Applied to Alternate light on-intensities.
	pub intensity_scale: f32,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			face_filter: FaceFilter::default(),
			triangulate: true,
			geometry_source: GeometrySource::default(),
			texture_translation: TextureTranslation::default(),
			intensity_scale: 1.0,
		}
	}
}
