use std::io;
use byteorder::{ReadBytesExt, LE};
use crate::{container::Context, cursor::Cursor, read_vstring, revision::Revision, scene::{Color, Scene}, Readable};

#[derive(Debug, Clone, PartialEq)]
pub struct LevelProperties {
	/// Legacy only
	pub geomod_texture: Option<String>,
	/// Legacy only
	pub hardness: Option<u32>,
	pub ambient_color: Color,
	pub fog_color: Color,
	pub fog_near: f32,
	pub fog_far: f32,
	/// Scales baked and dynamic light intensities
	pub lightmap_multiplier: f32,
}

#[derive(Readable)]
struct Fog {
	color: Color,
	near: f32,
	far: f32,
}

fn read_legacy(cursor: &mut Cursor, revision: Revision) -> io::Result<LevelProperties> {
	let geomod_texture = read_vstring(cursor)?;
	let hardness = cursor.read_u32::<LE>()?;
	let ambient_color = Color::read(cursor)?;
	cursor.skip(1)?;
	let fog = Fog::read(cursor)?;
	let lightmap_multiplier = match revision.is_extended() && cursor.remaining() >= 4 {
		true => cursor.read_f32::<LE>()?,
		false => 1.0,
	};
	Ok(LevelProperties {
		geomod_texture: Some(geomod_texture),
		hardness: Some(hardness),
		ambient_color,
		fog_color: fog.color,
		fog_near: fog.near,
		fog_far: fog.far,
		lightmap_multiplier,
	})
}

fn read_alternate(cursor: &mut Cursor) -> io::Result<LevelProperties> {
	let ambient_color = Color::read(cursor)?;
	let fog = Fog::read(cursor)?;
	let lightmap_multiplier = cursor.read_f32::<LE>()?;
	Ok(LevelProperties {
		geomod_texture: None,
		hardness: None,
		ambient_color,
		fog_color: fog.color,
		fog_near: fog.near,
		fog_far: fog.far,
		lightmap_multiplier,
	})
}

/// Single record, no count. A repeated section replaces the earlier one.
pub(crate) fn read_level_properties(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let properties = match ctx.revision {
		Revision::Alternate => read_alternate(cursor)?,
		revision => read_legacy(cursor, revision)?,
	};
	scene.level_properties = Some(properties);
	Ok(())
}
