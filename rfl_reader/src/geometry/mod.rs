//! Static geometry and movable brush bodies: texture table, rooms, portals,
//! vertex pool and faces.

pub mod dedup;
pub mod face;
pub(crate) mod room;

use std::{collections::HashMap, io};
use byteorder::{ReadBytesExt, LE};
use glam::{Mat3, Vec2, Vec3};
use crate::{
	config::{DecodeConfig, FaceFilter},
	container::Context,
	cursor::Cursor,
	diagnostics::Diagnostic,
	read_vstring,
	revision::Revision,
	scene::{Brush, BrushFlags, Face, Scene, Solid},
	texture_names,
	Readable,
};
use self::{
	dedup::VertexPool,
	face::{fan_triangulate, is_truncation, RawFace, MIN_FACE_SIZE},
};

const GEOMETRY_PREAMBLE_SIZE: usize = 8;
const OLD_SCROLL_SIZE: usize = 8;
const SCROLL_SIZE: usize = 12;
const SURFACE_SIZE: usize = 96;
const LEGACY_SCROLL_SIZE: usize = 12;
/// uid, position, basis, then an empty body
const MIN_BRUSH_SIZE: usize = 52;
const BRUSH_TAIL_SIZE: usize = 12;
const UNKNOWN_BRUSH_BLOCK_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Corner {
	vertex: u32,
	uv: Vec2,
	lightmap_uv: Option<Vec2>,
}

/// Decoded body shared by static geometry and movable brushes.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Body {
	pub vertices: Vec<Vec3>,
	pub uvs: Vec<Vec2>,
	pub lightmap_uvs: Vec<Vec2>,
	pub indices: Vec<u32>,
	pub faces: Vec<Face>,
	pub textures: Vec<String>,
}

impl Body {
	pub fn into_brush(self, uid: u32, pos: Vec3, rotation: Mat3) -> Brush {
		Brush {
			uid,
			pos,
			rotation,
			vertices: self.vertices,
			uvs: self.uvs,
			lightmap_uvs: self.lightmap_uvs,
			indices: self.indices,
			solid: Solid { faces: self.faces, textures: self.textures, ..Solid::default() },
		}
	}
}

/// Resolves raw faces against the raw vertex pool into a body.
struct BodyBuilder<'a> {
	positions: &'a [Vec3],
	scroll_table: &'a HashMap<i32, Vec2>,
	filter: FaceFilter,
	triangulate: bool,
	static_geo: bool,
	pool: VertexPool,
	body: Body,
}

impl<'a> BodyBuilder<'a> {
	fn new(positions: &'a [Vec3], scroll_table: &'a HashMap<i32, Vec2>, config: &DecodeConfig, static_geo: bool) -> Self {
		Self {
			positions,
			scroll_table,
			filter: config.face_filter,
			triangulate: config.triangulate,
			static_geo,
			pool: VertexPool::new(),
			body: Body::default(),
		}
	}
	
	fn add(&mut self, face: RawFace, ctx: &mut Context) {
		//every face feeds the shared pool, including ones filtered out below
		let corners = face.corners
			.iter()
			.filter_map(|corner| match self.positions.get(corner.index as usize) {
				Some(&pos) => Some(Corner {
					vertex: self.pool.insert(pos),
					uv: corner.uv,
					lightmap_uv: corner.lightmap_uv,
				}),
				None => {
					ctx.emit(Diagnostic::VertexIndexOutOfRange {
						face_id: face.face_id,
						index: corner.index,
						pool: self.positions.len(),
					});
					None
				},
			})
			.collect::<Vec<_>>();
		if corners.len() < 3 {
			ctx.emit(Diagnostic::DegenerateFace { face_id: face.face_id, corners: corners.len() });
			return;
		}
		if self.filter.drops(face.flags) {
			return;
		}
		let scroll = face.scroll.or_else(|| self.scroll_table.get(&face.face_id).copied());
		let polygons = match self.triangulate && corners.len() > 3 {
			true => fan_triangulate(&corners).into_iter().map(Vec::from).collect(),
			false => vec![corners],
		};
		for polygon in polygons {
			for corner in &polygon {
				self.body.indices.push(corner.vertex);
				self.body.uvs.push(corner.uv);
				if self.static_geo {
					self.body.lightmap_uvs.push(corner.lightmap_uv.unwrap_or(Vec2::ZERO));
				}
			}
			self.body.faces.push(Face {
				vertices: polygon.iter().map(|corner| corner.vertex).collect(),
				texture: face.texture,
				face_id: face.face_id,
				flags: face.flags,
				smoothing_groups: face.smoothing_groups,
				surface: face.surface,
				scroll,
			});
		}
	}
	
	fn finish(mut self, textures: Vec<String>) -> Body {
		self.body.vertices = self.pool.into_vertices();
		self.body.textures = textures;
		self.body
	}
}

fn read_textures(cursor: &mut Cursor, ctx: &mut Context) -> io::Result<Vec<String>> {
	let count = ctx.read_count(cursor, 2, "texture")?;
	(0..count)
		.map(|_| {
			let name = read_vstring(cursor)?;
			Ok(match ctx.revision {
				Revision::Alternate => texture_names::translate(name, &ctx.config.texture_translation),
				_ => name,
			})
		})
		.collect()
}

fn read_scroll_table(cursor: &mut Cursor, ctx: &mut Context) -> io::Result<HashMap<i32, Vec2>> {
	let mut table = HashMap::new();
	match ctx.revision {
		Revision::Alternate => {},//inline per face
		revision if revision.legacy_since(Revision::EXTENDED_GEOMETRY) => {
			let count = ctx.read_count(cursor, SCROLL_SIZE, "face scroll")?;
			for _ in 0..count {
				let face_id = cursor.read_i32::<LE>()?;
				table.insert(face_id, Vec2::read(cursor)?);
			}
		},
		_ => ctx.skip_table(cursor, OLD_SCROLL_SIZE, "old face scroll")?,
	}
	Ok(table)
}

/// Decodes a geometry body. `static_geo` bodies carry per-corner lightmap UVs.
pub(crate) fn read_body(cursor: &mut Cursor, ctx: &mut Context, static_geo: bool) -> io::Result<Body> {
	let revision = ctx.revision;
	if revision.legacy_since(Revision::EXTENDED_GEOMETRY) {
		cursor.skip(GEOMETRY_PREAMBLE_SIZE)?;
	}
	let name = read_vstring(cursor)?;
	let sub_revision = match revision.is_alternate() || revision.legacy_before(Revision::EXTENDED_GEOMETRY) {
		true => cursor.read_u32::<LE>()?,//reserved in Legacy
		false => 0,
	};
	let textures = read_textures(cursor, ctx)?;
	let scroll_table = read_scroll_table(cursor, ctx)?;
	let rooms = room::read_rooms(cursor, ctx)?;
	room::skip_links(cursor, ctx)?;
	let vertex_count = ctx.read_count(cursor, 12, "vertex")?;
	let positions = (0..vertex_count).map(|_| Vec3::read(cursor)).collect::<io::Result<Vec<_>>>()?;
	let face_count = ctx.read_count(cursor, MIN_FACE_SIZE, "face")?;
	let mut builder = BodyBuilder::new(&positions, &scroll_table, ctx.config, static_geo);
	for read in 0..face_count {
		match face::read_face(cursor, ctx, static_geo, sub_revision) {
			Ok(face) => builder.add(face, ctx),
			Err(e) if is_truncation(&e) => {
				ctx.emit(Diagnostic::Clamped { what: "faces", declared: face_count, available: read });
				return Ok(builder.finish(textures));
			},
			Err(e) => return Err(e),
		}
	}
	let body = builder.finish(textures);
	if let Revision::Legacy { .. } = revision {
		let tables = ctx.skip_table(cursor, SURFACE_SIZE, "surface").and_then(|()| {
			match revision.legacy_before(Revision::EXTENDED_GEOMETRY) {
				true => ctx.skip_table(cursor, LEGACY_SCROLL_SIZE, "legacy face scroll"),
				false => Ok(()),
			}
		});
		//faces are complete at this point
		if let Err(e) = tables {
			log::debug!("geometry '{}': {}", name, e);
			ctx.emit(Diagnostic::Truncated { what: "trailing geometry tables", offset: cursor.position() });
		}
	}
	log::debug!(
		"geometry '{}': {} textures, {} rooms ({} liquid, {} outside), {} -> {} vertices, {} faces",
		name,
		body.textures.len(),
		rooms.len(),
		rooms.iter().filter(|room| room.liquid_depth.is_some()).count(),
		rooms.iter().filter(|room| room.outside).count(),
		positions.len(),
		body.vertices.len(),
		body.faces.len(),
	);
	if let Some(bounds) = rooms.iter().map(|room| room.bounds).reduce(|a, b| a.union(&b)) {
		log::trace!("room bounds {:?}, first room id {}", bounds, rooms[0].id);
	}
	Ok(body)
}

/// Section 0x100, the level's single static geometry brush.
pub(crate) fn read_static_geometry(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let body = read_body(cursor, ctx, true)?;
	scene.brushes.push(body.into_brush(0, Vec3::ZERO, Mat3::IDENTITY));
	Ok(())
}

/// Section 0x02000000, positioned movable brushes.
pub(crate) fn read_brushes(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_BRUSH_SIZE, "brush")?;
	for _ in 0..count {
		let uid = cursor.read_u32::<LE>()?;
		let pos = Vec3::read(cursor)?;
		let rotation = Mat3::read(cursor)?;
		let mut brush = read_body(cursor, ctx, false)?.into_brush(uid, pos, rotation);
		if cursor.remaining() >= BRUSH_TAIL_SIZE {
			let flags = BrushFlags::read(cursor)?;
			brush.solid.flags = flags;
			brush.solid.life = cursor.read_i32::<LE>()?;
			brush.solid.state = cursor.read_u32::<LE>()?;
			if flags.has_unknown_block() {
				ctx.emit(Diagnostic::UnknownBrushBlock { uid, flags: flags.bits() });
				let skip = cursor.remaining().min(UNKNOWN_BRUSH_BLOCK_SIZE);
				cursor.skip(skip)?;
			}
		}
		scene.brushes.push(brush);
	}
	Ok(())
}
