use std::io::{self, ErrorKind};
use byteorder::{ReadBytesExt, LE};
use glam::Vec2;
use itertools::Itertools;
use nonmax::NonMaxU32;
use crate::{container::Context, cursor::Cursor, scene::FaceFlags, Readable};

/// Alternate flag word bit: an inline scroll velocity follows.
pub const ALTERNATE_SCROLL: u32 = 0x0001_0000;
/// First Alternate geometry sub-revision whose faces carry an alpha value.
pub const ALTERNATE_ALPHA_SUBREVISION: u32 = 2;
const ZERO_ALPHA: f32 = 1e-4;
/// Smallest possible face record, an Alternate face without corners.
pub(crate) const MIN_FACE_SIZE: usize = 44;
const MIN_CORNER_SIZE: usize = 12;

#[derive(Readable)]
struct FaceHeader {
	#[skip(16)]//plane normal and distance
	texture: i32,
	surface: Option<NonMaxU32>,
	face_id: i32,
}

#[derive(Readable)]
struct LegacyFaceTail {
	flags: FaceFlags,
	#[skip(6)]
	smoothing_groups: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawCorner {
	/// Index into the raw vertex pool, unchecked
	pub index: u32,
	pub uv: Vec2,
	pub lightmap_uv: Option<Vec2>,
}

/// Face as stored, corners not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawFace {
	pub texture: i32,
	pub surface: Option<NonMaxU32>,
	pub face_id: i32,
	pub flags: FaceFlags,
	pub smoothing_groups: u32,
	/// Alternate only, inline
	pub scroll: Option<Vec2>,
	pub corners: Vec<RawCorner>,
}

/// Reads one face. `static_geo` faces carry lightmap UVs unless full-bright
/// or invisible.
pub(crate) fn read_face(cursor: &mut Cursor, ctx: &mut Context, static_geo: bool, sub_revision: u32) -> io::Result<RawFace> {
	let FaceHeader { texture, surface, face_id } = FaceHeader::read(cursor)?;
	cursor.skip(4)?;//reserved
	let (flags, smoothing_groups, scroll) = match ctx.revision.is_alternate() {
		false => {
			let LegacyFaceTail { flags, smoothing_groups } = LegacyFaceTail::read(cursor)?;
			cursor.skip(4)?;//room index
			(flags, smoothing_groups, None)
		},
		true => {
			let raw_flags = cursor.read_u32::<LE>()?;
			let smoothing_groups = cursor.read_u32::<LE>()?;
			let scroll = match raw_flags & ALTERNATE_SCROLL {
				0 => None,
				_ => Some(Vec2::read(cursor)?),
			};
			let mut flags = FaceFlags::from(raw_flags as u16);
			if sub_revision >= ALTERNATE_ALPHA_SUBREVISION {
				cursor.skip(3)?;
				let alpha = cursor.read_f32::<LE>()?;
				flags.set_zero_alpha(alpha.abs() < ZERO_ALPHA);
			}
			(flags, smoothing_groups, scroll)
		},
	};
	//decided on stored bits only, zero_alpha does not affect layout
	let has_lightmap = static_geo && !flags.full_bright() && !flags.invisible();
	let corner_size = MIN_CORNER_SIZE + has_lightmap as usize * 8;
	let corner_count = ctx.read_count(cursor, corner_size, "face corner")?;
	let corners = (0..corner_count)
		.map(|_| {
			let index = cursor.read_u32::<LE>()?;
			let uv = Vec2::read(cursor)?;
			let lightmap_uv = match has_lightmap {
				true => Some(Vec2::read(cursor)?),
				false => None,
			};
			Ok(RawCorner { index, uv, lightmap_uv })
		})
		.collect::<io::Result<Vec<_>>>()?;
	Ok(RawFace { texture, surface, face_id, flags, smoothing_groups, scroll, corners })
}

/// Splits a convex polygon into `n - 2` triangles sharing its first corner.
/// Fewer than 3 corners yield nothing.
pub fn fan_triangulate<T: Copy>(corners: &[T]) -> Vec<[T; 3]> {
	match corners.split_first() {
		Some((&first, rest)) => rest.iter().tuple_windows().map(|(&b, &c)| [first, b, c]).collect(),
		None => vec![],
	}
}

/// Whether an error means the section ended mid-record.
pub(crate) fn is_truncation(e: &io::Error) -> bool {
	e.kind() == ErrorKind::UnexpectedEof
}
