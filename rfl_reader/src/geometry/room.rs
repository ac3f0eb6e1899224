use std::io;
use byteorder::{ReadBytesExt, LE};
use glam::Vec3;
use shared::geom::MinMax;
use crate::{container::Context, cursor::Cursor, read_cstring, read_vstring, revision::Revision, Readable};

/// Smallest room record: an early Legacy room without EAX name.
const MIN_ROOM_SIZE: usize = 40;
const UROOM_LINK_SIZE: usize = 8;
const PORTAL_SIZE: usize = 32;

/// What is kept of a room: only enough for a summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RoomInfo {
	pub id: u32,
	pub bounds: MinMax<Vec3>,
	pub liquid_depth: Option<f32>,
	pub outside: bool,
}

fn read_legacy_room(cursor: &mut Cursor, revision: Revision) -> io::Result<RoomInfo> {
	let id = cursor.read_u32::<LE>()?;
	let bounds = MinMax::<Vec3>::read(cursor)?.normalized();
	let [_skyroom, _cold, outside, _airlock, liquid, ambient, _subroom, _alpha] = <[bool; 8]>::read(cursor)?;
	cursor.skip(4)?;//life
	if revision.legacy_since(Revision::EXTENDED_GEOMETRY) {
		read_vstring(cursor)?;//eax effect
	}
	let liquid_depth = match liquid {
		true => {
			let depth = cursor.read_f32::<LE>()?;
			cursor.skip(4)?;//color
			read_vstring(cursor)?;//surface texture
			cursor.skip(4 + 4 + 4 + 13)?;//visibility, type, alpha, unknown
			cursor.skip(4 + 8)?;//waveform, surface scroll
			Some(depth)
		},
		false => None,
	};
	if ambient {
		cursor.skip(4)?;//ambient color
	}
	Ok(RoomInfo { id, bounds, liquid_depth, outside })
}

fn read_alternate_room(cursor: &mut Cursor) -> io::Result<RoomInfo> {
	let id = cursor.read_u32::<LE>()?;
	let bounds = MinMax::<Vec3>::read(cursor)?.normalized();
	let [_skyroom, outside, liquid, _] = <[bool; 4]>::read(cursor)?;
	cursor.skip(4)?;//life
	read_cstring(cursor)?;//eax effect
	let depth = cursor.read_f32::<LE>()?;
	cursor.skip(4 + 4 + 4)?;//ambient color, unknown int, unknown float
	Ok(RoomInfo { id, bounds, liquid_depth: liquid.then_some(depth), outside })
}

pub(crate) fn read_rooms(cursor: &mut Cursor, ctx: &mut Context) -> io::Result<Vec<RoomInfo>> {
	let count = ctx.read_count(cursor, MIN_ROOM_SIZE, "room")?;
	(0..count)
		.map(|_| match ctx.revision {
			Revision::Alternate => read_alternate_room(cursor),
			revision => read_legacy_room(cursor, revision),
		})
		.collect()
}

/// Subroom links, Alternate uroom links and portals. None are retained.
pub(crate) fn skip_links(cursor: &mut Cursor, ctx: &mut Context) -> io::Result<()> {
	let count = ctx.read_count(cursor, 8, "subroom link")?;
	for _ in 0..count {
		cursor.skip(4)?;//room index
		ctx.read_links(cursor)?;
	}
	if ctx.revision.is_alternate() {
		ctx.skip_table(cursor, UROOM_LINK_SIZE, "uroom link")?;
	}
	ctx.skip_table(cursor, PORTAL_SIZE, "portal")
}
