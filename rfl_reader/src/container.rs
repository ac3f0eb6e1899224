use std::{collections::HashMap, fs, io, path::Path, sync::OnceLock};
use byteorder::{ReadBytesExt, LE};
use crate::{
	config::{DecodeConfig, GeometrySource},
	cursor::Cursor,
	diagnostics::{Diagnostic, Diagnostics, LogSink, LoopEnd},
	entities,
	error::{DecodeError, Result},
	geometry,
	post,
	read_vstring,
	revision::{Family, Revision},
	scene::Scene,
};

pub const MAGIC: u32 = 0xD4BA_DA55;

/// Section type codes.
pub mod section {
	/// Alternate levels always end with one
	pub const TERMINATOR: u32 = 0;
	pub const STATIC_GEOMETRY: u32 = 0x100;
	pub const LIGHTS: u32 = 0x300;
	pub const AMBIENT_SOUNDS: u32 = 0x500;
	pub const EVENTS: u32 = 0x600;
	pub const RESPAWN_POINTS: u32 = 0x700;
	pub const LEVEL_PROPERTIES: u32 = 0x900;
	pub const PARTICLE_EMITTERS: u32 = 0xA00;
	pub const GAS_REGIONS: u32 = 0xB00;
	pub const ROOM_EFFECTS: u32 = 0xC00;
	pub const CLIMBING_REGIONS: u32 = 0xD00;
	pub const DECALS: u32 = 0x1000;
	pub const PUSH_REGIONS: u32 = 0x1100;
	pub const LIGHTMAPS: u32 = 0x1200;
	/// Movers in Legacy levels, coronas in Alternate levels
	pub const MOVERS_OR_CORONAS: u32 = 0x2000;
	pub const GROUPS: u32 = 0x3000;
	pub const ALTERNATE_4000: u32 = 0x4000;
	pub const ALTERNATE_6000: u32 = 0x6000;
	pub const ALTERNATE_7000: u32 = 0x7000;
	pub const EAX_EFFECTS: u32 = 0x8000;
	pub const ITEMS: u32 = 0x40000;
	pub const CLUTTER: u32 = 0x50000;
	pub const TRIGGERS: u32 = 0x60000;
	pub const PLAYER_START: u32 = 0x70000;
	pub const LEVEL_INFO: u32 = 0x0100_0000;
	pub const BRUSHES: u32 = 0x0200_0000;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
	pub revision: Revision,
	pub timestamp: u32,
	pub player_start_offset: i32,
	pub level_info_offset: i32,
	pub section_count: i32,
	/// Informational only
	pub sections_size: i32,
	pub level_name: String,
	pub mod_name: Option<String>,
}

impl Header {
	pub fn read(cursor: &mut Cursor) -> Result<Self> {
		let magic = cursor.read_u32::<LE>().map_err(|_| DecodeError::TruncatedHeader(cursor.position()))?;
		if magic != MAGIC {
			return Err(DecodeError::WrongMagic(magic));
		}
		let raw = cursor.read_i32::<LE>().map_err(|_| DecodeError::TruncatedHeader(cursor.position()))?;
		let revision = Revision::classify(raw).ok_or(DecodeError::UnsupportedRevision(raw))?;
		Self::read_fields(cursor, revision).map_err(|_| DecodeError::TruncatedHeader(cursor.position()))
	}
	
	fn read_fields(cursor: &mut Cursor, revision: Revision) -> io::Result<Self> {
		let timestamp = cursor.read_u32::<LE>()?;
		let player_start_offset = cursor.read_i32::<LE>()?;
		let level_info_offset = cursor.read_i32::<LE>()?;
		let section_count = cursor.read_i32::<LE>()?;
		let sections_size = cursor.read_i32::<LE>()?;
		let level_name = read_vstring(cursor)?;
		let mod_name = match revision.legacy_since(Revision::MOD_NAME) {
			true => Some(read_vstring(cursor)?),
			false => None,
		};
		Ok(Header {
			revision,
			timestamp,
			player_start_offset,
			level_info_offset,
			section_count,
			sections_size,
			level_name,
			mod_name,
		})
	}
}

/// Per-decode state handed to every section decoder.
pub(crate) struct Context<'c> {
	pub revision: Revision,
	pub config: &'c DecodeConfig,
	pub sink: &'c mut dyn Diagnostics,
}

impl Context<'_> {
	pub fn emit(&mut self, diagnostic: Diagnostic) {
		self.sink.emit(diagnostic);
	}
	
	/// u32 record count. A count whose records, at `min_size` bytes each, cannot
	/// fit in what remains is reported and read as 0.
	pub fn read_count(&mut self, cursor: &mut Cursor, min_size: usize, what: &'static str) -> io::Result<usize> {
		let offset = cursor.position();
		let count = cursor.read_u32::<LE>()?;
		if count as u64 * min_size as u64 > cursor.remaining() as u64 {
			self.emit(Diagnostic::ImplausibleCount { what, count, offset });
			return Ok(0);
		}
		Ok(count as usize)
	}
	
	/// Counted list of uids.
	pub fn read_links(&mut self, cursor: &mut Cursor) -> io::Result<Vec<u32>> {
		let count = self.read_count(cursor, 4, "link")?;
		(0..count).map(|_| cursor.read_u32::<LE>()).collect()
	}
	
	/// Counted table of fixed-size entries, not retained.
	pub fn skip_table(&mut self, cursor: &mut Cursor, stride: usize, what: &'static str) -> io::Result<()> {
		let count = self.read_count(cursor, stride, what)?;
		cursor.skip(count * stride)
	}
}

type DecodeFn = fn(&mut Cursor, &mut Context, &mut Scene) -> io::Result<()>;

#[derive(Clone, Copy)]
enum Handler {
	Decode(DecodeFn),
	/// Decoded only when the configured geometry source matches.
	Geometry(GeometrySource, DecodeFn),
	/// Recognized, never parsed.
	Skip,
}

#[derive(Clone, Copy)]
struct Entry {
	name: &'static str,
	handler: Handler,
}

fn add(table: &mut HashMap<(u32, Family), Entry>, code: u32, families: &[Family], name: &'static str, handler: Handler) {
	for &family in families {
		table.insert((code, family), Entry { name, handler });
	}
}

fn dispatch_table() -> &'static HashMap<(u32, Family), Entry> {
	static TABLE: OnceLock<HashMap<(u32, Family), Entry>> = OnceLock::new();
	TABLE.get_or_init(|| {
		use section::*;
		use Family::{Alternate, Legacy};
		use Handler::{Decode, Geometry, Skip};
		const BOTH: &[Family] = &[Legacy, Alternate];
		let mut table = HashMap::new();
		let t = &mut table;
		add(t, STATIC_GEOMETRY, BOTH, "static geometry", Geometry(GeometrySource::StaticGeometry, geometry::read_static_geometry));
		add(t, BRUSHES, BOTH, "brushes", Geometry(GeometrySource::Brushes, geometry::read_brushes));
		add(t, LIGHTS, BOTH, "lights", Decode(entities::lights::read_lights));
		add(t, EVENTS, BOTH, "events", Decode(entities::events::read_events));
		add(t, RESPAWN_POINTS, BOTH, "respawn points", Decode(entities::items::read_respawn_points));
		add(t, LEVEL_PROPERTIES, BOTH, "level properties", Decode(entities::level_properties::read_level_properties));
		add(t, PARTICLE_EMITTERS, BOTH, "particle emitters", Decode(entities::particles::read_particle_emitters));
		add(t, CLIMBING_REGIONS, BOTH, "climbing regions", Decode(entities::regions::read_climbing_regions));
		add(t, DECALS, BOTH, "decals", Decode(entities::decals::read_decals));
		add(t, PUSH_REGIONS, BOTH, "push regions", Decode(entities::regions::read_push_regions));
		add(t, LIGHTMAPS, BOTH, "lightmaps", Decode(entities::lightmaps::read_lightmaps));
		add(t, MOVERS_OR_CORONAS, &[Legacy], "movers", Decode(entities::movers::read_movers));
		add(t, MOVERS_OR_CORONAS, &[Alternate], "coronas", Decode(entities::coronas::read_coronas));
		add(t, GROUPS, BOTH, "groups", Decode(entities::movers::read_groups));
		add(t, ITEMS, BOTH, "items", Decode(entities::items::read_items));
		add(t, CLUTTER, BOTH, "clutter", Decode(entities::items::read_clutter));
		add(t, TRIGGERS, BOTH, "triggers", Decode(entities::triggers::read_triggers));
		add(t, AMBIENT_SOUNDS, BOTH, "ambient sounds", Skip);
		add(t, GAS_REGIONS, BOTH, "gas regions", Skip);
		add(t, ROOM_EFFECTS, BOTH, "room effects", Skip);
		add(t, EAX_EFFECTS, BOTH, "eax effects", Skip);
		add(t, PLAYER_START, BOTH, "player start", Skip);
		add(t, LEVEL_INFO, BOTH, "level info", Skip);
		add(t, ALTERNATE_4000, &[Alternate], "alternate 0x4000", Skip);
		add(t, ALTERNATE_6000, &[Alternate], "alternate 0x6000", Skip);
		add(t, ALTERNATE_7000, &[Alternate], "alternate 0x7000", Skip);
		table
	})
}

/// Name of a section code under a family, if recognized.
pub fn section_name(code: u32, family: Family) -> Option<&'static str> {
	dispatch_table().get(&(code, family)).map(|entry| entry.name)
}

/// Section loop states. The header is read before the loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	ReadingSection(u32),
	Done(LoopEnd),
	Aborted(LoopEnd),
}

fn read_section(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene, index: u32) -> State {
	if cursor.remaining() < 8 {
		return State::Aborted(LoopEnd::ShortSectionHeader);
	}
	let offset = cursor.position();
	let (Ok(kind), Ok(size)) = (cursor.read_u32::<LE>(), cursor.read_i32::<LE>()) else {
		return State::Aborted(LoopEnd::ShortSectionHeader);//checked above
	};
	if kind == section::TERMINATOR {
		return State::Done(LoopEnd::Terminator);
	}
	let Some(payload) = usize::try_from(size).ok().and_then(|size| cursor.sub(size)) else {
		ctx.emit(Diagnostic::SectionTruncated {
			kind,
			offset,
			declared: size as i64,
			available: cursor.remaining(),
		});
		return State::Aborted(LoopEnd::SectionOverrun);
	};
	let end = payload.end();
	dispatch(kind, offset, payload, ctx, scene);
	//decoders may stop anywhere inside their section
	match cursor.seek_absolute(end) {
		Ok(()) => State::ReadingSection(index + 1),
		Err(_) => State::Aborted(LoopEnd::SectionOverrun),
	}
}

fn dispatch(kind: u32, offset: usize, mut payload: Cursor, ctx: &mut Context, scene: &mut Scene) {
	let size = payload.remaining();
	let entry = dispatch_table().get(&(kind, ctx.revision.family())).copied();
	let decode = match entry.map(|entry| entry.handler) {
		Some(Handler::Decode(decode)) => Some(decode),
		Some(Handler::Geometry(source, decode)) if source == ctx.config.geometry_source => Some(decode),
		_ => None,
	};
	let Some(decode) = decode else {
		match entry {
			Some(_) => scene.stats.skipped += 1,
			None => scene.stats.unknown += 1,
		}
		ctx.emit(Diagnostic::SectionSkipped { kind, offset, size });
		return;
	};
	let name = entry.map_or("", |entry| entry.name);
	log::trace!("section {} (0x{:X}) at 0x{:08X}, {} bytes", name, kind, offset, size);
	match decode(&mut payload, ctx, scene) {
		Ok(()) => scene.stats.decoded += 1,
		Err(e) => {
			scene.stats.failed += 1;
			ctx.emit(Diagnostic::SectionError { kind, offset, message: format!("{}: {}", name, e) });
		},
	}
}

fn read_sections(cursor: &mut Cursor, count: i32, ctx: &mut Context, scene: &mut Scene) {
	let count = count.max(0) as u32;
	let mut state = State::ReadingSection(0);
	let mut sections = 0;
	loop {
		state = match state {
			State::ReadingSection(index) if index >= count => State::Done(LoopEnd::Exhausted),
			State::ReadingSection(index) => {
				sections = index;
				read_section(cursor, ctx, scene, index)
			},
			State::Done(reason) | State::Aborted(reason) => {
				let sections = match reason {
					LoopEnd::Exhausted => count,
					_ => sections,
				};
				ctx.emit(Diagnostic::LoopEnded { reason, sections });
				return;
			},
		};
	}
}

/// Decodes a level, reporting anomalies through `sink`.
pub fn decode_with(bytes: &[u8], config: &DecodeConfig, sink: &mut dyn Diagnostics) -> Result<Scene> {
	let mut cursor = Cursor::new(bytes);
	let header = Header::read(&mut cursor)?;
	log::debug!(
		"level '{}' revision {} ({:?}), {} sections",
		header.level_name, header.revision.raw(), header.revision.family(), header.section_count,
	);
	let mut scene = Scene::new(header.revision, header.timestamp, header.level_name, header.mod_name);
	let mut ctx = Context { revision: header.revision, config, sink };
	read_sections(&mut cursor, header.section_count, &mut ctx, &mut scene);
	if header.revision.is_alternate() {
		post::run(&mut scene, &mut ctx);
	}
	Ok(scene)
}

/// Decodes a level, reporting anomalies through `log`.
pub fn decode(bytes: &[u8], config: &DecodeConfig) -> Result<Scene> {
	decode_with(bytes, config, &mut LogSink)
}

pub fn decode_file<P: AsRef<Path>>(path: P, config: &DecodeConfig) -> Result<Scene> {
	let bytes = fs::read(path)?;
	decode(&bytes, config)
}
