use std::io::{self, Read};
use byteorder::{ReadBytesExt, LE};
use glam::{Mat3, Vec3};
use crate::{container::Context, cursor::Cursor, read_vstring, revision::Revision, scene::Scene, Readable};

/// Legacy event classes that store an orientation.
const ORIENTED_CLASSES: &[&str] = &["Teleport", "Play_Vclip", "Teleport_Player", "Alarm_Siren", "Cyclic_Timer"];
const MIN_EVENT_SIZE: usize = 4 + 2 + 12 + 2 + 1 + 4 + 2 + 16 + 4 + 4 + 4;

/// Generic scripted event. The meaning of the bool/int/float/string
/// parameters depends on the class.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
	pub uid: u32,
	pub class_name: String,
	pub pos: Vec3,
	/// Identity unless the record stores one
	pub rotation: Mat3,
	pub script_name: String,
	pub hidden: bool,
	pub delay: f32,
	pub bools: [bool; 2],
	pub ints: [i32; 2],
	pub floats: [f32; 2],
	pub strings: [String; 2],
	/// Uids of linked objects
	pub links: Vec<u32>,
	pub color: u32,
	/// Alternate only, meaning unresolved
	pub unknown: Option<[u8; 12]>,
}

#[derive(Readable)]
struct EventParams {
	delay: f32,
	bools: [bool; 2],
	ints: [i32; 2],
	floats: [f32; 2],
	#[vstring]
	str1: String,
	#[vstring]
	str2: String,
}

fn read_event(cursor: &mut Cursor, ctx: &mut Context) -> io::Result<Event> {
	let uid = cursor.read_u32::<LE>()?;
	let class_name = read_vstring(cursor)?;
	let pos = Vec3::read(cursor)?;
	let script_name = read_vstring(cursor)?;
	let hidden = bool::read(cursor)?;
	let EventParams { delay, bools, ints, floats, str1, str2 } = EventParams::read(cursor)?;
	let mut unknown = [0; 12];
	let (links, rotation) = match ctx.revision {
		Revision::Alternate => {
			cursor.read_exact(&mut unknown[..8])?;
			let links = ctx.read_links(cursor)?;
			(links, Mat3::read(cursor)?)
		},
		_ => {
			let links = ctx.read_links(cursor)?;
			let rotation = match ORIENTED_CLASSES.iter().any(|&c| c.eq_ignore_ascii_case(&class_name)) {
				true => Mat3::read(cursor)?,
				false => Mat3::IDENTITY,
			};
			(links, rotation)
		},
	};
	let color = cursor.read_u32::<LE>()?;
	let unknown = match ctx.revision {
		Revision::Alternate => {
			cursor.read_exact(&mut unknown[8..])?;
			Some(unknown)
		},
		_ => None,
	};
	Ok(Event {
		uid,
		class_name,
		pos,
		rotation,
		script_name,
		hidden,
		delay,
		bools,
		ints,
		floats,
		strings: [str1, str2],
		links,
		color,
		unknown,
	})
}

pub(crate) fn read_events(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_EVENT_SIZE, "event")?;
	for _ in 0..count {
		let event = read_event(cursor, ctx)?;
		scene.events.push(event);
	}
	Ok(())
}
