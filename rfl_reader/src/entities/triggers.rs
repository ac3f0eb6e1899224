use std::io;
use byteorder::{ReadBytesExt, LE};
use glam::{Mat3, Vec3};
use crate::{container::Context, cursor::Cursor, read_vstring, revision::Revision, scene::Scene, Readable};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerShape {
	Sphere {
		radius: f32,
	},
	Box {
		rotation: Mat3,
		height: f32,
		width: f32,
		depth: f32,
		/// Fires only when entered from the front
		one_way: bool,
	},
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
	pub uid: u32,
	pub script_name: String,
	pub resets_after: f32,
	/// 0xFFFF for unlimited
	pub resets_count: u16,
	pub use_key: bool,
	pub key_name: String,
	pub weapon_activates: bool,
	pub is_npc: bool,
	pub is_auto: bool,
	pub in_vehicle: bool,
	pub pos: Vec3,
	pub shape: TriggerShape,
	pub airlock_room: u32,
	pub attached_to: u32,
	pub use_clutter: u32,
	pub disabled: bool,
	pub button_active_time: f32,
	pub inside_time: f32,
	pub links: Vec<u32>,
}

#[derive(Readable)]
struct Activation {
	weapon_activates: bool,
	#[skip(1)]
	is_npc: bool,
	is_auto: bool,
	in_vehicle: bool,
	pos: Vec3,
}

#[derive(Readable)]
struct BoxExtents {
	rotation: Mat3,
	height: f32,
	width: f32,
	depth: f32,
	one_way: bool,
}

#[derive(Readable)]
struct Targets {
	airlock_room: u32,
	attached_to: u32,
	use_clutter: u32,
	disabled: bool,
	button_active_time: f32,
	inside_time: f32,
}

/// Sphere trigger with empty names and no links.
const MIN_TRIGGER_SIZE: usize = 4 + 2 + 5 + 8 + 1 + 2 + 5 + 12 + 4 + 12 + 1 + 8 + 4;

fn read_trigger(cursor: &mut Cursor, ctx: &mut Context) -> io::Result<Trigger> {
	let uid = cursor.read_u32::<LE>()?;
	let script_name = read_vstring(cursor)?;
	cursor.skip(1)?;
	let is_box = bool::read(cursor)?;
	cursor.skip(3)?;
	let resets_after = cursor.read_f32::<LE>()?;
	let resets_count = cursor.read_u16::<LE>()?;
	cursor.skip(2)?;
	let use_key = bool::read(cursor)?;
	let key_name = read_vstring(cursor)?;
	let activation = Activation::read(cursor)?;
	let shape = match is_box {
		true => {
			let BoxExtents { rotation, height, width, depth, one_way } = BoxExtents::read(cursor)?;
			TriggerShape::Box { rotation, height, width, depth, one_way }
		},
		false => TriggerShape::Sphere { radius: cursor.read_f32::<LE>()? },
	};
	let targets = Targets::read(cursor)?;
	if ctx.revision.legacy_since(Revision::EXTENDED_GEOMETRY) {
		cursor.skip(4)?;
	}
	let links = ctx.read_links(cursor)?;
	Ok(Trigger {
		uid,
		script_name,
		resets_after,
		resets_count,
		use_key,
		key_name,
		weapon_activates: activation.weapon_activates,
		is_npc: activation.is_npc,
		is_auto: activation.is_auto,
		in_vehicle: activation.in_vehicle,
		pos: activation.pos,
		shape,
		airlock_room: targets.airlock_room,
		attached_to: targets.attached_to,
		use_clutter: targets.use_clutter,
		disabled: targets.disabled,
		button_active_time: targets.button_active_time,
		inside_time: targets.inside_time,
		links,
	})
}

pub(crate) fn read_triggers(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, MIN_TRIGGER_SIZE, "trigger")?;
	for _ in 0..count {
		let trigger = read_trigger(cursor, ctx)?;
		scene.triggers.push(trigger);
	}
	Ok(())
}
