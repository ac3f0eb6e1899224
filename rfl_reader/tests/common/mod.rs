//! Byte-level writer for synthetic levels.
#![allow(dead_code)]

use byteorder::{WriteBytesExt, LE};
use rfl_reader::MAGIC;

pub const LEGACY: i32 = 0xB4;
pub const LEGACY_OLD: i32 = 0x96;
pub const LEGACY_EXTENDED: i32 = 0x12C;
pub const ALTERNATE: i32 = 295;

pub const IDENTITY: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

#[derive(Default)]
pub struct Writer(pub Vec<u8>);

impl Writer {
	pub fn new() -> Self {
		Self::default()
	}
	
	pub fn u8(&mut self, v: u8) -> &mut Self {
		self.0.write_u8(v).unwrap();
		self
	}
	
	pub fn u16(&mut self, v: u16) -> &mut Self {
		self.0.write_u16::<LE>(v).unwrap();
		self
	}
	
	pub fn u32(&mut self, v: u32) -> &mut Self {
		self.0.write_u32::<LE>(v).unwrap();
		self
	}
	
	pub fn i32(&mut self, v: i32) -> &mut Self {
		self.0.write_i32::<LE>(v).unwrap();
		self
	}
	
	pub fn f32(&mut self, v: f32) -> &mut Self {
		self.0.write_f32::<LE>(v).unwrap();
		self
	}
	
	pub fn floats(&mut self, v: &[f32]) -> &mut Self {
		v.iter().for_each(|&f| { self.f32(f); });
		self
	}
	
	pub fn color(&mut self, rgba: [u8; 4]) -> &mut Self {
		self.bytes(&rgba)
	}
	
	pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
		self.0.extend_from_slice(v);
		self
	}
	
	pub fn zeros(&mut self, len: usize) -> &mut Self {
		self.0.resize(self.0.len() + len, 0);
		self
	}
	
	pub fn vstring(&mut self, s: &str) -> &mut Self {
		self.u16(s.len() as u16).bytes(s.as_bytes())
	}
	
	pub fn cstring(&mut self, s: &str) -> &mut Self {
		self.bytes(s.as_bytes()).u8(0)
	}
	
	pub fn links(&mut self, uids: &[u32]) -> &mut Self {
		self.u32(uids.len() as u32);
		uids.iter().for_each(|&uid| { self.u32(uid); });
		self
	}
	
	/// Object header with an identity basis.
	pub fn object(&mut self, uid: u32, class_name: &str, pos: [f32; 3]) -> &mut Self {
		self.object_with_basis(uid, class_name, pos, IDENTITY)
	}
	
	pub fn object_with_basis(&mut self, uid: u32, class_name: &str, pos: [f32; 3], basis: [f32; 9]) -> &mut Self {
		self.u32(uid).vstring(class_name).floats(&pos).floats(&basis).vstring("").u8(0)
	}
	
	pub fn take(&mut self) -> Vec<u8> {
		std::mem::take(&mut self.0)
	}
}

pub fn has_mod_name(revision: i32) -> bool {
	(0xB2..=200).contains(&revision) || revision >= 300
}

/// Header plus sections, in order.
pub struct LevelBuilder {
	revision: i32,
	sections: Vec<(u32, Vec<u8>)>,
	declared_count: Option<i32>,
}

impl LevelBuilder {
	pub fn new(revision: i32) -> Self {
		Self { revision, sections: vec![], declared_count: None }
	}
	
	pub fn section(&mut self, kind: u32, payload: Vec<u8>) -> &mut Self {
		self.sections.push((kind, payload));
		self
	}
	
	pub fn terminator(&mut self) -> &mut Self {
		self.section(0, vec![])
	}
	
	/// Overrides the header's section count.
	pub fn declared_count(&mut self, count: i32) -> &mut Self {
		self.declared_count = Some(count);
		self
	}
	
	pub fn build(&self) -> Vec<u8> {
		let total = self.sections.iter().map(|(_, payload)| 8 + payload.len()).sum::<usize>();
		let mut w = Writer::new();
		w.u32(MAGIC)
			.i32(self.revision)
			.u32(0x5F00_0000)
			.i32(0)
			.i32(0)
			.i32(self.declared_count.unwrap_or(self.sections.len() as i32))
			.i32(total as i32)
			.vstring("test level");
		if has_mod_name(self.revision) {
			w.vstring("");
		}
		for (kind, payload) in &self.sections {
			w.u32(*kind).u32(payload.len() as u32).bytes(payload);
		}
		w.take()
	}
}

#[derive(Clone)]
pub struct FaceDef {
	pub texture: i32,
	pub face_id: i32,
	pub flags: u32,
	pub smoothing: u32,
	/// Alternate inline scroll, written when flags has 0x0001_0000
	pub scroll: [f32; 2],
	/// Alternate sub-revision 2 and up
	pub alpha: f32,
	pub corners: Vec<(u32, [f32; 2])>,
}

impl FaceDef {
	pub fn new(face_id: i32, corners: &[u32]) -> Self {
		Self {
			texture: 0,
			face_id,
			flags: 0,
			smoothing: 0,
			scroll: [0.0; 2],
			alpha: 1.0,
			corners: corners.iter().map(|&i| (i, [i as f32, 0.5])).collect(),
		}
	}
	
	pub fn flags(mut self, flags: u32) -> Self {
		self.flags = flags;
		self
	}
}

pub struct RoomDef {
	pub liquid: bool,
	pub ambient: bool,
}

/// Geometry body as found in 0x100 and in each movable brush.
pub struct BodyBuilder {
	pub revision: i32,
	pub sub_revision: u32,
	pub static_geo: bool,
	pub textures: Vec<String>,
	pub scroll_table: Vec<(u32, [f32; 2])>,
	pub rooms: Vec<RoomDef>,
	pub vertices: Vec<[f32; 3]>,
	pub faces: Vec<FaceDef>,
	/// Overrides the written face count.
	pub declared_faces: Option<u32>,
}

impl BodyBuilder {
	pub fn new(revision: i32, static_geo: bool) -> Self {
		Self {
			revision,
			sub_revision: 0,
			static_geo,
			textures: vec!["rock01.tga".into()],
			scroll_table: vec![],
			rooms: vec![],
			vertices: vec![],
			faces: vec![],
			declared_faces: None,
		}
	}
	
	fn is_alternate(&self) -> bool {
		self.revision == ALTERNATE
	}
	
	fn is_extended_geometry(&self) -> bool {
		!self.is_alternate() && self.revision >= 0xB4
	}
	
	fn write_room(&self, w: &mut Writer, id: u32, room: &RoomDef) {
		w.u32(id).floats(&[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]);
		if self.is_alternate() {
			w.bytes(&[0, 1, room.liquid as u8, 0]).f32(100.0).cstring("cave").f32(2.0).u32(0).u32(0).f32(0.0);
			return;
		}
		w.bytes(&[0, 0, 1, 0, room.liquid as u8, room.ambient as u8, 0, 0]).f32(100.0);
		if self.is_extended_geometry() {
			w.vstring("cave");
		}
		if room.liquid {
			w.f32(2.0).u32(0xFF00_00FF).vstring("water.tga").f32(1.0).u32(0).u32(0).zeros(13).f32(0.0).floats(&[0.1, 0.2]);
		}
		if room.ambient {
			w.u32(0x0040_4040);
		}
	}
	
	fn write_face(&self, w: &mut Writer, face: &FaceDef) {
		w.floats(&[0.0, 0.0, 1.0, 0.0]).i32(face.texture).u32(u32::MAX).i32(face.face_id).u32(0);
		if self.is_alternate() {
			w.u32(face.flags).u32(face.smoothing);
			if face.flags & 0x0001_0000 != 0 {
				w.floats(&face.scroll);
			}
			if self.sub_revision >= 2 {
				w.zeros(3).f32(face.alpha);
			}
		} else {
			w.u16(face.flags as u16).u16(0).u32(0).u32(face.smoothing).i32(0);
		}
		let lightmap = self.static_geo && face.flags & 0x20 == 0 && face.flags & 0x2000 == 0;
		w.u32(face.corners.len() as u32);
		for (index, uv) in &face.corners {
			w.u32(*index).floats(uv);
			if lightmap {
				w.floats(&[0.25, 0.75]);
			}
		}
	}
	
	pub fn write(&self, w: &mut Writer) {
		if self.is_extended_geometry() {
			w.zeros(8);
		}
		w.vstring("geometry");
		if !self.is_extended_geometry() {
			w.u32(self.sub_revision);
		}
		w.u32(self.textures.len() as u32);
		self.textures.iter().for_each(|name| { w.vstring(name); });
		if self.is_extended_geometry() {
			w.u32(self.scroll_table.len() as u32);
			for (face_id, uv) in &self.scroll_table {
				w.u32(*face_id).floats(uv);
			}
		} else if !self.is_alternate() {
			w.u32(0);
		}
		w.u32(self.rooms.len() as u32);
		for (id, room) in self.rooms.iter().enumerate() {
			self.write_room(w, id as u32 + 1, room);
		}
		w.u32(0);//subroom links
		if self.is_alternate() {
			w.u32(0);//uroom links
		}
		w.u32(0);//portals
		w.u32(self.vertices.len() as u32);
		self.vertices.iter().for_each(|v| { w.floats(v); });
		w.u32(self.declared_faces.unwrap_or(self.faces.len() as u32));
		self.faces.iter().for_each(|face| self.write_face(w, face));
		if !self.is_alternate() {
			w.u32(0);//surfaces
			if !self.is_extended_geometry() {
				w.u32(0);//legacy face scroll
			}
		}
	}
	
	pub fn bytes(&self) -> Vec<u8> {
		let mut w = Writer::new();
		self.write(&mut w);
		w.take()
	}
}

/// Movable brush record.
pub fn write_brush(w: &mut Writer, uid: u32, pos: [f32; 3], body: &BodyBuilder, tail: Option<(u32, i32, u32)>) {
	w.u32(uid).floats(&pos).floats(&IDENTITY);
	body.write(w);
	if let Some((flags, life, state)) = tail {
		w.u32(flags).i32(life).u32(state);
	}
}

/// Quad whose four raw vertices collapse to two positions.
pub fn coincident_quad(revision: i32, static_geo: bool) -> BodyBuilder {
	let mut body = BodyBuilder::new(revision, static_geo);
	body.vertices = vec![
		[0.0, 0.0, 0.0],
		[0.0001, 0.0, 0.0],
		[1.0, 1.0, 1.0],
		[1.0, 1.0, 1.0002],
	];
	body.faces = vec![FaceDef::new(7, &[0, 1, 2, 3])];
	body
}

/// Unit square as one quad face.
pub fn square(revision: i32, static_geo: bool) -> BodyBuilder {
	let mut body = BodyBuilder::new(revision, static_geo);
	body.vertices = vec![
		[0.0, 0.0, 0.0],
		[1.0, 0.0, 0.0],
		[1.0, 1.0, 0.0],
		[0.0, 1.0, 0.0],
	];
	body.faces = vec![FaceDef::new(1, &[0, 1, 2, 3])];
	body
}
