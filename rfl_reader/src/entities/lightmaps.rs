use std::io;
use byteorder::{ReadBytesExt, LE};
use crate::{container::Context, cursor::Cursor, diagnostics::Diagnostic, scene::Scene};

/// Baked lighting image, 24-bit RGB rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Lightmap {
	pub width: u32,
	pub height: u32,
	/// May be shorter than width * height * 3 if the section was cut short
	pub data: Vec<u8>,
}

impl Lightmap {
	pub fn is_complete(&self) -> bool {
		self.data.len() as u64 == self.width as u64 * self.height as u64 * 3
	}
}

pub(crate) fn read_lightmaps(cursor: &mut Cursor, ctx: &mut Context, scene: &mut Scene) -> io::Result<()> {
	let count = ctx.read_count(cursor, 8, "lightmap")?;
	for _ in 0..count {
		let width = cursor.read_u32::<LE>()?;
		let height = cursor.read_u32::<LE>()?;
		let declared = width as u64 * height as u64 * 3;
		let len = match usize::try_from(declared) {
			Ok(len) if len <= cursor.remaining() => len,
			_ => {
				ctx.emit(Diagnostic::Clamped {
					what: "lightmap",
					declared: usize::try_from(declared).unwrap_or(usize::MAX),
					available: cursor.remaining(),
				});
				cursor.remaining()
			},
		};
		let data = cursor.take_bytes(len)?.to_vec();
		scene.lightmaps.push(Lightmap { width, height, data });
	}
	Ok(())
}
