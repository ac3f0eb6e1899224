extern crate self as rfl_reader;

pub mod config;
pub mod container;
pub mod cursor;
pub mod diagnostics;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod post;
pub mod revision;
pub mod scene;
pub mod texture_names;
pub(crate) mod impls;

use std::io::{self, ErrorKind, Read, Result};
use byteorder::{ReadBytesExt, LE};
pub(crate) use rfl_derive::Readable;

pub use config::DecodeConfig;
pub use container::{decode, decode_file, decode_with, MAGIC};
pub use error::DecodeError;
pub use revision::Revision;
pub use scene::Scene;

pub(crate) trait Readable: Sized {
	fn read<R: Read>(reader: &mut R) -> Result<Self>;
}

pub(crate) fn skip<R: Read>(reader: &mut R, num: usize) -> Result<()> {
	let skipped = io::copy(&mut reader.take(num as u64), &mut io::sink())?;
	match skipped == num as u64 {
		true => Ok(()),
		false => Err(ErrorKind::UnexpectedEof.into()),
	}
}

/// u16 length then that many ascii bytes. 0 and 0xFFFF both mean empty.
pub(crate) fn read_vstring<R: Read>(reader: &mut R) -> Result<String> {
	let len = match reader.read_u16::<LE>()? {
		0 | u16::MAX => return Ok(String::new()),
		len => len as usize,
	};
	let mut bytes = vec![0; len];
	reader.read_exact(&mut bytes)?;
	Ok(latin1(&bytes))
}

/// Bytes up to and excluding the first nul.
pub(crate) fn read_cstring<R: Read>(reader: &mut R) -> Result<String> {
	let mut bytes = vec![];
	loop {
		match reader.read_u8()? {
			0 => break,
			b => bytes.push(b),
		}
	}
	Ok(latin1(&bytes))
}

fn latin1(bytes: &[u8]) -> String {
	bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;
	use super::*;
	
	#[test]
	fn vstring_lengths() {
		let mut reader = Cursor::new(b"\x05\x00hello\x00\x00\xFF\xFFrest".as_slice());
		assert_eq!(read_vstring(&mut reader).unwrap(), "hello");
		assert_eq!(read_vstring(&mut reader).unwrap(), "");
		assert_eq!(read_vstring(&mut reader).unwrap(), "");
		assert_eq!(reader.position(), 11);
	}
	
	#[test]
	fn vstring_truncated() {
		let mut reader = Cursor::new(b"\x09\x00abc".as_slice());
		assert_eq!(read_vstring(&mut reader).unwrap_err().kind(), ErrorKind::UnexpectedEof);
	}
	
	#[test]
	fn cstring_stops_at_nul() {
		let mut reader = Cursor::new(b"eax_cave\x00next".as_slice());
		assert_eq!(read_cstring(&mut reader).unwrap(), "eax_cave");
		assert_eq!(reader.position(), 9);
		assert!(read_cstring(&mut reader).is_err());
	}
	
	#[test]
	fn skip_past_end() {
		let mut reader = Cursor::new([0u8; 4].as_slice());
		assert!(skip(&mut reader, 3).is_ok());
		assert!(skip(&mut reader, 2).is_err());
	}
}
