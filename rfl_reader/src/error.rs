use thiserror::Error;
use crate::container::MAGIC;

/// Conditions that stop a decode without producing a scene.
#[derive(Error, Debug)]
pub enum DecodeError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	
	#[error("wrong magic: 0x{0:08X} (expected 0x{expected:08X})", expected = MAGIC)]
	WrongMagic(u32),
	
	#[error("unsupported revision: {0}")]
	UnsupportedRevision(i32),
	
	#[error("header truncated at offset {0}")]
	TruncatedHeader(usize),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
