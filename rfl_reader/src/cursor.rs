use std::io::{ErrorKind, Read, Result};

/// Forward reader over a byte buffer, bounded to `[start, end)` of it.
/// Positions are absolute offsets into the whole buffer.
#[derive(Clone)]
pub struct Cursor<'a> {
	data: &'a [u8],
	pos: usize,
	end: usize,
}

impl<'a> Cursor<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, pos: 0, end: data.len() }
	}
	
	pub fn position(&self) -> usize {
		self.pos
	}
	
	/// Exclusive upper bound of this cursor.
	pub fn end(&self) -> usize {
		self.end
	}
	
	pub fn remaining(&self) -> usize {
		self.end - self.pos
	}
	
	pub fn is_empty(&self) -> bool {
		self.pos == self.end
	}
	
	pub fn seek_absolute(&mut self, pos: usize) -> Result<()> {
		if pos > self.end {
			return Err(ErrorKind::UnexpectedEof.into());
		}
		self.pos = pos;
		Ok(())
	}
	
	pub fn skip(&mut self, num: usize) -> Result<()> {
		if num > self.remaining() {
			return Err(ErrorKind::UnexpectedEof.into());
		}
		self.pos += num;
		Ok(())
	}
	
	/// Cursor over the next `len` bytes, or None if they run past the bound.
	/// Does not advance self.
	pub fn sub(&self, len: usize) -> Option<Cursor<'a>> {
		let end = self.pos.checked_add(len)?;
		(end <= self.end).then(|| Cursor { data: self.data, pos: self.pos, end })
	}
	
	pub fn take_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
		if len > self.remaining() {
			return Err(ErrorKind::UnexpectedEof.into());
		}
		let bytes = &self.data[self.pos..self.pos + len];
		self.pos += len;
		Ok(bytes)
	}
}

impl Read for Cursor<'_> {
	fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
		let len = buf.len().min(self.remaining());
		buf[..len].copy_from_slice(&self.data[self.pos..self.pos + len]);
		self.pos += len;
		Ok(len)
	}
}
