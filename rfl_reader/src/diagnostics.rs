use std::fmt;

/// Why the section loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
	/// Declared section count reached.
	Exhausted,
	/// Zero-type terminator section.
	Terminator,
	/// Fewer than 8 bytes left for a section header.
	ShortSectionHeader,
	/// Section size runs past the end of the buffer.
	SectionOverrun,
}

/// Structured record of a recoverable anomaly or a notable decode event.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
	SectionSkipped { kind: u32, offset: usize, size: usize },
	SectionTruncated { kind: u32, offset: usize, declared: i64, available: usize },
	SectionError { kind: u32, offset: usize, message: String },
	VertexIndexOutOfRange { face_id: i32, index: u32, pool: usize },
	DegenerateFace { face_id: i32, corners: usize },
	ImplausibleCount { what: &'static str, count: u32, offset: usize },
	Clamped { what: &'static str, declared: usize, available: usize },
	Truncated { what: &'static str, offset: usize },
	BlackCoronaSkipped { uid: u32 },
	UnknownBrushBlock { uid: u32, flags: u32 },
	LoopEnded { reason: LoopEnd, sections: u32 },
}

impl Diagnostic {
	/// Whether the event indicates malformed input rather than normal flow.
	pub fn is_anomaly(&self) -> bool {
		!matches!(
			self,
			Diagnostic::SectionSkipped { .. } | Diagnostic::BlackCoronaSkipped { .. } |
			Diagnostic::LoopEnded { reason: LoopEnd::Exhausted | LoopEnd::Terminator, .. }
		)
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::SectionSkipped { kind, offset, size } => {
				write!(f, "skipped section 0x{:X} at 0x{:08X} ({} bytes)", kind, offset, size)
			},
			Diagnostic::SectionTruncated { kind, offset, declared, available } => write!(
				f,
				"section 0x{:X} at 0x{:08X} declares {} bytes, {} available",
				kind, offset, declared, available,
			),
			Diagnostic::SectionError { kind, offset, message } => {
				write!(f, "section 0x{:X} at 0x{:08X}: {}", kind, offset, message)
			},
			Diagnostic::VertexIndexOutOfRange { face_id, index, pool } => {
				write!(f, "face {}: vertex index {} outside pool of {}", face_id, index, pool)
			},
			Diagnostic::DegenerateFace { face_id, corners } => {
				write!(f, "face {}: only {} usable corners", face_id, corners)
			},
			Diagnostic::ImplausibleCount { what, count, offset } => {
				write!(f, "implausible {} count {} at 0x{:08X}, using 0", what, count, offset)
			},
			Diagnostic::Clamped { what, declared, available } => {
				write!(f, "{}: {} bytes declared, clamped to {}", what, declared, available)
			},
			Diagnostic::Truncated { what, offset } => write!(f, "{} truncated at 0x{:08X}", what, offset),
			Diagnostic::BlackCoronaSkipped { uid } => write!(f, "corona {} is black, not converted", uid),
			Diagnostic::UnknownBrushBlock { uid, flags } => {
				write!(f, "brush {}: skipped unidentified block (flags 0x{:X})", uid, flags)
			},
			Diagnostic::LoopEnded { reason, sections } => {
				write!(f, "section loop ended after {} sections: {:?}", sections, reason)
			},
		}
	}
}

/// Receiver for decode events. Decoding never depends on what a sink does.
pub trait Diagnostics {
	fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Diagnostics for LogSink {
	fn emit(&mut self, diagnostic: Diagnostic) {
		match diagnostic.is_anomaly() {
			true => log::warn!("{}", diagnostic),
			false => log::debug!("{}", diagnostic),
		}
	}
}

impl Diagnostics for Vec<Diagnostic> {
	fn emit(&mut self, diagnostic: Diagnostic) {
		self.push(diagnostic);
	}
}
