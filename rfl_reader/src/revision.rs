/// Layout family a revision belongs to. Section codes are dispatched per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
	Legacy,
	Alternate,
}

/// Container revision, classified once from the raw header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
	/// `raw <= 200` or `raw >= 300`. `extended` for the `>= 0x12C` dialect.
	Legacy { raw: i32, extended: bool },
	/// Exactly 295.
	Alternate,
}

impl Revision {
	pub const LAST_LEGACY: i32 = 200;
	pub const ALTERNATE: i32 = 295;
	/// Header carries a mod name.
	pub const MOD_NAME: i32 = 0xB2;
	/// Geometry preamble, face scroll table and room EAX names.
	pub const EXTENDED_GEOMETRY: i32 = 0xB4;
	/// Extended legacy dialect.
	pub const EXTENDED_DIALECT: i32 = 0x12C;
	
	/// None for the unassigned gap between the two families.
	pub fn classify(raw: i32) -> Option<Self> {
		match raw {
			Self::ALTERNATE => Some(Revision::Alternate),
			raw if raw <= Self::LAST_LEGACY || raw >= Self::EXTENDED_DIALECT => Some(Revision::Legacy {
				raw,
				extended: raw >= Self::EXTENDED_DIALECT,
			}),
			_ => None,
		}
	}
	
	pub fn family(self) -> Family {
		match self {
			Revision::Legacy { .. } => Family::Legacy,
			Revision::Alternate => Family::Alternate,
		}
	}
	
	pub fn raw(self) -> i32 {
		match self {
			Revision::Legacy { raw, .. } => raw,
			Revision::Alternate => Self::ALTERNATE,
		}
	}
	
	pub fn is_alternate(self) -> bool {
		self == Revision::Alternate
	}
	
	pub fn is_extended(self) -> bool {
		matches!(self, Revision::Legacy { extended: true, .. })
	}
	
	/// Legacy at or above a threshold. Always false for Alternate.
	pub fn legacy_since(self, threshold: i32) -> bool {
		matches!(self, Revision::Legacy { raw, .. } if raw >= threshold)
	}
	
	/// Legacy below a threshold. Always false for Alternate.
	pub fn legacy_before(self, threshold: i32) -> bool {
		matches!(self, Revision::Legacy { raw, .. } if raw < threshold)
	}
}
