pub mod geom {
	pub use crate::min_max::*;
}

mod min_max;
