use glam::Vec3;
use glam_traits::{GBVec, GVec};

/// Axis-aligned volume spanned by a minimum and maximum corner.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax<T> {
	pub min: T,
	pub max: T,
}

impl<T> MinMax<T> where T: Clone {
	/// Degenerate volume holding a single point.
	pub fn new(a: T) -> Self {
		Self { min: a.clone(), max: a }
	}
}

impl<T> MinMax<T> where T: GVec {
	pub fn update(&mut self, a: T) {
		self.min = self.min.min(a);
		self.max = self.max.max(a);
	}
	
	pub fn union(&self, other: &Self) -> Self {
		Self { min: self.min.min(other.min), max: self.max.max(other.max) }
	}
	
	pub fn contains_point(&self, a: T) -> bool {
		self.min.cmple(a).all() && self.max.cmpge(a).all()
	}
	
	/// Edge-touching volumes do not intersect.
	pub fn intersects(&self, other: &Self) -> bool {
		self.min.cmplt(other.max).all() && self.max.cmpgt(other.min).all()
	}
	
	/// Files store some boxes with corners swapped.
	pub fn normalized(&self) -> Self {
		Self { min: self.min.min(self.max), max: self.min.max(self.max) }
	}
}

impl MinMax<Vec3> {
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}
	
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}
}

pub trait MinMaxFromIterator: Iterator {
	fn min_max(self) -> Option<MinMax<Self::Item>>;
}

impl<I> MinMaxFromIterator for I where I: Iterator, I::Item: GVec {
	fn min_max(mut self) -> Option<MinMax<Self::Item>> {
		let mut min_max = MinMax::new(self.next()?);
		for a in self {
			min_max.update(a);
		}
		Some(min_max)
	}
}
