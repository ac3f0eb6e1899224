use std::collections::HashMap;
use glam::Vec3;

/// Positions closer than this grid step collapse into one vertex.
pub const QUANTIZE_STEP: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
	Grid([i64; 3]),
	/// Non-finite or off-grid positions only merge with identical bits.
	Exact([u32; 3]),
}

fn key(v: Vec3) -> Key {
	let scaled = (v / QUANTIZE_STEP).round();
	match scaled.is_finite() && scaled.abs().max_element() < i64::MAX as f32 {
		true => Key::Grid(scaled.to_array().map(|c| c as i64)),
		false => Key::Exact(v.to_array().map(f32::to_bits)),
	}
}

/// Shared vertex list keyed by position rounded to 3 decimal places.
/// The first position seen for a key is the one kept.
#[derive(Debug, Default, Clone)]
pub struct VertexPool {
	vertices: Vec<Vec3>,
	lookup: HashMap<Key, u32>,
}

impl VertexPool {
	pub fn new() -> Self {
		Self::default()
	}
	
	/// Index of the vertex at `v`, added if unseen.
	pub fn insert(&mut self, v: Vec3) -> u32 {
		let vertices = &mut self.vertices;
		*self.lookup.entry(key(v)).or_insert_with(|| {
			vertices.push(v);
			vertices.len() as u32 - 1
		})
	}
	
	pub fn len(&self) -> usize {
		self.vertices.len()
	}
	
	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}
	
	pub fn into_vertices(self) -> Vec<Vec3> {
		self.vertices
	}
}

/// Unique positions and, per input position, its index into them.
pub fn dedup(positions: &[Vec3]) -> (Vec<Vec3>, Vec<u32>) {
	let mut pool = VertexPool::new();
	let indices = positions.iter().map(|&v| pool.insert(v)).collect();
	(pool.into_vertices(), indices)
}

#[cfg(test)]
mod tests {
	use glam::vec3;
	use quickcheck_macros::quickcheck;
	use super::*;
	
	#[test]
	fn merges_noise() {
		let (unique, indices) = dedup(&[
			vec3(1.0, 2.0, 3.0),
			vec3(1.0001, 2.0, 2.9999),
			vec3(1.01, 2.0, 3.0),
			vec3(1.0, 2.0, 3.0),
		]);
		assert_eq!(unique, [vec3(1.0, 2.0, 3.0), vec3(1.01, 2.0, 3.0)]);
		assert_eq!(indices, [0, 0, 1, 0]);
	}
	
	#[test]
	fn non_finite_positions_stay_apart() {
		let (unique, indices) = dedup(&[Vec3::NAN, Vec3::ZERO, Vec3::INFINITY, Vec3::MAX, Vec3::ZERO, Vec3::INFINITY]);
		assert_eq!(unique.len(), 4);
		assert_eq!(indices, [0, 1, 2, 3, 1, 2]);
		assert_eq!(unique[1], Vec3::ZERO);
	}
	
	fn to_positions(raw: Vec<(i16, i16, i16)>) -> Vec<Vec3> {
		//quarter-millimetre grid produces near-duplicates
		raw.into_iter().map(|(x, y, z)| vec3(x as f32, y as f32, z as f32) * 0.00025).collect()
	}
	
	#[quickcheck]
	fn idempotent(raw: Vec<(i16, i16, i16)>) -> bool {
		let (unique, _) = dedup(&to_positions(raw));
		let (again, indices) = dedup(&unique);
		again == unique && indices.iter().enumerate().all(|(i, &index)| i as u32 == index)
	}
	
	#[quickcheck]
	fn indices_map_to_source(raw: Vec<(i16, i16, i16)>) -> bool {
		let positions = to_positions(raw);
		let (unique, indices) = dedup(&positions);
		positions
			.iter()
			.zip(indices)
			.all(|(p, index)| (unique[index as usize] - *p).abs().max_element() <= QUANTIZE_STEP * 1.01)
	}
}
