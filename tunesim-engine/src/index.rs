// ---------------------------------------------------------------------------
// SimilarityIndex: exact cosine nearest-neighbor search
// ---------------------------------------------------------------------------
//
// Owns the normalized feature matrix and a magnitude per row. Queries name
// the anchor by catalog position; distances are swept in parallel and then
// ordered by (distance, position), so equal distances always resolve to the
// lower catalog position first.
// ---------------------------------------------------------------------------

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::cosine::{compute_magnitude, cosine_distance_with_magnitude};
use crate::error::EngineError;
use crate::types::{FeatureVector, Neighbor};

pub struct SimilarityIndex {
	vectors: Vec<FeatureVector>,
	magnitudes: Vec<f64>,
}

impl SimilarityIndex {
	pub fn build(vectors: Vec<FeatureVector>) -> Self {
		let magnitudes = vectors.iter().map(|v| compute_magnitude(v)).collect();
		Self { vectors, magnitudes }
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}

	/// The `k` nearest tracks to `anchor`, nearest first, never including the
	/// anchor itself. Returns every other track when fewer than `k` exist.
	pub fn query(&self, anchor: usize, k: usize) -> Result<Vec<Neighbor>, EngineError> {
		if k == 0 {
			return Err(EngineError::InvalidNeighborCount(k));
		}
		let len = self.vectors.len();
		if anchor >= len {
			return Err(EngineError::PositionOutOfRange { position: anchor, len });
		}

		let target = &self.vectors[anchor];
		let target_mag = self.magnitudes[anchor];

		let mut neighbors: Vec<Neighbor> = self
			.vectors
			.par_iter()
			.zip(self.magnitudes.par_iter())
			.enumerate()
			.filter(|(position, _)| *position != anchor)
			.map(|(position, (vector, &mag))| Neighbor {
				position,
				distance: cosine_distance_with_magnitude(target, vector, target_mag, mag),
			})
			.collect();

		neighbors.sort_unstable_by(compare_neighbors);
		neighbors.truncate(k);
		Ok(neighbors)
	}
}

fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
	a.distance
		.total_cmp(&b.distance)
		.then_with(|| a.position.cmp(&b.position))
}
