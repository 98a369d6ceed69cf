// ---------------------------------------------------------------------------
// Feature normalization: per-column min/max scaling into [0, 1]
// ---------------------------------------------------------------------------
//
// Bounds are learned once over the whole catalog and reused unchanged for
// every vector. A column whose min equals its max scales to 0 everywhere.
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::types::{FeatureColumn, FeatureVector, Track, FEATURE_COUNT};

// ---------------------------------------------------------------------------
// FeatureBounds
// ---------------------------------------------------------------------------

/// Per-column `(min, max)` learned from a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBounds {
	min: FeatureVector,
	max: FeatureVector,
}

/// Serializable view of one column's bounds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBounds {
	pub column: FeatureColumn,
	pub min: f64,
	pub max: f64,
}

impl FeatureBounds {
	/// Learn bounds from raw feature rows. An empty input yields all-zero bounds.
	pub fn fit<'a, I>(rows: I) -> Self
	where
		I: IntoIterator<Item = &'a FeatureVector>,
	{
		let mut min = [f64::INFINITY; FEATURE_COUNT];
		let mut max = [f64::NEG_INFINITY; FEATURE_COUNT];
		let mut seen = false;

		for row in rows {
			seen = true;
			for i in 0..FEATURE_COUNT {
				min[i] = min[i].min(row[i]);
				max[i] = max[i].max(row[i]);
			}
		}

		if !seen {
			return Self {
				min: [0.0; FEATURE_COUNT],
				max: [0.0; FEATURE_COUNT],
			};
		}
		Self { min, max }
	}

	/// Scale a raw row with these bounds. Output is clamped into [0, 1].
	pub fn scale(&self, raw: &FeatureVector) -> FeatureVector {
		let mut scaled = [0.0; FEATURE_COUNT];
		for i in 0..FEATURE_COUNT {
			let range = self.max[i] - self.min[i];
			if range > 0.0 {
				scaled[i] = ((raw[i] - self.min[i]) / range).clamp(0.0, 1.0);
			}
		}
		scaled
	}

	pub fn min(&self) -> &FeatureVector {
		&self.min
	}

	pub fn max(&self) -> &FeatureVector {
		&self.max
	}

	pub fn columns(&self) -> Vec<ColumnBounds> {
		FeatureColumn::ALL
			.iter()
			.enumerate()
			.map(|(i, &column)| ColumnBounds {
				column,
				min: self.min[i],
				max: self.max[i],
			})
			.collect()
	}
}

// ---------------------------------------------------------------------------
// FeatureNormalizer
// ---------------------------------------------------------------------------

pub struct FeatureNormalizer;

impl FeatureNormalizer {
	/// Learn bounds and scale every track, in catalog order.
	pub fn build(tracks: &[Track]) -> (FeatureBounds, Vec<FeatureVector>) {
		let raw: Vec<FeatureVector> = tracks.iter().map(Track::raw_features).collect();
		let bounds = FeatureBounds::fit(&raw);
		let matrix = raw.iter().map(|row| bounds.scale(row)).collect();
		(bounds, matrix)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::track;

	#[test]
	fn every_component_in_unit_interval() {
		let tracks = vec![
			track("A", "X", 1990, 10.0),
			track("B", "Y", 2005, 55.5),
			track("C", "Z", 2020, 99.0),
		];
		let (_, matrix) = FeatureNormalizer::build(&tracks);
		assert_eq!(matrix.len(), 3);
		for row in &matrix {
			for &v in row {
				assert!((0.0..=1.0).contains(&v), "component {v} escaped [0,1]");
			}
		}
	}

	#[test]
	fn min_and_max_map_to_zero_and_one() {
		let tracks = vec![track("A", "X", 1990, 10.0), track("B", "Y", 2020, 30.0)];
		let (bounds, matrix) = FeatureNormalizer::build(&tracks);
		assert_eq!(bounds.min()[0], 10.0);
		assert_eq!(bounds.max()[0], 30.0);
		assert_eq!(matrix[0][0], 0.0);
		assert_eq!(matrix[1][0], 1.0);
		// Year is the last column
		assert_eq!(matrix[0][FEATURE_COUNT - 1], 0.0);
		assert_eq!(matrix[1][FEATURE_COUNT - 1], 1.0);
	}

	#[test]
	fn constant_column_scales_to_zero() {
		let mut a = track("A", "X", 2000, 10.0);
		let mut b = track("B", "Y", 2000, 20.0);
		a.radio_score = 7.0;
		b.radio_score = 7.0;
		let (_, matrix) = FeatureNormalizer::build(&[a, b]);
		// radio_score (column 1) and year (column 9) are constant
		assert_eq!(matrix[0][1], 0.0);
		assert_eq!(matrix[1][1], 0.0);
		assert_eq!(matrix[0][9], 0.0);
		assert_eq!(matrix[1][9], 0.0);
	}

	#[test]
	fn midpoint_scales_to_half() {
		let tracks = vec![
			track("A", "X", 2000, 0.0),
			track("B", "Y", 2010, 50.0),
			track("C", "Z", 2020, 100.0),
		];
		let (_, matrix) = FeatureNormalizer::build(&tracks);
		assert!((matrix[1][0] - 0.5).abs() < 1e-12);
		assert!((matrix[1][9] - 0.5).abs() < 1e-12);
	}

	#[test]
	fn scale_reuses_learned_bounds() {
		let tracks = vec![track("A", "X", 2000, 0.0), track("B", "Y", 2010, 100.0)];
		let (bounds, _) = FeatureNormalizer::build(&tracks);
		let outside = track("C", "Z", 2030, 200.0).raw_features();
		let scaled = bounds.scale(&outside);
		assert_eq!(scaled[0], 1.0);
		assert_eq!(scaled[9], 1.0);
	}

	#[test]
	fn non_finite_metrics_read_as_zero() {
		let mut a = track("A", "X", 2000, 10.0);
		let mut b = track("B", "Y", 2010, 20.0);
		let mut c = track("C", "Z", 2020, 30.0);
		a.radio_score = f64::NAN;
		b.radio_score = 4.0;
		c.album_counts = f64::INFINITY;
		b.album_counts = 2.0;
		a.streaming_score = f64::NEG_INFINITY;
		let (bounds, matrix) = FeatureNormalizer::build(&[a, b, c]);
		for row in &matrix {
			for &v in row {
				assert!((0.0..=1.0).contains(&v), "component {v} escaped [0,1]");
			}
		}
		// NaN radio score is treated as 0, the column minimum
		assert_eq!(matrix[0][1], 0.0);
		assert_eq!(matrix[1][1], 1.0);
		// Infinite album count is treated as 0
		assert_eq!(bounds.max()[8], 2.0);
		assert_eq!(matrix[2][8], 0.0);
		assert_eq!(matrix[1][8], 1.0);
		// Negative infinity leaves the streaming column constant
		assert!(matrix.iter().all(|row| row[2] == 0.0));
	}

	#[test]
	fn empty_catalog_has_zero_bounds() {
		let (bounds, matrix) = FeatureNormalizer::build(&[]);
		assert!(matrix.is_empty());
		assert_eq!(bounds.min(), &[0.0; FEATURE_COUNT]);
		assert_eq!(bounds.columns().len(), FEATURE_COUNT);
	}
}
