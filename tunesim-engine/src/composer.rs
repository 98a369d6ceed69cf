// ---------------------------------------------------------------------------
// RecommendationComposer: artist-boost mixing of catalog and index results
// ---------------------------------------------------------------------------
//
// Pure functions, one per step:
//   same_artist_bucket  -> other songs by the anchor's artist, by hot100 desc
//   discovery_bucket    -> nearest neighbors by other artists, similarity order
//   merge_buckets       -> same-artist first, then discovery
//   apply_fallback      -> unfiltered nearest neighbors when the merge is short
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogStore;
use crate::error::EngineError;
use crate::index::SimilarityIndex;
use crate::types::Neighbor;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Bucket sizes for composition. Defaults: 3 same-artist + 7 discovery out of
/// a 50-neighbor pool, 10 results total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerConfig {
	pub max_results: usize,
	pub same_artist_limit: usize,
	pub discovery_limit: usize,
	pub neighbor_pool: usize,
}

impl Default for ComposerConfig {
	fn default() -> Self {
		Self {
			max_results: 10,
			same_artist_limit: 3,
			discovery_limit: 7,
			neighbor_pool: 50,
		}
	}
}

impl ComposerConfig {
	/// A full result needs at least `max_results` neighbors to fall back on.
	pub fn validate(&self) -> Result<(), EngineError> {
		if self.max_results == 0 {
			return Err(EngineError::InvalidConfig(
				"max_results must be at least 1".into(),
			));
		}
		if self.neighbor_pool < self.max_results {
			return Err(EngineError::InvalidConfig(format!(
				"neighbor_pool ({}) must be at least max_results ({})",
				self.neighbor_pool, self.max_results
			)));
		}
		Ok(())
	}
}

/// Outcome of composing one recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
	pub positions: Vec<usize>,
	pub fallback_used: bool,
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Other songs credited to exactly `anchor_artist`, highest hot100 first.
pub fn same_artist_bucket(
	catalog: &CatalogStore,
	anchor_position: usize,
	anchor_artist: &str,
	limit: usize,
) -> Vec<usize> {
	let anchor_song = match catalog.get(anchor_position) {
		Some(t) => t.song.as_str(),
		None => return Vec::new(),
	};

	let mut bucket: Vec<usize> = catalog
		.by_artist(anchor_artist)
		.into_iter()
		.filter(|&p| p != anchor_position)
		.filter(|&p| catalog.get(p).is_some_and(|t| t.song != anchor_song))
		.collect();

	// Stable sort keeps catalog order among equal scores
	bucket.sort_by(|&a, &b| {
		let sa = catalog.get(a).map_or(0.0, |t| t.hot100_score);
		let sb = catalog.get(b).map_or(0.0, |t| t.hot100_score);
		sb.total_cmp(&sa)
	});
	bucket.truncate(limit);
	bucket
}

/// Neighbors not credited to `anchor_artist`, in similarity order.
pub fn discovery_bucket(
	catalog: &CatalogStore,
	neighbors: &[Neighbor],
	anchor_artist: &str,
	limit: usize,
) -> Vec<usize> {
	neighbors
		.iter()
		.map(|n| n.position)
		.filter(|&p| catalog.get(p).is_some_and(|t| t.artist != anchor_artist))
		.take(limit)
		.collect()
}

/// Same-artist bucket followed by the discovery bucket.
///
/// No cross-bucket deduplication: the discovery filter already excludes the
/// anchor's artist, so the buckets are disjoint as long as that filter holds.
pub fn merge_buckets(same_artist: Vec<usize>, discovery: Vec<usize>) -> Vec<usize> {
	let mut merged = same_artist;
	merged.extend(discovery);
	merged
}

/// Replace a short merge with the first `max_results` neighbors, unfiltered.
pub fn apply_fallback(
	merged: Vec<usize>,
	neighbors: &[Neighbor],
	max_results: usize,
) -> Composition {
	if merged.len() >= max_results {
		let mut positions = merged;
		positions.truncate(max_results);
		return Composition {
			positions,
			fallback_used: false,
		};
	}
	Composition {
		positions: neighbors.iter().take(max_results).map(|n| n.position).collect(),
		fallback_used: true,
	}
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

pub struct RecommendationComposer<'a> {
	catalog: &'a CatalogStore,
	index: &'a SimilarityIndex,
	config: &'a ComposerConfig,
}

impl<'a> RecommendationComposer<'a> {
	pub fn new(
		catalog: &'a CatalogStore,
		index: &'a SimilarityIndex,
		config: &'a ComposerConfig,
	) -> Self {
		Self {
			catalog,
			index,
			config,
		}
	}

	pub fn compose(
		&self,
		anchor_position: usize,
		anchor_artist: &str,
	) -> Result<Composition, EngineError> {
		let same_artist = same_artist_bucket(
			self.catalog,
			anchor_position,
			anchor_artist,
			self.config.same_artist_limit,
		);

		let neighbors = self
			.index
			.query(anchor_position, self.config.neighbor_pool)?;
		let discovery = discovery_bucket(
			self.catalog,
			&neighbors,
			anchor_artist,
			self.config.discovery_limit,
		);

		tracing::debug!(
			anchor = anchor_position,
			same_artist = same_artist.len(),
			discovery = discovery.len(),
			pool = neighbors.len(),
			"Composed buckets"
		);

		let merged = merge_buckets(same_artist, discovery);
		let composition = apply_fallback(merged, &neighbors, self.config.max_results);
		if composition.fallback_used {
			tracing::debug!(
				anchor = anchor_position,
				results = composition.positions.len(),
				"Merged buckets short, using nearest neighbors"
			);
		}
		Ok(composition)
	}
}
