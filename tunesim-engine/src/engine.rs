// ---------------------------------------------------------------------------
// Engine: owned build artifact + snapshot-swapping query handle
// ---------------------------------------------------------------------------
//
// `EngineSnapshot` is built once from a catalog (normalize, index) and never
// mutated. `SimilarityEngine` publishes the current snapshot through an
// `ArcSwap`: every query loads one snapshot and uses it start to finish, and
// a rebuild is published with a single atomic store. Rebuilds are serialized
// by `build_lock` so two refreshes cannot race each other.
// ---------------------------------------------------------------------------

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use arc_swap::ArcSwap;

use crate::catalog::CatalogStore;
use crate::composer::{ComposerConfig, RecommendationComposer};
use crate::error::EngineError;
use crate::features::{FeatureBounds, FeatureNormalizer};
use crate::index::SimilarityIndex;
use crate::loader;
use crate::resolver::QueryResolver;
use crate::types::{Anchor, Neighbor, RecommendedTrack, Recommendations, Track};

// ---------------------------------------------------------------------------
// EngineSnapshot
// ---------------------------------------------------------------------------

pub struct EngineSnapshot {
	catalog: CatalogStore,
	bounds: FeatureBounds,
	index: SimilarityIndex,
}

impl EngineSnapshot {
	pub fn build(tracks: Vec<Track>) -> Result<Self, EngineError> {
		let started = Instant::now();
		let catalog = CatalogStore::new(tracks)?;
		let (bounds, matrix) = FeatureNormalizer::build(catalog.tracks());
		let index = SimilarityIndex::build(matrix);
		tracing::info!(
			tracks = catalog.len(),
			elapsed_ms = started.elapsed().as_millis() as u64,
			"Similarity index built"
		);
		Ok(Self {
			catalog,
			bounds,
			index,
		})
	}

	pub fn catalog(&self) -> &CatalogStore {
		&self.catalog
	}

	pub fn bounds(&self) -> &FeatureBounds {
		&self.bounds
	}

	pub fn index(&self) -> &SimilarityIndex {
		&self.index
	}

	pub fn resolve(&self, term: &str) -> Result<Anchor, EngineError> {
		QueryResolver::resolve(term, &self.catalog)
	}

	pub fn neighbors(&self, position: usize, k: usize) -> Result<Vec<Neighbor>, EngineError> {
		self.index.query(position, k)
	}

	pub fn recommend(
		&self,
		term: &str,
		config: &ComposerConfig,
	) -> Result<Recommendations, EngineError> {
		let anchor = self.resolve(term)?;
		let composition = RecommendationComposer::new(&self.catalog, &self.index, config)
			.compose(anchor.position, &anchor.artist)?;

		let tracks = composition
			.positions
			.iter()
			.map(|&p| {
				self.catalog
					.track(p)
					.map(|t| RecommendedTrack::from_track(p, t))
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Recommendations {
			message: anchor.message.clone(),
			anchor,
			fallback_used: composition.fallback_used,
			tracks,
		})
	}
}

// ---------------------------------------------------------------------------
// SimilarityEngine
// ---------------------------------------------------------------------------

pub struct SimilarityEngine {
	snapshot: ArcSwap<EngineSnapshot>,
	build_lock: Mutex<()>,
	config: ComposerConfig,
}

impl SimilarityEngine {
	pub fn new(snapshot: EngineSnapshot, config: ComposerConfig) -> Self {
		Self {
			snapshot: ArcSwap::from_pointee(snapshot),
			build_lock: Mutex::new(()),
			config,
		}
	}

	pub fn from_tracks(tracks: Vec<Track>, config: ComposerConfig) -> Result<Self, EngineError> {
		config.validate()?;
		Ok(Self::new(EngineSnapshot::build(tracks)?, config))
	}

	pub fn from_csv<P: AsRef<Path>>(path: P, config: ComposerConfig) -> Result<Self, EngineError> {
		Self::from_tracks(loader::load_csv(path)?, config)
	}

	pub fn config(&self) -> &ComposerConfig {
		&self.config
	}

	/// The snapshot current at the time of the call.
	pub fn snapshot(&self) -> Arc<EngineSnapshot> {
		self.snapshot.load_full()
	}

	pub fn recommend(&self, term: &str) -> Result<Recommendations, EngineError> {
		self.snapshot.load().recommend(term, &self.config)
	}

	pub fn resolve(&self, term: &str) -> Result<Anchor, EngineError> {
		self.snapshot.load().resolve(term)
	}

	/// Rebuild from `tracks` and publish the result. On failure the current
	/// snapshot stays in place.
	pub fn replace_catalog(&self, tracks: Vec<Track>) -> Result<usize, EngineError> {
		let _guard = self
			.build_lock
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		let snapshot = EngineSnapshot::build(tracks)?;
		let count = snapshot.catalog().len();
		self.snapshot.store(Arc::new(snapshot));
		tracing::info!(tracks = count, "Catalog snapshot swapped");
		Ok(count)
	}

	pub fn reload_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize, EngineError> {
		self.replace_catalog(loader::load_csv(path)?)
	}
}
