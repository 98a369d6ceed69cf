use serde::{Deserialize, Serialize};

/// Number of numeric features extracted from every track.
pub const FEATURE_COUNT: usize = 10;

/// A track's scaled features, in [`FeatureColumn::ALL`] order.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// One catalog row. Identity is the row's position in the catalog, not its names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
	pub song: String,
	pub artist: String,
	pub year: i32,
	pub hot100_score: f64,
	pub radio_score: f64,
	pub streaming_score: f64,
	pub digital_score: f64,
	pub weeks_in_charts: f64,
	pub radio_weeks: f64,
	pub streaming_weeks: f64,
	pub digital_weeks: f64,
	pub album_counts: f64,
}

impl Track {
	/// Raw (unscaled) features in fixed column order. A non-finite metric
	/// counts as missing and reads as 0.
	pub fn raw_features(&self) -> FeatureVector {
		let mut raw = [0.0; FEATURE_COUNT];
		for (slot, column) in raw.iter_mut().zip(FeatureColumn::ALL) {
			let value = column.value(self);
			if value.is_finite() {
				*slot = value;
			}
		}
		raw
	}
}

/// The ten metric columns that make up a feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureColumn {
	Hot100Score,
	RadioScore,
	StreamingScore,
	DigitalScore,
	WeeksInCharts,
	RadioWeeks,
	StreamingWeeks,
	DigitalWeeks,
	AlbumCounts,
	Year,
}

impl FeatureColumn {
	pub const ALL: [FeatureColumn; FEATURE_COUNT] = [
		Self::Hot100Score,
		Self::RadioScore,
		Self::StreamingScore,
		Self::DigitalScore,
		Self::WeeksInCharts,
		Self::RadioWeeks,
		Self::StreamingWeeks,
		Self::DigitalWeeks,
		Self::AlbumCounts,
		Self::Year,
	];

	/// Column header used by the catalog dataset.
	pub fn header(self) -> &'static str {
		match self {
			Self::Hot100Score => "Hot100_Score",
			Self::RadioScore => "Radio_Score",
			Self::StreamingScore => "Streaming_Score",
			Self::DigitalScore => "Digital_Score",
			Self::WeeksInCharts => "Weeks in Charts",
			Self::RadioWeeks => "Radio_Weeks",
			Self::StreamingWeeks => "Streaming_Weeks",
			Self::DigitalWeeks => "Digital_Weeks",
			Self::AlbumCounts => "Album_Counts",
			Self::Year => "Year",
		}
	}

	pub fn value(self, track: &Track) -> f64 {
		match self {
			Self::Hot100Score => track.hot100_score,
			Self::RadioScore => track.radio_score,
			Self::StreamingScore => track.streaming_score,
			Self::DigitalScore => track.digital_score,
			Self::WeeksInCharts => track.weeks_in_charts,
			Self::RadioWeeks => track.radio_weeks,
			Self::StreamingWeeks => track.streaming_weeks,
			Self::DigitalWeeks => track.digital_weeks,
			Self::AlbumCounts => track.album_counts,
			Self::Year => track.year as f64,
		}
	}
}

/// A nearest-neighbor hit: catalog position plus cosine distance to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
	pub position: usize,
	pub distance: f64,
}

/// Which resolution path produced an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorSource {
	Song,
	Artist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
	pub position: usize,
	pub song: String,
	pub artist: String,
	pub source: AnchorSource,
	pub message: String,
}

/// Boundary projection of a recommended track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTrack {
	pub position: usize,
	pub song: String,
	pub artist: String,
	pub year: i32,
	pub hot100_score: f64,
	pub album_counts: f64,
}

impl RecommendedTrack {
	pub fn from_track(position: usize, track: &Track) -> Self {
		Self {
			position,
			song: track.song.clone(),
			artist: track.artist.clone(),
			year: track.year,
			hot100_score: track.hot100_score,
			album_counts: track.album_counts,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
	pub message: String,
	pub anchor: Anchor,
	pub fallback_used: bool,
	pub tracks: Vec<RecommendedTrack>,
}
