// ---------------------------------------------------------------------------
// CatalogStore: ordered, read-only track collection with name lookups
// ---------------------------------------------------------------------------
//
// Positions are the only identity. Lowercased song and artist keys are built
// once at construction so lookups never re-fold case per row.
// ---------------------------------------------------------------------------

use crate::error::EngineError;
use crate::types::Track;

pub struct CatalogStore {
	tracks: Vec<Track>,
	song_keys: Vec<String>,
	artist_keys: Vec<String>,
}

impl CatalogStore {
	/// Wrap a loaded track list. An empty catalog cannot serve queries.
	pub fn new(tracks: Vec<Track>) -> Result<Self, EngineError> {
		if tracks.is_empty() {
			return Err(EngineError::CatalogUnavailable(
				"catalog contains no tracks".into(),
			));
		}
		let song_keys = tracks.iter().map(|t| t.song.to_lowercase()).collect();
		let artist_keys = tracks.iter().map(|t| t.artist.to_lowercase()).collect();
		Ok(Self {
			tracks,
			song_keys,
			artist_keys,
		})
	}

	pub fn len(&self) -> usize {
		self.tracks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tracks.is_empty()
	}

	pub fn get(&self, position: usize) -> Option<&Track> {
		self.tracks.get(position)
	}

	pub fn track(&self, position: usize) -> Result<&Track, EngineError> {
		self.tracks.get(position).ok_or(EngineError::PositionOutOfRange {
			position,
			len: self.tracks.len(),
		})
	}

	pub fn tracks(&self) -> &[Track] {
		&self.tracks
	}

	// -- Name lookups (`needle` must already be lowercased) ------------------

	pub fn songs_containing(&self, needle: &str) -> Vec<usize> {
		positions_where(&self.song_keys, |key| key.contains(needle))
	}

	pub fn artists_containing(&self, needle: &str) -> Vec<usize> {
		positions_where(&self.artist_keys, |key| key.contains(needle))
	}

	/// Positions whose lowercased song equals `needle`, restricted to `candidates`.
	pub fn filter_song_equal(&self, candidates: &[usize], needle: &str) -> Vec<usize> {
		candidates
			.iter()
			.copied()
			.filter(|&p| self.song_keys[p] == needle)
			.collect()
	}

	/// Positions whose lowercased artist equals `needle`, restricted to `candidates`.
	pub fn filter_artist_equal(&self, candidates: &[usize], needle: &str) -> Vec<usize> {
		candidates
			.iter()
			.copied()
			.filter(|&p| self.artist_keys[p] == needle)
			.collect()
	}

	/// Tracks credited to exactly `artist` (case-sensitive), in catalog order.
	pub fn by_artist(&self, artist: &str) -> Vec<usize> {
		self.tracks
			.iter()
			.enumerate()
			.filter(|(_, t)| t.artist == artist)
			.map(|(p, _)| p)
			.collect()
	}
}

fn positions_where<F>(keys: &[String], pred: F) -> Vec<usize>
where
	F: Fn(&str) -> bool,
{
	keys.iter()
		.enumerate()
		.filter(|(_, key)| pred(key.as_str()))
		.map(|(p, _)| p)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{catalog, track};

	fn sample() -> CatalogStore {
		catalog(vec![
			track("Toxic", "Britney Spears", 2003, 95.0),
			track("Toxic Love", "Someone Else", 2010, 40.0),
			track("Bohemian Rhapsody", "Queen", 1975, 90.0),
			track("Under Pressure", "Queen & David Bowie", 1981, 80.0),
		])
	}

	#[test]
	fn empty_catalog_is_unavailable() {
		assert!(matches!(
			CatalogStore::new(Vec::new()),
			Err(EngineError::CatalogUnavailable(_))
		));
	}

	#[test]
	fn song_lookups_are_case_insensitive() {
		let store = sample();
		assert_eq!(store.songs_containing("toxic"), vec![0, 1]);
		assert_eq!(store.filter_song_equal(&[0, 1], "toxic"), vec![0]);
		assert!(store.filter_song_equal(&[0, 1], "tox").is_empty());
	}

	#[test]
	fn artist_lookups_match_anywhere() {
		let store = sample();
		assert_eq!(store.artists_containing("queen"), vec![2, 3]);
		assert_eq!(store.filter_artist_equal(&[2, 3], "queen"), vec![2]);
		assert_eq!(store.filter_song_equal(&[0, 1], "toxic love"), vec![1]);
	}

	#[test]
	fn by_artist_is_exact() {
		let store = sample();
		assert_eq!(store.by_artist("Queen"), vec![2]);
		assert!(store.by_artist("queen").is_empty());
	}

	#[test]
	fn track_out_of_range() {
		let store = sample();
		assert_eq!(store.track(2).unwrap().artist, "Queen");
		assert!(matches!(
			store.track(9),
			Err(EngineError::PositionOutOfRange { position: 9, len: 4 })
		));
		assert!(store.get(9).is_none());
	}
}
