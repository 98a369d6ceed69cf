// ---------------------------------------------------------------------------
// QueryResolver: free-text term to anchor track
// ---------------------------------------------------------------------------
//
// Resolution pipeline:
// 1. Trim + lowercase (blank input is `EmptyTerm`)
// 2. Song substring match, narrowed to exact title matches when any exist
// 3. Artist substring match, narrowed to exact artist matches when any exist
// 4. `NotFound`
// ---------------------------------------------------------------------------

use std::cmp::Ordering;

use crate::catalog::CatalogStore;
use crate::error::EngineError;
use crate::types::{Anchor, AnchorSource, Track};

pub const NOT_FOUND_MESSAGE: &str = "not found";

pub struct QueryResolver;

impl QueryResolver {
	pub fn resolve(term: &str, catalog: &CatalogStore) -> Result<Anchor, EngineError> {
		let needle = term.trim().to_lowercase();
		if needle.is_empty() {
			return Err(EngineError::EmptyTerm);
		}

		let songs = catalog.songs_containing(&needle);
		if !songs.is_empty() {
			let candidates = narrow_to_exact(songs, |c| catalog.filter_song_equal(c, &needle));
			if let Some(position) = pick_best(catalog, &candidates, by_song_rank) {
				let track = catalog.track(position)?;
				tracing::debug!(term = %needle, position, candidates = candidates.len(), "Resolved by song");
				return Ok(anchor(position, track, AnchorSource::Song));
			}
		}

		let artists = catalog.artists_containing(&needle);
		if !artists.is_empty() {
			let candidates = narrow_to_exact(artists, |c| catalog.filter_artist_equal(c, &needle));
			if let Some(position) = pick_best(catalog, &candidates, by_artist_rank) {
				let track = catalog.track(position)?;
				tracing::debug!(term = %needle, position, candidates = candidates.len(), "Resolved by artist");
				return Ok(anchor(position, track, AnchorSource::Artist));
			}
		}

		tracing::debug!(term = %needle, "No song or artist matched");
		Err(EngineError::NotFound(needle))
	}
}

/// Provenance message shown alongside the results.
pub fn provenance_message(source: AnchorSource, song: &str) -> String {
	match source {
		AnchorSource::Song => format!("based on song {}", song),
		AnchorSource::Artist => format!("artist found, using {} as reference", song),
	}
}

fn anchor(position: usize, track: &Track, source: AnchorSource) -> Anchor {
	Anchor {
		position,
		song: track.song.clone(),
		artist: track.artist.clone(),
		source,
		message: provenance_message(source, &track.song),
	}
}

/// Keep only exact matches when at least one exists; otherwise keep all.
fn narrow_to_exact<F>(substring_matches: Vec<usize>, exact: F) -> Vec<usize>
where
	F: FnOnce(&[usize]) -> Vec<usize>,
{
	let exact_matches = exact(&substring_matches);
	if exact_matches.is_empty() {
		substring_matches
	} else {
		exact_matches
	}
}

/// Best candidate under `rank`; candidates arrive in ascending position order,
/// so `min_by` keeps the lowest position among equals.
fn pick_best<F>(catalog: &CatalogStore, candidates: &[usize], rank: F) -> Option<usize>
where
	F: Fn(&Track, &Track) -> Ordering,
{
	candidates
		.iter()
		.copied()
		.filter_map(|p| catalog.get(p).map(|t| (p, t)))
		.min_by(|(pa, a), (pb, b)| rank(*a, *b).then_with(|| pa.cmp(pb)))
		.map(|(p, _)| p)
}

/// Higher hot100 first.
fn by_song_rank(a: &Track, b: &Track) -> Ordering {
	b.hot100_score.total_cmp(&a.hot100_score)
}

/// Higher hot100 first, then more weeks in charts.
fn by_artist_rank(a: &Track, b: &Track) -> Ordering {
	b.hot100_score
		.total_cmp(&a.hot100_score)
		.then_with(|| b.weeks_in_charts.total_cmp(&a.weeks_in_charts))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{catalog, track};

	fn sample() -> CatalogStore {
		let mut radio_ga_ga = track("Radio Ga Ga", "Queen", 1984, 70.0);
		radio_ga_ga.weeks_in_charts = 10.0;
		let mut killer_queen = track("Killer Queen", "Queen", 1974, 70.0);
		killer_queen.weeks_in_charts = 14.0;
		catalog(vec![
			track("Toxic Love", "Someone Else", 2010, 99.0),
			track("Toxic", "Britney Spears", 2003, 95.0),
			track("Toxic", "A Cover Band", 2012, 12.0),
			radio_ga_ga,
			killer_queen,
			track("Under Pressure", "Queen & David Bowie", 1981, 80.0),
			track("Hello", "Adele", 2015, 90.0),
			track("Rolling In The Deep", "Adele", 2011, 90.0),
		])
	}

	#[test]
	fn exact_song_match_beats_higher_scoring_substring() {
		let store = sample();
		let anchor = QueryResolver::resolve("toxic", &store).unwrap();
		assert_eq!(anchor.position, 1);
		assert_eq!(anchor.source, AnchorSource::Song);
		assert_eq!(anchor.message, "based on song Toxic");
	}

	#[test]
	fn substring_song_match_without_exact() {
		let store = sample();
		let anchor = QueryResolver::resolve("  TOXIC L ", &store).unwrap();
		assert_eq!(anchor.position, 0);
		assert_eq!(anchor.song, "Toxic Love");
	}

	#[test]
	fn song_ties_break_by_position() {
		let store = catalog(vec![
			track("Dup", "X", 2000, 50.0),
			track("Dup", "Y", 2001, 50.0),
		]);
		assert_eq!(QueryResolver::resolve("dup", &store).unwrap().position, 0);
	}

	#[test]
	fn exact_artist_match_narrows_candidates() {
		let store = sample();
		// "queen" also appears in "Killer Queen" (song) so the song path wins.
		let anchor = QueryResolver::resolve("queen", &store).unwrap();
		assert_eq!(anchor.source, AnchorSource::Song);
		assert_eq!(anchor.position, 4);

		// "queen & david" only matches the artist column
		let anchor = QueryResolver::resolve("queen & david bowie", &store).unwrap();
		assert_eq!(anchor.source, AnchorSource::Artist);
		assert_eq!(anchor.position, 5);
		assert_eq!(anchor.message, "artist found, using Under Pressure as reference");
	}

	#[test]
	fn artist_substring_prefers_exact_then_weeks() {
		let store = catalog(vec![
			track("Under Pressure", "Queen & David Bowie", 1981, 99.0),
			{
				let mut t = track("Radio Ga Ga", "Queen", 1984, 70.0);
				t.weeks_in_charts = 10.0;
				t
			},
			{
				let mut t = track("We Will Rock You", "Queen", 1977, 70.0);
				t.weeks_in_charts = 14.0;
				t
			},
		]);
		// exact "queen" narrows away the higher-scoring duet
		let anchor = QueryResolver::resolve("Queen", &store).unwrap();
		assert_eq!(anchor.position, 2);
		// "quee" has no exact match so every Queen credit competes
		let anchor = QueryResolver::resolve("quee", &store).unwrap();
		assert_eq!(anchor.position, 0);
	}

	#[test]
	fn artist_full_tie_breaks_by_position() {
		let store = sample();
		let anchor = QueryResolver::resolve("adele", &store).unwrap();
		assert_eq!(anchor.position, 6);
		assert_eq!(anchor.source, AnchorSource::Artist);
	}

	#[test]
	fn unknown_term_is_not_found() {
		let store = sample();
		match QueryResolver::resolve("zzz-nonexistent-999", &store) {
			Err(EngineError::NotFound(term)) => assert_eq!(term, "zzz-nonexistent-999"),
			other => panic!("expected NotFound, got {other:?}"),
		}
	}

	#[test]
	fn blank_term_is_empty_term() {
		let store = sample();
		assert!(matches!(QueryResolver::resolve("", &store), Err(EngineError::EmptyTerm)));
		assert!(matches!(QueryResolver::resolve("  \t ", &store), Err(EngineError::EmptyTerm)));
	}

	#[test]
	fn resolution_is_idempotent() {
		let store = sample();
		for term in ["toxic", "queen", "adele", "ga"] {
			let first = QueryResolver::resolve(term, &store).unwrap();
			let second = QueryResolver::resolve(term, &store).unwrap();
			assert_eq!(first, second);
		}
	}
}
