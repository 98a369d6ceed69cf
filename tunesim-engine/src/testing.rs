// Shared fixtures for unit tests.

use crate::catalog::CatalogStore;
use crate::types::Track;

pub fn track(song: &str, artist: &str, year: i32, hot100_score: f64) -> Track {
	Track {
		song: song.to_string(),
		artist: artist.to_string(),
		year,
		hot100_score,
		radio_score: 0.0,
		radio_weeks: 0.0,
		streaming_score: 0.0,
		digital_score: 0.0,
		weeks_in_charts: 0.0,
		streaming_weeks: 0.0,
		digital_weeks: 0.0,
		album_counts: 0.0,
	}
}

/// Track whose nine metric columns are all set from `metrics`, in feature order.
pub fn track_with(song: &str, artist: &str, year: i32, metrics: [f64; 9]) -> Track {
	Track {
		song: song.to_string(),
		artist: artist.to_string(),
		year,
		hot100_score: metrics[0],
		radio_score: metrics[1],
		streaming_score: metrics[2],
		digital_score: metrics[3],
		weeks_in_charts: metrics[4],
		radio_weeks: metrics[5],
		streaming_weeks: metrics[6],
		digital_weeks: metrics[7],
		album_counts: metrics[8],
	}
}

pub fn catalog(tracks: Vec<Track>) -> CatalogStore {
	CatalogStore::new(tracks).expect("fixture catalog must be non-empty")
}

/// The end-to-end fixture: "Toxic" plus 30 other tracks, two of them by the
/// same artist with metrics almost identical to Toxic's.
pub fn pop_catalog() -> Vec<Track> {
	let mut tracks = vec![
		track_with("Toxic", "Britney Spears", 2003, [95.0, 80.0, 60.0, 70.0, 25.0, 20.0, 10.0, 12.0, 4.0]),
		track_with("Womanizer", "Britney Spears", 2008, [90.0, 78.0, 58.0, 69.0, 24.0, 19.0, 10.0, 12.0, 4.0]),
		track_with("Circus", "Britney Spears", 2008, [88.0, 79.0, 61.0, 68.0, 25.0, 20.0, 11.0, 11.0, 4.0]),
	];
	for i in 0..28 {
		let f = i as f64;
		tracks.push(track_with(
			&format!("Song {i}"),
			&format!("Artist {i}"),
			1970 + i,
			[
				5.0 + f * 3.0,
				90.0 - f * 3.0,
				(f * 7.0) % 50.0,
				10.0 + (f * 11.0) % 60.0,
				1.0 + f,
				40.0 - f,
				(f * 5.0) % 30.0,
				(f * 3.0) % 20.0,
				(i % 6) as f64,
			],
		));
	}
	tracks
}
