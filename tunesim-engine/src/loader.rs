// ---------------------------------------------------------------------------
// Catalog ingestion: CSV with a header row
// ---------------------------------------------------------------------------
//
// Required headers are resolved to column indices once, before any row is
// read. Missing, blank, unparseable or non-finite numeric cells become 0.
// Any failure to produce a usable catalog is `CatalogUnavailable`.
// ---------------------------------------------------------------------------

use std::io::Read;
use std::path::Path;

use crate::error::EngineError;
use crate::types::{FeatureColumn, Track};

pub const SONG_HEADER: &str = "Song";
pub const ARTIST_HEADER: &str = "Artist";

/// Column index of every required field.
struct ColumnMap {
	song: usize,
	artist: usize,
	metrics: [usize; 10],
}

impl ColumnMap {
	fn from_headers(headers: &csv::StringRecord) -> Result<Self, EngineError> {
		let find = |name: &str| -> Option<usize> { headers.iter().position(|h| h.trim() == name) };

		let mut missing: Vec<&str> = Vec::new();
		let song = find(SONG_HEADER);
		if song.is_none() {
			missing.push(SONG_HEADER);
		}
		let artist = find(ARTIST_HEADER);
		if artist.is_none() {
			missing.push(ARTIST_HEADER);
		}

		let mut metrics = [0usize; 10];
		for (slot, column) in metrics.iter_mut().zip(FeatureColumn::ALL) {
			match find(column.header()) {
				Some(i) => *slot = i,
				None => missing.push(column.header()),
			}
		}

		match (song, artist) {
			(Some(song), Some(artist)) if missing.is_empty() => Ok(Self {
				song,
				artist,
				metrics,
			}),
			_ => Err(EngineError::CatalogUnavailable(format!(
				"missing required columns: {}",
				missing.join(", ")
			))),
		}
	}
}

/// Load a catalog from a CSV file on disk.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Track>, EngineError> {
	let path = path.as_ref();
	let reader = csv::ReaderBuilder::new()
		.flexible(true)
		.from_path(path)
		.map_err(|e| {
			EngineError::CatalogUnavailable(format!("cannot open {}: {}", path.display(), e))
		})?;
	let tracks = read_tracks(reader)?;
	tracing::info!(path = %path.display(), tracks = tracks.len(), "Catalog loaded");
	Ok(tracks)
}

/// Load a catalog from any CSV byte stream.
pub fn load_csv_reader<R: Read>(input: R) -> Result<Vec<Track>, EngineError> {
	let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
	read_tracks(reader)
}

fn read_tracks<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Track>, EngineError> {
	let headers = reader
		.headers()
		.map_err(|e| EngineError::CatalogUnavailable(format!("unreadable header row: {}", e)))?
		.clone();
	let columns = ColumnMap::from_headers(&headers)?;

	let mut tracks = Vec::new();
	for (row, record) in reader.records().enumerate() {
		let record = record.map_err(|e| {
			EngineError::CatalogUnavailable(format!("unreadable row {}: {}", row + 1, e))
		})?;
		tracks.push(parse_track(&record, &columns, row + 1));
	}

	if tracks.is_empty() {
		return Err(EngineError::CatalogUnavailable(
			"catalog contains no tracks".into(),
		));
	}
	Ok(tracks)
}

fn parse_track(record: &csv::StringRecord, columns: &ColumnMap, row: usize) -> Track {
	let text = |i: usize| record.get(i).map(str::trim).unwrap_or_default().to_string();

	let mut values = [0.0f64; 10];
	for ((slot, &i), column) in values.iter_mut().zip(&columns.metrics).zip(FeatureColumn::ALL) {
		*slot = parse_metric(record.get(i), column, row);
	}

	Track {
		song: text(columns.song),
		artist: text(columns.artist),
		hot100_score: values[0],
		radio_score: values[1],
		streaming_score: values[2],
		digital_score: values[3],
		weeks_in_charts: values[4],
		radio_weeks: values[5],
		streaming_weeks: values[6],
		digital_weeks: values[7],
		album_counts: values[8],
		year: parse_year(values[9], row),
	}
}

/// Whole years only. `2003.0` is accepted; fractional or out-of-range values
/// are treated like unparseable cells.
fn parse_year(value: f64, row: usize) -> i32 {
	if value.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&value) {
		return value as i32;
	}
	tracing::warn!(row, column = FeatureColumn::Year.header(), value, "Invalid year, using 0");
	0
}

fn parse_metric(cell: Option<&str>, column: FeatureColumn, row: usize) -> f64 {
	let raw = match cell.map(str::trim) {
		Some(s) if !s.is_empty() => s,
		_ => return 0.0,
	};
	match raw.parse::<f64>() {
		Ok(v) if v.is_finite() => v,
		Ok(_) => 0.0,
		Err(_) => {
			tracing::warn!(row, column = column.header(), value = raw, "Unparseable metric, using 0");
			0.0
		}
	}
}
