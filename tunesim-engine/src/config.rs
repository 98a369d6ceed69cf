use clap::Parser;

use crate::composer::ComposerConfig;
use crate::error::EngineError;

#[derive(Parser, Debug)]
#[command(name = "tunesim-engine", about = "Song similarity engine over JSON-RPC 2.0 / NDJSON stdio")]
pub struct CliArgs {
	/// Catalog CSV to load and index before serving. Without it, the catalog
	/// must be supplied with `catalog/load`.
	#[arg(long, env = "TUNESIM_CATALOG")]
	pub catalog: Option<String>,

	/// Maximum tracks per recommendation
	#[arg(long, default_value = "10")]
	pub max_results: usize,

	/// Tracks reserved for the anchor's own artist
	#[arg(long, default_value = "3")]
	pub same_artist_limit: usize,

	/// Tracks drawn from similar tracks by other artists
	#[arg(long, default_value = "7")]
	pub discovery_limit: usize,

	/// Nearest neighbors considered for the discovery bucket
	#[arg(long, default_value = "50")]
	pub neighbor_pool: usize,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "info", env = "TUNESIM_LOG_LEVEL")]
	pub log_level: String,
}

impl CliArgs {
	/// Fold the composition knobs into a validated `ComposerConfig`.
	pub fn composer_config(&self) -> Result<ComposerConfig, EngineError> {
		let config = ComposerConfig {
			max_results: self.max_results,
			same_artist_limit: self.same_artist_limit,
			discovery_limit: self.discovery_limit,
			neighbor_pool: self.neighbor_pool,
		};
		config.validate()?;
		Ok(config)
	}
}
