use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Catalog unavailable: {0}")]
	CatalogUnavailable(String),
	#[error("Catalog not loaded: call catalog/load first")]
	NotInitialized,
	#[error("Empty term: enter a song or artist name")]
	EmptyTerm,
	#[error("not found")]
	NotFound(String),
	#[error("Invalid neighbor count: {0} (must be at least 1)")]
	InvalidNeighborCount(usize),
	#[error("Position {position} out of range for catalog of {len} tracks")]
	PositionOutOfRange { position: usize, len: usize },
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl EngineError {
	pub fn code(&self) -> &str {
		match self {
			Self::CatalogUnavailable(_) => "CATALOG_UNAVAILABLE",
			Self::NotInitialized => "NOT_INITIALIZED",
			Self::EmptyTerm => "EMPTY_TERM",
			Self::NotFound(_) => "NOT_FOUND",
			Self::InvalidNeighborCount(_) => "INVALID_NEIGHBOR_COUNT",
			Self::PositionOutOfRange { .. } => "POSITION_OUT_OF_RANGE",
			Self::InvalidConfig(_) => "INVALID_CONFIG",
			Self::Io(_) => "IO_ERROR",
			Self::Serialization(_) => "SERIALIZATION_ERROR",
		}
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		serde_json::json!({
			"engineCode": self.code(),
			"message": self.to_string(),
		})
	}
}
