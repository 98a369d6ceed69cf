// ---------------------------------------------------------------------------
// EngineServer: JSON-RPC dispatcher
// ---------------------------------------------------------------------------
//
// Routes incoming JSON-RPC 2.0 requests (NDJSON over stdin) to the similarity
// engine: a `run()` loop, a `dispatch()` match, a `with_engine` accessor, and
// free-standing handler functions per method.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead};

use serde::Deserialize;

use crate::composer::ComposerConfig;
use crate::engine::SimilarityEngine;
use crate::error::EngineError;
use crate::protocol::*;
use crate::resolver::NOT_FOUND_MESSAGE;
use crate::transport::NdjsonTransport;

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub struct EngineServer {
	transport: NdjsonTransport,
	engine: Option<SimilarityEngine>,
	config: ComposerConfig,
}

impl EngineServer {
	/// Create a server with no catalog; `catalog/load` must be called first.
	pub fn new(transport: NdjsonTransport, config: ComposerConfig) -> Self {
		Self {
			transport,
			engine: None,
			config,
		}
	}

	/// Create a server around an engine that was built before serving.
	pub fn from_engine(transport: NdjsonTransport, engine: SimilarityEngine) -> Self {
		let config = engine.config().clone();
		Self {
			transport,
			engine: Some(engine),
			config,
		}
	}

	/// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
	pub fn run(&mut self) -> Result<(), EngineError> {
		let stdin = io::stdin();
		let reader = stdin.lock();

		for line_result in reader.lines() {
			let line = line_result?;
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(&line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			self.dispatch(request);
		}

		Ok(())
	}

	// ── Dispatch ──────────────────────────────────────────────────────────

	fn dispatch(&mut self, req: JsonRpcRequest) {
		let id = req.id;
		let result = match req.method.as_str() {
			// -- Catalog -------------------------------------------------
			"catalog/load" => self.handle_load(req.params),
			"catalog/size" => self.with_engine(|e| {
				Ok(serde_json::json!({ "count": e.snapshot().catalog().len() }))
			}),
			"catalog/track" => self.with_engine(|e| handle_track(e, req.params)),
			"catalog/bounds" => self.with_engine(|e| {
				Ok(serde_json::json!({ "columns": e.snapshot().bounds().columns() }))
			}),

			// -- Engine --------------------------------------------------
			"engine/resolve" => self.with_engine(|e| handle_resolve(e, req.params)),
			"engine/recommend" => self.with_engine(|e| handle_recommend(e, req.params)),
			"engine/neighbors" => self.with_engine(|e| handle_neighbors(e, req.params)),

			// -- Unknown -------------------------------------------------
			_ => {
				self.transport.write_error(
					id,
					METHOD_NOT_FOUND,
					format!("Unknown method: {}", req.method),
					None,
				);
				return;
			}
		};

		match result {
			Ok(value) => self.transport.write_response(id, value),
			Err(e) => {
				let code = match e {
					EngineError::Serialization(_) => INVALID_PARAMS,
					EngineError::Io(_) => INTERNAL_ERROR,
					_ => ENGINE_ERROR,
				};
				self.transport
					.write_error(id, code, e.to_string(), Some(e.to_json_rpc_error()))
			}
		}
	}

	// ── Engine accessor ───────────────────────────────────────────────────

	fn with_engine<F>(&self, f: F) -> Result<serde_json::Value, EngineError>
	where
		F: FnOnce(&SimilarityEngine) -> Result<serde_json::Value, EngineError>,
	{
		match &self.engine {
			Some(e) => f(e),
			None => Err(EngineError::NotInitialized),
		}
	}

	// ── Load ──────────────────────────────────────────────────────────────

	fn handle_load(&mut self, params: serde_json::Value) -> Result<serde_json::Value, EngineError> {
		let p: LoadParams = parse_params(params)?;
		let count = match &self.engine {
			Some(engine) => engine.reload_csv(&p.path)?,
			None => {
				let engine = SimilarityEngine::from_csv(&p.path, self.config.clone())?;
				let count = engine.snapshot().catalog().len();
				self.engine = Some(engine);
				count
			}
		};
		Ok(serde_json::json!({ "tracks": count }))
	}
}

// ---------------------------------------------------------------------------
// Param types
// ---------------------------------------------------------------------------

fn parse_params<T: serde::de::DeserializeOwned>(
	params: serde_json::Value,
) -> Result<T, EngineError> {
	serde_json::from_value(params)
		.map_err(|e| EngineError::Serialization(format!("Invalid params: {}", e)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadParams {
	path: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermParams {
	term: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionParams {
	position: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NeighborsParams {
	position: usize,
	k: Option<usize>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn to_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, EngineError> {
	serde_json::to_value(value).map_err(|e| EngineError::Serialization(e.to_string()))
}

fn handle_track(
	engine: &SimilarityEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, EngineError> {
	let p: PositionParams = parse_params(params)?;
	let snapshot = engine.snapshot();
	let track = snapshot.catalog().track(p.position)?;
	Ok(serde_json::json!({ "position": p.position, "track": to_value(track)? }))
}

fn handle_resolve(
	engine: &SimilarityEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, EngineError> {
	let p: TermParams = parse_params(params)?;
	match engine.resolve(&p.term) {
		Ok(anchor) => Ok(serde_json::json!({ "found": true, "anchor": to_value(&anchor)? })),
		Err(EngineError::NotFound(_)) => {
			Ok(serde_json::json!({ "found": false, "message": NOT_FOUND_MESSAGE }))
		}
		Err(e) => Err(e),
	}
}

/// NotFound is an expected outcome and is returned as a successful, empty
/// result; EmptyTerm stays an error so callers can re-prompt.
fn handle_recommend(
	engine: &SimilarityEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, EngineError> {
	let p: TermParams = parse_params(params)?;
	match engine.recommend(&p.term) {
		Ok(recs) => {
			let mut value = to_value(&recs)?;
			value["found"] = serde_json::Value::Bool(true);
			Ok(value)
		}
		Err(EngineError::NotFound(_)) => Ok(serde_json::json!({
			"found": false,
			"message": NOT_FOUND_MESSAGE,
			"tracks": [],
		})),
		Err(e) => Err(e),
	}
}

fn handle_neighbors(
	engine: &SimilarityEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, EngineError> {
	let p: NeighborsParams = parse_params(params)?;
	let k = p.k.unwrap_or(engine.config().max_results);
	let neighbors = engine.snapshot().neighbors(p.position, k)?;
	Ok(serde_json::json!({ "neighbors": neighbors }))
}
