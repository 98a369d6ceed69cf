use clap::Parser;
use tunesim_engine::config::CliArgs;
use tunesim_engine::engine::SimilarityEngine;
use tunesim_engine::server::EngineServer;
use tunesim_engine::transport::NdjsonTransport;

fn main() {
	let args = CliArgs::parse();

	// stdout carries the protocol; logs go to stderr
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	let config = match args.composer_config() {
		Ok(config) => config,
		Err(e) => {
			tracing::error!("Cannot start: {}", e);
			std::process::exit(1);
		}
	};
	let transport = NdjsonTransport::new();

	let mut server = match &args.catalog {
		Some(path) => match SimilarityEngine::from_csv(path, config) {
			Ok(engine) => EngineServer::from_engine(transport, engine),
			Err(e) => {
				tracing::error!(catalog = %path, "Cannot start: {}", e);
				std::process::exit(1);
			}
		},
		None => EngineServer::new(transport, config),
	};

	tracing::info!("tunesim-engine ready");

	if let Err(e) = server.run() {
		tracing::error!("Server error: {}", e);
		std::process::exit(1);
	}
}
