use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info, warn};

use rs_markov_core::model::corpus::{list_corpora, train_file, CORPUS_EXTENSION};
use rs_markov_core::{Chain, ChainError};
use serde::Deserialize;

mod config;

use config::ServerConfig;

/// Query parameters for the `/v1/train` endpoint
#[derive(Deserialize)]
struct TrainParams {
	weight: Option<u64>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
}

/// The model and what it was built from.
///
/// The chain has no internal locking, so every access goes through the
/// `Mutex` wrapping this struct.
struct SharedData {
	chain: Chain<char>,
	corpora: Vec<String>,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one sequence and returns it as the response body.
/// Answers `409 Conflict` while the model cannot generate (nothing trained).
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.chain.generate_string() {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e @ ChainError::ImpossibleState { .. }) => {
			warn!("Generation failed: {}", e);
			HttpResponse::Conflict().body(e.to_string())
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/train`
///
/// Trains the model on the request body, one sequence per line, each
/// counted `weight` times (default 1).
#[put("/v1/train")]
async fn put_train(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<TrainParams>,
	body: String,
) -> impl Responder {
	let weight = query.weight.unwrap_or(1);
	if weight == 0 {
		return HttpResponse::BadRequest().body("Weight must be >= 1");
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let mut count = 0;
	for line in body.lines() {
		shared_data.chain.train_str_weighted(line, weight);
		count += 1;
	}

	info!("Trained {} sequences with weight {}", count, weight);
	HttpResponse::Ok().body(format!("Trained {} sequences", count))
}

#[get("/v1/corpora")]
async fn get_corpora(config: web::Data<ServerConfig>) -> impl Responder {
	match list_corpora(&config.data_dir) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			error!("Failed to list corpora: {}", e);
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpora.join("\n"))
}

/// A corpus name must be a plain file stem inside the data folder.
fn valid_corpus_name(name: &str) -> bool {
	!name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Trains a fresh chain on the named corpora of the data folder.
///
/// Blocking: each corpus is trained on worker threads and joined.
fn build_chain(config: &ServerConfig, names: &[String]) -> Result<Chain<char>, ChainError> {
	let mut chain = config.make_chain()?;
	for name in names {
		let path = config.data_dir.join(format!("{}.{}", name, CORPUS_EXTENSION));
		chain.merge_table(&train_file(config.order, &path)?)?;
	}
	Ok(chain)
}

/// HTTP PUT endpoint `/v1/load_corpora?names=a,b`
///
/// Replaces the model with one trained on the named corpora of the data
/// folder. Each corpus is trained in parallel before being merged.
/// The current model is kept if any name is invalid or fails to load.
#[put("/v1/load_corpora")]
async fn put_corpora(
	data: web::Data<Mutex<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<CorpusQuery>,
) -> impl Responder {
	let names: Vec<String> = match &query.names {
		Some(s) => s
			.split(',')
			.map(|s| s.trim())
			.filter(|s| !s.is_empty())
			.map(str::to_owned)
			.collect(),
		None => Vec::new(),
	};

	if names.is_empty() {
		return HttpResponse::BadRequest().body("Missing or empty corpus name");
	}
	if let Some(name) = names.iter().find(|name| !valid_corpus_name(name)) {
		return HttpResponse::BadRequest().body(format!("Invalid corpus name: {name}"));
	}

	// Build outside the lock; generation keeps serving the old model meanwhile
	let build_config = config.clone();
	let build_names = names.clone();
	let chain = match web::block(move || build_chain(&build_config, &build_names)).await {
		Ok(Ok(c)) => c,
		Ok(Err(e)) => {
			error!("Failed to load corpora {}: {}", names.join(", "), e);
			return HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}"));
		}
		Err(e) => return HttpResponse::InternalServerError().body(format!("Corpus worker failed: {e}")),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.chain = chain;
	shared_data.corpora = names;

	info!("Loaded corpora: {}", shared_data.corpora.join(", "));
	HttpResponse::Ok().body("Corpora loaded successfully")
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let table = shared_data.chain.table();
	HttpResponse::Ok().body(format!(
		"order: {}\nwindows: {}\nobservations: {}",
		table.order(),
		table.len(),
		table.observations()
	))
}

/// Main entry point for the server.
///
/// Creates an empty model, wraps it in a `Mutex` and starts an Actix-web
/// HTTP server. Host, port, order, seed and data folder come from the
/// environment (see `ServerConfig`); `RUST_LOG` controls logging.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env()
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	let chain = config
		.make_chain()
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

	let shared_model = web::Data::new(Mutex::new(SharedData { chain, corpora: Vec::new() }));
	let shared_config = web::Data::new(config.clone());

	info!("Serving order-{} model on {}:{}", config.order, config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.app_data(shared_config.clone())
			.service(get_generated)
			.service(put_train)
			.service(get_corpora)
			.service(get_loaded_corpora)
			.service(put_corpora)
			.service(get_stats)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
