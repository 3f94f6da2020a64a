use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use rs_markov_core::{Chain, ChainError, RngSource};

/// Server settings, read from the environment.
///
/// | Variable       | Default     |
/// |----------------|-------------|
/// | `MARKOV_HOST`  | `127.0.0.1` |
/// | `MARKOV_PORT`  | `5000`      |
/// | `MARKOV_ORDER` | `3`         |
/// | `MARKOV_SEED`  | unset (OS)  |
/// | `MARKOV_DATA`  | `./data`    |
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	pub order: usize,
	/// Fixed seed for reproducible generation; `None` seeds from the OS.
	pub seed: Option<u64>,
	/// Folder holding `.dat` corpora.
	pub data_dir: PathBuf,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			order: 3,
			seed: None,
			data_dir: PathBuf::from("./data"),
		}
	}
}

impl ServerConfig {
	/// Loads the configuration from process environment variables.
	///
	/// # Errors
	/// Returns an error if a variable is set but cannot be parsed.
	pub fn from_env() -> Result<Self, String> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Same as `from_env`, with an explicit variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(host) = lookup("MARKOV_HOST") {
			config.host = host;
		}
		if let Some(port) = parse(&lookup, "MARKOV_PORT")? {
			config.port = port;
		}
		if let Some(order) = parse(&lookup, "MARKOV_ORDER")? {
			config.order = order;
		}
		config.seed = parse(&lookup, "MARKOV_SEED")?;
		if let Some(dir) = lookup("MARKOV_DATA") {
			config.data_dir = PathBuf::from(dir);
		}

		if config.order == 0 {
			return Err("MARKOV_ORDER must be >= 1".to_owned());
		}
		Ok(config)
	}

	/// Creates an untrained chain using the configured order and seed.
	pub fn make_chain(&self) -> Result<Chain<char>, ChainError> {
		match self.seed {
			Some(seed) => Chain::new(self.order, RngSource::seeded(seed)),
			None => Chain::new(self.order, RngSource::from_os()),
		}
	}
}

fn parse<F, T>(lookup: &F, key: &str) -> Result<Option<T>, String>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
{
	match lookup(key) {
		None => Ok(None),
		Some(raw) => raw
			.trim()
			.parse::<T>()
			.map(Some)
			.map_err(|_| format!("Invalid value for {}: {:?}", key, raw)),
	}
}
