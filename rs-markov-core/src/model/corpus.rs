use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::table::TransitionTable;
use crate::error::ChainError;
use crate::io::{list_files, read_file};

/// Extension of corpus files: one training sequence per line.
pub const CORPUS_EXTENSION: &str = "dat";

/// Builds a character-level table from `lines`, one sequence per line.
///
/// # Behavior
/// - Splits the lines into chunks (based on CPU cores * factor).
/// - Spawns threads to build a partial table for each chunk.
/// - Merges the partial tables as they arrive.
///
/// Because counts are additive, the result is identical to training every
/// line in order on a single table.
///
/// # Errors
/// - `ChainError::InvalidOrder` if `order == 0`.
/// - `ChainError::Thread` if a worker panicked.
pub fn train_lines(order: usize, lines: &[String]) -> Result<TransitionTable<char>, ChainError> {
	let mut table = TransitionTable::new(order)?;
	if lines.is_empty() {
		return Ok(table);
	}

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = lines.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	let mut workers = Vec::with_capacity(chunks);
	for chunk in lines.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk: Vec<String> = chunk.to_vec();
		let mut partial = table.clone();

		workers.push(thread::spawn(move || {
			for line in &chunk {
				let sequence: Vec<char> = line.chars().collect();
				partial.train(&sequence, 1);
			}
			// The receiver lives until every worker is joined
			let _ = tx.send(partial);
		}));
	}
	drop(tx);

	for partial in rx.iter() {
		table.merge(&partial)?;
	}

	for worker in workers {
		worker
			.join()
			.map_err(|_| ChainError::Thread("corpus worker panicked".to_owned()))?;
	}

	debug!("Built order-{} table from {} lines ({} windows)", order, lines.len(), table.len());
	Ok(table)
}

/// Reads a corpus file and trains a table on it, one sequence per line.
///
/// Empty lines are kept: each one registers an empty sequence.
pub fn train_file<P: AsRef<Path>>(order: usize, path: P) -> Result<TransitionTable<char>, ChainError> {
	let lines = read_file(&path)?;
	info!("Training on {} ({} lines)", path.as_ref().display(), lines.len());
	train_lines(order, &lines)
}

/// Lists the corpus names (file stems of `.dat` files) in `dir`.
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, ChainError> {
	Ok(list_files(dir, CORPUS_EXTENSION)?)
}
