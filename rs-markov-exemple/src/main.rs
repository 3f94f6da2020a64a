use std::env;

use log::info;
use rs_markov_core::model::corpus::train_file;
use rs_markov_core::{Chain, RngSource};

/// Used when no corpus file is given on the command line.
const FROMAGES: [&str; 8] = [
	"camembert", "comte", "cantal", "beaufort", "brie", "morbier", "mimolette", "munster",
];

// Usage: rs-markov-exemple [order] [corpus.dat]
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let mut args = env::args().skip(1);

	// Number of symbols of history per state (higher = closer to the input)
	let order: usize = match args.next() {
		Some(s) => s.parse()?,
		None => 2,
	};

	// Fixed seed: every run prints the same words
	let mut chain: Chain<char> = Chain::new(order, RngSource::seeded(2024))?;

	match args.next() {
		Some(path) => {
			// Corpus files are trained in parallel, one word per line
			let table = train_file(order, &path)?;
			chain.merge_table(&table)?;
		}
		None => {
			chain.extend(FROMAGES);
			// "brie" counts as if it had been seen ten times
			chain.train_str_weighted("brie", 10);
		}
	}
	info!("Model ready: {} windows", chain.table().len());

	// Generating before training fails instead of looping forever
	let mut untrained: Chain<char> = Chain::new(order, RngSource::from_os())?;
	match untrained.generate_string() {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("Untrained model: {}", e),
	}

	for i in 0..10 {
		println!("Generated word {}: {}", i + 1, chain.generate_string()?);
	}

	Ok(())
}
