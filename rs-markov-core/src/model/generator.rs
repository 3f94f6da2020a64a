use std::fmt::Debug;

use log::trace;

use super::random::RandomSource;
use super::table::TransitionTable;
use super::token::Token;
use crate::error::ChainError;

/// Generates one sequence by walking `table` from the start window.
///
/// At each step the distribution of the current window is looked up, an
/// offset is drawn as `rng.next_uint() % total`, and the successor owning
/// that offset (in ascending token order) is taken. A symbol is appended and
/// shifted into the window; the terminator ends the sequence.
///
/// # Errors
/// Returns `ChainError::ImpossibleState` if the current window is not in the
/// table. On an untrained table this happens on the very first lookup.
/// A window whose distribution has no positive counter fails the same way.
///
/// # Notes
/// - The table is only read.
/// - There is no length cap: callers needing bounded output must stop the
///   walk themselves.
/// - `% total` has a slight bias for totals that aren't powers of two; this
///   is not a cryptographic sampler.
pub fn generate<T>(table: &TransitionTable<T>, rng: &mut dyn RandomSource) -> Result<Vec<T>, ChainError>
where
	T: Ord + Clone + Debug,
{
	let mut output = Vec::new();
	let mut memory = table.start();

	loop {
		let distribution = match table.get(&memory) {
			Some(d) => d,
			None => {
				return Err(ChainError::ImpossibleState {
					window: memory.describe(),
					emitted: output.len(),
				});
			}
		};

		// Trained distributions always hold a positive counter
		let total = distribution.total();
		let sampled = rng
			.next_uint()
			.checked_rem(total)
			.and_then(|r| distribution.sample(r).map(|token| (r, token)));

		match sampled {
			Some((r, Token::Symbol(symbol))) => {
				trace!("{} -> {:?} ({}/{})", memory.describe(), symbol, r, total);
				output.push(symbol.clone());
				memory = memory.push(symbol.clone());
			}
			Some((_, Token::Terminator)) => {
				trace!("{} -> end after {} symbols", memory.describe(), output.len());
				return Ok(output);
			}
			None => {
				return Err(ChainError::ImpossibleState {
					window: memory.describe(),
					emitted: output.len(),
				});
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::distribution::Distribution;
	use crate::model::memory::Memory;

	#[test]
	fn untrained_table_fails_immediately() {
		let table = TransitionTable::<char>::new(2).unwrap();
		let mut calls = 0;
		let mut rng = || {
			calls += 1;
			0u64
		};

		match generate(&table, &mut rng) {
			Err(ChainError::ImpossibleState { window, emitted }) => {
				assert_eq!(window, "[∅,∅]");
				assert_eq!(emitted, 0);
			}
			other => panic!("unexpected result: {:?}", other),
		}
		assert_eq!(calls, 0);
	}

	#[test]
	fn empty_distribution_is_impossible_state() {
		let mut table: TransitionTable<char> = TransitionTable::new(1).unwrap();
		table.train(&['a'], 1);
		table.insert_distribution(Memory::empty(1).push('a'), Distribution::new());

		match generate(&table, &mut || 0u64) {
			Err(ChainError::ImpossibleState { window, emitted }) => {
				assert_eq!(window, "['a']");
				assert_eq!(emitted, 1);
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn offsets_follow_ascending_order() {
		// [∅] -> {a:1, b:1}, [a] -> {∅:1}, [b] -> {∅:1}
		let mut table: TransitionTable<char> = TransitionTable::new(1).unwrap();
		table.train(&['b'], 1);
		table.train(&['a'], 1);

		assert_eq!(generate(&table, &mut || 0u64).unwrap(), vec!['a']);
		assert_eq!(generate(&table, &mut || 1u64).unwrap(), vec!['b']);
		assert_eq!(generate(&table, &mut || 2u64).unwrap(), vec!['a']);
	}
}
