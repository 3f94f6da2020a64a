use std::collections::BTreeMap;

use super::token::Token;

/// Successor counts observed after one window of history.
///
/// Conceptually, this is the set of outgoing edges of a node in the Markov
/// chain, each edge weighted by how many times it was observed. The
/// terminator is an edge like any other and means "the sequence ended here".
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Select a successor from a uniformly drawn offset
/// - Merge with the distribution of the same window from another table
///
/// ## Invariants
/// - Counters only ever grow
/// - Entries are kept in ascending token order, so sampling is
///   reproducible for a given random offset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution<T> {
	/// Example: { ∅ => 1, 'a' => 42, 'e' => 3 }
	counts: BTreeMap<Token<T>, u64>,
}

impl<T> Default for Distribution<T> {
	fn default() -> Self {
		Self { counts: BTreeMap::new() }
	}
}

impl<T: Ord + Clone> Distribution<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `weight` occurrences of `token`.
	///
	/// - If the entry already exists, its count is increased.
	/// - Otherwise, it is created at 0 first.
	pub fn record(&mut self, token: Token<T>, weight: u64) {
		let count = self.counts.entry(token).or_insert(0);
		*count = count.saturating_add(weight);
	}

	/// Number of times `token` was observed.
	pub fn count(&self, token: &Token<T>) -> u64 {
		self.counts.get(token).copied().unwrap_or(0)
	}

	/// Sum of every counter.
	pub fn total(&self) -> u64 {
		self.counts.values().fold(0u64, |acc, c| acc.saturating_add(*c))
	}

	/// Picks the successor that owns offset `r` of the cumulative counts.
	///
	/// Entries are visited in ascending order; the first entry whose count
	/// exceeds what is left of `r` is returned, otherwise its count is
	/// subtracted and the scan goes on.
	///
	/// Returns `None` if `r >= total()` (always the case when empty).
	pub fn sample(&self, mut r: u64) -> Option<&Token<T>> {
		for (token, count) in &self.counts {
			if r < *count {
				return Some(token);
			}
			r -= count;
		}
		None
	}

	/// Adds every count of `other` into this distribution.
	pub fn merge(&mut self, other: &Self) {
		for (token, count) in &other.counts {
			self.record(token.clone(), *count);
		}
	}
}

impl<T> Distribution<T> {
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Entries in ascending token order.
	pub fn iter(&self) -> impl Iterator<Item = (&Token<T>, u64)> {
		self.counts.iter().map(|(token, count)| (token, *count))
	}
}
