use std::fmt;

use super::generator;
use super::random::RandomSource;
use super::table::TransitionTable;
use crate::error::ChainError;

/// High-level order-N Markov chain.
///
/// A `Chain` owns its transition table and the random source used for
/// generation. Training and generation can be interleaved freely: there is
/// no finalisation step, counts simply keep accumulating.
///
/// # Responsibilities
/// - Train on sequences, optionally weighted by how often they occur
/// - Generate new sequences from the accumulated statistics
/// - Offer character-level shortcuts for `Chain<char>`
///
/// # Concurrency
/// A `Chain` has no internal locking. Share it across threads behind a
/// `Mutex` (or similar) around every `train` and `generate` call.
pub struct Chain<T> {
	table: TransitionTable<T>,
	rng: Box<dyn RandomSource + Send>,
}

impl<T: Ord + Clone + fmt::Debug> Chain<T> {
	/// Creates an untrained chain of the given order.
	///
	/// # Errors
	/// Returns `ChainError::InvalidOrder` if `order == 0`.
	pub fn new<R>(order: usize, rng: R) -> Result<Self, ChainError>
	where
		R: RandomSource + Send + 'static,
	{
		Ok(Self { table: TransitionTable::new(order)?, rng: Box::new(rng) })
	}

	/// Creates a chain and trains it once on every sequence of `data`.
	pub fn with_data<R, I>(order: usize, rng: R, data: I) -> Result<Self, ChainError>
	where
		R: RandomSource + Send + 'static,
		I: IntoIterator<Item = Vec<T>>,
	{
		let mut chain = Self::new(order, rng)?;
		chain.extend(data);
		Ok(chain)
	}

	/// Trains on one occurrence of `sequence`.
	pub fn train(&mut self, sequence: &[T]) -> &mut Self {
		self.train_weighted(sequence, 1)
	}

	/// Trains on `sequence` as if it occurred `weight` times.
	pub fn train_weighted(&mut self, sequence: &[T], weight: u64) -> &mut Self {
		self.table.train(sequence, weight);
		self
	}

	/// Generates a new sequence.
	///
	/// # Errors
	/// Returns `ChainError::ImpossibleState` if generation reaches a window
	/// that was never trained (e.g. the chain is untrained).
	pub fn generate(&mut self) -> Result<Vec<T>, ChainError> {
		generator::generate(&self.table, self.rng.as_mut())
	}

	/// Adds the counts of a separately trained table.
	///
	/// # Errors
	/// Returns `ChainError::OrderMismatch` if the orders differ.
	pub fn merge_table(&mut self, other: &TransitionTable<T>) -> Result<(), ChainError> {
		self.table.merge(other)
	}

	/// Replaces the random source.
	pub fn set_random_source<R>(&mut self, rng: R)
	where
		R: RandomSource + Send + 'static,
	{
		self.rng = Box::new(rng);
	}
}

impl<T> Chain<T> {
	pub fn order(&self) -> usize {
		self.table.order()
	}

	/// Read-only view of the trained statistics.
	pub fn table(&self) -> &TransitionTable<T> {
		&self.table
	}
}

impl Chain<char> {
	/// Trains on the characters of `text`.
	pub fn train_str(&mut self, text: &str) -> &mut Self {
		self.train_str_weighted(text, 1)
	}

	pub fn train_str_weighted(&mut self, text: &str, weight: u64) -> &mut Self {
		let chars: Vec<char> = text.chars().collect();
		self.train_weighted(&chars, weight)
	}

	/// Generates a new sequence and collects it into a `String`.
	pub fn generate_string(&mut self) -> Result<String, ChainError> {
		Ok(self.generate()?.into_iter().collect())
	}
}

impl<T: Ord + Clone + fmt::Debug> Extend<Vec<T>> for Chain<T> {
	fn extend<I: IntoIterator<Item = Vec<T>>>(&mut self, iter: I) {
		for sequence in iter {
			self.train(&sequence);
		}
	}
}

/// Sequences paired with how often they occur.
impl<T: Ord + Clone + fmt::Debug> Extend<(Vec<T>, u64)> for Chain<T> {
	fn extend<I: IntoIterator<Item = (Vec<T>, u64)>>(&mut self, iter: I) {
		for (sequence, weight) in iter {
			self.train_weighted(&sequence, weight);
		}
	}
}

impl<'a> Extend<&'a str> for Chain<char> {
	fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
		for text in iter {
			self.train_str(text);
		}
	}
}

/// Strings paired with how often they occur.
impl<'a> Extend<(&'a str, u64)> for Chain<char> {
	fn extend<I: IntoIterator<Item = (&'a str, u64)>>(&mut self, iter: I) {
		for (text, weight) in iter {
			self.train_str_weighted(text, weight);
		}
	}
}

impl<T> fmt::Debug for Chain<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Chain")
			.field("order", &self.table.order())
			.field("windows", &self.table.len())
			.finish_non_exhaustive()
	}
}
