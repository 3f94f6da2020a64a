use std::collections::BTreeMap;

use log::{debug, warn};

use super::distribution::Distribution;
use super::memory::Memory;
use super::token::Token;
use crate::error::ChainError;

/// The complete state of an order-N Markov model.
///
/// The `TransitionTable` maps every window of history seen during training
/// to the distribution of what followed it.
///
/// # Responsibilities
/// - Fold training sequences into successor counts
/// - Look up the distribution for a window during generation
/// - Merge with another table of the same order
///
/// # Invariants
/// - `order` is always >= 1 and fixed for the lifetime of the table
/// - Every key has exactly `order` positions
/// - The table never shrinks and counters never decrease
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable<T> {
	/// Number of tokens of history per window.
	order: usize,

	/// Mapping from a window to the successors observed after it.
	transitions: BTreeMap<Memory<T>, Distribution<T>>,
}

impl<T: Ord + Clone> TransitionTable<T> {
	/// Creates an empty table of the given order.
	///
	/// # Errors
	/// Returns `ChainError::InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self, ChainError> {
		if order == 0 {
			return Err(ChainError::InvalidOrder(order));
		}
		Ok(Self { order, transitions: BTreeMap::new() })
	}

	/// Registers `sequence` as having occurred `weight` times.
	///
	/// Starting from the all-terminator window, every symbol is counted as a
	/// successor of the window before it, then shifted in. Once the input
	/// is exhausted, the terminator is counted after the final window, which
	/// is what lets generation stop.
	///
	/// # Notes
	/// - Training the same sequence twice with weight 1 gives the same table
	///   as training it once with weight 2.
	/// - The empty sequence records a single terminator on the start window.
	/// - A weight of 0 registers nothing and leaves the table untouched.
	pub fn train(&mut self, sequence: &[T], weight: u64) {
		if weight == 0 {
			warn!("Ignoring training call with weight 0 ({} symbols)", sequence.len());
			return;
		}

		let last = sequence.iter().fold(Memory::empty(self.order), |memory, symbol| {
			let next = memory.push(symbol.clone());
			self.transitions
				.entry(memory)
				.or_default()
				.record(Token::Symbol(symbol.clone()), weight);
			next
		});

		self.transitions
			.entry(last)
			.or_default()
			.record(Token::Terminator, weight);

		debug!(
			"Trained {} symbols with weight {} ({} windows)",
			sequence.len(),
			weight,
			self.transitions.len()
		);
	}

	/// Merges another table into this one.
	///
	/// Counts for matching windows and successors are summed; unknown
	/// windows are cloned. This is what parallel training relies on:
	/// merging partial tables gives the same result as training everything
	/// into one table.
	///
	/// # Errors
	/// Returns `ChainError::OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), ChainError> {
		if self.order != other.order {
			return Err(ChainError::OrderMismatch { expected: self.order, got: other.order });
		}

		for (memory, distribution) in &other.transitions {
			match self.transitions.get_mut(memory) {
				Some(existing) => existing.merge(distribution),
				None => {
					self.transitions.insert(memory.clone(), distribution.clone());
				}
			}
		}

		debug!("Merged {} windows ({} total)", other.transitions.len(), self.transitions.len());
		Ok(())
	}

	/// Returns the distribution observed after `memory`, if any.
	pub fn get(&self, memory: &Memory<T>) -> Option<&Distribution<T>> {
		self.transitions.get(memory)
	}

	/// The window every sequence starts from.
	pub fn start(&self) -> Memory<T> {
		Memory::empty(self.order)
	}

	/// Overwrites the distribution of a window, bypassing training.
	#[cfg(test)]
	pub(crate) fn insert_distribution(&mut self, memory: Memory<T>, distribution: Distribution<T>) {
		self.transitions.insert(memory, distribution);
	}

	/// Sum of every counter in the table.
	pub fn observations(&self) -> u64 {
		self.transitions.values().fold(0u64, |acc, d| acc.saturating_add(d.total()))
	}
}

impl<T> TransitionTable<T> {
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct windows.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Every window with its distribution, in ascending window order.
	///
	/// This is the read-only view a collaborator can use to export a
	/// trained model.
	pub fn iter(&self) -> impl Iterator<Item = (&Memory<T>, &Distribution<T>)> {
		self.transitions.iter()
	}
}
