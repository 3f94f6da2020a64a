use thiserror::Error;

/// Errors produced by the Markov model.
///
/// Training itself never fails; errors come from construction with an
/// unusable order, from combining tables of different orders, from reading
/// a corpus, and from generating out of a window that was never trained.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The order of a model must be at least 1.
	#[error("Invalid order: {0} (must be >= 1)")]
	InvalidOrder(usize),

	/// Two tables with different window lengths cannot be combined.
	#[error("Order mismatch: expected {expected}, got {got}")]
	OrderMismatch { expected: usize, got: usize },

	/// Generation reached a window absent from the transition table.
	///
	/// Happens when generating from an untrained model, or from a table
	/// whose trained paths don't cover the window reached.
	#[error("Impossible memory state in markov chain: {window} (after {emitted} symbols)")]
	ImpossibleState { window: String, emitted: usize },

	/// Reading a corpus failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A training worker panicked before delivering its partial table.
	#[error("Training worker failed: {0}")]
	Thread(String),
}

impl ChainError {
	/// Returns `true` for the fatal generation error.
	pub fn is_impossible_state(&self) -> bool {
		matches!(self, ChainError::ImpossibleState { .. })
	}
}
