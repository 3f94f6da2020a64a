//! Order-N Markov chains over arbitrary symbols.
//!
//! This crate provides a trainable, higher-order Markov model including:
//! - Online and weighted training (counts only ever accumulate)
//! - Weighted random generation with proper sequence termination
//! - Injectable random sources for reproducible output
//! - Parallel training from line-oriented text corpora
//!
//! The model never normalizes its statistics: every transition is an
//! integer counter, so training and generation can be interleaved freely.

/// Markov model types, training and generation.
///
/// `Chain` is the usual entry point; the lower-level pieces are public so
/// that collaborators can inspect or export a trained table.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, directory listing).
///
/// Not exposed
pub(crate) mod io;

pub use error::ChainError;
pub use model::chain::Chain;
pub use model::memory::Memory;
pub use model::random::{RandomSource, RngSource};
pub use model::table::TransitionTable;
pub use model::token::Token;
