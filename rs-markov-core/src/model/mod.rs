//! Top-level module for the Markov model.
//!
//! This module provides an order-N Markov chain, including:
//! - Tagged successors that can mark the end of a sequence (`Token`)
//! - Fixed-length history windows used as lookup keys (`Memory`)
//! - Per-window successor counts (`Distribution`)
//! - The window-to-distribution map and its training fold (`TransitionTable`)
//! - Weighted sampling of new sequences (`generator`)
//! - Injectable randomness (`RandomSource`)
//! - A high-level model owning all of the above (`Chain`)

/// High-level model owning a transition table and a random source.
pub mod chain;

/// Parallel training from line-oriented text files.
///
/// Splits a corpus into chunks, trains partial tables on worker threads
/// and merges them into one table.
pub mod corpus;

/// Successor counts observed after a single window.
pub mod distribution;

/// Weighted random generation over a trained table.
pub mod generator;

/// Fixed-length history window (the lookup key of the model).
pub mod memory;

/// Random number sources injected into the model.
pub mod random;

/// Transition table and the training fold.
pub mod table;

/// A symbol or the end-of-sequence marker.
pub mod token;
