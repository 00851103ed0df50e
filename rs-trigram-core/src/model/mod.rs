//! Top-level module for the trigram generation system.
//!
//! This module provides a word-level second-order Markov generator, including:
//! - Trigram extraction over a token slice (`trigram`)
//! - The frequency table and its builder (`TrigramModel`, `ModelBuilder`)
//! - Per-head weighted transitions (`Transitions`)
//! - Generation limits (`GeneratorConfig`)
//! - Sentence generation (`SentenceGenerator`)

/// Sentence generation: head selection, tail sampling and bounded restarts.
pub mod generator;

/// Generation parameters and retry limits.
pub mod config;

/// Frequency table mapping a two-token head to its tails.
///
/// Built once, sequentially or in parallel, then read-only.
pub mod trigram_model;

/// Outgoing transitions of one head with weighted sampling.
pub mod transitions;

/// Lazy 3-token sliding windows.
pub mod trigram;

/// Token predicates: sentence terminators, head keys and openers.
pub mod token;

pub use config::GeneratorConfig;
pub use generator::{SentenceGenerator, TailDraw};
pub use trigram_model::{ModelBuilder, TrigramModel};
