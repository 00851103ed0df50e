//! Trigram-based sentence generation library.
//!
//! This crate provides a second-order Markov text generator including:
//! - Whitespace tokenization and corpus loading
//! - A word-level trigram frequency table (two-token head → next token)
//! - Sentence generation with weighted sampling, head rejection sampling
//!   and bounded restarts
//!
//! The model is built once and is read-only afterwards, so a single
//! `TrigramModel` can back any number of generators.

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// Trigram model construction and sentence generation.
pub mod model;

/// I/O utilities (corpus loading, tokenization, prompt and output).
pub mod io;

pub use error::{GenError, Result};
