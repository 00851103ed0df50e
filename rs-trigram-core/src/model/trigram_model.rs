use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::io::{read_corpus, tokenize};
use super::token::{is_sentence_opener, split_head};
use super::transitions::Transitions;
use super::trigram::{Trigram, trigrams};

/// Number of chunks per CPU used by the parallel build.
const CHUNK_FACTOR: usize = 8;

/// Below this many tokens the parallel build runs on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Mutable accumulator for a frequency table.
///
/// Every observed trigram increments `states[head][tail]`. A builder is
/// consumed by [`ModelBuilder::build`], which freezes it into a
/// [`TrigramModel`].
///
/// # Responsibilities
/// - Accumulate transition counts from trigrams or token slices
/// - Merge with another partial builder (parallel learning support)
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
	states: BTreeMap<String, Transitions>,
}

impl ModelBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one trigram.
	pub fn add_trigram(&mut self, trigram: &Trigram<'_>) {
		let head = trigram.head();
		self.states.entry(head).or_default().add(trigram.tail());
	}

	/// Records every trigram of `tokens`.
	///
	/// Inputs shorter than 3 tokens add nothing.
	pub fn add_tokens<T: AsRef<str>>(&mut self, tokens: &[T]) {
		for trigram in trigrams(tokens) {
			self.add_trigram(&trigram);
		}
	}

	/// Merges another builder into this one, summing counts.
	pub fn merge(&mut self, other: &Self) {
		for (head, transitions) in &other.states {
			match self.states.get_mut(head) {
				Some(existing) => existing.merge(transitions),
				None => {
					self.states.insert(head.clone(), transitions.clone());
				}
			}
		}
	}

	/// Freezes the accumulated counts into an immutable model.
	pub fn build(self) -> TrigramModel {
		let states: BTreeMap<String, Transitions> = self
			.states
			.into_iter()
			.filter(|(_, transitions)| !transitions.is_empty())
			.collect();
		let heads = states.keys().cloned().collect();
		TrigramModel { states, heads }
	}
}

/// Word-level second-order Markov model.
///
/// Maps a head (two tokens joined by a space) to the tails observed after it.
/// A model is immutable once built, so a shared reference can serve any
/// number of generators, including from several threads.
///
/// # Invariants
/// - Every head has at least one tail
/// - Every count is >= 1
/// - `heads` lists the keys of `states` in key order
///
/// Only `states` is serialized; deserialization checks the invariants and
/// rebuilds `heads`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawModel")]
pub struct TrigramModel {
	states: BTreeMap<String, Transitions>,
	/// Index for uniform head draws.
	#[serde(skip)]
	heads: Vec<String>,
}

/// Serialized form of a `TrigramModel`, not yet checked.
#[derive(Deserialize)]
struct RawModel {
	states: BTreeMap<String, Transitions>,
}

impl TryFrom<RawModel> for TrigramModel {
	type Error = GenError;

	fn try_from(raw: RawModel) -> Result<Self> {
		for (head, transitions) in &raw.states {
			if split_head(head).is_none() {
				return Err(GenError::InvalidModel(format!("head {head:?} is not made of two tokens")));
			}
			if !transitions.is_valid() {
				return Err(GenError::InvalidModel(format!("head {head:?} has no positive tail count")));
			}
		}
		let heads = raw.states.keys().cloned().collect();
		Ok(Self { states: raw.states, heads })
	}
}

impl TrigramModel {
	/// Loads a corpus file and builds its model.
	///
	/// - Reads the whole file as UTF-8.
	/// - Splits it on whitespace.
	/// - Builds the table with [`TrigramModel::from_tokens_parallel`].
	///
	/// # Errors
	/// - `CorpusUnreadable` if the file cannot be read.
	/// - `CorpusTooShort` if it holds fewer than 3 tokens.
	pub fn from_corpus<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let text = read_corpus(&filepath)?;
		let tokens = tokenize(&text);
		if tokens.len() < 3 {
			return Err(GenError::CorpusTooShort { found: tokens.len() });
		}
		debug!("{} tokens read from {}", tokens.len(), filepath.as_ref().display());
		Ok(Self::from_tokens_parallel(&tokens))
	}

	/// Builds a model from tokens on the calling thread.
	pub fn from_tokens<T: AsRef<str>>(tokens: &[T]) -> Self {
		let mut builder = ModelBuilder::new();
		builder.add_tokens(tokens);
		let model = builder.build();
		model.log_summary(tokens.len());
		model
	}

	/// Builds a model by splitting the tokens into chunks learned in parallel.
	///
	/// # Behavior
	/// - Splits the tokens into `cpus * CHUNK_FACTOR` chunks.
	/// - Consecutive chunks overlap by two tokens so the trigrams that span a
	///   boundary are counted exactly once.
	/// - Spawns a thread per chunk to build a partial model.
	/// - Merges all partial models; the result equals [`TrigramModel::from_tokens`].
	pub fn from_tokens_parallel<T: AsRef<str> + Sync>(tokens: &[T]) -> Self {
		if tokens.len() < PARALLEL_THRESHOLD {
			return Self::from_tokens(tokens);
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let windows = tokens.len() - 2;
		let windows_per_chunk = windows.div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			let mut start = 0;
			while start < windows {
				let end = (start + windows_per_chunk).min(windows);
				// Windows start..end need tokens start..end + 2
				let chunk = &tokens[start..end + 2];
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = ModelBuilder::new();
					partial.add_tokens(chunk);
					// The receiver outlives the scope
					let _ = tx.send(partial);
				});
				start = end;
			}
		});
		drop(tx);

		let mut builder = ModelBuilder::new();
		for partial in rx.iter() {
			builder.merge(&partial);
		}

		let model = builder.build();
		model.log_summary(tokens.len());
		model
	}

	fn log_summary(&self, token_count: usize) {
		if token_count < 3 {
			warn!("corpus has {token_count} token(s), the model is empty");
			return;
		}
		debug!(
			"model built from {} tokens: {} heads, {} transitions, {} sentence openers",
			token_count,
			self.len(),
			self.transition_count(),
			self.opener_count()
		);
	}

	/// Number of heads.
	pub fn len(&self) -> usize {
		self.heads.len()
	}

	pub fn is_empty(&self) -> bool {
		self.heads.is_empty()
	}

	/// Returns the tails observed after `head`.
	pub fn transitions(&self, head: &str) -> Option<&Transitions> {
		self.states.get(head)
	}

	pub fn contains_head(&self, head: &str) -> bool {
		self.states.contains_key(head)
	}

	/// Iterates over the heads in key order.
	pub fn heads(&self) -> impl Iterator<Item = &str> {
		self.heads.iter().map(String::as_str)
	}

	/// Iterates over `(head, transitions)` in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Transitions)> {
		self.states.iter().map(|(head, transitions)| (head.as_str(), transitions))
	}

	/// Returns a uniformly drawn head, or `None` if the model is empty.
	pub fn random_head<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		if self.heads.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.heads.len());
		Some(self.heads[index].as_str())
	}

	/// Total number of distinct `(head, tail)` pairs.
	pub fn transition_count(&self) -> usize {
		self.states.values().map(Transitions::len).sum()
	}

	/// Number of heads that may open a sentence.
	pub fn opener_count(&self) -> usize {
		self.heads().filter(|head| is_sentence_opener(head)).count()
	}
}
