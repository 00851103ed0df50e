use log::{debug, trace};
use rand::Rng;

use crate::error::{GenError, Result};
use super::config::GeneratorConfig;
use super::token::{ends_sentence, is_sentence_opener, join_head, split_head};
use super::trigram_model::TrigramModel;

/// Result of a tail draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailDraw<'m> {
	/// Token to append to the sentence.
	Tail(&'m str),
	/// No acceptable continuation; the sentence has to start over.
	Restart,
}

/// Generation state of one sentence.
#[derive(Debug)]
enum Phase {
	/// No tokens yet.
	Seed,
	/// At least the seed head, waiting for the next tail.
	Extend(Vec<String>),
	/// The last token ends the sentence.
	Done(Vec<String>),
	/// Dead end; the partial sentence is dropped.
	Restart,
}

/// Generates sentences from a read-only `TrigramModel`.
///
/// # Responsibilities
/// - Draw sentence openers by rejection sampling over the model heads
/// - Draw tails weighted by their counts, refusing early terminators
/// - Restart dead-end sentences from a brand-new head, within the
///   configured budget
///
/// Every sampling operation takes the random source as a parameter, so a
/// seeded `StdRng` makes the output reproducible.
#[derive(Debug, Clone)]
pub struct SentenceGenerator<'m> {
	model: &'m TrigramModel,
	config: GeneratorConfig,
}

impl<'m> SentenceGenerator<'m> {
	/// Creates a generator over `model`.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `config` breaks its invariants.
	pub fn new(model: &'m TrigramModel, config: GeneratorConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self { model, config })
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Draws a head that can open a sentence.
	///
	/// Heads are drawn uniformly and rejected until one passes
	/// `is_sentence_opener`.
	///
	/// # Errors
	/// - `ModelEmpty` if the model has no head.
	/// - `NoValidSentenceStart` after `max_head_attempts` rejected draws.
	pub fn select_head<R: Rng>(&self, rng: &mut R) -> Result<&'m str> {
		let model = self.model;
		if model.is_empty() {
			return Err(GenError::ModelEmpty);
		}

		let attempts = self.config.max_head_attempts();
		for _ in 0..attempts {
			let Some(head) = model.random_head(rng) else {
				return Err(GenError::ModelEmpty);
			};
			if is_sentence_opener(head) {
				trace!("selected head {head:?}");
				return Ok(head);
			}
		}

		Err(GenError::NoValidSentenceStart { attempts })
	}

	/// Draws the tail following `head` for a sentence of `sentence_len` tokens.
	///
	/// # Behavior
	/// - While the sentence is shorter than `min_sentence_len`, terminal tails
	///   are refused. If the head only has terminal tails, returns `Restart`.
	/// - Otherwise any tail can be drawn, weighted by its count.
	/// - A head missing from the model is a dead end and returns `Restart`.
	///
	/// # Errors
	/// Returns `ModelEmpty` if the model has no head.
	pub fn sample_tail<R: Rng>(&self, head: &str, sentence_len: usize, rng: &mut R) -> Result<TailDraw<'m>> {
		let model = self.model;
		if model.is_empty() {
			return Err(GenError::ModelEmpty);
		}
		let Some(transitions) = model.transitions(head) else {
			debug!("head {head:?} has no continuation");
			return Ok(TailDraw::Restart);
		};

		let too_short = sentence_len < self.config.min_sentence_len();
		if too_short && transitions.all_terminal() {
			return Ok(TailDraw::Restart);
		}

		let tail = if too_short {
			transitions.sample_where(rng, |tail| !ends_sentence(tail))
		} else {
			transitions.sample(rng)
		};

		Ok(match tail {
			Some(tail) => TailDraw::Tail(tail),
			None => TailDraw::Restart,
		})
	}

	/// Continues a sentence seeded with `head` until it ends or hits a dead end.
	///
	/// Returns `None` if the attempt would have to restart.
	///
	/// # Errors
	/// Returns `ModelEmpty` if the model has no head.
	pub fn complete_from<R: Rng>(&self, head: &str, rng: &mut R) -> Result<Option<Vec<String>>> {
		let mut phase = Self::seed(head);
		loop {
			phase = match phase {
				Phase::Extend(sentence) => self.extend(sentence, rng)?,
				Phase::Done(sentence) => return Ok(Some(sentence)),
				Phase::Seed | Phase::Restart => return Ok(None),
			};
		}
	}

	/// Generates one finished sentence.
	///
	/// The last token always ends with `.`, `!` or `?`.
	///
	/// # Errors
	/// - `ModelEmpty` if the model has no head.
	/// - `NoValidSentenceStart` if no opener can be drawn.
	/// - `SentenceUnreachable` after `max_restarts` restarts.
	pub fn generate_sentence<R: Rng>(&self, rng: &mut R) -> Result<Vec<String>> {
		let max_restarts = self.config.max_restarts();
		let mut restarts = 0;
		let mut phase = Phase::Seed;

		loop {
			phase = match phase {
				Phase::Seed => Self::seed(self.select_head(rng)?),
				Phase::Extend(sentence) => self.extend(sentence, rng)?,
				Phase::Done(sentence) => return Ok(sentence),
				Phase::Restart => {
					if restarts >= max_restarts {
						return Err(GenError::SentenceUnreachable { restarts });
					}
					restarts += 1;
					debug!("restarting sentence ({restarts}/{max_restarts})");
					Phase::Seed
				}
			};
		}
	}

	/// Generates `count` sentences.
	///
	/// Nothing is returned unless every sentence succeeds.
	pub fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<Vec<String>>> {
		(0..count).map(|_| self.generate_sentence(rng)).collect()
	}

	/// SEED → EXTEND
	fn seed(head: &str) -> Phase {
		match split_head(head) {
			Some((first, second)) => Phase::Extend(vec![first.to_owned(), second.to_owned()]),
			None => Phase::Restart,
		}
	}

	/// EXTEND → EXTEND | DONE | RESTART
	fn extend<R: Rng>(&self, mut sentence: Vec<String>, rng: &mut R) -> Result<Phase> {
		let len = sentence.len();
		if len >= self.config.max_sentence_len() {
			debug!("sentence reached {len} tokens without ending");
			return Ok(Phase::Restart);
		}

		let head = join_head(&sentence[len - 2], &sentence[len - 1]);
		match self.sample_tail(&head, len, rng)? {
			TailDraw::Restart => Ok(Phase::Restart),
			TailDraw::Tail(tail) => {
				sentence.push(tail.to_owned());
				if ends_sentence(tail) {
					Ok(Phase::Done(sentence))
				} else {
					Ok(Phase::Extend(sentence))
				}
			}
		}
	}
}
