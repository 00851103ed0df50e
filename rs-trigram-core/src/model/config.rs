use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Generation parameters and retry limits.
///
/// # Responsibilities
/// - Track how many sentences a run produces (`sentence_count`)
/// - Track the minimum-length heuristic (`min_sentence_len`)
/// - Bound every sampling loop so generation always terminates
///
/// # Invariants
/// - `max_head_attempts >= 1`
/// - `max_sentence_len > min_sentence_len` and `max_sentence_len >= 3`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Number of sentences produced by a run.
	pub sentence_count: usize,

	/// A terminal tail is refused while the sentence is shorter than this.
	min_sentence_len: usize,

	/// Maximum number of random head draws per sentence start.
	max_head_attempts: usize,

	/// Maximum number of restarts before a sentence is given up.
	max_restarts: usize,

	/// A sentence reaching this length without a terminal tail is restarted.
	max_sentence_len: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			sentence_count: 10,
			min_sentence_len: 5,
			max_head_attempts: 10_000,
			max_restarts: 1_000,
			max_sentence_len: 256,
		}
	}
}

impl GeneratorConfig {
	pub fn min_sentence_len(&self) -> usize {
		self.min_sentence_len
	}

	pub fn max_head_attempts(&self) -> usize {
		self.max_head_attempts
	}

	pub fn max_restarts(&self) -> usize {
		self.max_restarts
	}

	pub fn max_sentence_len(&self) -> usize {
		self.max_sentence_len
	}

	/// Sets the minimum sentence length.
	///
	/// # Errors
	/// Returns an error if the value is not below `max_sentence_len`.
	pub fn set_min_sentence_len(&mut self, len: usize) -> Result<()> {
		if len >= self.max_sentence_len {
			return Err(GenError::InvalidConfig(format!(
				"min_sentence_len ({len}) must be below max_sentence_len ({})",
				self.max_sentence_len
			)));
		}
		self.min_sentence_len = len;
		Ok(())
	}

	/// Sets the maximum number of head draws.
	///
	/// # Errors
	/// Returns an error if `attempts` is 0.
	pub fn set_max_head_attempts(&mut self, attempts: usize) -> Result<()> {
		if attempts == 0 {
			return Err(GenError::InvalidConfig("max_head_attempts must be at least 1".to_owned()));
		}
		self.max_head_attempts = attempts;
		Ok(())
	}

	/// Sets the restart budget. 0 means the first dead end is fatal.
	pub fn set_max_restarts(&mut self, restarts: usize) {
		self.max_restarts = restarts;
	}

	/// Sets the run-on limit.
	///
	/// # Errors
	/// Returns an error if `len` is below 3 or not above `min_sentence_len`.
	pub fn set_max_sentence_len(&mut self, len: usize) -> Result<()> {
		if len < 3 || len <= self.min_sentence_len {
			return Err(GenError::InvalidConfig(format!(
				"max_sentence_len ({len}) must be at least 3 and above min_sentence_len ({})",
				self.min_sentence_len
			)));
		}
		self.max_sentence_len = len;
		Ok(())
	}

	/// Checks the invariants, for values that bypassed the setters (deserialization).
	pub fn validate(&self) -> Result<()> {
		if self.max_head_attempts == 0 {
			return Err(GenError::InvalidConfig("max_head_attempts must be at least 1".to_owned()));
		}
		if self.max_sentence_len < 3 || self.max_sentence_len <= self.min_sentence_len {
			return Err(GenError::InvalidConfig(format!(
				"max_sentence_len ({}) must be at least 3 and above min_sentence_len ({})",
				self.max_sentence_len, self.min_sentence_len
			)));
		}
		Ok(())
	}
}
