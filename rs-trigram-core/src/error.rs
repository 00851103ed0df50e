use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a corpus, building a model or generating sentences.
///
/// Corpus and model errors are fatal for a whole run. Restarting a sentence is
/// regular control flow and never surfaces here unless the restart budget is
/// exhausted (`SentenceUnreachable`).
#[derive(Debug, Error)]
pub enum GenError {
	/// The corpus file is missing, unreadable or not valid UTF-8.
	#[error("cannot read corpus {}: {source}", path.display())]
	CorpusUnreadable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The corpus holds fewer tokens than a single trigram needs.
	#[error("corpus is too short: {found} token(s), at least 3 are required")]
	CorpusTooShort { found: usize },

	/// The frequency table has no entry to sample from.
	#[error("the model is empty, nothing can be generated")]
	ModelEmpty,

	/// No head of the model qualifies as a sentence opener.
	#[error("no valid sentence start found after {attempts} attempts")]
	NoValidSentenceStart { attempts: usize },

	/// Every attempt to finish a sentence ended in a restart.
	#[error("could not complete a sentence after {restarts} restarts")]
	SentenceUnreachable { restarts: usize },

	/// A deserialized model breaks the frequency table invariants.
	#[error("invalid model: {0}")]
	InvalidModel(String),

	/// A generator setting is out of range.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// Prompting for the corpus path failed.
	#[error("cannot read the corpus path: {0}")]
	Prompt(#[source] io::Error),

	/// Writing generated sentences failed.
	#[error("cannot write output: {0}")]
	Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
