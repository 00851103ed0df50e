use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{GenError, Result};

/// Prompt shown before reading the corpus path.
pub const CORPUS_PROMPT: &str =
	"Give the filename (plus extension) of the corpus you would like to generate sentences from: ";

/// Reads a corpus file fully as UTF-8 text.
///
/// # Errors
/// Returns `CorpusUnreadable` if the file is missing, unreadable or not UTF-8.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	fs::read_to_string(path).map_err(|source| GenError::CorpusUnreadable {
		path: path.to_owned(),
		source,
	})
}

/// Splits raw text into tokens on whitespace only.
///
/// Punctuation stays attached to its word and case is preserved.
///
/// Example: `"The cat  sat.\nThe"` → `["The", "cat", "sat.", "The"]`
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Writes `prompt`, then reads one line from `input` and returns it as a path.
///
/// Only the line terminator is removed; spaces belong to the path.
pub fn prompt_path<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<PathBuf> {
	output.write_all(prompt.as_bytes()).map_err(GenError::Prompt)?;
	output.flush().map_err(GenError::Prompt)?;

	let mut line = String::new();
	let read = input.read_line(&mut line).map_err(GenError::Prompt)?;
	if read == 0 {
		return Err(GenError::Prompt(io::Error::new(
			io::ErrorKind::UnexpectedEof,
			"no path given",
		)));
	}

	Ok(PathBuf::from(line.trim_end_matches(['\r', '\n'])))
}

/// Writes one sentence per line, tokens joined by a single space.
pub fn write_sentences<W, S>(output: &mut W, sentences: &[S]) -> Result<()>
where
	W: Write,
	S: AsRef<[String]>,
{
	for sentence in sentences {
		writeln!(output, "{}", sentence.as_ref().join(" ")).map_err(GenError::Output)?;
	}
	output.flush().map_err(GenError::Output)
}
