use std::io;
use std::process::ExitCode;

use log::{error, info};

use rs_trigram_core::{GenError, Result};
use rs_trigram_core::io::{CORPUS_PROMPT, prompt_path, write_sentences};
use rs_trigram_core::model::{GeneratorConfig, SentenceGenerator, TrigramModel};

fn run() -> Result<()> {
	// Ask for the corpus on stdin; the prompt goes to stdout
	let path = {
		let stdin = io::stdin();
		let mut input = stdin.lock();
		let mut output = io::stdout();
		prompt_path(&mut input, &mut output, CORPUS_PROMPT)?
	};

	// Read, tokenize and count every trigram of the corpus
	let model = TrigramModel::from_corpus(&path)?;
	info!("model ready: {} heads from {}", model.len(), path.display());

	// Default limits: 10 sentences, at least 5 tokens before a terminator
	let generator = SentenceGenerator::new(&model, GeneratorConfig::default())?;

	// All sentences are generated before anything is printed
	let count = generator.config().sentence_count;
	let sentences = generator.generate(count, &mut rand::rng())?;

	let stdout = io::stdout();
	let mut output = stdout.lock();
	write_sentences(&mut output, &sentences)
}

/// Logs a fatal error, prints it for the user and picks the exit status.
fn report(e: &GenError) -> ExitCode {
	error!("{e:?}");
	eprintln!("error: {e}");
	ExitCode::FAILURE
}

fn main() -> ExitCode {
	env_logger::init();

	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => report(&e),
	}
}
