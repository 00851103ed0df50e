use std::collections::HashMap;
use std::fs;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_trigram_core::GenError;
use rs_trigram_core::io::{tokenize, write_sentences};
use rs_trigram_core::model::token::{ends_sentence, is_sentence_opener};
use rs_trigram_core::model::{GeneratorConfig, SentenceGenerator, TrigramModel};

const CORPUS: &str = "\
It was a bright cold day in April, and the clocks were striking thirteen. \
Winston Smith, his chin nuzzled into his breast in an effort to escape the vile wind, \
slipped quickly through the glass doors of Victory Mansions, though not quickly enough \
to prevent a swirl of gritty dust from entering along with him. \
The hallway smelt of boiled cabbage and old rag mats. \
At one end of it a coloured poster, too large for indoor display, had been tacked to the wall. \
It depicted simply an enormous face, more than a metre wide: the face of a man of about \
forty-five, with a heavy black moustache and ruggedly handsome features. \
Winston made for the stairs. It was no use trying the lift. \
Even at the best of times it was seldom working, and at present the electric current \
was cut off during daylight hours. It was part of the economy drive in preparation for Hate Week. \
The flat was seven flights up, and Winston, who was thirty-nine and had a varicose ulcer \
above his right ankle, went slowly, resting several times on the way. \
Was it a face? Was it a man? It was the face of Big Brother! \
On each landing, opposite the lift-shaft, the poster with the enormous face gazed from the wall.";

fn corpus_file(text: &str) -> (tempfile::TempDir, std::path::PathBuf) {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.txt");
	fs::write(&path, text).unwrap();
	(dir, path)
}

#[test]
fn example_corpus_table() {
	let (_dir, path) = corpus_file("The cat sat. The dog ran.");
	let model = TrigramModel::from_corpus(&path).unwrap();

	let table: HashMap<&str, Vec<(&str, usize)>> = model.iter().map(|(head, t)| (head, t.iter().collect())).collect();
	let expected: HashMap<&str, Vec<(&str, usize)>> = HashMap::from([
		("The cat", vec![("sat.", 1)]),
		("cat sat.", vec![("The", 1)]),
		("sat. The", vec![("dog", 1)]),
		("The dog", vec![("ran.", 1)]),
	]);
	assert_eq!(table, expected);
}

#[test]
fn short_corpus_is_rejected_by_the_pipeline() {
	let (_dir, path) = corpus_file("Hello world.\n");
	match TrigramModel::from_corpus(&path) {
		Err(GenError::CorpusTooShort { found }) => assert_eq!(found, 2),
		other => panic!("expected CorpusTooShort, got {other:?}"),
	}
}

#[test]
fn unreadable_corpus_stops_before_building() {
	let dir = tempfile::tempdir().unwrap();
	let result = TrigramModel::from_corpus(dir.path().join("absent.txt"));
	assert!(matches!(result, Err(GenError::CorpusUnreadable { .. })));
}

#[test]
fn counts_sum_to_context_occurrences() {
	let tokens = tokenize(CORPUS);
	let model = TrigramModel::from_tokens(&tokens);

	let mut occurrences: HashMap<String, usize> = HashMap::new();
	for window in tokens.windows(3) {
		*occurrences.entry(format!("{} {}", window[0], window[1])).or_insert(0) += 1;
	}

	assert_eq!(model.len(), occurrences.len());
	for (head, transitions) in model.iter() {
		assert!(!transitions.is_empty());
		assert!(transitions.iter().all(|(_, count)| count >= 1));
		assert_eq!(transitions.total(), occurrences[head], "head {head:?}");
	}
}

#[test]
fn build_is_deterministic() {
	let tokens = tokenize(CORPUS);
	let first = TrigramModel::from_tokens(&tokens);
	let second = TrigramModel::from_tokens(&tokens);
	let parallel = TrigramModel::from_tokens_parallel(&tokens);
	assert_eq!(first, second);
	assert_eq!(first, parallel);
}

#[test]
fn generated_sentences_hold_their_invariants() {
	let model = TrigramModel::from_tokens(&tokenize(CORPUS));
	let generator = SentenceGenerator::new(&model, GeneratorConfig::default()).unwrap();
	let mut rng = StdRng::seed_from_u64(42);

	for sentence in generator.generate(100, &mut rng).unwrap() {
		assert!(sentence.len() >= 5, "too short: {sentence:?}");
		assert!(ends_sentence(sentence.last().unwrap()));
		assert!(is_sentence_opener(&format!("{} {}", sentence[0], sentence[1])));
	}
}

#[test]
fn sentences_are_printed_one_per_line() {
	let model = TrigramModel::from_tokens(&tokenize(CORPUS));
	let generator = SentenceGenerator::new(&model, GeneratorConfig::default()).unwrap();
	let mut rng = StdRng::seed_from_u64(7);

	let sentences = generator.generate(10, &mut rng).unwrap();
	let mut output = Vec::new();
	write_sentences(&mut output, &sentences).unwrap();

	let text = String::from_utf8(output).unwrap();
	let lines: Vec<&str> = text.lines().collect();
	assert_eq!(lines.len(), 10);
	for (line, sentence) in lines.iter().zip(&sentences) {
		assert_eq!(*line, sentence.join(" "));
	}
}

#[test]
fn model_is_shared_between_threads() {
	let model = TrigramModel::from_tokens(&tokenize(CORPUS));

	let results: Vec<Vec<Vec<String>>> = thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|seed| {
				let model = &model;
				scope.spawn(move || {
					let generator = SentenceGenerator::new(model, GeneratorConfig::default()).unwrap();
					generator.generate(5, &mut StdRng::seed_from_u64(seed)).unwrap()
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	let generator = SentenceGenerator::new(&model, GeneratorConfig::default()).unwrap();
	for (seed, sentences) in results.iter().enumerate() {
		let expected = generator.generate(5, &mut StdRng::seed_from_u64(seed as u64)).unwrap();
		assert_eq!(*sentences, expected);
	}
}

#[test]
fn model_survives_serialization() {
	let model = TrigramModel::from_tokens(&tokenize(CORPUS));
	let bytes = postcard::to_stdvec(&model).unwrap();
	let decoded: TrigramModel = postcard::from_bytes(&bytes).unwrap();
	assert_eq!(decoded, model);
}
