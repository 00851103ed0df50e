use std::slice::Windows;

use super::token::join_head;

/// Three consecutive tokens of the corpus, borrowed from the token slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigram<'a> {
	pub first: &'a str,
	pub second: &'a str,
	pub third: &'a str,
}

impl<'a> Trigram<'a> {
	/// Context key made of the first two tokens.
	pub fn head(&self) -> String {
		join_head(self.first, self.second)
	}

	/// Token observed after the head.
	pub fn tail(&self) -> &'a str {
		self.third
	}
}

/// Lazy iterator over the overlapping 3-token windows of a token slice.
///
/// Yields nothing when fewer than 3 tokens are given.
pub struct Trigrams<'a, T> {
	windows: Windows<'a, T>,
}

impl<'a, T: AsRef<str>> Iterator for Trigrams<'a, T> {
	type Item = Trigram<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		self.windows.next().map(|w| Trigram {
			first: w[0].as_ref(),
			second: w[1].as_ref(),
			third: w[2].as_ref(),
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.windows.size_hint()
	}
}

impl<'a, T: AsRef<str>> ExactSizeIterator for Trigrams<'a, T> {}

/// Returns the trigrams of `tokens`, stride 1.
pub fn trigrams<T: AsRef<str>>(tokens: &[T]) -> Trigrams<'_, T> {
	Trigrams { windows: tokens.windows(3) }
}
