use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::token::ends_sentence;

/// Outgoing transitions of one head.
///
/// Maps every tail observed after the head to its number of observations.
/// This is one row of the frequency table; conceptually a node of the Markov
/// chain whose outgoing edges are weighted by their counts.
///
/// ## Invariants
/// - Each count is strictly positive
/// - A `Transitions` stored in a built model is never empty
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
	/// Example: { "sat." => 2, "ran" => 1 }
	tails: BTreeMap<String, usize>,
}

impl Transitions {
	/// Creates an empty row.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `tail`.
	pub fn add(&mut self, tail: &str) {
		self.add_count(tail, 1);
	}

	/// Records `count` occurrences of `tail`. A zero count is ignored.
	pub fn add_count(&mut self, tail: &str, count: usize) {
		if count == 0 {
			return;
		}
		match self.tails.get_mut(tail) {
			Some(existing) => *existing += count,
			None => {
				self.tails.insert(tail.to_owned(), count);
			}
		}
	}

	/// Number of times `tail` followed the head.
	pub fn count(&self, tail: &str) -> Option<usize> {
		self.tails.get(tail).copied()
	}

	/// Number of distinct tails.
	pub fn len(&self) -> usize {
		self.tails.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tails.is_empty()
	}

	/// Returns `true` if the row has a tail and every count is positive.
	pub(crate) fn is_valid(&self) -> bool {
		!self.tails.is_empty() && self.tails.values().all(|count| *count > 0)
	}

	/// Sum of all counts, i.e. how often the head was seen with a successor.
	pub fn total(&self) -> usize {
		self.tails.values().sum()
	}

	/// Iterates over `(tail, count)` in tail order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.tails.iter().map(|(tail, count)| (tail.as_str(), *count))
	}

	/// Returns `true` if every tail ends a sentence.
	///
	/// An empty row has no continuation at all and also returns `true`.
	pub fn all_terminal(&self) -> bool {
		self.tails.keys().all(|tail| ends_sentence(tail))
	}

	/// Draws a tail with probability proportional to its count.
	///
	/// Returns `None` if the row is empty.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		self.sample_where(rng, |_| true)
	}

	/// Draws a tail among those accepted by `accept`, weighted by count.
	///
	/// Drawing from the whole row and redrawing until `accept` holds gives the
	/// same distribution; this performs a single draw instead.
	///
	/// This method performs:
	/// - an O(n) scan to sum the accepted counts
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if no tail is accepted.
	pub fn sample_where<R, F>(&self, rng: &mut R, accept: F) -> Option<&str>
	where
		R: Rng,
		F: Fn(&str) -> bool,
	{
		let total: usize = self.iter().filter(|(tail, _)| accept(*tail)).map(|(_, count)| count).sum();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (tail, count) in self.iter().filter(|(tail, _)| accept(*tail)) {
			if r < count {
				return Some(tail);
			}
			r -= count;
		}

		// Unreachable while `total` matches the filtered counts.
		None
	}

	/// Adds every count of `other` to this row.
	pub fn merge(&mut self, other: &Self) {
		for (tail, count) in other.iter() {
			self.add_count(tail, count);
		}
	}
}
