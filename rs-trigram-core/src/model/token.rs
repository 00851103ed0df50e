/// Characters that close a sentence when they end a token.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Returns `true` if the token ends with `.`, `!` or `?`.
pub fn ends_sentence(token: &str) -> bool {
	token.ends_with(TERMINATORS)
}

/// Builds a head key from two consecutive tokens.
pub fn join_head(first: &str, second: &str) -> String {
	let mut head = String::with_capacity(first.len() + second.len() + 1);
	head.push_str(first);
	head.push(' ');
	head.push_str(second);
	head
}

/// Splits a head key back into its two tokens.
///
/// Returns `None` if the key is not made of exactly two tokens.
pub fn split_head(head: &str) -> Option<(&str, &str)> {
	let mut parts = head.split(' ');
	match (parts.next(), parts.next(), parts.next()) {
		(Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => Some((first, second)),
		_ => None,
	}
}

/// Checks whether a head may open a sentence.
///
/// The first token must start with an alphabetic character that is already
/// in its uppercase form, and must not end with a terminator.
pub fn is_sentence_opener(head: &str) -> bool {
	let first = match head.split(' ').next() {
		Some(token) => token,
		None => return false,
	};
	let Some(c) = first.chars().next() else {
		return false;
	};

	c.is_alphabetic() && c.to_uppercase().eq(std::iter::once(c)) && !ends_sentence(first)
}
