use std::fmt;

use super::token::Token;

/// The last `order` tokens of history, used as the key of the
/// transition table.
///
/// A `Memory` is an immutable value: `shift` builds a new window instead of
/// editing this one, so a trainer can keep the pre-shift window as a lookup
/// key while advancing.
///
/// Position matters: `[a, b]` and `[b, a]` are different windows.
///
/// # Invariants
/// - The length never changes after construction
/// - The oldest token is at index 0, the most recent at `order - 1`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Memory<T> {
	tokens: Box<[Token<T>]>,
}

impl<T: Clone> Memory<T> {
	/// Creates the all-terminator window that starts every sequence.
	pub fn empty(order: usize) -> Self {
		Self { tokens: vec![Token::Terminator; order].into_boxed_slice() }
	}

	/// Returns the window obtained by dropping the oldest token and
	/// appending `next`.
	///
	/// A window of length 0 stays empty.
	pub fn shift(&self, next: Token<T>) -> Self {
		if self.tokens.is_empty() {
			return self.clone();
		}

		let tokens: Box<[Token<T>]> = self.tokens[1..]
			.iter()
			.cloned()
			.chain(std::iter::once(next))
			.collect();
		Self { tokens }
	}

	/// Shifts a concrete symbol into the window.
	pub fn push(&self, symbol: T) -> Self {
		self.shift(Token::Symbol(symbol))
	}
}

impl<T> Memory<T> {
	/// Builds a window from explicit tokens, oldest first.
	pub fn from_tokens(tokens: Vec<Token<T>>) -> Self {
		Self { tokens: tokens.into_boxed_slice() }
	}

	/// Number of positions in the window.
	pub fn order(&self) -> usize {
		self.tokens.len()
	}

	pub fn as_slice(&self) -> &[Token<T>] {
		&self.tokens
	}

	pub fn iter(&self) -> impl Iterator<Item = &Token<T>> {
		self.tokens.iter()
	}
}

impl<T: fmt::Debug> Memory<T> {
	/// Renders the window with `Debug` symbols, e.g. `[∅,'a']`.
	///
	/// Unlike `Display`, this works for any symbol type and is what error
	/// messages and traces use.
	pub fn describe(&self) -> String {
		let tokens: Vec<String> = self
			.tokens
			.iter()
			.map(|token| match token {
				Token::Terminator => "∅".to_owned(),
				Token::Symbol(s) => format!("{:?}", s),
			})
			.collect();
		format!("[{}]", tokens.join(","))
	}
}

impl<T, const N: usize> From<[Token<T>; N]> for Memory<T> {
	fn from(tokens: [Token<T>; N]) -> Self {
		Self { tokens: Box::new(tokens) }
	}
}

impl<T: fmt::Display> fmt::Display for Memory<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, token) in self.tokens.iter().enumerate() {
			if i > 0 {
				f.write_str(",")?;
			}
			token.fmt(f)?;
		}
		f.write_str("]")
	}
}
