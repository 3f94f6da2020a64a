use std::fmt;

/// A successor in the chain: either a concrete symbol or the end of a
/// sequence.
///
/// `Terminator` fills the history window before anything has been seen and
/// is recorded as a successor whenever a trained sequence ends.
///
/// # Ordering
/// `Terminator` sorts before every symbol; symbols keep the order of `T`.
/// Generation walks distributions in this order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token<T> {
	Terminator,
	Symbol(T),
}

impl<T> Token<T> {
	pub fn is_terminator(&self) -> bool {
		matches!(self, Token::Terminator)
	}

	/// Returns the wrapped symbol, if any.
	pub fn symbol(&self) -> Option<&T> {
		match self {
			Token::Terminator => None,
			Token::Symbol(s) => Some(s),
		}
	}

	pub fn into_symbol(self) -> Option<T> {
		match self {
			Token::Terminator => None,
			Token::Symbol(s) => Some(s),
		}
	}
}

impl<T> From<T> for Token<T> {
	fn from(symbol: T) -> Self {
		Token::Symbol(symbol)
	}
}

impl<T: fmt::Display> fmt::Display for Token<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Terminator => f.write_str("∅"),
			Token::Symbol(s) => s.fmt(f),
		}
	}
}
