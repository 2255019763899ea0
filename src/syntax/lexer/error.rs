use std::fmt::{self, Debug, Display};


/// The kind of lexical error.
#[derive(Clone, PartialEq)]
pub enum ErrorKind {
	/// A quoted string without its closing quote.
	UnterminatedString,
	/// A dollar not followed by an open brace.
	OpenBraceExpected,
	/// A dereference whose name doesn't start with a letter.
	LetterExpected,
	/// A dereference without its closing brace.
	CloseBraceExpected,
	/// Integer literals that don't fit in 64 bits.
	InvalidNumber(Box<str>),
}


impl Debug for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self) // Use the display instance for debugging.
	}
}


impl Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::UnterminatedString => f.write_str("unterminated string"),
			Self::OpenBraceExpected => f.write_str("{ expected"),
			Self::LetterExpected => f.write_str("letter expected"),
			Self::CloseBraceExpected => f.write_str("} expected"),
			Self::InvalidNumber(number) => write!(f, "invalid number: {}", number),
		}
	}
}


/// A lexical error.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
	pub error: ErrorKind,
	/// Offset where the failing lexeme started.
	pub offset: usize,
	/// Offset where the automaton got stuck.
	pub end: usize,
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.error)
	}
}


impl std::error::Error for Error {}
