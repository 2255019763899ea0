use super::{lexer, EntityKind, SourcePos, Token, TokenKind};
use crate::{
	fmt::{self, Display},
	symbol,
};


/// What the parser was expecting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
	Token(TokenKind),
	Message(&'static str),
}


/// A grammar error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
	/// Premature end of input.
	UnexpectedEnd { offset: usize, expected: Expected },
	Unexpected { token: Token, expected: Expected },
	/// More `@` parameters than attributes for the entity kind.
	TooManyParameters { kind: EntityKind, pos: SourcePos },
	/// A `&{` without the closing brace, inside a quoted string.
	UnclosedInterpolation { pos: SourcePos },
	/// Bytes that no token starts with.
	UnexpectedCharacter { pos: SourcePos },
	/// The token stream ended with a lexical error.
	Lexer(lexer::Error),
}


impl Error {
	pub fn unexpected(token: Token, expected: TokenKind) -> Self {
		Self::Unexpected { token, expected: Expected::Token(expected) }
	}


	pub fn unexpected_msg(token: Token, message: &'static str) -> Self {
		Self::Unexpected { token, expected: Expected::Message(message) }
	}


	/// The range of the line where the error occurred.
	pub fn pos(&self) -> SourcePos {
		match self {
			Self::UnexpectedEnd { offset, .. } => SourcePos::new(*offset, *offset),
			Self::Unexpected { token, .. } => SourcePos::new(token.offset, token.end()),
			Self::TooManyParameters { pos, .. } => *pos,
			Self::UnclosedInterpolation { pos } => *pos,
			Self::UnexpectedCharacter { pos } => *pos,
			Self::Lexer(error) => SourcePos::new(error.offset, error.end),
		}
	}
}


impl<'a> Display<'a> for Expected {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Token(token) => write!(f, "'{}'", fmt::Show(token, context)),
			Self::Message(message) => f.write_str(message),
		}
	}
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::UnexpectedEnd { expected, .. } => {
				f.write_str("unexpected end of command, expected ")?;
				expected.fmt(f, context)
			}

			Self::Unexpected { token, expected } => {
				write!(f, "unexpected {}, expected ", token)?;
				expected.fmt(f, context)
			}

			Self::TooManyParameters { kind, .. } => write!(
				f,
				"too many parameters for {}, expected at most {}",
				kind,
				kind.positional_attributes().len()
			),

			Self::UnclosedInterpolation { .. } => f.write_str("unclosed interpolation, } expected"),

			Self::UnexpectedCharacter { .. } => f.write_str("unexpected character"),

			Self::Lexer(error) => write!(f, "{}", error),
		}
	}
}


/// We need this in order to be able to implement std::error::Error.
impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		Display::fmt(self, f, &symbol::Interner::new())
	}
}


impl std::error::Error for Error {}
