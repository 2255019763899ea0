//! Recursive descent parser over the token stream. It hosts the expression grammar and the
//! shorthand command grammar (`+rk:path@param`, `-path`, `=path`, `path:attr=value`).

mod error;
mod expr;
mod shorthand;
mod sync;
#[cfg(test)]
mod tests;

use std::{iter::Peekable, vec};

use super::{
	ast,
	lexer::{self, Cursor, Lexer, Token, TokenKind},
	SourcePos,
};
use crate::{entity::EntityKind, symbol};
pub use error::{Error, Expected};
use sync::{ResultExt, Strategy, Synchronizable};


/// The parser may report multiple errors before finishing. Instead of allocating those in
/// a vector, we delegate such handling to the caller.
pub trait ErrorReporter {
	fn report(&mut self, error: Error);
}


impl<F> ErrorReporter for F
where
	F: FnMut(Error),
{
	fn report(&mut self, error: Error) {
		self(error)
	}
}


/// Parse an expression at the start of the window.
/// Parsing stops before the first token that can't continue the expression, and its offset
/// is returned along with the expression. When the whole window is consumed, the offset is
/// the end of the window.
pub fn parse_expression(
	cursor: Cursor,
	interner: &mut symbol::Interner,
) -> Result<(ast::Expr, usize), Error> {
	let mut parser = Parser::new(cursor, interner, |_: Error| ());

	let expr = parser.parse_expression()?;

	if let (None, Some(error)) = (&parser.token, parser.lexical.take()) {
		return Err(Error::Lexer(error));
	}

	if let Some(pos) = parser.skipped_before(parser.offset()) {
		return Err(Error::UnexpectedCharacter { pos });
	}

	Ok((expr, parser.offset()))
}


/// Parse a sequence of shorthand commands, separated by semicolons.
/// Errors are reported, and the parser synchronizes at the next semicolon.
pub fn parse_shorthand<E>(
	cursor: Cursor,
	interner: &mut symbol::Interner,
	error_reporter: E,
) -> ast::Block
where
	E: ErrorReporter,
{
	Parser::new(cursor, interner, error_reporter).parse_shorthand()
}


/// The parser state.
#[derive(Debug)]
struct Parser<'i, E> {
	cursor: Peekable<vec::IntoIter<Token>>,
	token: Option<Token>,
	/// End offset of the last consumed token.
	prev_end: usize,
	/// End of the window.
	end: usize,
	/// The lexical error that ended the token stream, if any.
	lexical: Option<lexer::Error>,
	/// Non blank runs of bytes that no automaton recognized, in order.
	skipped: Vec<SourcePos>,
	interner: &'i mut symbol::Interner,
	error_reporter: E,
}


impl<'i, E> Parser<'i, E>
where
	E: ErrorReporter,
{
	fn new(cursor: Cursor, interner: &'i mut symbol::Interner, error_reporter: E) -> Self {
		let start = cursor.offset();
		let end = cursor.end();
		let window = cursor.clone();

		let mut tokens = Vec::new();
		let mut lexical = None;

		for result in Lexer::new(cursor, interner) {
			match result {
				Ok(token) => tokens.push(token),
				Err(error) => lexical = Some(error),
			}
		}

		let skipped = skipped_runs(&window, &tokens, lexical.is_none());

		let mut cursor = tokens.into_iter().peekable();
		let token = cursor.next();

		Self {
			cursor,
			token,
			prev_end: start,
			end,
			lexical,
			skipped,
			interner,
			error_reporter,
		}
	}


	/// Step the cursor, placing the next token on self.token.
	fn step(&mut self) {
		self.token = self.cursor.next();
	}


	/// Consume the current token.
	fn bump(&mut self) -> Option<Token> {
		let token = self.token.take();

		if let Some(token) = &token {
			self.prev_end = token.end();
		}

		self.step();

		token
	}


	/// Try and eat a token.
	fn eat<F, T>(&mut self, eat: F) -> Result<T, Error>
	where
		F: FnOnce(Token) -> Result<T, (Error, Token)>,
	{
		if let Some(token) = self.token.take() {
			let end = token.end();

			match eat(token) {
				Ok(value) => {
					// Token successfully consumed.
					self.prev_end = end;
					self.step();
					Ok(value)
				}

				Err((error, token)) => {
					// Fail, rollback the token and produce an error.
					self.token = Some(token);
					Err(error)
				}
			}
		} else {
			Err(self.end_error(Expected::Message("more input")))
		}
	}


	/// Consume the expected token, or produce an error.
	fn expect(&mut self, expected: TokenKind) -> Result<Token, Error> {
		match self.token.take() {
			Some(token) if token.kind == expected => {
				self.prev_end = token.end();
				self.step();
				Ok(token)
			}

			Some(token) => {
				self.token = Some(token.clone());
				Err(Error::unexpected(token, expected))
			}

			None => Err(self.end_error(Expected::Token(expected))),
		}
	}


	/// The error for premature end of input. If the token stream was ended by a lexical
	/// error, that error is the cause.
	fn end_error(&self, expected: Expected) -> Error {
		match &self.lexical {
			Some(error) => Error::Lexer(error.clone()),
			None => Error::UnexpectedEnd { offset: self.end, expected },
		}
	}


	/// Check the kind of the current token.
	fn is(&self, kind: &TokenKind) -> bool {
		matches!(&self.token, Some(token) if &token.kind == kind)
	}


	/// The first run of skipped bytes that starts before the given offset.
	fn skipped_before(&self, offset: usize) -> Option<SourcePos> {
		self.skipped
			.iter()
			.copied()
			.find(|pos| pos.start < offset)
	}


	/// The offset of the current token, or the end of the window.
	fn offset(&self) -> usize {
		self.token
			.as_ref()
			.map_or(self.end, |token| token.offset)
	}
}


impl<'i, E> Synchronizable<Error> for Parser<'i, E>
where
	E: ErrorReporter,
{
	fn synchronize(&mut self, error: Error, mut sync: Strategy) {
		tracing::warn!(offset = error.pos().start, "unrecognized command");

		self.error_reporter.report(error);

		while let Some(token) = &self.token {
			if sync.synchronized(&token.kind) {
				break;
			}

			self.bump();
		}
	}
}


/// Find the bytes the lexer skipped: anything but whitespace between tokens. The tail after
/// the last token is only checked when the stream was not ended by a lexical error.
fn skipped_runs(window: &Cursor, tokens: &[Token], complete: bool) -> Vec<SourcePos> {
	let mut gaps: Vec<(usize, usize)> = Vec::with_capacity(tokens.len() + 1);
	let mut prev_end = window.offset();

	for token in tokens {
		gaps.push((prev_end, token.offset));
		prev_end = token.end();
	}

	if complete {
		gaps.push((prev_end, window.end()));
	}

	gaps
		.into_iter()
		.filter_map(
			|(start, end)| {
				let gap = window.slice(start, end);
				let first = gap.find(|c: char| !c.is_whitespace())?;
				let last = gap.rfind(|c: char| !c.is_whitespace())?;
				let width = gap[last ..].chars().next().map_or(1, char::len_utf8);

				Some(SourcePos::new(start + first, start + last + width))
			}
		)
		.collect()
}
