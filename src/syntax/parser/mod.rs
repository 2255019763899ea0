//! The frame parser. It works on windows over the source line rather than on a token
//! stream: statements, blocks, control flow and the per-command grammars are recognized
//! here, while expressions and the shorthand commands are delegated to the grammar parser.

mod args;
mod command;
mod control;
mod error;
mod frame;
mod scan;
pub(in crate::syntax) mod string;
#[cfg(test)]
mod tests;

use super::{ast, grammar, lexer, source, SourcePos};
use crate::{fmt::FmtString, symbol};
pub use command::{manual, CommandSpec, Invocation, Syntax};
pub use error::{Context, Error};
pub use frame::Frame;


/// Bytes that may be part of a name.
fn is_word_byte(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_'
}


/// Length of the identifier at the start of the text, if any.
fn identifier_len(text: &str) -> Option<usize> {
	let bytes = text.as_bytes();

	match bytes.first() {
		Some(c) if c.is_ascii_alphabetic() || *c == b'_' => (),
		_ => return None,
	}

	Some(
		bytes
			.iter()
			.position(|&c| !is_word_byte(c))
			.unwrap_or(bytes.len())
	)
}


/// Whether the text is a valid variable or function name.
fn is_identifier(text: &str) -> bool {
	identifier_len(text) == Some(text.len())
}


/// The parser state for a logical line.
#[derive(Debug)]
pub struct Parser<'i> {
	interner: &'i mut symbol::Interner,
	/// Errors from statements that were skipped, and extra errors from shorthand commands.
	errors: Vec<Error>,
}


impl<'i> Parser<'i> {
	pub fn new(interner: &'i mut symbol::Interner) -> Self {
		Self { interner, errors: Vec::new() }
	}


	/// Parse a logical line. Statements are separated by top level semicolons, and a
	/// statement that fails to parse doesn't prevent parsing the following ones.
	pub fn parse(mut self, line: &str) -> (ast::Block, Vec<Error>) {
		let frame = Frame::whole(line);
		let mut statements = Vec::new();

		for piece in scan::split_top_level(frame, b';') {
			match self.parse_statement(piece) {
				Ok(Some(statement)) => statements.push(statement),
				Ok(None) => (),
				Err(error) => {
					self.errors.push(error);
					statements.push(ast::Statement::IllFormed);
				}
			}
		}

		// Shorthand errors beyond the first are pushed as found, so restore line order.
		self.errors.sort_by_key(|error| error.contexts().first().map(|context| context.pos));

		(statements.into(), self.errors)
	}


	/// Parse the statements of a block body. The first error aborts the block.
	fn parse_block(&mut self, frame: Frame) -> Result<ast::Block, Error> {
		let mut statements = Vec::new();

		for piece in scan::split_top_level(frame, b';') {
			if let Some(statement) = self.parse_statement(piece)? {
				statements.push(statement);
			}
		}

		Ok(statements.into())
	}


	/// Parse a single statement, dispatching on its leading text.
	/// Returns None for empty statements.
	fn parse_statement(&mut self, frame: Frame) -> Result<Option<ast::Statement>, Error> {
		let frame = frame.trim();

		if frame.is_empty() {
			return Ok(None);
		}

		if let Some(statement) = self.parse_control(frame)? {
			return Ok(Some(statement));
		}

		if matches!(frame.first(), Some(b'+') | Some(b'-') | Some(b'=')) {
			return self.parse_shorthand(frame).map(Some);
		}

		if let Some(statement) = self.parse_function(frame)? {
			return Ok(Some(statement));
		}

		if let Some(spec) = command::find(frame.text()) {
			let invocation = Invocation {
				frame,
				args: frame.from(frame.start() + spec.name.len()).trim(),
			};

			tracing::debug!(command = spec.name, "dispatching");

			let statement = match spec.syntax {
				Syntax::NoArgs(command) if invocation.args.is_empty() => Ok(
					ast::Statement::Command { command: command(), pos: frame.pos() }
				),

				Syntax::NoArgs(_) => Err(Error::new(invocation.args, "no argument expected")),

				Syntax::Args(parse) => parse(self, invocation),
			};

			return statement
				.map(Some)
				.map_err(|error| error.extend(frame, format!("parsing {} command", spec.name)));
		}

		let (word, _) = frame.split_word();

		if word.text().contains(':') {
			return self.parse_shorthand(frame).map(Some);
		}

		Err(Error::new(word, "command not processed"))
	}


	/// Function declarations `name() { body }` and calls `name()`.
	fn parse_function(&mut self, frame: Frame) -> Result<Option<ast::Statement>, Error> {
		let name_len = match identifier_len(frame.text()) {
			Some(len) => len,
			None => return Ok(None),
		};

		let name = frame.until(frame.start() + name_len);

		if command::lookup(name.text()).is_some() {
			return Ok(None);
		}

		let rest = frame.from(name.end()).trim();

		if !rest.starts_with("(") {
			return Ok(None);
		}

		let params = rest.from(rest.start() + 1).trim();

		if !params.starts_with(")") {
			return Ok(None);
		}

		let rest = params.from(params.start() + 1).trim();
		let symbol = self.interner.get_or_intern(name.text());

		if rest.is_empty() {
			return Ok(Some(ast::Statement::FunctionCall { name: symbol, pos: frame.pos() }));
		}

		let body = self
			.parse_body(rest)
			.map_err(|error| error.extend(frame, "parsing function declaration"))?;

		Ok(
			Some(ast::Statement::FunctionDecl {
				name: symbol,
				body: body.into(),
				pos: frame.pos(),
			})
		)
	}


	/// Parse a frame holding exactly a braced block.
	fn parse_body(&mut self, frame: Frame) -> Result<ast::Block, Error> {
		let (before, block, after) = self.parse_braced(frame)?;

		if !before.trim().is_empty() {
			return Err(Error::new(before.trim(), "unexpected text before block"));
		}

		if !after.trim().is_empty() {
			return Err(Error::new(after.trim(), "unexpected text after block"));
		}

		Ok(block)
	}


	/// Find and parse the first braced block of the frame. Returns the text before the
	/// block, the block, and the text after it.
	fn parse_braced<'a>(
		&mut self,
		frame: Frame<'a>,
	) -> Result<(Frame<'a>, ast::Block, Frame<'a>), Error> {
		let open = scan::find_block_open(frame)
			.ok_or_else(|| Error::new(frame.empty(frame.end()), "{ expected"))?;

		let close = scan::matching_close(frame, open)
			.filter(|&close| frame.at(close) == Some(b'}'))
			.ok_or_else(|| Error::new(frame.from(open), "} expected"))?;

		let block = self
			.parse_block(frame.new(open + 1, close))
			.map_err(|error| error.extend(frame.new(open, close + 1), "parsing block"))?;

		Ok((frame.until(open), block, frame.from(close + 1)))
	}


	/// Parse an expression that must span the whole frame.
	fn parse_expression(&mut self, frame: Frame) -> Result<ast::Expr, Error> {
		let frame = frame.trim();

		if frame.is_empty() {
			return Err(Error::new(frame, "expression expected"));
		}

		let (expr, offset) = grammar::parse_expression(frame.cursor(), self.interner)
			.map_err(
				|error| {
					// Unrecognized characters rule out the text fallback.
					let fatal = matches!(error, grammar::Error::UnexpectedCharacter { .. });
					let error = self.grammar_error(frame, error);

					if fatal { error.fatal() } else { error }
				}
			)?;

		let rest = frame.from(offset).trim();

		if !rest.is_empty() {
			return Err(Error::new(rest, "unexpected text after expression"));
		}

		Ok(expr)
	}


	/// Parse a value that may be either an expression or unquoted text, like the operand
	/// of `print`. Broken quoted strings are reported rather than taken as text.
	fn parse_expression_or_string(&mut self, frame: Frame) -> Result<ast::Expr, Error> {
		let frame = frame.trim();

		match self.parse_expression(frame) {
			Ok(expr) => Ok(expr),
			Err(error) if frame.starts_with("\"") || error.is_fatal() => Err(error),
			Err(_) => string::parse(frame, self.interner),
		}
	}


	/// Parse a path operand: a single word, or a quoted string.
	fn parse_path(&mut self, frame: Frame, mode: ast::PathMode) -> Result<ast::Expr, Error> {
		let frame = frame.trim();

		if frame.is_empty() {
			return Err(Error::new(frame, "path expected"));
		}

		let (word, rest) = if frame.starts_with("\"") {
			(frame, frame.empty(frame.end()))
		} else {
			frame.split_word()
		};

		if !rest.is_empty() {
			return Err(Error::new(rest, "unexpected text after path"));
		}

		string::parse(word, self.interner)
			.map(|path| path.into_path(mode))
			.map_err(|error| error.extend(word, "parsing path"))
	}


	/// Parse an optional path operand.
	fn parse_optional_path(&mut self, frame: Frame) -> Result<Option<ast::Expr>, Error> {
		if frame.trim().is_empty() {
			Ok(None)
		} else {
			self.parse_path(frame, ast::PathMode::Std).map(Some)
		}
	}


	/// Parse a variable or function name.
	fn parse_name(&mut self, frame: Frame) -> Result<ast::Symbol, Error> {
		let frame = frame.trim();

		if frame.is_empty() {
			return Err(Error::new(frame, "name expected"));
		}

		if !is_identifier(frame.text()) {
			return Err(Error::new(frame, "invalid name"));
		}

		Ok(self.interner.get_or_intern(frame.text()))
	}


	/// Delegate a shorthand statement to the grammar parser. The first error is returned,
	/// and the following ones are kept in the parser.
	fn parse_shorthand(&mut self, frame: Frame) -> Result<ast::Statement, Error> {
		let mut errors = Vec::new();

		let block = grammar::parse_shorthand(
			frame.cursor(),
			self.interner,
			|error: grammar::Error| errors.push(error),
		);

		let mut errors = errors
			.into_iter()
			.map(|error| self.grammar_error(frame, error));

		if let Some(first) = errors.next() {
			let rest: Vec<_> = errors.collect();
			self.errors.extend(rest);
			return Err(first);
		}

		let mut statements = block.0.into_vec();

		Ok(
			if statements.len() == 1 {
				statements.pop().unwrap_or(ast::Statement::IllFormed)
			} else {
				ast::Statement::Block(statements.into())
			}
		)
	}


	/// Convert an error from the grammar parser, which carries absolute offsets.
	fn grammar_error(&self, frame: Frame, error: grammar::Error) -> Error {
		let pos = error.pos();
		let message = error.fmt_string(&*self.interner);

		Error::new(frame.new(pos.start, pos.end), message)
	}
}
