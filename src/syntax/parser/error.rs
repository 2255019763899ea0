use std::fmt::{self, Display};

use super::{source, Frame, SourcePos};


/// A parsing context: a range of the line and what went wrong, or what was being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
	pub pos: SourcePos,
	pub message: Box<str>,
}


/// A parser error, carrying the stack of parsing contexts.
/// Contexts are stored innermost first, and displayed outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
	line: Box<str>,
	contexts: Vec<Context>,
	/// The input can't be taken as unquoted text either.
	fatal: bool,
}


impl Error {
	pub fn new<M: Into<Box<str>>>(frame: Frame, message: M) -> Self {
		Self {
			line: frame.buffer().into(),
			contexts: vec![Context { pos: frame.pos(), message: message.into() }],
			fatal: false,
		}
	}


	/// Mark the error as one that no fallback may recover from.
	pub fn fatal(mut self) -> Self {
		self.fatal = true;
		self
	}


	pub fn is_fatal(&self) -> bool {
		self.fatal
	}


	/// Wrap the error in an outer context.
	pub fn extend<M: Into<Box<str>>>(mut self, frame: Frame, message: M) -> Self {
		self.contexts.push(Context { pos: frame.pos(), message: message.into() });
		self
	}


	/// Wrap the error in an outer context over the same range as the current outermost.
	pub fn extend_message<M: Into<Box<str>>>(mut self, message: M) -> Self {
		let pos = self.contexts
			.last()
			.map(|context| context.pos)
			.unwrap_or_default();

		self.contexts.push(Context { pos, message: message.into() });
		self
	}


	/// The root cause.
	pub fn message(&self) -> &str {
		self.contexts
			.first()
			.map(|context| context.message.as_ref())
			.unwrap_or_default()
	}


	/// The contexts, innermost first.
	pub fn contexts(&self) -> &[Context] {
		&self.contexts
	}


	pub fn line(&self) -> &str {
		&self.line
	}
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (ix, context) in self.contexts.iter().rev().enumerate() {
			if ix > 0 {
				f.write_str("\n\n")?;
			}

			source::highlight(f, &self.line, context.pos)?;
			write!(f, "\n{}", context.message)?;
		}

		Ok(())
	}
}


impl std::error::Error for Error {}
