pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod source;

use crate::symbol;
pub use parser::Error;
pub use source::{Line, Source, SourcePos};


/// Syntactical analysis of a logical line.
#[derive(Debug)]
pub struct Analysis {
	/// The produced block, with ill-formed statements where there were errors.
	pub block: ast::Block,
	/// Syntax errors. A line with errors must not be executed.
	pub errors: Box<[Error]>,
}


impl Analysis {
	/// Perform syntax analysis in the given line.
	pub fn analyze(line: &str, interner: &mut symbol::Interner) -> Self {
		let (block, errors) = parser::Parser::new(interner).parse(line);

		Analysis {
			block,
			errors: errors.into(),
		}
	}


	pub fn is_ok(&self) -> bool {
		self.errors.is_empty()
	}
}
