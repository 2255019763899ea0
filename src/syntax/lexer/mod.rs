mod automata;
mod cursor;
mod error;
mod token;

use crate::symbol;
use automata::Automata;
pub use cursor::Cursor;
pub use error::{Error, ErrorKind};
pub use token::{Keyword, Literal, Operator, Token, TokenKind};


/// The tokenizer.
/// Every lexical class and every keyword is recognized by its own automaton. The automata
/// run in lock-step over the input, and the longest match wins, ties going to the
/// earliest registered automaton. Bytes that no automaton recognizes are skipped.
/// The first lexical error ends the token stream.
#[derive(Debug)]
pub struct Lexer<'a, 'b>(Automata<'a, 'b>);


impl<'a, 'b> Lexer<'a, 'b> {
	pub fn new(cursor: Cursor<'a>, interner: &'b mut symbol::Interner) -> Self {
		Self(Automata::new(cursor, interner))
	}
}


impl<'a, 'b> Iterator for Lexer<'a, 'b> {
	type Item = Result<Token, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next()
	}
}


/// Check a `${ name }` reference with the same rules as the lexer. A leading `&` is
/// accepted in place of the dollar.
pub fn validate_dereference(reference: &str) -> Result<(), ErrorKind> {
	match reference.strip_prefix('&') {
		Some(rest) => automata::validate_dereference(&format!("${}", rest)),
		None => automata::validate_dereference(reference),
	}
}


/// Unescape the contents of a quoted string lexeme.
pub fn unescape(lexeme: &str) -> String {
	automata::unescape(lexeme)
}
