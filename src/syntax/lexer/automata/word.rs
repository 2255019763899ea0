use super::{SymbolInterner, TokenKind, Transition};


/// The automaton for identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug, Default)]
pub(super) struct Word {
	consumed: bool,
}


impl Word {
	pub fn visit(&mut self, input: Option<u8>) -> Transition {
		match input {
			Some(c) if !self.consumed && c.is_word_start() => {
				self.consumed = true;
				Transition::Step
			}

			Some(c) if self.consumed && c.is_word() => Transition::Step,

			_ => Transition::Stuck,
		}
	}


	pub fn accepting(&self) -> bool {
		self.consumed
	}


	pub fn reset(&mut self) {
		self.consumed = false;
	}
}


pub fn produce(word: &str, interner: &mut SymbolInterner) -> TokenKind {
	TokenKind::Identifier(interner.get_or_intern(word))
}


/// Helper trait for checking if a character is a valid word constituent.
pub trait IsWord {
	fn is_word_start(&self) -> bool;
	fn is_word(&self) -> bool;
}


impl IsWord for u8 {
	fn is_word_start(&self) -> bool {
		self.is_ascii_alphabetic() || *self == b'_'
	}

	fn is_word(&self) -> bool {
		self.is_ascii_alphanumeric() || *self == b'_'
	}
}
