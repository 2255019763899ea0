use super::{TokenKind, Transition};


/// The automaton for a fixed lexeme, like keywords and symbols.
#[derive(Debug)]
pub(super) struct Exact {
	text: &'static [u8],
	token: TokenKind,
	matched: usize,
}


impl Exact {
	pub fn new(text: &'static str, token: TokenKind) -> Self {
		Self { text: text.as_bytes(), token, matched: 0 }
	}


	pub fn visit(&mut self, input: Option<u8>) -> Transition {
		match input {
			Some(c) if self.text.get(self.matched) == Some(&c) => {
				self.matched += 1;
				Transition::Step
			}

			_ => Transition::Stuck,
		}
	}


	pub fn accepting(&self) -> bool {
		self.matched == self.text.len()
	}


	pub fn reset(&mut self) {
		self.matched = 0;
	}


	pub fn produce(&self) -> TokenKind {
		self.token.clone()
	}
}
