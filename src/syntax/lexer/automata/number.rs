use super::{ErrorKind, Literal, TokenKind, Transition};


/// The automaton for integer literals: `[0-9]+`.
#[derive(Debug, Default)]
pub(super) struct IntLiteral {
	digits: usize,
}


impl IntLiteral {
	pub fn visit(&mut self, input: Option<u8>) -> Transition {
		match input {
			Some(c) if c.is_ascii_digit() => {
				self.digits += 1;
				Transition::Step
			}

			_ => Transition::Stuck,
		}
	}


	pub fn accepting(&self) -> bool {
		self.digits > 0
	}


	pub fn reset(&mut self) {
		self.digits = 0;
	}
}


/// The automaton for float literals: `[0-9]+\.[0-9]+`.
/// A trailing dot is not accepted, so that `1..3` lexes as a range.
#[derive(Debug, Default)]
pub(super) struct FloatLiteral {
	integral: usize,
	dot: bool,
	fractional: usize,
}


impl FloatLiteral {
	pub fn visit(&mut self, input: Option<u8>) -> Transition {
		match (input, self.dot) {
			(Some(c), false) if c.is_ascii_digit() => {
				self.integral += 1;
				Transition::Step
			}

			(Some(b'.'), false) if self.integral > 0 => {
				self.dot = true;
				Transition::Step
			}

			(Some(c), true) if c.is_ascii_digit() => {
				self.fractional += 1;
				Transition::Step
			}

			_ => Transition::Stuck,
		}
	}


	pub fn accepting(&self) -> bool {
		self.dot && self.fractional > 0
	}


	pub fn reset(&mut self) {
		*self = Self::default();
	}
}


pub fn produce_int(number: &str) -> Result<TokenKind, ErrorKind> {
	number
		.parse()
		.map(|int| TokenKind::Literal(Literal::Int(int)))
		.map_err(|_| ErrorKind::InvalidNumber(number.into()))
}


pub fn produce_float(number: &str) -> Result<TokenKind, ErrorKind> {
	number
		.parse()
		.map(|float| TokenKind::Literal(Literal::Float(float)))
		.map_err(|_| ErrorKind::InvalidNumber(number.into()))
}
