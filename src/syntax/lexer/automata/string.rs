use super::{ErrorKind, Literal, TokenKind, Transition};


#[derive(Debug, PartialEq)]
enum State {
	Start,
	Body,
	Escape,
	Closed,
}


impl Default for State {
	fn default() -> Self {
		Self::Start
	}
}


/// The automaton for double quoted string literals.
#[derive(Debug, Default)]
pub(super) struct StringLiteral {
	state: State,
}


impl StringLiteral {
	pub fn visit(&mut self, input: Option<u8>) -> Transition {
		match (&self.state, input) {
			(State::Start, Some(b'"')) => self.transition(State::Body),
			(State::Start, _) => Transition::Stuck,

			(State::Body, Some(b'\\')) => self.transition(State::Escape),
			(State::Body, Some(b'"')) => self.transition(State::Closed),
			(State::Body, Some(_)) => Transition::Step,

			(State::Escape, Some(_)) => self.transition(State::Body),

			(State::Body, None) | (State::Escape, None) => {
				Transition::Error(ErrorKind::UnterminatedString)
			}

			(State::Closed, _) => Transition::Stuck,
		}
	}


	fn transition(&mut self, state: State) -> Transition {
		self.state = state;
		Transition::Step
	}


	pub fn accepting(&self) -> bool {
		self.state == State::Closed
	}


	pub fn reset(&mut self) {
		self.state = State::Start;
	}
}


/// Process the escape sequences of a quoted lexeme, removing the quotes.
pub fn unescape(lexeme: &str) -> String {
	let inner = lexeme
		.strip_prefix('"')
		.and_then(|lexeme| lexeme.strip_suffix('"'))
		.unwrap_or(lexeme);

	let mut string = String::with_capacity(inner.len());
	let mut chars = inner.chars();

	while let Some(c) = chars.next() {
		if c != '\\' {
			string.push(c);
			continue;
		}

		match chars.next() {
			Some('n') => string.push('\n'),
			Some('t') => string.push('\t'),
			Some('"') => string.push('"'),
			Some('\\') => string.push('\\'),
			// Unknown escapes are kept verbatim.
			Some(other) => {
				string.push('\\');
				string.push(other);
			}
			None => string.push('\\'),
		}
	}

	string
}


pub fn produce(lexeme: &str) -> TokenKind {
	TokenKind::Literal(Literal::String(unescape(lexeme).into()))
}
