use super::{word::IsWord, ErrorKind, SymbolInterner, TokenKind, Transition};


#[derive(Debug, PartialEq)]
enum State {
	Start,
	Dollar,
	Open,
	Name,
	Trailing,
	Closed,
}


impl Default for State {
	fn default() -> Self {
		Self::Start
	}
}


/// The automaton for variable dereferences: `${name}`, allowing inner whitespace.
#[derive(Debug, Default)]
pub(super) struct Dereference {
	state: State,
}


impl Dereference {
	pub fn visit(&mut self, input: Option<u8>) -> Transition {
		let is_space = |c: u8| c == b' ' || c == b'\t';

		match (&self.state, input) {
			(State::Start, Some(b'$')) => self.transition(State::Dollar),
			(State::Start, _) => Transition::Stuck,

			(State::Dollar, Some(b'{')) => self.transition(State::Open),
			(State::Dollar, _) => Transition::Error(ErrorKind::OpenBraceExpected),

			(State::Open, Some(c)) if is_space(c) => Transition::Step,
			(State::Open, Some(c)) if c.is_ascii_alphabetic() => self.transition(State::Name),
			(State::Open, _) => Transition::Error(ErrorKind::LetterExpected),

			(State::Name, Some(c)) if c.is_word() => Transition::Step,
			(State::Name, Some(c)) if is_space(c) => self.transition(State::Trailing),
			(State::Name, Some(b'}')) | (State::Trailing, Some(b'}')) => {
				self.transition(State::Closed)
			}
			(State::Trailing, Some(c)) if is_space(c) => Transition::Step,
			(State::Name, _) | (State::Trailing, _) => {
				Transition::Error(ErrorKind::CloseBraceExpected)
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


/// Run the automaton over a complete `${ name }` lexeme, yielding the lexical error it
/// would produce.
pub fn validate(lexeme: &str) -> Result<(), ErrorKind> {
	let mut automaton = Dereference::default();

	for &byte in lexeme.as_bytes() {
		match automaton.visit(Some(byte)) {
			Transition::Step => (),
			Transition::Error(error) => return Err(error),
			Transition::Stuck => return Err(ErrorKind::CloseBraceExpected),
		}
	}

	if automaton.accepting() {
		Ok(())
	} else {
		Err(ErrorKind::CloseBraceExpected)
	}
}


/// Extract the trimmed name from a `${ name }` lexeme.
pub fn name(lexeme: &str) -> &str {
	lexeme
		.trim_start_matches('$')
		.trim_start_matches('{')
		.trim_end_matches('}')
		.trim()
}


pub fn produce(lexeme: &str, interner: &mut SymbolInterner) -> TokenKind {
	TokenKind::Dereference(interner.get_or_intern(name(lexeme)))
}
