mod dereference;
mod exact;
mod number;
mod string;
mod word;

pub(super) use self::string::unescape;
pub(super) use self::dereference::validate as validate_dereference;
use self::{
	dereference::Dereference,
	exact::Exact,
	number::{FloatLiteral, IntLiteral},
	string::StringLiteral,
	word::Word,
};
use super::{
	Cursor,
	Error,
	ErrorKind,
	Keyword,
	Literal,
	Operator,
	Token,
	TokenKind,
};
use crate::{entity::EntityKind, symbol::Interner as SymbolInterner};


/// The automata may produce a token, or an error.
type Output = Result<Token, Error>;


/// The transition of a single automaton after visiting an input character.
#[derive(Debug, PartialEq)]
enum Transition {
	/// The character was consumed.
	Step,
	/// The character can't be consumed. The automaton may still have accepted a prefix.
	Stuck,
	/// The consumed input can't be a prefix of any lexeme of this class.
	Error(ErrorKind),
}


/// All automata, one per lexical class or keyword.
#[derive(Debug)]
enum Machine {
	Exact(Exact),
	Word(Word),
	Int(IntLiteral),
	Float(FloatLiteral),
	String(StringLiteral),
	Dereference(Dereference),
}


impl Machine {
	fn visit(&mut self, input: Option<u8>) -> Transition {
		match self {
			Self::Exact(machine) => machine.visit(input),
			Self::Word(machine) => machine.visit(input),
			Self::Int(machine) => machine.visit(input),
			Self::Float(machine) => machine.visit(input),
			Self::String(machine) => machine.visit(input),
			Self::Dereference(machine) => machine.visit(input),
		}
	}


	fn accepting(&self) -> bool {
		match self {
			Self::Exact(machine) => machine.accepting(),
			Self::Word(machine) => machine.accepting(),
			Self::Int(machine) => machine.accepting(),
			Self::Float(machine) => machine.accepting(),
			Self::String(machine) => machine.accepting(),
			Self::Dereference(machine) => machine.accepting(),
		}
	}


	fn reset(&mut self) {
		match self {
			Self::Exact(machine) => machine.reset(),
			Self::Word(machine) => machine.reset(),
			Self::Int(machine) => machine.reset(),
			Self::Float(machine) => machine.reset(),
			Self::String(machine) => machine.reset(),
			Self::Dereference(machine) => machine.reset(),
		}
	}


	/// Build the token kind for an accepted lexeme.
	fn produce(&self, lexeme: &str, interner: &mut SymbolInterner) -> Result<TokenKind, ErrorKind> {
		match self {
			Self::Exact(machine) => Ok(machine.produce()),
			Self::Word(_) => Ok(word::produce(lexeme, interner)),
			Self::Int(_) => number::produce_int(lexeme),
			Self::Float(_) => number::produce_float(lexeme),
			Self::String(_) => Ok(string::produce(lexeme)),
			Self::Dereference(_) => Ok(dereference::produce(lexeme, interner)),
		}
	}
}


/// Build the machines in registration order, which is the tie-breaking priority.
fn machines() -> Vec<Machine> {
	let mut machines = Vec::new();

	let mut exact = |text: &'static str, token: TokenKind| {
		machines.push(Machine::Exact(Exact::new(text, token)))
	};

	for keyword in Keyword::ALL.iter() {
		exact(keyword.as_str(), TokenKind::Keyword(*keyword));
	}

	for kind in EntityKind::ALL.iter() {
		exact(kind.name(), TokenKind::Entity(*kind));
		exact(kind.code(), TokenKind::Entity(*kind));
		exact(kind.list_alias(), TokenKind::EntityList(*kind));
	}

	exact("true", TokenKind::Literal(Literal::Bool(true)));
	exact("false", TokenKind::Literal(Literal::Bool(false)));

	machines.push(Machine::Word(Word::default()));
	machines.push(Machine::Int(IntLiteral::default()));
	machines.push(Machine::Float(FloatLiteral::default()));
	machines.push(Machine::String(StringLiteral::default()));
	machines.push(Machine::Dereference(Dereference::default()));

	let mut exact = |text: &'static str, token: TokenKind| {
		machines.push(Machine::Exact(Exact::new(text, token)))
	};
	let operator = |op| TokenKind::Operator(op);

	exact("+", operator(Operator::Plus));
	exact("-", operator(Operator::Minus));
	exact("*", operator(Operator::Times));
	exact("/", operator(Operator::Div));
	exact("%", operator(Operator::Mod));
	exact("==", operator(Operator::Equals));
	exact("!=", operator(Operator::NotEquals));
	exact(">", operator(Operator::Greater));
	exact(">=", operator(Operator::GreaterEquals));
	exact("<", operator(Operator::Lower));
	exact("<=", operator(Operator::LowerEquals));
	exact("!", operator(Operator::Not));
	exact("&&", operator(Operator::And));
	exact("||", operator(Operator::Or));
	exact("=", operator(Operator::Assign));
	exact(".", operator(Operator::Dot));
	exact("..", operator(Operator::DoubleDot));
	exact(":", TokenKind::Colon);
	exact(",", TokenKind::Comma);
	exact(";", TokenKind::Semicolon);
	exact("@", TokenKind::At);
	exact("(", TokenKind::OpenParens);
	exact(")", TokenKind::CloseParens);
	exact("[", TokenKind::OpenBracket);
	exact("]", TokenKind::CloseBracket);
	exact("{", TokenKind::OpenBrace);
	exact("}", TokenKind::CloseBrace);

	machines
}


/// The best candidate found while running the machines in lock-step.
#[derive(Debug, Default)]
struct Candidates {
	/// Length and machine index of the longest accepted lexeme.
	accepted: Option<(usize, usize)>,
	/// Length and kind of the longest failure.
	failed: Option<(usize, ErrorKind)>,
}


/// The automata instance.
#[derive(Debug)]
pub(super) struct Automata<'a, 'b> {
	machines: Vec<Machine>,
	/// Whether each machine can still advance in the current run.
	alive: Vec<bool>,
	cursor: Cursor<'a>,
	interner: &'b mut SymbolInterner,
	finished: bool,
}


impl<'a, 'b> Automata<'a, 'b> {
	pub fn new(cursor: Cursor<'a>, interner: &'b mut SymbolInterner) -> Self {
		let machines = machines();
		let alive = vec![true; machines.len()];

		Self { machines, alive, cursor, interner, finished: false }
	}


	/// Run all machines in lock-step from the given offset, until all of them are stuck.
	fn run(&mut self, start: usize) -> Candidates {
		for (machine, alive) in self.machines.iter_mut().zip(self.alive.iter_mut()) {
			machine.reset();
			*alive = true;
		}

		let mut candidates = Candidates::default();
		let mut offset = start;

		loop {
			let input = self.cursor.at(offset);
			let consumed = offset - start + 1;
			let mut advanced = false;

			for (machine, alive) in self.machines.iter_mut().zip(self.alive.iter_mut()) {
				if !*alive {
					continue;
				}

				match machine.visit(input) {
					Transition::Step => advanced = true,

					Transition::Stuck => *alive = false,

					Transition::Error(error) => {
						*alive = false;

						let longer = candidates.failed
							.as_ref()
							.map_or(true, |(len, _)| consumed > *len);

						if longer {
							candidates.failed = Some((consumed, error));
						}
					}
				}
			}

			if !advanced {
				break;
			}

			offset += 1;
			let len = offset - start;

			// Strictly longer matches only, so that the earliest machine wins ties.
			for (ix, (machine, alive)) in self.machines.iter().zip(self.alive.iter()).enumerate() {
				let longer = candidates.accepted.map_or(true, |(best, _)| len > best);

				if *alive && longer && machine.accepting() {
					candidates.accepted = Some((len, ix));
				}
			}
		}

		candidates
	}


	fn fail(&mut self, error: ErrorKind, offset: usize, len: usize) -> Option<Output> {
		self.finished = true;

		Some(Err(Error { error, offset, end: offset + len }))
	}
}


impl<'a, 'b> Iterator for Automata<'a, 'b> {
	type Item = Output;

	fn next(&mut self) -> Option<Output> {
		if self.finished {
			return None;
		}

		loop {
			self.cursor.skip_whitespace();

			if self.cursor.is_eof() {
				self.finished = true;
				return None;
			}

			let start = self.cursor.offset();

			match self.run(start) {
				// A failure that went further than any match ends the tokenization.
				Candidates { failed: Some((failed, error)), accepted }
					if accepted.map_or(true, |(len, _)| failed > len) => {
						return self.fail(error, start, failed);
					}

				Candidates { accepted: Some((len, ix)), .. } => {
					let lexeme = self.cursor.slice(start, start + len);
					self.cursor.seek(start + len);

					return match self.machines[ix].produce(lexeme, self.interner) {
						Ok(kind) => Some(Ok(Token { kind, text: lexeme.into(), offset: start })),
						Err(error) => self.fail(error, start, len),
					};
				}

				// No machine recognizes the character: skip it.
				_ => self.cursor.seek(start + 1),
			}
		}
	}
}
