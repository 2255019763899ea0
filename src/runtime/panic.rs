use std::{io, path::Path};

use crate::{
	fmt::{self, Display},
	symbol::{self, Symbol},
	syntax::SourcePos,
};
use super::{format::FormatError, Error, Value};


/// A runtime error. It aborts the statement in which it happens and every enclosing one,
/// but side effects of previous statements are kept.
#[derive(Debug)]
pub enum Panic {
	StackOverflow { pos: SourcePos },
	DivisionByZero { pos: SourcePos },
	/// Arithmetic over unsupported operand types.
	InvalidArithmetic {
		left: Value,
		right: Value,
		pos: SourcePos,
	},
	/// Arithmetic other than concatenation over strings.
	InvalidStringOperator { pos: SourcePos },
	NotComparable {
		left: Value,
		right: Value,
		pos: SourcePos,
	},
	InvalidOperand {
		value: Value,
		pos: SourcePos,
	},
	InvalidCondition {
		value: Value,
		pos: SourcePos,
	},
	/// Non boolean operand for `&&` or `||`.
	InvalidLogicalOperand {
		value: Value,
		pos: SourcePos,
	},
	TypeError {
		value: Value,
		expected: &'static str,
		pos: SourcePos,
	},
	UndefinedVariable {
		name: Symbol,
		pos: SourcePos,
	},
	UndefinedFunction {
		name: Symbol,
		pos: SourcePos,
	},
	Format {
		error: FormatError,
		pos: SourcePos,
	},
	NoManual {
		topic: Box<str>,
		pos: SourcePos,
	},
	Io {
		error: io::Error,
		pos: SourcePos,
	},
	/// A failure while running a script file.
	Script {
		path: Box<Path>,
		line: usize,
		error: Box<Error>,
		pos: SourcePos,
	},
}


impl Panic {
	pub fn stack_overflow(pos: SourcePos) -> Self {
		Self::StackOverflow { pos }
	}


	pub fn division_by_zero(pos: SourcePos) -> Self {
		Self::DivisionByZero { pos }
	}


	pub fn invalid_arithmetic(left: Value, right: Value, pos: SourcePos) -> Self {
		Self::InvalidArithmetic { left, right, pos }
	}


	pub fn invalid_string_operator(pos: SourcePos) -> Self {
		Self::InvalidStringOperator { pos }
	}


	pub fn not_comparable(left: Value, right: Value, pos: SourcePos) -> Self {
		Self::NotComparable { left, right, pos }
	}


	pub fn invalid_operand(value: Value, pos: SourcePos) -> Self {
		Self::InvalidOperand { value, pos }
	}


	pub fn invalid_condition(value: Value, pos: SourcePos) -> Self {
		Self::InvalidCondition { value, pos }
	}


	pub fn invalid_logical_operand(value: Value, pos: SourcePos) -> Self {
		Self::InvalidLogicalOperand { value, pos }
	}


	pub fn type_error(value: Value, expected: &'static str, pos: SourcePos) -> Self {
		Self::TypeError { value, expected, pos }
	}


	pub fn undefined_variable(name: Symbol, pos: SourcePos) -> Self {
		Self::UndefinedVariable { name, pos }
	}


	pub fn undefined_function(name: Symbol, pos: SourcePos) -> Self {
		Self::UndefinedFunction { name, pos }
	}


	pub fn format(error: FormatError, pos: SourcePos) -> Self {
		Self::Format { error, pos }
	}


	pub fn io(error: io::Error, pos: SourcePos) -> Self {
		Self::Io { error, pos }
	}


	/// The range of the line where the panic happened.
	pub fn pos(&self) -> SourcePos {
		match self {
			Self::StackOverflow { pos }
			| Self::DivisionByZero { pos }
			| Self::InvalidArithmetic { pos, .. }
			| Self::InvalidStringOperator { pos }
			| Self::NotComparable { pos, .. }
			| Self::InvalidOperand { pos, .. }
			| Self::InvalidCondition { pos, .. }
			| Self::InvalidLogicalOperand { pos, .. }
			| Self::TypeError { pos, .. }
			| Self::UndefinedVariable { pos, .. }
			| Self::UndefinedFunction { pos, .. }
			| Self::Format { pos, .. }
			| Self::NoManual { pos, .. }
			| Self::Io { pos, .. }
			| Self::Script { pos, .. } => *pos,
		}
	}
}


impl<'a> Display<'a> for Panic {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::StackOverflow { .. } => write!(f, "stack overflow"),

			Self::DivisionByZero { .. } => write!(f, "division by zero"),

			Self::InvalidArithmetic { left, right, .. } => write!(
				f,
				"invalid arithmetic operation attempted ({} and {})",
				left.type_name(),
				right.type_name(),
			),

			Self::InvalidStringOperator { .. } => write!(f, "invalid operator for string operands"),

			Self::NotComparable { left, right, .. } => write!(
				f,
				"not comparable ({} and {})",
				left.type_name(),
				right.type_name(),
			),

			Self::InvalidOperand { value, .. } => write!(f, "invalid operand: {}", value),

			Self::InvalidCondition { value, .. } => write!(
				f,
				"condition should be a boolean, got {}",
				value.type_name()
			),

			Self::InvalidLogicalOperand { value, .. } => write!(
				f,
				"operands should be booleans, got {}",
				value.type_name()
			),

			Self::TypeError { value, expected, .. } => write!(
				f,
				"{} expected, got {}",
				expected,
				value.type_name()
			),

			Self::UndefinedVariable { name, .. } => write!(
				f,
				"undefined variable {}",
				fmt::Show(name, context)
			),

			Self::UndefinedFunction { name, .. } => write!(
				f,
				"undefined function {}",
				fmt::Show(name, context)
			),

			Self::Format { error, .. } => write!(f, "{}", error),

			Self::NoManual { topic, .. } => write!(f, "no manual entry for {}", topic),

			Self::Io { error, .. } => write!(f, "{}", error),

			Self::Script { path, line, error, .. } => write!(
				f,
				"in {}, line {}:\n{}",
				path.display(),
				line,
				fmt::Show(error.as_ref(), context)
			),
		}
	}
}


impl std::error::Error for Panic { }


/// Std Display, without resolving symbols.
impl std::fmt::Display for Panic {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", fmt::Show(self, &symbol::Interner::new()))
	}
}
