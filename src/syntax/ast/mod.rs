mod fmt;

use std::{collections::BTreeMap, rc::Rc};

use super::{lexer, SourcePos};
pub use crate::entity::{EntityKind, PathMode};
pub use crate::symbol::Symbol;
pub use fmt::Context;


/// Trait for ill-formed nodes, produced while synchronizing after a syntax error.
/// Ill-formed nodes are never executed, as lines with errors are rejected.
pub trait IllFormed {
	fn ill_formed() -> Self;

	fn is_ill_formed(&self) -> bool;
}


/// A sequence of statements.
#[derive(Debug, Default, PartialEq)]
pub struct Block(pub Box<[Statement]>);


impl Block {
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}


	pub fn len(&self) -> usize {
		self.0.len()
	}


	pub fn iter(&self) -> std::slice::Iter<Statement> {
		self.0.iter()
	}
}


impl From<Vec<Statement>> for Block {
	fn from(statements: Vec<Statement>) -> Self {
		Self(statements.into_boxed_slice())
	}
}


impl From<Statement> for Block {
	fn from(statement: Statement) -> Self {
		Self(Box::new([statement]))
	}
}


/// Literals for the basic types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Bool(bool),
	Int(i64),
	Float(f64),
	String(Box<str>),
}


impl From<lexer::Literal> for Literal {
	fn from(literal: lexer::Literal) -> Self {
		match literal {
			lexer::Literal::Bool(b) => Self::Bool(b),
			lexer::Literal::Int(i) => Self::Int(i),
			lexer::Literal::Float(n) => Self::Float(n),
			lexer::Literal::String(s) => Self::String(s),
		}
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
	Plus,  // +
	Minus, // -
	Times, // *
	Div,   // /
	Mod,   // %
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
	Equals,        // ==
	NotEquals,     // !=
	Greater,       // >
	GreaterEquals, // >=
	Lower,         // <
	LowerEquals,   // <=
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
	And, // &&
	Or,  // ||
}


/// Expressions produce a value when evaluated.
#[derive(Debug, PartialEq)]
pub enum Expr {
	Literal {
		literal: Literal,
		pos: SourcePos,
	},
	/// Array literal: `[a, b]`.
	Array {
		items: Box<[Expr]>,
		pos: SourcePos,
	},
	/// Dict literal: `{name: a, "rack size": b}`.
	Dict {
		entries: Box<[(Box<str>, Expr)]>,
		pos: SourcePos,
	},
	Arithmetic {
		op: ArithmeticOp,
		left: Box<Expr>,
		right: Box<Expr>,
		pos: SourcePos,
	},
	Comparison {
		op: ComparisonOp,
		left: Box<Expr>,
		right: Box<Expr>,
		pos: SourcePos,
	},
	Logical {
		op: LogicalOp,
		left: Box<Expr>,
		right: Box<Expr>,
		pos: SourcePos,
	},
	Not {
		operand: Box<Expr>,
		pos: SourcePos,
	},
	Negate {
		operand: Box<Expr>,
		pos: SourcePos,
	},
	/// A path in the hierarchy, completed according to the mode.
	Path {
		path: Box<Expr>,
		mode: PathMode,
		pos: SourcePos,
	},
	/// An interpolated string. The template has a `%v` placeholder per argument, and
	/// literal percent signs are escaped as `%%`.
	Format {
		template: Box<str>,
		args: Box<[Expr]>,
		pos: SourcePos,
	},
	/// Variable reference: `${name}` or `&{name}`.
	Symbol {
		symbol: Symbol,
		pos: SourcePos,
	},
}


impl Expr {
	pub fn pos(&self) -> SourcePos {
		match self {
			Self::Literal { pos, .. }
			| Self::Array { pos, .. }
			| Self::Dict { pos, .. }
			| Self::Arithmetic { pos, .. }
			| Self::Comparison { pos, .. }
			| Self::Logical { pos, .. }
			| Self::Not { pos, .. }
			| Self::Negate { pos, .. }
			| Self::Path { pos, .. }
			| Self::Format { pos, .. }
			| Self::Symbol { pos, .. } => *pos,
		}
	}


	/// A string literal leaf.
	pub fn string<S: Into<Box<str>>>(string: S, pos: SourcePos) -> Self {
		Self::Literal { literal: Literal::String(string.into()), pos }
	}


	/// Wrap the expression as a path with the given mode.
	pub fn into_path(self, mode: PathMode) -> Self {
		let pos = self.pos();
		Self::Path { path: self.into(), mode, pos }
	}
}


/// Whether `unset` targets a variable or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsetMode {
	Variable, // -v
	Function, // -f
}


/// Arguments of the form `-name value` or `-flag`. Flags map to the empty string.
pub type Arguments = BTreeMap<Box<str>, Box<str>>;


/// An attribute assignment, used in creation and update.
#[derive(Debug, PartialEq)]
pub struct Attribute {
	pub name: Box<str>,
	pub value: Expr,
}


/// Commands that are executed by the controller, or that inspect the shell itself.
#[derive(Debug, PartialEq)]
pub enum Command {
	Ls {
		path: Option<Expr>,
		args: Arguments,
	},
	Cd {
		path: Option<Expr>,
	},
	Pwd,
	Tree {
		path: Option<Expr>,
		depth: Option<Expr>,
	},
	Get {
		path: Expr,
	},
	/// Listing of a given kind: `lsrack`.
	Search {
		kind: EntityKind,
		path: Option<Expr>,
		args: Arguments,
	},
	Create {
		kind: EntityKind,
		path: Expr,
		attributes: Box<[Attribute]>,
	},
	Update {
		path: Expr,
		attributes: Box<[Attribute]>,
	},
	Delete {
		path: Expr,
	},
	/// Replace the selection. An empty list clears it.
	Select {
		paths: Box<[Expr]>,
	},
	/// Run a script file: `.cmds:path`.
	RunScript {
		path: Expr,
	},
	Man {
		topic: Option<Box<str>>,
	},
	Clear,
	Env,
	Exit,
}


/// Statements of all kinds in the language.
#[derive(Debug, PartialEq)]
pub enum Statement {
	/// `.var:name=value`. Without a value, the slot is bound but not written.
	Assign {
		target: Symbol,
		value: Option<Expr>,
		pos: SourcePos,
	},
	If {
		condition: Expr,
		then: Block,
		elifs: Box<[(Expr, Block)]>,
		otherwise: Option<Block>,
		pos: SourcePos,
	},
	While {
		condition: Expr,
		body: Block,
		pos: SourcePos,
	},
	/// C-style for loop: `for (init; condition; increment) { }`.
	For {
		init: Box<Statement>,
		condition: Expr,
		increment: Box<Statement>,
		body: Block,
		pos: SourcePos,
	},
	/// `for name in expr { }`, iterating an array.
	ForIn {
		variable: Symbol,
		array: Expr,
		body: Block,
		pos: SourcePos,
	},
	/// `for name in start..end { }`, inclusive on both ends.
	ForRange {
		variable: Symbol,
		start: i64,
		end: i64,
		body: Block,
		pos: SourcePos,
	},
	Block(Block),
	FunctionDecl {
		name: Symbol,
		body: Rc<Block>,
		pos: SourcePos,
	},
	FunctionCall {
		name: Symbol,
		pos: SourcePos,
	},
	Unset {
		mode: UnsetMode,
		name: Symbol,
		pos: SourcePos,
	},
	Print {
		value: Expr,
		pos: SourcePos,
	},
	Printf {
		format: Expr,
		args: Box<[Expr]>,
		pos: SourcePos,
	},
	Command {
		command: Command,
		pos: SourcePos,
	},
	IllFormed,
}


impl Statement {
	pub fn pos(&self) -> SourcePos {
		match self {
			Self::Assign { pos, .. }
			| Self::If { pos, .. }
			| Self::While { pos, .. }
			| Self::For { pos, .. }
			| Self::ForIn { pos, .. }
			| Self::ForRange { pos, .. }
			| Self::FunctionDecl { pos, .. }
			| Self::FunctionCall { pos, .. }
			| Self::Unset { pos, .. }
			| Self::Print { pos, .. }
			| Self::Printf { pos, .. }
			| Self::Command { pos, .. } => *pos,

			Self::Block(block) => block
				.iter()
				.next()
				.map(Statement::pos)
				.unwrap_or_default(),

			Self::IllFormed => SourcePos::ill_formed(),
		}
	}
}


impl IllFormed for Statement {
	fn ill_formed() -> Self {
		Self::IllFormed
	}


	fn is_ill_formed(&self) -> bool {
		matches!(self, Self::IllFormed)
	}
}
