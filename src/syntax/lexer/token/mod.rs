mod fmt;

use crate::{entity::EntityKind, symbol::Symbol};


/// Reserved words that are not entity related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
	// Control flow:
	If,
	Elif,
	Else,
	While,
	For,
	In,

	// Commands:
	Ls,
	Cd,
	Pwd,
	Tree,
	Get,
	Print,
	Printf,
	Unset,
	Man,
	Clear,
	Env,
	Exit,
}


impl Keyword {
	pub const ALL: [Keyword; 18] = [
		Self::If,
		Self::Elif,
		Self::Else,
		Self::While,
		Self::For,
		Self::In,
		Self::Ls,
		Self::Cd,
		Self::Pwd,
		Self::Tree,
		Self::Get,
		Self::Print,
		Self::Printf,
		Self::Unset,
		Self::Man,
		Self::Clear,
		Self::Env,
		Self::Exit,
	];


	pub fn as_str(&self) -> &'static str {
		match self {
			Self::If => "if",
			Self::Elif => "elif",
			Self::Else => "else",
			Self::While => "while",
			Self::For => "for",
			Self::In => "in",
			Self::Ls => "ls",
			Self::Cd => "cd",
			Self::Pwd => "pwd",
			Self::Tree => "tree",
			Self::Get => "get",
			Self::Print => "print",
			Self::Printf => "printf",
			Self::Unset => "unset",
			Self::Man => "man",
			Self::Clear => "clear",
			Self::Env => "env",
			Self::Exit => "exit",
		}
	}
}


/// Literals for non-composite types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Bool(bool),
	Int(i64),
	Float(f64),
	/// The contents of a quoted string, with escape sequences already processed.
	String(Box<str>),
}


/// Operators, including the path related ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Plus,  // +
	Minus, // -
	Times, // *
	Div,   // /
	Mod,   // %

	Equals,        // ==
	NotEquals,     // !=
	Greater,       // >
	GreaterEquals, // >=
	Lower,         // <
	LowerEquals,   // <=

	Not, // !
	And, // &&
	Or,  // ||

	Assign,    // =
	Dot,       // .
	DoubleDot, // ..
}


impl Operator {
	/// Strict equality operators (==, !=).
	pub fn is_equality(&self) -> bool {
		matches!(self, Self::Equals | Self::NotEquals)
	}


	/// Ordering comparison operators (>, >=, <, <=).
	pub fn is_comparison(&self) -> bool {
		matches!(
			self,
			Self::Lower | Self::LowerEquals | Self::Greater | Self::GreaterEquals
		)
	}


	/// Additive arithmetic operators (+, -).
	pub fn is_term(&self) -> bool {
		matches!(self, Self::Plus | Self::Minus)
	}


	/// Multiplicative arithmetic operators (*, /, %).
	pub fn is_factor(&self) -> bool {
		matches!(self, Self::Times | Self::Div | Self::Mod)
	}


	/// Unary operators (-, !)
	pub fn is_unary(&self) -> bool {
		matches!(self, Self::Not | Self::Minus)
	}
}


/// All possible kinds of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
	Identifier(Symbol),
	Keyword(Keyword),
	/// Hierarchy keywords, either the full name or the two letter code.
	Entity(EntityKind),
	/// Listing aliases, like `lsrack`.
	EntityList(EntityKind),
	Literal(Literal),
	/// Variable dereference: `${name}`.
	Dereference(Symbol),
	Operator(Operator),

	Colon,     // :
	Comma,     // ,
	Semicolon, // ;
	At,        // @

	OpenParens,  // (
	CloseParens, // )

	OpenBracket,  // [
	CloseBracket, // ]

	OpenBrace,  // {
	CloseBrace, // }
}


impl TokenKind {
	/// Whether the token may be part of a path.
	/// Paths are maximal runs of adjacent tokens of these kinds.
	pub fn is_path_part(&self) -> bool {
		matches!(
			self,
			TokenKind::Identifier(_)
				| TokenKind::Keyword(_)
				| TokenKind::Entity(_)
				| TokenKind::EntityList(_)
				| TokenKind::Dereference(_)
				| TokenKind::Literal(Literal::Int(_))
				| TokenKind::Literal(Literal::Float(_))
				| TokenKind::Literal(Literal::Bool(_))
				| TokenKind::Operator(Operator::Div)
				| TokenKind::Operator(Operator::Minus)
				| TokenKind::Operator(Operator::Dot)
				| TokenKind::Operator(Operator::DoubleDot)
		)
	}
}


/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	/// The matched lexeme, as in the source.
	pub text: Box<str>,
	/// Byte offset of the lexeme in the source buffer.
	pub offset: usize,
}


impl Token {
	/// The offset right after the lexeme.
	pub fn end(&self) -> usize {
		self.offset + self.text.len()
	}
}
