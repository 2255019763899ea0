use std::fmt::Display as _;

use super::{Keyword, Literal, Operator, Token, TokenKind};
use crate::{
	fmt::{self, Display},
	symbol,
};


impl std::fmt::Display for Keyword {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}


impl std::fmt::Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Bool(b) => b.fmt(f),
			Self::Int(i) => i.fmt(f),
			Self::Float(n) => write!(f, "{:?}", n),
			Self::String(s) => write!(f, "\"{}\"", s.escape_debug()),
		}
	}
}


impl std::fmt::Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let op = match self {
			Self::Plus => "+",
			Self::Minus => "-",
			Self::Times => "*",
			Self::Div => "/",
			Self::Mod => "%",
			Self::Equals => "==",
			Self::NotEquals => "!=",
			Self::Greater => ">",
			Self::GreaterEquals => ">=",
			Self::Lower => "<",
			Self::LowerEquals => "<=",
			Self::Not => "!",
			Self::And => "&&",
			Self::Or => "||",
			Self::Assign => "=",
			Self::Dot => ".",
			Self::DoubleDot => "..",
		};

		op.fmt(f)
	}
}


impl<'a> Display<'a> for TokenKind {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Identifier(symbol) => symbol.fmt(f, context),
			Self::Keyword(keyword) => keyword.fmt(f),
			Self::Entity(kind) => kind.fmt(f),
			Self::EntityList(kind) => kind.list_alias().fmt(f),
			Self::Literal(literal) => literal.fmt(f),
			Self::Dereference(symbol) => write!(f, "${{{}}}", fmt::Show(symbol, context)),
			Self::Operator(op) => op.fmt(f),
			Self::Colon => ":".fmt(f),
			Self::Comma => ",".fmt(f),
			Self::Semicolon => ";".fmt(f),
			Self::At => "@".fmt(f),
			Self::OpenParens => "(".fmt(f),
			Self::CloseParens => ")".fmt(f),
			Self::OpenBracket => "[".fmt(f),
			Self::CloseBracket => "]".fmt(f),
			Self::OpenBrace => "{".fmt(f),
			Self::CloseBrace => "}".fmt(f),
		}
	}
}


/// Tokens are displayed as their source lexeme, which needs no context.
impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "'{}'", self.text)
	}
}
