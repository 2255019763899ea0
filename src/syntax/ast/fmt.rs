use std::fmt::Display as _;

use super::{
	ArithmeticOp,
	Attribute,
	Block,
	Command,
	ComparisonOp,
	Expr,
	Literal,
	LogicalOp,
	Statement,
	UnsetMode,
};
use crate::{
	fmt::{self, Display, Indent},
	symbol,
	term::color,
};


const ILL_FORMED: color::Fg<color::Red, &str> = color::Fg(color::Red, "***ill-formed***");


/// The context for displaying AST nodes.
#[derive(Debug, Copy, Clone)]
pub struct Context<'a> {
	interner: &'a symbol::Interner,
	indent: Indent,
}


impl<'a> Context<'a> {
	fn indent(mut self) -> Self {
		self.indent = self.indent.deeper();
		self
	}
}


impl<'a> From<&'a symbol::Interner> for Context<'a> {
	fn from(interner: &'a symbol::Interner) -> Self {
		Self { interner, indent: Indent::default() }
	}
}


impl std::fmt::Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Bool(b) => color::Fg(color::Blue, b).fmt(f),
			Self::Int(i) => i.fmt(f),
			Self::Float(n) => write!(f, "{:?}", n),
			Self::String(s) => write!(f, "\"{}\"", s.escape_debug()),
		}
	}
}


impl std::fmt::Display for ArithmeticOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Plus => "+",
			Self::Minus => "-",
			Self::Times => "*",
			Self::Div => "/",
			Self::Mod => "%",
		}
		.fmt(f)
	}
}


impl std::fmt::Display for ComparisonOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Equals => "==",
			Self::NotEquals => "!=",
			Self::Greater => ">",
			Self::GreaterEquals => ">=",
			Self::Lower => "<",
			Self::LowerEquals => "<=",
		}
		.fmt(f)
	}
}


impl std::fmt::Display for LogicalOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::And => "&&",
			Self::Or => "||",
		}
		.fmt(f)
	}
}


fn binary<'a, O: std::fmt::Display>(
	f: &mut std::fmt::Formatter,
	left: &Expr,
	op: O,
	right: &Expr,
	context: Context<'a>,
) -> std::fmt::Result {
	"(".fmt(f)?;
	left.fmt(f, context)?;
	write!(f, " {} ", color::Fg(color::Yellow, op))?;
	right.fmt(f, context)?;
	")".fmt(f)
}


fn keyword(f: &mut std::fmt::Formatter, name: &str) -> std::fmt::Result {
	color::Fg(color::Yellow, name).fmt(f)
}


impl<'a> Display<'a> for Expr {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Literal { literal, .. } => literal.fmt(f),

			Self::Array { items, .. } => {
				"[".fmt(f)?;
				fmt::join(f, items.iter(), ", ", |item, f| item.fmt(f, context))?;
				"]".fmt(f)
			}

			Self::Dict { entries, .. } => {
				"{".fmt(f)?;
				fmt::join(
					f,
					entries.iter(),
					", ",
					|(key, value), f| {
						write!(f, "{:?}: ", key)?;
						value.fmt(f, context)
					}
				)?;
				"}".fmt(f)
			}

			Self::Arithmetic { op, left, right, .. } => binary(f, left, op, right, context),

			Self::Comparison { op, left, right, .. } => binary(f, left, op, right, context),

			Self::Logical { op, left, right, .. } => binary(f, left, op, right, context),

			Self::Not { operand, .. } => {
				"!".fmt(f)?;
				operand.fmt(f, context)
			}

			Self::Negate { operand, .. } => {
				"-".fmt(f)?;
				operand.fmt(f, context)
			}

			Self::Path { path, mode, .. } => {
				write!(f, "{}<{}>(", color::Fg(color::Green, "path"), mode)?;
				path.fmt(f, context)?;
				")".fmt(f)
			}

			Self::Format { template, args, .. } => {
				write!(f, "{}(\"{}\"", color::Fg(color::Green, "format"), template.escape_debug())?;

				for arg in args.iter() {
					", ".fmt(f)?;
					arg.fmt(f, context)?;
				}

				")".fmt(f)
			}

			Self::Symbol { symbol, .. } => {
				"${".fmt(f)?;
				symbol.fmt(f, context.interner)?;
				"}".fmt(f)
			}
		}
	}
}


impl<'a> Display<'a> for Attribute {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "{}=", self.name)?;
		self.value.fmt(f, context)
	}
}


/// Format an optional operand, preceded by a space.
fn operand<'a>(
	f: &mut std::fmt::Formatter,
	expr: Option<&Expr>,
	context: Context<'a>,
) -> std::fmt::Result {
	match expr {
		Some(expr) => {
			" ".fmt(f)?;
			expr.fmt(f, context)
		}
		None => Ok(()),
	}
}


impl<'a> Display<'a> for Command {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Ls { path, args } => {
				keyword(f, "ls")?;
				for (name, value) in args {
					write!(f, " -{}", name)?;
					if !value.is_empty() {
						write!(f, " {}", value)?;
					}
				}
				operand(f, path.as_ref(), context)
			}

			Self::Cd { path } => {
				keyword(f, "cd")?;
				operand(f, path.as_ref(), context)
			}

			Self::Pwd => keyword(f, "pwd"),

			Self::Tree { path, depth } => {
				keyword(f, "tree")?;
				operand(f, path.as_ref(), context)?;
				operand(f, depth.as_ref(), context)
			}

			Self::Get { path } => {
				keyword(f, "get")?;
				operand(f, Some(path), context)
			}

			Self::Search { kind, path, args } => {
				keyword(f, kind.list_alias())?;
				for (name, value) in args {
					write!(f, " -{} {}", name, value)?;
				}
				operand(f, path.as_ref(), context)
			}

			Self::Create { kind, path, attributes } => {
				keyword(f, "create")?;
				write!(f, " {}", kind)?;
				operand(f, Some(path), context)?;
				for attribute in attributes.iter() {
					" ".fmt(f)?;
					attribute.fmt(f, context)?;
				}
				Ok(())
			}

			Self::Update { path, attributes } => {
				keyword(f, "update")?;
				operand(f, Some(path), context)?;
				for attribute in attributes.iter() {
					" ".fmt(f)?;
					attribute.fmt(f, context)?;
				}
				Ok(())
			}

			Self::Delete { path } => {
				keyword(f, "delete")?;
				operand(f, Some(path), context)
			}

			Self::Select { paths } => {
				keyword(f, "select")?;
				" {".fmt(f)?;
				fmt::join(f, paths.iter(), ", ", |path, f| path.fmt(f, context))?;
				"}".fmt(f)
			}

			Self::RunScript { path } => {
				keyword(f, ".cmds")?;
				operand(f, Some(path), context)
			}

			Self::Man { topic } => {
				keyword(f, "man")?;
				if let Some(topic) = topic {
					write!(f, " {}", topic)?;
				}
				Ok(())
			}

			Self::Clear => keyword(f, "clear"),
			Self::Env => keyword(f, "env"),
			Self::Exit => keyword(f, "exit"),
		}
	}
}


/// Format a braced block at the given context, closing at the parent's indentation.
fn braced<'a>(f: &mut std::fmt::Formatter, block: &Block, context: Context<'a>) -> std::fmt::Result {
	"{".fmt(f)?;

	if !block.is_empty() {
		"\n".fmt(f)?;
		block.fmt(f, context.indent())?;
		"\n".fmt(f)?;
		context.indent.fmt(f)?;
	}

	"}".fmt(f)
}


impl<'a> Display<'a> for Statement {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Assign { target, value, .. } => {
				keyword(f, ".var:")?;
				target.fmt(f, context.interner)?;
				if let Some(value) = value {
					" = ".fmt(f)?;
					value.fmt(f, context)?;
				}
				Ok(())
			}

			Self::If { condition, then, elifs, otherwise, .. } => {
				keyword(f, "if")?;
				operand(f, Some(condition), context)?;
				" ".fmt(f)?;
				braced(f, then, context)?;

				for (condition, block) in elifs.iter() {
					" ".fmt(f)?;
					keyword(f, "elif")?;
					operand(f, Some(condition), context)?;
					" ".fmt(f)?;
					braced(f, block, context)?;
				}

				if let Some(otherwise) = otherwise {
					" ".fmt(f)?;
					keyword(f, "else")?;
					" ".fmt(f)?;
					braced(f, otherwise, context)?;
				}

				Ok(())
			}

			Self::While { condition, body, .. } => {
				keyword(f, "while")?;
				operand(f, Some(condition), context)?;
				" ".fmt(f)?;
				braced(f, body, context)
			}

			Self::For { init, condition, increment, body, .. } => {
				keyword(f, "for")?;
				" (".fmt(f)?;
				init.fmt(f, context)?;
				"; ".fmt(f)?;
				condition.fmt(f, context)?;
				"; ".fmt(f)?;
				increment.fmt(f, context)?;
				") ".fmt(f)?;
				braced(f, body, context)
			}

			Self::ForIn { variable, array, body, .. } => {
				keyword(f, "for")?;
				" ".fmt(f)?;
				variable.fmt(f, context.interner)?;
				" ".fmt(f)?;
				keyword(f, "in")?;
				operand(f, Some(array), context)?;
				" ".fmt(f)?;
				braced(f, body, context)
			}

			Self::ForRange { variable, start, end, body, .. } => {
				keyword(f, "for")?;
				" ".fmt(f)?;
				variable.fmt(f, context.interner)?;
				" ".fmt(f)?;
				keyword(f, "in")?;
				write!(f, " {}..{} ", start, end)?;
				braced(f, body, context)
			}

			Self::Block(block) => braced(f, block, context),

			Self::FunctionDecl { name, body, .. } => {
				name.fmt(f, context.interner)?;
				"() ".fmt(f)?;
				braced(f, body, context)
			}

			Self::FunctionCall { name, .. } => {
				name.fmt(f, context.interner)?;
				"()".fmt(f)
			}

			Self::Unset { mode, name, .. } => {
				keyword(f, "unset")?;
				match mode {
					UnsetMode::Variable => " -v ".fmt(f)?,
					UnsetMode::Function => " -f ".fmt(f)?,
				}
				name.fmt(f, context.interner)
			}

			Self::Print { value, .. } => {
				keyword(f, "print")?;
				operand(f, Some(value), context)
			}

			Self::Printf { format, args, .. } => {
				keyword(f, "printf")?;
				operand(f, Some(format), context)?;
				for arg in args.iter() {
					",".fmt(f)?;
					operand(f, Some(arg), context)?;
				}
				Ok(())
			}

			Self::Command { command, .. } => command.fmt(f, context),

			Self::IllFormed => ILL_FORMED.fmt(f),
		}
	}
}


impl<'a> Display<'a> for Block {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		fmt::join(
			f,
			self.iter(),
			"\n",
			|statement, f| {
				context.indent.fmt(f)?;
				statement.fmt(f, context)
			},
		)
	}
}
