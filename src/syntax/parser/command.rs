automod::dir!("src/syntax/parser/command");

use super::{args, ast, scan, string, Error, Frame, Parser, SourcePos};


/// The parse function for a command with arguments.
pub type ParseFn = fn(&mut Parser, Invocation) -> Result<ast::Statement, Error>;


/// How a command's arguments are parsed.
#[derive(Clone, Copy)]
pub enum Syntax {
	/// Commands that take no arguments at all.
	NoArgs(fn() -> ast::Command),
	Args(ParseFn),
}


/// A registered command.
pub struct CommandSpec {
	/// The literal prefix that introduces the command.
	pub name: &'static str,
	pub syntax: Syntax,
	/// Shown by `man`.
	pub manual: &'static str,
}


inventory::collect!(CommandSpec);


/// The frames of a command statement.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
	/// The whole statement.
	pub frame: Frame<'a>,
	/// The trimmed text after the command name.
	pub args: Frame<'a>,
}


impl<'a> Invocation<'a> {
	pub fn pos(&self) -> SourcePos {
		self.frame.pos()
	}


	/// Wrap a controller command in a statement spanning the invocation.
	pub fn command(&self, command: ast::Command) -> ast::Statement {
		ast::Statement::Command { command, pos: self.pos() }
	}
}


/// Find the command introduced by the longest registered name prefixing the text.
/// The name must be followed by whitespace or the end of text, unless it ends with a
/// colon, like `.var:`.
pub fn find(text: &str) -> Option<&'static CommandSpec> {
	let bounded = |spec: &&CommandSpec| {
		text.starts_with(spec.name)
			&& (spec.name.ends_with(':')
				|| text[spec.name.len() ..]
					.chars()
					.next()
					.map_or(true, char::is_whitespace))
	};

	inventory::iter::<CommandSpec>
		.into_iter()
		.filter(bounded)
		.max_by_key(|spec| spec.name.len())
}


/// Find a command by its exact name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
	inventory::iter::<CommandSpec>
		.into_iter()
		.find(|spec| spec.name == name)
}


/// The manual entry for a command. Without a topic, lists the available commands.
pub fn manual(topic: Option<&str>) -> Option<String> {
	match topic {
		Some(topic) => lookup(topic).map(|spec| spec.manual.to_owned()),

		None => {
			let mut names: Vec<_> = inventory::iter::<CommandSpec>
				.into_iter()
				.map(|spec| spec.name)
				.collect();

			names.sort_unstable();

			Some(format!("available commands:\n  {}", names.join("\n  ")))
		}
	}
}
