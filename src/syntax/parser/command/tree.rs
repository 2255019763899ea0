use super::{ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "tree",
		syntax: Syntax::Args(parse),
		manual: "\
usage: tree [path] [depth]
Show the hierarchy below the given path, or below the current path.
The depth defaults to 1, and may be any integer expression.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let (first, rest) = invocation.args.split_word();

	let is_number = |frame: &super::Frame| {
		!frame.is_empty() && frame.text().bytes().all(|c| c.is_ascii_digit())
	};

	let (path, depth) = if first.is_empty() {
		(None, None)
	} else if rest.is_empty() && is_number(&first) {
		(None, Some(parser.parse_expression(first)?))
	} else if rest.is_empty() {
		(Some(parser.parse_path(first, ast::PathMode::Std)?), None)
	} else {
		let path = parser.parse_path(first, ast::PathMode::Std)?;

		let depth = parser
			.parse_expression(rest)
			.map_err(|error| error.extend(rest, "parsing depth"))?;

		(Some(path), Some(depth))
	};

	Ok(invocation.command(ast::Command::Tree { path, depth }))
}
