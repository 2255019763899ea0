use super::{ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "get",
		syntax: Syntax::Args(parse),
		manual: "\
usage: get path
Show the object at the given path.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let path = parser.parse_path(invocation.args, ast::PathMode::Std)?;

	Ok(invocation.command(ast::Command::Get { path }))
}
