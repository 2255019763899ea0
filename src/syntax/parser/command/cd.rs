use super::{ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "cd",
		syntax: Syntax::Args(parse),
		manual: "\
usage: cd [path]
Change the current path. Without a path, go back to the root.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let path = parser.parse_optional_path(invocation.args)?;

	Ok(invocation.command(ast::Command::Cd { path }))
}
