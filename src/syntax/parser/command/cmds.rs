use super::{ast, string, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: ".cmds:",
		syntax: Syntax::Args(parse),
		manual: "\
usage: .cmds:path
Run the commands of a script file, stopping at the first failure.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	if invocation.args.is_empty() {
		return Err(Error::new(invocation.args, "path expected"));
	}

	let path = string::parse(invocation.args, parser.interner)?;

	Ok(invocation.command(ast::Command::RunScript { path }))
}
