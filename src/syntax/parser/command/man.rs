use super::{ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "man",
		syntax: Syntax::Args(parse),
		manual: "\
usage: man [command]
Show the manual of a command, or list the available commands.",
	}
}


fn parse(_: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let (topic, rest) = invocation.args.split_word();

	if !rest.is_empty() {
		return Err(Error::new(rest, "unexpected text after topic"));
	}

	let topic = if topic.is_empty() { None } else { Some(topic.text().into()) };

	Ok(invocation.command(ast::Command::Man { topic }))
}
