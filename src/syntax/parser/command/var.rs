use super::{ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: ".var:",
		syntax: Syntax::Args(parse),
		manual: "\
usage: .var:name=value
Assign a variable. The value is an expression, or text where &{name} is replaced by the
variable's value. Without a value, the variable is declared but keeps its value.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let args = invocation.args;

	let (name, value) = match args.find("=") {
		Some(eq) => (args.until(eq), Some(args.from(eq + 1).trim())),
		None => (args, None),
	};

	let target = parser.parse_name(name)?;

	let value = match value {
		Some(value) if value.is_empty() => return Err(Error::new(value, "value expected")),

		Some(value) => Some(
			parser
				.parse_expression_or_string(value)
				.map_err(|error| error.extend(value, "parsing value"))?
		),

		None => None,
	};

	Ok(ast::Statement::Assign { target, value, pos: invocation.pos() })
}
