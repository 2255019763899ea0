use super::{ast, scan, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "printf",
		syntax: Syntax::Args(parse),
		manual: "\
usage: printf format, value...
Print the values according to the format. Supported directives are %d, %s, %f, %.Nf,
%v for any value, and %% for a literal percent sign. There must be as many values as
directives.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	if invocation.args.is_empty() {
		return Err(Error::new(invocation.args, "format expected"));
	}

	let mut pieces = scan::split_top_level(invocation.args, b',').into_iter();

	let format = match pieces.next() {
		Some(piece) => parser.parse_expression_or_string(piece)?,
		None => return Err(Error::new(invocation.args, "format expected")),
	};

	let args = pieces
		.map(|piece| parser.parse_expression(piece))
		.collect::<Result<Vec<_>, _>>()?;

	Ok(
		ast::Statement::Printf {
			format,
			args: args.into(),
			pos: invocation.pos(),
		}
	)
}
