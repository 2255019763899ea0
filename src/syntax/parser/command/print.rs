use super::{ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "print",
		syntax: Syntax::Args(parse),
		manual: "\
usage: print value
Print an expression, or some text where &{name} is replaced by the variable's value.",
	}
}


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let value = if invocation.args.is_empty() {
		ast::Expr::string("", invocation.args.pos())
	} else {
		parser.parse_expression_or_string(invocation.args)?
	};

	Ok(ast::Statement::Print { value, pos: invocation.pos() })
}
