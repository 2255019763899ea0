use super::{args::{self, ArgSpec}, ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "unset",
		syntax: Syntax::Args(parse),
		manual: "\
usage: unset -v name | unset -f name
Unset a variable (-v) or a function (-f).",
	}
}


const ARGS: ArgSpec = ArgSpec { values: &[], flags: &["v", "f"] };


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let (args, operand) = args::parse(invocation.args, ARGS)?;

	let mode = match (args.contains_key("v"), args.contains_key("f")) {
		(true, false) => ast::UnsetMode::Variable,
		(false, true) => ast::UnsetMode::Function,
		_ => return Err(Error::new(invocation.args, "either -v or -f expected")),
	};

	let name = parser.parse_name(operand)?;

	Ok(ast::Statement::Unset { mode, name, pos: invocation.pos() })
}
