use super::{args::{self, ArgSpec}, ast, CommandSpec, Error, Invocation, Parser, Syntax};


inventory::submit! {
	CommandSpec {
		name: "ls",
		syntax: Syntax::Args(parse),
		manual: "\
usage: ls [-s attribute] [-a attribute] [-r] [path]
List the children of the given path, or of the current path.
  -s attribute  sort the objects by the attribute
  -a attribute  show the attribute of each object
  -r            list recursively",
	}
}


/// Arguments shared by all listings.
pub const ARGS: ArgSpec = ArgSpec { values: &["s", "a"], flags: &["r"] };


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let (args, operand) = args::parse(invocation.args, ARGS)?;
	let path = parser.parse_optional_path(operand)?;

	Ok(invocation.command(ast::Command::Ls { path, args }))
}
