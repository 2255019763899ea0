use super::{args, ast, ls, CommandSpec, Error, Invocation, Parser, Syntax};
use crate::entity::EntityKind;


macro_rules! listing {
	($kind:ident) => {
		inventory::submit! {
			CommandSpec {
				name: EntityKind::$kind.list_alias(),
				syntax: Syntax::Args(parse),
				manual: "\
usage: ls<kind> [-s attribute] [-a attribute] [-r] [path]
List the objects of the given kind under the path, or under the current path.
Accepts the same arguments as ls.",
			}
		}
	};
}


listing!(Tenant);
listing!(Site);
listing!(Building);
listing!(Room);
listing!(Rack);
listing!(Device);
listing!(Group);
listing!(Corridor);
listing!(Sensor);
listing!(StrayDevice);


fn parse(parser: &mut Parser, invocation: Invocation) -> Result<ast::Statement, Error> {
	let (alias, _) = invocation.frame.split_word();

	let kind = EntityKind::from_list_alias(alias.text())
		.ok_or_else(|| Error::new(alias, "unknown listing"))?;

	let (args, operand) = args::parse(invocation.args, ls::ARGS)?;
	let path = parser.parse_optional_path(operand)?;

	Ok(invocation.command(ast::Command::Search { kind, path, args }))
}
