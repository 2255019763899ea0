use assert_matches::assert_matches;

use super::*;
use ast::{Command, EntityKind, Expr, Literal, PathMode, Statement, UnsetMode};


fn parse(line: &str, interner: &mut symbol::Interner) -> (ast::Block, Vec<Error>) {
	Parser::new(interner).parse(line)
}


/// Parse a line that must have a single statement and no errors.
fn statement(line: &str, interner: &mut symbol::Interner) -> Statement {
	let (block, errors) = parse(line, interner);

	assert!(errors.is_empty(), "{}", errors.iter().map(Error::to_string).collect::<Vec<_>>().join("\n"));
	assert_eq!(block.len(), 1);

	block.0
		.into_vec()
		.pop()
		.expect("missing statement")
}


fn error(line: &str) -> Error {
	let mut interner = symbol::Interner::new();
	let (_, mut errors) = parse(line, &mut interner);

	assert!(!errors.is_empty(), "no error for {:?}", line);

	errors.remove(0)
}


#[test]
fn test_empty_statements() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = parse(" ; pwd ;; ", &mut interner);

	assert!(errors.is_empty());
	assert_matches!(&block.0[..], [ Statement::Command { command: Command::Pwd, .. } ]);
}


#[test]
fn test_longest_command_prefix() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement("lsrack -s height /P/SI", &mut interner),
		Statement::Command {
			command: Command::Search { kind: EntityKind::Rack, path: Some(_), args },
			..
		} => assert_eq!(args.get("s").map(|value| &**value), Some("height"))
	);

	assert_matches!(
		statement("ls -r", &mut interner),
		Statement::Command { command: Command::Ls { path: None, args }, .. } => {
			assert!(args.contains_key("r"))
		}
	);

	assert_matches!(
		statement("printf \"%d\", 1", &mut interner),
		Statement::Printf { args, .. } => assert_eq!(args.len(), 1)
	);
}


#[test]
fn test_name_boundary() {
	let mut interner = symbol::Interner::new();

	// Not the get command.
	assert_matches!(
		statement("getter:height=2", &mut interner),
		Statement::Command { command: Command::Update { .. }, .. }
	);

	assert_eq!(error("lsx /a").message(), "command not processed");
	assert_eq!(error("pwd now").message(), "no argument expected");
}


#[test]
fn test_paths() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement("cd ../R1/&{rack}", &mut interner),
		Statement::Command {
			command: Command::Cd {
				path: Some(Expr::Path { path, mode: PathMode::Std, .. }),
			},
			..
		} => assert_matches!(
			*path,
			Expr::Format { template, .. } => assert_eq!(template.as_ref(), "../R1/%v")
		)
	);

	assert_matches!(
		statement("cd", &mut interner),
		Statement::Command { command: Command::Cd { path: None }, .. }
	);

	assert_eq!(error("get").message(), "path expected");
	assert_eq!(error("get a b").message(), "unexpected text after path");
}


#[test]
fn test_tree() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement("tree 3", &mut interner),
		Statement::Command { command: Command::Tree { path: None, depth: Some(_) }, .. }
	);

	assert_matches!(
		statement("tree /P/SI 1 + 1", &mut interner),
		Statement::Command {
			command: Command::Tree {
				path: Some(_),
				depth: Some(Expr::Arithmetic { .. }),
			},
			..
		}
	);
}


#[test]
fn test_print() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement("print 1 + 2 * 3", &mut interner),
		Statement::Print { value: Expr::Arithmetic { .. }, .. }
	);

	assert_matches!(
		statement("print hello &{name}!", &mut interner),
		Statement::Print { value: Expr::Format { template, .. }, .. } => {
			assert_eq!(template.as_ref(), "hello %v!")
		}
	);

	assert_matches!(
		statement("print 3 apples", &mut interner),
		Statement::Print { value: Expr::Literal { literal: Literal::String(text), .. }, .. } => {
			assert_eq!(text.as_ref(), "3 apples")
		}
	);

	assert_eq!(error("print \"abc").message(), "unterminated string");
}


#[test]
fn test_variables() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement(".var:total=${a} + 1", &mut interner),
		Statement::Assign { value: Some(Expr::Arithmetic { .. }), .. }
	);

	assert_matches!(
		statement(".var:label=rack one", &mut interner),
		Statement::Assign { value: Some(Expr::Literal { .. }), .. }
	);

	assert_matches!(
		statement(".var:declared", &mut interner),
		Statement::Assign { value: None, .. }
	);

	assert_matches!(
		statement("unset -f helper", &mut interner),
		Statement::Unset { mode: UnsetMode::Function, .. }
	);

	assert_eq!(error(".var:1x=2").message(), "invalid name");
	assert_eq!(error("unset x").message(), "either -v or -f expected");
}


#[test]
fn test_control_flow() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement(
			"if ${a} == \"{\" { print a } elif ${a} > 2 { print b; print c } else { print d }",
			&mut interner
		),
		Statement::If { then, elifs, otherwise: Some(otherwise), .. } => {
			assert_eq!(then.len(), 1);
			assert_eq!(elifs.len(), 1);
			assert_eq!(elifs[0].1.len(), 2);
			assert_eq!(otherwise.len(), 1);
		}
	);

	assert_matches!(
		statement("while ${i} < 3 { .var:i=${i} + 1 }", &mut interner),
		Statement::While { body, .. } => assert_eq!(body.len(), 1)
	);

	assert_matches!(
		statement("for i in 1..3 { print &{i} }", &mut interner),
		Statement::ForRange { start: 1, end: 3, .. }
	);

	assert_matches!(
		statement("for i in -2..-1 {}", &mut interner),
		Statement::ForRange { start: -2, end: -1, .. }
	);

	assert_matches!(
		statement("for x in [1, 2] { print ${x} }", &mut interner),
		Statement::ForIn { array: Expr::Array { .. }, .. }
	);

	assert_matches!(
		statement("for (.var:i=0; ${i} < 10; .var:i=${i} + 1) { print ${i} }", &mut interner),
		Statement::For {
			init,
			condition: Expr::Comparison { .. },
			increment,
			..
		} => {
			assert_matches!(*init, Statement::Assign { .. });
			assert_matches!(*increment, Statement::Assign { .. });
		}
	);
}


#[test]
fn test_functions() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		statement("setup() { +tn:demo; print done }", &mut interner),
		Statement::FunctionDecl { body, .. } => assert_eq!(body.len(), 2)
	);

	assert_matches!(
		statement("setup ( )", &mut interner),
		Statement::FunctionCall { .. }
	);
}


#[test]
fn test_block_errors() {
	assert_eq!(error("while true { print 1").message(), "} expected");
	assert_eq!(error("if true print 1").message(), "{ expected");
	assert_eq!(error("for (a; b) {}").message(), "init; condition; increment expected");
	assert_eq!(error("if 1 + { }").message(), "unexpected end of command, expected expression");
}


#[test]
fn test_error_contexts() {
	let error = error("if true { get }");

	let messages: Vec<_> = error
		.contexts()
		.iter()
		.map(|context| context.message.as_ref())
		.collect();

	assert_eq!(
		messages,
		["path expected", "parsing get command", "parsing block", "parsing if statement"]
	);

	let rendered = error.to_string();

	assert!(rendered.starts_with("if true { get }\n^^^^^^^^^^^^^^^\nparsing if statement\n\n"));
	assert!(rendered.ends_with("(empty string)\npath expected"));
}


#[test]
fn test_statement_errors_are_independent() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = parse("pwd; bogus; +xx:a; cd /", &mut interner);

	assert_eq!(errors.len(), 2);
	assert_eq!(errors[0].message(), "command not processed");

	assert_matches!(
		&block.0[..],
		[
			Statement::Command { command: Command::Pwd, .. },
			Statement::IllFormed,
			Statement::IllFormed,
			Statement::Command { command: Command::Cd { .. }, .. },
		]
	);
}


#[test]
fn test_manual() {
	assert!(manual(Some("ls")).map_or(false, |text| text.starts_with("usage: ls")));
	assert!(manual(Some("lsrack")).is_some());
	assert!(manual(Some("nothing")).is_none());
	assert!(manual(None).map_or(false, |text| text.contains(".var:")));
}
