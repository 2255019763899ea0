use assert_matches::assert_matches;

use super::*;
use crate::syntax::lexer::ErrorKind;
use ast::{ArithmeticOp, Attribute, Command, ComparisonOp, Expr, Literal, LogicalOp, PathMode, Statement};


fn expr(input: &str, interner: &mut symbol::Interner) -> Result<(Expr, usize), Error> {
	parse_expression(Cursor::from(input), interner)
}


fn shorthand(input: &str, interner: &mut symbol::Interner) -> (ast::Block, Vec<Error>) {
	let mut errors = Vec::new();
	let block = parse_shorthand(Cursor::from(input), interner, |error: Error| errors.push(error));

	(block, errors)
}


macro_rules! int {
	($value:pat) => {
		Expr::Literal { literal: Literal::Int($value), .. }
	};
}


macro_rules! string {
	($value:pat) => {
		Expr::Literal { literal: Literal::String($value), .. }
	};
}


macro_rules! path {
	($mode:pat) => {
		Expr::Path { mode: $mode, .. }
	};
}


fn unbox_path(expr: &Expr) -> &Expr {
	match expr {
		Expr::Path { path, .. } => path,
		other => other,
	}
}


#[test]
fn test_stops_at_unmatched_parens() {
	let mut interner = symbol::Interner::new();
	let result = expr("3 - 4) * 6", &mut interner);

	assert_matches!(
		result,
		Ok((Expr::Arithmetic { op: ArithmeticOp::Minus, left, right, .. }, 5)) => {
			assert_matches!(*left, int!(3));
			assert_matches!(*right, int!(4));
		}
	);
}


#[test]
fn test_precedence() {
	let mut interner = symbol::Interner::new();
	let result = expr("1 + 2 * 3 == 7 && !false", &mut interner);

	assert_matches!(
		result,
		Ok((Expr::Logical { op: LogicalOp::And, left, right, .. }, 24)) => {
			assert_matches!(*right, Expr::Not { .. });
			assert_matches!(
				*left,
				Expr::Comparison { op: ComparisonOp::Equals, left, right, .. } => {
					assert_matches!(*right, int!(7));
					assert_matches!(
						*left,
						Expr::Arithmetic { op: ArithmeticOp::Plus, right, .. } => {
							assert_matches!(*right, Expr::Arithmetic { op: ArithmeticOp::Times, .. })
						}
					);
				}
			);
		}
	);
}


#[test]
fn test_left_associativity() {
	let mut interner = symbol::Interner::new();
	let result = expr("10 - 4 - 3", &mut interner);

	assert_matches!(
		result,
		Ok((Expr::Arithmetic { op: ArithmeticOp::Minus, left, right, .. }, _)) => {
			assert_matches!(*left, Expr::Arithmetic { op: ArithmeticOp::Minus, .. });
			assert_matches!(*right, int!(3));
		}
	);
}


#[test]
fn test_primaries() {
	let mut interner = symbol::Interner::new();
	let result = expr(r#"[1, "rack &{n}", ${ x }, (2.5)]"#, &mut interner);

	assert_matches!(
		result,
		Ok((Expr::Array { items, .. }, _)) => assert_matches!(
			&items[..],
			[
				int!(1),
				Expr::Format { .. },
				Expr::Symbol { .. },
				Expr::Literal { literal: Literal::Float(_), .. },
			]
		)
	);
}


#[test]
fn test_dict_literal() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		expr(r#"{name: "R1", "rack size": 1 + 1}"#, &mut interner),
		Ok((Expr::Dict { entries, .. }, _)) => assert_matches!(
			&entries[..],
			[ (name, string!(_)), (size, Expr::Arithmetic { .. }) ] => {
				assert_eq!(name.as_ref(), "name");
				assert_eq!(size.as_ref(), "rack size");
			}
		)
	);

	assert_matches!(expr("{}", &mut interner), Ok((Expr::Dict { entries, .. }, _)) if entries.is_empty());
	assert_matches!(expr("{1: 2}", &mut interner), Err(Error::Unexpected { .. }));
	assert_matches!(expr("{a 2}", &mut interner), Err(Error::Unexpected { .. }));
}


#[test]
fn test_expression_errors() {
	let mut interner = symbol::Interner::new();

	assert_matches!(expr("1 +", &mut interner), Err(Error::UnexpectedEnd { offset: 3, .. }));
	assert_matches!(expr(") + 1", &mut interner), Err(Error::Unexpected { .. }));
	assert_matches!(
		expr(r#"1 + "abc"#, &mut interner),
		Err(Error::Lexer(lexer::Error { error: ErrorKind::UnterminatedString, .. }))
	);
	assert_matches!(
		expr(r#""&{abc""#, &mut interner),
		Err(Error::UnclosedInterpolation { .. })
	);
	assert_matches!(
		expr(r#""${ 1abc }""#, &mut interner),
		Err(Error::Lexer(lexer::Error { error: ErrorKind::LetterExpected, .. }))
	);
}


#[test]
fn test_create() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = shorthand("+rk:R1/A01@[1,2]@t@front", &mut interner);

	assert!(errors.is_empty(), "{:?}", errors);

	assert_matches!(
		&block.0[..],
		[
			Statement::Command {
				command: Command::Create { kind: EntityKind::Rack, path, attributes },
				..
			}
		] => {
			assert_matches!(path, path!(PathMode::Std));
			assert_matches!(unbox_path(path), string!(p) => assert_eq!(&**p, "R1/A01"));
			assert_matches!(
				&attributes[..],
				[
					Attribute { name: posxyz, value: Expr::Array { .. } },
					Attribute { name: unit, value: string!(t) },
					Attribute { name: rotation, value: string!(front) },
				] => {
					assert_eq!(&**posxyz, "posXYZ");
					assert_eq!(&**unit, "posXYUnit");
					assert_eq!(&**t, "t");
					assert_eq!(&**rotation, "rotation");
					assert_eq!(&**front, "front");
				}
			);
		}
	);
}


#[test]
fn test_create_modes() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = shorthand("+tn:demo@ffffff; +sd:box; +dv:D1@3@2U", &mut interner);

	assert!(errors.is_empty(), "{:?}", errors);

	assert_matches!(
		&block.0[..],
		[
			Statement::Command { command: Command::Create { path: path!(PathMode::Physical), .. }, .. },
			Statement::Command { command: Command::Create { path: path!(PathMode::StrayDevice), .. }, .. },
			Statement::Command {
				command: Command::Create { kind: EntityKind::Device, attributes, .. },
				..
			},
		] => assert_matches!(
			&attributes[..],
			[
				Attribute { value: int!(3), .. },
				Attribute { value: string!(size), .. },
			] => assert_eq!(&**size, "2U")
		)
	);
}


#[test]
fn test_too_many_parameters() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = shorthand("+tn:demo@red@blue", &mut interner);

	assert_matches!(&block.0[..], [ Statement::IllFormed ]);
	assert_matches!(&errors[..], [ Error::TooManyParameters { kind: EntityKind::Tenant, .. } ]);
}


#[test]
fn test_delete_select_update() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = shorthand(
		"-R1/A01; ={a, ../b}; =; rack-${n}:height=42",
		&mut interner,
	);

	assert!(errors.is_empty(), "{:?}", errors);

	assert_matches!(
		&block.0[..],
		[
			Statement::Command { command: Command::Delete { .. }, .. },
			Statement::Command { command: Command::Select { paths: selected }, .. },
			Statement::Command { command: Command::Select { paths: cleared }, .. },
			Statement::Command { command: Command::Update { path, attributes }, .. },
		] => {
			assert_eq!(selected.len(), 2);
			assert!(cleared.is_empty());
			assert_matches!(unbox_path(path), Expr::Format { template, .. } => assert_eq!(&**template, "rack-%v"));
			assert_matches!(
				&attributes[..],
				[ Attribute { name, value: int!(42) } ] => assert_eq!(&**name, "height")
			);
		}
	);
}


#[test]
fn test_recovery() {
	let mut interner = symbol::Interner::new();
	let (block, errors) = shorthand("+xx:foo; -bar; rack:color", &mut interner);

	assert_eq!(errors.len(), 2);
	assert_matches!(
		&block.0[..],
		[
			Statement::IllFormed,
			Statement::Command { command: Command::Delete { .. }, .. },
			Statement::IllFormed,
		]
	);
}


#[test]
fn test_skipped_characters() {
	let mut interner = symbol::Interner::new();

	assert_matches!(
		expr("5é", &mut interner),
		Err(Error::UnexpectedCharacter { pos }) => assert_eq!((pos.start, pos.end), (1, 3))
	);
	assert_matches!(expr("1 ° + 2", &mut interner), Err(Error::UnexpectedCharacter { .. }));

	let (_, errors) = shorthand("-R1é", &mut interner);
	assert_matches!(
		&errors[..],
		[Error::UnexpectedCharacter { pos }] => assert_eq!((pos.start, pos.end), (3, 5))
	);

	let (_, errors) = shorthand("+si:Café@0; R2ü:color=red", &mut interner);
	assert_eq!(errors.len(), 2);
	assert!(errors.iter().all(|error| matches!(error, Error::UnexpectedCharacter { .. })));

	let (_, errors) = shorthand("+tn:demo@\"Café\"", &mut interner);
	assert!(errors.is_empty());
}
