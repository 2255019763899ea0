use super::{
	ast,
	lexer::{self, Literal, Operator},
	Error,
	ErrorReporter,
	Parser,
	SourcePos,
	Token,
	TokenKind,
};
use crate::syntax::parser::string::{self, Invalid};


fn arithmetic_op(op: Operator) -> Option<ast::ArithmeticOp> {
	match op {
		Operator::Plus => Some(ast::ArithmeticOp::Plus),
		Operator::Minus => Some(ast::ArithmeticOp::Minus),
		Operator::Times => Some(ast::ArithmeticOp::Times),
		Operator::Div => Some(ast::ArithmeticOp::Div),
		Operator::Mod => Some(ast::ArithmeticOp::Mod),
		_ => None,
	}
}


fn comparison_op(op: Operator) -> Option<ast::ComparisonOp> {
	match op {
		Operator::Equals => Some(ast::ComparisonOp::Equals),
		Operator::NotEquals => Some(ast::ComparisonOp::NotEquals),
		Operator::Greater => Some(ast::ComparisonOp::Greater),
		Operator::GreaterEquals => Some(ast::ComparisonOp::GreaterEquals),
		Operator::Lower => Some(ast::ComparisonOp::Lower),
		Operator::LowerEquals => Some(ast::ComparisonOp::LowerEquals),
		_ => None,
	}
}


/// Build the node for a binary operator. Only called with the operators accepted by the
/// precedence levels.
fn binary(op: Operator, left: ast::Expr, right: ast::Expr) -> ast::Expr {
	let pos = left.pos().join(right.pos());
	let left = Box::new(left);
	let right = Box::new(right);

	if let Some(op) = arithmetic_op(op) {
		return ast::Expr::Arithmetic { op, left, right, pos };
	}

	if let Some(op) = comparison_op(op) {
		return ast::Expr::Comparison { op, left, right, pos };
	}

	let op = if op == Operator::And { ast::LogicalOp::And } else { ast::LogicalOp::Or };

	ast::Expr::Logical { op, left, right, pos }
}


impl<'i, E> Parser<'i, E>
where
	E: ErrorReporter,
{
	/// Parse a single expression.
	pub(super) fn parse_expression(&mut self) -> Result<ast::Expr, Error> {
		let parse_factor =
			move |parser: &mut Self| parser.parse_binop(Self::parse_unop, Operator::is_factor);

		let parse_term =
			move |parser: &mut Self| parser.parse_binop(parse_factor, Operator::is_term);

		let parse_comparison =
			move |parser: &mut Self| parser.parse_binop(parse_term, Operator::is_comparison);

		let parse_equality =
			move |parser: &mut Self| parser.parse_binop(parse_comparison, Operator::is_equality);

		let parse_and =
			move |parser: &mut Self| parser.parse_binop(parse_equality, |&op| op == Operator::And);

		let parse_or =
			move |parser: &mut Self| parser.parse_binop(parse_and, |&op| op == Operator::Or);

		parse_or(self)
	}


	/// Parse a higher precedence expression, optionally followed by operators of the
	/// current level. Operators are left associative.
	fn parse_binop<P, F>(
		&mut self,
		mut parse_higher_prec_op: P,
		mut check: F,
	) -> Result<ast::Expr, Error>
	where
		P: FnMut(&mut Self) -> Result<ast::Expr, Error>,
		F: FnMut(&Operator) -> bool,
	{
		let mut expr = parse_higher_prec_op(self)?;

		loop {
			match self.token {
				Some(Token { kind: TokenKind::Operator(op), .. }) if check(&op) => {
					self.bump();

					let right = parse_higher_prec_op(self)?;

					expr = binary(op, expr, right);
				}

				_ => break,
			}
		}

		Ok(expr)
	}


	/// Parse a higher precedence expression, optionally starting with a unary operator.
	fn parse_unop(&mut self) -> Result<ast::Expr, Error> {
		match self.token {
			Some(Token { kind: TokenKind::Operator(op), offset, .. }) if op.is_unary() => {
				self.bump();

				let operand = self.parse_unop()?;
				let pos = SourcePos::new(offset, operand.pos().end);
				let operand = Box::new(operand);

				Ok(
					if op == Operator::Not {
						ast::Expr::Not { operand, pos }
					} else {
						ast::Expr::Negate { operand, pos }
					}
				)
			}

			_ => self.parse_primary(),
		}
	}


	/// Parse a higher precedence expression.
	fn parse_primary(&mut self) -> Result<ast::Expr, Error> {
		match self.token.take() {
			// Quoted string, possibly interpolated.
			Some(Token { kind: TokenKind::Literal(Literal::String(contents)), offset, text }) => {
				let pos = SourcePos::new(offset, offset + text.len());
				self.prev_end = pos.end;
				self.step();

				string::interpolate(&contents, pos, self.interner)
					.map_err(
						|invalid| match invalid {
							Invalid::Unclosed(_) => Error::UnclosedInterpolation { pos },
							Invalid::Reference { error, .. } => Error::Lexer(
								lexer::Error { error, offset: pos.start, end: pos.end }
							),
						}
					)
			}

			// Basic literal.
			Some(Token { kind: TokenKind::Literal(literal), offset, text }) => {
				let pos = SourcePos::new(offset, offset + text.len());
				self.prev_end = pos.end;
				self.step();

				Ok(ast::Expr::Literal { literal: literal.into(), pos })
			}

			// Variable.
			Some(Token { kind: TokenKind::Dereference(symbol), offset, text }) => {
				let pos = SourcePos::new(offset, offset + text.len());
				self.prev_end = pos.end;
				self.step();

				Ok(ast::Expr::Symbol { symbol, pos })
			}

			// Array literal.
			Some(token @ Token { kind: TokenKind::OpenBracket, .. }) => {
				self.token = Some(token);
				let open = self.expect(TokenKind::OpenBracket)?;

				let mut items = Vec::new();

				while !self.is(&TokenKind::CloseBracket) {
					items.push(self.parse_expression()?);

					if self.is(&TokenKind::Comma) {
						self.bump();
					} else {
						break;
					}
				}

				let close = self.expect(TokenKind::CloseBracket)?;

				Ok(ast::Expr::Array {
					items: items.into(),
					pos: SourcePos::new(open.offset, close.end()),
				})
			}

			// Dict literal.
			Some(token @ Token { kind: TokenKind::OpenBrace, .. }) => {
				self.token = Some(token);
				let open = self.expect(TokenKind::OpenBrace)?;

				let mut entries = Vec::new();

				while !self.is(&TokenKind::CloseBrace) {
					let key = self.parse_dict_key()?;
					self.expect(TokenKind::Colon)?;
					entries.push((key, self.parse_expression()?));

					if self.is(&TokenKind::Comma) {
						self.bump();
					} else {
						break;
					}
				}

				let close = self.expect(TokenKind::CloseBrace)?;

				Ok(ast::Expr::Dict {
					entries: entries.into(),
					pos: SourcePos::new(open.offset, close.end()),
				})
			}

			// Parenthesis.
			Some(token @ Token { kind: TokenKind::OpenParens, .. }) => {
				self.token = Some(token);
				self.bump();

				let expr = self.parse_expression()?;
				self.expect(TokenKind::CloseParens)?;

				Ok(expr)
			}

			// Some other unexpected token.
			Some(token) => {
				// We need to restore the token because it may be some delimiter.
				self.token = Some(token.clone());
				Err(Error::unexpected_msg(token, "expression"))
			}

			None => Err(self.end_error(super::Expected::Message("expression"))),
		}
	}


	/// Parse a dict key: a quoted string, or a bare word.
	fn parse_dict_key(&mut self) -> Result<Box<str>, Error> {
		match self.token.take() {
			Some(Token { kind: TokenKind::Literal(Literal::String(key)), offset, text }) => {
				self.prev_end = offset + text.len();
				self.step();
				Ok(key)
			}

			Some(Token {
				kind: TokenKind::Identifier(_)
					| TokenKind::Keyword(_)
					| TokenKind::Entity(_)
					| TokenKind::EntityList(_),
				offset,
				text,
			}) => {
				self.prev_end = offset + text.len();
				self.step();
				Ok(text)
			}

			Some(token) => {
				self.token = Some(token.clone());
				Err(Error::unexpected_msg(token, "dict key"))
			}

			None => Err(self.end_error(super::Expected::Message("dict key"))),
		}
	}
}
