use super::{
	ast::{self, IllFormed},
	lexer::{Literal, Operator},
	sync::{self, WithSync},
	Error,
	ErrorReporter,
	Expected,
	Parser,
	ResultExt,
	SourcePos,
	Strategy,
	Token,
	TokenKind,
};


/// Whether the value starting with the given token should be parsed as an expression,
/// rather than as a bare word. Numbers glued to words, like `2U`, are words.
fn starts_expression(token: &Token, next: Option<&Token>) -> bool {
	let glued = next.filter(|next| next.offset == token.end());

	match &token.kind {
		TokenKind::Literal(Literal::String(_))
		| TokenKind::Literal(Literal::Bool(_))
		| TokenKind::Dereference(_)
		| TokenKind::OpenParens
		| TokenKind::OpenBracket
		| TokenKind::Operator(Operator::Not) => true,

		TokenKind::Literal(Literal::Int(_)) | TokenKind::Literal(Literal::Float(_)) => !matches!(
			glued,
			Some(Token {
				kind: TokenKind::Identifier(_)
					| TokenKind::Keyword(_)
					| TokenKind::Entity(_)
					| TokenKind::EntityList(_),
				..
			})
		),

		TokenKind::Operator(Operator::Minus) => matches!(
			glued,
			Some(Token {
				kind: TokenKind::Literal(Literal::Int(_)) | TokenKind::Literal(Literal::Float(_)),
				..
			})
		),

		_ => false,
	}
}


impl<'i, E> Parser<'i, E>
where
	E: ErrorReporter,
{
	/// Parse shorthand statements until the end of input.
	pub(super) fn parse_shorthand(&mut self) -> ast::Block {
		let mut statements = Vec::new();

		// Shorthand has no text fallback: a character the lexer skipped would silently
		// change the targeted path.
		for pos in std::mem::take(&mut self.skipped) {
			let error = Error::UnexpectedCharacter { pos };
			tracing::warn!(offset = pos.start, "unrecognized command");
			self.error_reporter.report(error);
		}

		while self.token.is_some() {
			let statement = self
				.parse_shorthand_statement()
				.synchronize(self);

			let synchronized = statement.is_ill_formed();
			statements.push(statement);

			// Synchronization already skipped the terminator.
			if synchronized {
				continue;
			}

			match self.token.take() {
				None => break,

				Some(Token { kind: TokenKind::Semicolon, .. }) => self.step(),

				Some(token) => {
					self.token = Some(token.clone());
					let error = Error::unexpected(token, TokenKind::Semicolon);
					sync::Synchronizable::synchronize(self, error, Strategy::statement());
				}
			}
		}

		statements.into()
	}


	fn parse_shorthand_statement(&mut self) -> sync::Result<ast::Statement, Error> {
		let start = self.offset();

		match &self.token {
			Some(Token { kind: TokenKind::Operator(Operator::Plus), .. }) => {
				self.bump();
				self.parse_create(start)
			}

			Some(Token { kind: TokenKind::Operator(Operator::Minus), .. }) => {
				self.bump();

				let path = self
					.parse_path(ast::PathMode::Std)
					.with_sync(Strategy::statement())?;

				Ok(self.command(ast::Command::Delete { path }, start))
			}

			Some(Token { kind: TokenKind::Operator(Operator::Assign), .. }) => {
				self.bump();
				self.parse_select(start)
			}

			Some(_) => self.parse_update(start),

			None => Err((self.end_error(Expected::Message("command")), Strategy::eof())),
		}
	}


	/// Wrap a command in a statement starting at the given offset.
	fn command(&self, command: ast::Command, start: usize) -> ast::Statement {
		ast::Statement::Command { command, pos: SourcePos::new(start, self.prev_end) }
	}


	/// `+code:path@param@param`, after the plus.
	fn parse_create(&mut self, start: usize) -> sync::Result<ast::Statement, Error> {
		let kind = self
			.eat(|token| match token {
				Token { kind: TokenKind::Entity(kind), .. } => Ok(kind),
				token => Err((Error::unexpected_msg(token.clone(), "entity kind"), token)),
			})
			.with_sync(Strategy::statement())?;

		self.expect(TokenKind::Colon).with_sync(Strategy::statement())?;

		let path = self
			.parse_path(kind.path_mode())
			.with_sync(Strategy::statement())?;

		let names = kind.positional_attributes();
		let mut attributes = Vec::new();

		while self.is(&TokenKind::At) {
			let at = self.offset();
			self.bump();

			let value = self.parse_value().with_sync(Strategy::statement())?;

			match names.get(attributes.len()) {
				Some(name) => attributes.push(ast::Attribute { name: (*name).into(), value }),
				None => {
					let pos = SourcePos::new(at, self.prev_end);
					return Err((Error::TooManyParameters { kind, pos }, Strategy::statement()));
				}
			}
		}

		Ok(
			self.command(
				ast::Command::Create { kind, path, attributes: attributes.into() },
				start,
			)
		)
	}


	/// `=path`, `={path, path}` or a bare `=`, after the equals sign.
	fn parse_select(&mut self, start: usize) -> sync::Result<ast::Statement, Error> {
		let mut paths = Vec::new();

		match &self.token {
			None | Some(Token { kind: TokenKind::Semicolon, .. }) => (),

			Some(Token { kind: TokenKind::OpenBrace, .. }) => {
				self.bump();

				loop {
					let path = self
						.parse_path(ast::PathMode::Std)
						.with_sync(Strategy::statement())?;

					paths.push(path);

					if self.is(&TokenKind::Comma) {
						self.bump();
					} else {
						break;
					}
				}

				self.expect(TokenKind::CloseBrace).with_sync(Strategy::statement())?;
			}

			Some(_) => {
				let path = self
					.parse_path(ast::PathMode::Std)
					.with_sync(Strategy::statement())?;

				paths.push(path);
			}
		}

		Ok(self.command(ast::Command::Select { paths: paths.into() }, start))
	}


	/// `path:attribute=value`.
	fn parse_update(&mut self, start: usize) -> sync::Result<ast::Statement, Error> {
		let path = self
			.parse_path(ast::PathMode::Std)
			.with_sync(Strategy::statement())?;

		self.expect(TokenKind::Colon).with_sync(Strategy::statement())?;

		let name = self
			.parse_words("attribute name")
			.map(|(text, _)| text)
			.with_sync(Strategy::statement())?;

		self.expect(TokenKind::Operator(Operator::Assign))
			.with_sync(Strategy::statement())?;

		let value = self.parse_value().with_sync(Strategy::statement())?;

		let attribute = ast::Attribute { name: name.into(), value };

		Ok(
			self.command(
				ast::Command::Update { path, attributes: Box::new([attribute]) },
				start,
			)
		)
	}


	/// Parse a path: a run of adjacent path tokens.
	fn parse_path(&mut self, mode: ast::PathMode) -> Result<ast::Expr, Error> {
		self.parse_word_run("path")
			.map(|path| path.into_path(mode))
	}


	/// Parse a parameter or attribute value: an expression, a brace list of words, or a
	/// bare word.
	fn parse_value(&mut self) -> Result<ast::Expr, Error> {
		match &self.token {
			Some(Token { kind: TokenKind::OpenBrace, .. }) => self.parse_brace_list(),

			Some(token) if starts_expression(token, self.cursor.peek()) => self.parse_expression(),

			_ => self.parse_word_run("value"),
		}
	}


	/// `{a, "b c", d}`, as an array of strings.
	fn parse_brace_list(&mut self) -> Result<ast::Expr, Error> {
		let open = self.expect(TokenKind::OpenBrace)?;
		let mut items = Vec::new();

		while !self.is(&TokenKind::CloseBrace) {
			let item = match self.token.take() {
				Some(Token { kind: TokenKind::Literal(Literal::String(string)), offset, text }) => {
					self.prev_end = offset + text.len();
					self.step();
					ast::Expr::string(string, SourcePos::new(offset, self.prev_end))
				}

				token => {
					self.token = token;
					self.parse_word_run("list item")?
				}
			};

			items.push(item);

			if self.is(&TokenKind::Comma) {
				self.bump();
			} else {
				break;
			}
		}

		let close = self.expect(TokenKind::CloseBrace)?;

		Ok(ast::Expr::Array {
			items: items.into(),
			pos: SourcePos::new(open.offset, close.end()),
		})
	}


	/// Parse a run of adjacent path tokens as a string, interpolating variables.
	fn parse_word_run(&mut self, expected: &'static str) -> Result<ast::Expr, Error> {
		let start = self.offset();
		let mut template = String::new();
		let mut args = Vec::new();

		self.collect_words(
			expected,
			|token| match token.kind {
				TokenKind::Dereference(symbol) => {
					template.push_str("%v");
					args.push(ast::Expr::Symbol {
						symbol,
						pos: SourcePos::new(token.offset, token.end()),
					});
				}

				_ => template.push_str(&token.text.replace('%', "%%")),
			}
		)?;

		let pos = SourcePos::new(start, self.prev_end);

		if args.is_empty() {
			Ok(ast::Expr::string(template.replace("%%", "%"), pos))
		} else {
			Ok(ast::Expr::Format { template: template.into(), args: args.into(), pos })
		}
	}


	/// Parse a run of adjacent path tokens as literal text.
	fn parse_words(&mut self, expected: &'static str) -> Result<(String, SourcePos), Error> {
		let start = self.offset();
		let mut text = String::new();

		self.collect_words(expected, |token| text.push_str(&token.text))?;

		Ok((text, SourcePos::new(start, self.prev_end)))
	}


	/// Consume a non empty run of adjacent path tokens.
	fn collect_words<F>(&mut self, expected: &'static str, mut visit: F) -> Result<(), Error>
	where
		F: FnMut(Token),
	{
		let mut empty = true;

		loop {
			let accept = match &self.token {
				Some(token) => token.kind.is_path_part() && (empty || token.offset == self.prev_end),
				None => false,
			};

			if !accept {
				break;
			}

			if let Some(token) = self.bump() {
				visit(token);
			}

			empty = false;
		}

		if empty {
			return Err(
				match self.token.clone() {
					Some(token) => Error::unexpected_msg(token, expected),
					None => self.end_error(Expected::Message(expected)),
				}
			);
		}

		Ok(())
	}
}
