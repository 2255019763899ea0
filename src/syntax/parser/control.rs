use super::{ast, is_word_byte, scan, Error, Frame, Parser};


/// If the frame starts with the keyword, as a whole word, return the rest of the frame.
fn strip_keyword<'a>(frame: Frame<'a>, keyword: &str) -> Option<Frame<'a>> {
	if !frame.starts_with(keyword) {
		return None;
	}

	let end = frame.start() + keyword.len();

	match frame.at(end) {
		Some(c) if is_word_byte(c) || matches!(c, b':' | b'/' | b'.' | b'-' | b'@') => None,
		_ => Some(frame.from(end).trim()),
	}
}


impl<'i> Parser<'i> {
	/// Parse `if`, `while` and `for` statements. Returns None if the frame doesn't start
	/// with a control keyword.
	pub(super) fn parse_control(&mut self, frame: Frame) -> Result<Option<ast::Statement>, Error> {
		if let Some(rest) = strip_keyword(frame, "if") {
			return self
				.parse_if(frame, rest)
				.map(Some)
				.map_err(|error| error.extend(frame, "parsing if statement"));
		}

		if let Some(rest) = strip_keyword(frame, "while") {
			return self
				.parse_while(frame, rest)
				.map(Some)
				.map_err(|error| error.extend(frame, "parsing while loop"));
		}

		if let Some(rest) = strip_keyword(frame, "for") {
			return self
				.parse_for(frame, rest)
				.map(Some)
				.map_err(|error| error.extend(frame, "parsing for loop"));
		}

		Ok(None)
	}


	/// `C { } elif C { } else { }`, after the `if`.
	fn parse_if(&mut self, frame: Frame, rest: Frame) -> Result<ast::Statement, Error> {
		let (condition, then, mut rest) = self.parse_conditional(rest)?;

		let mut elifs = Vec::new();
		let mut otherwise = None;

		while !rest.is_empty() {
			if let Some(clause) = strip_keyword(rest, "elif") {
				let (condition, block, tail) = self.parse_conditional(clause)?;
				elifs.push((condition, block));
				rest = tail;
			} else if let Some(clause) = strip_keyword(rest, "else") {
				otherwise = Some(self.parse_body(clause)?);
				break;
			} else {
				return Err(Error::new(rest, "elif or else expected"));
			}
		}

		Ok(
			ast::Statement::If {
				condition,
				then,
				elifs: elifs.into(),
				otherwise,
				pos: frame.pos(),
			}
		)
	}


	/// A condition followed by a block. Returns the trimmed text after the block.
	fn parse_conditional<'a>(
		&mut self,
		frame: Frame<'a>,
	) -> Result<(ast::Expr, ast::Block, Frame<'a>), Error> {
		let (header, block, rest) = self.parse_braced(frame)?;

		let condition = self
			.parse_expression(header)
			.map_err(|error| error.extend(header, "parsing condition"))?;

		Ok((condition, block, rest.trim()))
	}


	/// `C { }`, after the `while`.
	fn parse_while(&mut self, frame: Frame, rest: Frame) -> Result<ast::Statement, Error> {
		let (condition, body, rest) = self.parse_conditional(rest)?;

		if !rest.is_empty() {
			return Err(Error::new(rest, "unexpected text after block"));
		}

		Ok(ast::Statement::While { condition, body, pos: frame.pos() })
	}


	/// `(init; condition; increment) { }`, `name in a..b { }` or `name in expr { }`, after
	/// the `for`.
	fn parse_for(&mut self, frame: Frame, rest: Frame) -> Result<ast::Statement, Error> {
		let (header, body, tail) = self.parse_braced(rest)?;

		if !tail.trim().is_empty() {
			return Err(Error::new(tail.trim(), "unexpected text after block"));
		}

		let header = header.trim();

		if header.starts_with("(") {
			return self.parse_c_for(frame, header, body);
		}

		let (variable, rest) = header.split_word();
		let variable = self.parse_name(variable)?;

		let range = strip_keyword(rest, "in")
			.ok_or_else(|| Error::new(rest, "in expected"))?;

		if let Some((start, end)) = parse_range(range) {
			return Ok(
				ast::Statement::ForRange { variable, start, end, body, pos: frame.pos() }
			);
		}

		let array = self
			.parse_expression(range)
			.map_err(|error| error.extend(range, "parsing iterated array"))?;

		Ok(ast::Statement::ForIn { variable, array, body, pos: frame.pos() })
	}


	fn parse_c_for(
		&mut self,
		frame: Frame,
		header: Frame,
		body: ast::Block,
	) -> Result<ast::Statement, Error> {
		let close = scan::matching_close(header, header.start())
			.filter(|&close| close + 1 == header.end() && header.at(close) == Some(b')'))
			.ok_or_else(|| Error::new(header, ") expected"))?;

		let inner = header.new(header.start() + 1, close);
		let parts = scan::split_top_level(inner, b';');

		let (init, condition, increment) = match parts.as_slice() {
			[init, condition, increment] => (*init, *condition, *increment),
			_ => return Err(Error::new(inner, "init; condition; increment expected")),
		};

		let init = self
			.parse_statement(init)?
			.ok_or_else(|| Error::new(init, "init statement expected"))?;

		let condition = self
			.parse_expression(condition)
			.map_err(|error| error.extend(condition, "parsing condition"))?;

		let increment = self
			.parse_statement(increment)?
			.ok_or_else(|| Error::new(increment, "increment statement expected"))?;

		Ok(
			ast::Statement::For {
				init: init.into(),
				condition,
				increment: increment.into(),
				body,
				pos: frame.pos(),
			}
		)
	}
}


/// Parse `a..b` with integer literal bounds.
fn parse_range(frame: Frame) -> Option<(i64, i64)> {
	let (start, end) = frame.text().split_once("..")?;

	let start = start.trim().parse().ok()?;
	let end = end.trim().parse().ok()?;

	Some((start, end))
}

