use super::{ast, lexer, symbol, Error, Frame, SourcePos};


/// A broken interpolation. Offsets are bytes in the interpolated text.
#[derive(Debug, Clone, PartialEq)]
pub enum Invalid {
	/// No closing brace after the marker at the given offset.
	Unclosed(usize),
	/// A reference whose name the lexer would reject.
	Reference { error: lexer::ErrorKind, start: usize, end: usize },
}


/// Build the node for a string with `&{name}` or `${name}` references.
/// Without references, the result is a plain string leaf. Otherwise it is a format node,
/// whose template has a `%v` for each reference.
pub fn interpolate(
	text: &str,
	pos: SourcePos,
	interner: &mut symbol::Interner,
) -> Result<ast::Expr, Invalid> {
	let mut template = String::with_capacity(text.len());
	let mut literal = String::with_capacity(text.len());
	let mut args = Vec::new();
	let mut rest = text;

	while let Some(ix) = find_marker(rest) {
		let (before, after) = rest.split_at(ix);
		literal.push_str(before);
		template.push_str(&before.replace('%', "%%"));

		let start = text.len() - after.len();

		let close = after
			.find('}')
			.ok_or(Invalid::Unclosed(start))?;

		lexer::validate_dereference(&after[..= close])
			.map_err(|error| Invalid::Reference { error, start, end: start + close + 1 })?;

		let name = after[2 .. close].trim();
		args.push(ast::Expr::Symbol { symbol: interner.get_or_intern(name), pos });
		template.push_str("%v");

		rest = &after[close + 1 ..];
	}

	if args.is_empty() {
		return Ok(ast::Expr::string(literal + rest, pos));
	}

	template.push_str(&rest.replace('%', "%%"));

	Ok(ast::Expr::Format { template: template.into(), args: args.into(), pos })
}


fn find_marker(text: &str) -> Option<usize> {
	let amp = text.find("&{");
	let dollar = text.find("${");

	match (amp, dollar) {
		(Some(a), Some(d)) => Some(a.min(d)),
		(a, d) => a.or(d),
	}
}


/// Parse a string operand: either a quoted string spanning the whole frame, or the whole
/// frame as unquoted text.
pub fn parse(frame: Frame, interner: &mut symbol::Interner) -> Result<ast::Expr, Error> {
	let frame = frame.trim();
	let text = frame.text();

	let quoted = text.len() >= 2
		&& text.starts_with('"')
		&& text.ends_with('"')
		&& !text.ends_with("\\\"");

	let (contents, base) = if quoted {
		(lexer::unescape(text), frame.start() + 1)
	} else {
		(text.to_owned(), frame.start())
	};

	interpolate(&contents, frame.pos(), interner)
		.map_err(
			|invalid| match invalid {
				Invalid::Unclosed(offset) => Error::new(
					frame.new(base + offset, base + offset + 2),
					"unclosed interpolation, } expected"
				),

				Invalid::Reference { error, start, end } => Error::new(
					frame.new(base + start, base + end),
					error.to_string()
				),
			}
		)
}
