//! A printf-like facility, used by `printf` and by string interpolation.
//! Supported directives are `%d`, `%s`, `%f` (with optional precision, like `%.2f`), `%v`
//! and the `%%` escape.

use std::fmt::{self, Display};

use super::Value;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
	/// The number of directives and arguments differ.
	ArgumentCount { directives: usize, args: usize },
	/// The argument type doesn't suit the directive.
	InvalidArgument { directive: char, value: &'static str },
	/// Unknown or incomplete directive.
	InvalidDirective { offset: usize },
}


impl Display for FormatError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::ArgumentCount { directives, args } => write!(
				f,
				"wrong number of arguments for format ({} directives, {} arguments)",
				directives,
				args
			),

			Self::InvalidArgument { directive, value } => write!(
				f,
				"invalid argument for %{}: {}",
				directive,
				value
			),

			Self::InvalidDirective { offset } => write!(
				f,
				"invalid format directive at offset {}",
				offset
			),
		}
	}
}


impl std::error::Error for FormatError { }


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
	Text(&'a str),
	Percent,
	Directive { verb: char, precision: Option<usize> },
}


/// Split the template in text and directives.
fn pieces(template: &str) -> Result<Vec<Piece>, FormatError> {
	let mut pieces = Vec::new();
	let mut rest = template;

	while let Some(ix) = rest.find('%') {
		if ix > 0 {
			pieces.push(Piece::Text(&rest[.. ix]));
		}

		let offset = template.len() - rest.len() + ix;
		let directive = &rest[ix + 1 ..];
		let invalid = FormatError::InvalidDirective { offset };

		let (precision, spec) = match directive.strip_prefix('.') {
			Some(spec) => {
				let digits = spec
					.find(|c: char| !c.is_ascii_digit())
					.unwrap_or(spec.len());

				let precision = spec[.. digits].parse().map_err(|_| invalid.clone())?;

				(Some(precision), &spec[digits ..])
			}

			None => (None, directive),
		};

		let verb = spec.chars().next().ok_or_else(|| invalid.clone())?;

		match (verb, precision) {
			('%', None) => pieces.push(Piece::Percent),
			('d', None) | ('s', None) | ('v', None) | ('f', _) => {
				pieces.push(Piece::Directive { verb, precision })
			}
			_ => return Err(invalid),
		}

		rest = &spec[verb.len_utf8() ..];
	}

	if !rest.is_empty() {
		pieces.push(Piece::Text(rest));
	}

	Ok(pieces)
}


/// Format the arguments according to the template. The number of directives must match the
/// number of arguments.
pub fn format(template: &str, args: &[Value]) -> Result<String, FormatError> {
	let pieces = pieces(template)?;

	let directives = pieces
		.iter()
		.filter(|piece| matches!(piece, Piece::Directive { .. }))
		.count();

	if directives != args.len() {
		return Err(FormatError::ArgumentCount { directives, args: args.len() });
	}

	let mut output = String::with_capacity(template.len());
	let mut args = args.iter();

	for piece in pieces {
		match piece {
			Piece::Text(text) => output.push_str(text),
			Piece::Percent => output.push('%'),

			Piece::Directive { verb, precision } => {
				let arg = args
					.next()
					.ok_or(FormatError::ArgumentCount { directives, args: 0 })?;

				let invalid = || FormatError::InvalidArgument { directive: verb, value: arg.type_name() };

				let text = match (verb, arg) {
					('d', Value::Int(int)) => int.to_string(),
					('d', _) => return Err(invalid()),

					('f', Value::Float(float)) => format!("{:.*}", precision.unwrap_or(6), float.0),
					('f', Value::Int(int)) => format!("{:.*}", precision.unwrap_or(6), *int as f64),
					('f', _) => return Err(invalid()),

					(_, value) => value.text().into_owned(),
				};

				output.push_str(&text);
			}
		}
	}

	Ok(output)
}


#[cfg(test)]
mod tests {
	use super::*;


	#[test]
	fn test_directives() {
		let args = [Value::from(42), Value::from("rack"), Value::from(1.5), Value::from(true)];

		assert_eq!(
			format("%d %s %f %v 100%%", &args).as_deref(),
			Ok("42 rack 1.500000 true 100%")
		);
	}


	#[test]
	fn test_precision() {
		assert_eq!(format("%.2f", &[Value::from(3.14159)]).as_deref(), Ok("3.14"));
		assert_eq!(format("%.0f", &[Value::from(2)]).as_deref(), Ok("2"));
	}


	#[test]
	fn test_argument_count() {
		assert_eq!(
			format("%d and %d", &[Value::from(1)]),
			Err(FormatError::ArgumentCount { directives: 2, args: 1 })
		);

		assert_eq!(
			format("no directives", &[Value::from(1)]),
			Err(FormatError::ArgumentCount { directives: 0, args: 1 })
		);
	}


	#[test]
	fn test_invalid() {
		assert_eq!(
			format("%d", &[Value::from("x")]),
			Err(FormatError::InvalidArgument { directive: 'd', value: "string" })
		);

		assert_eq!(format("50%", &[]), Err(FormatError::InvalidDirective { offset: 2 }));
		assert_eq!(format("%.2d", &[Value::from(1)]), Err(FormatError::InvalidDirective { offset: 0 }));
	}
}
