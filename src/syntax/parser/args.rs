use std::{cell::RefCell, collections::HashMap, rc::Rc};

use regex::Regex;

use super::{ast::Arguments, Error, Frame};


/// The argument names a command accepts.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
	/// Arguments followed by a value: `-s name`.
	pub values: &'static [&'static str],
	/// Boolean flags: `-r`.
	pub flags: &'static [&'static str],
}


impl ArgSpec {
	/// The pattern matching a single argument.
	fn unit(&self) -> String {
		let names = |names: &[&str]| {
			names
				.iter()
				.map(|name| regex::escape(name))
				.collect::<Vec<_>>()
				.join("|")
		};

		let value = format!(r"-(?:{})\s+\S+", names(self.values));
		let flag = format!(r"-(?:{})", names(self.flags));

		match (self.values.is_empty(), self.flags.is_empty()) {
			(false, false) => format!("(?:{}|{})", value, flag),
			(false, true) => format!("(?:{})", value),
			(true, false) => format!("(?:{})", flag),
			(true, true) => String::new(),
		}
	}


	/// The cluster patterns for the spec, compiled on first use and cached per thread.
	/// Specs that accept no arguments have none.
	fn patterns(&self) -> Option<Rc<Patterns>> {
		thread_local! {
			static PATTERNS: RefCell<HashMap<String, Rc<Patterns>>> = RefCell::new(HashMap::new());
		}

		let unit = self.unit();

		if unit.is_empty() {
			return None;
		}

		let patterns = PATTERNS.with(
			|cache| cache
				.borrow_mut()
				.entry(unit)
				.or_insert_with_key(|unit| Rc::new(Patterns::new(unit)))
				.clone()
		);

		Some(patterns)
	}
}


/// Patterns matching the argument clusters at the start and at the end of a frame.
#[derive(Debug)]
struct Patterns {
	prefix: Regex,
	suffix: Regex,
}


impl Patterns {
	fn new(unit: &str) -> Self {
		// Names are escaped, so the patterns are always valid.
		let prefix = Regex::new(&format!(r"^(?:{}(?:\s+|$))+", unit))
			.expect("invalid argument prefix pattern");
		let suffix = Regex::new(&format!(r"(?:^|\s){}(?:\s+{})*\s*$", unit, unit))
			.expect("invalid argument suffix pattern");

		Self { prefix, suffix }
	}
}


/// Parse the arguments around an operand. Arguments may appear as a cluster before the
/// operand, after it, or both. The clusters are found with patterns built from the allowed
/// names, searching inward from both ends of the frame. Returns the arguments and the
/// operand frame, which may be empty.
pub fn parse<'a>(frame: Frame<'a>, spec: ArgSpec) -> Result<(Arguments, Frame<'a>), Error> {
	let frame = frame.trim();

	let patterns = match spec.patterns() {
		Some(patterns) => patterns,
		None => return Ok((Arguments::new(), frame)),
	};

	let text = frame.text();

	let prefix_end = patterns.prefix
		.find(text)
		.map_or(0, |found| found.end());

	let suffix_start = patterns.suffix
		.find(&text[prefix_end ..])
		.map_or(text.len(), |found| prefix_end + found.start());

	let mut args = Arguments::new();

	let clusters = [
		frame.new(frame.start(), frame.start() + prefix_end),
		frame.new(frame.start() + suffix_start, frame.end()),
	];

	for cluster in clusters.iter() {
		parse_cluster(*cluster, spec, &mut args)?;
	}

	let operand = frame
		.new(frame.start() + prefix_end, frame.start() + suffix_start)
		.trim();

	Ok((args, operand))
}


/// Parse a cluster of arguments, already known to match the argument patterns.
fn parse_cluster(cluster: Frame, spec: ArgSpec, args: &mut Arguments) -> Result<(), Error> {
	let mut rest = cluster.trim();

	while !rest.is_empty() {
		let (word, tail) = rest.split_word();
		let name = word.text().trim_start_matches('-');

		let (value, tail) = if spec.values.contains(&name) {
			let (value, tail) = tail.split_word();
			(value.text(), tail)
		} else {
			("", tail)
		};

		if args.contains_key(name) {
			return Err(Error::new(word, "argument specified twice"));
		}

		args.insert(name.into(), value.into());
		rest = tail;
	}

	Ok(())
}


#[cfg(test)]
mod tests {
	use super::*;

	use assert_matches::assert_matches;


	const SPEC: ArgSpec = ArgSpec { values: &["a", "s"], flags: &["v", "f"] };


	fn args(pairs: &[(&str, &str)]) -> Arguments {
		pairs
			.iter()
			.map(|(name, value)| ((*name).into(), (*value).into()))
			.collect()
	}


	#[test]
	fn test_both_ends() {
		let frame = Frame::whole("-a 42 -v coucou -f -s dazd");
		let (parsed, operand) = parse(frame, SPEC).expect("failed to parse arguments");

		assert_eq!(parsed, args(&[("a", "42"), ("s", "dazd"), ("v", ""), ("f", "")]));
		assert_eq!(operand.text(), "coucou");
	}


	#[test]
	fn test_no_arguments() {
		let frame = Frame::whole("  /Physical/site ");
		let (parsed, operand) = parse(frame, SPEC).expect("failed to parse arguments");

		assert!(parsed.is_empty());
		assert_eq!(operand.text(), "/Physical/site");
	}


	#[test]
	fn test_only_arguments() {
		let frame = Frame::whole("-s name -v");
		let (parsed, operand) = parse(frame, SPEC).expect("failed to parse arguments");

		assert_eq!(parsed, args(&[("s", "name"), ("v", "")]));
		assert!(operand.is_empty());
	}


	#[test]
	fn test_words_with_dashes() {
		let frame = Frame::whole("-v rack-01 -fx");
		let (parsed, operand) = parse(frame, SPEC).expect("failed to parse arguments");

		assert_eq!(parsed, args(&[("v", "")]));
		assert_eq!(operand.text(), "rack-01 -fx");
	}


	#[test]
	fn test_patterns_cached() {
		let first = SPEC.patterns().expect("missing patterns");
		let second = SPEC.patterns().expect("missing patterns");

		assert!(Rc::ptr_eq(&first, &second));
		assert!(ArgSpec { values: &[], flags: &[] }.patterns().is_none());
	}


	#[test]
	fn test_duplicate() {
		let frame = Frame::whole("-v -a 1 path -v");

		assert_matches!(
			parse(frame, SPEC),
			Err(error) => assert_eq!(error.message(), "argument specified twice")
		);
	}
}
