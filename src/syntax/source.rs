use std::{
	borrow::Cow,
	fmt::{self, Display},
	fs::File,
	path::Path,
};


/// A byte range in a logical line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePos {
	pub start: usize,
	pub end: usize,
}


impl SourcePos {
	pub fn new(start: usize, end: usize) -> Self {
		Self { start, end: end.max(start) }
	}


	/// The position of nodes produced while recovering from syntax errors.
	pub fn ill_formed() -> Self {
		Self { start: usize::MAX, end: usize::MAX }
	}


	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}


	/// The smallest range covering both positions.
	pub fn join(self, other: Self) -> Self {
		Self::new(self.start.min(other.start), self.end.max(other.end))
	}
}


impl Display for SourcePos {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "column {}", self.start + 1)
	}
}


/// Write the source line, followed by a caret line underlining the given range.
/// Zero width ranges are shown as `(empty string)`.
pub fn highlight(f: &mut fmt::Formatter, line: &str, pos: SourcePos) -> fmt::Result {
	writeln!(f, "{}", line)?;

	if pos.is_empty() || pos.start >= line.len() {
		return f.write_str("(empty string)");
	}

	let end = pos.end.min(line.len());
	let prefix = line.get(.. pos.start).unwrap_or_default();
	let marked = line.get(pos.start .. end).unwrap_or_default();

	for c in prefix.chars() {
		f.write_str(if c == '\t' { "\t" } else { " " })?;
	}

	for _ in marked.chars() {
		f.write_str("^")?;
	}

	Ok(())
}


/// A logical line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	/// The number of the first physical line, starting at one.
	pub number: usize,
	pub text: Box<str>,
}


/// A script, split in logical lines.
#[derive(Debug)]
pub struct Source {
	/// The origin path, may be something fictional like `<stdin>`.
	pub path: Box<Path>,
	pub lines: Box<[Line]>,
}


impl Source {
	/// Load a script from a file path.
	pub fn from_path<P>(path: P) -> std::io::Result<Self>
	where
		P: Into<Box<Path>>,
	{
		let path = path.into();
		let file = File::open(&path)?;
		Self::from_reader(path, file)
	}


	/// Load a script from a std::io::Read.
	/// The path argument may be anything, including fictional paths like `<stdin>`.
	pub fn from_reader<P, R>(path: P, mut reader: R) -> std::io::Result<Self>
	where
		P: Into<Box<Path>>,
		R: std::io::Read,
	{
		let mut contents = String::with_capacity(512);
		reader.read_to_string(&mut contents)?;

		Ok(Self::from_str(path, &contents))
	}


	pub fn from_str<P>(path: P, contents: &str) -> Self
	where
		P: Into<Box<Path>>,
	{
		Self {
			path: path.into(),
			lines: logical_lines(contents).into(),
		}
	}
}


/// Split a script in logical lines. Comments are stripped, lines ending with a backslash
/// are joined with the following one, and the dotted path shim is applied. Blank lines
/// are dropped.
pub fn logical_lines(contents: &str) -> Vec<Line> {
	let mut lines = Vec::new();
	let mut pending: Option<(usize, String)> = None;

	for (ix, physical) in contents.lines().enumerate() {
		let text = strip_comment(physical).trim_end();

		let (number, mut joined) = pending
			.take()
			.unwrap_or_else(|| (ix + 1, String::new()));

		if let Some(text) = text.strip_suffix('\\') {
			joined.push_str(text);
			pending = Some((number, joined));
			continue;
		}

		joined.push_str(text);

		if !joined.trim().is_empty() {
			lines.push(Line { number, text: dotted_shim(&joined).into() });
		}
	}

	if let Some((number, joined)) = pending {
		if !joined.trim().is_empty() {
			lines.push(Line { number, text: dotted_shim(&joined).into() });
		}
	}

	lines
}


/// Remove a `//` comment, unless it is inside a quoted string.
pub fn strip_comment(line: &str) -> &str {
	let bytes = line.as_bytes();
	let mut quoted = false;
	let mut escaped = false;

	for (ix, &c) in bytes.iter().enumerate() {
		match c {
			_ if escaped => escaped = false,
			b'\\' if quoted => escaped = true,
			b'"' => quoted = !quoted,
			b'/' if !quoted && bytes.get(ix + 1) == Some(&b'/') => return &line[.. ix],
			_ => (),
		}
	}

	line
}


/// Replace dots with slashes in the leading token, for dotted path shorthands like
/// `site.building.room:color=red`. Tokens starting with a dot, or containing a quote, are
/// kept.
pub fn dotted_shim(line: &str) -> Cow<str> {
	let trimmed = line.trim_start();
	let start = line.len() - trimmed.len();
	let end = trimmed
		.find(char::is_whitespace)
		.map_or(line.len(), |len| start + len);

	let token = &line[start .. end];

	if token.starts_with('.') || token.contains('"') || !token.contains('.') {
		return Cow::Borrowed(line);
	}

	let mut shimmed = String::with_capacity(line.len());
	shimmed.push_str(&line[.. start]);
	shimmed.push_str(&token.replace('.', "/"));
	shimmed.push_str(&line[end ..]);

	Cow::Owned(shimmed)
}
