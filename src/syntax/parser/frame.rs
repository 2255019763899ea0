use super::{lexer::Cursor, SourcePos};


/// A window over a source line.
/// Offsets are absolute in the buffer, so that frames sliced from other frames can be
/// reported against the full line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
	buffer: &'a str,
	start: usize,
	end: usize,
}


impl<'a> Frame<'a> {
	/// A frame covering the whole buffer.
	pub fn whole(buffer: &'a str) -> Self {
		Self { buffer, start: 0, end: buffer.len() }
	}


	/// A frame over the same buffer, clamped to this frame's window.
	pub fn new(&self, start: usize, end: usize) -> Self {
		let start = start.max(self.start).min(self.end);
		let end = end.max(start).min(self.end);

		Self { buffer: self.buffer, start, end }
	}


	/// The prefix of this frame, up to the given offset.
	pub fn until(&self, end: usize) -> Self {
		self.new(self.start, end)
	}


	/// The suffix of this frame, starting at the given offset.
	pub fn from(&self, start: usize) -> Self {
		self.new(start, self.end)
	}


	/// A zero width frame at the given offset.
	pub fn empty(&self, at: usize) -> Self {
		self.new(at, at)
	}


	pub fn buffer(&self) -> &'a str {
		self.buffer
	}


	pub fn start(&self) -> usize {
		self.start
	}


	pub fn end(&self) -> usize {
		self.end
	}


	pub fn text(&self) -> &'a str {
		self.buffer
			.get(self.start .. self.end)
			.unwrap_or_default()
	}


	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}


	/// Remove leading and trailing whitespace.
	pub fn trim(&self) -> Self {
		let text = self.text();
		let start = self.start + (text.len() - text.trim_start().len());
		let end = self.end - (text.len() - text.trim_end().len());

		self.new(start, end)
	}


	/// The byte at the given absolute offset, if inside the frame.
	pub fn at(&self, offset: usize) -> Option<u8> {
		if offset >= self.start && offset < self.end {
			self.buffer.as_bytes().get(offset).copied()
		} else {
			None
		}
	}


	pub fn first(&self) -> Option<u8> {
		self.at(self.start)
	}


	pub fn starts_with(&self, prefix: &str) -> bool {
		self.text().starts_with(prefix)
	}


	/// Absolute offset of the first occurrence of the pattern.
	pub fn find(&self, pattern: &str) -> Option<usize> {
		self.text()
			.find(pattern)
			.map(|ix| self.start + ix)
	}


	/// Split at the first whitespace: the leading word and the rest of the frame.
	pub fn split_word(&self) -> (Self, Self) {
		let frame = self.trim();
		let end = frame
			.text()
			.find(|c: char| c.is_ascii_whitespace())
			.map_or(frame.end, |ix| frame.start + ix);

		(frame.until(end), frame.from(end).trim())
	}


	pub fn pos(&self) -> SourcePos {
		SourcePos::new(self.start, self.end)
	}


	/// A lexer cursor for this frame.
	pub fn cursor(&self) -> Cursor<'a> {
		Cursor::window(self.buffer, self.start, self.end)
	}
}
