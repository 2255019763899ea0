/// A cursor over a window of the source code.
/// Offsets are always absolute in the underlying buffer, so that tokens lexed from a
/// sub-window can be mapped back to the full source line.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	input: &'a str,
	offset: usize,
	end: usize,
}


impl<'a> Cursor<'a> {
	/// Create a cursor for the `[start, end)` window of the input.
	pub fn window(input: &'a str, start: usize, end: usize) -> Self {
		let end = end.min(input.len());

		Self {
			input,
			offset: start.min(end),
			end,
		}
	}


	pub fn offset(&self) -> usize {
		self.offset
	}


	/// The end of the window.
	pub fn end(&self) -> usize {
		self.end
	}


	pub fn is_eof(&self) -> bool {
		self.offset >= self.end
	}


	/// Peek the byte at the given absolute offset, if it is inside the window.
	pub fn at(&self, offset: usize) -> Option<u8> {
		if offset < self.end {
			self.input.as_bytes().get(offset).copied()
		} else {
			None
		}
	}


	pub fn peek(&self) -> Option<u8> {
		self.at(self.offset)
	}


	/// Get the source text between two absolute offsets.
	/// Lexemes always start and end at ASCII characters, so this never splits a character.
	pub fn slice(&self, start: usize, end: usize) -> &'a str {
		self.input
			.get(start .. end)
			.unwrap_or_default()
	}


	/// Move the cursor to an absolute offset inside the window.
	pub fn seek(&mut self, offset: usize) {
		self.offset = offset.min(self.end);
	}


	pub fn skip_whitespace(&mut self) {
		while let Some(c) = self.peek() {
			if !c.is_ascii_whitespace() {
				break;
			}

			self.offset += 1;
		}
	}
}


impl<'a> From<&'a str> for Cursor<'a> {
	fn from(input: &'a str) -> Self {
		Self::window(input, 0, input.len())
	}
}
