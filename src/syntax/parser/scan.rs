use super::Frame;


/// Walk the bytes of a frame that are outside quoted strings, along with their nesting
/// depth. Opening brackets are visited at the outer depth, and so are their matching
/// closing brackets. The walk stops when the visitor returns true, yielding that offset.
fn walk<F>(frame: Frame, mut visit: F) -> Option<usize>
where
	F: FnMut(usize, u8, usize) -> bool,
{
	let mut depth = 0usize;
	let mut quoted = false;
	let mut escaped = false;

	for (ix, &c) in frame.text().as_bytes().iter().enumerate() {
		let offset = frame.start() + ix;

		if quoted {
			match c {
				_ if escaped => escaped = false,
				b'\\' => escaped = true,
				b'"' => quoted = false,
				_ => (),
			}
			continue;
		}

		match c {
			b'"' => quoted = true,

			b'(' | b'[' | b'{' => {
				if visit(offset, c, depth) {
					return Some(offset);
				}
				depth += 1;
			}

			b')' | b']' | b'}' => {
				depth = depth.saturating_sub(1);
				if visit(offset, c, depth) {
					return Some(offset);
				}
			}

			_ => {
				if visit(offset, c, depth) {
					return Some(offset);
				}
			}
		}
	}

	None
}


/// Split the frame at the separator, ignoring separators inside strings or brackets.
pub fn split_top_level(frame: Frame, separator: u8) -> Vec<Frame> {
	let mut pieces = Vec::new();
	let mut start = frame.start();

	walk(
		frame,
		|offset, c, depth| {
			if c == separator && depth == 0 {
				pieces.push(frame.new(start, offset));
				start = offset + 1;
			}
			false
		}
	);

	pieces.push(frame.from(start));

	pieces
}


/// Find the first byte at depth zero satisfying the predicate.
pub fn find_top_level<P>(frame: Frame, mut predicate: P) -> Option<usize>
where
	P: FnMut(u8) -> bool,
{
	walk(frame, |_, c, depth| depth == 0 && predicate(c))
}


/// Find the brace opening a block: the first top level brace that isn't part of a `${}`
/// or `&{}` reference.
pub fn find_block_open(frame: Frame) -> Option<usize> {
	walk(
		frame,
		|offset, c, depth| {
			let reference = offset > frame.start()
				&& matches!(frame.at(offset - 1), Some(b'$') | Some(b'&'));

			c == b'{' && depth == 0 && !reference
		}
	)
}


/// Find the bracket closing the one at the given offset.
pub fn matching_close(frame: Frame, open: usize) -> Option<usize> {
	walk(
		frame.from(open),
		|offset, c, depth| offset > open && depth == 0 && matches!(c, b')' | b']' | b'}')
	)
}


#[cfg(test)]
mod tests {
	use super::*;


	fn texts<'a>(frames: &[Frame<'a>]) -> Vec<&'a str> {
		frames.iter().map(Frame::text).collect()
	}


	#[test]
	fn test_split() {
		let frame = Frame::whole(r#"print "a;b"; for (i; j; k) { x; y }; cd"#);
		let pieces = split_top_level(frame, b';');

		assert_eq!(
			texts(&pieces),
			[r#"print "a;b""#, " for (i; j; k) { x; y }", " cd"]
		);
	}


	#[test]
	fn test_block_open() {
		let frame = Frame::whole("if ${a} == \"{\" { print &{a} }");
		let open = find_block_open(frame);

		assert_eq!(open, Some(15));
		assert_eq!(matching_close(frame, 15), Some(28));
	}


	#[test]
	fn test_unbalanced() {
		let frame = Frame::whole("while true { print 1");

		assert_eq!(find_block_open(frame), Some(11));
		assert_eq!(matching_close(frame, 11), None);
	}
}
