use std::fmt::{self, Display};

use super::{Array, Dict, Float, Str, Value};


/// Shortest representation that round trips, without exponent: `3`, `0.1`, `1.5`.
impl Display for Float {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}


impl Display for Str {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "\"{}\"", self.as_str().escape_debug())
	}
}


impl Display for Array {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let array = self.borrow();
		let mut iter = array.iter();

		write!(f, "[")?;

		if let Some(item) = iter.next() {
			write!(f, "{}", item)?;
		}

		for item in iter {
			write!(f, ", {}", item)?;
		}

		write!(f, "]")
	}
}


/// Keys are sorted, so that the output is stable.
impl Display for Dict {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let dict = self.borrow();
		let mut entries: Vec<_> = dict.iter().collect();
		entries.sort_unstable_by(|(k1, _), (k2, _)| k1.cmp(k2));

		write!(f, "{{")?;

		for (ix, (key, value)) in entries.into_iter().enumerate() {
			if ix > 0 {
				write!(f, ", ")?;
			}

			write!(f, "{:?}: {}", key, value)?;
		}

		write!(f, "}}")
	}
}


impl Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Nil => write!(f, "nil"),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(int) => write!(f, "{}", int),
			Self::Float(float) => write!(f, "{}", float),
			Self::String(string) => write!(f, "{}", string),
			Self::Array(array) => write!(f, "{}", array),
			Self::Dict(dict) => write!(f, "{}", dict),
		}
	}
}
