use super::{Interner, Symbol, PLACEHOLDER};
use crate::fmt::Display;


impl<'a> Display<'a> for Symbol {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, interner: Self::Context) -> std::fmt::Result {
		f.write_str(interner.resolve(*self).unwrap_or(PLACEHOLDER))
	}
}
