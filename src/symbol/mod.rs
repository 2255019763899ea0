mod fmt;

use intaglio::SymbolTable;


/// Placeholder name, interned first so that `Symbol::default()` resolves to it.
const PLACEHOLDER: &str = "<invalid symbol>";


/// An interned variable or function name. Symbols are cheap to copy and compare, and key
/// both the slot environment and the function table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol(intaglio::Symbol);


impl Symbol {
	/// Whether this is the placeholder symbol, which names nothing.
	pub fn is_placeholder(self) -> bool {
		self.0.id() == 0
	}
}


impl Default for Symbol {
	fn default() -> Self {
		Self(intaglio::Symbol::new(0))
	}
}


/// Names seen by the lexer and parser during a session. The interner outlives every
/// line, so that a variable keeps its symbol, and thus its slot, across lines.
#[derive(Debug)]
pub struct Interner {
	table: SymbolTable,
}


impl Interner {
	pub fn new() -> Self {
		let mut table = SymbolTable::new();

		// Only fails when the table exceeds u32::MAX names.
		table
			.intern(PLACEHOLDER)
			.expect("failed to intern placeholder");

		Self { table }
	}


	/// The symbol of a name that was already interned.
	pub fn get<N: AsRef<str>>(&self, name: N) -> Option<Symbol> {
		self.table
			.check_interned(name.as_ref())
			.map(Symbol)
	}


	/// The symbol of a name, interning it on first sight.
	pub fn get_or_intern<N: AsRef<str>>(&mut self, name: N) -> Symbol {
		if let Some(symbol) = self.get(name.as_ref()) {
			return symbol;
		}

		let symbol = self.table
			.intern(name.as_ref().to_owned())
			.expect("too many names interned");

		Symbol(symbol)
	}


	pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
		if symbol.is_placeholder() {
			return None;
		}

		self.table.get(symbol.0)
	}
}


impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}


#[cfg(test)]
mod tests {
	use super::*;


	#[test]
	fn test_interning() {
		let mut interner = Interner::new();

		let rack = interner.get_or_intern("rack");
		assert_eq!(interner.get_or_intern("rack"), rack);
		assert_eq!(interner.get("rack"), Some(rack));
		assert_eq!(interner.get("site"), None);
		assert_eq!(interner.resolve(rack), Some("rack"));
		assert_eq!(interner.resolve(Symbol::default()), None);
	}
}
