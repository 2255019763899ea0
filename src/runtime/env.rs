use std::{collections::HashMap, rc::Rc};

use crate::{symbol::Symbol, syntax::ast};
use super::Value;


/// The identity of a variable. Ids start at one and are never reused, so that a zero id is
/// never mistaken for a bound variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub u32);


impl SlotId {
	fn index(self) -> usize {
		(self.0 - 1) as usize
	}
}


/// The variables and functions of a shell session.
/// The slot count never shrinks: unsetting a variable keeps its binding and clears its value.
#[derive(Debug, Default)]
pub struct Environment {
	names: HashMap<Symbol, SlotId>,
	/// Indexed by slot id minus one.
	slots: Vec<Value>,
	functions: HashMap<Symbol, Rc<ast::Block>>,
}


impl Environment {
	pub fn new() -> Self {
		Self::default()
	}


	/// The slot bound to the name, if any.
	pub fn slot(&self, name: Symbol) -> Option<SlotId> {
		self.names.get(&name).copied()
	}


	/// The slot bound to the name, binding a fresh one if needed.
	pub fn resolve(&mut self, name: Symbol) -> SlotId {
		if let Some(slot) = self.slot(name) {
			return slot;
		}

		self.slots.push(Value::Nil);
		let slot = SlotId(self.slots.len() as u32);
		self.names.insert(name, slot);

		slot
	}


	/// The value of a bound variable. Unset variables are Nil.
	pub fn fetch(&self, name: Symbol) -> Option<Value> {
		self
			.slot(name)
			.map(|slot| self.slots[slot.index()].copy())
	}


	pub fn store(&mut self, slot: SlotId, value: Value) {
		self.slots[slot.index()] = value;
	}


	/// Bind the name, and store the value if any.
	pub fn assign(&mut self, name: Symbol, value: Option<Value>) -> SlotId {
		let slot = self.resolve(name);

		if let Some(value) = value {
			self.store(slot, value);
		}

		slot
	}


	/// Clear the variable's value, keeping its slot. Returns whether the name was bound.
	pub fn unset_variable(&mut self, name: Symbol) -> bool {
		match self.slot(name) {
			Some(slot) => {
				self.store(slot, Value::Nil);
				true
			}

			None => false,
		}
	}


	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}


	/// Bound variables, in binding order.
	pub fn variables(&self) -> Vec<(Symbol, Value)> {
		let mut variables: Vec<_> = self
			.names
			.iter()
			.map(|(&name, &slot)| (slot, name))
			.collect();

		variables.sort_unstable();

		variables
			.into_iter()
			.map(|(slot, name)| (name, self.slots[slot.index()].copy()))
			.collect()
	}


	/// Declare a function, replacing any previous declaration with the same name.
	pub fn declare_function(&mut self, name: Symbol, body: Rc<ast::Block>) {
		self.functions.insert(name, body);
	}


	pub fn function(&self, name: Symbol) -> Option<Rc<ast::Block>> {
		self.functions.get(&name).cloned()
	}


	/// Returns whether the function was declared.
	pub fn unset_function(&mut self, name: Symbol) -> bool {
		self.functions.remove(&name).is_some()
	}


	/// Declared function names, sorted by symbol.
	pub fn functions(&self) -> Vec<Symbol> {
		let mut names: Vec<_> = self.functions.keys().copied().collect();
		names.sort_unstable();
		names
	}
}
