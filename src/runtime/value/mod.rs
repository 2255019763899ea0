mod float;
mod fmt;
mod json;
#[cfg(test)]
mod tests;

use std::{
	borrow::Cow,
	collections::HashMap,
	ops::Deref,
};

use gc::{Gc, GcCell, GcCellRef, GcCellRefMut, Finalize, Trace};

pub use float::Float;


/// A dynamically typed value.
#[derive(Debug, PartialEq)]
#[derive(Trace, Finalize)]
pub enum Value {
	Nil,
	Bool(bool),
	Int(i64),
	Float(Float),
	String(Str),
	Array(Array),
	Dict(Dict),
}


impl Value {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		match self {
			Self::Nil => Self::Nil,
			Self::Bool(b) => Self::Bool(*b),
			Self::Int(int) => Self::Int(*int),
			Self::Float(float) => Self::Float(float.copy()),
			Self::String(string) => Self::String(string.copy()),
			Self::Array(array) => Self::Array(array.copy()),
			Self::Dict(dict) => Self::Dict(dict.copy()),
		}
	}


	/// The name of the value's type, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Dict(_) => "dict",
		}
	}


	/// Whether both values have the same dynamic type.
	pub fn same_type(&self, other: &Self) -> bool {
		std::mem::discriminant(self) == std::mem::discriminant(other)
	}


	/// The text form of the value, as printed and interpolated.
	/// Strings are raw, other values use their display form.
	pub fn text(&self) -> Cow<str> {
		match self {
			Self::String(string) => Cow::Borrowed(string.as_str()),
			other => Cow::Owned(other.to_string()),
		}
	}
}


impl Default for Value {
	fn default() -> Self {
		Self::Nil
	}
}


impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}


impl From<i64> for Value {
	fn from(int: i64) -> Self {
		Self::Int(int)
	}
}


impl From<f64> for Value {
	fn from(float: f64) -> Self {
		Self::Float(float.into())
	}
}


impl From<Float> for Value {
	fn from(float: Float) -> Self {
		Self::Float(float)
	}
}


impl<'a> From<&'a str> for Value {
	fn from(string: &'a str) -> Self {
		Self::String(string.into())
	}
}


impl From<String> for Value {
	fn from(string: String) -> Self {
		Self::String(string.into())
	}
}


impl From<Str> for Value {
	fn from(string: Str) -> Self {
		Self::String(string)
	}
}


impl From<Vec<Value>> for Value {
	fn from(vec: Vec<Value>) -> Self {
		Self::Array(Array::new(vec))
	}
}


impl From<Array> for Value {
	fn from(array: Array) -> Self {
		Self::Array(array)
	}
}


impl From<Dict> for Value {
	fn from(dict: Dict) -> Self {
		Self::Dict(dict)
	}
}


/// Strings are immutable.
#[derive(Debug, PartialEq, Eq, Hash)]
#[derive(Trace, Finalize)]
pub struct Str(Gc<String>);


impl Str {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn as_str(&self) -> &str {
		self.0.as_str()
	}


	pub fn len(&self) -> usize {
		self.0.len()
	}


	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}


impl<'a> From<&'a str> for Str {
	fn from(string: &'a str) -> Self {
		Self(Gc::new(string.to_owned()))
	}
}


impl From<String> for Str {
	fn from(string: String) -> Self {
		Self(Gc::new(string))
	}
}


impl Deref for Str {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		self.as_str()
	}
}


/// Arrays are shared: copies refer to the same items.
#[derive(Debug, PartialEq)]
#[derive(Trace, Finalize)]
pub struct Array(Gc<GcCell<Vec<Value>>>);


impl Array {
	pub fn new(vec: Vec<Value>) -> Self {
		Self(Gc::new(GcCell::new(vec)))
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn borrow(&self) -> GcCellRef<Vec<Value>> {
		self.0.deref().borrow()
	}


	pub fn borrow_mut(&self) -> GcCellRefMut<Vec<Value>> {
		self.0.deref().borrow_mut()
	}


	pub fn push(&self, value: Value) {
		self.borrow_mut().push(value)
	}


	pub fn len(&self) -> usize {
		self.borrow().len()
	}


	pub fn is_empty(&self) -> bool {
		self.borrow().is_empty()
	}


	/// Copy the current items, so that they may be iterated while the array is mutated.
	pub fn snapshot(&self) -> Vec<Value> {
		self
			.borrow()
			.iter()
			.map(Value::copy)
			.collect()
	}
}


/// Dicts are shared like arrays, and keyed by strings.
#[derive(Debug, PartialEq)]
#[derive(Trace, Finalize)]
pub struct Dict(Gc<GcCell<HashMap<String, Value>>>);


impl Dict {
	pub fn new(dict: HashMap<String, Value>) -> Self {
		Self(Gc::new(GcCell::new(dict)))
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn borrow(&self) -> GcCellRef<HashMap<String, Value>> {
		self.0.deref().borrow()
	}


	pub fn borrow_mut(&self) -> GcCellRefMut<HashMap<String, Value>> {
		self.0.deref().borrow_mut()
	}


	pub fn insert<K: Into<String>>(&self, key: K, value: Value) {
		self.borrow_mut().insert(key.into(), value);
	}


	pub fn get(&self, key: &str) -> Option<Value> {
		self
			.borrow()
			.get(key)
			.map(Value::copy)
	}


	pub fn len(&self) -> usize {
		self.borrow().len()
	}


	pub fn is_empty(&self) -> bool {
		self.borrow().is_empty()
	}
}


impl Default for Dict {
	fn default() -> Self {
		Self::new(HashMap::new())
	}
}
