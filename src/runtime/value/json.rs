use serde::{
	ser::{SerializeMap, SerializeSeq},
	Serialize,
	Serializer,
};

use super::{Float, Value};


/// Values are sent to the API as JSON. Dicts become objects with sorted keys.
impl Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Value::Nil => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(n) => n.serialize(serializer),
			Value::Float(Float(n)) => n.serialize(serializer),
			Value::String(s) => serializer.serialize_str(s.as_str()),

			Value::Array(array) => {
				let array = array.borrow();
				let mut seq = serializer.serialize_seq(Some(array.len()))?;
				for item in array.iter() {
					seq.serialize_element(item)?;
				}
				seq.end()
			}

			Value::Dict(dict) => {
				let dict = dict.borrow();
				let mut entries: Vec<_> = dict.iter().collect();
				entries.sort_unstable_by(|(k1, _), (k2, _)| k1.cmp(k2));

				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}


impl Value {
	/// Convert to a JSON value, for request bodies.
	pub fn to_json(&self) -> serde_json::Value {
		// Serializing into a serde_json::Value only fails for non-string map keys.
		serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
	}
}
