use std::collections::HashMap;

use serial_test::serial;

use super::*;


fn dict() -> Dict {
	let mut map = HashMap::new();
	map.insert("b".to_owned(), Value::from(2));
	map.insert("a".to_owned(), Value::from("x\"y"));
	Dict::new(map)
}


#[test]
#[serial]
fn test_display() {
	assert_eq!(Value::Nil.to_string(), "nil");
	assert_eq!(Value::from(false).to_string(), "false");
	assert_eq!(Value::from(-3).to_string(), "-3");
	assert_eq!(Value::from(3.0).to_string(), "3");
	assert_eq!(Value::from(0.1).to_string(), "0.1");
	assert_eq!(Value::from("a\nb").to_string(), "\"a\\nb\"");

	let array: Value = vec![Value::from(1), Value::from("two"), Value::from(Vec::<Value>::new())].into();
	assert_eq!(array.to_string(), "[1, \"two\", []]");

	assert_eq!(Value::from(dict()).to_string(), "{\"a\": \"x\\\"y\", \"b\": 2}");
	assert_eq!(Value::from(Dict::default()).to_string(), "{}");
}


#[test]
#[serial]
fn test_text() {
	assert_eq!(Value::from("raw").text(), "raw");
	assert_eq!(Value::from(1.5).text(), "1.5");

	let array: Value = vec![Value::from("a")].into();
	assert_eq!(array.text(), "[\"a\"]");
}


#[test]
#[serial]
fn test_sharing() {
	let array = Array::new(vec![Value::from(1)]);
	let copy = Value::from(array.copy());

	array.push(Value::from(2));

	assert_matches::assert_matches!(copy, Value::Array(ref items) if items.len() == 2);

	let snapshot = array.snapshot();
	array.push(Value::Nil);
	assert_eq!(snapshot.len(), 2);
	assert_eq!(array.len(), 3);
}


#[test]
#[serial]
fn test_types() {
	assert!(Value::from(1).same_type(&Value::from(2)));
	assert!(!Value::from(1).same_type(&Value::from(1.0)));
	assert_eq!(Value::from(dict()).type_name(), "dict");
	assert_eq!(dict().get("b"), Some(Value::from(2)));
	assert_eq!(dict().get("c"), None);
}


#[test]
#[serial]
fn test_json() {
	assert_eq!(
		Value::from(dict()).to_json(),
		serde_json::json!({ "a": "x\"y", "b": 2 })
	);

	assert_eq!(Value::from(f64::NAN).to_json(), serde_json::Value::Null);
	assert_eq!(Value::from(2.5).to_json(), serde_json::json!(2.5));

	let body = serde_json::to_string(&Value::from(dict())).unwrap_or_default();
	assert_eq!(body, "{\"a\":\"x\\\"y\",\"b\":2}");
}
