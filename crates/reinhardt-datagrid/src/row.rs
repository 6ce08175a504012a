//! Row field access
//!
//! Columns without a custom value accessor read their value from the row by
//! column name. The [`Row`] trait is that capability. Two families of adapters
//! are provided:
//!
//! - **Keyed maps**: `HashMap`, `BTreeMap`, `IndexMap` keyed by `String`, plus
//!   `serde_json::Map` and JSON objects
//! - **Structured records**: [`Record`] wraps any `Serialize` struct and reads
//!   its fields by their serialized names
//!
//! Which adapter applies is decided by the row type the caller picks, so
//! nothing is inspected at runtime.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A row that can be read field by field
pub trait Row {
	/// Returns the value of the field called `name`, or `None` if the row has no such field
	fn field(&self, name: &str) -> Option<Value>;

	/// Returns the values of several fields at once, `Value::Null` for missing ones
	fn fields(&self, names: &[&str]) -> Vec<Value> {
		names
			.iter()
			.map(|name| self.field(name).unwrap_or(Value::Null))
			.collect()
	}
}

impl<V: Serialize, S: BuildHasher> Row for HashMap<String, V, S> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).and_then(to_value)
	}
}

impl<V: Serialize> Row for BTreeMap<String, V> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).and_then(to_value)
	}
}

impl<V: Serialize, S: BuildHasher> Row for IndexMap<String, V, S> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).and_then(to_value)
	}
}

impl Row for Map<String, Value> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).cloned()
	}
}

impl Row for Value {
	fn field(&self, name: &str) -> Option<Value> {
		self.as_object().and_then(|object| object.get(name).cloned())
	}
}

impl<T: Row + ?Sized> Row for &T {
	fn field(&self, name: &str) -> Option<Value> {
		(**self).field(name)
	}

	fn fields(&self, names: &[&str]) -> Vec<Value> {
		(**self).fields(names)
	}
}

/// Structured-record adapter
///
/// Exposes the fields of a serializable struct to columns that rely on the
/// default by-name lookup.
///
/// # Example
///
/// ```rust
/// use reinhardt_datagrid::row::{Record, Row};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let row = Record(User { name: "Alice".into(), age: 31 });
/// assert_eq!(row.field("age"), Some(serde_json::json!(31)));
/// assert_eq!(row.field("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T>(pub T);

impl<T> Record<T> {
	/// Unwraps the record
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> std::ops::Deref for Record<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

impl<T: Serialize> Record<T> {
	fn object(&self) -> Option<Map<String, Value>> {
		match serde_json::to_value(&self.0) {
			Ok(Value::Object(fields)) => Some(fields),
			Ok(_) => None,
			Err(error) => {
				tracing::warn!(%error, "record could not be serialized for field access");
				None
			}
		}
	}
}

impl<T: Serialize> Row for Record<T> {
	fn field(&self, name: &str) -> Option<Value> {
		self.object()?.remove(name)
	}

	// one serialization for the whole batch
	fn fields(&self, names: &[&str]) -> Vec<Value> {
		let mut object = self.object().unwrap_or_default();
		names
			.iter()
			.map(|name| object.remove(*name).unwrap_or(Value::Null))
			.collect()
	}
}

impl<T: Serialize> Serialize for Record<T> {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.0.serialize(serializer)
	}
}

fn to_value<V: Serialize>(value: &V) -> Option<Value> {
	serde_json::to_value(value).ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Serialize)]
	struct Person {
		name: String,
		#[serde(rename = "emailAddress")]
		email: String,
	}

	#[rstest]
	fn test_hash_map_row() {
		let mut row = HashMap::new();
		row.insert("age".to_string(), 42);

		assert_eq!(row.field("age"), Some(json!(42)));
		assert_eq!(row.field("name"), None);
	}

	#[rstest]
	fn test_btree_and_index_map_rows() {
		let btree: BTreeMap<String, &str> = [("city".to_string(), "Oslo")].into_iter().collect();
		let index: IndexMap<String, bool> = [("active".to_string(), true)].into_iter().collect();

		assert_eq!(btree.field("city"), Some(json!("Oslo")));
		assert_eq!(index.field("active"), Some(json!(true)));
	}

	#[rstest]
	#[case(json!({"id": 7}), Some(json!(7)))]
	#[case(json!({"other": 7}), None)]
	#[case(json!([1, 2, 3]), None)]
	#[case(json!("scalar"), None)]
	fn test_json_value_row(#[case] row: Value, #[case] expected: Option<Value>) {
		assert_eq!(row.field("id"), expected);
	}

	#[rstest]
	fn test_record_uses_serialized_names() {
		let row = Record(Person {
			name: "Bob".into(),
			email: "bob@example.com".into(),
		});

		assert_eq!(row.field("name"), Some(json!("Bob")));
		assert_eq!(row.field("emailAddress"), Some(json!("bob@example.com")));
		assert_eq!(row.field("email"), None);
	}

	#[rstest]
	fn test_record_of_non_struct_has_no_fields() {
		let row = Record(vec![1, 2]);
		assert_eq!(row.field("0"), None);
	}

	#[rstest]
	fn test_fields_batch_lookup() {
		let record = Record(Person {
			name: "Bob".into(),
			email: "bob@example.com".into(),
		});
		let value = json!({"name": "Ann"});

		assert_eq!(
			record.fields(&["emailAddress", "missing", "name"]),
			vec![json!("bob@example.com"), Value::Null, json!("Bob")]
		);
		assert_eq!(value.fields(&["name", "age"]), vec![json!("Ann"), Value::Null]);
		assert_eq!(Record(7).fields(&["name"]), vec![Value::Null]);
	}
}
