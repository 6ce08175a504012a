//! Column descriptor

use crate::row::Row;
use serde_json::Value;
use std::fmt::Debug;

/// Custom value extraction for a column
pub type ValueAccessor<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;

/// A named column of a datagrid
///
/// Each column knows:
/// - its name, which is unique within a grid and never changes
/// - an optional display label
/// - whether it can be sorted
/// - how to extract a display value from a row
///
/// Without a custom accessor the value is read from the row by name through
/// the [`Row`] capability.
///
/// # Example
///
/// ```rust
/// use reinhardt_datagrid::column::Column;
/// use serde_json::{json, Value};
///
/// let column: Column<Value> = Column::new("name").with_label("User Name").sortable();
///
/// assert_eq!(column.header(), "User Name");
/// assert!(column.is_sortable());
/// assert_eq!(column.value(&json!({"name": "Alice"})), json!("Alice"));
/// ```
pub struct Column<R> {
	name: String,
	label: Option<String>,
	sortable: bool,
	accessor: Option<ValueAccessor<R>>,
}

impl<R> Column<R> {
	/// Creates a new column that is not sortable and has no label
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			sortable: false,
			accessor: None,
		}
	}

	/// Sets the display label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Marks the column as sortable
	pub fn sortable(mut self) -> Self {
		self.sortable = true;
		self
	}

	/// Replaces the default by-name lookup with a custom accessor
	pub fn with_value_accessor<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&R) -> Value + Send + Sync + 'static,
	{
		self.accessor = Some(Box::new(accessor));
		self
	}

	/// Returns the name of this column
	///
	/// This is the identifier used for sorting and value lookup
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the label, if one was set
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Returns the header text: the label, falling back to the name
	pub fn header(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}

	/// Returns whether this column can be sorted
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether a custom accessor is set
	pub fn has_value_accessor(&self) -> bool {
		self.accessor.is_some()
	}

	/// Sets the display label
	pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
		self.label = Some(label.into());
		self
	}

	/// Sets whether this column can be sorted
	pub fn set_sortable(&mut self, sortable: bool) -> &mut Self {
		self.sortable = sortable;
		self
	}

	/// Sets a custom value accessor
	pub fn set_value_accessor<F>(&mut self, accessor: F) -> &mut Self
	where
		F: Fn(&R) -> Value + Send + Sync + 'static,
	{
		self.accessor = Some(Box::new(accessor));
		self
	}
}

impl<R: Row> Column<R> {
	/// Extracts the display value of this column from `row`
	///
	/// Uses the custom accessor if set, otherwise reads the field named after
	/// the column. A missing field yields `Value::Null`.
	pub fn value(&self, row: &R) -> Value {
		match &self.accessor {
			Some(accessor) => accessor(row),
			None => row.field(&self.name).unwrap_or(Value::Null),
		}
	}
}

impl<R> Debug for Column<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Column")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("sortable", &self.sortable)
			.field("accessor", &self.accessor.as_ref().map(|_| "<closure>"))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::row::Record;
	use serde::Serialize;
	use serde_json::json;

	#[derive(Debug, Serialize)]
	struct TestRow {
		value: String,
		count: u32,
	}

	fn row() -> Record<TestRow> {
		Record(TestRow {
			value: "Hello".to_string(),
			count: 3,
		})
	}

	#[test]
	fn test_column_creation() {
		let column: Column<Record<TestRow>> = Column::new("value");
		assert_eq!(column.name(), "value");
		assert_eq!(column.label(), None);
		assert_eq!(column.header(), "value");
		assert!(!column.is_sortable());
		assert!(!column.has_value_accessor());
	}

	#[test]
	fn test_column_default_value_reads_field() {
		let column: Column<Record<TestRow>> = Column::new("value");
		assert_eq!(column.value(&row()), json!("Hello"));
	}

	#[test]
	fn test_column_missing_field_is_null() {
		let column: Column<Record<TestRow>> = Column::new("absent");
		assert_eq!(column.value(&row()), Value::Null);
	}

	#[test]
	fn test_column_custom_accessor_wins() {
		let column = Column::new("value")
			.with_label("Doubled")
			.sortable()
			.with_value_accessor(|row: &Record<TestRow>| json!(row.count * 2));

		assert_eq!(column.header(), "Doubled");
		assert!(column.is_sortable());
		assert_eq!(column.value(&row()), json!(6));
	}

	#[test]
	fn test_column_in_place_mutators_chain() {
		let mut column: Column<Record<TestRow>> = Column::new("count");
		column
			.set_label("Count")
			.set_sortable(true)
			.set_value_accessor(|row| json!(row.count + 1));

		assert_eq!(column.label(), Some("Count"));
		assert!(column.is_sortable());
		assert_eq!(column.value(&row()), json!(4));
	}
}
