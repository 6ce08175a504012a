//! Ordered, uniquely-named column registry

use super::Column;
use crate::error::{DatagridError, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// Registered columns of a grid, in display order
///
/// Iteration follows registration order (adjusted by
/// [`register_before`](Self::register_before)), never name order.
pub struct ColumnRegistry<R> {
	columns: IndexMap<String, Column<R>>,
}

impl<R> ColumnRegistry<R> {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self {
			columns: IndexMap::new(),
		}
	}

	/// Appends a column
	///
	/// # Errors
	///
	/// Returns [`DatagridError::DuplicateColumn`] if the name is already registered.
	pub fn register(&mut self, column: Column<R>) -> Result<&mut Column<R>> {
		self.ensure_unique(column.name())?;

		let (index, _) = self.columns.insert_full(column.name().to_string(), column);
		Ok(&mut self.columns[index])
	}

	/// Inserts a column directly before the column named `before`
	///
	/// # Errors
	///
	/// Returns [`DatagridError::DuplicateColumn`] if the name is already registered
	/// and [`DatagridError::UnknownColumn`] if `before` is not. The registry is
	/// left unchanged in both cases.
	pub fn register_before(&mut self, column: Column<R>, before: &str) -> Result<&mut Column<R>> {
		self.ensure_unique(column.name())?;

		let index = self
			.columns
			.get_index_of(before)
			.ok_or_else(|| DatagridError::UnknownColumn(before.to_string()))?;

		self.columns
			.shift_insert(index, column.name().to_string(), column);
		Ok(&mut self.columns[index])
	}

	/// Marks a registered column as sortable
	pub fn mark_sortable(&mut self, name: &str) -> Result<&mut Column<R>> {
		let column = self.require_mut(name)?;
		column.set_sortable(true);
		Ok(column)
	}

	/// Sets the value accessor of a registered column
	pub fn set_value_accessor<F>(&mut self, name: &str, accessor: F) -> Result<&mut Column<R>>
	where
		F: Fn(&R) -> Value + Send + Sync + 'static,
	{
		let column = self.require_mut(name)?;
		column.set_value_accessor(accessor);
		Ok(column)
	}

	/// Returns the column called `name`
	pub fn get(&self, name: &str) -> Option<&Column<R>> {
		self.columns.get(name)
	}

	/// Returns the column called `name` for mutation
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Column<R>> {
		self.columns.get_mut(name)
	}

	/// Returns whether a column called `name` is registered
	pub fn contains(&self, name: &str) -> bool {
		self.columns.contains_key(name)
	}

	/// Returns whether `name` is registered and sortable
	pub fn is_sortable(&self, name: &str) -> bool {
		self.get(name).is_some_and(Column::is_sortable)
	}

	/// Iterates over the columns in display order
	pub fn iter(&self) -> impl Iterator<Item = &Column<R>> {
		self.columns.values()
	}

	/// Returns all columns in display order
	pub fn all(&self) -> Vec<&Column<R>> {
		self.iter().collect()
	}

	/// Returns the column names in display order
	pub fn names(&self) -> Vec<&str> {
		self.columns.keys().map(String::as_str).collect()
	}

	/// Returns the number of registered columns
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Returns whether no column is registered
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	fn ensure_unique(&self, name: &str) -> Result<()> {
		if self.columns.contains_key(name) {
			return Err(DatagridError::DuplicateColumn(name.to_string()));
		}
		Ok(())
	}

	fn require_mut(&mut self, name: &str) -> Result<&mut Column<R>> {
		self.columns
			.get_mut(name)
			.ok_or_else(|| DatagridError::UnknownColumn(name.to_string()))
	}
}

impl<R> Default for ColumnRegistry<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> std::fmt::Debug for ColumnRegistry<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.columns.values()).finish()
	}
}
