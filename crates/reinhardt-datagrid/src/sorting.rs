//! Sorting functionality for datagrids
//!
//! Sort state arrives from the client as an ordered map of column name to
//! direction string ([`RawSortSpec`]). It is never trusted: [`reconcile`]
//! turns it into a [`SortSpec`] by dropping every entry that does not name a
//! registered, sortable column with a legal direction.

use crate::column::ColumnRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Persisted, unvalidated sort state: column name to direction string
pub type RawSortSpec = IndexMap<String, String>;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[serde(rename = "ASC")]
	Ascending,
	/// Descending order
	#[serde(rename = "DESC")]
	Descending,
}

impl SortDirection {
	/// Wire form of [`SortDirection::Ascending`]
	pub const ASC: &'static str = "ASC";
	/// Wire form of [`SortDirection::Descending`]
	pub const DESC: &'static str = "DESC";

	/// Returns the wire form (`"ASC"` or `"DESC"`)
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ascending => Self::ASC,
			Self::Descending => Self::DESC,
		}
	}

	/// Parses the wire form
	///
	/// Only the exact strings `"ASC"` and `"DESC"` are accepted.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			Self::ASC => Some(Self::Ascending),
			Self::DESC => Some(Self::Descending),
			_ => None,
		}
	}

	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown sort direction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort direction: {0}")]
pub struct ParseSortDirectionError(pub String);

impl FromStr for SortDirection {
	type Err = ParseSortDirectionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s).ok_or_else(|| ParseSortDirectionError(s.to_string()))
	}
}

/// Validated sort specification
///
/// Ordered: the first entry is the primary sort key, the second breaks ties,
/// and so on. Every key names a registered sortable column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
	entries: IndexMap<String, SortDirection>,
}

impl SortSpec {
	/// Creates an empty specification
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the direction for `column`, if it is sorted
	pub fn get(&self, column: &str) -> Option<SortDirection> {
		self.entries.get(column).copied()
	}

	/// Returns whether `column` takes part in the sort
	pub fn contains(&self, column: &str) -> bool {
		self.entries.contains_key(column)
	}

	/// Returns the primary sort key
	pub fn primary(&self) -> Option<(&str, SortDirection)> {
		self.entries
			.first()
			.map(|(column, direction)| (column.as_str(), *direction))
	}

	/// Iterates over the entries in priority order
	pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
		self.entries
			.iter()
			.map(|(column, direction)| (column.as_str(), *direction))
	}

	/// Returns the number of sort keys
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no sort is applied
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Converts back into the persisted form
	pub fn to_raw(&self) -> RawSortSpec {
		self.entries
			.iter()
			.map(|(column, direction)| (column.clone(), direction.as_str().to_string()))
			.collect()
	}

	fn push(&mut self, column: String, direction: SortDirection) {
		self.entries.insert(column, direction);
	}
}

impl FromIterator<(String, SortDirection)> for SortSpec {
	/// Builds a specification without checking it against any columns
	///
	/// Grids only ever pass specifications produced by [`reconcile`]; this is
	/// for data sources and tests that need one directly.
	fn from_iter<I: IntoIterator<Item = (String, SortDirection)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

/// Prunes `raw` against the registered columns
///
/// An entry survives only if its column is registered, marked sortable, and
/// its direction is exactly `"ASC"` or `"DESC"`. Surviving entries keep their
/// relative order. A fresh sequence is built; `raw` is never edited in place.
///
/// Returns the pruned persisted form together with the typed specification.
pub fn reconcile<R>(raw: &RawSortSpec, columns: &ColumnRegistry<R>) -> (RawSortSpec, SortSpec) {
	let mut pruned = RawSortSpec::with_capacity(raw.len());
	let mut spec = SortSpec::new();

	for (column, direction) in raw {
		if !columns.contains(column) {
			tracing::debug!(column = %column, "dropping sort entry for unknown column");
			continue;
		}
		if !columns.is_sortable(column) {
			tracing::debug!(column = %column, "dropping sort entry for non-sortable column");
			continue;
		}
		let Some(parsed) = SortDirection::parse(direction) else {
			tracing::debug!(column = %column, direction = %direction, "dropping sort entry with invalid direction");
			continue;
		};

		pruned.insert(column.clone(), direction.clone());
		spec.push(column.clone(), parsed);
	}

	(pruned, spec)
}
