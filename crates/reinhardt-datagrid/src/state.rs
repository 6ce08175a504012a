//! Persisted grid state
//!
//! [`GridState`] is everything a grid carries from one request to the next.
//! The host decides where it lives (session, URL, hidden form field). For the
//! common URL case the state can be written to and read from query-string
//! parameters namespaced by a per-grid prefix:
//!
//! ```text
//! grid-page=2&grid-sortBy[name]=DESC&grid-sortBy[age]=ASC
//! ```

use crate::error::{DatagridError, Result};
use crate::sorting::RawSortSpec;
use serde::{Deserialize, Serialize};

/// State persisted across requests
///
/// Both fields hold raw client input until the next reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridState {
	/// Current page (0-indexed, may be negative before reconciliation)
	pub page: i64,
	/// Requested sort, column name to direction string
	#[serde(rename = "sortBy")]
	pub sort_by: RawSortSpec,
}

impl GridState {
	/// Creates the initial state: first page, no sort
	pub fn new() -> Self {
		Self::default()
	}

	/// Encodes the state as query-string parameters under `prefix`
	///
	/// The page is omitted when it is the first page.
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_datagrid::state::GridState;
	///
	/// let mut state = GridState::new();
	/// state.page = 2;
	/// state.sort_by.insert("name".into(), "DESC".into());
	///
	/// assert_eq!(
	///     state.to_query("users").unwrap(),
	///     "users-page=2&users-sortBy%5Bname%5D=DESC"
	/// );
	/// ```
	pub fn to_query(&self, prefix: &str) -> Result<String> {
		let mut pairs = Vec::with_capacity(self.sort_by.len() + 1);
		if self.page != 0 {
			pairs.push((page_key(prefix), self.page.to_string()));
		}
		for (column, direction) in &self.sort_by {
			pairs.push((sort_key(prefix, column), direction.clone()));
		}

		serde_urlencoded::to_string(&pairs).map_err(|e| DatagridError::Query(e.to_string()))
	}

	/// Decodes the state from a query string
	///
	/// Parameters belonging to other grids or to the page itself are ignored.
	/// A page that is not an integer falls back to the first page.
	pub fn from_query(prefix: &str, query: &str) -> Result<Self> {
		let pairs = decode_pairs(query)?;
		Ok(Self::from_pairs(prefix, &pairs))
	}

	pub(crate) fn from_pairs(prefix: &str, pairs: &[(String, String)]) -> Self {
		let mut state = Self::new();
		let page_key = page_key(prefix);

		for (key, value) in pairs {
			if *key == page_key {
				state.page = value.trim().parse().unwrap_or_else(|_| {
					tracing::debug!(prefix, value = %value, "ignoring non-numeric page parameter");
					0
				});
			} else if let Some(column) = sort_column(prefix, key) {
				state.sort_by.insert(column.to_string(), value.clone());
			}
		}

		state
	}
}

pub(crate) fn decode_pairs(query: &str) -> Result<Vec<(String, String)>> {
	let query = query.strip_prefix('?').unwrap_or(query);
	serde_urlencoded::from_str(query).map_err(|e| DatagridError::Query(e.to_string()))
}

pub(crate) fn param_key(prefix: &str, name: &str) -> String {
	format!("{prefix}-{name}")
}

fn page_key(prefix: &str) -> String {
	param_key(prefix, "page")
}

fn sort_key(prefix: &str, column: &str) -> String {
	format!("{prefix}-sortBy[{column}]")
}

fn sort_column<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
	key.strip_prefix(prefix)?
		.strip_prefix("-sortBy[")?
		.strip_suffix(']')
		.filter(|column| !column.is_empty())
}
