//! Row supply for datagrids
//!
//! The grid never touches storage itself. It asks a [`DataSource`] for the
//! total number of rows and for the rows of the current window, passing the
//! validated sort along. What "sort" and "fetch" mean against a concrete store
//! is up to the source.
//!
//! Two implementations ship with the crate:
//!
//! - [`FnSource`]: wraps a count closure and a fetch closure
//! - [`VecSource`]: sorts and slices an in-memory collection

use crate::error::Result;
use crate::pagination::Paginator;
use crate::row::Row;
use crate::sorting::{SortDirection, SortSpec};
use serde_json::Value;
use std::cmp::Ordering;

/// A supplier of rows for a grid
pub trait DataSource {
	/// The type of rows produced
	type Row;

	/// Returns the total number of rows across all pages
	fn count(&mut self) -> Result<usize>;

	/// Returns the rows of the window described by `paginator`, ordered by `sort_by`
	///
	/// A window past the last row yields an empty sequence.
	fn fetch(&mut self, sort_by: &SortSpec, paginator: &Paginator) -> Result<Vec<Self::Row>>;
}

/// Data source backed by two closures
///
/// # Example
///
/// ```rust
/// use reinhardt_datagrid::datasource::{DataSource, FnSource};
/// use reinhardt_datagrid::pagination::Paginator;
/// use reinhardt_datagrid::sorting::SortSpec;
///
/// let mut source = FnSource::new(
///     || Ok(100),
///     |_sort, paginator| Ok(paginator.range().collect::<Vec<usize>>()),
/// );
///
/// let mut paginator = Paginator::new(10);
/// paginator.set_item_count(source.count().unwrap());
/// paginator.set_page(3);
/// assert_eq!(source.fetch(&SortSpec::new(), &paginator).unwrap()[0], 30);
/// ```
pub struct FnSource<C, F> {
	count: C,
	fetch: F,
}

impl<C, F> FnSource<C, F> {
	/// Creates a source from a count closure and a fetch closure
	pub fn new<R>(count: C, fetch: F) -> Self
	where
		C: FnMut() -> Result<usize>,
		F: FnMut(&SortSpec, &Paginator) -> Result<Vec<R>>,
	{
		Self { count, fetch }
	}
}

impl<R, C, F> DataSource for FnSource<C, F>
where
	C: FnMut() -> Result<usize>,
	F: FnMut(&SortSpec, &Paginator) -> Result<Vec<R>>,
{
	type Row = R;

	fn count(&mut self) -> Result<usize> {
		(self.count)()
	}

	fn fetch(&mut self, sort_by: &SortSpec, paginator: &Paginator) -> Result<Vec<R>> {
		(self.fetch)(sort_by, paginator)
	}
}

impl<C, F> std::fmt::Debug for FnSource<C, F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FnSource").finish_non_exhaustive()
	}
}

/// In-memory data source
///
/// Sorting compares the rows' field values named by the sort keys, in
/// priority order. Filters registered on a grid can narrow the collection
/// with [`retain`](Self::retain) before it is counted.
#[derive(Debug, Clone, Default)]
pub struct VecSource<R> {
	rows: Vec<R>,
}

impl<R> VecSource<R> {
	/// Creates a source over `rows`
	pub fn new(rows: Vec<R>) -> Self {
		Self { rows }
	}

	/// Keeps only the rows matching `predicate`
	pub fn retain<P>(&mut self, predicate: P)
	where
		P: FnMut(&R) -> bool,
	{
		self.rows.retain(predicate);
	}

	/// Returns the rows, unsorted
	pub fn rows(&self) -> &[R] {
		&self.rows
	}

	/// Consumes the source and returns its rows
	pub fn into_rows(self) -> Vec<R> {
		self.rows
	}
}

impl<R> FromIterator<R> for VecSource<R> {
	fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<R: Row + Clone> DataSource for VecSource<R> {
	type Row = R;

	fn count(&mut self) -> Result<usize> {
		Ok(self.rows.len())
	}

	fn fetch(&mut self, sort_by: &SortSpec, paginator: &Paginator) -> Result<Vec<R>> {
		let range = paginator.range();
		if range.is_empty() {
			return Ok(Vec::new());
		}

		if sort_by.is_empty() {
			return Ok(self
				.rows
				.iter()
				.skip(range.start)
				.take(range.len())
				.cloned()
				.collect());
		}

		// sort keys are read once per row, not once per comparison
		let columns: Vec<&str> = sort_by.iter().map(|(column, _)| column).collect();
		let directions: Vec<SortDirection> = sort_by.iter().map(|(_, direction)| direction).collect();
		let mut keyed: Vec<(Vec<Value>, &R)> = self
			.rows
			.iter()
			.map(|row| (row.fields(&columns), row))
			.collect();
		// stable sort keeps insertion order for full ties
		keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, &directions));

		Ok(keyed
			.into_iter()
			.skip(range.start)
			.take(range.len())
			.map(|(_, row)| row.clone())
			.collect())
	}
}

fn compare_keys(left: &[Value], right: &[Value], directions: &[SortDirection]) -> Ordering {
	for ((left, right), direction) in left.iter().zip(right).zip(directions) {
		let ordering = match direction {
			SortDirection::Ascending => compare_values(left, right),
			SortDirection::Descending => compare_values(left, right).reverse(),
		};
		if ordering.is_ne() {
			return ordering;
		}
	}
	Ordering::Equal
}

/// Total order over JSON values: null < bool < number < string < array < object
fn compare_values(left: &Value, right: &Value) -> Ordering {
	match (left, right) {
		(Value::Bool(l), Value::Bool(r)) => l.cmp(r),
		(Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
			(Some(l), Some(r)) => l.cmp(&r),
			_ => {
				let l = l.as_f64().unwrap_or(f64::NAN);
				let r = r.as_f64().unwrap_or(f64::NAN);
				l.total_cmp(&r)
			}
		},
		(Value::String(l), Value::String(r)) => l.cmp(r),
		(Value::Array(l), Value::Array(r)) => l
			.iter()
			.zip(r)
			.map(|(l, r)| compare_values(l, r))
			.find(|ordering| ordering.is_ne())
			.unwrap_or_else(|| l.len().cmp(&r.len())),
		(l, r) => rank(l).cmp(&rank(r)),
	}
}

fn rank(value: &Value) -> u8 {
	match value {
		Value::Null => 0,
		Value::Bool(_) => 1,
		Value::Number(_) => 2,
		Value::String(_) => 3,
		Value::Array(_) => 4,
		Value::Object(_) => 5,
	}
}
