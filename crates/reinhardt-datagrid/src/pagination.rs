//! Pagination functionality for datagrids

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Default number of rows per page
pub const DEFAULT_PER_PAGE: usize = 20;

/// Pagination window calculator
///
/// Pages are zero-based. The page number is never clamped against the item
/// count: a page past the end simply has an empty window.
///
/// # Example
///
/// ```rust
/// use reinhardt_datagrid::pagination::Paginator;
///
/// let mut paginator = Paginator::new(20);
/// paginator.set_item_count(45);
/// paginator.set_page(2);
///
/// assert_eq!(paginator.offset(), 40);
/// assert_eq!(paginator.length(), 5);
/// assert!(!paginator.has_next());
/// assert!(paginator.has_previous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPaginator")]
pub struct Paginator {
	/// Current page (0-indexed)
	page: usize,
	/// Number of items per page
	per_page: usize,
	/// Total number of items
	item_count: usize,
}

/// Wire form of [`Paginator`], validated on conversion
#[derive(Deserialize)]
struct RawPaginator {
	page: usize,
	per_page: usize,
	item_count: usize,
}

impl From<RawPaginator> for Paginator {
	fn from(raw: RawPaginator) -> Self {
		let mut paginator = Self::new(raw.per_page);
		paginator.page = raw.page;
		paginator.item_count = raw.item_count;
		paginator
	}
}

impl Paginator {
	/// Creates a new paginator on the first page
	///
	/// # Arguments
	///
	/// * `per_page` - Number of items per page (at least 1)
	pub fn new(per_page: usize) -> Self {
		Self {
			page: 0,
			per_page: per_page.max(1),
			item_count: 0,
		}
	}

	/// Returns the current page (0-indexed)
	pub fn page(&self) -> usize {
		self.page
	}

	/// Sets the current page, clamping negative values to the first page
	pub fn set_page(&mut self, page: i64) {
		if page < 0 {
			tracing::trace!(page, "clamping negative page to 0");
		}
		self.page = usize::try_from(page).unwrap_or(0);
	}

	/// Returns the number of items per page
	pub fn per_page(&self) -> usize {
		self.per_page
	}

	/// Sets the number of items per page (at least 1)
	pub fn set_per_page(&mut self, per_page: usize) {
		self.per_page = per_page.max(1);
	}

	/// Returns the total number of items
	pub fn item_count(&self) -> usize {
		self.item_count
	}

	/// Sets the total number of items
	pub fn set_item_count(&mut self, item_count: usize) {
		self.item_count = item_count;
	}

	/// Returns the total number of pages
	pub fn page_count(&self) -> usize {
		self.item_count.div_ceil(self.per_page)
	}

	/// Returns the index of the first item on the current page (0-indexed)
	pub fn offset(&self) -> usize {
		self.page.saturating_mul(self.per_page)
	}

	/// Returns the number of items on the current page
	pub fn length(&self) -> usize {
		self.item_count
			.saturating_sub(self.offset())
			.min(self.per_page)
	}

	/// Returns the item index range of the current page (0-indexed, exclusive end)
	pub fn range(&self) -> Range<usize> {
		let start = self.offset().min(self.item_count);
		start..start + self.length()
	}

	/// Returns the 1-based index of the first item on this page, or 0 if the page is empty
	pub fn first_item(&self) -> usize {
		if self.length() == 0 {
			0
		} else {
			self.offset() + 1
		}
	}

	/// Returns the 1-based index of the last item on this page, or 0 if the page is empty
	pub fn last_item(&self) -> usize {
		if self.length() == 0 {
			0
		} else {
			self.offset() + self.length()
		}
	}

	/// Returns true if there is a next page
	pub fn has_next(&self) -> bool {
		self.page.saturating_add(1) < self.page_count()
	}

	/// Returns true if there is a previous page
	pub fn has_previous(&self) -> bool {
		self.page > 0
	}

	/// Returns true on the first page
	pub fn is_first(&self) -> bool {
		self.page == 0
	}

	/// Returns true on the last page (or past it)
	pub fn is_last(&self) -> bool {
		!self.has_next()
	}
}

impl Default for Paginator {
	fn default() -> Self {
		Self::new(DEFAULT_PER_PAGE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	fn paginator(per_page: usize, items: usize, page: i64) -> Paginator {
		let mut paginator = Paginator::new(per_page);
		paginator.set_item_count(items);
		paginator.set_page(page);
		paginator
	}

	#[rstest]
	fn test_last_partial_page() {
		let p = paginator(20, 45, 2);

		assert_eq!(p.page_count(), 3);
		assert_eq!(p.range(), 40..45);
		assert_eq!(p.length(), 5);
		assert_eq!((p.first_item(), p.last_item()), (41, 45));
		assert!(!p.has_next());
		assert!(p.has_previous());
		assert!(p.is_last());
	}

	#[rstest]
	#[case(0, 20, true, false)]
	#[case(1, 20, true, true)]
	#[case(5, 0, false, true)]
	fn test_windows(
		#[case] page: i64,
		#[case] expected_len: usize,
		#[case] has_next: bool,
		#[case] has_previous: bool,
	) {
		let p = paginator(20, 45, page);

		assert_eq!(p.length(), expected_len);
		assert_eq!(p.has_next(), has_next);
		assert_eq!(p.has_previous(), has_previous);
	}

	#[rstest]
	fn test_out_of_range_page_is_empty() {
		let p = paginator(10, 25, 7);

		assert_eq!(p.offset(), 70);
		assert_eq!(p.length(), 0);
		assert_eq!(p.range(), 25..25);
		assert_eq!((p.first_item(), p.last_item()), (0, 0));
	}

	#[rstest]
	#[case(-1)]
	#[case(-100)]
	#[case(i64::MIN)]
	fn test_negative_page_clamps_to_first(#[case] page: i64) {
		let p = paginator(10, 25, page);
		assert_eq!(p.page(), 0);
		assert!(p.is_first());
	}

	#[rstest]
	fn test_empty_collection() {
		let p = paginator(10, 0, 0);
		assert_eq!(p.page_count(), 0);
		assert_eq!(p.length(), 0);
		assert!(!p.has_next());
		assert!(!p.has_previous());
	}

	#[rstest]
	fn test_per_page_minimum_is_one() {
		let mut p = Paginator::new(0);
		assert_eq!(p.per_page(), 1);
		p.set_per_page(0);
		assert_eq!(p.per_page(), 1);
	}

	#[rstest]
	fn test_deserialize_clamps_zero_per_page() {
		let p: Paginator =
			serde_json::from_str(r#"{"page": 1, "per_page": 0, "item_count": 5}"#).unwrap();

		assert_eq!(p.per_page(), 1);
		assert_eq!(p.page_count(), 5);
		assert_eq!(p.range(), 1..2);
		assert!(p.has_next());
	}

	#[rstest]
	fn test_serde_round_trip() {
		let p = paginator(20, 45, 2);
		let json = serde_json::to_string(&p).unwrap();

		assert_eq!(serde_json::from_str::<Paginator>(&json).unwrap(), p);
	}

	proptest! {
		#[test]
		fn window_never_exceeds_items(per_page in 1usize..100, items in 0usize..10_000, page in 0i64..500) {
			let p = paginator(per_page, items, page);
			prop_assert!(p.length() <= per_page);
			prop_assert!(p.range().end <= items);
			prop_assert_eq!(p.range().len(), p.length());
		}
	}
}
