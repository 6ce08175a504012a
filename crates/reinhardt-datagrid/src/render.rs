//! Hand-off to the rendering collaborator
//!
//! A grid does not produce markup. At the end of a render pass it builds a
//! [`GridView`] and passes it to a [`GridRenderer`] supplied by the host
//! (a template engine binding, a JSON endpoint, an export).

use crate::error::Result;
use crate::pagination::Paginator;
use crate::sorting::{SortDirection, SortSpec};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Header information for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
	/// Column name
	pub name: String,
	/// Header text (label, or the name when no label was set)
	pub label: String,
	/// Whether the header should offer a sort toggle
	pub sortable: bool,
	/// Current sort direction of this column, if it is sorted
	pub direction: Option<SortDirection>,
	/// Direction the sort toggle link should request
	pub next_direction: SortDirection,
}

/// Identifier of a rendered row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RowId {
	/// Position of the row within the current page
	Position(usize),
	/// Identifier returned by the grid's row-identifier callback
	Key(String),
}

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Position(position) => write!(f, "{position}"),
			Self::Key(key) => f.write_str(key),
		}
	}
}

/// A fetched row prepared for display
#[derive(Debug, Clone)]
pub struct GridRow<R> {
	/// Row identifier
	pub id: RowId,
	/// Cell values, one per column in display order
	pub cells: Vec<Value>,
	/// The row as returned by the data source
	pub data: R,
}

/// Everything a renderer needs for one pass
#[derive(Debug, Clone)]
pub struct GridView<'a, R> {
	/// Name of the grid control, used to address partial re-renders
	pub control: &'a str,
	/// Column headers in display order
	pub columns: Vec<ColumnHeader>,
	/// Rows of the current page
	pub rows: Vec<GridRow<R>>,
	/// Pagination window the rows belong to
	pub paginator: Paginator,
	/// Validated sort applied to the rows
	pub sort_by: SortSpec,
}

/// Rendering collaborator
pub trait GridRenderer<R> {
	/// Rendered output (markup, a response body, bytes)
	type Output;

	/// Renders one pass of the grid
	fn render(&mut self, view: GridView<'_, R>) -> Result<Self::Output>;
}

/// Redraw signal
///
/// Returned by the sort and paginate handlers: the host should re-render only
/// the fragment of the named control instead of navigating to a full page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use = "the host must re-render the grid fragment"]
pub struct Redraw {
	/// Name of the control to re-render
	pub control: String,
}

impl Redraw {
	/// Creates a redraw signal for `control`
	pub fn new(control: impl Into<String>) -> Self {
		Self {
			control: control.into(),
		}
	}
}

/// Renders a grid pass as a JSON document for client-side partial refresh
///
/// ```json
/// {
///   "control": "grid",
///   "columns": [{"name": "name", "label": "Name", "sortable": true, ...}],
///   "rows": [{"id": 0, "cells": {"name": "Alice"}}],
///   "paginator": {"page": 0, "per_page": 20, "item_count": 1, ...},
///   "sortBy": {"name": "ASC"}
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl<R> GridRenderer<R> for JsonRenderer {
	type Output = Value;

	fn render(&mut self, view: GridView<'_, R>) -> Result<Value> {
		let rows = view
			.rows
			.into_iter()
			.map(|row| {
				let cells: Map<String, Value> = view
					.columns
					.iter()
					.map(|column| column.name.clone())
					.zip(row.cells)
					.collect();
				serde_json::json!({ "id": row.id, "cells": cells })
			})
			.collect::<Vec<_>>();

		let paginator = &view.paginator;
		Ok(serde_json::json!({
			"control": view.control,
			"columns": view.columns,
			"rows": rows,
			"paginator": {
				"page": paginator.page(),
				"per_page": paginator.per_page(),
				"item_count": paginator.item_count(),
				"page_count": paginator.page_count(),
				"has_next": paginator.has_next(),
				"has_previous": paginator.has_previous(),
			},
			"sortBy": view.sort_by,
		}))
	}
}
