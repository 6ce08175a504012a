//! CSV export of a grid page
//!
//! Enabled with the `export` feature.

use crate::error::{DatagridError, Result};
use crate::render::{GridRenderer, GridView};
use serde_json::Value;

/// Renders the current page as CSV
///
/// The first record holds the column headers; each following record holds
/// the cell values of one row. Strings are written as-is, `null` as an empty
/// field, and other values in their JSON form.
#[derive(Debug, Clone)]
pub struct CsvRenderer {
	delimiter: u8,
	include_headers: bool,
}

impl CsvRenderer {
	/// Creates a comma-separated renderer that writes a header record
	pub fn new() -> Self {
		Self {
			delimiter: b',',
			include_headers: true,
		}
	}

	/// Sets the field delimiter
	pub fn delimiter(mut self, delimiter: u8) -> Self {
		self.delimiter = delimiter;
		self
	}

	/// Sets whether the header record is written
	pub fn include_headers(mut self, include_headers: bool) -> Self {
		self.include_headers = include_headers;
		self
	}
}

impl Default for CsvRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> GridRenderer<R> for CsvRenderer {
	type Output = String;

	fn render(&mut self, view: GridView<'_, R>) -> Result<String> {
		let mut writer = csv::WriterBuilder::new()
			.delimiter(self.delimiter)
			.from_writer(Vec::new());

		if self.include_headers {
			writer
				.write_record(view.columns.iter().map(|column| column.label.as_str()))
				.map_err(export_error)?;
		}
		for row in &view.rows {
			writer
				.write_record(row.cells.iter().map(cell_text))
				.map_err(export_error)?;
		}

		let bytes = writer
			.into_inner()
			.map_err(|e| DatagridError::Export(e.to_string()))?;
		String::from_utf8(bytes).map_err(|e| DatagridError::Export(e.to_string()))
	}
}

fn cell_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

fn export_error(error: csv::Error) -> DatagridError {
	DatagridError::Export(error.to_string())
}
