//! Error types for reinhardt-datagrid

use thiserror::Error;

/// Errors that can occur while configuring or rendering a datagrid
///
/// Invalid persisted sort state and out-of-range pages are deliberately absent:
/// both are resolved during reconciliation instead of failing the render pass.
#[derive(Debug, Error)]
pub enum DatagridError {
	/// A column with the same name is already registered
	#[error("Column with name '{0}' already exists")]
	DuplicateColumn(String),

	/// A column lookup (or an insert-before target) named an unregistered column
	#[error("Column with name '{0}' doesn't exist")]
	UnknownColumn(String),

	/// `render` was called before any data source was set
	#[error("Datasource is not defined")]
	MissingDatasource,

	/// The data source failed to count or fetch rows
	#[error("Datasource error: {0}")]
	Datasource(String),

	/// The rendering collaborator failed
	#[error("Rendering error: {0}")]
	Render(String),

	/// A query string could not be decoded
	#[error("Invalid query string: {0}")]
	Query(String),

	/// Settings failed to parse or validate
	#[error("Invalid datagrid settings: {0}")]
	InvalidSettings(String),

	/// CSV export failed
	#[cfg(feature = "export")]
	#[error("Export error: {0}")]
	Export(String),
}

/// Result type for datagrid operations
pub type Result<T> = std::result::Result<T, DatagridError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(DatagridError::DuplicateColumn("name".into()), "Column with name 'name' already exists")]
	#[case(DatagridError::UnknownColumn("age".into()), "Column with name 'age' doesn't exist")]
	#[case(DatagridError::MissingDatasource, "Datasource is not defined")]
	fn test_error_messages(#[case] error: DatagridError, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}
}
