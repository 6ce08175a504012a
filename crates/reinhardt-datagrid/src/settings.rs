//! Datagrid settings
//!
//! Settings are plain serde data so they can be embedded in a project's own
//! settings file. A standalone TOML table is also supported:
//!
//! ```toml
//! per_page = 50
//! param_prefix = "users"
//! max_per_page = 200
//! ```

use crate::error::{DatagridError, Result};
use crate::pagination::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};

/// Default query-string parameter prefix
pub const DEFAULT_PARAM_PREFIX: &str = "grid";

/// Per-grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatagridSettings {
	/// Rows per page
	pub per_page: usize,
	/// Prefix of the grid's query-string parameters (also the control name)
	pub param_prefix: String,
	/// Upper bound for `per_page`, if any
	pub max_per_page: Option<usize>,
}

impl Default for DatagridSettings {
	fn default() -> Self {
		Self {
			per_page: DEFAULT_PER_PAGE,
			param_prefix: DEFAULT_PARAM_PREFIX.to_string(),
			max_per_page: None,
		}
	}
}

impl DatagridSettings {
	/// Parses and validates settings from a TOML document
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_datagrid::settings::DatagridSettings;
	///
	/// let settings = DatagridSettings::from_toml_str("per_page = 50").unwrap();
	/// assert_eq!(settings.per_page, 50);
	/// assert_eq!(settings.param_prefix, "grid");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let settings: Self =
			toml::from_str(source).map_err(|e| DatagridError::InvalidSettings(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks the settings for values a grid cannot work with
	pub fn validate(&self) -> Result<()> {
		if self.per_page == 0 {
			return Err(DatagridError::InvalidSettings(
				"per_page must be at least 1".to_string(),
			));
		}
		if self.param_prefix.is_empty() {
			return Err(DatagridError::InvalidSettings(
				"param_prefix must not be empty".to_string(),
			));
		}
		if let Some(max) = self.max_per_page
			&& self.per_page > max
		{
			return Err(DatagridError::InvalidSettings(format!(
				"per_page ({}) exceeds max_per_page ({max})",
				self.per_page
			)));
		}
		Ok(())
	}

	/// Clamps a requested page size to `1..=max_per_page`
	pub fn clamp_per_page(&self, per_page: usize) -> usize {
		let per_page = per_page.max(1);
		match self.max_per_page {
			Some(max) if per_page > max => {
				tracing::debug!(requested = per_page, max, "clamping page size");
				max
			}
			_ => per_page,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = DatagridSettings::default();
		assert_eq!(settings.per_page, 20);
		assert_eq!(settings.param_prefix, "grid");
		assert_eq!(settings.max_per_page, None);
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_from_toml_full() {
		let settings = DatagridSettings::from_toml_str(
			r#"
			per_page = 50
			param_prefix = "users"
			max_per_page = 200
			"#,
		)
		.unwrap();

		assert_eq!(settings.per_page, 50);
		assert_eq!(settings.param_prefix, "users");
		assert_eq!(settings.max_per_page, Some(200));
	}

	#[rstest]
	#[case("per_page = 0")]
	#[case("param_prefix = \"\"")]
	#[case("per_page = 300\nmax_per_page = 100")]
	#[case("per_page = \"many\"")]
	fn test_from_toml_rejects(#[case] source: &str) {
		assert!(matches!(
			DatagridSettings::from_toml_str(source),
			Err(DatagridError::InvalidSettings(_))
		));
	}

	#[rstest]
	#[case(None, 0, 1)]
	#[case(None, 500, 500)]
	#[case(Some(100), 500, 100)]
	#[case(Some(100), 40, 40)]
	fn test_clamp_per_page(#[case] max: Option<usize>, #[case] requested: usize, #[case] expected: usize) {
		let settings = DatagridSettings {
			max_per_page: max,
			..Default::default()
		};
		assert_eq!(settings.clamp_per_page(requested), expected);
	}
}
