//! Column definitions
//!
//! - [`Column`]: a single named column with label, sortability and value extraction
//! - [`ColumnRegistry`]: the ordered set of columns a grid displays

mod base;
mod registry;

pub use base::{Column, ValueAccessor};
pub use registry::ColumnRegistry;
