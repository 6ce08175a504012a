//! Datagrid controller for Reinhardt
//!
//! This crate provides a sortable, paginated data grid for server-rendered
//! pages. It manages column definitions, keeps sort and page state across
//! requests, fetches rows through a caller-supplied data source, and hands the
//! result to a rendering collaborator. Sort and paginate interactions return a
//! redraw signal so the host can refresh only the grid fragment.
//!
//! # Features
//!
//! - **Columns**: Ordered, uniquely-named columns with labels, sortability and value accessors
//! - **Row access**: Default by-name lookup over keyed maps and serializable records
//! - **Sorting**: Multi-column sort, validated leniently against the registered columns
//! - **Pagination**: Zero-based page windows computed from the row count
//! - **Persistence**: State round-trips through serde or query-string parameters
//! - **Export**: CSV rendering of the current page (requires `export` feature)
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Grid] --> B[ColumnRegistry]
//!     A --> C[GridState]
//!     A --> D[Paginator]
//!     A --> E[DataSource]
//!     A --> F[GridRenderer]
//!     B --> G[Column]
//!     G --> H[Row]
//!     E --> I[VecSource]
//!     E --> J[FnSource]
//!     F --> K[JsonRenderer]
//!     F --> L[CsvRenderer]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datagrid::{Grid, GridState, JsonRenderer, Record, VecSource};
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct User {
//!     id: i32,
//!     name: String,
//!     email: String,
//! }
//!
//! let users: VecSource<Record<User>> = (1..=45)
//!     .map(|id| Record(User {
//!         id,
//!         name: format!("user{id:02}"),
//!         email: format!("user{id}@example.com"),
//!     }))
//!     .collect();
//!
//! let state = GridState::from_query("grid", "grid-page=2&grid-sortBy%5Bname%5D=DESC").unwrap();
//!
//! let mut grid: Grid<VecSource<Record<User>>> = Grid::new().with_state(state);
//! grid.add_column("name", Some("Name")).unwrap().set_sortable(true);
//! grid.add_column("email", Some("E-mail")).unwrap();
//! grid.set_datasource(users);
//! grid.set_row_identifier(|user| user.id.to_string());
//!
//! let document = grid.render(&mut JsonRenderer).unwrap();
//! assert_eq!(document["rows"].as_array().unwrap().len(), 5);
//! assert_eq!(document["rows"][0]["id"], "5");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod datasource;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod grid;
pub mod pagination;
pub mod render;
pub mod row;
pub mod settings;
pub mod sorting;
pub mod state;

// Re-exports for convenience
pub use column::{Column, ColumnRegistry};
pub use datasource::{DataSource, FnSource, VecSource};
pub use error::{DatagridError, Result};
#[cfg(feature = "export")]
pub use export::CsvRenderer;
pub use grid::{Grid, GridAction, GridPhase};
pub use pagination::Paginator;
pub use render::{ColumnHeader, GridRenderer, GridRow, GridView, JsonRenderer, Redraw, RowId};
pub use row::{Record, Row};
pub use settings::DatagridSettings;
pub use sorting::{RawSortSpec, SortDirection, SortSpec};
pub use state::GridState;
