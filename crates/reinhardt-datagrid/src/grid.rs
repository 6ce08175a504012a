//! Grid controller

use crate::column::{Column, ColumnRegistry};
use crate::datasource::DataSource;
use crate::error::{DatagridError, Result};
use crate::pagination::Paginator;
use crate::render::{ColumnHeader, GridRenderer, GridRow, GridView, Redraw, RowId};
use crate::row::Row;
use crate::settings::{DEFAULT_PARAM_PREFIX, DatagridSettings};
use crate::sorting::{self, RawSortSpec, SortDirection, SortSpec};
use crate::state::{self, GridState};
use indexmap::IndexMap;

/// Row-identifier callback
pub type RowIdentifier<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// Filter modifier applied to the data source before it is counted and sorted
pub type FilterModifier<D> = Box<dyn Fn(&mut D) + Send + Sync>;

/// Per-column sort callback applied to the data source for each validated sort entry
pub type ColumnSorter<D> = Box<dyn Fn(&mut D, SortDirection) + Send + Sync>;

/// Validation phase of the persisted state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
	/// Freshly constructed, rehydrated or mutated by a handler
	Pending,
	/// Reconciled against the registered columns
	Validated,
}

/// Interaction requested by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
	/// Replace the sort with the given unvalidated entries
	Sort(RawSortSpec),
	/// Move to the given page
	Paginate(i64),
}

impl GridAction {
	/// Decodes the action addressed to the grid `prefix`, if any
	///
	/// Actions are signalled with `do=<prefix>-sort` or `do=<prefix>-paginate`;
	/// their arguments use the same parameters as the persisted state.
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_datagrid::grid::GridAction;
	///
	/// let action = GridAction::from_query("grid", "do=grid-paginate&grid-page=3").unwrap();
	/// assert_eq!(action, Some(GridAction::Paginate(3)));
	/// ```
	pub fn from_query(prefix: &str, query: &str) -> Result<Option<Self>> {
		let pairs = state::decode_pairs(query)?;
		let Some((_, signal)) = pairs.iter().find(|(key, _)| key == "do") else {
			return Ok(None);
		};

		let args = GridState::from_pairs(prefix, &pairs);
		let action = if *signal == state::param_key(prefix, "sort") {
			Some(Self::Sort(args.sort_by))
		} else if *signal == state::param_key(prefix, "paginate") {
			Some(Self::Paginate(args.page))
		} else {
			None
		};
		Ok(action)
	}
}

/// Sortable, paginated datagrid
///
/// A grid is built for one request: register columns, set a data source,
/// restore the persisted state, let a handler apply the client's interaction,
/// then render once.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Pending: new / with_state
///     Pending --> Pending: handle_sort / handle_paginate
///     Pending --> Validated: reconcile
///     Validated --> [*]: fetch + hand off to renderer
/// ```
///
/// Persisted sort entries that name unknown or non-sortable columns, or carry
/// a direction other than `ASC`/`DESC`, are dropped during reconciliation
/// rather than reported.
///
/// # Example
///
/// ```rust
/// use reinhardt_datagrid::{Grid, JsonRenderer, VecSource};
/// use serde_json::{json, Value};
///
/// let mut grid: Grid<VecSource<Value>> = Grid::new();
/// grid.add_column("name", Some("Name")).unwrap().set_sortable(true);
/// grid.add_column("email", None).unwrap();
/// grid.set_datasource(VecSource::new(vec![
///     json!({"name": "Bob", "email": "bob@example.com"}),
///     json!({"name": "Alice", "email": "alice@example.com"}),
/// ]));
///
/// let _ = grid.handle_sort([("name".to_string(), "ASC".to_string())].into_iter().collect());
/// let document = grid.render(&mut JsonRenderer).unwrap();
///
/// assert_eq!(document["rows"][0]["cells"]["name"], json!("Alice"));
/// ```
#[cfg_attr(doc, aquamarine::aquamarine)]
pub struct Grid<D: DataSource> {
	name: String,
	columns: ColumnRegistry<D::Row>,
	state: GridState,
	paginator: Paginator,
	datasource: Option<D>,
	filters: Vec<FilterModifier<D>>,
	sorters: IndexMap<String, ColumnSorter<D>>,
	row_identifier: Option<RowIdentifier<D::Row>>,
	phase: GridPhase,
}

impl<D: DataSource> Grid<D> {
	/// Creates a grid named `grid` with default settings
	pub fn new() -> Self {
		Self {
			name: DEFAULT_PARAM_PREFIX.to_string(),
			columns: ColumnRegistry::new(),
			state: GridState::new(),
			paginator: Paginator::default(),
			datasource: None,
			filters: Vec::new(),
			sorters: IndexMap::new(),
			row_identifier: None,
			phase: GridPhase::Pending,
		}
	}

	/// Creates a grid from validated settings
	///
	/// The parameter prefix doubles as the control name.
	pub fn with_settings(settings: &DatagridSettings) -> Result<Self> {
		settings.validate()?;

		let mut grid = Self::new();
		grid.name = settings.param_prefix.clone();
		grid.paginator
			.set_per_page(settings.clamp_per_page(settings.per_page));
		Ok(grid)
	}

	/// Restores persisted state
	pub fn with_state(mut self, state: GridState) -> Self {
		self.set_state(state);
		self
	}

	/// Returns the control name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the persisted state
	pub fn state(&self) -> &GridState {
		&self.state
	}

	/// Replaces the persisted state
	pub fn set_state(&mut self, state: GridState) {
		self.state = state;
		self.phase = GridPhase::Pending;
	}

	/// Consumes the grid and returns the state to persist
	pub fn into_state(self) -> GridState {
		self.state
	}

	/// Returns the persisted page (unclamped until reconciliation)
	pub fn page(&self) -> i64 {
		self.state.page
	}

	/// Returns the persisted sort (unvalidated until reconciliation)
	pub fn sort_by(&self) -> &RawSortSpec {
		&self.state.sort_by
	}

	/// Returns the validation phase
	pub fn phase(&self) -> GridPhase {
		self.phase
	}

	/// Registers a column at the end of the grid
	///
	/// # Errors
	///
	/// Returns [`DatagridError::DuplicateColumn`] if `name` is taken.
	pub fn add_column(
		&mut self,
		name: impl Into<String>,
		label: Option<&str>,
	) -> Result<&mut Column<D::Row>> {
		self.columns.register(new_column(name, label))
	}

	/// Registers a column directly before the column named `before`
	///
	/// # Errors
	///
	/// Returns [`DatagridError::DuplicateColumn`] if `name` is taken and
	/// [`DatagridError::UnknownColumn`] if `before` is not registered.
	pub fn add_column_before(
		&mut self,
		name: impl Into<String>,
		label: Option<&str>,
		before: &str,
	) -> Result<&mut Column<D::Row>> {
		self.columns.register_before(new_column(name, label), before)
	}

	/// Returns the column registry
	pub fn columns(&self) -> &ColumnRegistry<D::Row> {
		&self.columns
	}

	/// Returns the column registry for mutation
	pub fn columns_mut(&mut self) -> &mut ColumnRegistry<D::Row> {
		&mut self.columns
	}

	/// Sets the data source
	pub fn set_datasource(&mut self, datasource: D) -> &mut Self {
		self.datasource = Some(datasource);
		self
	}

	/// Returns the data source, if one was set
	pub fn datasource_mut(&mut self) -> Option<&mut D> {
		self.datasource.as_mut()
	}

	/// Appends a filter modifier
	///
	/// Filters run in registration order on every render pass, before the
	/// source is counted.
	pub fn add_filter<F>(&mut self, filter: F) -> &mut Self
	where
		F: Fn(&mut D) + Send + Sync + 'static,
	{
		self.filters.push(Box::new(filter));
		self
	}

	/// Attaches a sort callback to the column `name` and marks it sortable
	///
	/// On every render pass, after the filters, the callback runs once for each
	/// validated sort entry of its column, in sort order, with the requested
	/// direction. The validated sort is still passed to
	/// [`DataSource::fetch`] afterwards.
	///
	/// # Errors
	///
	/// Returns [`DatagridError::UnknownColumn`] if `name` is not registered.
	pub fn set_column_sorter<F>(&mut self, name: &str, sorter: F) -> Result<&mut Self>
	where
		F: Fn(&mut D, SortDirection) + Send + Sync + 'static,
	{
		self.columns.mark_sortable(name)?;
		self.sorters.insert(name.to_string(), Box::new(sorter));
		Ok(self)
	}

	/// Returns whether a sort callback is attached to the column `name`
	pub fn has_column_sorter(&self, name: &str) -> bool {
		self.sorters.contains_key(name)
	}

	/// Sets the row-identifier callback
	pub fn set_row_identifier<F>(&mut self, identifier: F) -> &mut Self
	where
		F: Fn(&D::Row) -> String + Send + Sync + 'static,
	{
		self.row_identifier = Some(Box::new(identifier));
		self
	}

	/// Returns the number of rows per page
	pub fn per_page(&self) -> usize {
		self.paginator.per_page()
	}

	/// Sets the number of rows per page (at least 1)
	pub fn set_per_page(&mut self, per_page: usize) -> &mut Self {
		self.paginator.set_per_page(per_page);
		self
	}

	/// Returns the paginator of the last render pass
	pub fn paginator(&self) -> &Paginator {
		&self.paginator
	}

	/// Handles the `sort` interaction
	///
	/// The persisted sort is replaced wholesale. Nothing is validated here;
	/// the next reconciliation prunes whatever the client sent.
	pub fn handle_sort(&mut self, sort_by: RawSortSpec) -> Redraw {
		tracing::debug!(control = %self.name, entries = sort_by.len(), "sort requested");
		self.state.sort_by = sort_by;
		self.phase = GridPhase::Pending;
		Redraw::new(&self.name)
	}

	/// Handles the `paginate` interaction
	pub fn handle_paginate(&mut self, page: i64) -> Redraw {
		tracing::debug!(control = %self.name, page, "page requested");
		self.state.page = page;
		self.phase = GridPhase::Pending;
		Redraw::new(&self.name)
	}

	/// Routes a decoded client action to its handler
	pub fn dispatch(&mut self, action: GridAction) -> Redraw {
		match action {
			GridAction::Sort(sort_by) => self.handle_sort(sort_by),
			GridAction::Paginate(page) => self.handle_paginate(page),
		}
	}

	/// Decodes and dispatches the action addressed to this grid, if the query carries one
	pub fn handle_query(&mut self, query: &str) -> Result<Option<Redraw>> {
		let action = GridAction::from_query(&self.name, query)?;
		Ok(action.map(|action| self.dispatch(action)))
	}

	/// Returns the direction the sort toggle of `column` should request
	///
	/// `DESC` when the column is currently sorted `ASC`, otherwise `ASC`.
	pub fn next_sort_direction(&self, column: &str) -> SortDirection {
		match self.state.sort_by.get(column).map(String::as_str) {
			Some(SortDirection::ASC) => SortDirection::Descending,
			_ => SortDirection::Ascending,
		}
	}

	/// Returns the current sort direction of `column`, if it has a legal one
	pub fn sort_direction(&self, column: &str) -> Option<SortDirection> {
		self.state
			.sort_by
			.get(column)
			.and_then(|direction| SortDirection::parse(direction))
	}

	/// Reconciles the persisted state with the registered columns
	///
	/// Drops invalid sort entries, clamps the page to be non-negative and
	/// returns the validated sort.
	pub fn reconcile(&mut self) -> SortSpec {
		let (pruned, spec) = sorting::reconcile(&self.state.sort_by, &self.columns);
		let dropped = self.state.sort_by.len() - pruned.len();
		if dropped > 0 {
			tracing::debug!(control = %self.name, dropped, "pruned invalid sort entries");
		}
		self.state.sort_by = pruned;

		if self.state.page < 0 {
			tracing::debug!(control = %self.name, page = self.state.page, "clamping negative page");
			self.state.page = 0;
		}

		self.phase = GridPhase::Validated;
		spec
	}

	/// Returns the identifier of `row` at `position` within the current page
	pub fn row_identity(&self, row: &D::Row, position: usize) -> RowId {
		match &self.row_identifier {
			Some(identifier) => RowId::Key(identifier(row)),
			None => RowId::Position(position),
		}
	}
}

impl<D> Grid<D>
where
	D: DataSource,
	D::Row: Row,
{
	/// Runs one render pass and hands the result to `renderer`
	///
	/// Reconciles the state, applies the filters and the column sorters, counts
	/// the rows, fetches the current window with the validated sort and passes
	/// the view on.
	///
	/// # Errors
	///
	/// Returns [`DatagridError::MissingDatasource`] before doing anything else
	/// if no data source was set. Errors from the source and the renderer are
	/// propagated.
	pub fn render<T>(&mut self, renderer: &mut T) -> Result<T::Output>
	where
		T: GridRenderer<D::Row>,
	{
		if self.datasource.is_none() {
			return Err(DatagridError::MissingDatasource);
		}

		let sort_by = self.reconcile();
		self.paginator.set_page(self.state.page);

		let data = {
			let datasource = self
				.datasource
				.as_mut()
				.ok_or(DatagridError::MissingDatasource)?;
			for filter in &self.filters {
				filter(datasource);
			}
			for (column, direction) in sort_by.iter() {
				if let Some(sorter) = self.sorters.get(column) {
					tracing::trace!(control = %self.name, column, direction = %direction, "applying column sorter");
					sorter(datasource, direction);
				}
			}
			self.paginator.set_item_count(datasource.count()?);
			datasource.fetch(&sort_by, &self.paginator)?
		};

		tracing::debug!(
			control = %self.name,
			page = self.paginator.page(),
			items = self.paginator.item_count(),
			rows = data.len(),
			"rendering datagrid"
		);

		let view = GridView {
			control: &self.name,
			columns: self.headers(&sort_by),
			rows: data
				.into_iter()
				.enumerate()
				.map(|(position, row)| GridRow {
					id: self.row_identity(&row, position),
					cells: self.columns.iter().map(|column| column.value(&row)).collect(),
					data: row,
				})
				.collect(),
			paginator: self.paginator.clone(),
			sort_by,
		};

		renderer.render(view)
	}

	fn headers(&self, sort_by: &SortSpec) -> Vec<ColumnHeader> {
		self.columns
			.iter()
			.map(|column| ColumnHeader {
				name: column.name().to_string(),
				label: column.header().to_string(),
				sortable: column.is_sortable(),
				direction: sort_by.get(column.name()),
				next_direction: self.next_sort_direction(column.name()),
			})
			.collect()
	}
}

impl<D: DataSource> Default for Grid<D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<D: DataSource> std::fmt::Debug for Grid<D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Grid")
			.field("name", &self.name)
			.field("columns", &self.columns)
			.field("state", &self.state)
			.field("paginator", &self.paginator)
			.field("datasource", &self.datasource.as_ref().map(|_| "<datasource>"))
			.field("filters", &self.filters.len())
			.field("sorters", &self.sorters.keys().collect::<Vec<_>>())
			.field("phase", &self.phase)
			.finish_non_exhaustive()
	}
}

fn new_column<R>(name: impl Into<String>, label: Option<&str>) -> Column<R> {
	let column = Column::new(name);
	match label {
		Some(label) => column.with_label(label),
		None => column,
	}
}
