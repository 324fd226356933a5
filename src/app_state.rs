use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::data::export;
use crate::data::filter::compute_view;
use crate::data::paginate::paginate;
use crate::data::record::StudentRecord;
use crate::data::sort::{SortColumn, SortState};
use crate::data::store::{EditCursor, StudentStore};
use crate::presenter::Presenter;

/// The three filter inputs exactly as the user typed/picked them.
#[derive(Debug, Clone, Default)]
pub struct FilterInput {
    pub query: String,
    pub course: String,
    pub status: String,
}

/// Pagination state; `current_page` is 1-based.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub current_page: usize,
    pub rows_per_page: usize,
}

/// What a save did, for the notice afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    Updated,
}

/// Single owned application state: the store plus everything that shapes
/// the current view. Handlers run mutate → persist → (caller re-renders)
/// to completion; nothing here is shared or ambient.
pub struct AppState {
    store: StudentStore,
    filters: FilterInput,
    view: ViewState,
    sort: SortState,
}

impl AppState {
    pub fn new(store: StudentStore, rows_per_page: usize) -> Self {
        Self {
            store,
            filters: FilterInput::default(),
            view: ViewState {
                current_page: 1,
                rows_per_page: rows_per_page.max(1),
            },
            sort: SortState::default(),
        }
    }

    pub fn store(&self) -> &StudentStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterInput {
        &self.filters
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// A fresh search replaces all three inputs and jumps back to page 1.
    /// Plain re-renders go through `render` and leave the page alone.
    pub fn on_search(&mut self, query: &str, course: &str, status: &str) {
        debug!(target: "app", "Search: query={query:?} course={course:?} status={status:?}");
        self.filters.query = query.to_string();
        self.filters.course = course.to_string();
        self.filters.status = status.to_string();
        self.view.current_page = 1;
    }

    /// Header click: toggle direction, reorder the authoritative list in
    /// place, persist the new order.
    pub fn on_sort(&mut self, column: SortColumn) -> Result<()> {
        self.store.sort_by(&mut self.sort, column)?;
        info!(
            target: "app",
            "Sorted by {} ({})",
            column.as_str(),
            if self.sort.ascending { "asc" } else { "desc" }
        );
        Ok(())
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn on_page(&mut self, page: usize) {
        self.view.current_page = page;
    }

    pub fn on_page_size(&mut self, size: usize) {
        if size > 0 {
            self.view.rows_per_page = size;
            self.view.current_page = 1;
        }
    }

    /// Save the submitted form record: replaces the record under the edit
    /// cursor, or appends when the cursor is clear.
    pub fn on_save(&mut self, record: StudentRecord) -> Result<SaveOutcome> {
        match self.store.cursor() {
            EditCursor::Editing(index) => {
                self.store.replace(index, record)?;
                Ok(SaveOutcome::Updated)
            }
            EditCursor::None => {
                self.store.add(record)?;
                Ok(SaveOutcome::Added)
            }
        }
    }

    /// Target a record for editing by its stable id (array positions shift
    /// under filtering and sorting, so indices are never accepted here).
    /// Returns a copy for the form, or `None` for an unknown id.
    pub fn on_edit(&mut self, id: u64) -> Option<StudentRecord> {
        let index = self.store.index_of(id)?;
        self.store.begin_edit(index).cloned()
    }

    /// Abandon the in-progress edit; the next save appends.
    pub fn on_cancel_edit(&mut self) {
        self.store.clear_cursor();
    }

    /// Delete by stable id. Unknown ids are a quiet no-op, reported as
    /// `false`. Confirmation happens at the presenter before this runs.
    pub fn on_delete(&mut self, id: u64) -> Result<bool> {
        match self.store.index_of(id) {
            Some(index) => self.store.delete(index),
            None => Ok(false),
        }
    }

    pub fn on_clear(&mut self) -> Result<()> {
        self.store.clear()
    }

    /// Export the full (unfiltered) list; empty lists error before any
    /// file is touched.
    pub fn on_export(&self, path: &Path) -> Result<String> {
        export::export_to_file(self.store.records(), path)
    }

    /// Run the pipeline — filter, paginate — and hand the page to the
    /// presenter. Read-only: pagination and filters stay as they are.
    pub fn render(&self, presenter: &mut dyn Presenter) {
        let view = compute_view(
            self.store.records(),
            &self.filters.query,
            &self.filters.course,
            &self.filters.status,
        );
        let (slice, total_pages) = paginate(&view, self.view.current_page, self.view.rows_per_page);
        presenter.render_page(slice, self.view.current_page, total_pages);
    }
}
