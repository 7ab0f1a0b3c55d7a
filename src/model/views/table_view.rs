use std::sync::Arc;

use crate::model::columns::ColumnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: ColumnId,
    pub desc: bool,
}

/// Search, sort and page state of the table.
///
/// `search_text` is what is currently typed into the search box and drives
/// highlighting. `global_filter` is the term rows are filtered by and only
/// changes when a search is committed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search_text: String,
    pub global_filter: String,
    pub sort_by: Option<SortSpec>,
    pub page_index: usize,
}

/// Represents the state and data for rendering a table view.
///
/// `rows` maps view positions (after filtering and sorting) to indices into
/// the loaded data.
pub struct TableView {
    pub(crate) name: String,
    pub(crate) rows: Arc<Vec<usize>>, // Mapping of TableView row index to data index
    pub(crate) state: ViewState,
    pub(crate) page_size: usize,
    pub(crate) curser_row: usize,    // Row within the current page
    pub(crate) curser_column: usize, // Index into the column list
}

impl TableView {
    /// Creates an empty TableView with default values.
    pub(crate) fn empty(page_size: usize) -> Self {
        TableView {
            name: String::new(),
            rows: Arc::new(Vec::new()),
            state: ViewState::default(),
            page_size: page_size.max(1),
            curser_row: 0,
            curser_column: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    pub fn can_previous_page(&self) -> bool {
        self.state.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.state.page_index + 1 < self.page_count()
    }

    /// Data indices shown on the current page. Empty if the page index lies
    /// past the last page.
    pub fn page_rows(&self) -> &[usize] {
        let begin = std::cmp::min(self.state.page_index * self.page_size, self.rows.len());
        let end = std::cmp::min(begin + self.page_size, self.rows.len());
        &self.rows[begin..end]
    }

    /// Moves to `page_index`. Out of range requests are ignored.
    pub(crate) fn goto_page(&mut self, page_index: usize) -> bool {
        if page_index >= self.page_count() {
            return false;
        }
        self.state.page_index = page_index;
        self.clamp_curser();
        true
    }

    pub(crate) fn clamp_curser(&mut self) {
        let page_len = self.page_rows().len();
        self.curser_row = std::cmp::min(self.curser_row, page_len.saturating_sub(1));
    }
}
