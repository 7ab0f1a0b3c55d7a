use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use arboard::Clipboard;
use chrono::Local;
use ratatui::crossterm::event::KeyEvent;
use rayon::prelude::*;
use tracing::{debug, error, info, trace};

use crate::domain::{CVError, HELP_TEXT, Message, ViewConfig};
use crate::highlight::contains_ignore_case;
use crate::inputter::{InputResult, Inputter};
use crate::record::{Customer, Row};
use crate::ui::COLUMN_WIDTH_MARGIN;

pub mod columns;
pub mod views;

pub use columns::{COLUMNS, Column, ColumnId, Comparator};
pub use views::{SortSpec, TableView, ViewState};

#[derive(Debug, PartialEq)]
pub enum Status {
    EMPTY,
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    POPUP,
    CMDINPUT,
}

#[derive(Clone, Debug)]
pub struct ColumnView {
    pub id: ColumnId,
    pub name: String,
    pub width: usize,
    pub sort: Option<SortSpec>,
    pub highlight: bool,
    pub data: Vec<String>,
}

/// Snapshot of everything the UI needs to draw one frame.
pub struct UIData {
    pub name: String,
    pub table: Vec<ColumnView>,
    pub nrows: usize,       // Rows left after filtering
    pub total_rows: usize,  // Rows loaded
    pub selected_row: usize,
    pub selected_column: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub can_previous_page: bool,
    pub can_next_page: bool,
    pub search_text: String,
    pub global_filter: String,
    pub show_popup: bool,
    pub popup_message: String,
    pub cmdinput: InputResult,
    pub active_cmdinput: bool,
    pub status_message: String,
    pub last_update: Instant,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            name: String::new(),
            table: Vec::new(),
            nrows: 0,
            total_rows: 0,
            selected_row: 0,
            selected_column: 0,
            page_index: 0,
            page_count: 0,
            can_previous_page: false,
            can_next_page: false,
            search_text: String::new(),
            global_filter: String::new(),
            show_popup: false,
            popup_message: String::new(),
            cmdinput: InputResult::default(),
            active_cmdinput: false,
            status_message: String::new(),
            last_update: Instant::now(),
        }
    }
}

pub struct Model {
    config: ViewConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    records: Vec<Row>,
    data: Vec<Column>,
    sorters: HashMap<ColumnId, Comparator>,
    table: TableView,
    uidata: UIData,
    clipboard: Option<Clipboard>,
    input: Inputter,
    last_input: InputResult,
    active_cmdinput: bool,
    status_message: String,
}

impl Model {
    pub fn init(config: &ViewConfig) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::EMPTY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            records: Vec::new(),
            data: Vec::new(),
            sorters: columns::comparators(),
            table: TableView::empty(config.page_size),
            uidata: UIData::empty(),
            clipboard: None,
            input: Inputter::default(),
            last_input: InputResult::default(),
            active_cmdinput: false,
            status_message: String::new(),
        };
        model.refresh_rows();
        model.set_status_message("Loading ...");
        model
    }

    /// Loads customers as fetched from the data service, with their
    /// timestamps moved into the local time zone.
    pub fn load_customers(&mut self, customers: Vec<Customer>, name: &str) {
        let rows = customers
            .into_iter()
            .map(|c| Row::localize(c, &Local))
            .collect();
        self.table.name = name.to_string();
        self.load_rows(rows);
    }

    /// Replaces the loaded rows. The view state is kept as is, including the
    /// page index, which may then point past the last page.
    pub fn load_rows(&mut self, rows: Vec<Row>) {
        let start_time = Instant::now();

        // Render every column into strings once, one column per thread.
        self.data = COLUMNS
            .par_iter()
            .map(|&id| Column::load(id, &rows))
            .collect();
        self.records = rows;

        let data_loading_duration = start_time.elapsed().as_millis();
        info!(
            "Loading {} records took {data_loading_duration}ms ...",
            self.records.len()
        );
        for c in self.data.iter() {
            debug!("Column: {}", c.as_string());
        }

        self.status = Status::READY;
        self.refresh_rows();
        self.set_status_message(format!(
            "Loaded {} records in {}ms ...",
            self.records.len(),
            data_loading_duration
        ));
    }

    // -------------------- View state transitions ---------------------- //

    /// Updates the live search text. Rows are not filtered until the search
    /// is committed.
    pub fn set_search(&mut self, text: &str) {
        self.table.state.search_text = text.to_string();
        self.update_table_data();
    }

    /// Filters the rows by the current search text.
    pub fn commit_search(&mut self) {
        let term = self.table.state.search_text.clone();
        trace!("Committing search for \"{}\" ...", term);
        self.table.state.global_filter = term;
        self.table.state.page_index = 0;
        self.refresh_rows();
        if self.table.state.global_filter.is_empty() {
            self.set_status_message(format!("Showing all {} records", self.records.len()));
        } else {
            self.set_status_message(format!(
                "Found {} matching records",
                self.table.rows.len()
            ));
        }
    }

    pub fn set_sort(&mut self, sort_by: Option<SortSpec>) {
        self.table.state.sort_by = sort_by;
        self.table.state.page_index = 0;
        self.refresh_rows();
    }

    /// Sorts `column` ascending, or descending if it already is sorted
    /// ascending.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        let desc = matches!(
            self.table.state.sort_by,
            Some(SortSpec { column: c, desc: false }) if c == column
        );
        self.set_sort(Some(SortSpec { column, desc }));
    }

    pub fn clear_sort(&mut self) {
        self.set_sort(None);
    }

    pub fn goto_page(&mut self, page_index: usize) -> bool {
        let moved = self.table.goto_page(page_index);
        if moved {
            self.update_table_data();
        } else {
            trace!(
                "Ignoring goto page {} of {}",
                page_index,
                self.table.page_count()
            );
        }
        moved
    }

    pub fn first_page(&mut self) -> bool {
        self.goto_page(0)
    }

    pub fn previous_page(&mut self) -> bool {
        self.can_previous_page() && self.goto_page(self.table.state.page_index - 1)
    }

    pub fn next_page(&mut self) -> bool {
        self.can_next_page() && self.goto_page(self.table.state.page_index + 1)
    }

    pub fn last_page(&mut self) -> bool {
        let page_count = self.page_count();
        page_count > 0 && self.goto_page(page_count - 1)
    }

    // -------------------- Queries ---------------------- //

    pub fn view_state(&self) -> &ViewState {
        &self.table.state
    }

    pub fn page_count(&self) -> usize {
        self.table.page_count()
    }

    pub fn can_previous_page(&self) -> bool {
        self.table.can_previous_page()
    }

    pub fn can_next_page(&self) -> bool {
        self.table.can_next_page()
    }

    /// Data indices of all rows passing the filter, in sort order.
    pub fn visible_rows(&self) -> &[usize] {
        &self.table.rows
    }

    /// Data indices of the rows on the current page.
    pub fn page_rows(&self) -> &[usize] {
        self.table.page_rows()
    }

    pub fn record(&self, idx: usize) -> &Row {
        &self.records[idx]
    }

    pub fn cell(&self, idx: usize, column: ColumnId) -> &str {
        self.data
            .iter()
            .find(|c| c.id == column)
            .map(|c| c.data[idx].as_str())
            .unwrap_or_default()
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    pub fn raw_keyevents(&self) -> bool {
        self.active_cmdinput
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    // -------------------- Row pipeline ---------------------- //

    // Return data indices of rows where any column contains the term
    fn filter_rows(columns: &[Column], nrows: usize, term: &str) -> Vec<usize> {
        if term.is_empty() {
            return (0..nrows).collect();
        }
        (0..nrows)
            .into_par_iter()
            .filter(|&ridx| {
                columns
                    .iter()
                    .any(|column| contains_ignore_case(&column.data[ridx], term))
            })
            .collect()
    }

    fn refresh_rows(&mut self) {
        let start_time = Instant::now();
        let state = &self.table.state;
        let mut rows = Self::filter_rows(&self.data, self.records.len(), &state.global_filter);

        if let Some(spec) = state.sort_by {
            if let Some(cmp) = self.sorters.get(&spec.column) {
                let records = &self.records;
                // Stable sort on data order, ties keep data order in both directions
                if spec.desc {
                    rows.sort_by(|&a, &b| cmp(&records[a], &records[b]).reverse());
                } else {
                    rows.sort_by(|&a, &b| cmp(&records[a], &records[b]));
                }
            } else {
                error!("No comparator for column {}!", spec.column.id());
            }
        }

        trace!(
            "Filter \"{}\", sort {:?}: {} of {} rows in {}ms",
            state.global_filter,
            state.sort_by,
            rows.len(),
            self.records.len(),
            start_time.elapsed().as_millis()
        );
        self.table.rows = Arc::new(rows);
        self.table.clamp_curser();
        self.update_table_data();
    }

    fn calculate_column_width(column: &Column, max_column_width: usize) -> usize {
        let width = std::cmp::max(column.name.chars().count(), column.max_width) + COLUMN_WIDTH_MARGIN;
        std::cmp::min(width, max_column_width)
    }

    fn update_table_data(&mut self) {
        let table = &self.table;
        let page_rows = table.page_rows();

        let columns = self
            .data
            .iter()
            .map(|column| ColumnView {
                id: column.id,
                name: column.name.clone(),
                width: Self::calculate_column_width(column, self.config.max_column_width),
                sort: table.state.sort_by.filter(|s| s.column == column.id),
                highlight: column.id.is_highlighted(),
                data: page_rows
                    .iter()
                    .map(|&ridx| column.data[ridx].clone())
                    .collect(),
            })
            .collect();

        self.uidata = UIData {
            name: table.name.clone(),
            table: columns,
            nrows: table.rows.len(),
            total_rows: self.records.len(),
            selected_row: table.curser_row,
            selected_column: table.curser_column,
            page_index: table.state.page_index,
            page_count: table.page_count(),
            can_previous_page: table.can_previous_page(),
            can_next_page: table.can_next_page(),
            search_text: table.state.search_text.clone(),
            global_filter: table.state.global_filter.clone(),
            show_popup: self.modus == Modus::POPUP,
            popup_message: if self.modus == Modus::POPUP {
                HELP_TEXT.to_string()
            } else {
                String::new()
            },
            cmdinput: self.last_input.clone(),
            active_cmdinput: self.active_cmdinput,
            status_message: self.status_message.clone(),
            last_update: Instant::now(),
        };
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.uidata.status_message = self.status_message.clone();
        self.uidata.last_update = Instant::now();
    }

    // -------------------- Control handling functions ---------------------- //

    pub fn update(&mut self, message: Option<Message>) -> Result<(), CVError> {
        if let Some(msg) = message {
            match self.modus {
                Modus::TABLE => match msg {
                    Message::Quit => self.quit(),
                    Message::MoveDown => self.move_table_selection_down(),
                    Message::MoveUp => self.move_table_selection_up(),
                    Message::MoveLeft => self.move_table_selection_left(),
                    Message::MoveRight => self.move_table_selection_right(),
                    Message::NextPage => {
                        self.next_page();
                    }
                    Message::PreviousPage => {
                        self.previous_page();
                    }
                    Message::FirstPage => {
                        self.first_page();
                    }
                    Message::LastPage => {
                        self.last_page();
                    }
                    Message::ToggleSort => self.toggle_sort(COLUMNS[self.table.curser_column]),
                    Message::ClearSort => self.clear_sort(),
                    Message::Search => self.enter_cmd_mode(),
                    Message::CopyCell => self.copy_table_cell(),
                    Message::CopyRow => self.copy_table_row(),
                    Message::Help => self.show_help(),
                    _ => (),
                },
                Modus::POPUP => match msg {
                    Message::Quit => self.quit(),
                    Message::Exit => self.exit(),
                    _ => (),
                },
                Modus::CMDINPUT => {
                    if let Message::RawKey(key) = msg {
                        self.raw_input(key)
                    }
                }
            }
        }
        Ok(())
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.update_table_data();
    }

    fn exit(&mut self) {
        if self.modus == Modus::POPUP {
            self.modus = self.previous_modus;
            self.previous_modus = Modus::POPUP;
            self.update_table_data();
        }
    }

    fn enter_cmd_mode(&mut self) {
        trace!("Entering search input ...");
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;

        self.active_cmdinput = true;
        self.input.clear();
        self.input.set(&self.table.state.search_text);
        self.last_input = self.input.get();
        self.update_table_data();
    }

    fn raw_input(&mut self, key: KeyEvent) {
        if !self.active_cmdinput {
            return;
        }
        self.last_input = self.input.read(key);
        if !self.last_input.canceled {
            let text = self.last_input.input.clone();
            self.set_search(&text);
        }
        if self.last_input.finished {
            self.handle_cmd_input();
        } else {
            self.update_table_data();
        }
    }

    fn handle_cmd_input(&mut self) {
        trace!("Handle search input {}", self.last_input.input);

        self.active_cmdinput = false;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;

        if self.last_input.canceled {
            // Keep the live text, only stop editing
            self.update_table_data();
        } else {
            self.commit_search();
        }
    }

    fn move_table_selection_up(&mut self) {
        if self.table.curser_row > 0 {
            self.table.curser_row -= 1;
            self.update_table_data();
        } else if self.previous_page() {
            // Continue at the bottom of the previous page
            self.table.curser_row = self.table.page_rows().len().saturating_sub(1);
            self.update_table_data();
        }
    }

    fn move_table_selection_down(&mut self) {
        if self.table.curser_row + 1 < self.table.page_rows().len() {
            self.table.curser_row += 1;
            self.update_table_data();
        } else if self.next_page() {
            self.table.curser_row = 0;
            self.update_table_data();
        }
    }

    fn move_table_selection_left(&mut self) {
        self.table.curser_column = self.table.curser_column.saturating_sub(1);
        self.update_table_data();
    }

    fn move_table_selection_right(&mut self) {
        if self.table.curser_column + 1 < COLUMNS.len() {
            self.table.curser_column += 1;
        }
        self.update_table_data();
    }

    fn selected_record(&self) -> Option<usize> {
        self.table.page_rows().get(self.table.curser_row).copied()
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.chars().any(|c| c == '"');
        let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
        let mut out = String::from(c);

        if needs_escaping {
            out = out.replace('"', "\"\"");
        }
        if needs_wrapping || needs_escaping {
            out = format!("\"{out}\"");
        }
        out
    }

    fn copy_to_clipboard(&mut self, content: String) -> Result<(), CVError> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new()?,
        };
        let result = clipboard.set_text(content);
        self.clipboard = Some(clipboard);
        Ok(result?)
    }

    fn copy_table_cell(&mut self) {
        let Some(ridx) = self.selected_record() else {
            return;
        };
        let cell = self.data[self.table.curser_column].data[ridx].clone();
        trace!("Cell content: {}", cell);

        match self.copy_to_clipboard(cell) {
            Ok(_) => self.set_status_message("Copied cell"),
            Err(e) => error!("Error copying to clipboard: {}", e),
        }
    }

    fn copy_table_row(&mut self) {
        let Some(ridx) = self.selected_record() else {
            return;
        };
        let row_content = self
            .data
            .iter()
            .map(|c| Model::wrap_cell_content(&c.data[ridx]))
            .collect::<Vec<String>>()
            .join(",");

        match self.copy_to_clipboard(row_content) {
            Ok(_) => self.set_status_message("Copied row"),
            Err(e) => error!("Error copying to clipboard: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NULL_VALUE;
    use chrono::{NaiveDate, NaiveDateTime};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn row(sno: i32, name: &str, location: &str, created_at: NaiveDateTime) -> Row {
        Row {
            sno,
            customer_name: Some(name.to_string()),
            age: Some(20 + sno),
            phone: Some(format!("555-{sno:04}")),
            location: Some(location.to_string()),
            created_at: Some(created_at),
        }
    }

    fn model_with(rows: Vec<Row>) -> Model {
        let mut model = Model::init(&ViewConfig::default());
        model.load_rows(rows);
        model
    }

    fn numbered(n: i32) -> Vec<Row> {
        (1..=n)
            .map(|i| row(i, &format!("Customer {i}"), "Delhi", at(2023, 1, 1, 12, 0)))
            .collect()
    }

    fn snos(model: &Model, rows: &[usize]) -> Vec<i32> {
        rows.iter().map(|&r| model.record(r).sno).collect()
    }

    fn key(code: KeyCode) -> Option<Message> {
        Some(Message::RawKey(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn committed_search_excludes_non_matching_rows() {
        let mut model = model_with(vec![
            row(1, "Asha Rao", "Pune", at(2023, 1, 1, 9, 0)),
            row(2, "Vikram", "Mumbai", at(2023, 1, 2, 9, 0)),
            row(3, "Meera", "Navi Mumbai", at(2023, 1, 3, 9, 0)),
        ]);
        model.set_search("MUMBAI");
        assert_eq!(model.visible_rows().len(), 3);

        model.commit_search();
        assert_eq!(snos(&model, model.visible_rows()), vec![2, 3]);
        for &ridx in model.visible_rows() {
            assert!(COLUMNS.iter().any(|&c| contains_ignore_case(model.cell(ridx, c), "mumbai")));
        }
    }

    #[test]
    fn search_matches_any_column() {
        let mut model = model_with(numbered(3));
        model.set_search("555-0002");
        model.commit_search();
        assert_eq!(snos(&model, model.visible_rows()), vec![2]);
    }

    #[test]
    fn null_cells_match_their_placeholder_only() {
        let mut rows = numbered(3);
        rows[1].location = None;
        let mut model = model_with(rows);

        model.set_search(NULL_VALUE);
        model.commit_search();
        assert_eq!(snos(&model, model.visible_rows()), vec![2]);

        model.set_search("null");
        model.commit_search();
        assert!(model.visible_rows().is_empty());
    }

    #[test]
    fn empty_search_shows_everything() {
        let mut model = model_with(numbered(5));
        model.set_search("Customer 3");
        model.commit_search();
        assert_eq!(model.visible_rows().len(), 1);
        model.set_search("");
        model.commit_search();
        assert_eq!(model.visible_rows().len(), 5);
    }

    #[test]
    fn highlight_follows_live_text_not_filter() {
        let mut model = model_with(numbered(3));
        model.set_search("Customer 1");
        model.commit_search();
        model.set_search("Delhi");
        let ui = model.get_uidata();
        assert_eq!(ui.search_text, "Delhi");
        assert_eq!(ui.global_filter, "Customer 1");
        assert_eq!(ui.nrows, 1);
    }

    #[test]
    fn sort_by_name_is_lexicographic_and_stable() {
        let mut model = model_with(vec![
            row(1, "Bala", "Goa", at(2023, 1, 1, 9, 0)),
            row(2, "Anil", "Goa", at(2023, 1, 1, 9, 0)),
            row(3, "Bala", "Agra", at(2023, 1, 1, 9, 0)),
            row(4, "Anil", "Agra", at(2023, 1, 1, 9, 0)),
        ]);
        model.toggle_sort(ColumnId::CustomerName);
        assert_eq!(snos(&model, model.visible_rows()), vec![2, 4, 1, 3]);

        model.toggle_sort(ColumnId::CustomerName);
        assert_eq!(model.view_state().sort_by, Some(SortSpec { column: ColumnId::CustomerName, desc: true }));
        assert_eq!(snos(&model, model.visible_rows()), vec![1, 3, 2, 4]);

        model.toggle_sort(ColumnId::Location);
        assert_eq!(snos(&model, model.visible_rows()), vec![3, 4, 1, 2]);
    }

    #[test]
    fn sort_by_date_orders_same_day_by_time() {
        let mut model = model_with(vec![
            row(1, "a", "x", at(2023, 5, 2, 8, 0)),
            row(2, "b", "x", at(2023, 5, 1, 23, 59)),
            row(3, "c", "x", at(2023, 5, 2, 1, 0)),
            row(4, "d", "x", at(2022, 12, 31, 12, 0)),
        ]);
        model.toggle_sort(ColumnId::Date);
        assert_eq!(snos(&model, model.visible_rows()), vec![4, 2, 3, 1]);
    }

    #[test]
    fn same_day_evening_sorts_after_morning() {
        let mut model = model_with(vec![
            row(1, "a", "x", at(2023, 3, 4, 22, 0)),
            row(2, "b", "x", at(2023, 3, 4, 6, 0)),
        ]);
        model.toggle_sort(ColumnId::Date);
        assert_eq!(snos(&model, model.visible_rows()), vec![2, 1]);
        model.toggle_sort(ColumnId::Date);
        assert_eq!(snos(&model, model.visible_rows()), vec![1, 2]);
    }

    #[test]
    fn sort_by_time_uses_hours_and_minutes() {
        let mut model = model_with(vec![
            row(1, "a", "x", at(2023, 5, 2, 2, 0)),
            row(2, "b", "x", at(2020, 1, 1, 1, 59)),
            row(3, "c", "x", at(2021, 1, 1, 13, 5)),
        ]);
        model.toggle_sort(ColumnId::Time);
        assert_eq!(snos(&model, model.visible_rows()), vec![2, 1, 3]);
        model.toggle_sort(ColumnId::Time);
        assert_eq!(snos(&model, model.visible_rows()), vec![3, 1, 2]);
    }

    #[test]
    fn clear_sort_restores_data_order() {
        let mut model = model_with(numbered(4));
        model.toggle_sort(ColumnId::Sno);
        model.toggle_sort(ColumnId::Sno);
        assert_eq!(snos(&model, model.visible_rows()), vec![4, 3, 2, 1]);
        model.clear_sort();
        assert_eq!(snos(&model, model.visible_rows()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn pagination_over_forty_five_records() {
        let mut model = model_with(numbered(45));
        assert_eq!(model.page_count(), 3);
        assert!(!model.can_previous_page());
        assert!(!model.previous_page());

        assert!(model.next_page());
        assert!(model.next_page());
        assert_eq!(model.view_state().page_index, 2);
        assert_eq!(model.page_rows().len(), 5);
        assert!(!model.can_next_page());
        assert!(!model.next_page());

        let ui = model.get_uidata();
        assert_eq!(ui.page_count, 3);
        assert_eq!(ui.table[0].data, vec!["41", "42", "43", "44", "45"]);

        assert!(model.first_page());
        assert_eq!(snos(&model, model.page_rows()).len(), 20);
        assert!(model.last_page());
        assert_eq!(model.view_state().page_index, 2);
    }

    #[test]
    fn committing_search_resets_page() {
        let mut model = model_with(numbered(45));
        model.last_page();
        model.set_search("Customer 4");
        model.commit_search();
        assert_eq!(model.view_state().page_index, 0);
        // "Customer 4" and "Customer 40" to "Customer 45"
        assert_eq!(model.visible_rows().len(), 7);
        assert_eq!(model.page_count(), 1);
    }

    #[test]
    fn reload_keeps_page_index() {
        let mut model = model_with(numbered(45));
        model.last_page();
        model.load_rows(numbered(10));
        assert_eq!(model.view_state().page_index, 2);
        assert!(model.page_rows().is_empty());
        assert!(model.can_previous_page());
        assert!(model.first_page());
        assert_eq!(model.page_rows().len(), 10);
    }

    #[test]
    fn empty_data_has_no_pages() {
        let model = model_with(Vec::new());
        let ui = model.get_uidata();
        assert_eq!(ui.page_count, 0);
        assert!(ui.table.iter().all(|c| c.data.is_empty()));
        assert!(!ui.can_next_page);
        assert!(!ui.can_previous_page);
    }

    #[test]
    fn typing_updates_live_text_and_enter_commits() {
        let mut model = model_with(numbered(12));
        model.update(Some(Message::Search)).unwrap();
        assert!(model.raw_keyevents());

        model.update(key(KeyCode::Char('1'))).unwrap();
        model.update(key(KeyCode::Char('1'))).unwrap();
        assert_eq!(model.view_state().search_text, "11");
        assert_eq!(model.view_state().global_filter, "");

        model.update(key(KeyCode::Enter)).unwrap();
        assert!(!model.raw_keyevents());
        assert_eq!(model.view_state().global_filter, "11");
        assert_eq!(snos(&model, model.visible_rows()), vec![11]);
    }

    #[test]
    fn escape_stops_editing_without_committing() {
        let mut model = model_with(numbered(3));
        model.update(Some(Message::Search)).unwrap();
        model.update(key(KeyCode::Char('x'))).unwrap();
        model.update(key(KeyCode::Esc)).unwrap();
        assert!(!model.raw_keyevents());
        assert_eq!(model.view_state().search_text, "x");
        assert_eq!(model.view_state().global_filter, "");
        assert_eq!(model.visible_rows().len(), 3);
    }

    #[test]
    fn toggle_sort_message_uses_selected_column() {
        let mut model = model_with(numbered(3));
        model.update(Some(Message::MoveRight)).unwrap();
        model.update(Some(Message::MoveRight)).unwrap();
        model.update(Some(Message::ToggleSort)).unwrap();
        assert_eq!(
            model.view_state().sort_by,
            Some(SortSpec { column: ColumnId::Age, desc: false })
        );
    }

    #[test]
    fn moving_down_past_page_end_turns_page() {
        let mut model = model_with(numbered(25));
        for _ in 0..20 {
            model.update(Some(Message::MoveDown)).unwrap();
        }
        assert_eq!(model.view_state().page_index, 1);
        assert_eq!(model.get_uidata().selected_row, 0);
        model.update(Some(Message::MoveUp)).unwrap();
        assert_eq!(model.view_state().page_index, 0);
        assert_eq!(model.get_uidata().selected_row, 19);
    }

    #[test]
    fn help_popup_opens_and_closes() {
        let mut model = model_with(numbered(1));
        model.update(Some(Message::Help)).unwrap();
        assert!(model.get_uidata().show_popup);
        model.update(Some(Message::Exit)).unwrap();
        assert!(!model.get_uidata().show_popup);
        model.update(Some(Message::Quit)).unwrap();
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn csv_cells_are_quoted() {
        assert_eq!(Model::wrap_cell_content("Pune"), "Pune");
        assert_eq!(Model::wrap_cell_content("New Delhi"), "\"New Delhi\"");
        assert_eq!(Model::wrap_cell_content("a\"b"), "\"a\"\"b\"");
    }
}
