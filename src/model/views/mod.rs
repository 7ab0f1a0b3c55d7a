mod table_view;

pub use table_view::{SortSpec, TableView, ViewState};
