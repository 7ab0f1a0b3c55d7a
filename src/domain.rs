use std::fmt;
use std::io::Error;

use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 32;
pub const NULL_VALUE: &str = "∅";

pub const HELP_TEXT: &str = "\
custview - browse customers

  /            edit search, <Enter> applies it, <Esc> stops editing
  s            toggle sort on the selected column
  x            clear sort
  n, PageDown  next page
  p, PageUp    previous page
  g, Home      first page
  G, End       last page
  arrows, hjkl move the cursor
  c            copy cell
  y            copy row (csv)
  ?            this help
  Esc          close popup
  q            quit
";

/// Error type shared by the data service and the table view.
#[derive(Debug)]
pub enum CVError {
    IoError(Error),
    HttpError(reqwest::Error),
    DatabaseError(sqlx::Error),
    ClipboardError(arboard::Error),
}

impl fmt::Display for CVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CVError::IoError(e) => write!(f, "io error: {e}"),
            CVError::HttpError(e) => write!(f, "fetching data failed: {e}"),
            CVError::DatabaseError(e) => write!(f, "database query failed: {e}"),
            CVError::ClipboardError(e) => write!(f, "clipboard error: {e}"),
        }
    }
}

impl std::error::Error for CVError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CVError::IoError(e) => Some(e),
            CVError::HttpError(e) => Some(e),
            CVError::DatabaseError(e) => Some(e),
            CVError::ClipboardError(e) => Some(e),
        }
    }
}

impl From<Error> for CVError {
    fn from(err: Error) -> Self {
        CVError::IoError(err)
    }
}

impl From<reqwest::Error> for CVError {
    fn from(err: reqwest::Error) -> Self {
        CVError::HttpError(err)
    }
}

impl From<sqlx::Error> for CVError {
    fn from(err: sqlx::Error) -> Self {
        CVError::DatabaseError(err)
    }
}

impl From<arboard::Error> for CVError {
    fn from(err: arboard::Error) -> Self {
        CVError::ClipboardError(err)
    }
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct ViewConfig {
    pub event_poll_time: u64,
    pub page_size: usize,
    pub max_column_width: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            page_size: DEFAULT_PAGE_SIZE,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    ToggleSort,
    ClearSort,
    Search,
    CopyCell,
    CopyRow,
    Help,
    Exit,
    RawKey(KeyEvent),
}
