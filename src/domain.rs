use std::io::Error;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;

use crate::pipeline::MatchMode;
use crate::product::ColumnKey;

pub const DEFAULT_SOURCE: &str = "https://dummyjson.com/products";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

pub const HELP_TEXT: &str = "\
 /, Ctrl+/   focus search          Esc   clear search / close
 f           filter menu           X     clear all filters
 c           column menu           H / A hide / show all columns
 s           sort current column   S     sort descending
 Left/Right  select column         Up/Down select row
 n / p       next / previous page  g / G first / last page
 v           show detail           e     edit
 d           delete row            ?     this help
 q           quit";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("io error: {0}")]
    IoError(#[from] Error),
    #[error("polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("invalid json: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("loading failed: {0}")]
    LoadingFailed(String),
    #[error("file not found")]
    FileNotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("unknown file type")]
    UnknownFileType,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct TableConfig {
    pub event_poll_time: u64,
    pub items_per_page: usize,
    pub match_mode: MatchMode,
    pub tri_state_sort: bool,
    pub max_column_width: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            match_mode: MatchMode::Exact,
            tri_state_sort: false,
            max_column_width: 40,
        }
    }
}

/// Which line input is currently active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CMDMode {
    Search,
    FilterValue(ColumnKey),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    FocusSearch,
    ClearSearch,
    SortCurrentColumn,
    SortCurrentColumnDescending,
    FilterMenu,
    ClearFilters,
    ColumnMenu,
    HideAllColumns,
    ShowAllColumns,
    ShowDetail,
    Edit,
    Delete,
    Enter,
    Exit,
    Confirm,
    Reject,
    Help,
    RawKey(KeyEvent),
}
