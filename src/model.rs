use std::collections::BTreeMap;
use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, trace};

use crate::actions::{self, ActionHandler, RowAction};
use crate::columns::ColumnVisibility;
use crate::domain::{CMDMode, HELP_TEXT, Message, TableConfig, TableError};
use crate::inputter::{InputResult, Inputter};
use crate::pipeline::{self, Direction, FilterSet, Pagination, PipelineInput, SortSpec};
use crate::product::{COLUMNS, ColumnDescriptor, ColumnKey, Product};
use crate::store::{FetchState, RowStore};

#[derive(Debug, PartialEq)]
pub enum Status {
    LOADING,
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modus {
    TABLE,
    POPUP,
    CMDINPUT,
    COLUMNS,
    FILTERS,
    FILTERVALUES(ColumnKey),
    CONFIRM,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

/// Dialogs opened by a row action. A delete is only confirmed through
/// `answer`; without one the confirmation popup is requested instead.
struct Dialogs {
    popup: Option<Popup>,
    confirm_requested: bool,
    answer: Option<bool>,
}

impl Dialogs {
    fn new(answer: Option<bool>) -> Self {
        Self {
            popup: None,
            confirm_requested: false,
            answer,
        }
    }
}

impl ActionHandler for Dialogs {
    fn show_detail(&mut self, row: &Product) {
        let message =
            serde_json::to_string_pretty(row).unwrap_or_else(|_| format!("{row:?}"));
        self.popup = Some(Popup {
            title: format!(" Detail: {} ", row.label()),
            message,
        });
    }

    fn edit(&mut self, row: &Product) {
        self.popup = Some(Popup {
            title: " Edit ".to_string(),
            message: format!("Edit: go to the edit page of {}", row.label()),
        });
    }

    fn confirm_delete(&mut self, row: &Product) -> bool {
        match self.answer {
            Some(answer) => answer,
            None => {
                self.confirm_requested = true;
                self.popup = Some(Popup {
                    title: " Delete ".to_string(),
                    message: format!("Delete {}? [y/n]", row.label()),
                });
                false
            }
        }
    }
}

/// State of one table view. Every input change re-runs the row pipeline
/// before the next draw.
pub struct Model {
    config: TableConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    store: RowStore,
    unique_values: BTreeMap<ColumnKey, Vec<String>>,
    pipeline_input: PipelineInput,
    visibility: ColumnVisibility,
    page_rows: Vec<Product>,
    total: usize,
    page_count: usize,
    cursor_row: usize,
    cursor_column: usize,
    menu_cursor: usize,
    popup: Option<Popup>,
    pending_delete: Option<Product>,
    input: Inputter,
    cmd_mode: Option<CMDMode>,
    last_input: InputResult,
    status_message: String,
}

impl Model {
    pub fn init(config: &TableConfig, store: RowStore) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::LOADING,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            store,
            unique_values: BTreeMap::new(),
            pipeline_input: PipelineInput {
                filters: FilterSet::new(config.match_mode),
                pagination: Pagination::new(config.items_per_page),
                ..PipelineInput::default()
            },
            visibility: ColumnVisibility::new(&COLUMNS),
            page_rows: Vec::new(),
            total: 0,
            page_count: 0,
            cursor_row: 0,
            cursor_column: 0,
            menu_cursor: 0,
            popup: None,
            pending_delete: None,
            input: Inputter::default(),
            cmd_mode: None,
            last_input: InputResult::default(),
            status_message: "Loading ...".to_string(),
        };
        model.poll_store();
        model
    }

    fn poll_store(&mut self) {
        if !self.store.poll() && self.status != Status::LOADING {
            return;
        }
        match self.store.state().clone() {
            FetchState::Loading => return,
            FetchState::Ready => {
                self.unique_values = pipeline::unique_values(self.store.rows());
                let loaded = self.store.rows().len();
                self.set_status_message(format!("Loaded {loaded} products"));
            }
            FetchState::Failed(e) => self.set_status_message(format!("Loading failed: {e}")),
        }
        self.status = Status::READY;
        self.recompute();
    }

    /// Run the pipeline over the row store and refresh the visible page.
    fn recompute(&mut self) {
        let start_time = Instant::now();
        let processed = pipeline::process(self.store.rows(), &self.pipeline_input);
        self.pipeline_input.pagination.clamp(processed.total());
        self.total = processed.total();
        self.page_count = processed.page_count;
        self.page_rows = processed
            .page(&self.pipeline_input.pagination)
            .iter()
            .map(|&row| row.clone())
            .collect();
        self.cursor_row = self.cursor_row.min(self.page_rows.len().saturating_sub(1));
        trace!(
            "Recomputed {} rows, page {}/{}, in {}us",
            self.total,
            self.pipeline_input.pagination.page(),
            self.page_count,
            start_time.elapsed().as_micros()
        );
    }

    /// A pipeline input other than the page changed.
    fn input_changed(&mut self) {
        self.pipeline_input.pagination.reset();
        self.cursor_row = 0;
        self.recompute();
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    // -------------------- Accessors for rendering ---------------------- //

    pub fn modus(&self) -> Modus {
        self.modus
    }

    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::CMDINPUT
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.modus == Modus::CONFIRM
    }

    pub fn in_table(&self) -> bool {
        self.modus == Modus::TABLE
    }

    pub fn page_rows(&self) -> &[Product] {
        &self.page_rows
    }

    pub fn visible_columns(&self) -> Vec<ColumnDescriptor> {
        self.visibility.visible()
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn query(&self) -> &str {
        &self.pipeline_input.query
    }

    pub fn filters(&self) -> &FilterSet {
        &self.pipeline_input.filters
    }

    pub fn sort(&self) -> SortSpec {
        self.pipeline_input.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.pipeline_input.pagination
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_column)
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn cmd_mode(&self) -> Option<CMDMode> {
        self.cmd_mode
    }

    pub fn cmd_input(&self) -> &InputResult {
        &self.last_input
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::LOADING
    }

    /// Options of the filter value menu, "None" first.
    pub fn filter_options(&self, key: ColumnKey) -> Vec<String> {
        let mut options = vec![String::new()];
        if let Some(values) = self.unique_values.get(&key) {
            options.extend(values.iter().cloned());
        }
        options
    }

    fn current_column(&self) -> Option<ColumnKey> {
        self.visibility
            .visible()
            .get(self.cursor_column)
            .map(|c| c.key)
    }

    // -------------------- Message handling ---------------------- //

    pub fn update(&mut self, message: Option<Message>) -> Result<(), TableError> {
        self.poll_store();

        let Some(msg) = message else {
            return Ok(());
        };
        trace!("Update: Modus {:?}, Message {:?}", self.modus, msg);
        if msg == Message::Quit && self.modus != Modus::CMDINPUT {
            self.quit();
            return Ok(());
        }
        match self.modus {
            Modus::TABLE => match msg {
                Message::MoveUp => self.cursor_row = self.cursor_row.saturating_sub(1),
                Message::MoveDown => {
                    if self.cursor_row + 1 < self.page_rows.len() {
                        self.cursor_row += 1;
                    }
                }
                Message::MoveLeft => self.cursor_column = self.cursor_column.saturating_sub(1),
                Message::MoveRight => {
                    if self.cursor_column + 1 < self.visibility.visible().len() {
                        self.cursor_column += 1;
                    }
                }
                Message::NextPage => self.navigate(Pagination::next),
                Message::PrevPage => self.navigate(Pagination::prev),
                Message::FirstPage => self.navigate(|p, total| p.set_page(1, total)),
                Message::LastPage => self.navigate(Pagination::last),
                Message::FocusSearch => self.enter_cmd_mode(CMDMode::Search),
                Message::ClearSearch => self.set_query(""),
                Message::SortCurrentColumn => {
                    if let Some(key) = self.current_column() {
                        self.toggle_sort(key);
                    }
                }
                Message::SortCurrentColumnDescending => {
                    if let Some(key) = self.current_column() {
                        self.set_sort(SortSpec::new(key, Direction::Descending));
                    }
                }
                Message::FilterMenu => self.open_menu(Modus::FILTERS),
                Message::ColumnMenu => self.open_menu(Modus::COLUMNS),
                Message::ClearFilters => self.clear_filters(),
                Message::HideAllColumns => self.hide_all_columns(),
                Message::ShowAllColumns => self.show_all_columns(),
                Message::ShowDetail | Message::Enter => self.run_action(RowAction::Detail),
                Message::Edit => self.run_action(RowAction::Edit),
                Message::Delete => self.run_action(RowAction::Delete),
                Message::Help => self.show_popup(" Help ", HELP_TEXT),
                _ => (),
            },
            Modus::COLUMNS => match msg {
                Message::MoveUp => self.menu_up(),
                Message::MoveDown => self.menu_down(COLUMNS.len()),
                Message::Enter => {
                    if let Some(column) = COLUMNS.get(self.menu_cursor) {
                        self.toggle_column(column.key);
                    }
                }
                Message::HideAllColumns => self.hide_all_columns(),
                Message::ShowAllColumns => self.show_all_columns(),
                Message::Exit | Message::ColumnMenu => self.modus = Modus::TABLE,
                _ => (),
            },
            Modus::FILTERS => match msg {
                Message::MoveUp => self.menu_up(),
                Message::MoveDown => self.menu_down(COLUMNS.len()),
                Message::Enter => {
                    if let Some(column) = COLUMNS.get(self.menu_cursor) {
                        let current = self.filters().get(column.key).unwrap_or("").to_string();
                        let options = self.filter_options(column.key);
                        self.modus = Modus::FILTERVALUES(column.key);
                        self.menu_cursor = options.iter().position(|o| *o == current).unwrap_or(0);
                    }
                }
                Message::ClearFilters => self.clear_filters(),
                Message::Exit | Message::FilterMenu => self.modus = Modus::TABLE,
                _ => (),
            },
            Modus::FILTERVALUES(key) => match msg {
                Message::MoveUp => self.menu_up(),
                Message::MoveDown => self.menu_down(self.filter_options(key).len()),
                Message::Enter => {
                    let value = self
                        .filter_options(key)
                        .get(self.menu_cursor)
                        .cloned()
                        .unwrap_or_default();
                    self.set_filter(key, &value);
                    self.back_to_filter_menu(key);
                }
                Message::FocusSearch => self.enter_cmd_mode(CMDMode::FilterValue(key)),
                Message::Exit => self.back_to_filter_menu(key),
                _ => (),
            },
            Modus::POPUP => match msg {
                Message::Exit | Message::Enter | Message::Help => self.close_popup(),
                _ => (),
            },
            Modus::CONFIRM => match msg {
                Message::Confirm => self.answer_delete(true),
                Message::Reject | Message::Exit => self.answer_delete(false),
                _ => (),
            },
            Modus::CMDINPUT => {
                if let Message::RawKey(key) = msg {
                    self.raw_input(key);
                }
            }
        }
        Ok(())
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    // -------------------- Pipeline inputs ---------------------- //

    pub fn set_query(&mut self, query: &str) {
        if self.pipeline_input.query == query {
            return;
        }
        debug!("Search for \"{query}\"");
        self.pipeline_input.query = query.to_string();
        self.input_changed();
    }

    pub fn set_filter(&mut self, key: ColumnKey, value: &str) {
        debug!("Filter {key} = \"{value}\"");
        self.pipeline_input.filters.set(key, value);
        self.input_changed();
    }

    pub fn clear_filters(&mut self) {
        self.pipeline_input.filters.clear();
        self.set_status_message("Cleared all filters");
        self.input_changed();
    }

    pub fn toggle_sort(&mut self, key: ColumnKey) {
        let mut sort = self.pipeline_input.sort;
        sort.toggle(key, self.config.tri_state_sort);
        self.set_sort(sort);
    }

    fn set_sort(&mut self, sort: SortSpec) {
        debug!("Sort {:?}", sort);
        self.pipeline_input.sort = sort;
        self.input_changed();
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Pagination, usize)) {
        step(&mut self.pipeline_input.pagination, self.total);
        self.cursor_row = 0;
        self.recompute();
    }

    pub fn toggle_column(&mut self, key: ColumnKey) {
        self.visibility.toggle(key);
        self.clamp_cursor_column();
    }

    fn hide_all_columns(&mut self) {
        self.visibility.hide_all();
        self.clamp_cursor_column();
    }

    fn show_all_columns(&mut self) {
        self.visibility.show_all();
    }

    fn clamp_cursor_column(&mut self) {
        let visible = self.visibility.visible().len();
        self.cursor_column = self.cursor_column.min(visible.saturating_sub(1));
    }

    // -------------------- Row actions ---------------------- //

    fn run_action(&mut self, action: RowAction) {
        let Some(row) = self.page_rows.get(self.cursor_row).cloned() else {
            return;
        };
        let mut dialogs = Dialogs::new(None);
        actions::dispatch(
            action,
            &row,
            &mut dialogs,
            &mut self.pipeline_input.deleted,
        );
        if dialogs.confirm_requested {
            self.pending_delete = Some(row);
        }
        if let Some(popup) = dialogs.popup {
            self.previous_modus = self.modus;
            self.modus = if dialogs.confirm_requested {
                Modus::CONFIRM
            } else {
                Modus::POPUP
            };
            self.popup = Some(popup);
        }
    }

    fn answer_delete(&mut self, answer: bool) {
        self.close_popup();
        let Some(row) = self.pending_delete.take() else {
            return;
        };
        let mut dialogs = Dialogs::new(Some(answer));
        let before = self.pipeline_input.deleted.len();
        actions::dispatch(
            RowAction::Delete,
            &row,
            &mut dialogs,
            &mut self.pipeline_input.deleted,
        );
        if self.pipeline_input.deleted.len() != before {
            info!("Removed {} from the table", row.label());
            self.set_status_message(format!("Deleted {}", row.label()));
            self.input_changed();
        } else {
            self.set_status_message(format!("Kept {}", row.label()));
        }
    }

    // -------------------- Modes ---------------------- //

    fn show_popup(&mut self, title: &str, message: &str) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.popup = Some(Popup {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.popup = None;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::TABLE;
    }

    fn open_menu(&mut self, modus: Modus) {
        self.modus = modus;
        self.menu_cursor = 0;
    }

    fn back_to_filter_menu(&mut self, key: ColumnKey) {
        self.modus = Modus::FILTERS;
        self.menu_cursor = COLUMNS.iter().position(|c| c.key == key).unwrap_or(0);
    }

    fn menu_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    fn menu_down(&mut self, len: usize) {
        if self.menu_cursor + 1 < len {
            self.menu_cursor += 1;
        }
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        trace!("Entering command mode {:?} ...", mode);
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.cmd_mode = Some(mode);
        match mode {
            CMDMode::Search => self.input.set(&self.pipeline_input.query),
            CMDMode::FilterValue(key) => {
                let current = self.pipeline_input.filters.get(key).unwrap_or("");
                self.input.set(current);
            }
        }
        self.last_input = self.input.get();
    }

    fn leave_cmd_mode(&mut self) {
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;
        self.cmd_mode = None;
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        let result = self.last_input.clone();
        match self.cmd_mode {
            Some(CMDMode::Search) => {
                // The search follows every keystroke, Esc clears it.
                if result.changed {
                    self.set_query(&result.input);
                }
                if result.finished {
                    self.leave_cmd_mode();
                }
            }
            Some(CMDMode::FilterValue(key)) => {
                if result.finished {
                    self.leave_cmd_mode();
                    if !result.canceled {
                        self.set_filter(key, &result.input);
                    }
                    self.back_to_filter_menu(key);
                }
            }
            None => self.leave_cmd_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MatchMode;
    use crate::product::tests::product;
    use pretty_assertions::assert_eq;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn rows() -> Vec<Product> {
        (1..=12)
            .map(|id| {
                let mut p = product(id, &format!("item {id}"), id as f64 * 100.0);
                p.brand = Some(if id <= 6 { "Apple" } else { "Samsung" }.to_string());
                p
            })
            .collect()
    }

    fn model() -> Model {
        Model::init(&TableConfig::default(), RowStore::from_rows(rows()))
    }

    fn send(model: &mut Model, messages: &[Message]) {
        for msg in messages {
            model.update(Some(msg.clone())).unwrap();
        }
    }

    fn page_ids(model: &Model) -> Vec<u64> {
        model.page_rows().iter().map(|r| r.id).collect()
    }

    fn type_keys(model: &mut Model, text: &str) {
        for chr in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(chr), KeyModifiers::NONE);
            send(model, &[Message::RawKey(key)]);
        }
    }

    #[test]
    fn first_page_after_load() {
        let model = model();
        assert_eq!(model.status, Status::READY);
        assert_eq!(model.total(), 12);
        assert_eq!(model.page_count(), 2);
        assert_eq!(page_ids(&model), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn page_navigation() {
        let mut model = model();
        send(&mut model, &[Message::NextPage]);
        assert_eq!(page_ids(&model), vec![11, 12]);
        send(&mut model, &[Message::NextPage]);
        assert_eq!(model.pagination().page(), 2);
        send(&mut model, &[Message::FirstPage]);
        assert_eq!(model.pagination().page(), 1);
        send(&mut model, &[Message::LastPage, Message::PrevPage]);
        assert_eq!(model.pagination().page(), 1);
    }

    #[test]
    fn input_changes_reset_the_page() {
        let mut model = model();
        send(&mut model, &[Message::NextPage]);
        model.toggle_sort(ColumnKey::Price);
        assert_eq!(model.pagination().page(), 1);

        send(&mut model, &[Message::NextPage]);
        model.set_filter(ColumnKey::Brand, "samsung");
        assert_eq!(model.pagination().page(), 1);
        assert_eq!(page_ids(&model), vec![7, 8, 9, 10, 11, 12]);

        model.set_filter(ColumnKey::Brand, "");
        send(&mut model, &[Message::NextPage]);
        model.set_query("item");
        assert_eq!(model.pagination().page(), 1);
    }

    #[test]
    fn live_search_and_escape() {
        let mut model = model();
        send(&mut model, &[Message::FocusSearch]);
        assert!(model.raw_keyevents());
        type_keys(&mut model, "item 1");
        assert_eq!(model.query(), "item 1");
        assert_eq!(page_ids(&model), vec![1, 10, 11, 12]);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        send(&mut model, &[Message::RawKey(esc)]);
        assert_eq!(model.query(), "");
        assert!(model.in_table());
        assert_eq!(model.total(), 12);

        model.set_query("item 2");
        send(&mut model, &[Message::ClearSearch]);
        assert_eq!(model.total(), 12);
    }

    #[test]
    fn sort_current_column_twice_reverses() {
        let mut model = model();
        send(&mut model, &[Message::MoveRight, Message::MoveRight]);
        assert_eq!(model.current_column(), Some(ColumnKey::Price));
        send(&mut model, &[Message::SortCurrentColumn]);
        assert_eq!(page_ids(&model), (1..=10).collect::<Vec<_>>());
        send(&mut model, &[Message::SortCurrentColumn]);
        assert_eq!(page_ids(&model), (3..=12).rev().collect::<Vec<_>>());
    }

    #[test]
    fn delete_with_confirmation() {
        let mut model = model();
        send(
            &mut model,
            &[
                Message::MoveDown,
                Message::MoveDown,
                Message::MoveDown,
                Message::MoveDown,
            ],
        );
        send(&mut model, &[Message::Delete]);
        assert_eq!(model.modus(), Modus::CONFIRM);
        send(&mut model, &[Message::Reject]);
        assert_eq!(model.total(), 12);
        assert!(model.in_table());

        send(&mut model, &[Message::Delete, Message::Confirm]);
        assert_eq!(model.total(), 11);
        assert!(!page_ids(&model).contains(&5));

        model.set_filter(ColumnKey::Brand, "Apple");
        assert_eq!(page_ids(&model), vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn deleting_resets_the_page() {
        let rows = (1..=25).map(|id| product(id, &format!("item {id}"), 1.0)).collect();
        let mut model = Model::init(&TableConfig::default(), RowStore::from_rows(rows));
        send(&mut model, &[Message::NextPage, Message::Delete, Message::Confirm]);
        assert_eq!(model.total(), 24);
        assert_eq!(model.page_count(), 3);
        assert_eq!(model.pagination().page(), 1);
        assert_eq!(page_ids(&model), (1..=10).collect::<Vec<_>>());

        // A rejected delete changes nothing and keeps the page.
        send(&mut model, &[Message::NextPage, Message::Delete, Message::Reject]);
        assert_eq!(model.total(), 24);
        assert_eq!(model.pagination().page(), 2);
    }

    #[test]
    fn detail_and_help_popups() {
        let mut model = model();
        send(&mut model, &[Message::ShowDetail]);
        assert_eq!(model.modus(), Modus::POPUP);
        assert!(
            model
                .popup()
                .is_some_and(|p| p.message.contains("\"title\": \"item 1\""))
        );
        send(&mut model, &[Message::Exit]);
        assert!(model.in_table());
        assert!(model.popup().is_none());

        send(&mut model, &[Message::Help]);
        assert!(model.popup().is_some_and(|p| p.message == HELP_TEXT));
    }

    #[test]
    fn filter_menu_picks_unique_value() {
        let mut model = model();
        let brand = COLUMNS.iter().position(|c| c.key == ColumnKey::Brand).unwrap();
        send(&mut model, &[Message::FilterMenu]);
        for _ in 0..brand {
            send(&mut model, &[Message::MoveDown]);
        }
        send(&mut model, &[Message::Enter]);
        assert_eq!(model.modus(), Modus::FILTERVALUES(ColumnKey::Brand));
        assert_eq!(
            model.filter_options(ColumnKey::Brand),
            vec!["", "Apple", "Samsung"]
        );

        send(&mut model, &[Message::MoveDown, Message::MoveDown, Message::Enter]);
        assert_eq!(model.filters().get(ColumnKey::Brand), Some("Samsung"));
        assert_eq!(model.modus(), Modus::FILTERS);
        assert_eq!(model.total(), 6);
        // The options of other columns do not narrow.
        assert_eq!(model.filter_options(ColumnKey::Title).len(), 13);

        send(&mut model, &[Message::ClearFilters, Message::Exit]);
        assert_eq!(model.total(), 12);
        assert!(model.in_table());
    }

    #[test]
    fn typed_substring_filter() {
        let config = TableConfig::default().with_match_mode(MatchMode::Substring);
        let mut model = Model::init(&config, RowStore::from_rows(rows()));
        model.open_menu(Modus::FILTERVALUES(ColumnKey::Title));
        send(&mut model, &[Message::FocusSearch]);
        type_keys(&mut model, "item 1");
        assert_eq!(model.total(), 12);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        send(&mut model, &[Message::RawKey(enter)]);
        assert_eq!(model.total(), 4);
        assert_eq!(model.modus(), Modus::FILTERS);
    }

    #[test]
    fn column_menu_toggles_visibility() {
        let mut model = model();
        send(&mut model, &[Message::ColumnMenu, Message::Enter]);
        assert!(model.visibility().is_hidden(ColumnKey::Id));
        send(&mut model, &[Message::HideAllColumns]);
        assert!(model.visible_columns().is_empty());
        assert_eq!(model.page_rows().len(), 10);
        send(&mut model, &[Message::ShowAllColumns, Message::Exit]);
        assert_eq!(model.visible_columns().len(), COLUMNS.len());
    }

    #[test]
    fn quit() {
        let mut model = model();
        send(&mut model, &[Message::Quit]);
        assert_eq!(model.status, Status::QUITTING);
    }
}
