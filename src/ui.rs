use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{
        Block, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
};

use crate::domain::{CMDMode, TableConfig};
use crate::model::{Modus, Model};
use crate::pipeline::Direction;
use crate::product::{COLUMNS, ColumnDescriptor, Product};

pub const COLUMN_WIDTH_MARGIN: usize = 1;
pub const SEARCH_HEIGHT: u16 = 3;
pub const STATUSLINE_HEIGHT: u16 = 1;
const ACTION_LABEL: &str = "Action";
const ACTION_CELL: &str = "[v] [e] [d]";

#[derive(Debug)]
pub struct TableUI {
    max_column_width: usize,
}

impl TableUI {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            max_column_width: config.max_column_width,
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let [search_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUSLINE_HEIGHT),
        ])
        .areas(frame.area());

        self.draw_search(model, frame, search_area);
        self.draw_table(model, frame, table_area);
        self.draw_statusline(model, frame, status_area);

        match model.modus() {
            Modus::COLUMNS => self.draw_column_menu(model, frame, table_area),
            Modus::FILTERS => self.draw_filter_menu(model, frame, table_area),
            Modus::FILTERVALUES(key) => {
                let options = model
                    .filter_options(key)
                    .into_iter()
                    .map(|o| if o.is_empty() { "None".to_string() } else { o })
                    .collect::<Vec<_>>();
                let title = format!(" Filter {} ", key);
                self.draw_menu(frame, table_area, &title, options, model.menu_cursor());
            }
            Modus::CMDINPUT => {
                if let Some(CMDMode::FilterValue(key)) = model.cmd_mode() {
                    self.draw_filter_input(model, frame, table_area, &key.to_string());
                }
            }
            Modus::POPUP | Modus::CONFIRM => {
                if let Some(popup) = model.popup() {
                    let area = centered_rect(frame.area(), 70, 60);
                    frame.render_widget(Clear, area);
                    frame.render_widget(
                        Paragraph::new(popup.message.as_str())
                            .wrap(Wrap { trim: false })
                            .block(
                                Block::bordered()
                                    .title(popup.title.as_str())
                                    .border_set(border::THICK),
                            ),
                        area,
                    );
                }
            }
            Modus::TABLE => {}
        }
    }

    fn draw_search(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let searching = model.cmd_mode() == Some(CMDMode::Search);
        let block = Block::bordered()
            .title(" Search ")
            .border_style(if searching {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            });
        let text = if searching || !model.query().is_empty() {
            Line::from(model.query().to_string())
        } else {
            Line::from("Press / to search".dark_gray())
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
        if searching {
            let cursor = model.cmd_input().cursor_pos as u16;
            frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
        }
    }

    fn column_width(&self, column: &ColumnDescriptor, rows: &[Product]) -> usize {
        let widest = rows
            .iter()
            .filter_map(|r| r.value(column.key).to_text())
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(0);
        // label plus room for the sort and filter markers
        let width = std::cmp::max(column.label.chars().count() + 2, widest);
        width.min(self.max_column_width) + COLUMN_WIDTH_MARGIN
    }

    fn header_label(model: &Model, column: &ColumnDescriptor) -> String {
        let mut label = column.label.to_string();
        if model.sort().field() == Some(column.key) {
            label.push_str(match model.sort().direction() {
                Some(Direction::Descending) => " ▼",
                _ => " ▲",
            });
        }
        if model.filters().get(column.key).is_some() {
            label.push('*');
        }
        label
    }

    fn draw_table(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let per_page = model.pagination().items_per_page();
        let title = format!(" Products ({per_page} per page) ");
        let block = Block::bordered().title(Line::from(title.bold()).centered());
        let rows = model.page_rows();
        if rows.is_empty() {
            let message = if model.is_loading() {
                "Loading ..."
            } else {
                "No results found."
            };
            frame.render_widget(Paragraph::new(message).centered().block(block), area);
            return;
        }

        let columns = model.visible_columns();
        let (cursor_row, cursor_column) = model.cursor();

        let mut widths: Vec<Constraint> = columns
            .iter()
            .map(|c| Constraint::Length(self.column_width(c, rows) as u16))
            .collect();
        widths.push(Constraint::Length(ACTION_CELL.len() as u16));

        let mut header: Vec<Cell> = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let cell = Cell::from(Self::header_label(model, c));
                if idx == cursor_column {
                    cell.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    cell
                }
            })
            .collect();
        header.push(Cell::from(ACTION_LABEL));

        let body = rows.iter().map(|row| {
            let mut cells: Vec<Cell> = columns
                .iter()
                .map(|c| Cell::from(row.value(c.key).to_text().unwrap_or_default()))
                .collect();
            cells.push(Cell::from(ACTION_CELL.dark_gray()));
            Row::new(cells)
        });

        let table = Table::new(body, widths)
            .header(Row::new(header).bold().underlined())
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .block(block);
        let mut state = TableState::default().with_selected(Some(cursor_row));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_statusline(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::from(format!(
                " Total records: {} / Current page: {} / Total pages: {} ",
                model.total(),
                model.pagination().page(),
                model.page_count()
            ))
            .bold(),
            Span::from(model.status_message().to_string()).yellow(),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_column_menu(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let items = COLUMNS
            .iter()
            .map(|c| {
                let mark = if model.visibility().is_hidden(c.key) { "[ ]" } else { "[x]" };
                format!("{mark} {}", c.label)
            })
            .collect();
        self.draw_menu(
            frame,
            area,
            " Columns (H hide all, A show all) ",
            items,
            model.menu_cursor(),
        );
    }

    fn draw_filter_menu(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let items = COLUMNS
            .iter()
            .map(|c| match model.filters().get(c.key) {
                Some(value) => format!("{}: {}", c.label, value),
                None => format!("{}: None", c.label),
            })
            .collect();
        let title = format!(" Filters ({:?}, X clear all) ", model.filters().mode());
        self.draw_menu(frame, area, &title, items, model.menu_cursor());
    }

    fn draw_menu(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        items: Vec<String>,
        selected: usize,
    ) {
        let area = centered_rect(area, 50, 80);
        let list = List::new(items.into_iter().map(ListItem::new))
            .block(Block::bordered().title(title).border_set(border::THICK))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_filter_input(&self, model: &Model, frame: &mut Frame, area: Rect, column: &str) {
        let area = centered_rect(area, 50, 20).intersection(area);
        let area = Rect { height: area.height.min(3), ..area };
        let input = model.cmd_input();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(input.input.as_str()).block(
                Block::bordered()
                    .title(format!(" Filter {column} "))
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
            area,
        );
        frame.set_cursor_position((area.x + 1 + input.cursor_pos as u16, area.y + 1));
    }
}

/// A rectangle of `percent_x` by `percent_y` in the middle of `area`.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
