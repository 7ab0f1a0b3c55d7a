use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState},
};

use crate::domain::ViewConfig;
use crate::highlight::split_matches;
use crate::model::{ColumnView, Model, SortSpec, UIData};

pub const COLUMN_WIDTH_MARGIN: usize = 1;
pub const SORT_MARKER_WIDTH: usize = 2;
pub const SEARCH_HEIGHT: u16 = 3;
pub const PAGER_HEIGHT: u16 = 1;
pub const CMDLINE_HEIGH: u16 = 1;

const HIGHLIGHT_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

pub struct TableUI {
    table_state: TableState,
    max_column_width: usize,
}

impl TableUI {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            table_state: TableState::default(),
            max_column_width: config.max_column_width,
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let [search_area, table_area, pager_area, status_area] = Layout::vertical([
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGER_HEIGHT),
            Constraint::Length(CMDLINE_HEIGH),
        ])
        .areas(frame.area());

        Self::draw_search(uidata, frame, search_area);
        self.draw_table(uidata, frame, table_area);
        frame.render_widget(Self::pager_line(uidata), pager_area);
        frame.render_widget(Self::status_line(uidata), status_area);

        if uidata.show_popup {
            let area = Self::popup_area(frame.area(), 60, 70);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(uidata.popup_message.as_str())
                    .block(Block::bordered().title(" Help ")),
                area,
            );
        }
    }

    fn draw_search(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let (title, text) = if uidata.active_cmdinput {
            (" Search (<Enter> apply, <Esc> stop) ", uidata.cmdinput.input.as_str())
        } else {
            (" Search by name or location (/) ", uidata.search_text.as_str())
        };
        frame.render_widget(
            Paragraph::new(text).block(Block::bordered().title(title)),
            area,
        );
        if uidata.active_cmdinput {
            let x = area.x + 1 + uidata.cmdinput.curser_pos as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn draw_table(&mut self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let header = Row::new(uidata.table.iter().enumerate().map(|(cidx, column)| {
            let mut style = Style::new().bold();
            if cidx == uidata.selected_column {
                style = style.underlined();
            }
            Cell::from(format!("{}{}", column.name, Self::sort_marker(column))).style(style)
        }));

        let nrows = uidata.table.first().map(|c| c.data.len()).unwrap_or(0);
        let rows = (0..nrows).map(|ridx| {
            Row::new(uidata.table.iter().map(|column| {
                let value = column.data[ridx].as_str();
                if column.highlight {
                    // Highlight follows the text in the search box, even before it is applied
                    Cell::from(Self::highlight_line(value, &uidata.search_text))
                } else {
                    Cell::from(value)
                }
            }))
        });

        let widths = uidata.table.iter().map(|column| {
            let header_width = column.name.chars().count() + SORT_MARKER_WIDTH;
            let width = std::cmp::min(column.width, self.max_column_width).max(header_width);
            Constraint::Length(width as u16)
        });

        let title = if uidata.global_filter.is_empty() {
            format!(" {} ", uidata.name)
        } else {
            format!(" {} [filter: {}] ", uidata.name, uidata.global_filter)
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title(title))
            .row_highlight_style(Style::new().reversed());

        self.table_state.select((nrows > 0).then_some(uidata.selected_row));
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn sort_marker(column: &ColumnView) -> &'static str {
        match column.sort {
            Some(SortSpec { desc: true, .. }) => " ▼",
            Some(SortSpec { desc: false, .. }) => " ▲",
            None => "",
        }
    }

    pub fn highlight_line<'a>(value: &'a str, term: &str) -> Line<'a> {
        Line::from(
            split_matches(value, term)
                .into_iter()
                .map(|fragment| {
                    let text = &value[fragment.range];
                    if fragment.matched {
                        Span::styled(text, HIGHLIGHT_STYLE)
                    } else {
                        Span::raw(text)
                    }
                })
                .collect::<Vec<Span>>(),
        )
    }

    fn pager_line(uidata: &UIData) -> Line<'_> {
        let style = |enabled: bool| {
            if enabled {
                Style::new().bold()
            } else {
                DISABLED_STYLE
            }
        };
        Line::from(vec![
            Span::raw(format!(
                " Page {} of {}  ",
                uidata.page_index + 1,
                uidata.page_count
            )),
            Span::styled("<<", style(uidata.can_previous_page)),
            Span::raw(" "),
            Span::styled("<", style(uidata.can_previous_page)),
            Span::raw(" "),
            Span::styled(">", style(uidata.can_next_page)),
            Span::raw(" "),
            Span::styled(">>", style(uidata.can_next_page)),
            Span::raw(format!(
                "   {} of {} records",
                uidata.nrows, uidata.total_rows
            )),
        ])
    }

    fn status_line(uidata: &UIData) -> Line<'_> {
        Line::from(vec![
            Span::raw(uidata.status_message.as_str()),
            Span::styled("  ? for help", DISABLED_STYLE),
        ])
    }

    fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
            .flex(Flex::Center)
            .areas(area);
        area
    }
}
