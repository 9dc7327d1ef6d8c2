//! Drawing of the render state

use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_VERSION, DOWNLOAD_LIST_TITLE, GAME_LIST_TITLE};
use crate::messages::{RenderState, View};
use crate::models::{SelectableItem, SeriesRow, SERIES_COLUMNS};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const TABLE_FOOTER: &str = "Press 'e' to export data, or press Enter to select a series.";

/// Spinner glyph for the given UI tick
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub fn draw_ui(f: &mut Frame, state: &RenderState, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // An error replaces whatever the view would show
    if let Some(message) = &state.error_message {
        draw_error(f, message, chunks[0]);
    } else {
        match &state.view {
            View::SelectGame { items, selected } => {
                draw_list(f, GAME_LIST_TITLE, items, *selected, chunks[0])
            }
            View::DayPrompt { prompt, input } => draw_day_prompt(f, prompt, input, chunks[0]),
            View::Loading { label } => draw_loading(f, label, tick, chunks[0]),
            View::Table { rows, selected } => draw_table(f, rows, *selected, chunks[0]),
            View::SelectDownloadOption { options, selected } => {
                if options.is_empty() {
                    draw_message(
                        f,
                        DOWNLOAD_LIST_TITLE,
                        "No files available for this series. Press Esc to go back.",
                        chunks[0],
                    );
                } else {
                    draw_list(f, DOWNLOAD_LIST_TITLE, options, *selected, chunks[0]);
                }
            }
        }
    }

    draw_status_bar(f, state, chunks[1]);
}

fn draw_list(f: &mut Frame, title: &str, items: &[SelectableItem], selected: usize, area: Rect) {
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::raw(item.title.clone()),
                Span::styled(format!("  {}", item.description), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", title)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_day_prompt(f: &mut Frame, prompt: &str, input: &str, area: Rect) {
    let popup_area = centered_rect(80, 30, area);

    let text = Line::from(vec![
        Span::raw(prompt.to_string()),
        Span::styled(input.to_string(), Style::default().fg(Color::Yellow).bold()),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Search Window ");

    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), popup_area);
}

fn draw_loading(f: &mut Frame, label: &str, tick: usize, area: Rect) {
    let popup_area = centered_rect(60, 20, area);
    let text = Line::from(vec![
        Span::styled(spinner_frame(tick), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(label.to_string()),
    ]);
    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(text).block(block).centered(), popup_area);
}

fn draw_table(f: &mut Frame, rows: &[SeriesRow], selected: usize, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Series ({}) ", rows.len()));

    if rows.is_empty() {
        let empty = Paragraph::new("No series found in this time window.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, chunks[0]);
    } else {
        let header = Row::new(SERIES_COLUMNS.iter().map(|c| Cell::from(*c)))
            .style(Style::default().fg(Color::Cyan).bold());
        let table_rows = rows.iter().map(|row| Row::new(row.cells().map(|c| Cell::from(c.to_string()))));
        let widths = [
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ];

        let table = Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");

        let mut table_state = TableState::default().with_selected(Some(selected));
        f.render_stateful_widget(table, chunks[0], &mut table_state);
    }

    let footer = Paragraph::new(TABLE_FOOTER).style(Style::default().fg(Color::Gray));
    f.render_widget(footer, chunks[1]);
}

fn draw_message(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));
    f.render_widget(Paragraph::new(message).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_error(f: &mut Frame, message: &str, area: Rect) {
    let text = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss", Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ");
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.error_message.is_some() {
        " any key:dismiss | q:quit "
    } else {
        match &state.view {
            View::SelectGame { .. } => " ↑/↓:move | Enter:select | q:quit ",
            View::DayPrompt { .. } => " 0-9:type | Backspace:delete | Enter:confirm | q:quit ",
            View::Loading { .. } => " Loading... | q:quit ",
            View::Table { .. } => " ↑/↓:move | Enter:files | e:export | q:quit ",
            View::SelectDownloadOption { .. } => " ↑/↓:move | Enter:download | Esc:back | q:quit ",
        }
    };

    let left = match &state.status_message {
        Some(status) => Span::styled(format!(" {} ", status), Style::default().fg(Color::Green)),
        None => Span::styled(hints, Style::default().fg(Color::DarkGray)),
    };

    let bar = Paragraph::new(Line::from(left));
    f.render_widget(bar, area);

    let version = Paragraph::new(format!("v{} ", APP_VERSION))
        .style(Style::default().fg(Color::DarkGray))
        .right_aligned();
    f.render_widget(version, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
