//! Stateless UI rendering for the chess board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_chess::{BOARD_SIZE, Cell, Coordinate, Highlight, Shade, Side};

use super::app::App;

/// Width of one drawn cell in columns.
const CELL_WIDTH: u16 = 3;

/// Renders the board, status, notice and help.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Strictly Chess")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);

    let status_style = if app.status().is_terminal() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(format!("{}  [{}]", app.status(), app.phase()))
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    if let Some(notice) = app.notice() {
        let notice = Paragraph::new(notice)
            .style(Style::default().fg(Color::LightRed))
            .alignment(Alignment::Center);
        frame.render_widget(notice, chunks[3]);
    }

    let help = Paragraph::new("arrows/hjkl move · enter/space select · r reset · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let width = 2 + CELL_WIDTH * u16::from(BOARD_SIZE);
    let height = 1 + u16::from(BOARD_SIZE);
    let board_area = center_rect(area, width, height);

    let mut lines: Vec<Line> = (0..BOARD_SIZE)
        .rev()
        .map(|rank| {
            let mut spans = vec![Span::styled(
                format!("{} ", rank),
                Style::default().fg(Color::DarkGray),
            )];
            spans.extend(
                (0..BOARD_SIZE)
                    .filter_map(|file| Coordinate::new(file, rank).ok())
                    .map(|coordinate| {
                        cell_span(app.board().cell(coordinate), coordinate == app.cursor())
                    }),
            );
            Line::from(spans)
        })
        .collect();

    let files: String = (0..BOARD_SIZE).map(|file| format!(" {} ", file)).collect();
    lines.push(Line::from(Span::styled(
        format!("  {}", files),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), board_area);
}

fn cell_span(cell: &Cell, under_cursor: bool) -> Span<'static> {
    let background = if cell.has_highlight(Highlight::Captured) {
        Color::Red
    } else if cell.has_highlight(Highlight::Selected) {
        Color::Yellow
    } else if cell.has_highlight(Highlight::LegalMove) {
        Color::Green
    } else {
        match cell.shade() {
            Shade::Light => Color::Gray,
            Shade::Dark => Color::DarkGray,
        }
    };

    let (symbol, foreground) = match cell.occupant() {
        Some(piece) => (
            format!(" {} ", piece.glyph()),
            match piece.side() {
                Side::White => Color::White,
                Side::Black => Color::Black,
            },
        ),
        None if cell.has_highlight(Highlight::LegalMove) => (" · ".to_string(), Color::Black),
        None => ("   ".to_string(), Color::Black),
    };

    let mut style = Style::default().bg(background).fg(foreground).add_modifier(Modifier::BOLD);
    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(symbol, style)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
