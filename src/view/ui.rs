//! Stateless painting of the view's elements.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::document::Element;
use super::theme;
use super::view::{HitMap, MenuItem, View};
use crate::games::tictactoe::Position;

const CELL_WIDTH: u16 = 11;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = 11;
const MENU_WIDTH: u16 = 16;

/// Paints the whole screen and returns the clickable regions.
pub fn draw(frame: &mut Frame, view: &View) -> HitMap {
    let area = frame.area();
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Turn + menu
            Constraint::Min(BOARD_HEIGHT), // Board
            Constraint::Length(4),         // Scoreboard
            Constraint::Length(1),         // Help
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(MENU_WIDTH)])
        .split(chunks[0]);

    draw_turn(frame, header[0], view.elements().turn());
    hits.menu_btn = Some(header[1]);
    draw_menu_button(frame, header[1], view.elements().menu_btn());

    hits.cells = draw_board(frame, chunks[1], view);
    draw_scoreboard(frame, chunks[2], view);

    let help = Paragraph::new("←↑↓→ move · Enter/1-9 play · m menu · r reset · n new round · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    // Overlays last so they sit on top.
    if view.is_menu_open() {
        hits.menu_items = draw_menu_items(frame, area, header[1], view);
    }
    if view.is_modal_open() {
        hits.modal_btn = Some(draw_modal(frame, area, view));
    }

    hits
}

fn element_style(element: &Element) -> Style {
    match element.color_class() {
        Some(class) => Style::default().fg(theme::color(class)),
        None => Style::default(),
    }
}

fn icon_span(element: &Element) -> Option<Span<'static>> {
    element.icon().as_ref().map(|icon| {
        Span::styled(
            theme::glyph(icon.icon_class()).to_string(),
            Style::default()
                .fg(theme::color(icon.color_class()))
                .add_modifier(Modifier::BOLD),
        )
    })
}

fn draw_turn(frame: &mut Frame, area: Rect, turn: &Element) {
    let mut spans = Vec::new();
    if let Some(icon) = icon_span(turn) {
        spans.push(icon);
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(turn.text().clone(), element_style(turn)));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Tic Tac Toe"));
    frame.render_widget(paragraph, area);
}

fn draw_menu_button(frame: &mut Frame, area: Rect, button: &Element) {
    let mut spans = vec![Span::raw(button.text().clone())];
    if let Some(icon) = button.icon() {
        spans.push(Span::raw(format!(" {}", theme::glyph(icon.icon_class()))));
    }
    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_menu_items(
    frame: &mut Frame,
    screen: Rect,
    button: Rect,
    view: &View,
) -> Vec<(MenuItem, Rect)> {
    let height = MenuItem::ALL.len() as u16 + 2;
    let list = Rect {
        x: button.x,
        y: button.y.saturating_add(button.height),
        width: button.width,
        height,
    }
    .intersection(screen);

    frame.render_widget(Clear, list);
    frame.render_widget(Block::default().borders(Borders::ALL), list);

    let mut regions = Vec::new();
    for (idx, item) in MenuItem::ALL.into_iter().enumerate() {
        let row = Rect {
            x: list.x.saturating_add(1),
            y: list.y.saturating_add(1 + idx as u16),
            width: list.width.saturating_sub(2),
            height: 1,
        }
        .intersection(list);

        let element = match item {
            MenuItem::Reset => view.elements().reset_btn(),
            MenuItem::NewRound => view.elements().new_round_btn(),
        };
        let style = if item == view.menu_selection() {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(element.text().as_str()).style(style), row);
        regions.push((item, row));
    }
    regions
}

fn draw_board(frame: &mut Frame, area: Rect, view: &View) -> Vec<(Position, Rect)> {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let mut cells = Vec::with_capacity(9);
    for (row_idx, row_area) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row_area);

        for (col_idx, cell_area) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            let square_id = (row_idx * 3 + col_idx) as u8;
            if let Some(square) = view
                .elements()
                .squares()
                .iter()
                .find(|s| s.position().square_id() == square_id)
            {
                let pos = *square.position();
                draw_cell(frame, cell_area, square.element(), pos, pos == view.cursor());
                cells.push((pos, cell_area));
            }
        }
        draw_separator_vertical(frame, cols[1]);
        draw_separator_vertical(frame, cols[3]);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
    cells
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: &Element, pos: Position, selected: bool) {
    let span = icon_span(cell).unwrap_or_else(|| {
        // Empty cells show their key so the board doubles as a keypad.
        Span::styled(
            (pos.square_id() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        )
    });

    let span = if selected {
        span.patch_style(Style::default().bg(Color::White))
    } else {
        span
    };

    // Vertically center inside the 3-line cell.
    let text = vec![Line::default(), Line::from(span)];
    let style = if selected {
        Style::default().bg(Color::White).fg(Color::Black)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = "─".repeat(usize::from(area.width));
    let sep = Paragraph::new(line).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = (0..area.height).map(|_| Line::from("│")).collect();
    let sep = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_scoreboard(frame: &mut Frame, area: Rect, view: &View) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let elements = view.elements();
    for (element, col) in [
        (elements.p1_wins(), cols[0]),
        (elements.ties(), cols[1]),
        (elements.p2_wins(), cols[2]),
    ] {
        let paragraph = Paragraph::new(element.text().as_str())
            .style(element_style(element))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(element.label().as_str()),
            );
        frame.render_widget(paragraph, col);
    }
}

fn draw_modal(frame: &mut Frame, screen: Rect, view: &View) -> Rect {
    let area = center_rect(screen, 36, 7);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Game over")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let text = Paragraph::new(view.elements().modal_text().text().as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(text, rows[1]);

    let label = format!("[ {} ]", view.elements().modal_btn().text());
    let button = center_rect(rows[3], label.chars().count() as u16, 1);
    frame.render_widget(
        Paragraph::new(label).style(Style::default().bg(Color::White).fg(Color::Black)),
        button,
    );
    button
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
