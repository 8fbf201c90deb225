//! Stateless UI rendering for tic-tac-toe.

use noughts_core::render::{CellRender, Glyph};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::preferences::Theme;
use crate::session::SessionView;

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    cross: Color,
    nought: Color,
    winning: Color,
    cursor: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                cross: Color::LightBlue,
                nought: Color::LightRed,
                winning: Color::Green,
                cursor: Color::Gray,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                cross: Color::Blue,
                nought: Color::Red,
                winning: Color::LightGreen,
                cursor: Color::DarkGray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }
}

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, view: &SessionView, cursor: usize, menu_open: bool, thinking: bool) {
    let palette = Palette::for_theme(view.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(palette.base().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], view.cells(), cursor, &palette);

    let status = if thinking {
        format!("{} (computer is thinking...)", view.status())
    } else {
        view.status().clone()
    };
    let status = Paragraph::new(status)
        .style(palette.base().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(format!(
        "1-9/Enter: Move | R: Restart | A: {} | M: Menu | Q: Quit",
        view.ai_label()
    ))
    .style(Style::default().fg(palette.muted).bg(palette.background))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);

    if menu_open {
        draw_menu(frame, area, view, &palette);
    }

    if let Some(popup) = view.popup() {
        let popup_area = center_rect(area, 30, 5);
        frame.render_widget(Clear, popup_area);
        let message = Paragraph::new(vec![
            Line::from(Span::styled(
                popup.message().as_str(),
                Style::default()
                    .fg(palette.winning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Enter: close",
                Style::default().fg(palette.muted),
            )),
        ])
        .style(palette.base())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Game Over"));
        frame.render_widget(message, popup_area);
    }
}

fn draw_menu(frame: &mut Frame, area: Rect, view: &SessionView, palette: &Palette) {
    let menu_area = center_rect(area, 34, 7);
    frame.render_widget(Clear, menu_area);
    let lines = vec![
        Line::from(format!("Theme       [ {} ]  (T)", view.theme())),
        Line::from(format!("AI level    [ {} ]  (D)", view.difficulty())),
        Line::from(format!("Opponent    [ {} ]  (A)", view.ai_label())),
        Line::from(Span::styled(
            "M/Esc: close",
            Style::default().fg(palette.muted),
        )),
    ];
    let menu = Paragraph::new(lines)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title("Preferences"));
    frame.render_widget(menu, menu_area);
}

fn draw_board(frame: &mut Frame, area: Rect, cells: &[CellRender; 9], cursor: usize, palette: &Palette) {
    let board_area = center_rect(area, 38, 11);

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

    for (row, cells) in cells.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], cells, cursor, palette);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1], palette);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, cells: &[CellRender], cursor: usize, palette: &Palette) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (col, cell) in cells.iter().enumerate() {
        draw_cell(frame, cols[col * 2], cell, cursor, palette);
        if col < 2 {
            let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(palette.muted));
            frame.render_widget(sep, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: &CellRender, cursor: usize, palette: &Palette) {
    let label = (cell.index + 1).to_string();
    let (symbol, mut style) = match cell.glyph {
        Glyph::Blank => (label.as_str(), Style::default().fg(palette.muted)),
        Glyph::Cross => (
            "X",
            Style::default()
                .fg(palette.cross)
                .add_modifier(Modifier::BOLD),
        ),
        Glyph::Nought => (
            "O",
            Style::default()
                .fg(palette.nought)
                .add_modifier(Modifier::BOLD),
        ),
    };

    style = style.bg(palette.background);
    if cell.highlighted {
        style = style.bg(palette.winning).fg(palette.background);
    } else if cell.index == cursor {
        style = style.bg(palette.cursor);
    }

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {symbol}  "), style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(palette.muted));
    frame.render_widget(sep, area);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::Preferences;
    use crate::session::GameSession;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(view: &SessionView, menu_open: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|f| draw(f, view, 4, menu_open, false))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_status_and_marks() {
        let mut session = GameSession::new(Preferences::default(), StdRng::seed_from_u64(1));
        session.click(4);
        let screen = render(&session.view(), false);
        assert!(screen.contains("Player O's turn"));
        assert!(screen.contains('X'));
    }

    #[test]
    fn test_renders_popup_and_menu() {
        let mut session = GameSession::new(Preferences::default(), StdRng::seed_from_u64(1));
        for pos in [0, 3, 1, 4, 2] {
            session.click(pos);
        }
        let screen = render(&session.view(), false);
        assert!(screen.contains("Player X Wins!"));

        session.dismiss_popup();
        let screen = render(&session.view(), true);
        assert!(screen.contains("Preferences"));
    }
}
