//! Sign-in dialog — a centered modal with placeholder Google login.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::TuiApp;

/// Dialog options in display order.
pub const OPTIONS: &[&str] = &["Sign in with Google", "Cancel"];

/// Renders the sign-in dialog centered over `area`.
pub fn render(app: &TuiApp, frame: &mut Frame<'_>, area: Rect) {
    let theme = app.theme();
    let dialog_area = centered_rect(area, 36, 6);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border))
        .title(Span::styled(
            " Sign In ",
            Style::default()
                .fg(theme.dialog_border)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.bg));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let mut lines: Vec<Line<'_>> = vec![Line::from("")];
    for (idx, option) in OPTIONS.iter().enumerate() {
        let selected = idx == app.ui.dialog_cursor;
        let marker = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(theme.dialog_selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_dim)
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker}{option}"),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Returns a `width` x `height` rect centered within `area`, clamped to it.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(area);
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(horizontal[0]);
    vertical[0]
}
