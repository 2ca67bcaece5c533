//! Composer widget — staged-file chips row and the message input box.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::app::TuiApp;

/// Placeholder shown while the input is empty.
const PLACEHOLDER: &str = "Type your message...";

/// Height of the chips row: one line when files are staged, zero otherwise.
pub fn chips_height(app: &TuiApp) -> u16 {
    if app.session.staged_files().is_empty() {
        0
    } else {
        1
    }
}

/// Renders the chips row (if any) and the input box.
pub fn render(app: &TuiApp, frame: &mut Frame<'_>, chips_area: Rect, input_area: Rect) {
    let theme = app.theme();

    if !app.session.staged_files().is_empty() && chips_area.height > 0 {
        let mut spans: Vec<Span<'_>> = vec![Span::styled(
            " 📎 ",
            Style::default().fg(theme.attachment),
        )];
        for (i, file) in app.session.staged_files().iter().enumerate() {
            spans.push(Span::styled(
                format!("[{}] {} ({:.1} KB)  ", i + 1, file.name, file.size as f64 / 1024.0),
                Style::default().fg(theme.attachment),
            ));
        }
        spans.push(Span::styled(
            "(/detach <n> to remove)",
            Style::default().fg(theme.fg_muted),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), chips_area);
    }

    let awaiting = app.awaiting();
    let border_color = if awaiting {
        theme.fg_muted
    } else if app.ui.sidebar_focused || app.ui.dialog_open {
        theme.border
    } else {
        theme.border_active
    };

    let display_text = if app.input.is_empty() && !awaiting {
        PLACEHOLDER
    } else {
        &app.input
    };
    let input_style = if app.input.is_empty() {
        Style::default().fg(theme.fg_muted)
    } else {
        Style::default().fg(theme.fg)
    };

    let input = Paragraph::new(Span::styled(display_text, input_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                " Message ",
                Style::default()
                    .fg(border_color)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(input, input_area);

    // Cursor only when the composer can accept input.
    if !awaiting && !app.ui.sidebar_focused && !app.ui.dialog_open {
        let cursor_col = UnicodeWidthStr::width(&app.input[..app.cursor_pos]) as u16;
        frame.set_cursor_position((input_area.x + 1 + cursor_col, input_area.y + 1));
    }
}
