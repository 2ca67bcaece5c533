//! Sidebar widget — brand header, navigation entries, hover and click.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{SidebarEntry, TuiApp};

/// Fixed sidebar width in terminal columns.
const SIDEBAR_WIDTH: u16 = 26;

/// Vertical rows per entry (label plus spacing).
const ENTRY_HEIGHT: u16 = 2;

/// Returns the fixed sidebar width in columns.
pub fn sidebar_width() -> u16 {
    SIDEBAR_WIDTH
}

/// Maps a screen row inside the sidebar to an entry index, honoring scroll.
/// Returns `None` for spacing rows and rows past the last entry.
pub fn entry_index_at(area: Rect, row: u16, entry_count: usize, scroll: u16) -> Option<usize> {
    let inner_top = area.y + 1;
    if row < inner_top {
        return None;
    }
    let rel = (row - inner_top).saturating_add(scroll);
    if rel % ENTRY_HEIGHT != 0 {
        return None;
    }
    let idx = (rel / ENTRY_HEIGHT) as usize;
    (idx < entry_count).then_some(idx)
}

/// Renders the sidebar panel.
pub fn render(app: &TuiApp, frame: &mut Frame<'_>, area: Rect) {
    let theme = app.theme();

    let border_style = if app.ui.sidebar_focused {
        Style::default().fg(theme.sidebar_cursor)
    } else {
        Style::default().fg(theme.sidebar_border)
    };
    let header = Line::from(vec![
        Span::styled(
            " Neurago ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        if app.ui.sidebar_focused {
            Span::styled("◉", Style::default().fg(theme.sidebar_cursor))
        } else {
            Span::styled("[Tab]", Style::default().fg(theme.fg_muted))
        },
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(header);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entries = app.sidebar_entries();
    let mut lines: Vec<Line<'_>> = Vec::new();
    let max_label_width = inner.width.saturating_sub(3) as usize;

    for (idx, entry) in entries.iter().enumerate() {
        let is_cursor = app.ui.sidebar_focused && idx == app.ui.sidebar_cursor;
        let is_hovered = Some(idx) == app.ui.sidebar_hover;

        let indicator = if is_cursor {
            Span::styled("▌", Style::default().fg(theme.sidebar_cursor))
        } else if is_hovered {
            Span::styled("▌", Style::default().fg(theme.sidebar_hover))
        } else {
            Span::raw(" ")
        };

        // Profile sub-entries are indented under their parent.
        let indent = match entry {
            SidebarEntry::ChangeTheme | SidebarEntry::LogOut => "   ",
            _ => " ",
        };
        let label = truncate_str(entry.label(), max_label_width);
        let label_style = if is_cursor {
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)
        } else if is_hovered {
            Style::default().fg(theme.fg)
        } else {
            Style::default().fg(theme.sidebar_text)
        };

        lines.push(Line::from(vec![
            indicator,
            Span::styled(format!("{indent}{label}"), label_style),
        ]));
        lines.push(Line::from(""));
    }

    let content_height = lines.len() as u16;
    let max_scroll = content_height.saturating_sub(inner.height);
    let scroll = app.ui.sidebar_scroll.min(max_scroll);

    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(list, inner);
}

/// Truncates a string to `max_len` characters, appending `…` if shortened.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
