//! Status bar widget — contextual key hints, notices, and the version.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::TuiApp;

/// Braille-pattern spinner frames for the status bar animation.
const SPINNER: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Renders the single-line status bar with version right-aligned.
pub fn render(app: &TuiApp, frame: &mut Frame<'_>, area: Rect) {
    let theme = app.theme();

    let status_text = if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(theme.notice),
        ))
    } else if app.awaiting() {
        let spinner = SPINNER[(app.spinner_tick as usize) % SPINNER.len()];
        Line::from(vec![
            Span::styled(
                format!(" {spinner} Waiting for reply... "),
                Style::default().fg(theme.status_spinner),
            ),
            Span::styled("Ctrl+C:quit", Style::default().fg(theme.status_hint)),
        ])
    } else if app.ui.dialog_open {
        Line::from(Span::styled(
            " ↑↓:select  Enter:confirm  Esc:cancel",
            Style::default().fg(theme.status_hint),
        ))
    } else if app.ui.sidebar_focused {
        Line::from(Span::styled(
            " ↑↓:navigate  Enter:activate  Tab:chat  Esc:close  Ctrl+C:quit",
            Style::default().fg(theme.status_hint),
        ))
    } else {
        Line::from(Span::styled(
            " Enter:send  /help:commands  ↑↓:scroll  Tab:sidebar  Ctrl+C:quit",
            Style::default().fg(theme.status_hint),
        ))
    };

    // Split to right-align the version.
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(10)]).split(area);

    frame.render_widget(Paragraph::new(status_text), chunks[0]);

    let version_text = Line::from(Span::styled(
        format!("v{}  ", app.version),
        Style::default().fg(theme.status_version),
    ));
    frame.render_widget(Paragraph::new(version_text).right_aligned(), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{Terminal, backend::TestBackend};
    use session::ChatSession;

    fn make_app() -> TuiApp {
        TuiApp::new(ChatSession::new(), &Config::default())
    }

    fn buffer_text(app: &TuiApp) -> String {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(app, frame, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for x in 0..buf.area.width {
            out.push_str(buf.cell((x, 0)).unwrap().symbol());
        }
        out
    }

    #[test]
    fn idle_shows_composer_hints_and_version() {
        let app = make_app();
        let text = buffer_text(&app);
        assert!(text.contains("Enter:send"));
        assert!(text.contains(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn awaiting_shows_spinner_line() {
        let mut app = make_app();
        app.session.set_draft("msg");
        app.session.begin_submit().unwrap();
        let text = buffer_text(&app);
        assert!(text.contains("Waiting for reply..."));
    }

    #[test]
    fn sidebar_focus_swaps_hints() {
        let mut app = make_app();
        app.ui.sidebar_focused = true;
        let text = buffer_text(&app);
        assert!(text.contains("Enter:activate"));
    }

    #[test]
    fn dialog_focus_swaps_hints() {
        let mut app = make_app();
        app.ui.dialog_open = true;
        let text = buffer_text(&app);
        assert!(text.contains("Enter:confirm"));
    }

    #[test]
    fn notice_takes_precedence() {
        let mut app = make_app();
        app.set_notice("Unknown command: /x. Try /help.");
        let text = buffer_text(&app);
        assert!(text.contains("Unknown command"));
        assert!(!text.contains("Enter:send"));
    }
}
