//! Transcript widget — renders the message history, attachment lines, the
//! typing indicator, and the empty-state welcome.

use proto::{AttachmentRef, Role};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::TuiApp;

/// Typing indicator frames — three dots cycling like the original bounce.
const TYPING: &[&str] = &["●∙∙", "∙●∙", "∙∙●"];

/// Indent for continuation lines, matching the widest label ("Neurago: ").
const CONTINUATION_INDENT: &str = "         ";

/// Renders the transcript area.
pub fn render(app: &mut TuiApp, frame: &mut Frame<'_>, area: Rect) {
    let theme = app.theme();

    if app.session.messages().is_empty() && !app.awaiting() {
        render_welcome(app, frame, area);
        app.transcript_area = Some(area);
        return;
    }

    let mut lines: Vec<Line<'_>> = Vec::new();

    for msg in app.session.messages() {
        lines.push(Line::from(""));
        let (label, label_color) = match msg.role {
            Role::User => ("You: ", theme.user_label),
            Role::Assistant => ("Neurago: ", theme.assistant_label),
        };

        // The fixed send-failure reply renders in the error color.
        let content_color = if msg.role == Role::Assistant && msg.content == session::ERROR_REPLY {
            theme.error
        } else {
            theme.fg
        };

        let mut first = true;
        for content_line in msg.content.lines() {
            if first {
                lines.push(Line::from(vec![
                    Span::styled(
                        label,
                        Style::default().fg(label_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(content_line.to_string(), Style::default().fg(content_color)),
                ]));
                first = false;
            } else {
                lines.push(Line::from(Span::styled(
                    format!("{CONTINUATION_INDENT}{content_line}"),
                    Style::default().fg(content_color),
                )));
            }
        }
        // A message can be attachments-only with empty content.
        if first {
            lines.push(Line::from(Span::styled(
                label,
                Style::default().fg(label_color).add_modifier(Modifier::BOLD),
            )));
        }

        if !msg.attachments.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{CONTINUATION_INDENT}Attachments:"),
                Style::default().fg(theme.fg_dim),
            )));
            for attachment in &msg.attachments {
                lines.push(Line::from(Span::styled(
                    format!("{CONTINUATION_INDENT}📎 {}", attachment_summary(attachment)),
                    Style::default().fg(theme.attachment),
                )));
            }
        }
    }

    if app.awaiting() {
        let frame_idx = (app.spinner_tick as usize / 2) % TYPING.len();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "Neurago: ",
                Style::default()
                    .fg(theme.assistant_label)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(TYPING[frame_idx], Style::default().fg(theme.typing)),
        ]));
    }

    // Clamp scroll so the view sticks to the bottom on new messages.
    let content_height = lines.len() as u16;
    let visible_height = area.height.saturating_sub(2);
    let max_scroll = content_height.saturating_sub(visible_height);
    let scroll = app.transcript_scroll.min(max_scroll);
    app.transcript_scroll = scroll;

    let transcript = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(transcript, area);
    app.transcript_area = Some(area);
}

/// Centered welcome state for an empty transcript.
fn render_welcome(app: &TuiApp, frame: &mut Frame<'_>, area: Rect) {
    let theme = app.theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let centered = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .split(inner);

    let text = Text::from(vec![
        Line::from(Span::styled(
            "Welcome to Neurago Chat",
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Start a conversation by typing a message below.",
            Style::default().fg(theme.fg_dim),
        )),
    ]);

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        centered[0],
    );
}

/// Formats one attachment as `name (size KB)` with one decimal place.
pub fn attachment_summary(attachment: &AttachmentRef) -> String {
    format!(
        "{} ({:.1} KB)",
        attachment.name,
        attachment.size as f64 / 1024.0
    )
}
