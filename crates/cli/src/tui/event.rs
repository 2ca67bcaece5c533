//! Async event loop for the TUI — interleaves crossterm input, the
//! in-flight send task, and the animation timer.

use std::sync::Arc;

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use proto::{Message, SendError};
use ratatui::layout::Position;
use ratatui::{Terminal, backend::CrosstermBackend};
use session::BackendSender;
use tracing::debug;

use super::app::TuiApp;
use super::sidebar;

/// RAII guard that restores the terminal on drop (even on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

/// Run the full-screen TUI until the user quits.
pub async fn run_tui(mut app: TuiApp, sender: Arc<dyn BackendSender>) -> anyhow::Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard; // Drop restores terminal

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    debug!(session = %app.session.id(), "TUI started");

    // Crossterm event stream (async)
    let mut crossterm_stream = EventStream::new();

    // At most one send task may be in flight; the session's awaiting
    // derivation rejects further submissions while it runs.
    let mut send_task: Option<tokio::task::JoinHandle<Result<Message, SendError>>> = None;

    // Animation tick interval (100ms)
    let mut spinner_interval = tokio::time::interval(std::time::Duration::from_millis(100));
    spinner_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        // Render
        terminal.draw(|frame| app.render(frame))?;

        // Event select
        tokio::select! {
            // Branch 1: crossterm terminal events
            maybe_event = crossterm_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        use crossterm::event::KeyCode;
                        let composer_enter = key.code == KeyCode::Enter
                            && !app.ui.dialog_open
                            && !app.ui.sidebar_focused;
                        if composer_enter {
                            if app.awaiting() {
                                continue;
                            }
                            let text = app.take_input();
                            if app.handle_slash_command(&text) {
                                debug!(command = %text, "Slash command dispatched");
                                continue;
                            }
                            app.session.set_draft(text);
                            if let Some(request) = app.session.begin_submit() {
                                app.scroll_to_bottom();
                                let sender = Arc::clone(&sender);
                                send_task = Some(tokio::spawn(async move {
                                    sender.send(request).await
                                }));
                            }
                        } else {
                            app.handle_key(key);
                        }
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        let pos = Position::new(mouse.column, mouse.row);

                        // ── Sidebar mouse handling ───────────────────────
                        if let Some(sb_area) = app.sidebar_area
                            && app.ui.sidebar_visible
                        {
                            let entry_count = app.sidebar_entries().len();
                            match mouse.kind {
                                MouseEventKind::Down(MouseButton::Left) => {
                                    if sb_area.contains(pos)
                                        && let Some(idx) = sidebar::entry_index_at(
                                            sb_area,
                                            mouse.row,
                                            entry_count,
                                            app.ui.sidebar_scroll,
                                        )
                                    {
                                        app.activate_sidebar_entry(idx);
                                    }
                                }
                                MouseEventKind::Moved => {
                                    if sb_area.contains(pos) {
                                        app.ui.sidebar_hover = sidebar::entry_index_at(
                                            sb_area,
                                            mouse.row,
                                            entry_count,
                                            app.ui.sidebar_scroll,
                                        );
                                    } else {
                                        app.ui.sidebar_hover = None;
                                    }
                                }
                                MouseEventKind::ScrollDown if sb_area.contains(pos) => {
                                    app.ui.sidebar_scroll =
                                        app.ui.sidebar_scroll.saturating_add(1);
                                }
                                MouseEventKind::ScrollUp if sb_area.contains(pos) => {
                                    app.ui.sidebar_scroll =
                                        app.ui.sidebar_scroll.saturating_sub(1);
                                }
                                _ => {}
                            }
                        }

                        // ── Transcript wheel scrolling ───────────────────
                        if let Some(chat_area) = app.transcript_area {
                            match mouse.kind {
                                MouseEventKind::ScrollDown if chat_area.contains(pos) => {
                                    app.transcript_scroll =
                                        app.transcript_scroll.saturating_add(3);
                                }
                                MouseEventKind::ScrollUp if chat_area.contains(pos) => {
                                    app.transcript_scroll =
                                        app.transcript_scroll.saturating_sub(3);
                                }
                                _ => {}
                            }
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Terminal will redraw on next loop iteration
                    }
                    Some(Err(_)) | None => {
                        break; // stream ended or error
                    }
                    _ => {}
                }
            }

            // Branch 2: send task completed
            result = async {
                match send_task.as_mut() {
                    Some(handle) => handle.await,
                    None => std::future::pending().await,
                }
            } => {
                match result {
                    Ok(inner) => {
                        debug!(success = %inner.is_ok(), "Send task completed");
                        app.session.complete_submit(inner);
                    }
                    Err(join_err) => {
                        app.session.complete_submit(Err(SendError::Api(format!(
                            "Send task panicked: {join_err}"
                        ))));
                    }
                }
                app.scroll_to_bottom();
                send_task = None;
            }

            _ = spinner_interval.tick(), if app.awaiting() => {
                app.spinner_tick = app.spinner_tick.wrapping_add(1);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // TerminalGuard::drop handles cleanup
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_guard_drop_path_is_safe() {
        let guard = TerminalGuard;
        drop(guard);
    }
}
