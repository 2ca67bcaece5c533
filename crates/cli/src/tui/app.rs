//! TUI application state, input handling, and frame orchestration.

use std::path::PathBuf;

use proto::StagedFile;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Block,
};
use session::ChatSession;
use tracing::debug;

use super::theme::{Theme, theme_for};
use super::{chat, composer, login, sidebar, status};
use crate::config::{Config, ThemeChoice};

/// One-line usage summary shown by `/help`.
const HELP_NOTICE: &str =
    "Commands: /attach <path>  /detach <n>  /new  /theme  /login  /logout  /help  /quit";

/// View state, separate from the session: theme, sidebar, login, dialog.
/// Every frame is recomputed from this plus the session.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Active theme token set.
    pub theme: ThemeChoice,
    /// Whether the sidebar panel is shown.
    pub sidebar_visible: bool,
    /// Whether keyboard focus is on the sidebar.
    pub sidebar_focused: bool,
    /// Keyboard cursor position within the sidebar entries.
    pub sidebar_cursor: usize,
    /// Vertical scroll offset for the sidebar.
    pub sidebar_scroll: u16,
    /// Entry index the mouse is hovering over.
    pub sidebar_hover: Option<usize>,
    /// Placeholder login flag; flipped by the sign-in dialog.
    pub logged_in: bool,
    /// Whether the profile entry is expanded.
    pub profile_open: bool,
    /// Whether the sign-in dialog is shown.
    pub dialog_open: bool,
    /// Keyboard cursor position within the dialog options.
    pub dialog_cursor: usize,
}

/// One actionable entry in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    /// Clears the session transcript.
    NewChat,
    /// Placeholder; shows a notice.
    ContactUs,
    /// Placeholder; shows a notice.
    Services,
    /// Opens the sign-in dialog (shown while logged out).
    SignIn,
    /// Expands to theme/logout entries (shown while logged in).
    Profile,
    /// Toggles the theme (under the expanded profile).
    ChangeTheme,
    /// Flips the login flag back (under the expanded profile).
    LogOut,
}

impl SidebarEntry {
    /// Display label for this entry.
    pub fn label(&self) -> &'static str {
        match self {
            SidebarEntry::NewChat => "+ New Chat",
            SidebarEntry::ContactUs => "Contact Us",
            SidebarEntry::Services => "Services",
            SidebarEntry::SignIn => "Sign In",
            SidebarEntry::Profile => "Profile",
            SidebarEntry::ChangeTheme => "Change Theme",
            SidebarEntry::LogOut => "Log Out",
        }
    }
}

/// A slash command typed into the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Stage the file at the given path.
    Attach(PathBuf),
    /// Unstage by 1-based position.
    Detach(usize),
    /// Clear the session transcript.
    New,
    /// Toggle the theme.
    Theme,
    /// Open the sign-in dialog.
    Login,
    /// Log out.
    Logout,
    /// Show the command summary.
    Help,
    /// Quit the application.
    Quit,
    /// Recognised as a command but unusable; carries the notice to show.
    Invalid(String),
}

/// Parses composer input as a slash command. Returns `None` for ordinary
/// message text.
pub fn parse_slash_command(raw: &str) -> Option<SlashCommand> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let cmd = match (head, arg) {
        ("/attach", Some(path)) => SlashCommand::Attach(PathBuf::from(path)),
        ("/attach", None) => SlashCommand::Invalid("Usage: /attach <path>".to_string()),
        ("/detach", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => SlashCommand::Detach(n),
            _ => SlashCommand::Invalid("Usage: /detach <n> (1-based)".to_string()),
        },
        ("/detach", None) => SlashCommand::Invalid("Usage: /detach <n> (1-based)".to_string()),
        ("/new", _) => SlashCommand::New,
        ("/theme", _) => SlashCommand::Theme,
        ("/login", _) => SlashCommand::Login,
        ("/logout", _) => SlashCommand::Logout,
        ("/help", _) => SlashCommand::Help,
        ("/quit", _) => SlashCommand::Quit,
        (other, _) => SlashCommand::Invalid(format!("Unknown command: {other}. Try /help.")),
    };
    Some(cmd)
}

/// Full state for one TUI run.
pub struct TuiApp {
    /// The chat session being rendered and driven.
    pub session: ChatSession,
    /// View state.
    pub ui: UiState,
    /// Current text typed in the composer (not yet submitted).
    pub input: String,
    /// Cursor position within `input` (byte offset).
    pub cursor_pos: usize,
    /// Vertical scroll offset for the transcript.
    pub transcript_scroll: u16,
    /// Spinner/typing animation tick counter.
    pub spinner_tick: u8,
    /// Whether the user requested exit.
    pub should_quit: bool,
    /// Transient one-line notice shown in the status bar.
    pub notice: Option<String>,
    /// Crate version shown in the status bar.
    pub version: &'static str,
    /// Sidebar area from the last render, for mouse hit-testing.
    pub sidebar_area: Option<Rect>,
    /// Transcript area from the last render, for wheel scrolling.
    pub transcript_area: Option<Rect>,
}

impl TuiApp {
    /// Creates TUI state around a session, seeded from config preferences.
    pub fn new(session: ChatSession, config: &Config) -> Self {
        Self {
            session,
            ui: UiState {
                theme: config.ui.theme,
                sidebar_visible: config.ui.sidebar_open,
                ..UiState::default()
            },
            input: String::new(),
            cursor_pos: 0,
            transcript_scroll: 0,
            spinner_tick: 0,
            should_quit: false,
            notice: None,
            version: env!("CARGO_PKG_VERSION"),
            sidebar_area: None,
            transcript_area: None,
        }
    }

    /// Active theme token set.
    pub fn theme(&self) -> &'static Theme {
        theme_for(self.ui.theme)
    }

    /// Whether a submission is in flight.
    pub fn awaiting(&self) -> bool {
        self.session.awaiting_response()
    }

    /// Sidebar entries in display order for the current login state.
    pub fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        let mut entries = vec![
            SidebarEntry::NewChat,
            SidebarEntry::ContactUs,
            SidebarEntry::Services,
        ];
        if self.ui.logged_in {
            entries.push(SidebarEntry::Profile);
            if self.ui.profile_open {
                entries.push(SidebarEntry::ChangeTheme);
                entries.push(SidebarEntry::LogOut);
            }
        } else {
            entries.push(SidebarEntry::SignIn);
        }
        entries
    }

    /// Take the current input and reset it.
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    /// Ensure scroll is at the bottom (for auto-scroll on new messages).
    pub fn scroll_to_bottom(&mut self) {
        // Set to a large value; the chat widget clamps it to max_scroll.
        self.transcript_scroll = u16::MAX;
    }

    /// Sets the one-line status notice.
    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
    }

    // ── Actions ──────────────────────────────────────────────

    /// Activates a sidebar entry by index into [`Self::sidebar_entries`].
    pub fn activate_sidebar_entry(&mut self, index: usize) {
        let Some(entry) = self.sidebar_entries().get(index).copied() else {
            return;
        };
        debug!(entry = entry.label(), "Sidebar entry activated");
        match entry {
            SidebarEntry::NewChat => {
                self.session.clear_session();
                self.scroll_to_bottom();
            }
            SidebarEntry::ContactUs => {
                self.set_notice("Contact Us is not available yet.");
            }
            SidebarEntry::Services => {
                self.set_notice("Services are not available yet.");
            }
            SidebarEntry::SignIn => {
                self.ui.dialog_open = true;
                self.ui.dialog_cursor = 0;
            }
            SidebarEntry::Profile => {
                self.ui.profile_open = !self.ui.profile_open;
            }
            SidebarEntry::ChangeTheme => {
                self.ui.theme = self.ui.theme.toggled();
                self.ui.profile_open = false;
            }
            SidebarEntry::LogOut => {
                self.ui.logged_in = false;
                self.ui.profile_open = false;
            }
        }
        // Expanding/collapsing can shrink the list; keep the cursor valid.
        let count = self.sidebar_entries().len();
        if self.ui.sidebar_cursor >= count {
            self.ui.sidebar_cursor = count.saturating_sub(1);
        }
    }

    /// Activates the focused sign-in dialog option.
    fn activate_dialog_option(&mut self) {
        if self.ui.dialog_cursor == 0 {
            // Real OAuth is pending integration; flip the flag and move on.
            self.ui.logged_in = true;
            debug!("Placeholder sign-in accepted");
        }
        self.ui.dialog_open = false;
    }

    /// Dispatches a slash command. Returns `true` when `raw` was a slash
    /// command and was consumed.
    pub fn handle_slash_command(&mut self, raw: &str) -> bool {
        let Some(cmd) = parse_slash_command(raw) else {
            return false;
        };
        match cmd {
            SlashCommand::Attach(path) => match StagedFile::from_path(&path) {
                Ok(file) => {
                    self.set_notice(format!(
                        "Attached {} ({:.1} KB)",
                        file.name,
                        file.size as f64 / 1024.0
                    ));
                    self.session.stage_file(file);
                }
                Err(e) => {
                    self.set_notice(format!("Could not attach {}: {e}", path.display()));
                }
            },
            SlashCommand::Detach(n) => {
                if n <= self.session.staged_files().len() {
                    self.session.unstage_file(n - 1);
                } else {
                    self.set_notice(format!("No staged file #{n}"));
                }
            }
            SlashCommand::New => {
                self.session.clear_session();
                self.scroll_to_bottom();
            }
            SlashCommand::Theme => {
                self.ui.theme = self.ui.theme.toggled();
                self.ui.profile_open = false;
            }
            SlashCommand::Login => {
                if self.ui.logged_in {
                    self.set_notice("Already signed in.");
                } else {
                    self.ui.dialog_open = true;
                    self.ui.dialog_cursor = 0;
                }
            }
            SlashCommand::Logout => {
                if self.ui.logged_in {
                    self.ui.logged_in = false;
                    self.ui.profile_open = false;
                } else {
                    self.set_notice("Not signed in.");
                }
            }
            SlashCommand::Help => {
                self.set_notice(HELP_NOTICE);
            }
            SlashCommand::Quit => {
                self.should_quit = true;
            }
            SlashCommand::Invalid(message) => {
                self.set_notice(message);
            }
        }
        true
    }

    // ── Input handling ───────────────────────────────────────

    /// Handle a keyboard event. Enter on the composer is handled by the
    /// event loop, which owns the send task; everything else lands here.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        self.notice = None;

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.ui.dialog_open {
            match key.code {
                KeyCode::Up => self.ui.dialog_cursor = self.ui.dialog_cursor.saturating_sub(1),
                KeyCode::Down => self.ui.dialog_cursor = (self.ui.dialog_cursor + 1).min(1),
                KeyCode::Enter => self.activate_dialog_option(),
                KeyCode::Esc => self.ui.dialog_open = false,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                if self.ui.sidebar_visible && self.ui.sidebar_focused {
                    self.ui.sidebar_visible = false;
                    self.ui.sidebar_focused = false;
                    self.ui.sidebar_hover = None;
                } else {
                    self.ui.sidebar_visible = true;
                    self.ui.sidebar_focused = true;
                }
                return;
            }
            KeyCode::Esc => {
                if self.ui.sidebar_visible {
                    self.ui.sidebar_visible = false;
                    self.ui.sidebar_focused = false;
                    self.ui.sidebar_hover = None;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        if self.ui.sidebar_focused {
            let count = self.sidebar_entries().len();
            match key.code {
                KeyCode::Up => {
                    self.ui.sidebar_cursor = self.ui.sidebar_cursor.saturating_sub(1);
                }
                KeyCode::Down => {
                    self.ui.sidebar_cursor = (self.ui.sidebar_cursor + 1).min(count - 1);
                }
                KeyCode::Enter => self.activate_sidebar_entry(self.ui.sidebar_cursor),
                _ => {}
            }
            return;
        }

        let idle = !self.awaiting();
        match key.code {
            KeyCode::Char(c) if idle => {
                self.input.insert(self.cursor_pos, c);
                self.cursor_pos += c.len_utf8();
            }
            KeyCode::Backspace if idle => {
                if self.cursor_pos > 0 {
                    // Find the previous character boundary
                    let prev = self.input[..self.cursor_pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.drain(prev..self.cursor_pos);
                    self.cursor_pos = prev;
                }
            }
            KeyCode::Left if idle => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = self.input[..self.cursor_pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            KeyCode::Right if idle => {
                if self.cursor_pos < self.input.len() {
                    self.cursor_pos = self.input[self.cursor_pos..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor_pos + i)
                        .unwrap_or(self.input.len());
                }
            }
            KeyCode::Up => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.transcript_scroll = self.transcript_scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.transcript_scroll = self.transcript_scroll.saturating_add(10);
            }
            _ => {}
        }
    }

    // ── Rendering ────────────────────────────────────────────

    /// Render the entire TUI into the given frame.
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let theme = self.theme();

        frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

        let (sidebar_area, main_area) = if self.ui.sidebar_visible {
            let chunks = Layout::horizontal([
                Constraint::Length(sidebar::sidebar_width()),
                Constraint::Min(0),
            ])
            .split(area);
            (Some(chunks[0]), chunks[1])
        } else {
            (None, area)
        };
        self.sidebar_area = sidebar_area;

        // Main column: transcript | chips (optional) | input | status
        let chips_height = composer::chips_height(self);
        let chunks = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(chips_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(main_area);

        chat::render(self, frame, chunks[0]);
        composer::render(self, frame, chunks[1], chunks[2]);
        status::render(self, frame, chunks[3]);

        if let Some(sb_area) = sidebar_area {
            sidebar::render(self, frame, sb_area);
        }

        if self.ui.dialog_open {
            login::render(self, frame, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn make_app() -> TuiApp {
        TuiApp::new(ChatSession::new(), &Config::default())
    }

    fn press(app: &mut TuiApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_inserts_chars_at_cursor() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.input, "hi");
        assert_eq!(app.cursor_pos, 2);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input, "hei");
    }

    #[test]
    fn typing_ignored_while_awaiting() {
        let mut app = make_app();
        app.session.set_draft("msg");
        app.session.begin_submit().expect("submission starts");
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input, "");
    }

    #[test]
    fn backspace_handles_multibyte_boundaries() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('é'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "a");
        assert_eq!(app.cursor_pos, 1);
    }

    #[test]
    fn tab_toggles_sidebar_and_focus() {
        let mut app = make_app();
        assert!(!app.ui.sidebar_visible);
        press(&mut app, KeyCode::Tab);
        assert!(app.ui.sidebar_visible);
        assert!(app.ui.sidebar_focused);
        press(&mut app, KeyCode::Tab);
        assert!(!app.ui.sidebar_visible);
    }

    #[test]
    fn esc_closes_dialog_then_sidebar_then_quits() {
        let mut app = make_app();
        app.ui.sidebar_visible = true;
        app.ui.dialog_open = true;

        press(&mut app, KeyCode::Esc);
        assert!(!app.ui.dialog_open);
        assert!(app.ui.sidebar_visible);

        press(&mut app, KeyCode::Esc);
        assert!(!app.ui.sidebar_visible);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_even_while_awaiting() {
        let mut app = make_app();
        app.session.set_draft("msg");
        app.session.begin_submit().expect("submission starts");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn sidebar_entries_follow_login_state() {
        let mut app = make_app();
        assert_eq!(
            app.sidebar_entries(),
            vec![
                SidebarEntry::NewChat,
                SidebarEntry::ContactUs,
                SidebarEntry::Services,
                SidebarEntry::SignIn,
            ]
        );

        app.ui.logged_in = true;
        app.ui.profile_open = true;
        assert_eq!(
            app.sidebar_entries(),
            vec![
                SidebarEntry::NewChat,
                SidebarEntry::ContactUs,
                SidebarEntry::Services,
                SidebarEntry::Profile,
                SidebarEntry::ChangeTheme,
                SidebarEntry::LogOut,
            ]
        );
    }

    #[test]
    fn sign_in_dialog_marks_logged_in_on_google_option() {
        let mut app = make_app();
        app.activate_sidebar_entry(3); // Sign In
        assert!(app.ui.dialog_open);

        press(&mut app, KeyCode::Enter);
        assert!(app.ui.logged_in);
        assert!(!app.ui.dialog_open);
    }

    #[test]
    fn sign_in_dialog_cancel_leaves_logged_out() {
        let mut app = make_app();
        app.ui.dialog_open = true;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(!app.ui.logged_in);
        assert!(!app.ui.dialog_open);
    }

    #[test]
    fn new_chat_entry_clears_session() {
        let mut app = make_app();
        app.session.set_draft("hello");
        app.session.begin_submit().expect("submission starts");
        app.session
            .complete_submit(Ok(proto::Message::assistant("hi")));
        assert_eq!(app.session.messages().len(), 2);

        app.activate_sidebar_entry(0);
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn change_theme_entry_toggles_and_collapses_profile() {
        let mut app = make_app();
        app.ui.logged_in = true;
        app.ui.profile_open = true;
        app.activate_sidebar_entry(4); // Change Theme
        assert_eq!(app.ui.theme, ThemeChoice::Light);
        assert!(!app.ui.profile_open);
    }

    #[test]
    fn log_out_entry_flips_flag() {
        let mut app = make_app();
        app.ui.logged_in = true;
        app.ui.profile_open = true;
        app.activate_sidebar_entry(5); // Log Out
        assert!(!app.ui.logged_in);
        assert!(!app.ui.profile_open);
    }

    #[test]
    fn parse_slash_command_covers_grammar() {
        assert_eq!(parse_slash_command("hello"), None);
        assert_eq!(
            parse_slash_command("/attach /tmp/a.pdf"),
            Some(SlashCommand::Attach(PathBuf::from("/tmp/a.pdf")))
        );
        assert_eq!(parse_slash_command("/detach 2"), Some(SlashCommand::Detach(2)));
        assert_eq!(parse_slash_command("/new"), Some(SlashCommand::New));
        assert_eq!(parse_slash_command("/quit"), Some(SlashCommand::Quit));
        assert!(matches!(
            parse_slash_command("/attach"),
            Some(SlashCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_slash_command("/detach 0"),
            Some(SlashCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_slash_command("/frobnicate"),
            Some(SlashCommand::Invalid(_))
        ));
    }

    #[test]
    fn slash_detach_unstages_one_based() {
        let mut app = make_app();
        app.session
            .stage_file(StagedFile::new("a.txt", 1, "text/plain"));
        app.session
            .stage_file(StagedFile::new("b.txt", 2, "text/plain"));

        assert!(app.handle_slash_command("/detach 1"));
        assert_eq!(app.session.staged_files().len(), 1);
        assert_eq!(app.session.staged_files()[0].name, "b.txt");

        assert!(app.handle_slash_command("/detach 9"));
        assert_eq!(app.session.staged_files().len(), 1);
        assert!(app.notice.is_some());
    }

    #[test]
    fn slash_attach_stages_a_readable_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "content").expect("write file");

        let mut app = make_app();
        assert!(app.handle_slash_command(&format!("/attach {}", path.display())));
        assert_eq!(app.session.staged_files().len(), 1);
        assert_eq!(app.session.staged_files()[0].name, "doc.txt");
    }

    #[test]
    fn slash_attach_missing_file_sets_notice_only() {
        let mut app = make_app();
        assert!(app.handle_slash_command("/attach /nonexistent/missing.pdf"));
        assert!(app.session.staged_files().is_empty());
        assert!(app.notice.as_deref().unwrap_or("").contains("Could not attach"));
    }

    #[test]
    fn unknown_command_sets_notice() {
        let mut app = make_app();
        assert!(app.handle_slash_command("/frobnicate"));
        assert!(app.notice.as_deref().unwrap_or("").contains("Unknown command"));
    }

    #[test]
    fn take_input_resets() {
        let mut app = make_app();
        app.input = "hello".into();
        app.cursor_pos = 5;
        let taken = app.take_input();
        assert_eq!(taken, "hello");
        assert_eq!(app.input, "");
        assert_eq!(app.cursor_pos, 0);
    }

    #[test]
    fn scroll_to_bottom_sets_max() {
        let mut app = make_app();
        app.scroll_to_bottom();
        assert_eq!(app.transcript_scroll, u16::MAX);
    }
}
