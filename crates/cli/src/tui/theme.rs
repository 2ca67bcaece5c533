//! Theme token sets built on ratatui's Tailwind CSS palette.

use ratatui::style::Color;
use ratatui::style::palette::tailwind;

use crate::config::ThemeChoice;

/// One theme — all visual tokens in one place.
pub struct Theme {
    // ── Base ──
    /// Background color for the main application surface.
    pub bg: Color,
    /// Primary foreground/text color.
    pub fg: Color,
    /// Dimmed foreground for less prominent text.
    pub fg_dim: Color,
    /// Muted foreground for minimal-emphasis elements.
    pub fg_muted: Color,
    /// Default border color for panels and widgets.
    pub border: Color,
    /// Border color for the active/focused widget.
    pub border_active: Color,

    // ── Accent / Brand ──
    /// Primary accent/brand color.
    pub accent: Color,
    /// Color for error indicators.
    pub error: Color,

    // ── Chat roles ──
    /// Label color for user messages in chat.
    pub user_label: Color,
    /// Label color for assistant responses in chat.
    pub assistant_label: Color,
    /// Attachment chip and paperclip line color.
    pub attachment: Color,
    /// Typing indicator color while awaiting a reply.
    pub typing: Color,

    // ── Status bar ──
    /// Spinner animation color in the status bar.
    pub status_spinner: Color,
    /// Hint/keybinding text color in the status bar.
    pub status_hint: Color,
    /// Version text color in the status bar.
    pub status_version: Color,
    /// Transient notice text color in the status bar.
    pub notice: Color,

    // ── Sidebar ──
    /// Border around the sidebar panel.
    pub sidebar_border: Color,
    /// Cursor/selection indicator for sidebar entries.
    pub sidebar_cursor: Color,
    /// Hover highlight color for sidebar entries.
    pub sidebar_hover: Color,
    /// Entry text color in the sidebar.
    pub sidebar_text: Color,

    // ── Dialog ──
    /// Border around the sign-in dialog.
    pub dialog_border: Color,
    /// Selected-option marker in the dialog.
    pub dialog_selected: Color,
}

impl Theme {
    /// The dark token set (default).
    pub const fn dark() -> Self {
        Self {
            bg: tailwind::GRAY.c900,
            fg: tailwind::GRAY.c100,
            fg_dim: tailwind::GRAY.c400,
            fg_muted: tailwind::GRAY.c500,
            border: tailwind::GRAY.c700,
            border_active: tailwind::INDIGO.c400,

            accent: tailwind::INDIGO.c400,
            error: tailwind::RED.c500,

            user_label: tailwind::INDIGO.c400,
            assistant_label: tailwind::EMERALD.c400,
            attachment: tailwind::GRAY.c400,
            typing: tailwind::GRAY.c500,

            status_spinner: tailwind::AMBER.c400,
            status_hint: tailwind::GRAY.c500,
            status_version: tailwind::GRAY.c600,
            notice: tailwind::AMBER.c400,

            sidebar_border: tailwind::GRAY.c700,
            sidebar_cursor: tailwind::INDIGO.c400,
            sidebar_hover: tailwind::GRAY.c600,
            sidebar_text: tailwind::GRAY.c300,

            dialog_border: tailwind::INDIGO.c400,
            dialog_selected: tailwind::INDIGO.c400,
        }
    }

    /// The light token set.
    pub const fn light() -> Self {
        Self {
            bg: tailwind::GRAY.c100,
            fg: tailwind::GRAY.c900,
            fg_dim: tailwind::GRAY.c600,
            fg_muted: tailwind::GRAY.c500,
            border: tailwind::GRAY.c300,
            border_active: tailwind::INDIGO.c600,

            accent: tailwind::INDIGO.c600,
            error: tailwind::RED.c600,

            user_label: tailwind::INDIGO.c600,
            assistant_label: tailwind::EMERALD.c600,
            attachment: tailwind::GRAY.c600,
            typing: tailwind::GRAY.c500,

            status_spinner: tailwind::AMBER.c600,
            status_hint: tailwind::GRAY.c500,
            status_version: tailwind::GRAY.c400,
            notice: tailwind::AMBER.c600,

            sidebar_border: tailwind::GRAY.c300,
            sidebar_cursor: tailwind::INDIGO.c600,
            sidebar_hover: tailwind::GRAY.c400,
            sidebar_text: tailwind::GRAY.c700,

            dialog_border: tailwind::INDIGO.c600,
            dialog_selected: tailwind::INDIGO.c600,
        }
    }
}

/// Dark theme instance.
pub const DARK: Theme = Theme::dark();

/// Light theme instance.
pub const LIGHT: Theme = Theme::light();

/// Returns the token set for a theme choice.
pub fn theme_for(choice: ThemeChoice) -> &'static Theme {
    match choice {
        ThemeChoice::Dark => &DARK,
        ThemeChoice::Light => &LIGHT,
    }
}
