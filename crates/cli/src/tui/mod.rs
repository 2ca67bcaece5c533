//! Full-screen ratatui terminal user interface for neurago.

pub mod app;
pub mod chat;
pub mod composer;
pub mod event;
pub mod login;
pub mod sidebar;
pub mod status;
pub mod theme;

pub use event::run_tui;
