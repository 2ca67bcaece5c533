//! Shared chat types for the session core and the terminal client.
//!
//! This crate defines the serializable message/attachment structures and
//! strongly-typed error enums shared across the workspace.

pub mod attachment;
pub mod error;
pub mod message;

/// Re-export of all error types.
pub use error::*;
/// Re-export of attachment descriptor and staging types.
pub use attachment::{ACCEPT_FILTER, AttachmentRef, StagedFile, matches_accept_filter, mime_for_path};
/// Re-export of conversation/message identity types.
pub use message::{Message, Role, SessionId};
