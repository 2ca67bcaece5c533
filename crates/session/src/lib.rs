//! Chat session core: the in-memory session state machine and the backend
//! sender seam it delegates message delivery to.
//!
//! The session is owned exclusively by one task. The only suspension point
//! is the sender call, and at most one submission may be in flight at a
//! time, derived from the latest request record.

pub mod sender;
pub mod session;

pub use sender::{BackendSender, PlaceholderSender, SendRequest};
pub use session::{ChatSession, ERROR_REPLY, RequestRecord, RequestState};
