//! Backend sender abstraction and the shipped placeholder implementation.

use std::time::Duration;

use async_trait::async_trait;
use proto::{Message, SendError, SessionId, StagedFile};
use tracing::debug;

/// Reply text produced by [`PlaceholderSender`] until a real backend is
/// integrated.
pub const PLACEHOLDER_REPLY: &str = "Backend integration pending. This is a placeholder response.";

/// Default artificial delay before the placeholder reply resolves.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

/// One outbound submission handed to a sender: the draft text plus the
/// staged file handles as they were at submit time.
#[derive(Debug, Clone)]
pub struct SendRequest {
    /// Session the submission belongs to.
    pub session_id: SessionId,
    /// Draft text, verbatim.
    pub text: String,
    /// Staged files attached to the submission.
    pub files: Vec<StagedFile>,
}

/// The external collaborator that produces a reply to a user message.
///
/// This is the only real boundary in the system; the session logic is
/// written against this trait so it stays testable without a live
/// integration.
#[async_trait]
pub trait BackendSender: Send + Sync {
    /// Produces a reply [`Message`] for the given submission.
    async fn send(&self, req: SendRequest) -> Result<Message, SendError>;
}

/// Stub sender pending real backend integration. Always succeeds after a
/// fixed delay with a constant reply; performs no inference.
pub struct PlaceholderSender {
    delay: Duration,
}

impl PlaceholderSender {
    /// Creates a placeholder sender with the default reply delay.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEFAULT_REPLY_DELAY_MS))
    }

    /// Creates a placeholder sender with a custom reply delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for PlaceholderSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendSender for PlaceholderSender {
    async fn send(&self, req: SendRequest) -> Result<Message, SendError> {
        debug!(
            session = %req.session_id,
            text_len = req.text.len(),
            files = req.files.len(),
            "Placeholder sender invoked"
        );
        tokio::time::sleep(self.delay).await;
        Ok(Message::assistant(PLACEHOLDER_REPLY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::Role;

    #[tokio::test]
    async fn placeholder_sender_returns_constant_reply() {
        let sender = PlaceholderSender::with_delay(Duration::from_millis(1));
        let reply = sender
            .send(SendRequest {
                session_id: SessionId::new(),
                text: "hello".to_string(),
                files: Vec::new(),
            })
            .await
            .expect("placeholder always succeeds");
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, PLACEHOLDER_REPLY);
        assert!(reply.attachments.is_empty());
    }

    #[tokio::test]
    async fn placeholder_sender_ignores_files() {
        let sender = PlaceholderSender::with_delay(Duration::from_millis(1));
        let reply = sender
            .send(SendRequest {
                session_id: SessionId::new(),
                text: String::new(),
                files: vec![StagedFile::new("report.pdf", 2048, "application/pdf")],
            })
            .await
            .expect("placeholder always succeeds");
        assert_eq!(reply.content, PLACEHOLDER_REPLY);
    }
}
