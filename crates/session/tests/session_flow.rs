//! End-to-end submission flows through the sender seam.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use proto::{Message, Role, SendError, StagedFile};
use session::sender::PLACEHOLDER_REPLY;
use session::{BackendSender, ChatSession, ERROR_REPLY, PlaceholderSender, SendRequest};

/// Test double that always fails.
struct FailingSender;

#[async_trait]
impl BackendSender for FailingSender {
    async fn send(&self, _req: SendRequest) -> Result<Message, SendError> {
        Err(SendError::Api("simulated backend outage".to_string()))
    }
}

fn fast_sender() -> PlaceholderSender {
    PlaceholderSender::with_delay(Duration::from_millis(5))
}

#[tokio::test]
async fn text_submission_appends_user_then_assistant() {
    let mut session = ChatSession::new();
    session.set_draft("hello there");

    assert!(session.submit(&fast_sender()).await);

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "hello there");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, PLACEHOLDER_REPLY);
    assert!(!session.awaiting_response());
}

#[tokio::test]
async fn empty_submission_never_invokes_sender() {
    /// Sender that panics if reached.
    struct UnreachableSender;

    #[async_trait]
    impl BackendSender for UnreachableSender {
        async fn send(&self, _req: SendRequest) -> Result<Message, SendError> {
            panic!("sender must not be invoked for an empty submission");
        }
    }

    let mut session = ChatSession::new();
    session.set_draft("");
    assert!(!session.submit(&UnreachableSender).await);
    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn attachment_scenario_builds_descriptors_and_clears_staging() {
    let mut session = ChatSession::new();
    session.stage_file(StagedFile::new("report.pdf", 2048, "application/pdf"));
    session.set_draft("see attached");

    assert!(session.submit(&fast_sender()).await);

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "see attached");
    assert_eq!(messages[0].attachments.len(), 1);
    let attachment = &messages[0].attachments[0];
    assert_eq!(attachment.name, "report.pdf");
    assert_eq!(attachment.size, 2048);
    assert_eq!(attachment.mime, "application/pdf");

    assert_eq!(messages[1].role, Role::Assistant);
    assert!(session.staged_files().is_empty());
}

#[tokio::test]
async fn failing_sender_yields_fixed_error_reply() {
    let mut session = ChatSession::new();
    session.set_draft("will fail");

    assert!(session.submit(&FailingSender).await);

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, ERROR_REPLY);
    assert!(!session.awaiting_response());
    // Staged files are discarded on the failure path too.
    assert!(session.staged_files().is_empty());
}

#[tokio::test]
async fn sequential_submissions_after_resolution_are_accepted() {
    let sender = fast_sender();
    let mut session = ChatSession::new();

    session.set_draft("first");
    assert!(session.submit(&sender).await);
    session.set_draft("second");
    assert!(session.submit(&sender).await);

    assert_eq!(session.messages().len(), 4);
    assert_eq!(session.requests().len(), 2);
}

#[tokio::test]
async fn staging_from_disk_feeds_real_metadata_through_submission() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.txt");
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(b"meeting notes").expect("write file");

    let mut session = ChatSession::new();
    session.stage_file(StagedFile::from_path(&path).expect("stage file"));
    session.set_draft("from disk");

    assert!(session.submit(&fast_sender()).await);

    let attachment = &session.messages()[0].attachments[0];
    assert_eq!(attachment.name, "notes.txt");
    assert_eq!(attachment.size, 13);
    assert_eq!(attachment.mime, "text/plain");
}

#[tokio::test]
async fn clear_session_empties_transcript_after_activity() {
    let mut session = ChatSession::new();
    session.set_draft("one");
    session.submit(&fast_sender()).await;
    session.set_draft("two");
    session.submit(&fast_sender()).await;
    assert_eq!(session.messages().len(), 4);

    session.clear_session();
    assert!(session.messages().is_empty());
}
