//! The chat session state machine.

use chrono::{DateTime, Utc};
use proto::{Message, SendError, SessionId, StagedFile};
use tracing::{debug, info, warn};

use crate::sender::{BackendSender, SendRequest};

/// Fixed assistant reply shown when the backend sender fails. Every sender
/// error collapses to this at the submission boundary.
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

/// Lifecycle of one outbound submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Submitted, reply not yet received.
    Pending,
    /// Reply received and appended.
    Fulfilled,
    /// Sender failed; the fixed error reply was appended instead.
    Failed,
}

/// Bookkeeping record for one outbound submission. Records are retained for
/// the life of the session and are not part of the transcript.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Current lifecycle state.
    pub state: RequestState,
    /// When the submission was made.
    pub submitted_at: DateTime<Utc>,
}

/// In-memory chat session: the append-only transcript, the draft text, the
/// staged files, and the outbound request records.
///
/// All state is lost on exit; nothing here persists.
pub struct ChatSession {
    session_id: SessionId,
    messages: Vec<Message>,
    draft: String,
    staged: Vec<StagedFile>,
    requests: Vec<RequestRecord>,
}

impl ChatSession {
    /// Creates an empty session with a fresh id.
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Creates an empty session with the given id.
    pub fn with_id(session_id: SessionId) -> Self {
        Self {
            session_id,
            messages: Vec::new(),
            draft: String::new(),
            staged: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &SessionId {
        &self.session_id
    }

    /// Transcript in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Staged files in staging order.
    pub fn staged_files(&self) -> &[StagedFile] {
        &self.staged
    }

    /// Outbound request records, oldest first.
    pub fn requests(&self) -> &[RequestRecord] {
        &self.requests
    }

    /// Whether a submission is in flight. Derived from the latest request
    /// record; new submissions are rejected while this holds.
    pub fn awaiting_response(&self) -> bool {
        matches!(
            self.requests.last(),
            Some(RequestRecord {
                state: RequestState::Pending,
                ..
            })
        )
    }

    /// Stages a file for the next submission. Unbounded; no size or type
    /// validation (the accept filter is advisory only).
    pub fn stage_file(&mut self, file: StagedFile) {
        debug!(session = %self.session_id, name = %file.name, size = file.size, "File staged");
        self.staged.push(file);
    }

    /// Removes one staged file by position. Out-of-range indices are a
    /// no-op.
    pub fn unstage_file(&mut self, index: usize) {
        if index < self.staged.len() {
            let removed = self.staged.remove(index);
            debug!(session = %self.session_id, name = %removed.name, "File unstaged");
        }
    }

    /// Resets the transcript to empty. Draft text and staged files are
    /// untouched, as are the request records.
    pub fn clear_session(&mut self) {
        info!(session = %self.session_id, cleared = self.messages.len(), "Session cleared");
        self.messages.clear();
    }

    /// Starts a submission: appends the user message built from the draft
    /// and the staged attachment descriptors, records a pending request,
    /// and takes the draft.
    ///
    /// Returns `None` without any effect when a submission is already in
    /// flight or when the trimmed draft is empty and nothing is staged.
    /// The returned request carries the untrimmed draft and the staged
    /// handles; staged files clear when the submission completes.
    pub fn begin_submit(&mut self) -> Option<SendRequest> {
        if self.awaiting_response() {
            debug!(session = %self.session_id, "Submit rejected: awaiting response");
            return None;
        }
        if self.draft.trim().is_empty() && self.staged.is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        let attachments = self.staged.iter().map(StagedFile::to_attachment_ref).collect();
        self.messages
            .push(Message::user_with_attachments(text.clone(), attachments));
        self.requests.push(RequestRecord {
            state: RequestState::Pending,
            submitted_at: Utc::now(),
        });
        debug!(
            session = %self.session_id,
            text_len = text.len(),
            files = self.staged.len(),
            "Submission started"
        );

        Some(SendRequest {
            session_id: self.session_id.clone(),
            text,
            files: self.staged.clone(),
        })
    }

    /// Finishes the in-flight submission with the sender's result. Appends
    /// the reply on success or the fixed error reply on failure, then
    /// clears the staged files. Either way the session returns to idle.
    pub fn complete_submit(&mut self, result: Result<Message, SendError>) {
        let state = match result {
            Ok(reply) => {
                self.messages.push(reply);
                RequestState::Fulfilled
            }
            Err(err) => {
                warn!(session = %self.session_id, error = %err, "Send failed");
                self.messages.push(Message::assistant(ERROR_REPLY));
                RequestState::Failed
            }
        };
        if let Some(record) = self.requests.last_mut() {
            record.state = state;
        }
        self.staged.clear();
    }

    /// Runs one full submission against the given sender. No error
    /// propagates past this; sender failures become the fixed error reply.
    ///
    /// Returns `false` when the submission preconditions were not met and
    /// the sender was never invoked.
    pub async fn submit(&mut self, sender: &dyn BackendSender) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = sender.send(request).await;
        self.complete_submit(result);
        true
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
