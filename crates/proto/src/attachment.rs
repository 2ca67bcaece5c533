use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Advisory picker filter for file staging. Matches nothing at the staging
/// boundary itself; any readable path can be staged.
pub const ACCEPT_FILTER: &str = "image/*,.pdf,.doc,.docx,.txt";

/// Metadata describing a file attached to a message. Carries no file bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Display name of the file.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type of the file.
    #[serde(rename = "type")]
    pub mime: String,
}

/// A user-selected file held in the session until the next submission
/// converts it into an [`AttachmentRef`] and discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    /// Path the file was staged from.
    pub path: PathBuf,
    /// Display name of the file.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type derived from the file extension.
    pub mime: String,
}

impl StagedFile {
    /// Creates a staged file from raw parts. The path is taken from `name`.
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            size,
            mime: mime.into(),
        }
    }

    /// Stages the file at `path`, reading its size from the filesystem.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
            mime: mime_for_path(path).to_string(),
        })
    }

    /// Converts this staged file into the descriptor stored on a message.
    pub fn to_attachment_ref(&self) -> AttachmentRef {
        AttachmentRef {
            name: self.name.clone(),
            size: self.size,
            mime: self.mime.clone(),
        }
    }
}

/// Derives a MIME type from the file extension. Unknown extensions fall back
/// to `application/octet-stream`.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Returns `true` when the path falls inside [`ACCEPT_FILTER`]. Advisory
/// only; staging never rejects on this.
pub fn matches_accept_filter(path: &Path) -> bool {
    let mime = mime_for_path(path);
    mime.starts_with("image/")
        || matches!(
            mime,
            "application/pdf"
                | "application/msword"
                | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                | "text/plain"
        )
}
