//! File metadata records and the MIME vocabulary of the drive trie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FsError;
use crate::path::SEPARATOR_CHAR;

/// Mime type synthesised for directories in query results. Directories are
/// completely ephemeral; this type is never stored inside the trie.
pub const MIME_DRIVE_DIRECTORY: &str = "application/chainsafe-files-directory";
/// Mime type of stored internal trie nodes (branches and the empty-folder
/// placeholder).
pub const MIME_DRIVE_ENTRY: &str = "application/chainsafe-files-entry";
/// Default mime type for files whose type is left empty.
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";
/// Mime type of a leaf whose cid names a bucket in a foreign filesystem.
pub const MIME_REFERENCE: &str = "application/chainsafe-files-reference";

/// The one symbol that cannot appear in paths or names. As an edge label it
/// attaches a value at a branching node whose accumulated path equals the
/// value's key.
pub const SENTINEL: &str = ":";

/// Metadata associated with a user's file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cid: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub version: u8,
    /// Behaves like "modified at" for now but the name was preserved for
    /// backward compatibility. Unix seconds.
    #[serde(default)]
    pub created_at: i64,
}

impl Content {
    /// Creates a content record. For the branch marker type everything
    /// except the type and timestamp is omitted.
    pub fn new(
        name: &str,
        cid: &str,
        size: i64,
        content_type: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new_at(name, cid, size, content_type, created_at.timestamp())
    }

    /// [`Content::new`] with the timestamp already in unix seconds.
    pub fn new_at(name: &str, cid: &str, size: i64, content_type: &str, created_at: i64) -> Self {
        if content_type == MIME_DRIVE_ENTRY {
            return Self {
                content_type: MIME_DRIVE_ENTRY.to_owned(),
                created_at,
                ..Self::default()
            };
        }

        let version = if content_type == MIME_DRIVE_DIRECTORY { 0 } else { 1 };
        Self {
            name: name.to_owned(),
            cid: cid.to_owned(),
            content_type: content_type.to_owned(),
            size,
            version,
            created_at,
        }
    }

    /// Checks that the content is eligible to become part of a trie node.
    /// An empty type is normalised to [`MIME_OCTET_STREAM`].
    pub fn validate(&mut self) -> Result<(), FsError> {
        if self.name.contains(SEPARATOR_CHAR) || self.name.contains(SENTINEL) {
            return Err(FsError::IllegalNameChars);
        }

        if self.content_type.is_empty() {
            self.content_type = MIME_OCTET_STREAM.to_owned();
        }

        Ok(())
    }

    /// True for both the stored branch marker and the emitted directory type.
    pub fn is_directory(&self) -> bool {
        self.content_type == MIME_DRIVE_DIRECTORY || self.content_type == MIME_DRIVE_ENTRY
    }
}

/// Extra annotation attached to an entry, e.g. by an upload pipeline that
/// wants to record why processing a file failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub failure_code: i32,
    pub failed_message: String,
    pub suggested_action: String,
}
