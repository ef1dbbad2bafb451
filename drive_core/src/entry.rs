//! Trie node structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{Content, Meta, MIME_DRIVE_DIRECTORY, MIME_DRIVE_ENTRY, SENTINEL};
use crate::error::FsError;
use crate::path::{base, clean_path, SEPARATOR};

/// A node of the drive trie. `path` is the edge label from the parent (or
/// the absolute path for a root); an empty `entries` list marks a leaf.
///
/// The canonical serde form flattens [`Content`] into the node, yielding the
/// fields `name`, `cid`, `content_type`, `size`, `version`, `created_at`,
/// `path`, `entries` and optional `meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub content: Content,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Entry {
    /// Creates an entry for insertion. The name is derived from the path.
    ///
    /// A [`MIME_DRIVE_ENTRY`] type produces the canonical empty-folder
    /// placeholder: an outer branch carrying the path whose single child is
    /// a `:` sentinel.
    pub fn new(
        path: &str,
        cid: &str,
        size: i64,
        content_type: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new_at(path, cid, size, content_type, created_at.timestamp())
    }

    /// [`Entry::new`] with the timestamp already in unix seconds.
    pub fn new_at(path: &str, cid: &str, size: i64, content_type: &str, created_at: i64) -> Self {
        if content_type == MIME_DRIVE_ENTRY {
            let marker = Entry {
                content: Content::new_at("", "", 0, MIME_DRIVE_ENTRY, created_at),
                path: SENTINEL.to_owned(),
                entries: Vec::new(),
                meta: None,
            };
            return Entry {
                content: Content::new_at("", "", 0, MIME_DRIVE_ENTRY, created_at),
                path: path.to_owned(),
                entries: vec![marker],
                meta: None,
            };
        }

        Entry {
            content: Content::new_at(base(path), cid, size, content_type, created_at),
            path: path.to_owned(),
            entries: Vec::new(),
            meta: None,
        }
    }

    /// Checks the entry is ready for the traversal algorithms.
    pub fn validate(&mut self) -> Result<(), FsError> {
        if self.content.content_type == MIME_DRIVE_DIRECTORY {
            return Err(FsError::CantAddDirectory);
        }

        // base() maps an empty path to "."; catch that before the name check.
        if self.content.name == "." && self.path.is_empty() {
            return Err(FsError::EmptyPath);
        }
        if self.path.contains(SENTINEL) {
            return Err(FsError::IllegalPathChars);
        }
        if self.is_empty_folder() {
            let cleaned = clean_path(&self.path);
            if cleaned.is_empty() || cleaned == SEPARATOR {
                return Err(FsError::EmptyName);
            }
        }
        self.content.validate()
    }

    /// True if this node is the placeholder shape for an empty folder.
    pub fn is_empty_folder(&self) -> bool {
        self.content.content_type == MIME_DRIVE_ENTRY
            && self.entries.len() == 1
            && self.entries[0].path == SENTINEL
    }

    /// Replaces this node with a deep copy of `other`.
    pub fn copy_from(&mut self, other: &Entry) {
        self.clone_from(other);
    }

    /// Strips `prefix` from the edge label; an emptied label becomes the
    /// sentinel.
    pub fn trim_prefix(&mut self, prefix: &str) {
        if let Some(stripped) = self.path.strip_prefix(prefix) {
            self.path = stripped.to_owned();
        }
        if self.path.is_empty() {
            self.path = SENTINEL.to_owned();
        }
    }

    /// Attaches a failure annotation to the entry.
    pub fn add_meta(&mut self, failure_code: i32, failed_message: &str, suggested_action: &str) {
        self.meta = Some(Meta {
            failure_code,
            failed_message: failed_message.to_owned(),
            suggested_action: suggested_action.to_owned(),
        });
    }

    /// Overwrites the content timestamp (unix seconds).
    pub fn set_created_at(&mut self, created_at: i64) {
        self.content.created_at = created_at;
    }
}
