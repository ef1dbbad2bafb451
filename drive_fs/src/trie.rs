//! The trie façade: locking, validation and the public operation set.

mod delete;
mod insert;
mod query;
mod refs;

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use drive_core::{
    base, clean_path, Content, Entry, FsError, WireEntry, WireTrie, MIME_DRIVE_DIRECTORY,
    SEPARATOR,
};

use crate::hash::hash_root;

/// The trie behind a user's drive.
///
/// All operations are safe to call from multiple threads: writers
/// ([`Trie::add_file`], [`Trie::delete`], [`Trie::replace`],
/// [`Trie::create_ref`]) hold the write lock for their full duration,
/// readers hold the read lock. Every value crossing the API boundary is an
/// owned deep copy, so neither side can observe or cause mutation through a
/// retained reference.
///
/// ```
/// use chrono::Utc;
/// use drive_fs::{Entry, Trie, MIME_OCTET_STREAM};
///
/// let trie = Trie::new();
/// trie.add_file(Entry::new("/docs/readme.md", "cid1", 42, MIME_OCTET_STREAM, Utc::now()))
///     .unwrap();
/// let file = trie.file("/docs/readme.md").unwrap();
/// assert_eq!(file.cid, "cid1");
/// ```
#[derive(Debug)]
pub struct Trie {
    root: RwLock<Option<Entry>>,
}

impl Trie {
    /// Creates an empty trie (no root).
    pub fn new() -> Self {
        Self {
            root: RwLock::new(None),
        }
    }

    /// Inserts a file or empty-folder placeholder entry.
    ///
    /// Returns the newly materialised file and directory entries along the
    /// stored path, with absolute paths, directory types normalised for
    /// consumers and children cleared. The list is the caller's audit trail
    /// of what appeared in the tree.
    pub fn add_file(&self, mut entry: Entry) -> Result<Vec<Entry>, FsError> {
        let _span = tracing::debug_span!("drive_fs.add").entered();
        let mut root = self.root.write().unwrap();

        entry.validate()?;
        entry.path = clean_path(&entry.path);

        match root.as_mut() {
            None => {
                let created = query::ls_recursive(&entry, SEPARATOR);
                *root = Some(entry);
                Ok(created)
            }
            Some(node) => insert::add_to(node, entry),
        }
    }

    /// Lists the immediate children under `path`. All returned directories
    /// are ephemeral, synthesised from the stored structure. A non-matching
    /// path yields an empty list.
    pub fn ls(&self, path: &str) -> Vec<Content> {
        let _span = tracing::debug_span!("drive_fs.ls").entered();
        let root = self.root.read().unwrap();

        match root.as_ref() {
            None => Vec::new(),
            Some(node) => query::list(&clean_path(path), node),
        }
    }

    /// Lists `path` and everything below it, depth first, sorted by path
    /// with a stable sort so sibling insertion order survives.
    ///
    /// Returned paths are relative to the requested path with a leading
    /// separator (absolute for the root request). To re-add the entries
    /// elsewhere traverse the list from first to last; to delete them,
    /// from last to first.
    pub fn ls_recursive(&self, path: &str) -> Vec<Entry> {
        let _span = tracing::debug_span!("drive_fs.ls-recursive").entered();
        let root = self.root.read().unwrap();

        match root.as_ref() {
            None => Vec::new(),
            Some(node) => query::ls_recursive(node, path),
        }
    }

    /// Builds the directory skeleton rooted at `path`: branches only, files
    /// intentionally omitted. Every branch carries a (possibly empty)
    /// children list.
    pub fn tree(&self, path: &str) -> Entry {
        let _span = tracing::debug_span!("drive_fs.tree").entered();
        let root = self.root.read().unwrap();

        let p = clean_path(path);
        let mut top = if p.is_empty() {
            Entry::new(SEPARATOR, "", 0, MIME_DRIVE_DIRECTORY, Utc::now())
        } else {
            Entry::new(&p, "", 0, MIME_DRIVE_DIRECTORY, Utc::now())
        };

        if let Some(node) = root.as_ref() {
            query::tree(&mut top, &p, node);
        }
        top
    }

    /// Returns the metadata stored at exactly `path`: a file, a reference,
    /// or an empty folder (reported with the directory type and the base of
    /// the requested path as its name). Non-empty branches are not files.
    pub fn file(&self, path: &str) -> Result<Content, FsError> {
        let _span = tracing::debug_span!("drive_fs.file").entered();

        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }

        let root = self.root.read().unwrap();
        let node = root.as_ref().ok_or(FsError::FileNotExist)?;

        let p = clean_path(path);
        let mut content = query::find(&p, node).ok_or(FsError::FileNotExist)?;
        if content.content_type == MIME_DRIVE_DIRECTORY {
            content.name = base(&p).to_owned();
        }
        Ok(content)
    }

    /// Like [`Trie::file`], but also resolves non-empty branch paths to a
    /// synthesised directory content named after the last path segment.
    pub fn stat(&self, path: &str) -> Result<Content, FsError> {
        let _span = tracing::debug_span!("drive_fs.stat").entered();

        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }

        if path == SEPARATOR {
            return Err(FsError::FileNotExist);
        }
        let root = self.root.read().unwrap();
        let node = root.as_ref().ok_or(FsError::FileNotExist)?;

        let p = clean_path(path);
        let mut content = query::stat(&p, node).ok_or(FsError::FileNotExist)?;
        content.name = base(path).to_owned();
        Ok(content)
    }

    /// Overwrites cid, size and timestamp of the file leaf at `path` in
    /// place, keeping name, type and version. Returns the new and the old
    /// content. Branch paths (including empty folders) are not replaceable.
    pub fn replace(&self, path: &str, content: &Content) -> Result<(Content, Content), FsError> {
        let _span = tracing::debug_span!("drive_fs.replace").entered();

        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }

        let mut root = self.root.write().unwrap();
        let node = root.as_mut().ok_or(FsError::FileNotExist)?;

        let p = clean_path(path);
        let stored = query::find_file_mut(&p, node).ok_or(FsError::FileNotExist)?;
        let old = stored.clone();
        stored.cid = content.cid.clone();
        stored.size = content.size;
        stored.created_at = content.created_at;
        Ok((content.clone(), old))
    }

    /// Deletes the entry at `path`. Deleting the last entry of a directory
    /// leaves the directory behind as an empty folder; deleting the root's
    /// sole content clears the trie. A non-matching path is a silent no-op.
    pub fn delete(&self, path: &str) -> Result<(), FsError> {
        let _span = tracing::debug_span!("drive_fs.delete").entered();

        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }

        let mut root = self.root.write().unwrap();
        if let Some(node) = root.as_mut() {
            if delete::rm(&clean_path(path), node, true) {
                *root = None;
            }
        }
        Ok(())
    }

    /// Converts the file or subtree at `path` into a single reference leaf
    /// whose cid is `bucket_id`, excising the previous content.
    ///
    /// Returns the pre-excision entries (ordered for re-insertion) so the
    /// caller can install them in the trie of the target bucket.
    pub fn create_ref(
        &self,
        path: &str,
        bucket_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<Entry>, FsError> {
        let _span = tracing::debug_span!("drive_fs.create-ref").entered();

        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }
        if path == SEPARATOR {
            return Err(FsError::CantCreateRef);
        }

        let mut root = self.root.write().unwrap();
        refs::create_ref(&clean_path(path), bucket_id, &mut root, created_at.timestamp())
    }

    /// Hash of the whole structure: SHA-256 over the canonical
    /// serialisation, as lowercase hex. Stable across calls and sensitive
    /// to every observable field of every reachable node.
    pub fn hash(&self) -> String {
        let _span = tracing::debug_span!("drive_fs.hash").entered();
        let root = self.root.read().unwrap();
        hash_root(&root)
    }

    /// Deep copy of the stored root, mostly useful for structural
    /// assertions and diagnostics.
    pub fn snapshot(&self) -> Option<Entry> {
        let root = self.root.read().unwrap();
        root.clone()
    }

    /// The derived CBOR adapter shape of the whole trie.
    pub fn to_wire(&self) -> WireTrie {
        let root = self.root.read().unwrap();
        WireTrie {
            root: root.as_ref().map(WireEntry::from),
        }
    }

    /// Rebuilds a trie from its CBOR adapter shape.
    pub fn from_wire(wire: WireTrie) -> Self {
        Self {
            root: RwLock::new(wire.root.map(Entry::from)),
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Trie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let root = self.root.read().unwrap();
        let mut state = serializer.serialize_struct("Trie", 1)?;
        state.serialize_field("root", &*root)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Trie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(default)]
            root: Option<Entry>,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(Trie {
            root: RwLock::new(repr.root),
        })
    }
}
