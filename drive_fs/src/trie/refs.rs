//! Reference conversion: replace a file or subtree with a single leaf
//! pointing at an external bucket.

use drive_core::{base, join_path, Content, Entry, FsError, MIME_DRIVE_DIRECTORY,
    MIME_DRIVE_ENTRY, MIME_REFERENCE};

use super::{delete, insert, query};

/// Captures the content at `path`, excises it from the trie and installs a
/// reference leaf carrying `bucket_id` in its place.
///
/// The captured entries come back with absolute paths, ordered so that the
/// caller can re-add them first-to-last into the target bucket's trie. A
/// subtree capture is prefixed with an empty-folder placeholder for the
/// subtree root itself.
pub(super) fn create_ref(
    path: &str,
    bucket_id: &str,
    root: &mut Option<Entry>,
    created_at: i64,
) -> Result<Vec<Entry>, FsError> {
    let node = root.as_ref().ok_or(FsError::FileNotExist)?;

    let mut entries = match query::find(path, node) {
        Some(mut content) => {
            if content.content_type == MIME_DRIVE_DIRECTORY {
                content.name = base(path).to_owned();
            }
            vec![Entry {
                content,
                path: String::new(),
                entries: Vec::new(),
                meta: None,
            }]
        }
        None => {
            let listed = query::list_recursive(path, path, node);
            if listed.is_empty() {
                return Err(FsError::FileNotExist);
            }
            let mut captured = vec![Entry {
                content: Content::new_at("", "", 0, MIME_DRIVE_ENTRY, created_at),
                path: String::new(),
                entries: Vec::new(),
                meta: None,
            }];
            captured.extend(listed);
            captured
        }
    };

    // Excise the captured entries, deepest first, so every removal sees a
    // consistent parent chain.
    for idx in (0..entries.len()).rev() {
        entries[idx].path = join_path(&[path, &entries[idx].path]);
        if let Some(node) = root.as_mut() {
            if delete::rm(&entries[idx].path, node, true) {
                *root = None;
            }
        }
    }

    let mut ref_entry = Entry::new_at(path, bucket_id, 0, MIME_REFERENCE, created_at);
    ref_entry.validate()?;

    match root.as_mut() {
        None => *root = Some(ref_entry),
        Some(node) => {
            insert::add_to(node, ref_entry)?;
        }
    }
    Ok(entries)
}
