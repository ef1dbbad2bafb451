//! Deletion with reverse compression: removed children collapse
//! single-child chains back into their parent.

use drive_core::{Entry, MIME_DRIVE_ENTRY, SENTINEL, SEPARATOR_CHAR};

/// Removes the entry at `subprefix` below `subtrie`. Returns true when the
/// node itself must be removed by the caller (for the top-level call: the
/// trie root is cleared).
///
/// `at_root` is true only for the trie root: the root's sole content is
/// removed outright, while deeper nodes convert into an empty-folder
/// placeholder at their parent directory path.
pub(super) fn rm(subprefix: &str, subtrie: &mut Entry, at_root: bool) -> bool {
    let sub = subprefix
        .strip_prefix(subtrie.path.as_str())
        .unwrap_or(subprefix)
        .to_owned();

    if sub.is_empty()
        && (subtrie.content.content_type != MIME_DRIVE_ENTRY || subtrie.is_empty_folder())
    {
        if at_root {
            return true;
        }
        return delete_or_convert(subtrie);
    }

    let mut action = None;
    for (idx, me) in subtrie.entries.iter().enumerate() {
        if sub.is_empty() {
            if me.path == SENTINEL {
                action = Some((idx, true));
                break;
            }
            continue;
        }
        if sub.starts_with(me.path.as_str()) {
            action = Some((idx, false));
            break;
        }
        if me.path.starts_with(sub.as_str()) {
            return false;
        }
    }

    match action {
        Some((idx, true)) => remove_and_merge(subtrie, idx),
        Some((idx, false)) => {
            if rm(&sub, &mut subtrie.entries[idx], false) {
                remove_and_merge(subtrie, idx)
            } else {
                false
            }
        }
        None => false,
    }
}

/// Removes child `idx` and restores the compression invariant: a branch
/// left with a single non-sentinel child splices that child's edge into
/// itself; a single sentinel collapses into the branch's own content.
/// Returns true when the branch itself must go (it had nothing else).
fn remove_and_merge(subtrie: &mut Entry, idx: usize) -> bool {
    if subtrie.entries.len() <= 1 {
        return true;
    }
    subtrie.entries.remove(idx);

    if subtrie.entries.len() == 1 {
        if subtrie.entries[0].path != SENTINEL {
            let only = subtrie.entries.remove(0);
            subtrie.content = only.content;
            subtrie.path.push_str(&only.path);
            subtrie.entries = only.entries;
        } else {
            subtrie.content = subtrie.entries[0].content.clone();
            if subtrie.content.content_type != MIME_DRIVE_ENTRY {
                subtrie.entries.clear();
            }
        }
    }
    false
}

/// Removes a node whose edge is a single segment; a multi-segment edge
/// instead becomes the empty-folder placeholder of its parent directory,
/// so deleting the last file of a directory keeps the directory.
fn delete_or_convert(node: &mut Entry) -> bool {
    match node.path.rfind(SEPARATOR_CHAR) {
        Some(idx) if idx > 0 => {
            let parent = node.path[..idx].to_owned();
            let created_at = node.content.created_at;
            *node = Entry::new_at(&parent, "", 0, MIME_DRIVE_ENTRY, created_at);
            false
        }
        _ => true,
    }
}
