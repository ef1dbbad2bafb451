//! Insertion: walk + split + extend, maintaining the compression and
//! sentinel invariants.

use drive_core::{
    base, common_prefix, Content, Entry, FsError, MIME_DRIVE_DIRECTORY, MIME_DRIVE_ENTRY,
    SENTINEL, SEPARATOR_CHAR,
};

/// Inserts `what` into the subtree rooted at `subtrie`, returning the
/// newly materialised entries along the insertion path (paths relative to
/// `subtrie`'s parent; the caller prepends its own edge on the way out).
pub(super) fn add_to(subtrie: &mut Entry, mut what: Entry) -> Result<Vec<Entry>, FsError> {
    // The new path is a prefix of this node's edge.
    if subtrie.path.starts_with(what.path.as_str()) {
        let suffix = &subtrie.path[what.path.len()..];
        if suffix.is_empty() {
            let created = fix_entries(vec![what.clone()], "");
            extend(subtrie, what)?;
            return Ok(created);
        }
        if suffix.starts_with(SEPARATOR_CHAR) {
            // A value at the parent directory of an existing node.
            return Err(FsError::Conflict);
        }
        let created = fix_entries(vec![what.clone()], "");
        let prefix = what.path.clone();
        split(&prefix, subtrie, what, true);
        return Ok(created);
    }

    // This node's edge is a prefix of the new path.
    if what.path.starts_with(subtrie.path.as_str()) {
        let node_path = subtrie.path.clone();
        what.trim_prefix(&node_path);

        if subtrie.entries.is_empty() {
            if what.path.starts_with(SEPARATOR_CHAR) {
                if subtrie.content.content_type != MIME_DRIVE_ENTRY {
                    // File vs directory collision on the exact same path.
                    return Err(FsError::Conflict);
                }
                subtrie.path.push_str(&what.path);
                subtrie.content = what.content.clone();
                return Ok(fix_entries(split_entry(&what), &subtrie.path));
            }
            let created = fix_entries(split_entry(&what), &node_path);
            split(&node_path, subtrie, what, false);
            return Ok(created);
        }

        // Dispatch on the first character of the remaining path.
        let what_rune = what.path.chars().next();
        let child = subtrie
            .entries
            .iter()
            .position(|me| me.path.chars().next() == what_rune);
        if let Some(idx) = child {
            let entries = add_to(&mut subtrie.entries[idx], what)?;
            return Ok(fix_entries(entries, &node_path));
        }

        let created = fix_entries(split_entry(&what), &node_path);
        add(subtrie, what)?;
        return Ok(created);
    }

    // Divergence inside the edge: branch at the common prefix.
    let subprefix = common_prefix(&subtrie.path, &what.path).to_owned();
    let temp = Entry {
        content: what.content.clone(),
        path: what.path[subprefix.len()..].to_owned(),
        entries: Vec::new(),
        meta: None,
    };
    let mut entries = split_entry(&temp);
    if temp.path.starts_with(SEPARATOR_CHAR) {
        // The common prefix itself became a directory.
        entries.push(Entry::new_at(
            "",
            "",
            0,
            MIME_DRIVE_DIRECTORY,
            what.content.created_at,
        ));
    }
    let created = fix_entries(entries, &subprefix);
    split(&subprefix, subtrie, what, true);
    Ok(created)
}

/// Turns `me` into a branch at `subprefix` housing its previous self and
/// `what` as children. An empty-folder `what` whose path equals the prefix
/// instead becomes the branch, adopting the old node as its child.
fn split(subprefix: &str, me: &mut Entry, mut what: Entry, trim_path: bool) {
    let old_entries = std::mem::take(&mut me.entries);
    let old_content = me.content.clone();
    me.trim_prefix(subprefix);
    let old_node = Entry {
        content: old_content,
        path: me.path.clone(),
        entries: old_entries,
        meta: None,
    };

    if what.is_empty_folder() && what.path == subprefix {
        let mut replacement = what;
        replacement.entries.push(old_node);
        *me = replacement;
        return;
    }

    if trim_path {
        what.trim_prefix(subprefix);
    }
    me.content = Content::new_at("", "", 0, MIME_DRIVE_ENTRY, old_node.content.created_at);
    me.path = subprefix.to_owned();
    me.entries = vec![old_node, what];
}

/// Attaches `what` as the sentinel value of the branch `subtrie`.
fn extend(subtrie: &mut Entry, mut what: Entry) -> Result<(), FsError> {
    if subtrie.content.content_type != MIME_DRIVE_ENTRY {
        return Err(FsError::Conflict);
    }

    for me in &subtrie.entries {
        if me.path == SENTINEL || me.path.starts_with(SEPARATOR_CHAR) {
            return Err(FsError::Conflict);
        }
    }

    what.path = SENTINEL.to_owned();
    subtrie.entries.push(what);
    Ok(())
}

/// Appends `what` as a child of the branch `subtrie`. A `/`-leading child
/// of an empty folder replaces the placeholder; one landing on an existing
/// directory sentinel replaces the sentinel.
fn add(subtrie: &mut Entry, what: Entry) -> Result<(), FsError> {
    if subtrie.content.content_type != MIME_DRIVE_ENTRY {
        return Err(FsError::Conflict);
    }

    if what.path.starts_with(SEPARATOR_CHAR) {
        if subtrie.is_empty_folder() {
            subtrie.path.push_str(&what.path);
            subtrie.content = what.content;
            if subtrie.content.content_type != MIME_DRIVE_ENTRY {
                subtrie.entries.clear();
            }
            return Ok(());
        }

        if let Some(idx) = subtrie.entries.iter().position(|me| me.path == SENTINEL) {
            if subtrie.entries[idx].content.content_type != MIME_DRIVE_ENTRY {
                return Err(FsError::Conflict);
            }
            subtrie.entries[idx] = what;
            return Ok(());
        }
    }

    subtrie.entries.push(what);
    Ok(())
}

/// Expands an entry's path into one entry per segment, directories for the
/// interior segments and the entry's own content for the last one.
fn split_entry(entry: &Entry) -> Vec<Entry> {
    let parts: Vec<&str> = entry.path.split(SEPARATOR_CHAR).collect();
    let last = parts.len() - 1;
    let mut current = String::new();
    let mut out = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            current = (*part).to_owned();
        } else {
            current.push(SEPARATOR_CHAR);
            current.push_str(part);
        }

        let content = if entry.content.is_directory() || i != last {
            Content::new_at(base(&current), "", 0, MIME_DRIVE_DIRECTORY, entry.content.created_at)
        } else {
            Content::new_at(
                base(&current),
                &entry.content.cid,
                entry.content.size,
                &entry.content.content_type,
                entry.content.created_at,
            )
        };
        out.push(Entry {
            content,
            path: current.clone(),
            entries: Vec::new(),
            meta: None,
        });
    }
    out
}

/// Rewrites a created-entries list for consumers: absolute paths, names
/// re-derived, branch types rendered as directories, children dropped.
fn fix_entries(mut entries: Vec<Entry>, prefix: &str) -> Vec<Entry> {
    for entry in &mut entries {
        entry.path = format!("{prefix}{}", entry.path);
        entry.content.name = base(&entry.path).to_owned();
        if entry.content.content_type == MIME_DRIVE_ENTRY {
            entry.content.content_type = MIME_DRIVE_DIRECTORY.to_owned();
        }
        entry.entries.clear();
    }
    entries
}
