//! Read-side traversals: listing, lookup, stat and tree materialisation.
//!
//! Directory contents returned from here are synthesised on the fly; the
//! stored branch marker type never leaks to a caller.

use drive_core::{
    clean_path, join_path, Content, Entry, MIME_DRIVE_DIRECTORY, MIME_DRIVE_ENTRY, SENTINEL,
    SEPARATOR, SEPARATOR_CHAR,
};

/// Immediate children under `path` within the subtree `subtrie`. `path` is
/// relative to the subtree (the caller strips consumed edge prefixes while
/// descending).
pub(super) fn list(path: &str, subtrie: &Entry) -> Vec<Content> {
    if subtrie.path.starts_with(path) && subtrie.path != path {
        let suffix = &subtrie.path[path.len()..];
        // The edge continues past the request; children exist only if the
        // request stopped at a directory boundary. The root path is itself
        // a boundary.
        if !suffix.is_empty() && (suffix.starts_with(SEPARATOR_CHAR) || path == SEPARATOR) {
            return collect(path, "", subtrie);
        }
        return Vec::new();
    }

    let mut res = Vec::new();
    if path.starts_with(subtrie.path.as_str()) {
        if subtrie.entries.is_empty() {
            return res;
        }

        let suffix = &path[subtrie.path.len()..];
        if suffix.is_empty() && subtrie.path.ends_with(SEPARATOR_CHAR) {
            // The request consumed an edge ending on a separator (the
            // synthetic "/" branch): its children sit at the boundary.
            for me in &subtrie.entries {
                res.extend(collect("", "", me));
            }
            return res;
        }
        for me in &subtrie.entries {
            res.extend(list(suffix, me));
        }
    }
    res
}

/// Walks the edges hanging off a listed node and renders one content per
/// immediate child name, accumulating `fullname` across edges that split
/// mid-segment.
fn collect(prefix: &str, fullname: &str, subtrie: &Entry) -> Vec<Content> {
    if subtrie.path == SENTINEL {
        if subtrie.content.content_type == MIME_DRIVE_ENTRY {
            return vec![Content::new_at(
                fullname,
                "",
                0,
                MIME_DRIVE_DIRECTORY,
                subtrie.content.created_at,
            )];
        }
        return vec![subtrie.content.clone()];
    }

    let mut suffix: &str = &subtrie.path;
    if !prefix.is_empty() {
        if let Some(stripped) = suffix.strip_prefix(prefix) {
            suffix = stripped;
        }
    }
    if let Some(stripped) = suffix.strip_prefix(SEPARATOR_CHAR) {
        suffix = stripped;
    }

    match suffix.find(SEPARATOR_CHAR) {
        Some(idx) if idx > 0 => {
            // The edge crosses into a deeper level: everything up to the
            // separator is one synthetic directory.
            let name = format!("{fullname}{}", &suffix[..idx]);
            return vec![Content::new_at(
                &name,
                "",
                0,
                MIME_DRIVE_DIRECTORY,
                subtrie.content.created_at,
            )];
        }
        Some(_) => return Vec::new(),
        None => {}
    }

    let fullname = format!("{fullname}{suffix}");
    if subtrie.entries.is_empty() {
        if subtrie.content.content_type == MIME_DRIVE_ENTRY {
            let name = if subtrie.content.name == fullname {
                subtrie.content.name.clone()
            } else {
                format!("{fullname}{}", subtrie.content.name)
            };
            return vec![Content::new_at(
                &name,
                "",
                0,
                MIME_DRIVE_DIRECTORY,
                subtrie.content.created_at,
            )];
        }
        return vec![subtrie.content.clone()];
    }

    let mut res = Vec::new();
    for me in &subtrie.entries {
        if me.path.starts_with(SEPARATOR_CHAR) {
            // A child opening with the separator marks the end of this
            // directory's own name.
            res.push(Content::new_at(
                &fullname,
                "",
                0,
                MIME_DRIVE_DIRECTORY,
                me.content.created_at,
            ));
            continue;
        }
        res.extend(collect("", &fullname, me));
    }
    res
}

/// Cleans `path`, lists it recursively and sorts the result by path
/// (stable, so sibling insertion order is preserved among equal keys).
pub(super) fn ls_recursive(root: &Entry, path: &str) -> Vec<Entry> {
    let p = clean_path(path);
    let mut entries = list_recursive(&p, &p, root);
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// Depth-first expansion of [`list`]; paths come out relative to
/// `fixed_path` with a leading separator (absolute for the root request).
pub(super) fn list_recursive(path: &str, fixed_path: &str, subtrie: &Entry) -> Vec<Entry> {
    let mut res = Vec::new();
    for content in list(path, subtrie) {
        let joined = join_path(&[path, &content.name]);
        let rel = if fixed_path != SEPARATOR {
            joined
                .strip_prefix(fixed_path)
                .map(str::to_owned)
                .unwrap_or_else(|| joined.clone())
        } else {
            joined.clone()
        };
        let is_dir = content.content_type == MIME_DRIVE_DIRECTORY;
        res.push(Entry {
            content,
            path: rel,
            entries: Vec::new(),
            meta: None,
        });
        if is_dir {
            res.extend(list_recursive(&joined, fixed_path, subtrie));
        }
    }
    res
}

/// Fills `dir` with the directory skeleton under `path` (no files).
pub(super) fn tree(dir: &mut Entry, path: &str, subtrie: &Entry) {
    for content in list(path, subtrie) {
        if content.is_directory() {
            dir.entries.push(Entry::new_at(
                &join_path(&[path, &content.name]),
                "",
                content.size,
                &content.content_type,
                content.created_at,
            ));
        }
    }
    for child in &mut dir.entries {
        if child.content.is_directory() {
            let sub = join_path(&[path, &child.content.name]);
            tree(child, &sub, subtrie);
        }
    }
}

/// Exact-path lookup. Returns the stored content for files and references,
/// a synthesised directory content for empty folders, and nothing for
/// non-empty branches.
pub(super) fn find(subprefix: &str, subtrie: &Entry) -> Option<Content> {
    let sub = subprefix.strip_prefix(subtrie.path.as_str()).unwrap_or(subprefix);

    if sub.is_empty() {
        if subtrie.content.content_type != MIME_DRIVE_ENTRY {
            return Some(subtrie.content.clone());
        }
        if subtrie.is_empty_folder() {
            return Some(Content::new_at(
                "",
                "",
                0,
                MIME_DRIVE_DIRECTORY,
                subtrie.content.created_at,
            ));
        }
    }

    for me in &subtrie.entries {
        if sub.is_empty() {
            if me.path == SENTINEL {
                if me.content.content_type != MIME_DRIVE_ENTRY {
                    return Some(me.content.clone());
                }
                return Some(Content::new_at(
                    "",
                    "",
                    0,
                    MIME_DRIVE_DIRECTORY,
                    subtrie.content.created_at,
                ));
            }
            continue;
        }
        if sub.starts_with(me.path.as_str()) {
            return find(sub, me);
        }
        if me.path.starts_with(sub) {
            return None;
        }
    }
    None
}

/// Mutable exact-path lookup used by replace: resolves only stored file
/// and reference contents, never synthesising directories.
pub(super) fn find_file_mut<'a>(subprefix: &str, subtrie: &'a mut Entry) -> Option<&'a mut Content> {
    let sub = subprefix
        .strip_prefix(subtrie.path.as_str())
        .unwrap_or(subprefix)
        .to_owned();

    if sub.is_empty() {
        if subtrie.content.content_type != MIME_DRIVE_ENTRY {
            return Some(&mut subtrie.content);
        }
        let idx = subtrie.entries.iter().position(|me| me.path == SENTINEL)?;
        if subtrie.entries[idx].content.content_type == MIME_DRIVE_ENTRY {
            return None;
        }
        return Some(&mut subtrie.entries[idx].content);
    }

    let mut target = None;
    for (idx, me) in subtrie.entries.iter().enumerate() {
        if sub.starts_with(me.path.as_str()) {
            target = Some(idx);
            break;
        }
        if me.path.starts_with(sub.as_str()) {
            return None;
        }
    }
    find_file_mut(&sub, &mut subtrie.entries[target?])
}

/// Like [`find`], but additionally resolves branch paths (including edges
/// that stop inside a stored edge label) to a synthesised directory.
pub(super) fn stat(subprefix: &str, subtrie: &Entry) -> Option<Content> {
    if subprefix.starts_with(subtrie.path.as_str()) {
        let sub = &subprefix[subtrie.path.len()..];

        if sub.is_empty() {
            if subtrie.content.content_type != MIME_DRIVE_ENTRY {
                return Some(subtrie.content.clone());
            }
            if subtrie.is_empty_folder() {
                return Some(Content::new_at(
                    "",
                    "",
                    0,
                    MIME_DRIVE_DIRECTORY,
                    subtrie.content.created_at,
                ));
            }
        }

        for me in &subtrie.entries {
            if sub.is_empty() {
                if me.path == SENTINEL {
                    if me.content.content_type != MIME_DRIVE_ENTRY {
                        return Some(me.content.clone());
                    }
                    return Some(Content::new_at(
                        "",
                        "",
                        0,
                        MIME_DRIVE_DIRECTORY,
                        subtrie.content.created_at,
                    ));
                }
                if me.path.starts_with(SEPARATOR_CHAR) {
                    return Some(Content::new_at(
                        "",
                        "",
                        0,
                        MIME_DRIVE_DIRECTORY,
                        subtrie.content.created_at,
                    ));
                }
                continue;
            }
            if let Some(item) = stat(sub, me) {
                return Some(item);
            }
        }
    } else if subtrie.path.starts_with(subprefix) {
        let rest = &subtrie.path[subprefix.len()..];
        if rest.starts_with(SEPARATOR_CHAR) {
            return Some(Content::new_at(
                "",
                "",
                0,
                MIME_DRIVE_DIRECTORY,
                subtrie.content.created_at,
            ));
        }
    }
    None
}
