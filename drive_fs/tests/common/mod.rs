#![allow(dead_code)]

use drive_fs::{Content, Entry, Trie, MIME_DRIVE_ENTRY};

/// Fixed timestamp so structural comparisons are exact.
pub const NOW: i64 = 1_700_000_000;

pub fn entry(path: &str, cid: &str, size: i64, content_type: &str) -> Entry {
    Entry::new_at(path, cid, size, content_type, NOW)
}

pub fn content(name: &str, cid: &str, size: i64, content_type: &str) -> Content {
    Content::new_at(name, cid, size, content_type, NOW)
}

/// A trie populated from `(path, cid, size, content_type)` rows; every add
/// must succeed.
pub fn build(rows: &[(&str, &str, i64, &str)]) -> Trie {
    let trie = Trie::new();
    for &(path, cid, size, ty) in rows {
        trie.add_file(entry(path, cid, size, ty))
            .unwrap_or_else(|err| panic!("add_file({path}) failed: {err}"));
    }
    trie
}

/// Bare node literal for expected-structure assertions.
pub fn node(path: &str, content: Content, entries: Vec<Entry>) -> Entry {
    Entry {
        content,
        path: path.to_owned(),
        entries,
        meta: None,
    }
}

/// The content carried by interior branch nodes.
pub fn branch_content() -> Content {
    Content::new_at("", "", 0, MIME_DRIVE_ENTRY, NOW)
}

/// Flat `(path, content)` projection of a created-entries list.
pub fn created(entries: &[Entry]) -> Vec<(String, Content)> {
    entries
        .iter()
        .map(|e| (e.path.clone(), e.content.clone()))
        .collect()
}

pub fn expect_created(rows: &[(&str, Content)]) -> Vec<(String, Content)> {
    rows.iter()
        .map(|(p, c)| ((*p).to_owned(), c.clone()))
        .collect()
}
