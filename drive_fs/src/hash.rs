//! Deterministic hashing of the whole structure.

use data_encoding::HEXLOWER;
use serde::Serialize;
use sha2::{Digest, Sha256};

use drive_core::Entry;

#[derive(Serialize)]
struct TrieForm<'a> {
    root: &'a Option<Entry>,
}

/// SHA-256 of the canonical serialisation of the trie, as lowercase hex.
///
/// The canonical form serialises nodes in stored (insertion) order with all
/// fields present, so the digest is stable across calls and changes exactly
/// when an observable field of a reachable node changes.
pub(crate) fn hash_root(root: &Option<Entry>) -> String {
    let bytes = serde_json::to_vec(&TrieForm { root })
        .expect("the canonical trie form always serialises");
    HEXLOWER.encode(&Sha256::digest(&bytes))
}
