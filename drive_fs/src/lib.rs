//! # Drive filesystem trie
//!
//! An in-memory, path-keyed compressed trie behaving as a logical
//! hierarchical filesystem index. Keys are UTF-8 paths with `/` separators;
//! values are file metadata records ([`Content`]).
//!
//! ## Layers
//! 1. `drive_core` - pure data structures (canonical serde form + CBOR wire
//!    shape).
//! 2. `trie` - the engine: insertion with path compression, read-side
//!    traversals, deletion with reverse compression, reference conversion.
//! 3. [`Trie`] - the concurrency façade applications use: one
//!    reader-writer lock around the whole structure, deep copies on every
//!    boundary crossing.
//!
//! The library holds no external resources: no persistence, no network, no
//! clock of its own (timestamps come in on the entries).

mod hash;
mod trie;

pub mod debug;

pub use trie::Trie;

pub use drive_core::{
    base, clean_path, common_prefix, join_path, Content, Entry, FsError, Meta, WireEntry,
    WireTrie, MIME_DRIVE_DIRECTORY, MIME_DRIVE_ENTRY, MIME_OCTET_STREAM, MIME_REFERENCE,
    SENTINEL, SEPARATOR,
};
