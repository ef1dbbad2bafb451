//! Core types for the drive filesystem index.
//!
//! This crate defines the data model shared by all drive crates.
//!
//! ## Wire-stable types
//!
//! The following are part of the stored/exchanged format and are intended to
//! stay stable:
//!
//! - File metadata records (`content::Content`, `content::Meta`)
//! - Trie nodes (`entry::Entry`) and their canonical serde form with the
//!   fields `path`, `name`, `cid`, `content_type`, `size`, `version`,
//!   `created_at`, `entries` and optional `meta`
//! - The CBOR adapter shape (`wire::WireEntry`, `wire::WireTrie`)
//! - The MIME constants and the `:` sentinel edge label
//!
//! Changes to these are format changes.
//!
//! ## Convenience APIs (non-wire)
//!
//! Path normalisation helpers (`path`) and entry validation build on the
//! wire types but may evolve more freely.

pub mod content;
pub mod entry;
pub mod error;
pub mod path;
pub mod wire;

// --- Core Public Surface ---

pub use content::{
    Content, Meta, MIME_DRIVE_DIRECTORY, MIME_DRIVE_ENTRY, MIME_OCTET_STREAM, MIME_REFERENCE,
    SENTINEL,
};
pub use entry::Entry;
pub use error::FsError;
pub use path::{
    base, clean_path, common_prefix, join_path, DOUBLE_SEPARATOR, SEPARATOR, SEPARATOR_CHAR,
};
pub use wire::{WireEntry, WireTrie};
