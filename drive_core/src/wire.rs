//! CBOR adapter shape for exchanging tries with other services.
//!
//! The wire records carry the same fields as the canonical serde form with
//! numbered keys; `version` travels as a byte string so it can grow without
//! a format break. Both shapes are derived from [`Entry`], never
//! authoritative.

use minicbor::{CborLen, Decode, Encode};

use crate::content::Content;
use crate::entry::Entry;

/// One trie node on the wire.
#[derive(Encode, Decode, CborLen, Clone, Debug, Default)]
#[cbor(map)]
pub struct WireEntry {
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub cid: String,
    #[n(3)]
    pub content_type: String,
    #[n(4)]
    pub size: i64,
    #[n(5)]
    pub created_at: i64,
    #[n(6)]
    #[cbor(with = "minicbor::bytes")]
    pub version: Vec<u8>,
    #[n(7)]
    pub path: String,
    #[n(8)]
    pub entries: Vec<WireEntry>,
}

/// A whole trie on the wire. An absent root encodes the empty trie.
#[derive(Encode, Decode, CborLen, Clone, Debug, Default)]
#[cbor(map)]
pub struct WireTrie {
    #[n(0)]
    pub root: Option<WireEntry>,
}

impl WireTrie {
    pub fn from_bytes(bytes: &[u8]) -> Result<WireTrie, minicbor::decode::Error> {
        minicbor::decode(bytes)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, minicbor::encode::Error<std::convert::Infallible>> {
        minicbor::to_vec(self)
    }
}

impl From<&Entry> for WireEntry {
    fn from(entry: &Entry) -> Self {
        WireEntry {
            name: entry.content.name.clone(),
            cid: entry.content.cid.clone(),
            content_type: entry.content.content_type.clone(),
            size: entry.content.size,
            created_at: entry.content.created_at,
            version: vec![entry.content.version],
            path: entry.path.clone(),
            entries: entry.entries.iter().map(WireEntry::from).collect(),
        }
    }
}

impl From<WireEntry> for Entry {
    fn from(wire: WireEntry) -> Self {
        Entry {
            content: Content {
                name: wire.name,
                cid: wire.cid,
                content_type: wire.content_type,
                size: wire.size,
                version: wire.version.first().copied().unwrap_or(0),
                created_at: wire.created_at,
            },
            path: wire.path,
            entries: wire.entries.into_iter().map(Entry::from).collect(),
            meta: None,
        }
    }
}
