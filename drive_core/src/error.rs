//! The closed error set of the drive trie.

/// Errors produced by trie operations.
///
/// The set is closed: every failure of every operation maps to one of these
/// variants, and identical inputs against identical state always produce the
/// same outcome.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FsError {
    /// The entry would occupy a path that already carries content, e.g. a
    /// file and a directory with the same exact path.
    #[error("conflict, entry can't be added")]
    Conflict,

    #[error("paths can't be empty")]
    EmptyPath,

    #[error("names can't be empty")]
    EmptyName,

    #[error("semicolon and multiple consequent slashes in path are not allowed")]
    IllegalPathChars,

    #[error("semicolon or slashes in name are not allowed")]
    IllegalNameChars,

    /// Directories are ephemeral and cannot be stored directly; an
    /// empty-folder placeholder entry is inserted instead.
    #[error("directories are ephemeral, for a placeholder use the entry content type")]
    CantAddDirectory,

    #[error("file doesn't exist")]
    FileNotExist,

    #[error("cannot create reference on root")]
    CantCreateRef,
}
