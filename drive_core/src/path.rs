//! Path normalisation and prefix arithmetic.
//!
//! Paths are plain UTF-8 strings with `/` separators. All helpers here are
//! pure; slicing only ever happens at proven char boundaries.

/// Separator between path segments.
pub const SEPARATOR: &str = "/";
/// [`SEPARATOR`] as a char.
pub const SEPARATOR_CHAR: char = '/';
/// Doubled separator, collapsed away by [`clean_path`].
pub const DOUBLE_SEPARATOR: &str = "//";

/// Collapses duplicate separators, adds a missing leading one and strips a
/// trailing one (unless the path is the root itself). Empty input stays
/// empty.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut path = path.to_owned();
    while path.contains(DOUBLE_SEPARATOR) {
        path = path.replace(DOUBLE_SEPARATOR, SEPARATOR);
    }

    if !path.starts_with(SEPARATOR_CHAR) {
        path.insert(0, SEPARATOR_CHAR);
    }

    if path.len() > 1 && path.ends_with(SEPARATOR_CHAR) {
        path.pop();
    }

    path
}

/// Joins the given segments with the separator and cleans the result.
pub fn join_path(parts: &[&str]) -> String {
    clean_path(&parts.join(SEPARATOR))
}

/// Longest common prefix of `a` and `b`, always cut at a valid UTF-8 char
/// boundary so multi-byte characters (e.g. emoji) are never split.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let (ab, bb) = (a.as_bytes(), b.as_bytes());
    let mut i = 0;
    while i < ab.len() && i < bb.len() && ab[i] == bb[i] {
        i += 1;
    }
    // A stop inside a multi-byte character drops the whole partial character.
    while i > 0 && !a.is_char_boundary(i) {
        i -= 1;
    }
    &a[..i]
}

/// Last element of the path, after stripping trailing separators.
///
/// `""` yields `"."` and a path of only separators yields `"/"`.
pub fn base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches(SEPARATOR_CHAR);
    if trimmed.is_empty() {
        return SEPARATOR;
    }
    match trimmed.rfind(SEPARATOR_CHAR) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
