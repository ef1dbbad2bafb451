//! Exact-path lookup (`file`), branch-resolving lookup (`stat`) and
//! in-place replacement.

mod common;

use common::{build, content, NOW};
use drive_fs::{
    Content, FsError, MIME_DRIVE_DIRECTORY, MIME_DRIVE_ENTRY, MIME_OCTET_STREAM, MIME_REFERENCE,
};

type Row<'a> = (&'a str, &'a str, i64, &'a str);

fn check_file(name: &str, path: &str, rows: &[Row], want: Result<Content, FsError>) {
    let trie = build(rows);
    assert_eq!(trie.file(path), want, "file case {name:?}");
}

fn check_stat(name: &str, path: &str, rows: &[Row], want: Result<Content, FsError>) {
    let trie = build(rows);
    assert_eq!(trie.stat(path), want, "stat case {name:?}");
}

#[test]
fn file_validation_and_missing() {
    check_file("empty path", "", &[], Err(FsError::EmptyPath));
    check_file("empty trie", "/aaa/bbb/file", &[], Err(FsError::FileNotExist));
}

#[test]
fn file_returns_stored_content() {
    check_file(
        "simple get file",
        "/aaa/bbb/file",
        &[("/aaa/bbb/file", "test_cid", 512, MIME_OCTET_STREAM)],
        Ok(content("file", "test_cid", 512, MIME_OCTET_STREAM)),
    );

    let rows: &[Row] = &[
        ("/aaa/fbb/f", "test_cid", 512, MIME_OCTET_STREAM),
        ("/aaa/file", "test_cid", 512, MIME_OCTET_STREAM),
        ("/aaa/fiee/file", "test_cid", 512, MIME_OCTET_STREAM),
    ];
    check_file(
        "get first level file",
        "/aaa/file",
        rows,
        Ok(content("file", "test_cid", 512, MIME_OCTET_STREAM)),
    );
    check_file("get root", "/", rows, Err(FsError::FileNotExist));
}

#[test]
fn file_rejects_branches() {
    let rows: &[Row] = &[
        ("/aaa/fbb/f", "test_cid", 512, MIME_OCTET_STREAM),
        ("/file", "test_cid", 512, MIME_OCTET_STREAM),
        ("/aaa/fiee/file", "test_cid", 512, MIME_OCTET_STREAM),
    ];
    check_file(
        "get top level file",
        "/file",
        rows,
        Ok(content("file", "test_cid", 512, MIME_OCTET_STREAM)),
    );
    check_file("get top level dir", "/aaa", rows, Err(FsError::FileNotExist));
    check_file("get first level dir", "/aaa/fbb", rows, Err(FsError::FileNotExist));
    check_file("get trie node", "/aaa/f", rows, Err(FsError::FileNotExist));
}

#[test]
fn file_resolves_values_at_branch_points() {
    check_file(
        "get top level file",
        "/aca",
        &[
            ("/aba/fbb/f", "test_cid", 512, MIME_OCTET_STREAM),
            ("/aca", "test_cid", 512, MIME_OCTET_STREAM),
            ("/ada/fiee/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("aca", "test_cid", 512, MIME_OCTET_STREAM)),
    );
    check_file(
        "get sentinel file",
        "/aaa/file",
        &[
            ("/aaa/file2", "test_cid", 512, MIME_OCTET_STREAM),
            ("/aaa/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("file", "test_cid", 512, MIME_OCTET_STREAM)),
    );
}

#[test]
fn file_reports_empty_folders_as_directories() {
    check_file(
        "get sentinel dir",
        "/aaa/dir",
        &[
            ("/aaa/dir2", "test_cid", 0, MIME_DRIVE_ENTRY),
            ("/aaa/dir", "test_cid", 0, MIME_DRIVE_ENTRY),
        ],
        Ok(content("dir", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_file(
        "get info on an empty dir",
        "/aaa/fdir1",
        &[
            ("/aaa/fdir1", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("fdir1", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    // The folder name comes from the requested path even when the stored
    // edges split it across several nodes.
    check_file(
        "get info on an empty dir in bunch of similar neighbors",
        "/aaa/fdir12",
        &[
            ("/aaa/fdir12", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/fdir2", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/fdir1", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("fdir12", "", 0, MIME_DRIVE_DIRECTORY)),
    );
}

#[test]
fn file_returns_reference_leaves() {
    check_file(
        "get reference entry",
        "/file",
        &[
            ("/aaa/fbb/f", "test_cid", 512, MIME_OCTET_STREAM),
            ("/file", "test_cid", 0, MIME_REFERENCE),
            ("/aaa/fiee/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("file", "test_cid", 0, MIME_REFERENCE)),
    );
}

#[test]
fn stat_validation_and_missing() {
    check_stat("empty path", "", &[], Err(FsError::EmptyPath));
    check_stat("empty trie", "/aaa/bbb/file", &[], Err(FsError::FileNotExist));
    check_stat(
        "root path",
        "/",
        &[("/aaa/f", "test_cid", 512, MIME_OCTET_STREAM)],
        Err(FsError::FileNotExist),
    );
}

#[test]
fn stat_resolves_files_and_branches() {
    let rows: &[Row] = &[
        ("/aaa/fbb/f", "test_cid", 512, MIME_OCTET_STREAM),
        ("/file", "test_cid", 512, MIME_OCTET_STREAM),
        ("/aaa/fiee/file", "test_cid", 512, MIME_OCTET_STREAM),
    ];
    check_stat(
        "get top level dir",
        "/aaa",
        rows,
        Ok(content("aaa", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_stat(
        "get first level dir",
        "/aaa/fbb",
        rows,
        Ok(content("fbb", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    // A branch point that is not a directory boundary is not a path.
    check_stat("get trie node", "/aaa/f", rows, Err(FsError::FileNotExist));
}

#[test]
fn stat_empty_and_nested_folders() {
    check_stat(
        "empty directory",
        "/aaa/dir",
        &[
            ("/aaa/dir2", "test_cid", 0, MIME_DRIVE_ENTRY),
            ("/aaa/dir", "test_cid", 0, MIME_DRIVE_ENTRY),
        ],
        Ok(content("dir", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_stat(
        "directory with subdirs",
        "/aaa/dir",
        &[
            ("/aaa/dir2/file2", "test_cid", 0, MIME_DRIVE_ENTRY),
            ("/aaa/dir/file2", "test_cid", 0, MIME_DRIVE_ENTRY),
        ],
        Ok(content("dir", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_stat(
        "empty dir among similar neighbors",
        "/aaa/fdir12",
        &[
            ("/aaa/fdir12", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/fdir2", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/fdir1", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("fdir12", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_stat(
        "non-empty dir among similar neighbors",
        "/aaa/fdir12",
        &[
            ("/aaa/fdir12/file", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/fdir2/file", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/fdir1/file", "", 0, MIME_DRIVE_ENTRY),
            ("/aaa/file/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("fdir12", "", 0, MIME_DRIVE_DIRECTORY)),
    );
}

#[test]
fn stat_prefix_lookups_must_match_whole_segments() {
    let rows: &[Row] = &[
        ("/abcab/folder1", "", 0, MIME_DRIVE_ENTRY),
        ("/adcac/fdir2/file", "", 0, MIME_DRIVE_ENTRY),
        ("/afcad/fdir1/file", "", 0, MIME_DRIVE_ENTRY),
        ("/akcab1/file/file", "test_cid", 512, MIME_OCTET_STREAM),
    ];
    check_stat("partial first segment", "/a", rows, Err(FsError::FileNotExist));
    check_stat("partial segment", "/abca", rows, Err(FsError::FileNotExist));
    check_stat(
        "whole segment",
        "/abcab",
        rows,
        Ok(content("abcab", "", 0, MIME_DRIVE_DIRECTORY)),
    );

    let rows: &[Row] = &[
        ("/abcab/folder1", "", 0, MIME_DRIVE_ENTRY),
        ("/adcac/fdir2/file", "", 0, MIME_DRIVE_ENTRY),
        ("/afcad/fdir1/file", "", 0, MIME_DRIVE_ENTRY),
        ("/akcab1/file/file", "test_cid", 512, MIME_OCTET_STREAM),
        ("/akcab/file/file", "test_cid", 512, MIME_OCTET_STREAM),
    ];
    check_stat(
        "longer sibling first",
        "/akcab1",
        rows,
        Ok(content("akcab1", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_stat(
        "shorter sibling",
        "/akcab",
        rows,
        Ok(content("akcab", "", 0, MIME_DRIVE_DIRECTORY)),
    );

    let rows: &[Row] = &[
        ("/abcab/folder1", "", 0, MIME_DRIVE_ENTRY),
        ("/adcac/fdir2/file", "", 0, MIME_DRIVE_ENTRY),
        ("/afcad/fdir1/file", "", 0, MIME_DRIVE_ENTRY),
        ("/akcab1/file/file", "test_cid", 512, MIME_OCTET_STREAM),
        ("/adcac/fdir3/file", "", 0, MIME_DRIVE_ENTRY),
    ];
    check_stat("partial nested segment", "/adcac/fdir", rows, Err(FsError::FileNotExist));
    check_stat("wrong nested segment", "/adcac/fdir12", rows, Err(FsError::FileNotExist));
    check_stat(
        "nested dir",
        "/adcac/fdir3",
        rows,
        Ok(content("fdir3", "", 0, MIME_DRIVE_DIRECTORY)),
    );
    check_stat(
        "nested placeholder dir",
        "/adcac/fdir2/file",
        rows,
        Ok(content("file", "", 0, MIME_DRIVE_DIRECTORY)),
    );
}

#[test]
fn stat_interior_directory_of_deep_tree() {
    check_stat(
        "interior level",
        "/a/b/c",
        &[
            ("/a/b/c/d/e", "", 0, MIME_DRIVE_ENTRY),
            ("/a/b/c/f/g", "", 0, MIME_DRIVE_ENTRY),
            ("/a/b/f/g/e", "", 0, MIME_DRIVE_ENTRY),
            ("/a/b/f/k/g", "", 0, MIME_DRIVE_ENTRY),
        ],
        Ok(content("c", "", 0, MIME_DRIVE_DIRECTORY)),
    );
}

#[test]
fn stat_returns_reference_leaves() {
    check_stat(
        "get reference entry",
        "/file",
        &[
            ("/aaa/fbb/f", "test_cid", 512, MIME_OCTET_STREAM),
            ("/file", "test_cid", 0, MIME_REFERENCE),
            ("/aaa/fiee/file", "test_cid", 512, MIME_OCTET_STREAM),
        ],
        Ok(content("file", "test_cid", 0, MIME_REFERENCE)),
    );
}

#[test]
fn replace_overwrites_cid_size_and_timestamp() {
    let trie = build(&[("/home/test.txt", "cid1", 100, MIME_OCTET_STREAM)]);

    let updated = Content::new_at("test.txt", "cid2", 1000, MIME_OCTET_STREAM, NOW + 5);
    let (new, old) = trie.replace("/home/test.txt", &updated).unwrap();
    assert_eq!(new, updated);
    assert_eq!(old, content("test.txt", "cid1", 100, MIME_OCTET_STREAM));

    let stored = trie.file("/home/test.txt").unwrap();
    assert_eq!(stored.cid, "cid2");
    assert_eq!(stored.size, 1000);
    assert_eq!(stored.created_at, NOW + 5);
    // Name, type and version are preserved.
    assert_eq!(stored.name, "test.txt");
    assert_eq!(stored.content_type, MIME_OCTET_STREAM);
    assert_eq!(stored.version, 1);
}

#[test]
fn replace_rejects_branches_and_missing_paths() {
    let trie = build(&[
        ("/dir/file", "cid1", 1, MIME_OCTET_STREAM),
        ("/dir2", "", 0, MIME_DRIVE_ENTRY),
    ]);
    let updated = Content::new_at("x", "cid2", 2, MIME_OCTET_STREAM, NOW);

    assert_eq!(trie.replace("", &updated), Err(FsError::EmptyPath));
    assert_eq!(trie.replace("/missing", &updated), Err(FsError::FileNotExist));
    assert_eq!(trie.replace("/dir", &updated), Err(FsError::FileNotExist));
    // Empty folders are branches, not files.
    assert_eq!(trie.replace("/dir2", &updated), Err(FsError::FileNotExist));
}

#[test]
fn returned_contents_are_copies() {
    let trie = build(&[("/docs/readme", "cid1", 100, MIME_OCTET_STREAM)]);

    let mut first = trie.file("/docs/readme").unwrap();
    first.cid = "corrupted".to_owned();
    first.name = "corrupted".to_owned();

    let second = trie.file("/docs/readme").unwrap();
    assert_eq!(second.cid, "cid1");
    assert_eq!(second.name, "readme");
}
