//! Debug rendering of the stored trie structure.

use drive_core::{Entry, SENTINEL};

use crate::Trie;

/// Print a debug tree of the stored structure, edges and sentinels
/// included. Useful when inspecting compression and merge behavior.
pub fn print_tree(trie: &Trie) {
    match trie.snapshot() {
        None => println!("(empty trie)"),
        Some(root) => {
            print_summary(&root);
            print_node(&root, 0);
        }
    }
}

fn print_summary(root: &Entry) {
    let (nodes, leaves) = count(root);
    println!(". [trie nodes={} leaves={}]", nodes, leaves);
}

fn count(node: &Entry) -> (usize, usize) {
    let mut nodes = 1;
    let mut leaves = usize::from(node.entries.is_empty());
    for child in &node.entries {
        let (n, l) = count(child);
        nodes += n;
        leaves += l;
    }
    (nodes, leaves)
}

fn print_node(node: &Entry, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = if node.path == SENTINEL { "(:)" } else { node.path.as_str() };
    println!(
        "{}{} [{} name={:?} cid={:?} size={}]",
        indent, label, node.content.content_type, node.content.name, node.content.cid,
        node.content.size
    );
    for child in &node.entries {
        print_node(child, depth + 1);
    }
}
