//! Tree printer utility for stylesheet debugging
//!
//! Renders a [`Stylesheet`] as an indented outline with per-kind statistics,
//! used by the command line `--dump-tree` flag.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::stylesheet::node::{NodeId, NodeKind, Stylesheet};

/// Dump the complete tree followed by node statistics
pub fn dump(tree: &Stylesheet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Stylesheet Tree ===");
    dump_node(tree, tree.root(), 0, &mut out);

    let _ = writeln!(out);
    let _ = writeln!(out, "=== Tree Statistics ===");
    for (kind, count) in collect_node_stats(tree, tree.root()) {
        let _ = writeln!(out, "{}: {}", kind, count);
    }
    out
}

/// Print a node and its children recursively
pub fn dump_node(tree: &Stylesheet, node: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let text = match tree.kind(node) {
        NodeKind::Root => String::new(),
        NodeKind::Rule { selector } => selector.clone(),
        NodeKind::AtRule { name, params, .. } => format!("@{} {}", name, params),
        NodeKind::Declaration { prop, value } => format!("{}: {}", prop, value),
        NodeKind::Comment { text } => text.clone(),
    };

    // Truncate very long text for readability
    let display_text = if text.chars().count() > 50 {
        format!("{}...", text.chars().take(47).collect::<String>())
    } else {
        text
    };

    let display_text = display_text
        .replace('\n', "\\n")
        .replace('\t', "\\t")
        .replace('\r', "\\r");

    let location = tree
        .position(node)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    let _ = writeln!(
        out,
        "{}{}[{}] '{}'",
        indent,
        tree.kind(node).label(),
        location,
        display_text
    );

    for &child in tree.children(node) {
        dump_node(tree, child, depth + 1, out);
    }
}

/// Collect statistics about node kinds below and including `node`
pub fn collect_node_stats(tree: &Stylesheet, node: NodeId) -> BTreeMap<&'static str, usize> {
    let mut stats = BTreeMap::new();
    *stats.entry(tree.kind(node).label()).or_insert(0) += 1;
    for child in tree.descendants(node) {
        *stats.entry(tree.kind(child).label()).or_insert(0) += 1;
    }
    stats
}
