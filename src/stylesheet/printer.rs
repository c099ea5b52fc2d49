//! Canonical stylesheet serializer
//!
//! Output is normalized: two spaces per nesting level, one statement per line,
//! a newline between top-level nodes. Original whitespace is not preserved.

use crate::stylesheet::node::{NodeId, NodeKind, Stylesheet};

const INDENT: &str = "  ";

/// Serialize the whole tree
pub fn print(tree: &Stylesheet) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        print_node(tree, child, 0, &mut out);
    }
    out
}

/// Serialize a single node and its descendants
pub fn print_node(tree: &Stylesheet, node: NodeId, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);

    match tree.kind(node) {
        NodeKind::Root => {
            for &child in tree.children(node) {
                print_node(tree, child, depth, out);
            }
        }
        NodeKind::Declaration { prop, value } => {
            out.push_str(&format!("{}{}: {};\n", indent, prop, value));
        }
        NodeKind::Comment { text } => {
            out.push_str(&format!("{}/*{}*/\n", indent, text));
        }
        NodeKind::Rule { selector } => {
            out.push_str(&indent);
            out.push_str(selector);
            print_block(tree, node, depth, out);
        }
        NodeKind::AtRule {
            name,
            params,
            has_block,
        } => {
            out.push_str(&indent);
            out.push('@');
            out.push_str(name);
            if !params.is_empty() {
                out.push(' ');
                out.push_str(params);
            }
            if *has_block {
                print_block(tree, node, depth, out);
            } else {
                out.push_str(";\n");
            }
        }
    }
}

fn print_block(tree: &Stylesheet, node: NodeId, depth: usize, out: &mut String) {
    let children = tree.children(node);
    if children.is_empty() {
        out.push_str(" {}\n");
        return;
    }

    out.push_str(" {\n");
    for &child in children {
        print_node(tree, child, depth + 1, out);
    }
    out.push_str(&INDENT.repeat(depth));
    out.push_str("}\n");
}
