use crate::stylesheet::node::{NodeKind, Stylesheet};

fn sample() -> (Stylesheet, Vec<crate::stylesheet::NodeId>) {
    let mut tree = Stylesheet::new();
    let root = tree.root();
    let a = tree.append(root, NodeKind::rule("a"));
    let b = tree.append(root, NodeKind::rule("b"));
    let c = tree.append(root, NodeKind::rule("c"));
    (tree, vec![a, b, c])
}

#[test]
fn test_append_and_navigation() {
    let (tree, ids) = sample();
    let root = tree.root();

    assert_eq!(tree.children(root), ids.as_slice());
    assert_eq!(tree.parent(ids[0]), Some(root));
    assert_eq!(tree.next_sibling(ids[0]), Some(ids[1]));
    assert_eq!(tree.next_sibling(ids[2]), None);
    assert_eq!(tree.index_of(ids[2]), Some(2));
}

#[test]
fn test_remove_detaches() {
    let (mut tree, ids) = sample();

    tree.remove(ids[1]);

    assert!(!tree.is_attached(ids[1]));
    assert_eq!(tree.parent(ids[1]), None);
    assert_eq!(tree.children(tree.root()), &[ids[0], ids[2]]);

    // Removing twice is harmless
    tree.remove(ids[1]);
    assert_eq!(tree.children(tree.root()).len(), 2);
}

#[test]
fn test_clone_subtree_is_detached_copy() {
    let (mut tree, ids) = sample();
    let root = tree.root();
    tree.append(ids[0], NodeKind::declaration("color", "red"));

    let copy = tree.clone_subtree(ids[0], Some(root));

    assert_eq!(tree.parent(copy), Some(root));
    assert!(!tree.is_attached(copy));
    assert_eq!(tree.children(root).len(), 3);
    assert_eq!(tree.kind(copy), &NodeKind::rule("a"));

    let copied_children = tree.children(copy).to_vec();
    assert_eq!(copied_children.len(), 1);
    assert_ne!(copied_children[0], tree.children(ids[0])[0]);
    assert_eq!(tree.parent(copied_children[0]), Some(copy));

    // Mutating the copy leaves the original alone
    *tree.kind_mut(copied_children[0]) = NodeKind::declaration("color", "blue");
    let original = tree.children(ids[0])[0];
    assert_eq!(tree.kind(original), &NodeKind::declaration("color", "red"));
}

#[test]
fn test_insert_before_moves_nodes() {
    let (mut tree, ids) = sample();
    let root = tree.root();

    let holder = tree.clone_subtree(ids[0], Some(root));
    let x = tree.append(holder, NodeKind::declaration("x", "1"));
    let y = tree.append(holder, NodeKind::declaration("y", "2"));

    let inserted = tree.insert_before(ids[1], &[x, y]);

    assert_eq!(inserted, 2);
    assert_eq!(tree.children(root), &[ids[0], x, y, ids[1], ids[2]]);
    assert_eq!(tree.parent(x), Some(root));
    assert!(tree.children(holder).is_empty());
}

#[test]
fn test_insert_before_detached_anchor_is_noop() {
    let (mut tree, ids) = sample();
    tree.remove(ids[1]);

    assert_eq!(tree.insert_before(ids[1], &[ids[2]]), 0);
    assert_eq!(tree.children(tree.root()), &[ids[0], ids[2]]);
}

#[test]
fn test_descendants_in_document_order() {
    let (mut tree, ids) = sample();
    let inner = tree.append(ids[0], NodeKind::rule("a b"));
    let decl = tree.append(inner, NodeKind::declaration("color", "red"));

    let all = tree.descendants(tree.root());
    assert_eq!(all, vec![ids[0], inner, decl, ids[1], ids[2]]);
}
