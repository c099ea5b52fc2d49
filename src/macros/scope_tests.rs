use crate::macros::scope::{Resolution, ScopeStore};
use crate::macros::value::Value;
use crate::stylesheet::{NodeKind, Stylesheet};

#[test]
fn test_lookup_walks_parent_chain() {
    let mut tree = Stylesheet::new();
    let root = tree.root();
    let outer = tree.append(root, NodeKind::rule(".outer"));
    let inner = tree.append(outer, NodeKind::rule(".inner"));

    let mut scopes = ScopeStore::new();
    scopes.set(&tree, root, "color", "red");
    scopes.set(&tree, outer, "size", "10px");

    assert_eq!(scopes.get(&tree, inner, "color"), Resolution::Resolved(&Value::scalar("red")));
    assert_eq!(scopes.get(&tree, inner, "size").value(), Some(&Value::scalar("10px")));
    assert_eq!(scopes.get(&tree, root, "size"), Resolution::Unresolved);
    assert!(!scopes.get(&tree, inner, "missing").is_resolved());
}

#[test]
fn test_nearest_binding_wins() {
    let mut tree = Stylesheet::new();
    let root = tree.root();
    let rule = tree.append(root, NodeKind::rule("a"));

    let mut scopes = ScopeStore::new();
    scopes.set(&tree, root, "x", "outer");
    scopes.set(&tree, rule, "x", "inner");

    assert_eq!(scopes.get(&tree, rule, "x").value(), Some(&Value::scalar("inner")));
    assert_eq!(scopes.get(&tree, root, "x").value(), Some(&Value::scalar("outer")));
}

#[test]
fn test_scopes_are_created_lazily() {
    let mut tree = Stylesheet::new();
    let root = tree.root();
    let rule = tree.append(root, NodeKind::rule("a"));

    let mut scopes = ScopeStore::new();
    assert!(scopes.scope(rule).is_none());

    scopes.set(&tree, rule, "x", "1");
    let scope = scopes.scope(rule).unwrap();
    assert_eq!(scope.len(), 1);
    assert_eq!(scope.names(), vec!["x"]);
    assert!(scopes.scope(root).is_none());
}

#[test]
fn test_default_only_applies_when_unresolved() {
    let tree = Stylesheet::new();
    let root = tree.root();
    let mut scopes = ScopeStore::new();

    scopes.set(&tree, root, "x", "1 !default");
    scopes.set(&tree, root, "x", "2 !default");
    assert_eq!(scopes.get(&tree, root, "x").value(), Some(&Value::scalar("1")));

    // A plain assignment always overrides
    scopes.set(&tree, root, "x", "3");
    assert_eq!(scopes.get(&tree, root, "x").value(), Some(&Value::scalar("3")));
}

#[test]
fn test_default_sees_ancestor_bindings() {
    let mut tree = Stylesheet::new();
    let root = tree.root();
    let rule = tree.append(root, NodeKind::rule("a"));

    let mut scopes = ScopeStore::new();
    scopes.set(&tree, root, "x", "outer");
    scopes.set(&tree, rule, "x", "inner !default");

    assert!(scopes.scope(rule).is_none());
    assert_eq!(scopes.get(&tree, rule, "x").value(), Some(&Value::scalar("outer")));
}

#[test]
fn test_set_parses_list_literals() {
    let tree = Stylesheet::new();
    let root = tree.root();
    let mut scopes = ScopeStore::new();

    scopes.set(&tree, root, "sizes", "(small, 10px), (large, 20px)");

    let value = scopes.get(&tree, root, "sizes").value().cloned().unwrap();
    assert_eq!(value.elements().len(), 2);
    assert_eq!(value.render(), "(small, 10px), (large, 20px)");
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut tree = Stylesheet::new();
    let root = tree.root();
    let rule = tree.append(root, NodeKind::rule("a"));
    let copy = tree.clone_subtree(rule, Some(root));

    let mut scopes = ScopeStore::new();
    scopes.bind(rule, "i", Value::scalar("1"));
    scopes.install(copy, scopes.snapshot(rule));
    scopes.bind(rule, "i", Value::scalar("2"));

    assert_eq!(scopes.get(&tree, copy, "i").value(), Some(&Value::scalar("1")));
    assert_eq!(scopes.get(&tree, rule, "i").value(), Some(&Value::scalar("2")));
}
