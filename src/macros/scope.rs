//! Scope store
//!
//! Variable bindings are owned per container node and looked up along the node's
//! parent chain. Scope records are created lazily on the first write and are
//! keyed by [`NodeId`]; the parent relation is never stored here but read from the
//! tree at lookup time, so nodes moved between containers resolve against their
//! new ancestors.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::macros::constants::DEFAULT_MARKER_PATTERN;
use crate::macros::value::Value;
use crate::stylesheet::{NodeId, Stylesheet};

static DEFAULT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_MARKER_PATTERN).expect("default marker pattern is valid"));

/// Outcome of looking a variable up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The nearest binding found walking up from the queried node
    Resolved(&'a Value),
    /// No binding on the node or any of its ancestors
    Unresolved,
}

impl<'a> Resolution<'a> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }
}

/// Bindings owned by one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    bindings: HashMap<String, Value>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// All scope records of one processing run
#[derive(Debug, Clone, Default)]
pub struct ScopeStore {
    scopes: HashMap<NodeId, Scope>,
}

impl ScopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope owned by `node`, if anything was ever bound there
    pub fn scope(&self, node: NodeId) -> Option<&Scope> {
        self.scopes.get(&node)
    }

    /// Look `name` up on `node`, then on each ancestor up to the root
    pub fn get<'a>(&'a self, tree: &Stylesheet, node: NodeId, name: &str) -> Resolution<'a> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(value) = self.scopes.get(&id).and_then(|scope| scope.get(name)) {
                return Resolution::Resolved(value);
            }
            current = tree.parent(id);
        }
        Resolution::Unresolved
    }

    /// Assign raw declaration text to `name` on `node`.
    ///
    /// Text ending in `!default` only takes effect when `name` is unresolved at
    /// `node`; the marker is stripped before storing. The text is parsed as a list
    /// literal, collapsing a single element to that element.
    pub fn set(&mut self, tree: &Stylesheet, node: NodeId, name: &str, raw: &str) {
        let raw = if DEFAULT_MARKER.is_match(raw) {
            if self.get(tree, node, name).is_resolved() {
                log::debug!("Keeping existing value of ${} over default", name);
                return;
            }
            DEFAULT_MARKER.replace(raw, "").into_owned()
        } else {
            raw.to_string()
        };

        self.bind(node, name, Value::parse_array_literal(&raw, true));
    }

    /// Bind an already built value to `name` on `node`
    pub fn bind(&mut self, node: NodeId, name: &str, value: Value) {
        self.scopes.entry(node).or_default().insert(name, value);
    }

    /// Copy of the bindings owned by `node` (empty when it has none)
    pub fn snapshot(&self, node: NodeId) -> Scope {
        self.scopes.get(&node).cloned().unwrap_or_default()
    }

    /// Give `node` its own scope, replacing whatever it had
    pub fn install(&mut self, node: NodeId, scope: Scope) {
        self.scopes.insert(node, scope);
    }

    /// Drop the scope owned by `node`, once nothing can look through it anymore
    pub fn discard(&mut self, node: NodeId) {
        self.scopes.remove(&node);
    }

    /// Number of nodes owning a scope
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
