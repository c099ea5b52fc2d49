//! Arena-backed stylesheet tree
//!
//! Nodes live in a single `Vec` and are addressed by [`NodeId`]. Parent links are
//! plain indices, so moving a node between containers is a matter of rewriting
//! two child lists and one parent slot. Detached nodes stay in the arena; they are
//! simply no longer reachable from the root.

use std::fmt;

/// Index of a node inside a [`Stylesheet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// 1-based source location of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a node together with its kind-specific text fields
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Document root
    Root,
    /// `selector { ... }`
    Rule { selector: String },
    /// `@name params;` or `@name params { ... }`
    AtRule {
        name: String,
        params: String,
        has_block: bool,
    },
    /// `prop: value`
    Declaration { prop: String, value: String },
    /// `/* text */`
    Comment { text: String },
}

impl NodeKind {
    pub fn rule(selector: impl Into<String>) -> Self {
        NodeKind::Rule {
            selector: selector.into(),
        }
    }

    pub fn at_rule(name: impl Into<String>, params: impl Into<String>) -> Self {
        NodeKind::AtRule {
            name: name.into(),
            params: params.into(),
            has_block: true,
        }
    }

    pub fn declaration(prop: impl Into<String>, value: impl Into<String>) -> Self {
        NodeKind::Declaration {
            prop: prop.into(),
            value: value.into(),
        }
    }

    /// Short label used by debug output
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Rule { .. } => "rule",
            NodeKind::AtRule { .. } => "atrule",
            NodeKind::Declaration { .. } => "decl",
            NodeKind::Comment { .. } => "comment",
        }
    }

    /// Name of an at-rule, `None` for every other kind
    pub fn at_rule_name(&self) -> Option<&str> {
        match self {
            NodeKind::AtRule { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Option<Position>,
}

/// A stylesheet syntax tree
#[derive(Debug, Clone)]
pub struct Stylesheet {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylesheet {
    /// Create an empty stylesheet holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
                position: None,
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn kind_mut(&mut self, node: NodeId) -> &mut NodeKind {
        &mut self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.nodes[node.0].position
    }

    pub fn set_position(&mut self, node: NodeId, position: Position) {
        self.nodes[node.0].position = Some(position);
    }

    /// Create a node and append it as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, Some(parent), None);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Deep copy `node` and its descendants.
    ///
    /// The copy's parent back-reference is set to `parent`, but the copy is not
    /// inserted into any child list; it is reachable only through the returned id.
    pub fn clone_subtree(&mut self, node: NodeId, parent: Option<NodeId>) -> NodeId {
        let kind = self.nodes[node.0].kind.clone();
        let position = self.nodes[node.0].position;
        let copy = self.alloc(kind, parent, position);

        let children = self.nodes[node.0].children.clone();
        for child in children {
            let child_copy = self.clone_subtree(child, Some(copy));
            self.nodes[copy.0].children.push(child_copy);
        }

        copy
    }

    /// Detach `node` from its parent. Does nothing for an already detached node.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    /// Move `nodes` into the anchor's parent, directly before `anchor`, keeping
    /// their relative order. Returns how many nodes were inserted.
    ///
    /// Nodes still attached elsewhere are detached first. Nothing is inserted
    /// when the anchor itself is detached.
    pub fn insert_before(&mut self, anchor: NodeId, nodes: &[NodeId]) -> usize {
        let Some(parent) = self.nodes[anchor.0].parent else {
            return 0;
        };

        for &node in nodes {
            self.remove(node);
        }

        let Some(at) = self.index_of(anchor) else {
            return 0;
        };

        for &node in nodes {
            self.nodes[node.0].parent = Some(parent);
        }
        let siblings = &mut self.nodes[parent.0].children;
        siblings.splice(at..at, nodes.iter().copied());
        nodes.len()
    }

    /// The sibling immediately following `node`, if any
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.index_of(node)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Position of `node` within its parent's child list
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&child| child == node)
    }

    /// Whether `node` sits in its parent's child list (the root always does)
    pub fn is_attached(&self, node: NodeId) -> bool {
        node == self.root || self.index_of(node).is_some()
    }

    /// All nodes below `node` in document order, `node` itself excluded
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(node, &mut out);
        out
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(node) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>, position: Option<Position>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
            position,
        });
        id
    }
}
