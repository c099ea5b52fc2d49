//! Tree transformer
//!
//! Walks a container's children in document order with an explicit cursor.
//! Each visit reports how many nodes now occupy the visited slot: `0` when the
//! node was removed, `1` when it was kept, or the number of nodes a control
//! construct spliced in before removing itself. The cursor skips past them, so
//! spliced nodes are not walked twice, while later siblings still see every
//! variable those nodes declared.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Options;
use crate::macros::constants::{
    AT_RULE_EACH, AT_RULE_FOR, AT_RULE_IF, AT_RULE_MEDIA, KEYFRAMES_PATTERN,
    VARIABLE_DECLARATION_PATTERN,
};
use crate::macros::diagnostics::DiagnosticSink;
use crate::macros::interpolate::Interpolator;
use crate::macros::scope::ScopeStore;
use crate::stylesheet::{NodeId, NodeKind, Stylesheet};

static VARIABLE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(VARIABLE_DECLARATION_PATTERN).expect("variable declaration pattern is valid")
});

static KEYFRAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KEYFRAMES_PATTERN).expect("keyframes pattern is valid"));

/// How an at-rule is handled, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    For,
    Each,
    If,
    /// `@media`: parameters are interpolated
    Media,
    /// `@keyframes` and its vendor-prefixed forms: parameters are interpolated
    Keyframes,
    /// Anything else, including a stray `@else`, passes through untouched
    Other,
}

impl Directive {
    pub fn classify(name: &str) -> Self {
        match name {
            AT_RULE_FOR => Directive::For,
            AT_RULE_EACH => Directive::Each,
            AT_RULE_IF => Directive::If,
            AT_RULE_MEDIA => Directive::Media,
            _ if KEYFRAMES.is_match(name) => Directive::Keyframes,
            _ => Directive::Other,
        }
    }
}

/// Runs the macro engine over a stylesheet
#[derive(Debug, Clone, Default)]
pub struct Processor {
    pub(crate) options: Options,
    pub(crate) scopes: ScopeStore,
}

impl Processor {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            scopes: ScopeStore::new(),
        }
    }

    /// Scopes recorded so far, for inspection after a run
    pub fn scopes(&self) -> &ScopeStore {
        &self.scopes
    }

    /// Install the configured variables on the root, then rewrite the whole tree
    pub fn process(&mut self, tree: &mut Stylesheet, sink: &mut dyn DiagnosticSink) {
        let root = tree.root();
        for (name, value) in &self.options.variables {
            self.scopes.set(tree, root, name, value);
        }

        log::debug!(
            "Processing stylesheet with {} initial variable(s)",
            self.options.variables.len()
        );
        self.walk(tree, root, sink);
    }

    /// Visit the children of `container` in document order
    pub(crate) fn walk(&mut self, tree: &mut Stylesheet, container: NodeId, sink: &mut dyn DiagnosticSink) {
        let mut index = 0;
        while let Some(&node) = tree.children(container).get(index) {
            index += self.visit(tree, container, node, sink);
        }
    }

    fn visit(
        &mut self,
        tree: &mut Stylesheet,
        container: NodeId,
        node: NodeId,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let occupied = match tree.kind(node).clone() {
            NodeKind::Declaration { prop, value } => {
                self.visit_declaration(tree, container, node, &prop, &value, sink)
            }
            NodeKind::Rule { selector } => {
                let selector = self.interpolate(tree, container, &selector, node, sink);
                *tree.kind_mut(node) = NodeKind::Rule { selector };
                1
            }
            NodeKind::AtRule { name, params, .. } => match Directive::classify(&name) {
                Directive::For => self.expand_for(tree, container, node, &params, sink),
                Directive::Each => self.expand_each(tree, container, node, &params, sink),
                Directive::If => self.expand_if(tree, node, &params, sink),
                Directive::Media | Directive::Keyframes => {
                    let interpolated = self.interpolate(tree, container, &params, node, sink);
                    if let NodeKind::AtRule { params, .. } = tree.kind_mut(node) {
                        *params = interpolated;
                    }
                    1
                }
                Directive::Other => 1,
            },
            NodeKind::Root | NodeKind::Comment { .. } => 1,
        };

        if tree.is_attached(node) && !tree.children(node).is_empty() {
            self.walk(tree, node, sink);
        }
        occupied
    }

    fn visit_declaration(
        &mut self,
        tree: &mut Stylesheet,
        container: NodeId,
        node: NodeId,
        prop: &str,
        value: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        if VARIABLE_DECLARATION.is_match(prop) {
            let value = self.interpolate(tree, container, value, node, sink);
            self.scopes.set(tree, container, &prop[1..], &value);
            tree.remove(node);
            return 0;
        }

        let prop = self.interpolate(tree, container, prop, node, sink);
        let value = self.interpolate(tree, container, value, node, sink);
        *tree.kind_mut(node) = NodeKind::Declaration { prop, value };
        1
    }

    /// Interpolate `text` against the scopes visible from `scope_node`, reporting
    /// unresolved references at `location`
    pub(crate) fn interpolate(
        &self,
        tree: &Stylesheet,
        scope_node: NodeId,
        text: &str,
        location: NodeId,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        Interpolator::new(&self.scopes, tree, self.options.warn_of_unresolved).interpolate(
            scope_node,
            text,
            Some(location),
            sink,
        )
    }
}
