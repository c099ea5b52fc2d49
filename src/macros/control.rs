//! Control constructs: `@for`, `@each` and `@if`/`@else`
//!
//! Each construct is evaluated once, splices zero or more nodes in front of
//! itself and then removes itself. Malformed parameters never fail the run; they
//! degrade to NaN bounds, an empty list or a false condition.

use crate::macros::constants::{AT_RULE_ELSE, EACH_IN_SEPARATOR};
use crate::macros::diagnostics::DiagnosticSink;
use crate::macros::transform::Processor;
use crate::macros::value::{format_number, split_space, to_number, to_numeric_if_valid, Comparison, Value};
use crate::stylesheet::{NodeId, Stylesheet};

/// Drop the leading `$` (or whatever single character stands in for it)
fn binding_name(token: &str) -> String {
    let token = token.trim();
    token.chars().skip(1).collect()
}

impl Processor {
    /// `@for $name from START to END [by STEP]`
    pub(crate) fn expand_for(
        &mut self,
        tree: &mut Stylesheet,
        container: NodeId,
        node: NodeId,
        params: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let tokens = split_space(params);
        let Some(name) = tokens.first().map(|token| binding_name(token)) else {
            log::debug!("@for without parameters, dropping it");
            tree.remove(node);
            return 0;
        };

        if tokens.len() < 5 {
            log::debug!("Malformed @for parameters '{}'", params);
        }

        let mut bound = |index: usize| match tokens.get(index) {
            Some(token) => to_number(&self.interpolate(tree, node, token, node, sink)),
            None => f64::NAN,
        };
        let start = bound(2);
        let end = bound(4);
        let step = match bound(6) {
            step if step.is_nan() || step == 0.0 => 1.0,
            step => step.abs(),
        };

        let direction = if start <= end { 1.0 } else { -1.0 };
        let step = step * direction;

        let mut current = start;
        let mut iterations = 0usize;
        let mut inserted = 0;
        while current * direction <= end * direction {
            self.scopes.bind(node, &name, Value::Scalar(format_number(current)));
            inserted += self.splice_iteration(tree, container, node, sink);
            iterations += 1;

            let next = current + step;
            if next == current {
                log::debug!("@for step {} no longer advances from {}, stopping", step, current);
                break;
            }
            current = next;
        }

        log::debug!("@for ${} expanded {} iteration(s)", name, iterations);
        tree.remove(node);
        self.scopes.discard(node);
        inserted
    }

    /// `@each $name [$index] in LIST`
    pub(crate) fn expand_each(
        &mut self,
        tree: &mut Stylesheet,
        container: NodeId,
        node: NodeId,
        params: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let (head, list) = params.split_once(EACH_IN_SEPARATOR).unwrap_or((params, ""));

        let mut names = head.split_whitespace().map(binding_name);
        let Some(name) = names.next() else {
            log::debug!("@each without a binding name, dropping it");
            tree.remove(node);
            return 0;
        };
        let index_name = names.next().filter(|index_name| !index_name.is_empty());

        let list = self.interpolate(tree, node, list, node, sink);
        let elements = Value::parse_array_literal(&list, true).elements();

        let mut inserted = 0;
        for (index, element) in elements.iter().enumerate() {
            self.scopes.bind(node, &name, element.clone());
            if let Some(index_name) = &index_name {
                self.scopes.bind(node, index_name, Value::Scalar(index.to_string()));
            }
            inserted += self.splice_iteration(tree, container, node, sink);
        }

        log::debug!("@each ${} expanded {} iteration(s)", name, elements.len());
        tree.remove(node);
        self.scopes.discard(node);
        inserted
    }

    /// `@if LEFT OP RIGHT`, consuming a directly following `@else`
    pub(crate) fn expand_if(
        &mut self,
        tree: &mut Stylesheet,
        node: NodeId,
        params: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let holds = self.evaluate_condition(tree, node, params, sink);

        let else_branch = tree
            .next_sibling(node)
            .filter(|&next| tree.kind(next).at_rule_name() == Some(AT_RULE_ELSE));

        log::debug!("@if {} evaluated to {}", params, holds);

        let inserted = if holds {
            self.walk(tree, node, sink);
            let children = tree.children(node).to_vec();
            if let Some(else_branch) = else_branch {
                tree.remove(else_branch);
            }
            tree.insert_before(node, &children)
        } else if let Some(else_branch) = else_branch {
            self.walk(tree, else_branch, sink);
            let children = tree.children(else_branch).to_vec();
            let inserted = tree.insert_before(node, &children);
            tree.remove(else_branch);
            self.scopes.discard(else_branch);
            inserted
        } else {
            0
        };

        tree.remove(node);
        self.scopes.discard(node);
        inserted
    }

    fn evaluate_condition(
        &self,
        tree: &Stylesheet,
        node: NodeId,
        params: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        let tokens = split_space(params);
        let [left, operator, right, ..] = tokens.as_slice() else {
            log::debug!("Malformed @if condition '{}'", params);
            return false;
        };
        if tokens.len() > 3 {
            log::debug!("Ignoring trailing tokens in @if condition '{}'", params);
        }

        let left = to_numeric_if_valid(&self.interpolate(tree, node, left, node, sink));
        let right = to_numeric_if_valid(&self.interpolate(tree, node, right, node, sink));

        match Comparison::parse(operator) {
            Some(comparison) => comparison.evaluate(&left, &right),
            None => {
                log::debug!("Unknown @if operator '{}'", operator);
                false
            }
        }
    }

    /// Copy the construct with a private snapshot of its bindings, walk the copy
    /// and move its resulting children in front of the construct
    fn splice_iteration(
        &mut self,
        tree: &mut Stylesheet,
        container: NodeId,
        node: NodeId,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let copy = tree.clone_subtree(node, Some(container));
        self.scopes.install(copy, self.scopes.snapshot(node));
        self.walk(tree, copy, sink);

        let children = tree.children(copy).to_vec();
        let inserted = tree.insert_before(node, &children);
        self.scopes.discard(copy);
        inserted
    }
}
