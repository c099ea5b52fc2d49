//! Variable interpolation inside arbitrary text
//!
//! Three reference forms are substituted, scanned left to right without
//! overlapping: `#{$name}`, `$(name)` and `$name`. A reference preceded by a
//! backslash is left alone. References that do not resolve keep their original
//! text and, when enabled, raise one warning each.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::macros::constants::VARIABLE_REFERENCE_PATTERN;
use crate::macros::diagnostics::DiagnosticSink;
use crate::macros::scope::{Resolution, ScopeStore};
use crate::stylesheet::{NodeId, Stylesheet};

static VARIABLE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(VARIABLE_REFERENCE_PATTERN).expect("variable reference pattern is valid")
});

/// Result of substituting references in one piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub text: String,
    /// Names of references left untouched, in order of appearance
    pub unresolved: Vec<String>,
}

impl Interpolation {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Substitutes references against the scopes visible from a node
pub struct Interpolator<'a> {
    scopes: &'a ScopeStore,
    tree: &'a Stylesheet,
    warn_of_unresolved: bool,
}

impl<'a> Interpolator<'a> {
    pub fn new(scopes: &'a ScopeStore, tree: &'a Stylesheet, warn_of_unresolved: bool) -> Self {
        Self {
            scopes,
            tree,
            warn_of_unresolved,
        }
    }

    /// Substitute every resolvable reference, collecting the unresolved names
    pub fn resolve(&self, scope_node: NodeId, text: &str) -> Interpolation {
        let mut unresolved = Vec::new();

        let replaced = VARIABLE_REFERENCE.replace_all(text, |caps: &Captures| {
            let reference = &caps[0];
            let escaped = caps
                .get(0)
                .is_some_and(|m| text[..m.start()].ends_with('\\'));
            if escaped {
                return reference.to_string();
            }

            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());

            match self.scopes.get(self.tree, scope_node, name) {
                Resolution::Resolved(value) => value.render(),
                Resolution::Unresolved => {
                    unresolved.push(name.to_string());
                    reference.to_string()
                }
            }
        });

        Interpolation {
            text: replaced.into_owned(),
            unresolved,
        }
    }

    /// Substitute references in `text` and report each unresolved one against
    /// `location` (or `scope_node` when no finer anchor is given)
    pub fn interpolate(
        &self,
        scope_node: NodeId,
        text: &str,
        location: Option<NodeId>,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        let interpolation = self.resolve(scope_node, text);

        if self.warn_of_unresolved {
            let anchor = location.unwrap_or(scope_node);
            for name in &interpolation.unresolved {
                sink.warn(
                    format!("Could not resolve variable \"${}\" within \"{}\"", name, text),
                    anchor,
                    self.tree.position(anchor),
                );
            }
        }

        interpolation.text
    }
}
