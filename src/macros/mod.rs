//! Stylesheet macro engine
//!
//! Resolves `$variables`, interpolation and the compile-time control constructs
//! `@for`, `@each` and `@if`/`@else` in a parsed stylesheet:
//! - `value`: scalar and list values, list literal parsing, numeric coercion
//! - `scope`: per-node bindings with parent-chain lookup
//! - `interpolate`: substitution of references inside text
//! - `transform`: the tree walk and node dispatch
//! - `control`: loop unrolling and branch selection

pub mod constants;
pub mod control;
pub mod diagnostics;
pub mod interpolate;
pub mod scope;
pub mod transform;
pub mod value;

pub use diagnostics::{DiagnosticSink, Diagnostics, Warning};
pub use scope::{Resolution, Scope, ScopeStore};
pub use transform::Processor;
pub use value::Value;

#[cfg(test)]
mod scope_tests;
#[cfg(test)]
mod transform_tests;
