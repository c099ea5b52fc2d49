//! Stylesheet syntax tree
//!
//! The host side of the macro engine:
//! - an arena tree of comments, at-rules, rules and declarations
//! - a permissive block parser turning source text into that tree
//! - a canonical printer turning it back into text

pub mod node;
pub mod parser;
pub mod printer;
pub mod tree_printer;

pub use node::{NodeId, NodeKind, Position, Stylesheet};
pub use parser::parse;
pub use printer::print;

#[cfg(test)]
mod node_tests;
