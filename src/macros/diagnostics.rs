//! Non-fatal warnings raised while processing
//!
//! The engine never aborts on bad input. The only thing it reports is a
//! variable reference it could not resolve, delivered to a [`DiagnosticSink`]
//! anchored at the node whose text contained it.

use std::fmt;

use crate::stylesheet::{NodeId, Position};

/// A single warning anchored at a node
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub node: NodeId,
    pub position: Option<Position>,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}: {}", position, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Level at which collected warnings are echoed to the log. Callers report
/// warnings themselves, so the echo stays below the default `Warn` filter.
pub(crate) const ECHO_LEVEL: log::Level = log::Level::Debug;

/// Receiver of warnings
pub trait DiagnosticSink {
    fn warn(&mut self, message: String, node: NodeId, position: Option<Position>);
}

/// Sink collecting warnings in the order they were raised
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl DiagnosticSink for Diagnostics {
    fn warn(&mut self, message: String, node: NodeId, position: Option<Position>) {
        let warning = Warning {
            message,
            node,
            position,
        };
        log::log!(ECHO_LEVEL, "{}", warning);
        self.warnings.push(warning);
    }
}
