//! Advanced Variables
//!
//! A preprocessing macro engine for stylesheets. It resolves scoped `$variables`,
//! string interpolation and the compile-time constructs `@for`, `@each` and
//! `@if`/`@else`, then hands the rewritten tree back for printing.

pub mod config;
pub mod error;
pub mod logging;
pub mod macros;
pub mod stylesheet;

pub use config::Options;
pub use error::{Error, Result};
pub use macros::{Diagnostics, Processor, Warning};

/// Parse `source`, run the macro engine over it and print the result.
///
/// Returns the printed stylesheet together with every warning raised.
pub fn process_str(source: &str, options: Options) -> Result<(String, Vec<Warning>)> {
    let mut tree = stylesheet::parse(source)?;
    let mut diagnostics = Diagnostics::new();
    Processor::new(options).process(&mut tree, &mut diagnostics);
    Ok((stylesheet::print(&tree), diagnostics.into_warnings()))
}

#[cfg(test)]
mod config_tests;
