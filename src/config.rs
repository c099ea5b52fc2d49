//! Processing options
//!
//! Options can be built in code, loaded from a JSON or YAML file, and overlaid
//! with `NAME=VALUE` pairs from the command line.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, IoContext, Result};
use crate::macros::value::format_number;

/// Options of one processing run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Report references that do not resolve
    pub warn_of_unresolved: bool,
    /// Initial variables installed into the root scope, by name without `$`
    #[serde(deserialize_with = "deserialize_variables")]
    pub variables: BTreeMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            warn_of_unresolved: true,
            variables: BTreeMap::new(),
        }
    }
}

impl Options {
    /// Load options from a file. `.json` files are read as JSON, everything
    /// else as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_io_context(&format!("Failed to read options file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content).map_err(|e| match e {
                Error::Json { source, .. } => Error::Json {
                    message: format!("Invalid options file {}", path.display()),
                    source,
                },
                other => other,
            })
        } else {
            Self::from_yaml(&content).map_err(|e| match e {
                Error::Yaml { source, .. } => Error::Yaml {
                    message: format!("Invalid options file {}", path.display()),
                    source,
                },
                other => other,
            })
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty YAML document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Add or replace one initial variable
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Overlay variables, replacing existing ones of the same name
    pub fn merge_variables<I>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.variables.extend(variables);
    }
}

/// Split a `NAME=VALUE` pair. A leading `$` on the name is dropped.
pub fn parse_variable_assignment(assignment: &str) -> Result<(String, String)> {
    let Some((name, value)) = assignment.split_once('=') else {
        return Err(Error::InvalidArgument {
            message: format!("Expected NAME=VALUE, got '{}'", assignment),
        });
    };

    let name = name.trim().trim_start_matches('$');
    if name.is_empty() {
        return Err(Error::InvalidArgument {
            message: format!("Missing variable name in '{}'", assignment),
        });
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Scalars accepted as variable values in option files
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            RawScalar::Text(text) => text,
            RawScalar::Integer(number) => number.to_string(),
            RawScalar::Float(number) => format_number(number),
            RawScalar::Bool(flag) => flag.to_string(),
        }
    }
}

fn deserialize_variables<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, RawScalar>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, value.into_text()))
        .collect())
}
