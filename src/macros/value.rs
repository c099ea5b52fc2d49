//! Runtime values of the macro engine
//!
//! Every variable holds a [`Value`]: either a scalar string or an ordered list of
//! values. Lists only come from comma separated literals such as
//! `(a, b), (c)`. Numbers are never stored as such; they are recovered from the
//! text when a comparison or a loop bound needs them.

use std::cmp::Ordering;
use std::fmt;

/// A scalar string or an ordered list of values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn scalar(text: impl Into<String>) -> Self {
        Value::Scalar(text.into())
    }

    /// Parse a comma separated list literal.
    ///
    /// Each top-level segment wrapped in a single matching pair of parentheses
    /// becomes a nested list; any other segment is a trimmed scalar. With `first`
    /// set, a literal with exactly one segment yields that segment's value instead
    /// of a one-element list.
    pub fn parse_array_literal(raw: &str, first: bool) -> Value {
        let mut items: Vec<Value> = split_comma(raw)
            .into_iter()
            .map(|segment| match unwrap_parens(&segment) {
                Some(inner) => Value::parse_array_literal(inner, false),
                None => Value::Scalar(segment),
            })
            .collect();

        if first && items.len() == 1 {
            if let Some(item) = items.pop() {
                return item;
            }
        }
        Value::Array(items)
    }

    /// Text substituted for a reference to this value.
    ///
    /// Lists are joined with `", "`, nested lists are wrapped in parentheses.
    pub fn render(&self) -> String {
        match self {
            Value::Scalar(text) => text.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Scalar(text) => text.clone(),
                    Value::Array(_) => format!("({})", item.render()),
                })
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Elements visited by `@each`.
    ///
    /// A scalar is a one-element list, except the empty scalar which has none.
    pub fn elements(&self) -> Vec<Value> {
        match self {
            Value::Scalar(text) if text.is_empty() => Vec::new(),
            Value::Scalar(_) => vec![self.clone()],
            Value::Array(items) => items.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Split on top-level commas. The last segment is always kept, so `""` gives `[""]`.
pub fn split_comma(text: &str) -> Vec<String> {
    split_list(text, &[','], true)
}

/// Split on top-level whitespace, dropping empty tokens
pub fn split_space(text: &str) -> Vec<String> {
    split_list(text, &[' ', '\n', '\t'], false)
}

/// Separators inside quotes or parentheses, or escaped with a backslash, do not split
fn split_list(text: &str, separators: &[char], keep_last: bool) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in text.chars() {
        let mut split = false;

        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
        } else if ch == '"' || ch == '\'' {
            quote = Some(ch);
        } else if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && separators.contains(&ch) {
            split = true;
        }

        if split {
            if !current.is_empty() {
                parts.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }

    if keep_last || !current.is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Interior of `(...)` when the opening parenthesis is closed by the final character
fn unwrap_parens(segment: &str) -> Option<&str> {
    let inner = segment.strip_prefix('(')?.strip_suffix(')')?;

    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in inner.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
        } else if ch == '"' || ch == '\'' {
            quote = Some(ch);
        } else if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth -= 1;
            if depth == 0 {
                return None;
            }
        }
    }
    Some(inner)
}

/// A comparison operand: a number when the whole text is numeric, the text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Text(String),
}

/// Coerce `text` to a number when the entire trimmed text is one
pub fn to_numeric_if_valid(text: &str) -> Operand {
    match parse_number(text) {
        Some(number) => Operand::Number(number),
        None => Operand::Text(text.to_string()),
    }
}

/// Numeric value of `text` for loop bounds: blank is zero, anything else
/// unparsable is NaN
pub fn to_number(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    parse_number(text).unwrap_or(f64::NAN)
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // Rust also accepts "inf" and "nan", which are not numbers here
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Shortest text for a number: `1`, `0.5`, `-2`
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number == f64::INFINITY {
        "Infinity".to_string()
    } else if number == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if number == 0.0 {
        "0".to_string()
    } else {
        number.to_string()
    }
}

/// Comparison operators accepted by `@if`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    pub fn parse(operator: &str) -> Option<Self> {
        match operator {
            "==" => Some(Comparison::Equal),
            "!=" => Some(Comparison::NotEqual),
            "<" => Some(Comparison::Less),
            "<=" => Some(Comparison::LessOrEqual),
            ">" => Some(Comparison::Greater),
            ">=" => Some(Comparison::GreaterOrEqual),
            _ => None,
        }
    }

    /// Evaluate `left <op> right`.
    ///
    /// Two numbers compare numerically and two texts lexically. A number and a
    /// text are never equal; ordering them compares the number against the
    /// text's numeric value, which is NaN (and therefore false) unless the text
    /// is blank.
    pub fn evaluate(self, left: &Operand, right: &Operand) -> bool {
        let ordering = match (left, right) {
            (Operand::Number(a), Operand::Number(b)) => a.partial_cmp(b),
            (Operand::Text(a), Operand::Text(b)) => Some(a.cmp(b)),
            (Operand::Number(a), Operand::Text(b)) => {
                if matches!(self, Comparison::Equal | Comparison::NotEqual) {
                    return self == Comparison::NotEqual;
                }
                a.partial_cmp(&to_number(b))
            }
            (Operand::Text(a), Operand::Number(b)) => {
                if matches!(self, Comparison::Equal | Comparison::NotEqual) {
                    return self == Comparison::NotEqual;
                }
                to_number(a).partial_cmp(b)
            }
        };

        match (self, ordering) {
            (Comparison::NotEqual, None) => true,
            (_, None) => false,
            (Comparison::Equal, Some(ord)) => ord == Ordering::Equal,
            (Comparison::NotEqual, Some(ord)) => ord != Ordering::Equal,
            (Comparison::Less, Some(ord)) => ord == Ordering::Less,
            (Comparison::LessOrEqual, Some(ord)) => ord != Ordering::Greater,
            (Comparison::Greater, Some(ord)) => ord == Ordering::Greater,
            (Comparison::GreaterOrEqual, Some(ord)) => ord != Ordering::Less,
        }
    }
}
