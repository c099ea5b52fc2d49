//! Names and patterns recognized by the macro engine
//!
//! Centralizing these keeps the dispatch in the transformer and the matchers in
//! the interpolation engine in agreement.

/// `@for $i from 1 to 3 [by 1]`
pub const AT_RULE_FOR: &str = "for";
/// `@each $item [$index] in a, b, c`
pub const AT_RULE_EACH: &str = "each";
/// `@if $a == 1`
pub const AT_RULE_IF: &str = "if";
/// Branch consumed by a directly preceding `@if`
pub const AT_RULE_ELSE: &str = "else";
/// Parameters are interpolated in place
pub const AT_RULE_MEDIA: &str = "media";

/// Whole property text of a variable declaration, e.g. `$primary-color`
pub const VARIABLE_DECLARATION_PATTERN: &str = r"^\$[\w-]+$";

/// References inside arbitrary text: `#{$name}`, `$(name)` and `$name`.
///
/// Each form captures the name in its own group. Escaping with a preceding
/// backslash is checked by the caller.
pub const VARIABLE_REFERENCE_PATTERN: &str =
    r"#\{\$([A-Za-z_][\w-]*)\}|\$\(([A-Za-z_][\w-]*)\)|\$([A-Za-z_][\w-]*)";

/// Trailing marker of a default assignment
pub const DEFAULT_MARKER_PATTERN: &str = r"\s+!default$";

/// `keyframes` with an optional vendor prefix
pub const KEYFRAMES_PATTERN: &str = r"^(-(moz|o|webkit)-)?keyframes$";

/// Keyword separating the bindings of `@each` from its list
pub const EACH_IN_SEPARATOR: &str = " in ";
