use crate::config::Options;
use crate::macros::diagnostics::{Diagnostics, ECHO_LEVEL};
use crate::macros::transform::{Directive, Processor};
use crate::macros::value::Value;
use crate::process_str;
use crate::stylesheet::{self, NodeKind};

fn run(source: &str) -> String {
    process_str(source, Options::default()).unwrap().0
}

#[test]
fn test_variable_declarations_are_removed_and_substituted() {
    let output = run("$color: red;\na { color: $color; }");
    assert_eq!(output, "a {\n  color: red;\n}\n");
}

#[test]
fn test_property_selector_and_value_interpolation() {
    let source = "$side: left; $name: card; $w: 2px;\n.#{$name} { border-#{$side}: $(w) solid; }";
    assert_eq!(run(source), ".card {\n  border-left: 2px solid;\n}\n");
}

#[test]
fn test_declaration_value_is_interpolated_before_storing() {
    let output = run("$base: 4px; $double: $base $base; a { margin: $double; }");
    assert_eq!(output, "a {\n  margin: 4px 4px;\n}\n");
}

#[test]
fn test_adjacent_references_in_values() {
    let (output, warnings) =
        process_str("$a: x; $b: y; p { v: #{$a}#{$b}; w: $a$b; }", Options::default()).unwrap();
    assert_eq!(output, "p {\n  v: xy;\n  w: xy;\n}\n");
    assert!(warnings.is_empty());
}

#[test]
fn test_media_and_keyframes_params() {
    let source = "$break: 600px; $anim: spin;\n\
        @media (min-width: $break) { a { b: c; } }\n\
        @-webkit-keyframes $anim {}\n\
        @keyframes $anim {}\n\
        @supports ($x) {}";
    let (output, warnings) = process_str(source, Options::default()).unwrap();

    assert_eq!(
        output,
        "@media (min-width: 600px) {\n  a {\n    b: c;\n  }\n}\n\
         @-webkit-keyframes spin {}\n\
         @keyframes spin {}\n\
         @supports ($x) {}\n"
    );
    // Other at-rules are not interpolated, so nothing is reported for `$x`
    assert!(warnings.is_empty());
}

#[test]
fn test_directive_classification() {
    assert_eq!(Directive::classify("for"), Directive::For);
    assert_eq!(Directive::classify("each"), Directive::Each);
    assert_eq!(Directive::classify("if"), Directive::If);
    assert_eq!(Directive::classify("media"), Directive::Media);
    assert_eq!(Directive::classify("-moz-keyframes"), Directive::Keyframes);
    assert_eq!(Directive::classify("-ms-keyframes"), Directive::Other);
    assert_eq!(Directive::classify("else"), Directive::Other);
}

#[test]
fn test_nested_scope_does_not_leak() {
    let source = "\
$x: outer;
.before { v: $x; }
.nested { $x: inner; v: $x; .deep { v: $x; } }
.after { v: $x; }";
    let output = run(source);

    assert_eq!(
        output,
        ".before {\n  v: outer;\n}\n\
         .nested {\n  v: inner;\n  .deep {\n    v: inner;\n  }\n}\n\
         .after {\n  v: outer;\n}\n"
    );
}

#[test]
fn test_later_declarations_shadow_for_later_siblings_only() {
    let output = run("$x: 1; a { v: $x; } $x: 2; b { v: $x; }");
    assert_eq!(output, "a {\n  v: 1;\n}\nb {\n  v: 2;\n}\n");
}

#[test]
fn test_default_declarations() {
    let output = run("$x: 1 !default; $x: 2 !default; a { v: $x; }");
    assert_eq!(output, "a {\n  v: 1;\n}\n");

    let options = Options::default().with_variable("x", "from-options");
    let (output, _) = process_str("$x: fallback !default; a { v: $x; }", options).unwrap();
    assert_eq!(output, "a {\n  v: from-options;\n}\n");
}

#[test]
fn test_unresolved_reference_reports_once() {
    let (output, warnings) = process_str("a { color: $missing; }", Options::default()).unwrap();

    assert_eq!(output, "a {\n  color: $missing;\n}\n");
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message,
        "Could not resolve variable \"$missing\" within \"$missing\""
    );
    assert_eq!(warnings[0].position.map(|p| p.line), Some(1));

    // The command line prints collected warnings; the log echo must not repeat them
    assert!(ECHO_LEVEL > log::LevelFilter::Warn);
}

#[test]
fn test_unresolved_reference_silenced_by_option() {
    let options = Options {
        warn_of_unresolved: false,
        ..Options::default()
    };
    let (output, warnings) = process_str("a { color: $missing; }", options).unwrap();

    assert_eq!(output, "a {\n  color: $missing;\n}\n");
    assert!(warnings.is_empty());
}

#[test]
fn test_initial_variables_live_on_root() {
    let mut tree = stylesheet::parse("a { color: $brand; }").unwrap();
    let mut diagnostics = Diagnostics::new();
    let mut processor = Processor::new(Options::default().with_variable("brand", "teal"));

    processor.process(&mut tree, &mut diagnostics);

    assert!(diagnostics.is_empty());
    let root_scope = processor.scopes().scope(tree.root()).unwrap();
    assert_eq!(root_scope.get("brand"), Some(&Value::scalar("teal")));
    let rule = tree.children(tree.root())[0];
    assert_eq!(
        tree.kind(tree.children(rule)[0]),
        &NodeKind::declaration("color", "teal")
    );
}

#[test]
fn test_expanded_constructs_release_their_scopes() {
    let source = "@for $i from 1 to 3 { a { $y: $i; v: $y; } }\n\
                  @each $c in r, g { b { v: $c; } }\n\
                  @if 1 == 2 { c { v: 1; } } @else { d { v: 2; } }";
    let mut tree = stylesheet::parse(source).unwrap();
    let mut diagnostics = Diagnostics::new();
    let mut processor = Processor::new(Options::default());

    processor.process(&mut tree, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(tree.children(tree.root()).len(), 6);
    // Only the three `a` rules declared something of their own
    assert_eq!(processor.scopes().len(), 3);
    for &rule in &tree.children(tree.root())[..3] {
        assert!(processor.scopes().scope(rule).is_some());
    }
}

#[test]
fn test_second_run_on_resolved_tree_is_noop() {
    let source = "$c: red; @for $i from 1 to 2 { .a-#{$i} { color: $c; } } @if 1 == 1 { b { x: y; } }";
    let once = run(source);
    let twice = run(&once);

    assert_eq!(once, twice);
    assert_eq!(
        once,
        ".a-1 {\n  color: red;\n}\n.a-2 {\n  color: red;\n}\nb {\n  x: y;\n}\n"
    );
}

#[test]
fn test_comments_and_plain_at_rules_pass_through() {
    let output = run("/* keep */ @import \"x.css\"; @font-face { font-family: F; }");
    assert_eq!(
        output,
        "/* keep */\n@import \"x.css\";\n@font-face {\n  font-family: F;\n}\n"
    );
}
