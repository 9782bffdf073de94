//! Malformed specs and patterns: every user-facing error kind is reachable,
//! carries its position, and maps to the documented exit code.

use lexy::Error;
use lexy::codegen::build_tables;
use lexy::spec::{load_file, parse_spec};

fn compile_err(spec: &str) -> Error {
    let defs = parse_spec(spec).expect("spec itself must parse");
    build_tables(&defs).expect_err("compilation should fail")
}

#[test]
fn malformed_line_is_spec_syntax() {
    let err = parse_spec("ID == \"[a-z]+\"").unwrap_err();
    assert!(matches!(err, Error::SpecSyntax { line: 1, .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.stage(), "spec");
}

#[test]
fn lowercase_name_is_spec_syntax() {
    assert!(matches!(
        parse_spec("id ::= \"a\"").unwrap_err(),
        Error::SpecSyntax { .. }
    ));
}

#[test]
fn unterminated_pattern_is_spec_syntax() {
    assert!(matches!(
        parse_spec("A ::= \"abc").unwrap_err(),
        Error::SpecSyntax { .. }
    ));
}

#[test]
fn duplicate_token_reports_both_lines_and_exit_code() {
    let err = parse_spec("A ::= \"a\"\nB ::= \"b\"\nA ::= \"aa\"").unwrap_err();
    let Error::DuplicateToken {
        name,
        first_line,
        second_line,
    } = &err
    else {
        panic!("expected DuplicateToken, got {err:?}");
    };
    assert_eq!(name, "A");
    assert_eq!(*first_line, 1);
    assert_eq!(*second_line, 3);
    assert_eq!(err.exit_code(), 2);
    let rendered = err.to_string();
    assert!(rendered.contains("lines 1 and 3"), "got: {rendered}");
}

#[test]
fn unbalanced_group_is_regex_syntax() {
    let err = compile_err("BAD ::= \"(ab\"");
    assert!(matches!(err, Error::RegexSyntax { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.stage(), "regex");
    assert!(err.to_string().contains("BAD"));
}

#[test]
fn dangling_escape_is_regex_syntax() {
    // A lone trailing backslash cannot come out of a .lexy file (the spec
    // layer would see it as an escaped quote), so drive the parser directly.
    let err = lexy::regex::parse("ab\\").unwrap_err();
    assert!(matches!(err, Error::RegexSyntax { position: 2, .. }));
}

#[test]
fn inverted_set_range_is_regex_semantic() {
    let err = compile_err("BAD ::= \"[z-a]\"");
    assert!(matches!(err, Error::RegexSemantic { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn zero_repetition_quantifier_is_regex_semantic() {
    let err = compile_err("BAD ::= \"x{0,0}\"");
    assert!(matches!(err, Error::RegexSemantic { .. }));
}

#[test]
fn impossible_negated_set_is_regex_semantic() {
    let err = compile_err("BAD ::= \"[^ -~]\"");
    assert!(matches!(err, Error::RegexSemantic { .. }));
}

#[test]
fn regex_error_positions_point_into_the_pattern() {
    let err = compile_err("A ::= \"ab(\"");
    let Error::RegexSyntax { position, .. } = err else {
        panic!("expected RegexSyntax");
    };
    // The `(` is at offset 2; the error is at end of input, offset 3.
    assert_eq!(position, 3);
}

#[test]
fn non_ascii_pattern_byte_is_regex_semantic() {
    let err = compile_err("X ::= \"é\"");
    assert!(matches!(err, Error::RegexSemantic { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("X"));
}

#[test]
fn empty_alphabet_reaches_the_documented_error_kind() {
    // No .lexy pattern can produce a transition-free fragment, so exercise
    // the guard the way the pipeline would hit it on a degenerate automaton.
    use lexy::automata::{Nfa, determinize};

    let err = determinize(&Nfa::with_states(1)).unwrap_err();
    assert!(matches!(err, Error::EmptyAlphabet { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.stage(), "automata");
}

#[test]
fn missing_file_is_io_with_exit_code_4() {
    let err = load_file(std::path::Path::new("does/not/exist.lexy")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(err.stage(), "io");
}
