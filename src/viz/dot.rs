// src/viz/dot.rs
// Graphviz output for every stage of the pipeline. These functions only read
// their input; rendering shells out to `dot` when it is installed and merely
// warns when it is not.

use std::fmt::Write as _;
use std::path::Path;
use std::process::Command;

use crate::automata::{Dfa, Nfa, StateId};
use crate::regex::Ast;

fn escape_label(byte: u8) -> String {
    match byte {
        b'"' => "\\\"".into(),
        b'\\' => "\\\\".into(),
        b'\n' => "\\n".into(),
        b'\t' => "\\t".into(),
        b'\r' => "\\r".into(),
        b if (32..=126).contains(&b) => (b as char).to_string(),
        b => format!("0x{b:02X}"),
    }
}

fn header(out: &mut String, kind: &str, accepting: &[StateId], start: StateId) {
    let _ = writeln!(out, "digraph {kind} {{");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=circle];\n");
    if !accepting.is_empty() {
        out.push_str("  node [shape=doublecircle];");
        for id in accepting {
            let _ = write!(out, " {id}");
        }
        out.push_str(";\n");
    }
    out.push_str("  node [shape=circle];\n");
    out.push_str("  start [shape=none, label=\"\"];\n");
    let _ = writeln!(out, "  start -> {start};");
}

pub fn nfa_dot(nfa: &Nfa) -> String {
    let mut accepting: Vec<StateId> = nfa.accepts().keys().copied().collect();
    accepting.sort_unstable();

    let mut out = String::new();
    header(&mut out, "NFA", &accepting, nfa.start());

    for from in 0..nfa.num_states() as StateId {
        for byte in nfa.symbols(from) {
            for &to in nfa.byte_targets(from, byte) {
                let _ = writeln!(
                    out,
                    "  {from} -> {to} [label=\"{}\"];",
                    escape_label(byte)
                );
            }
        }
        for &to in nfa.epsilon_targets(from) {
            let _ = writeln!(out, "  {from} -> {to} [label=\"ε\"];");
        }
    }

    out.push_str("}\n");
    out
}

pub fn dfa_dot(dfa: &Dfa) -> String {
    let mut accepting: Vec<StateId> = dfa.accepts().keys().copied().collect();
    accepting.sort_unstable();

    let mut out = String::new();
    header(&mut out, "DFA", &accepting, dfa.start());

    for from in 0..dfa.num_states() as StateId {
        for &byte in dfa.alphabet() {
            if let Some(to) = dfa.next_state(from, byte) {
                let _ = writeln!(
                    out,
                    "  {from} -> {to} [label=\"{}\"];",
                    escape_label(byte)
                );
            }
        }
    }

    out.push_str("}\n");
    out
}

/// Pattern syntax tree as a DOT tree, one node per AST variant.
pub fn ast_dot(ast: &Ast) -> String {
    fn node_label(ast: &Ast) -> String {
        match ast {
            Ast::Char(b) => format!("Char({})", escape_label(*b)),
            Ast::Dot => "Dot".into(),
            Ast::CharSet { negated, .. } => {
                if *negated {
                    "CharSet(^)".into()
                } else {
                    "CharSet".into()
                }
            }
            Ast::Concat(..) => "Concat".into(),
            Ast::Alt(..) => "Alt".into(),
            Ast::Star(_) => "Star".into(),
            Ast::Plus(_) => "Plus".into(),
            Ast::Question(_) => "Question".into(),
            Ast::Range { min, max, .. } => match max {
                Some(max) => format!("Range({min},{max})"),
                None => format!("Range({min},)"),
            },
        }
    }

    fn children(ast: &Ast) -> Vec<&Ast> {
        match ast {
            Ast::Concat(l, r) | Ast::Alt(l, r) => vec![l, r],
            Ast::Star(c) | Ast::Plus(c) | Ast::Question(c) => vec![c],
            Ast::Range { child, .. } => vec![child],
            _ => Vec::new(),
        }
    }

    fn walk(ast: &Ast, out: &mut String, next_id: &mut usize) -> usize {
        let id = *next_id;
        *next_id += 1;
        let _ = writeln!(out, "  n{id} [label=\"{}\"];", node_label(ast));
        for child in children(ast) {
            let child_id = walk(child, out, next_id);
            let _ = writeln!(out, "  n{id} -> n{child_id};");
        }
        id
    }

    let mut out = String::from("digraph AST {\n");
    let mut next_id = 0;
    walk(ast, &mut out, &mut next_id);
    out.push_str("}\n");
    out
}

pub fn write_dot(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, content)?;
    log::info!("generated DOT file: {}", path.display());
    Ok(())
}

/// Best-effort Graphviz render of an already-written .dot file.
pub fn render_dot(dot_path: &Path, image_path: &Path, format: &str) {
    let out = image_path.with_extension(format);
    let status = Command::new("dot")
        .arg(format!("-T{format}"))
        .arg(dot_path)
        .arg("-o")
        .arg(&out)
        .status();
    match status {
        Ok(s) if s.success() => log::info!("rendered visualization: {}", out.display()),
        Ok(s) => log::warn!("`dot` exited with {s}; is Graphviz installed?"),
        Err(e) => log::warn!("could not run `dot`: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::{determinize, thompson};
    use crate::regex::parser::parse;

    #[test]
    fn nfa_dot_marks_accepts_and_epsilons() {
        let nfa = thompson::compile_pattern(&parse("a|b").unwrap(), 0).unwrap();
        let dot = nfa_dot(&nfa);
        assert!(dot.starts_with("digraph NFA {"));
        assert!(dot.contains("doublecircle"));
        assert!(dot.contains("[label=\"ε\"];"));
        assert!(dot.contains("[label=\"a\"];"));
    }

    #[test]
    fn dfa_dot_escapes_labels() {
        let frag = thompson::compile_pattern(&parse(r#"\\|\""#).unwrap(), 0).unwrap();
        let dfa = determinize(&thompson::merge_all(vec![frag])).unwrap();
        let dot = dfa_dot(&dfa);
        assert!(dot.contains("[label=\"\\\\\"];"));
        assert!(dot.contains("[label=\"\\\"\"];"));
    }

    #[test]
    fn ast_dot_is_a_tree() {
        let dot = ast_dot(&parse("a(b|c)*").unwrap());
        assert!(dot.contains("Concat"));
        assert!(dot.contains("Star"));
        assert!(dot.contains("Alt"));
        // Six nodes, so five tree edges.
        assert_eq!(dot.matches(" -> ").count(), 5);
    }
}
