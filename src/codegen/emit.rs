// src/codegen/emit.rs
// Prints the generated scanner: the three data tables followed by a small
// self-contained C++ class implementing the maximal-munch loop. The output
// compiles on its own; it does not depend on this crate.

use std::fmt::Write as _;
use std::path::Path;

use super::tables::{NO_TOKEN, ScannerTables};
use crate::automata::ALPHABET_SIZE;
use crate::error::Result;

pub fn scanner_source(tables: &ScannerTables) -> String {
    let mut out = String::new();
    out.push_str("#include <string>\n");
    out.push_str("#include <cstring>\n\n");
    out.push_str(&transition_table(tables));
    out.push_str(&accepting_states(tables));
    out.push_str(&token_names(tables));
    out.push_str(&scanner_class(tables));
    out
}

pub fn write_scanner(path: &Path, tables: &ScannerTables) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, scanner_source(tables))?;
    log::info!("generated scanner: {}", path.display());
    Ok(())
}

fn transition_table(tables: &ScannerTables) -> String {
    let n = tables.num_states();
    let mut s = String::new();
    let _ = writeln!(s, "static const int TRANSITION_TABLE[{n}][{ALPHABET_SIZE}] = {{");
    for (i, row) in tables.transition.iter().enumerate() {
        s.push_str("    {");
        for (b, &next) in row.iter().enumerate() {
            let _ = write!(s, "{next}");
            if b + 1 < ALPHABET_SIZE {
                s.push_str(", ");
            }
        }
        s.push('}');
        if i + 1 < n {
            s.push(',');
        }
        s.push('\n');
    }
    s.push_str("};\n\n");
    s
}

fn accepting_states(tables: &ScannerTables) -> String {
    let n = tables.num_states();
    let mut s = String::new();
    let _ = writeln!(s, "static const int ACCEPTING_STATES[{n}] = {{");
    for (i, &kind) in tables.accept.iter().enumerate() {
        if kind == NO_TOKEN {
            s.push_str("    -1");
        } else {
            let _ = write!(s, "    {kind}");
        }
        if i + 1 < n {
            s.push(',');
        }
        s.push('\n');
    }
    s.push_str("};\n\n");
    s
}

fn token_names(tables: &ScannerTables) -> String {
    let mut s = String::new();
    s.push_str("static const char* TOKEN_NAMES[] = {\n");
    for (i, name) in tables.token_names.iter().enumerate() {
        let _ = write!(s, "    \"{name}\"");
        if i + 1 < tables.token_names.len() {
            s.push(',');
        }
        s.push('\n');
    }
    s.push_str("};\n\n");
    s
}

fn scanner_class(tables: &ScannerTables) -> String {
    let start = tables.start;
    let mut s = String::new();

    s.push_str("struct Token {\n");
    s.push_str("    int type;\n");
    s.push_str("    std::string lexeme;\n");
    s.push_str("};\n\n");

    s.push_str("class Scanner {\n");
    s.push_str("private:\n");
    s.push_str("    const char* input;\n");
    s.push_str("    size_t position;\n");
    s.push_str("    size_t length;\n\n");
    s.push_str("public:\n");
    s.push_str("    Scanner(const char* input) : input(input), position(0) {\n");
    s.push_str("        length = strlen(input);\n");
    s.push_str("    }\n\n");

    s.push_str("    Token getNextToken() {\n");
    s.push_str("        if (position >= length) {\n");
    s.push_str("            return {-1, \"\"};\n");
    s.push_str("        }\n\n");
    let _ = writeln!(s, "        int current_state = {start};");
    s.push_str("        size_t start_pos = position;\n");
    s.push_str("        int last_accepting_state = -1;\n");
    s.push_str("        size_t last_accepting_pos = position;\n\n");
    s.push_str("        while (position < length) {\n");
    s.push_str("            unsigned char c = input[position];\n");
    let _ = writeln!(
        s,
        "            int next_state = c < {ALPHABET_SIZE} ? TRANSITION_TABLE[current_state][c] : -1;"
    );
    s.push_str("\n            if (next_state == -1) break;\n\n");
    s.push_str("            current_state = next_state;\n");
    s.push_str("            position++;\n\n");
    s.push_str("            if (ACCEPTING_STATES[current_state] != -1) {\n");
    s.push_str("                last_accepting_state = current_state;\n");
    s.push_str("                last_accepting_pos = position;\n");
    s.push_str("            }\n");
    s.push_str("        }\n\n");
    s.push_str("        if (last_accepting_state != -1) {\n");
    s.push_str("            position = last_accepting_pos;\n");
    s.push_str(
        "            std::string lexeme(input + start_pos, last_accepting_pos - start_pos);\n",
    );
    s.push_str("            int token_type = ACCEPTING_STATES[last_accepting_state];\n");
    s.push_str("            return {token_type, lexeme};\n");
    s.push_str("        }\n\n");
    s.push_str("        position = start_pos + 1;\n");
    s.push_str("        return {-2, std::string(1, input[start_pos])};\n");
    s.push_str("    }\n");
    s.push_str("};\n\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::build::build_tables;
    use crate::spec::parse_spec;

    #[test]
    fn source_embeds_all_three_tables() {
        let defs = parse_spec("ID ::= \"[a-z]+\"\nNUM ::= \"[0-9]+\"").unwrap();
        let tables = build_tables(&defs).unwrap();
        let src = scanner_source(&tables);

        let n = tables.num_states();
        assert!(src.contains(&format!("static const int TRANSITION_TABLE[{n}][128]")));
        assert!(src.contains(&format!("static const int ACCEPTING_STATES[{n}]")));
        assert!(src.contains("static const char* TOKEN_NAMES[] = {\n    \"ID\",\n    \"NUM\"\n};"));
        assert!(src.contains(&format!("int current_state = {};", tables.start)));
        assert!(src.contains("Token getNextToken()"));
    }

    #[test]
    fn transition_rows_have_width_128() {
        let defs = parse_spec("A ::= \"a\"").unwrap();
        let tables = build_tables(&defs).unwrap();
        let table = transition_table(&tables);
        let row = table.lines().nth(1).unwrap();
        assert_eq!(row.matches(", ").count(), 127);
    }
}
