// src/spec/mod.rs
pub mod parser;
pub mod scanner;

pub use parser::{TokenDef, parse_spec};

use std::path::Path;

use crate::error::Result;

/// A parsed specification file: the ordered definitions plus the name the
/// emitted scanner is filed under (the spec file's stem).
#[derive(Debug, Clone)]
pub struct LexSpec {
    pub name: String,
    pub defs: Vec<TokenDef>,
}

pub fn has_lexy_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("lexy")
}

/// Read and parse a `.lexy` file. The extension is the CLI's concern; this
/// only needs the file to exist and parse.
pub fn load_file(path: &Path) -> Result<LexSpec> {
    let text = std::fs::read_to_string(path)?;
    let defs = parse_spec(&text)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scanner")
        .to_string();
    Ok(LexSpec { name, defs })
}
