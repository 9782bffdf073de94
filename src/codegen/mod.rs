// src/codegen/mod.rs
pub mod build;
pub mod emit;
pub mod io;
pub mod scanner;
pub mod tables;

// Re-exports to keep the external API small.
pub use build::build_tables;
pub use emit::{scanner_source, write_scanner};
pub use io::{load_tables_bin_bytes, load_tables_json_bytes, save_tables_bin, save_tables_json};
pub use scanner::{EOI_KIND, ERROR_KIND, Scanner, Token};
pub use tables::ScannerTables;
