// src/bin/gen_tables.rs
// Build the scanner tables for a spec and write them as artifacts
// (tables/<stem>.json and tables/<stem>.bin) without emitting source.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lexy::codegen::{build_tables, save_tables_bin, save_tables_json};
use lexy::spec;

fn main() -> Result<()> {
    env_logger::init();

    let arg = std::env::args()
        .nth(1)
        .context("usage: gen_tables <spec_file>.lexy")?;
    let spec_path = PathBuf::from(arg);
    if !spec::has_lexy_extension(&spec_path) {
        bail!("input file must have the `.lexy` extension");
    }

    let spec = spec::load_file(&spec_path)
        .with_context(|| format!("loading {}", spec_path.display()))?;
    let tables = build_tables(&spec.defs)?;

    let out_dir = Path::new("tables");
    std::fs::create_dir_all(out_dir)?;

    let json_path = out_dir.join(format!("{}.json", spec.name));
    save_tables_json(&json_path, &tables)?;

    let bin_path = out_dir.join(format!("{}.bin", spec.name));
    save_tables_bin(&bin_path, &tables)?;

    let bin_len = std::fs::metadata(&bin_path)?.len();
    println!(
        "[gen_tables] {} states, {} token kinds -> {} and {} ({} bytes, ~{:.1} KiB)",
        tables.num_states(),
        tables.token_names.len(),
        json_path.display(),
        bin_path.display(),
        bin_len,
        bin_len as f64 / 1024.0
    );
    Ok(())
}
