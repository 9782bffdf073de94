// src/main.rs
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lexy::error::Error;
use lexy::{codegen, spec};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("usage: lexy <spec_file>.lexy");
        return ExitCode::from(1);
    };

    let path = PathBuf::from(path);
    if !spec::has_lexy_extension(&path) {
        eprintln!("error: usage: input file must have the `.lexy` extension");
        return ExitCode::from(1);
    }

    match run(&path) {
        Ok(out) => {
            println!("[lexy] scanner generation complete: {}", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}: {}", e.stage(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(path: &Path) -> Result<PathBuf, Error> {
    let spec = spec::load_file(path)?;
    println!(
        "[lexy] {} token definitions in {}",
        spec.defs.len(),
        path.display()
    );

    let tables = codegen::build_tables(&spec.defs)?;
    println!(
        "[lexy] minimized DFA has {} states over {} token kinds",
        tables.num_states(),
        tables.token_names.len()
    );

    let out = Path::new("generated/scanners").join(format!("{}.cpp", spec.name));
    codegen::write_scanner(&out, &tables)?;

    println!(
        "[lexy] token kinds (in order): {}",
        tables.token_names.join(", ")
    );
    Ok(out)
}
