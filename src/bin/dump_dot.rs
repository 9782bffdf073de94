use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lexy::automata::{determinize, minimize, thompson};
use lexy::codegen::build::compile_fragments;
use lexy::{spec, viz};

/// Write DOT files for every pipeline stage of a spec:
/// `<stem>.nfa.dot`, `<stem>.dfa.dot`, `<stem>.min.dot`.
/// Set LEXY_RENDER to an image format (e.g. `png`) to also run Graphviz.
fn main() -> Result<()> {
    env_logger::init();

    let arg = std::env::args()
        .nth(1)
        .context("usage: dump_dot <spec_file>.lexy")?;
    let spec_path = PathBuf::from(arg);
    if !spec::has_lexy_extension(&spec_path) {
        bail!("input file must have the `.lexy` extension");
    }

    let spec = spec::load_file(&spec_path)
        .with_context(|| format!("loading {}", spec_path.display()))?;

    let fragments = compile_fragments(&spec.defs)?;
    let nfa = thompson::merge_all(fragments);
    let dfa = determinize(&nfa)?;
    let min = minimize(&dfa)?;

    println!(
        "[dump_dot] NFA {} states, DFA {} states, minimized {} states",
        nfa.num_states(),
        dfa.num_states(),
        min.num_states()
    );

    let out_dir = Path::new("generated/dot");
    let render = std::env::var("LEXY_RENDER").ok();

    for (stage, dot) in [
        ("nfa", viz::nfa_dot(&nfa)),
        ("dfa", viz::dfa_dot(&dfa)),
        ("min", viz::dfa_dot(&min)),
    ] {
        let path = out_dir.join(format!("{}.{stage}.dot", spec.name));
        viz::write_dot(&path, &dot)?;
        println!("[dump_dot] wrote {}", path.display());
        if let Some(format) = &render {
            viz::render_dot(&path, &path.with_extension(""), format);
        }
    }

    Ok(())
}
