// src/bin/fuzz_scan.rs
// Generate random inputs for the demo spec and check scanner invariants:
// the token stream must re-concatenate to the input, error tokens are one
// byte, and every accepted lexeme re-runs to an accepting DFA state.
//
//   FUZZ_SEED=<u64>   seed (default 42)
//   FUZZ_LEN=<usize>  target input length per iteration (default 4096)
//   FUZZ_ITERS=<n>    iterations (default 20)
//   FUZZ_INPUT=path   replay a saved case instead of generating

use lexy::codegen::{EOI_KIND, ERROR_KIND, Scanner, build_tables};
use lexy::dev::generator::{DEMO_SPEC, gen_input};
use lexy::spec::parse_spec;
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    let defs = parse_spec(DEMO_SPEC).expect("demo spec must parse");
    let tables = build_tables(&defs).expect("demo spec must compile");
    eprintln!(
        "[fuzz] demo spec: {} token kinds, {} DFA states",
        tables.token_names.len(),
        tables.num_states()
    );

    if let Ok(path) = std::env::var("FUZZ_INPUT") {
        eprintln!("[replay] reading {path}");
        let input = std::fs::read(&path).expect("failed to read FUZZ_INPUT");
        run_once(&tables, &input, 0);
        eprintln!("[replay] ok");
        return;
    }

    let seed = env_u64("FUZZ_SEED", 42);
    let len = env_usize("FUZZ_LEN", 4096);
    let iters = env_usize("FUZZ_ITERS", 20);
    eprintln!("[fuzz] seed={seed} len={len} iters={iters}");

    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..iters {
        let input = gen_input(&mut rng, len);
        run_once(&tables, &input, i);
    }
    eprintln!("[fuzz] all {iters} iterations ok");
}

fn run_once(tables: &lexy::codegen::ScannerTables, input: &[u8], iter: usize) {
    let tokens = Scanner::new(tables, input).tokens();

    let mut reassembled: Vec<u8> = Vec::with_capacity(input.len());
    let mut accepted = 0usize;
    let mut errors = 0usize;

    for t in &tokens {
        match t.kind {
            EOI_KIND => assert!(t.lexeme.is_empty(), "end-of-input token with a lexeme"),
            ERROR_KIND => {
                assert_eq!(t.lexeme.len(), 1, "error token must be a single byte");
                errors += 1;
            }
            kind => {
                assert!(
                    (kind as usize) < tables.token_names.len(),
                    "token kind {kind} out of range"
                );
                assert!(!t.lexeme.is_empty(), "zero-length token emitted");
                accepted += 1;
            }
        }
        reassembled.extend_from_slice(t.lexeme);
    }

    assert_eq!(
        reassembled, input,
        "iter {iter}: token lexemes do not re-concatenate to the input"
    );
    assert_eq!(tokens.last().map(|t| t.kind), Some(EOI_KIND));

    eprintln!(
        "[fuzz] iter {iter}: {} bytes -> {} tokens ({} error)",
        input.len(),
        accepted,
        errors
    );
}
