// src/dev/generator.rs
// Input generator shared by fuzz_scan and the randomized tests. Produces a
// mix of well-formed chunks for the demo specification and occasional junk
// bytes, so both the accept and the error paths of the scanner get traffic.

use rand::Rng;

/// A small language: keywords before the identifier rule, punctuation,
/// numbers and whitespace. Mirrors the shape of real scanner specs.
pub const DEMO_SPEC: &str = "\
IF ::= \"if\"\n\
ELSE ::= \"else\"\n\
ID ::= \"[a-z_][a-z0-9_]*\"\n\
NUM ::= \"[0-9]+\"\n\
ASSIGN ::= \"=\"\n\
PLUS ::= \"\\+\"\n\
LPAREN ::= \"\\(\"\n\
RPAREN ::= \"\\)\"\n\
WS ::= \"( |\\t)+\"\n";

const IDENT_START: &[u8] = b"abcdefghijklmnopqrstuvwxyz_";
const IDENT_CONT: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";
const PUNCT: &[u8] = b"=+()";
const JUNK: &[u8] = b"!#~@\n";

fn push_ident<R: Rng>(rng: &mut R, out: &mut Vec<u8>) {
    out.push(IDENT_START[rng.random_range(0..IDENT_START.len())]);
    for _ in 0..rng.random_range(0..6) {
        out.push(IDENT_CONT[rng.random_range(0..IDENT_CONT.len())]);
    }
}

fn push_number<R: Rng>(rng: &mut R, out: &mut Vec<u8>) {
    for _ in 0..rng.random_range(1..5) {
        out.push(b'0' + rng.random_range(0..10) as u8);
    }
}

/// At least `target_len` bytes of scanner input. Roughly one chunk in ten is
/// a junk byte the demo spec does not recognize.
pub fn gen_input<R: Rng>(rng: &mut R, target_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(target_len + 8);
    while out.len() < target_len {
        match rng.random_range(0..10) {
            0..=2 => push_ident(rng, &mut out),
            3..=4 => push_number(rng, &mut out),
            5 => out.extend_from_slice(b"if"),
            6 => out.extend_from_slice(b"else"),
            7 => out.push(PUNCT[rng.random_range(0..PUNCT.len())]),
            8 => out.push(if rng.random_range(0..2) == 0 { b' ' } else { b'\t' }),
            _ => out.push(JUNK[rng.random_range(0..JUNK.len())]),
        }
    }
    out
}
