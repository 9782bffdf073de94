// src/codegen/scanner.rs
// The maximal-munch scanning loop, run directly over built tables. The
// emitted source embeds byte-for-byte the same protocol; this in-crate copy
// is what the tests and the fuzz binary drive.

use super::tables::{NO_TOKEN, NO_TRANSITION, ScannerTables};
use crate::automata::ALPHABET_SIZE;

/// Sentinel kind for end of input.
pub const EOI_KIND: i32 = -1;
/// Sentinel kind for an unrecognized byte; its lexeme is that single byte.
pub const ERROR_KIND: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: i32,
    pub lexeme: &'a [u8],
}

pub struct Scanner<'a> {
    tables: &'a ScannerTables,
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(tables: &'a ScannerTables, input: &'a [u8]) -> Self {
        Self {
            tables,
            input,
            pos: 0,
        }
    }

    /// Longest-match tokenization. An accept is only recorded after at least
    /// one byte is consumed, so zero-length tokens are never emitted even
    /// when the start state accepts; on failure the scanner advances exactly
    /// one byte. Bytes outside 0..=127 have no table row and fail like any
    /// unmatched byte.
    pub fn next_token(&mut self) -> Token<'a> {
        let start = self.pos;
        if start >= self.input.len() {
            return Token {
                kind: EOI_KIND,
                lexeme: &[],
            };
        }

        let mut state = self.tables.start as i32;
        let mut last_accept_state: i32 = -1;
        let mut last_accept_pos = start;

        while self.pos < self.input.len() {
            let b = self.input[self.pos] as usize;
            let next = if b < ALPHABET_SIZE {
                self.tables.transition[state as usize][b]
            } else {
                NO_TRANSITION
            };
            if next == NO_TRANSITION {
                break;
            }

            state = next;
            self.pos += 1;
            if self.tables.accept[state as usize] != NO_TOKEN {
                last_accept_state = state;
                last_accept_pos = self.pos;
            }
        }

        if last_accept_state != -1 {
            self.pos = last_accept_pos;
            return Token {
                kind: self.tables.accept[last_accept_state as usize],
                lexeme: &self.input[start..last_accept_pos],
            };
        }

        self.pos = start + 1;
        Token {
            kind: ERROR_KIND,
            lexeme: &self.input[start..start + 1],
        }
    }

    /// Drain the whole input, including the trailing end-of-input token.
    pub fn tokens(mut self) -> Vec<Token<'a>> {
        let mut out = Vec::new();
        loop {
            let t = self.next_token();
            let done = t.kind == EOI_KIND;
            out.push(t);
            if done {
                return out;
            }
        }
    }
}
