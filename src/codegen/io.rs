// src/codegen/io.rs
use std::io::{BufWriter, Write};
use std::path::Path;

use super::tables::{NO_TOKEN, NO_TRANSITION, ScannerTables};
use crate::automata::ALPHABET_SIZE;

// -------------------- JSON (de)serialization --------------------

pub fn save_tables_json(path: &Path, t: &ScannerTables) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, t)?;
    w.flush()
}

pub fn load_tables_json_bytes(data: &[u8]) -> Result<ScannerTables, String> {
    serde_json::from_slice(data).map_err(|e| format!("failed to parse tables JSON: {e}"))
}

// -------------------- Compact binary (i16 packing) --------------------
//
//   magic: 8 bytes = "LXSCAN01"
//   u32:   n_states
//   u32:   n_tokens
//   u32:   start state
//   i16:   transition[n_states * 128]   // -1 = no transition
//   i16:   accept[n_states]             // -1 = non-accepting
//   per token: u16 name length, then the name bytes

const BIN_MAGIC: &[u8; 8] = b"LXSCAN01";

pub fn save_tables_bin(path: &Path, t: &ScannerTables) -> std::io::Result<()> {
    let n = t.num_states();
    if n > i16::MAX as usize {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{n} states exceeds i16::MAX; cannot pack to i16"),
        ));
    }

    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);

    w.write_all(BIN_MAGIC)?;
    w.write_all(&(n as u32).to_le_bytes())?;
    w.write_all(&(t.token_names.len() as u32).to_le_bytes())?;
    w.write_all(&t.start.to_le_bytes())?;

    let mut row_bytes = [0u8; ALPHABET_SIZE * 2];
    for row in &t.transition {
        for (i, &next) in row.iter().enumerate() {
            let v = next as i16;
            row_bytes[i * 2..i * 2 + 2].copy_from_slice(&v.to_le_bytes());
        }
        w.write_all(&row_bytes)?;
    }

    for &kind in &t.accept {
        w.write_all(&(kind as i16).to_le_bytes())?;
    }

    for name in &t.token_names {
        let len = u16::try_from(name.len()).map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "token name too long")
        })?;
        w.write_all(&len.to_le_bytes())?;
        w.write_all(name.as_bytes())?;
    }

    w.flush()
}

fn take_u32(buf: &mut &[u8]) -> Result<u32, String> {
    if buf.len() < 4 {
        return Err("truncated u32".into());
    }
    let mut le = [0u8; 4];
    le.copy_from_slice(&buf[..4]);
    *buf = &buf[4..];
    Ok(u32::from_le_bytes(le))
}

fn take_u16(buf: &mut &[u8]) -> Result<u16, String> {
    if buf.len() < 2 {
        return Err("truncated u16".into());
    }
    let mut le = [0u8; 2];
    le.copy_from_slice(&buf[..2]);
    *buf = &buf[2..];
    Ok(u16::from_le_bytes(le))
}

fn take_i16(buf: &mut &[u8]) -> Result<i16, String> {
    take_u16(buf).map(|v| v as i16)
}

pub fn load_tables_bin_bytes(mut data: &[u8]) -> Result<ScannerTables, String> {
    if data.len() < 8 + 4 + 4 + 4 {
        return Err("bin too short".into());
    }
    let mut magic = [0u8; 8];
    magic.copy_from_slice(&data[..8]);
    if &magic != BIN_MAGIC {
        return Err("bad magic in tables .bin".into());
    }
    data = &data[8..];

    let n_states = take_u32(&mut data)? as usize;
    let n_tokens = take_u32(&mut data)? as usize;
    let start = take_u32(&mut data)?;
    if n_states > 0 && start as usize >= n_states {
        return Err(format!("start state {start} out of range"));
    }

    let mut transition = Vec::with_capacity(n_states);
    for _ in 0..n_states {
        let mut row = [NO_TRANSITION; ALPHABET_SIZE];
        for slot in row.iter_mut() {
            let v = take_i16(&mut data)? as i32;
            if v != NO_TRANSITION && !(0..n_states as i32).contains(&v) {
                return Err(format!("transition target {v} out of range"));
            }
            *slot = v;
        }
        transition.push(row);
    }

    let mut accept = Vec::with_capacity(n_states);
    for _ in 0..n_states {
        let v = take_i16(&mut data)? as i32;
        if v != NO_TOKEN && !(0..n_tokens as i32).contains(&v) {
            return Err(format!("accept token index {v} out of range"));
        }
        accept.push(v);
    }

    let mut token_names = Vec::with_capacity(n_tokens);
    for _ in 0..n_tokens {
        let len = take_u16(&mut data).map_err(|_| "truncated name length".to_string())? as usize;
        if data.len() < len {
            return Err("truncated token name".into());
        }
        let (name, rest) = data.split_at(len);
        token_names.push(
            String::from_utf8(name.to_vec()).map_err(|_| "token name not UTF-8".to_string())?,
        );
        data = rest;
    }

    Ok(ScannerTables {
        transition,
        accept,
        token_names,
        start,
    })
}
