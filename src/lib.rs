// src/lib.rs
pub mod automata;
pub mod codegen;
pub mod dev;
pub mod error;
pub mod regex;
pub mod spec;
pub mod viz;

pub use error::{Error, Result};
