// src/lib.rs

#[macro_use]
pub mod macros;

pub mod batch;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod localize;
pub mod log;
pub mod npcs;
pub mod parser;
pub mod progress;
pub mod report;

pub use error::{Error, Result};
pub use npcs::NpcList;
pub use parser::{parse, parse_file, parse_str, Reconciliation};
