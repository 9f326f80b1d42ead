//! bench-format netlist parser for Faultline.
//!
//! This crate parses the line-oriented bench netlist format (`INPUT(n)`,
//! `OUTPUT(n)`, `n = TYPE(a, b, ...)`, `#` comments) and builds a
//! `faultline_core::Circuit`.

pub mod ast;
pub mod builder;
pub mod error;
pub mod parser;

pub use builder::build_circuit;
pub use error::{BenchError, Result};
pub use parser::parse_netlist_str;

use std::path::Path;

use faultline_core::Circuit;

/// Parses bench source text and returns a wired `Circuit`.
pub fn parse_bench(source: &str) -> Result<Circuit> {
    let netlist = parse_netlist_str(source)?;
    build_circuit(&netlist)
}

/// Reads and parses a bench netlist file.
pub fn parse_bench_file<P: AsRef<Path>>(path: P) -> Result<Circuit> {
    let source = std::fs::read_to_string(path).map_err(faultline_core::FaultlineError::from)?;
    parse_bench(&source)
}
