//! SCOAP testability analysis for Faultline.
//!
//! Computes, once per circuit, the measures the PODEM heuristics read:
//! - **CC0/CC1** (controllability): the cost of forcing a line to 0/1 from
//!   the primary inputs, by a forward sweep.
//! - **CO** (observability): the cost of propagating a line's value to some
//!   primary output, by a backward sweep.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut circuit = faultline_bench::parse_bench_file("c17.bench")?;
//! faultline_scoap::annotate(&mut circuit);
//! ```

pub mod analyzer;

pub use analyzer::{annotate, compute_controllability, compute_observability};
