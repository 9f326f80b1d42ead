//! # Faultline Core
//!
//! Core types for Faultline, a PODEM-based automatic test pattern generator
//! for combinational gate-level netlists.
//!
//! This crate provides:
//! - `LogicValue`: the five-valued algebra {0, 1, D, D', X} used throughout
//! - `Gate` / `GateKind`: typed logic primitives with five-valued evaluation
//! - `Circuit`: the gate graph with primary input/output bookkeeping
//! - `Fault` / `StuckAt`: the single stuck-at fault model and enumeration
//! - `TestVector`: primary-input assignments produced by the search engine
//! - `FaultlineError`: unified error type
//!
//! ## Example
//!
//! ```rust
//! use faultline_core::prelude::*;
//!
//! let mut builder = Circuit::builder();
//! builder.add_input("a");
//! builder.add_input("b");
//! builder.add_gate("y", GateKind::Nand, vec!["a".into(), "b".into()]);
//! builder.mark_output("y");
//! let circuit = builder.build().unwrap();
//!
//! assert_eq!(circuit.primary_inputs().len(), 2);
//! // two faults per fault site: a, b and y
//! assert_eq!(circuit.enumerate_faults().len(), 6);
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

pub use config::{DriverConfig, FaultlineConfig, FillPolicy, PodemConfig};
pub use error::{FaultlineError, Result};
pub use types::{
    Circuit, CircuitBuilder, Fault, Gate, GateId, GateKind, LogicValue, StuckAt, TestVector,
    VectorBit, OUTPUT_PIN_PREFIX,
};
