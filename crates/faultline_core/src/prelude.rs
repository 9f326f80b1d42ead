//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use faultline_core::prelude::*;
//! ```

pub use crate::config::{DriverConfig, FaultlineConfig, FillPolicy, PodemConfig};
pub use crate::error::{FaultlineError, Result};
pub use crate::types::{
    Circuit, CircuitBuilder, Fault, Gate, GateId, GateKind, LogicValue, StuckAt, TestVector,
    VectorBit, INFINITE_COST, OUTPUT_PIN_PREFIX,
};
