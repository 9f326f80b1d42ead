//! Core data types.

pub mod circuit;
pub mod fault;
pub mod gate;
pub mod logic;
pub mod vector;

pub use circuit::{Circuit, CircuitBuilder, OUTPUT_PIN_PREFIX};
pub use fault::{Fault, StuckAt};
pub use gate::{Gate, GateId, GateKind, INFINITE_COST};
pub use logic::LogicValue;
pub use vector::{TestVector, VectorBit};
