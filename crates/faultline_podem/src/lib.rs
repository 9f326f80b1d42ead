//! # Faultline PODEM
//!
//! The PODEM (Path-Oriented Decision Making) search engine: given a circuit
//! annotated with SCOAP measures and a single stuck-at fault, find a
//! primary-input assignment that drives a fault effect to a primary output,
//! or prove that none exists.
//!
//! ## Modules
//! - **engine**: the recursive branch-and-bound with implication and
//!   snapshot backtracking.
//! - **objective**: activation objective and D-frontier selection with the
//!   X-path feasibility check.
//! - **backtrace**: the heuristic walk from an objective to a primary input.

pub mod backtrace;
pub mod engine;
pub mod objective;

pub use engine::{PodemEngine, TestOutcome};
