//! Error types for Faultline.

use thiserror::Error;

/// Unified error type for Faultline operations.
#[derive(Error, Debug)]
pub enum FaultlineError {
    // ============ Circuit Construction Errors ============
    /// A net name was declared more than once
    #[error("Duplicate net name '{0}'")]
    DuplicateNet(String),

    /// A gate input or OUTPUT declaration references a net that was never declared
    #[error("Reference to undeclared net '{0}'")]
    UndeclaredNet(String),

    /// A gate was declared with an input count its type does not accept
    #[error("Gate '{net}' of type {kind} has {got} inputs, expected {expected}")]
    InvalidArity {
        net: String,
        kind: String,
        expected: String,
        got: usize,
    },

    /// The netlist contains a combinational loop
    #[error("Combinational cycle detected through net '{0}'")]
    CycleDetected(String),

    // ============ Fault Handling Errors ============
    /// Lookup of a fault site by net name failed
    #[error("Unknown net '{0}'")]
    UnknownNet(String),

    /// The named net is an output pin pseudo-gate, which carries no faults
    #[error("Net '{0}' is an output pin and cannot be a fault site")]
    NotAFaultSite(String),

    // ============ Evaluation Errors ============
    /// A primary-input assignment did not match the input count
    #[error("Assignment has {got} values, circuit has {expected} primary inputs")]
    InputCountMismatch { expected: usize, got: usize },

    // ============ I/O Errors ============
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Faultline operations.
pub type Result<T> = std::result::Result<T, FaultlineError>;

impl FaultlineError {
    /// Creates a duplicate-net error.
    pub fn duplicate_net(net: impl Into<String>) -> Self {
        Self::DuplicateNet(net.into())
    }

    /// Creates an undeclared-net error.
    pub fn undeclared_net(net: impl Into<String>) -> Self {
        Self::UndeclaredNet(net.into())
    }

    /// Creates an unknown-net error.
    pub fn unknown_net(net: impl Into<String>) -> Self {
        Self::UnknownNet(net.into())
    }

    /// Creates a cycle-detected error.
    pub fn cycle(net: impl Into<String>) -> Self {
        Self::CycleDetected(net.into())
    }
}
