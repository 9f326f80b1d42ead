//! Five-valued logic algebra.
//!
//! Every line in the circuit carries one of five values: the two Boolean
//! constants, the two composite fault-effect values D (1 in the fault-free
//! circuit, 0 in the faulty one) and D' (the reverse), and X for unknown.
//! A value can equivalently be seen as a pair of rails, `(good, faulty)`,
//! each a three-valued bit; the composite values are the pairs whose rails
//! disagree.

use serde::{Deserialize, Serialize};

/// A five-valued logic value.
///
/// # Example
///
/// ```
/// use faultline_core::types::LogicValue;
///
/// assert_eq!(LogicValue::D.inverse(), LogicValue::DPrime);
/// assert_eq!(LogicValue::D.good(), Some(true));
/// assert_eq!(LogicValue::D.faulty(), Some(false));
/// assert_eq!(LogicValue::X.good(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicValue {
    /// Constant 0 on both rails
    Zero,
    /// Constant 1 on both rails
    One,
    /// 1 in the fault-free circuit, 0 in the faulty one
    D,
    /// 0 in the fault-free circuit, 1 in the faulty one
    DPrime,
    /// Unknown
    X,
}

impl LogicValue {
    /// The fault-free rail, `None` for X.
    pub fn good(&self) -> Option<bool> {
        match self {
            LogicValue::Zero | LogicValue::DPrime => Some(false),
            LogicValue::One | LogicValue::D => Some(true),
            LogicValue::X => None,
        }
    }

    /// The faulty rail, `None` for X.
    pub fn faulty(&self) -> Option<bool> {
        match self {
            LogicValue::Zero | LogicValue::D => Some(false),
            LogicValue::One | LogicValue::DPrime => Some(true),
            LogicValue::X => None,
        }
    }

    /// Composes a value from its two rails; an unknown rail absorbs to X.
    pub fn from_rails(good: Option<bool>, faulty: Option<bool>) -> LogicValue {
        match (good, faulty) {
            (Some(false), Some(false)) => LogicValue::Zero,
            (Some(true), Some(true)) => LogicValue::One,
            (Some(true), Some(false)) => LogicValue::D,
            (Some(false), Some(true)) => LogicValue::DPrime,
            _ => LogicValue::X,
        }
    }

    /// Lifts a Boolean constant.
    pub fn from_bit(bit: bool) -> LogicValue {
        if bit {
            LogicValue::One
        } else {
            LogicValue::Zero
        }
    }

    /// The inverse map: D <-> D', 0 <-> 1, X -> X.
    pub fn inverse(&self) -> LogicValue {
        match self {
            LogicValue::Zero => LogicValue::One,
            LogicValue::One => LogicValue::Zero,
            LogicValue::D => LogicValue::DPrime,
            LogicValue::DPrime => LogicValue::D,
            LogicValue::X => LogicValue::X,
        }
    }

    /// True for every value except X.
    pub fn is_known(&self) -> bool {
        !matches!(self, LogicValue::X)
    }

    /// True for D and D', the values that witness a detected fault.
    pub fn is_fault_effect(&self) -> bool {
        matches!(self, LogicValue::D | LogicValue::DPrime)
    }

    /// Overlays a stuck-at on an already evaluated value: the good rail is
    /// kept, the faulty rail is pinned to the stuck bit.
    pub fn with_stuck(self, stuck: bool) -> LogicValue {
        LogicValue::from_rails(self.good(), Some(stuck))
    }
}

impl std::fmt::Display for LogicValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicValue::Zero => write!(f, "0"),
            LogicValue::One => write!(f, "1"),
            LogicValue::D => write!(f, "D"),
            LogicValue::DPrime => write!(f, "D'"),
            LogicValue::X => write!(f, "X"),
        }
    }
}

/// Five-valued n-ary AND.
///
/// Ordered rules: any 0 wins, then any X, then D together with D' cancels
/// to 0, then a lone fault effect propagates, else 1.
pub fn and(inputs: &[LogicValue]) -> LogicValue {
    if inputs.contains(&LogicValue::Zero) {
        return LogicValue::Zero;
    }
    if inputs.contains(&LogicValue::X) {
        return LogicValue::X;
    }
    if inputs.contains(&LogicValue::D) && inputs.contains(&LogicValue::DPrime) {
        return LogicValue::Zero;
    }
    if inputs.contains(&LogicValue::D) {
        return LogicValue::D;
    }
    if inputs.contains(&LogicValue::DPrime) {
        return LogicValue::DPrime;
    }
    LogicValue::One
}

/// Five-valued n-ary OR, the dual of [`and`].
pub fn or(inputs: &[LogicValue]) -> LogicValue {
    if inputs.contains(&LogicValue::One) {
        return LogicValue::One;
    }
    if inputs.contains(&LogicValue::X) {
        return LogicValue::X;
    }
    if inputs.contains(&LogicValue::D) && inputs.contains(&LogicValue::DPrime) {
        return LogicValue::One;
    }
    if inputs.contains(&LogicValue::D) {
        return LogicValue::D;
    }
    if inputs.contains(&LogicValue::DPrime) {
        return LogicValue::DPrime;
    }
    LogicValue::Zero
}

/// Five-valued n-ary XOR.
///
/// Any X makes the result X; otherwise each rail is the parity of that rail
/// over all inputs, which is exactly what folding a two-input XOR chain
/// computes.
pub fn xor(inputs: &[LogicValue]) -> LogicValue {
    let mut ones = 0usize;
    let mut d = 0usize;
    let mut d_prime = 0usize;
    for value in inputs {
        match value {
            LogicValue::X => return LogicValue::X,
            LogicValue::One => ones += 1,
            LogicValue::D => d += 1,
            LogicValue::DPrime => d_prime += 1,
            LogicValue::Zero => {}
        }
    }
    let good = (ones + d) % 2 == 1;
    let faulty = (ones + d_prime) % 2 == 1;
    LogicValue::from_rails(Some(good), Some(faulty))
}
