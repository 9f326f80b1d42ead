//! Test vectors: primary-input assignments produced by the search engine.

use super::logic::LogicValue;
use serde::{Deserialize, Serialize};

/// One position of a test vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorBit {
    Zero,
    One,
    /// Unconstrained: any fill detects the fault
    DontCare,
}

/// A primary-input assignment, one bit per input in declaration order.
///
/// The engine leaves inputs it never had to decide as don't-cares; they
/// display as 'x' and are filled before being written out.
///
/// # Example
///
/// ```
/// use faultline_core::types::{LogicValue, TestVector};
///
/// let vector = TestVector::from_pi_values([
///     LogicValue::X,
///     LogicValue::One,
///     LogicValue::D, // activated fault site on an input pin reads as 1
/// ]);
/// assert_eq!(vector.to_string(), "x11");
/// assert_eq!(vector.filled_with(|_| false).to_string(), "011");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    bits: Vec<VectorBit>,
}

impl TestVector {
    /// Reads a vector off the primary-input values: a fault effect reads as
    /// its fault-free rail, X becomes a don't-care.
    pub fn from_pi_values(values: impl IntoIterator<Item = LogicValue>) -> Self {
        let bits = values
            .into_iter()
            .map(|v| match v.good() {
                Some(true) => VectorBit::One,
                Some(false) => VectorBit::Zero,
                None => VectorBit::DontCare,
            })
            .collect();
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[VectorBit] {
        &self.bits
    }

    /// True when no position is a don't-care.
    pub fn is_fully_specified(&self) -> bool {
        !self.bits.contains(&VectorBit::DontCare)
    }

    /// Replaces every don't-care with the bit `fill` chooses for its
    /// position.
    pub fn filled_with(&self, mut fill: impl FnMut(usize) -> bool) -> TestVector {
        let bits = self
            .bits
            .iter()
            .enumerate()
            .map(|(i, &bit)| match bit {
                VectorBit::DontCare => {
                    if fill(i) {
                        VectorBit::One
                    } else {
                        VectorBit::Zero
                    }
                }
                specified => specified,
            })
            .collect();
        TestVector { bits }
    }

    /// The vector as logic values, don't-cares as X.
    pub fn to_values(&self) -> Vec<LogicValue> {
        self.bits
            .iter()
            .map(|bit| match bit {
                VectorBit::Zero => LogicValue::Zero,
                VectorBit::One => LogicValue::One,
                VectorBit::DontCare => LogicValue::X,
            })
            .collect()
    }
}

impl std::fmt::Display for TestVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            let c = match bit {
                VectorBit::Zero => '0',
                VectorBit::One => '1',
                VectorBit::DontCare => 'x',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicValue::*;

    #[test]
    fn test_from_pi_values() {
        let vector = TestVector::from_pi_values([Zero, One, D, DPrime, X]);
        assert_eq!(vector.to_string(), "0110x");
        assert_eq!(vector.len(), 5);
        assert!(!vector.is_fully_specified());
    }

    #[test]
    fn test_filled() {
        let vector = TestVector::from_pi_values([X, One, X]);
        let zero_filled = vector.filled_with(|_| false);
        assert_eq!(zero_filled.to_string(), "010");
        assert!(zero_filled.is_fully_specified());

        let by_position = vector.filled_with(|i| i == 0);
        assert_eq!(by_position.to_string(), "110");
    }

    #[test]
    fn test_to_values() {
        let vector = TestVector::from_pi_values([One, X]);
        assert_eq!(vector.to_values(), vec![One, X]);
    }
}
