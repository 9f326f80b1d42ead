//! Gate model.
//!
//! A [`Gate`] is one node of the circuit graph: a typed primitive with its
//! current five-valued value, its fault annotation, and the SCOAP
//! testability measures the search heuristics read.

use super::fault::StuckAt;
use super::logic::{self, LogicValue};
use serde::{Deserialize, Serialize};

/// Index of a gate inside its owning [`Circuit`](super::Circuit).
pub type GateId = usize;

/// Sentinel for an unreachable or not-yet-computed SCOAP cost.
pub const INFINITE_COST: u32 = u32::MAX;

/// The primitive gate types.
///
/// `Input` and `Output` are the pin pseudo-gates: an `Input` has no inputs
/// and its value is assigned from outside, an `Output` has exactly one input
/// and mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    Input,
    Output,
    Buff,
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    /// Resolves a netlist type keyword. Pin pseudo-gates have dedicated
    /// declaration lines and are not resolvable here.
    pub fn from_name(name: &str) -> Option<GateKind> {
        match name {
            "BUFF" => Some(GateKind::Buff),
            "NOT" => Some(GateKind::Not),
            "AND" => Some(GateKind::And),
            "NAND" => Some(GateKind::Nand),
            "OR" => Some(GateKind::Or),
            "NOR" => Some(GateKind::Nor),
            "XOR" => Some(GateKind::Xor),
            "XNOR" => Some(GateKind::Xnor),
            _ => None,
        }
    }

    /// The netlist keyword for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
            GateKind::Buff => "BUFF",
            GateKind::Not => "NOT",
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        }
    }

    /// True for the inverting kinds (NOT, NAND, NOR, XNOR).
    pub fn inverts(&self) -> bool {
        matches!(
            self,
            GateKind::Not | GateKind::Nand | GateKind::Nor | GateKind::Xnor
        )
    }

    /// Inversion parity: 1 for the inverting kinds, 0 otherwise.
    pub fn inversion_parity(&self) -> u8 {
        self.inverts() as u8
    }

    /// The input value that lets a sibling fault effect pass through this
    /// gate: 1 for the AND family (and single-input kinds), 0 for the OR
    /// and XOR families.
    pub fn non_controlling_value(&self) -> LogicValue {
        match self {
            GateKind::Or | GateKind::Nor | GateKind::Xor | GateKind::Xnor => LogicValue::Zero,
            _ => LogicValue::One,
        }
    }

    /// The input value that alone decides this gate's output, if one
    /// exists: 0 for AND/NAND, 1 for OR/NOR. The XOR family and the
    /// single-input kinds have no controlling value.
    pub fn controlling_value(&self) -> Option<LogicValue> {
        match self {
            GateKind::And | GateKind::Nand => Some(LogicValue::Zero),
            GateKind::Or | GateKind::Nor => Some(LogicValue::One),
            _ => None,
        }
    }

    /// True for the pin pseudo-gates.
    pub fn is_pin(&self) -> bool {
        matches!(self, GateKind::Input | GateKind::Output)
    }

    /// Whether `count` inputs is legal for this kind.
    pub fn arity_ok(&self, count: usize) -> bool {
        match self {
            GateKind::Input => count == 0,
            GateKind::Output | GateKind::Buff | GateKind::Not => count == 1,
            _ => count >= 1,
        }
    }

    /// Human-readable arity constraint, for error messages.
    pub fn arity_str(&self) -> &'static str {
        match self {
            GateKind::Input => "0",
            GateKind::Output | GateKind::Buff | GateKind::Not => "1",
            _ => ">= 1",
        }
    }

    /// Applies this kind's five-valued truth table.
    ///
    /// `Input` gates are assigned from outside and never evaluated through
    /// the table.
    pub fn evaluate(&self, inputs: &[LogicValue]) -> LogicValue {
        match self {
            GateKind::Input => unreachable!("input pins are assigned, not evaluated"),
            GateKind::Output | GateKind::Buff => inputs[0],
            GateKind::Not => inputs[0].inverse(),
            GateKind::And => logic::and(inputs),
            GateKind::Nand => logic::and(inputs).inverse(),
            GateKind::Or => logic::or(inputs),
            GateKind::Nor => logic::or(inputs).inverse(),
            GateKind::Xor => logic::xor(inputs),
            GateKind::Xnor => logic::xor(inputs).inverse(),
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One node of the circuit graph.
///
/// Topology is stored as indices into the owning circuit's gate table:
/// `inputs` in declaration order, `fanout` in insertion order. Back and
/// forward edges carry no ownership; the graph is a DAG.
#[derive(Debug, Clone)]
pub struct Gate {
    /// Output net name; stable identity of the gate
    pub name: String,
    /// Index in the owning circuit's gate table
    pub index: GateId,
    /// Primitive type
    pub kind: GateKind,
    /// Driving gates, in declaration order
    pub inputs: Vec<GateId>,
    /// Driven gates, in insertion order
    pub fanout: Vec<GateId>,
    /// Current five-valued value; X between fault attempts
    pub value: LogicValue,
    /// Active stuck-at annotation, if this gate is the fault site
    pub stuck: Option<StuckAt>,
    /// SCOAP 0-controllability
    pub cc0: u32,
    /// SCOAP 1-controllability
    pub cc1: u32,
    /// SCOAP observability
    pub co: u32,
    /// Transient marker for the SCOAP sweeps
    pub explored: bool,
}

impl Gate {
    pub(crate) fn new(name: String, index: GateId, kind: GateKind, inputs: Vec<GateId>) -> Self {
        Self {
            name,
            index,
            kind,
            inputs,
            fanout: Vec::new(),
            value: LogicValue::X,
            stuck: None,
            cc0: INFINITE_COST,
            cc1: INFINITE_COST,
            co: INFINITE_COST,
            explored: false,
        }
    }

    /// True if this gate currently carries a fault annotation.
    pub fn is_faulty(&self) -> bool {
        self.stuck.is_some()
    }

    /// The controllability cost of driving this line to `value`.
    ///
    /// Only meaningful for the Boolean constants; used by backtrace, which
    /// only ever chases 0/1 objectives.
    pub fn cc_for(&self, value: LogicValue) -> u32 {
        match value {
            LogicValue::Zero => self.cc0,
            LogicValue::One => self.cc1,
            _ => INFINITE_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicValue::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(GateKind::from_name("NAND"), Some(GateKind::Nand));
        assert_eq!(GateKind::from_name("XNOR"), Some(GateKind::Xnor));
        assert_eq!(GateKind::from_name("INPUT"), None);
        assert_eq!(GateKind::from_name("nand"), None);
    }

    #[test]
    fn test_inversion_parity() {
        assert_eq!(GateKind::Not.inversion_parity(), 1);
        assert_eq!(GateKind::Nand.inversion_parity(), 1);
        assert_eq!(GateKind::Nor.inversion_parity(), 1);
        assert_eq!(GateKind::Xnor.inversion_parity(), 1);
        assert_eq!(GateKind::And.inversion_parity(), 0);
        assert_eq!(GateKind::Xor.inversion_parity(), 0);
        assert_eq!(GateKind::Buff.inversion_parity(), 0);
    }

    #[test]
    fn test_controlling_values() {
        assert_eq!(GateKind::And.controlling_value(), Some(Zero));
        assert_eq!(GateKind::Nand.controlling_value(), Some(Zero));
        assert_eq!(GateKind::Or.controlling_value(), Some(One));
        assert_eq!(GateKind::Xor.controlling_value(), None);
        assert_eq!(GateKind::Buff.controlling_value(), None);

        assert_eq!(GateKind::Nand.non_controlling_value(), One);
        assert_eq!(GateKind::Nor.non_controlling_value(), Zero);
        assert_eq!(GateKind::Xor.non_controlling_value(), Zero);
    }

    #[test]
    fn test_arity() {
        assert!(GateKind::Input.arity_ok(0));
        assert!(!GateKind::Input.arity_ok(1));
        assert!(GateKind::Not.arity_ok(1));
        assert!(!GateKind::Not.arity_ok(2));
        assert!(GateKind::Nand.arity_ok(4));
        assert!(!GateKind::Nand.arity_ok(0));
    }

    #[test]
    fn test_evaluate_dispatch() {
        assert_eq!(GateKind::Nand.evaluate(&[One, One]), Zero);
        assert_eq!(GateKind::Nand.evaluate(&[Zero, X]), One);
        assert_eq!(GateKind::Nor.evaluate(&[Zero, Zero]), One);
        assert_eq!(GateKind::Xnor.evaluate(&[One, Zero]), Zero);
        assert_eq!(GateKind::Not.evaluate(&[D]), DPrime);
        assert_eq!(GateKind::Buff.evaluate(&[DPrime]), DPrime);
        assert_eq!(GateKind::Output.evaluate(&[D]), D);
    }

    #[test]
    fn test_cc_for() {
        let mut gate = Gate::new("n1".to_string(), 0, GateKind::And, vec![]);
        gate.cc0 = 3;
        gate.cc1 = 7;
        assert_eq!(gate.cc_for(Zero), 3);
        assert_eq!(gate.cc_for(One), 7);
    }
}
