//! # Faultline Sim
//!
//! Pattern simulation: evaluate a circuit under a primary-input vector,
//! fault-free or with an injected stuck-at, and check whether the vector
//! actually distinguishes the two. The driver's verify pass and the test
//! suites use this to confirm every generated vector.

use faultline_core::prelude::*;
use tracing::trace;

/// Five-valued forward simulator.
///
/// Stateless; each call resets the borrowed circuit, assigns the vector and
/// evaluates in topological order. Under an injected fault a detected
/// difference shows up as D or D' on an output pin.
///
/// # Example
///
/// ```rust,ignore
/// let sim = PatternSimulator::new();
/// let outputs = sim.run(&mut circuit, &vector, None)?;
/// let caught = sim.detects(&mut circuit, &fault, &vector)?;
/// ```
#[derive(Debug, Default)]
pub struct PatternSimulator;

impl PatternSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Simulates `vector` and returns the output pin values in declaration
    /// order. Don't-care positions propagate as X.
    pub fn run(
        &self,
        circuit: &mut Circuit,
        vector: &TestVector,
        fault: Option<&Fault>,
    ) -> Result<Vec<LogicValue>> {
        circuit.reset_values();
        circuit.clear_fault();
        if let Some(fault) = fault {
            circuit.inject_fault(fault)?;
        }
        circuit.assign_inputs(&vector.to_values())?;
        circuit.evaluate_all();
        let outputs = circuit.output_values();
        circuit.clear_fault();
        Ok(outputs)
    }

    /// The fault-free output pattern for `vector`.
    pub fn fault_free_outputs(
        &self,
        circuit: &mut Circuit,
        vector: &TestVector,
    ) -> Result<Vec<LogicValue>> {
        self.run(circuit, vector, None)
    }

    /// True when simulating `vector` under `fault` leaves a fault effect on
    /// at least one output pin, i.e. the faulty and fault-free responses
    /// differ there.
    pub fn detects(
        &self,
        circuit: &mut Circuit,
        fault: &Fault,
        vector: &TestVector,
    ) -> Result<bool> {
        let outputs = self.run(circuit, vector, Some(fault))?;
        let caught = outputs.iter().any(|v| v.is_fault_effect());
        trace!("{fault} x {vector}: detected={caught}");
        Ok(caught)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_bench::parse_bench;
    use LogicValue::*;

    const C17: &str = r#"
        INPUT(1)
        INPUT(2)
        INPUT(3)
        INPUT(6)
        INPUT(7)
        OUTPUT(22)
        OUTPUT(23)
        10 = NAND(1, 3)
        11 = NAND(3, 6)
        16 = NAND(2, 11)
        19 = NAND(11, 7)
        22 = NAND(10, 16)
        23 = NAND(16, 19)
    "#;

    fn vector(bits: &str) -> TestVector {
        TestVector::from_pi_values(bits.chars().map(|c| match c {
            '0' => Zero,
            '1' => One,
            _ => X,
        }))
    }

    #[test]
    fn test_fault_free_patterns() {
        let mut circuit = parse_bench(C17).unwrap();
        let sim = PatternSimulator::new();

        // all zeros: first-level NANDs go high, both outputs settle low
        let outputs = sim.fault_free_outputs(&mut circuit, &vector("00000")).unwrap();
        assert_eq!(outputs, vec![Zero, Zero]);

        let outputs = sim.fault_free_outputs(&mut circuit, &vector("11111")).unwrap();
        assert_eq!(outputs, vec![One, Zero]);
    }

    #[test]
    fn test_dont_care_propagates_x() {
        let mut circuit = parse_bench(C17).unwrap();
        let sim = PatternSimulator::new();
        let outputs = sim.fault_free_outputs(&mut circuit, &vector("xxxxx")).unwrap();
        assert_eq!(outputs, vec![X, X]);
    }

    #[test]
    fn test_detects_stem_fault() {
        let mut circuit = parse_bench(C17).unwrap();
        let sim = PatternSimulator::new();
        let fault = Fault::new("11", StuckAt::One);

        // 3=1, 6=1 drives net 11 low, 2=1 and 7=1 propagate through 16/19
        assert!(sim.detects(&mut circuit, &fault, &vector("11111")).unwrap());
        // 3=0 leaves net 11 high, identical to the faulty value
        assert!(!sim.detects(&mut circuit, &fault, &vector("11011")).unwrap());
    }

    #[test]
    fn test_input_fault() {
        let mut circuit = parse_bench(C17).unwrap();
        let sim = PatternSimulator::new();
        let fault = Fault::new("1", StuckAt::Zero);
        // 3=1 activates through gate 10, 2=0 holds gate 16 high for gate 22
        assert!(sim.detects(&mut circuit, &fault, &vector("10100")).unwrap());
    }

    #[test]
    fn test_circuit_left_clean() {
        let mut circuit = parse_bench(C17).unwrap();
        let sim = PatternSimulator::new();
        sim.detects(&mut circuit, &Fault::new("10", StuckAt::Zero), &vector("00000"))
            .unwrap();
        assert!(circuit.gates().iter().all(|g| !g.is_faulty()));
    }
}
