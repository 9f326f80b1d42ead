//! Backtrace: mapping an internal objective to a primary-input assignment.

use std::cmp::Reverse;

use faultline_core::prelude::*;

/// Walks from `(gate, desired)` back to a primary input that can plausibly
/// satisfy the objective, flipping the desired value across every inverting
/// gate.
///
/// At each gate the required input value is `desired` flipped by the gate's
/// inversion parity. When that value is the gate's controlling value a
/// single input decides the output, so the cheapest X-valued input (by the
/// matching SCOAP controllability) is taken; when every input has to
/// cooperate, the hardest one is taken first so infeasible branches fail
/// early. Ties go to the earliest input position.
pub fn backtrace(
    circuit: &Circuit,
    mut gate_id: GateId,
    mut desired: LogicValue,
) -> (GateId, LogicValue) {
    loop {
        let gate = circuit.gate(gate_id);
        if gate.kind == GateKind::Input {
            return (gate_id, desired);
        }

        let needed = if gate.kind.inverts() {
            desired.inverse()
        } else {
            desired
        };
        let single_input_decides =
            gate.inputs.len() == 1 || gate.kind.controlling_value() == Some(needed);

        let candidates = gate
            .inputs
            .iter()
            .enumerate()
            .filter(|&(_, &input)| circuit.gate(input).value == LogicValue::X)
            .map(|(position, &input)| (circuit.gate(input).cc_for(needed), position, input));

        let picked = if single_input_decides {
            candidates.min_by_key(|&(cost, position, _)| (cost, position))
        } else {
            candidates.min_by_key(|&(cost, position, _)| (Reverse(cost), position))
        };

        let (_, _, next) = picked.expect("backtrace requires an X-valued input");
        gate_id = next;
        desired = needed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_bench::parse_bench;
    use faultline_scoap::annotate;
    use LogicValue::*;

    fn annotated(source: &str) -> Circuit {
        let mut circuit = parse_bench(source).unwrap();
        annotate(&mut circuit);
        circuit
    }

    #[test]
    fn test_terminates_at_input() {
        let circuit = annotated("INPUT(a)\nOUTPUT(y)\ny = BUFF(a)\n");
        let a = circuit.lookup("a").unwrap();
        assert_eq!(backtrace(&circuit, a, One), (a, One));
    }

    #[test]
    fn test_parity_flip_through_inverters() {
        let circuit = annotated("INPUT(a)\nOUTPUT(y)\nn = NOT(a)\ny = NOT(n)\n");
        let a = circuit.lookup("a").unwrap();
        let y = circuit.lookup("y").unwrap();
        // two inversions cancel
        assert_eq!(backtrace(&circuit, y, Zero), (a, Zero));
        let n = circuit.lookup("n").unwrap();
        assert_eq!(backtrace(&circuit, n, Zero), (a, One));
    }

    #[test]
    fn test_controlling_objective_picks_easiest() {
        // cheap.CC0 = 1, costly.CC0 = 3 (two gate hops)
        let source = "INPUT(a)\nINPUT(b)\nOUTPUT(y)\np = BUFF(b)\nq = BUFF(p)\ny = AND(a, q)\n";
        let circuit = annotated(source);
        let y = circuit.lookup("y").unwrap();
        let a = circuit.lookup("a").unwrap();
        // AND to 0: one controlling input suffices, take the cheap one
        assert_eq!(backtrace(&circuit, y, Zero), (a, Zero));
    }

    #[test]
    fn test_all_inputs_objective_picks_hardest() {
        let source = "INPUT(a)\nINPUT(b)\nOUTPUT(y)\np = BUFF(b)\nq = BUFF(p)\ny = AND(a, q)\n";
        let circuit = annotated(source);
        let y = circuit.lookup("y").unwrap();
        let b = circuit.lookup("b").unwrap();
        // AND to 1 needs both inputs; chase the expensive chain first
        assert_eq!(backtrace(&circuit, y, One), (b, One));
    }

    #[test]
    fn test_assigned_inputs_skipped() {
        let source = "INPUT(a)\nINPUT(b)\nOUTPUT(y)\ny = AND(a, b)\n";
        let mut circuit = annotated(source);
        let a = circuit.lookup("a").unwrap();
        let b = circuit.lookup("b").unwrap();
        let y = circuit.lookup("y").unwrap();
        circuit.gate_mut(a).value = One;
        assert_eq!(backtrace(&circuit, y, Zero), (b, Zero));
    }

    #[test]
    fn test_nand_inverts_objective() {
        let circuit = annotated("INPUT(a)\nINPUT(b)\nOUTPUT(y)\ny = NAND(a, b)\n");
        let y = circuit.lookup("y").unwrap();
        // NAND to 0 needs every input at 1
        let (pi, value) = backtrace(&circuit, y, Zero);
        assert_eq!(value, One);
        assert!(pi == circuit.lookup("a").unwrap() || pi == circuit.lookup("b").unwrap());
    }
}
