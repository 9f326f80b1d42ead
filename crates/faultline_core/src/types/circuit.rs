//! Circuit graph.
//!
//! A [`Circuit`] owns all its gates in one contiguous table; every edge is
//! an index into that table. Construction goes through [`CircuitBuilder`],
//! which resolves net names, wires fanout lists, checks arities and rejects
//! combinational cycles. After `build()` the topology is frozen; only gate
//! values and the fault annotation mutate.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{FaultlineError, Result};

use super::fault::{Fault, StuckAt};
use super::gate::{Gate, GateId, GateKind};
use super::logic::LogicValue;

/// Reserved name prefix for output pin pseudo-gates.
pub const OUTPUT_PIN_PREFIX: &str = "output_pin_";

/// A combinational gate-level circuit.
#[derive(Debug, Clone)]
pub struct Circuit {
    gates: Vec<Gate>,
    names: HashMap<String, GateId>,
    primary_inputs: Vec<GateId>,
    primary_outputs: Vec<GateId>,
    topo: Vec<GateId>,
}

impl Circuit {
    /// Starts building a circuit.
    pub fn builder() -> CircuitBuilder {
        CircuitBuilder::default()
    }

    /// Number of gates, pin pseudo-gates included.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// The gate table.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// A gate by index.
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id]
    }

    /// A gate by index, mutably.
    pub fn gate_mut(&mut self, id: GateId) -> &mut Gate {
        &mut self.gates[id]
    }

    /// Resolves a net name to its gate index.
    pub fn lookup(&self, name: &str) -> Option<GateId> {
        self.names.get(name).copied()
    }

    /// Primary inputs, in declaration order.
    pub fn primary_inputs(&self) -> &[GateId] {
        &self.primary_inputs
    }

    /// Output pin pseudo-gates, in declaration order.
    pub fn primary_outputs(&self) -> &[GateId] {
        &self.primary_outputs
    }

    /// Gates in a topological order (inputs first).
    pub fn topological_order(&self) -> &[GateId] {
        &self.topo
    }

    /// Re-evaluates one gate from its inputs' current values, applying the
    /// fault overlay if the gate is the active fault site. Input pins keep
    /// their externally assigned value but still receive the overlay.
    pub fn evaluate(&mut self, id: GateId) {
        let gate = &self.gates[id];
        let pure = match gate.kind {
            GateKind::Input => gate.value,
            kind => {
                let values: Vec<LogicValue> =
                    gate.inputs.iter().map(|&i| self.gates[i].value).collect();
                kind.evaluate(&values)
            }
        };
        let gate = &mut self.gates[id];
        gate.value = match gate.stuck {
            Some(stuck) => pure.with_stuck(stuck.as_bool()),
            None => pure,
        };
    }

    /// Evaluates the whole circuit in topological order.
    pub fn evaluate_all(&mut self) {
        for i in 0..self.topo.len() {
            let id = self.topo[i];
            self.evaluate(id);
        }
    }

    /// Resets every gate value to X.
    pub fn reset_values(&mut self) {
        for gate in &mut self.gates {
            gate.value = LogicValue::X;
        }
    }

    /// Clears the `explored` marker on every gate.
    pub fn clear_explored(&mut self) {
        for gate in &mut self.gates {
            gate.explored = false;
        }
    }

    /// Snapshot of all gate values, for decision-point backtracking.
    pub fn values_snapshot(&self) -> Vec<LogicValue> {
        self.gates.iter().map(|g| g.value).collect()
    }

    /// Restores a snapshot taken by [`Circuit::values_snapshot`].
    pub fn restore_values(&mut self, snapshot: &[LogicValue]) {
        debug_assert_eq!(snapshot.len(), self.gates.len());
        for (gate, &value) in self.gates.iter_mut().zip(snapshot) {
            gate.value = value;
        }
    }

    /// Annotates the fault site named by `fault`. Output pins are not
    /// fault sites.
    pub fn inject_fault(&mut self, fault: &Fault) -> Result<GateId> {
        let id = self
            .lookup(&fault.net)
            .ok_or_else(|| FaultlineError::unknown_net(&fault.net))?;
        if self.gates[id].kind == GateKind::Output {
            return Err(FaultlineError::NotAFaultSite(fault.net.clone()));
        }
        self.gates[id].stuck = Some(fault.stuck);
        Ok(id)
    }

    /// Clears any active fault annotation.
    pub fn clear_fault(&mut self) {
        for gate in &mut self.gates {
            gate.stuck = None;
        }
    }

    /// Assigns values to the primary inputs in declaration order and
    /// evaluates each pin (so a faulty input picks up its overlay).
    pub fn assign_inputs(&mut self, values: &[LogicValue]) -> Result<()> {
        if values.len() != self.primary_inputs.len() {
            return Err(FaultlineError::InputCountMismatch {
                expected: self.primary_inputs.len(),
                got: values.len(),
            });
        }
        for (i, &value) in values.iter().enumerate() {
            let id = self.primary_inputs[i];
            self.gates[id].value = value;
            self.evaluate(id);
        }
        Ok(())
    }

    /// Current values of the output pins, in declaration order.
    pub fn output_values(&self) -> Vec<LogicValue> {
        self.primary_outputs
            .iter()
            .map(|&id| self.gates[id].value)
            .collect()
    }

    /// Enumerates the full single stuck-at fault list: two faults per gate
    /// in index order (s-a-0 first), output pins excluded.
    pub fn enumerate_faults(&self) -> Vec<Fault> {
        let mut faults = Vec::with_capacity(2 * self.gates.len());
        for gate in &self.gates {
            if gate.kind == GateKind::Output {
                continue;
            }
            faults.push(Fault::new(gate.name.clone(), StuckAt::Zero));
            faults.push(Fault::new(gate.name.clone(), StuckAt::One));
        }
        faults
    }
}

/// Staged circuit construction: declarations first, resolution at `build`.
///
/// Net references may point at gates declared later in the source, so the
/// builder keeps names until every declaration has been seen.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    inputs: Vec<String>,
    gates: Vec<(String, GateKind, Vec<String>)>,
    outputs: Vec<String>,
}

impl CircuitBuilder {
    /// Declares a primary input net.
    pub fn add_input(&mut self, name: impl Into<String>) {
        self.inputs.push(name.into());
    }

    /// Declares a logic gate driving `name`.
    pub fn add_gate(&mut self, name: impl Into<String>, kind: GateKind, inputs: Vec<String>) {
        self.gates.push((name.into(), kind, inputs));
    }

    /// Marks a declared net as a primary output.
    pub fn mark_output(&mut self, name: impl Into<String>) {
        self.outputs.push(name.into());
    }

    /// Resolves all declarations into a frozen [`Circuit`].
    pub fn build(self) -> Result<Circuit> {
        let mut gates: Vec<Gate> = Vec::new();
        let mut names: HashMap<String, GateId> = HashMap::new();
        let mut primary_inputs = Vec::with_capacity(self.inputs.len());

        let declare = |gates: &mut Vec<Gate>,
                           names: &mut HashMap<String, GateId>,
                           name: String,
                           kind: GateKind|
         -> Result<GateId> {
            if names.contains_key(&name) {
                return Err(FaultlineError::duplicate_net(name));
            }
            let id = gates.len();
            names.insert(name.clone(), id);
            gates.push(Gate::new(name, id, kind, Vec::new()));
            Ok(id)
        };

        for name in self.inputs {
            let id = declare(&mut gates, &mut names, name, GateKind::Input)?;
            primary_inputs.push(id);
        }
        for (name, kind, input_names) in &self.gates {
            if !kind.arity_ok(input_names.len()) {
                return Err(FaultlineError::InvalidArity {
                    net: name.clone(),
                    kind: kind.to_string(),
                    expected: kind.arity_str().to_string(),
                    got: input_names.len(),
                });
            }
            declare(&mut gates, &mut names, name.clone(), *kind)?;
        }

        // Second pass: resolve input references and wire fanout edges.
        for (name, _, input_names) in &self.gates {
            let id = names[name.as_str()];
            for input_name in input_names {
                let source = *names
                    .get(input_name.as_str())
                    .ok_or_else(|| FaultlineError::undeclared_net(input_name.as_str()))?;
                gates[id].inputs.push(source);
                gates[source].fanout.push(id);
            }
        }

        // Output pins hang off the nets they observe.
        let mut primary_outputs = Vec::with_capacity(self.outputs.len());
        for name in &self.outputs {
            let source = *names
                .get(name.as_str())
                .ok_or_else(|| FaultlineError::undeclared_net(name.as_str()))?;
            let pin_name = format!("{OUTPUT_PIN_PREFIX}{name}");
            let id = declare(&mut gates, &mut names, pin_name, GateKind::Output)?;
            gates[id].inputs.push(source);
            gates[source].fanout.push(id);
            primary_outputs.push(id);
        }

        let topo = topological_sort(&gates)?;

        debug!(
            "Built circuit: {} gates, {} inputs, {} outputs",
            gates.len(),
            primary_inputs.len(),
            primary_outputs.len()
        );

        Ok(Circuit {
            gates,
            names,
            primary_inputs,
            primary_outputs,
            topo,
        })
    }
}

/// Kahn's algorithm; rejects cyclic netlists.
fn topological_sort(gates: &[Gate]) -> Result<Vec<GateId>> {
    let mut pending: Vec<usize> = gates.iter().map(|g| g.inputs.len()).collect();
    let mut order = Vec::with_capacity(gates.len());
    let mut ready: Vec<GateId> = (0..gates.len()).filter(|&id| pending[id] == 0).collect();

    while let Some(id) = ready.pop() {
        order.push(id);
        for &next in &gates[id].fanout {
            pending[next] -= 1;
            if pending[next] == 0 {
                ready.push(next);
            }
        }
    }

    if order.len() != gates.len() {
        let stuck = gates
            .iter()
            .find(|g| pending[g.index] > 0)
            .map(|g| g.name.clone())
            .unwrap_or_default();
        return Err(FaultlineError::cycle(stuck));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicValue::*;

    fn half_adder() -> Circuit {
        let mut builder = Circuit::builder();
        builder.add_input("a");
        builder.add_input("b");
        builder.add_gate("sum", GateKind::Xor, vec!["a".into(), "b".into()]);
        builder.add_gate("carry", GateKind::And, vec!["a".into(), "b".into()]);
        builder.mark_output("sum");
        builder.mark_output("carry");
        builder.build().unwrap()
    }

    #[test]
    fn test_build_wires_topology() {
        let circuit = half_adder();
        assert_eq!(circuit.primary_inputs().len(), 2);
        assert_eq!(circuit.primary_outputs().len(), 2);
        // 2 inputs + 2 gates + 2 output pins
        assert_eq!(circuit.num_gates(), 6);

        let a = circuit.lookup("a").unwrap();
        let sum = circuit.lookup("sum").unwrap();
        let carry = circuit.lookup("carry").unwrap();
        assert_eq!(circuit.gate(a).fanout, vec![sum, carry]);
        assert!(circuit.lookup("output_pin_sum").is_some());
    }

    #[test]
    fn test_duplicate_net_rejected() {
        let mut builder = Circuit::builder();
        builder.add_input("a");
        builder.add_gate("a", GateKind::Buff, vec!["a".into()]);
        assert!(matches!(
            builder.build(),
            Err(FaultlineError::DuplicateNet(_))
        ));
    }

    #[test]
    fn test_undeclared_net_rejected() {
        let mut builder = Circuit::builder();
        builder.add_input("a");
        builder.add_gate("y", GateKind::And, vec!["a".into(), "ghost".into()]);
        builder.mark_output("y");
        assert!(matches!(
            builder.build(),
            Err(FaultlineError::UndeclaredNet(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_arity_rejected() {
        let mut builder = Circuit::builder();
        builder.add_input("a");
        builder.add_input("b");
        builder.add_gate("y", GateKind::Not, vec!["a".into(), "b".into()]);
        assert!(matches!(
            builder.build(),
            Err(FaultlineError::InvalidArity { .. })
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut builder = Circuit::builder();
        builder.add_input("a");
        builder.add_gate("p", GateKind::And, vec!["a".into(), "q".into()]);
        builder.add_gate("q", GateKind::Buff, vec!["p".into()]);
        builder.mark_output("q");
        assert!(matches!(
            builder.build(),
            Err(FaultlineError::CycleDetected(_))
        ));
    }

    #[test]
    fn test_evaluate_all() {
        let mut circuit = half_adder();
        circuit.assign_inputs(&[One, One]).unwrap();
        circuit.evaluate_all();
        assert_eq!(circuit.output_values(), vec![Zero, One]);

        circuit.reset_values();
        circuit.assign_inputs(&[One, Zero]).unwrap();
        circuit.evaluate_all();
        assert_eq!(circuit.output_values(), vec![One, Zero]);
    }

    #[test]
    fn test_full_assignment_leaves_no_x() {
        let mut circuit = half_adder();
        circuit.assign_inputs(&[Zero, One]).unwrap();
        circuit.evaluate_all();
        assert!(circuit.gates().iter().all(|g| g.value.is_known()));
    }

    #[test]
    fn test_insertion_order_independence() {
        // same nets, gate declarations swapped
        let mut builder = Circuit::builder();
        builder.add_input("a");
        builder.add_input("b");
        builder.add_gate("carry", GateKind::And, vec!["a".into(), "b".into()]);
        builder.add_gate("sum", GateKind::Xor, vec!["a".into(), "b".into()]);
        builder.mark_output("sum");
        builder.mark_output("carry");
        let mut swapped = builder.build().unwrap();
        let mut circuit = half_adder();

        for bits in [[Zero, Zero], [Zero, One], [One, Zero], [One, One]] {
            circuit.reset_values();
            swapped.reset_values();
            circuit.assign_inputs(&bits).unwrap();
            swapped.assign_inputs(&bits).unwrap();
            circuit.evaluate_all();
            swapped.evaluate_all();
            assert_eq!(circuit.output_values(), swapped.output_values());
        }
    }

    #[test]
    fn test_fault_enumeration_size() {
        let circuit = half_adder();
        // every gate with an output net: 2 inputs + 2 gates
        assert_eq!(circuit.enumerate_faults().len(), 8);
        let faults = circuit.enumerate_faults();
        assert_eq!(faults[0], Fault::new("a", StuckAt::Zero));
        assert_eq!(faults[1], Fault::new("a", StuckAt::One));
    }

    #[test]
    fn test_inject_fault() {
        let mut circuit = half_adder();
        let fault = Fault::new("sum", StuckAt::One);
        let site = circuit.inject_fault(&fault).unwrap();
        assert!(circuit.gate(site).is_faulty());

        circuit.assign_inputs(&[Zero, Zero]).unwrap();
        circuit.evaluate_all();
        // fault-free sum = 0, stuck at 1 -> D'
        let sum = circuit.lookup("sum").unwrap();
        assert_eq!(circuit.gate(sum).value, DPrime);
        // the output pin mirrors the fault effect
        assert_eq!(circuit.output_values()[0], DPrime);

        circuit.clear_fault();
        assert!(!circuit.gate(site).is_faulty());
    }

    #[test]
    fn test_output_pin_not_a_fault_site() {
        let mut circuit = half_adder();
        let fault = Fault::new("output_pin_sum", StuckAt::Zero);
        assert!(matches!(
            circuit.inject_fault(&fault),
            Err(FaultlineError::NotAFaultSite(_))
        ));
    }

    #[test]
    fn test_faulty_input_pin_overlay() {
        let mut circuit = half_adder();
        circuit
            .inject_fault(&Fault::new("a", StuckAt::Zero))
            .unwrap();
        circuit.assign_inputs(&[One, One]).unwrap();
        let a = circuit.lookup("a").unwrap();
        assert_eq!(circuit.gate(a).value, D);
        circuit.evaluate_all();
        // carry = AND(D, 1) = D
        assert_eq!(circuit.output_values()[1], D);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut circuit = half_adder();
        let before = circuit.values_snapshot();
        circuit.assign_inputs(&[One, Zero]).unwrap();
        circuit.evaluate_all();
        assert!(circuit.gates().iter().any(|g| g.value != X));
        circuit.restore_values(&before);
        assert!(circuit.gates().iter().all(|g| g.value == X));
    }
}
