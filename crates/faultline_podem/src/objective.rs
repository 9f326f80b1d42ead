//! Objective selection.
//!
//! While the fault site still reads X the objective is activation: drive the
//! site to the opposite of its stuck value. Once a fault effect sits on the
//! site, objectives come from the D-frontier: the gates that could extend
//! the effect one level, filtered by whether an all-X path to a primary
//! output still exists.

use faultline_core::prelude::*;

/// Selects the next `(gate, value)` objective, or `None` when this branch
/// of the search is dead (activation impossible or empty D-frontier).
pub fn select_objective(
    circuit: &Circuit,
    site: GateId,
    stuck: StuckAt,
) -> Option<(GateId, LogicValue)> {
    let site_value = circuit.gate(site).value;

    if !site_value.is_fault_effect() {
        if site_value != LogicValue::X {
            // implications pinned the site to a constant; no activation here
            return None;
        }
        return Some((site, stuck.activation_value()));
    }

    // Propagation: most observable D-frontier member, ties to the smallest
    // gate index for reproducibility.
    let mut memo = XPathMemo::new(circuit.num_gates());
    let mut best: Option<(u32, GateId)> = None;
    for gate in circuit.gates() {
        if gate.value != LogicValue::X {
            continue;
        }
        let has_effect_input = gate
            .inputs
            .iter()
            .any(|&i| circuit.gate(i).value.is_fault_effect());
        if !has_effect_input || !memo.has_x_path(circuit, gate.index) {
            continue;
        }
        let key = (gate.co, gate.index);
        if best.map_or(true, |b| key < b) {
            best = Some(key);
        }
    }

    let (_, chosen) = best?;
    let gate = circuit.gate(chosen);
    let spare = gate
        .inputs
        .iter()
        .copied()
        .find(|&i| circuit.gate(i).value == LogicValue::X)
        .expect("a D-frontier gate at X has an X-valued input");
    Some((spare, gate.kind.non_controlling_value()))
}

/// Memoized X-path DFS, rebuilt for each objective-selection pass.
///
/// A gate can still pass a fault effect on if it is an output pin, or it
/// reads X and some fanout can.
pub struct XPathMemo {
    cache: Vec<Option<bool>>,
}

impl XPathMemo {
    pub fn new(num_gates: usize) -> Self {
        Self {
            cache: vec![None; num_gates],
        }
    }

    pub fn has_x_path(&mut self, circuit: &Circuit, id: GateId) -> bool {
        if let Some(known) = self.cache[id] {
            return known;
        }
        let gate = circuit.gate(id);
        let reachable = gate.kind == GateKind::Output
            || (gate.value == LogicValue::X
                && gate.fanout.iter().any(|&f| self.has_x_path(circuit, f)));
        self.cache[id] = Some(reachable);
        reachable
    }
}
