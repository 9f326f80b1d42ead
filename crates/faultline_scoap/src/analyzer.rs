//! Controllability and observability sweeps.
//!
//! Both sweeps are worklists over the per-gate `explored` marker: a gate is
//! computed only once all of its dependencies (inputs for controllability,
//! fanout for observability) have been, which makes each sweep a single
//! topological pass regardless of declaration order.

use std::collections::VecDeque;

use faultline_core::prelude::*;
use tracing::debug;

/// Runs both SCOAP sweeps; the circuit's gates carry the results.
pub fn annotate(circuit: &mut Circuit) {
    compute_controllability(circuit);
    compute_observability(circuit);
    debug!(
        "SCOAP annotated {} gates ({} unobservable)",
        circuit.num_gates(),
        circuit
            .gates()
            .iter()
            .filter(|g| g.co == INFINITE_COST)
            .count()
    );
}

/// Forward sweep from the primary inputs: CC0/CC1 per line.
pub fn compute_controllability(circuit: &mut Circuit) {
    circuit.clear_explored();
    let mut queue: VecDeque<GateId> = VecDeque::new();

    let pis: Vec<GateId> = circuit.primary_inputs().to_vec();
    for id in pis {
        let gate = circuit.gate_mut(id);
        gate.cc0 = 1;
        gate.cc1 = 1;
        gate.explored = true;
        let fanout = circuit.gate(id).fanout.clone();
        queue.extend(fanout);
    }

    while let Some(id) = queue.pop_front() {
        if circuit.gate(id).explored {
            continue;
        }
        let inputs_ready = circuit
            .gate(id)
            .inputs
            .iter()
            .all(|&i| circuit.gate(i).explored);
        if !inputs_ready {
            // re-enqueued when the last missing input completes
            continue;
        }
        let (cc0, cc1) = controllability_of(circuit, id);
        let gate = circuit.gate_mut(id);
        gate.cc0 = cc0;
        gate.cc1 = cc1;
        gate.explored = true;
        let fanout = circuit.gate(id).fanout.clone();
        queue.extend(fanout);
    }
}

fn controllability_of(circuit: &Circuit, id: GateId) -> (u32, u32) {
    let gate = circuit.gate(id);
    let cc = |i: &GateId| (circuit.gate(*i).cc0, circuit.gate(*i).cc1);
    let min0 = || gate.inputs.iter().map(|i| cc(i).0).min().unwrap_or(0);
    let min1 = || gate.inputs.iter().map(|i| cc(i).1).min().unwrap_or(0);
    let sum0 = || {
        gate.inputs
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(cc(i).0))
    };
    let sum1 = || {
        gate.inputs
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(cc(i).1))
    };

    match gate.kind {
        GateKind::Input => (1, 1),
        // the output pin observes its net at no extra cost
        GateKind::Output => cc(&gate.inputs[0]),
        GateKind::Buff => {
            let (c0, c1) = cc(&gate.inputs[0]);
            (c0.saturating_add(1), c1.saturating_add(1))
        }
        GateKind::Not => {
            let (c0, c1) = cc(&gate.inputs[0]);
            (c1.saturating_add(1), c0.saturating_add(1))
        }
        GateKind::And => (min0().saturating_add(1), sum1().saturating_add(1)),
        GateKind::Nand => (sum1().saturating_add(1), min0().saturating_add(1)),
        GateKind::Or => (sum0().saturating_add(1), min1().saturating_add(1)),
        GateKind::Nor => (min1().saturating_add(1), sum0().saturating_add(1)),
        GateKind::Xor => xor_fold(circuit, gate),
        GateKind::Xnor => {
            let (c0, c1) = xor_fold(circuit, gate);
            (c1, c0)
        }
    }
}

/// Pairwise left-to-right fold of the two-input XOR recurrence.
fn xor_fold(circuit: &Circuit, gate: &Gate) -> (u32, u32) {
    let mut iter = gate.inputs.iter().map(|&i| {
        let g = circuit.gate(i);
        (g.cc0, g.cc1)
    });
    let first = iter.next().expect("XOR gates have at least one input");
    iter.fold(first, |(a0, a1), (b0, b1)| {
        let zero = a0.saturating_add(b0).min(a1.saturating_add(b1));
        let one = a0.saturating_add(b1).min(a1.saturating_add(b0));
        (zero.saturating_add(1), one.saturating_add(1))
    })
}

/// Backward sweep from the primary outputs: CO per line.
///
/// Gates whose value can never reach an output pin keep the infinite
/// sentinel, which the D-frontier heuristic treats as last resort and the
/// X-path check independently rules out.
pub fn compute_observability(circuit: &mut Circuit) {
    circuit.clear_explored();
    let mut queue: VecDeque<GateId> = VecDeque::new();

    for id in 0..circuit.num_gates() {
        let gate = circuit.gate(id);
        let seed = match gate.kind {
            GateKind::Output => Some(0),
            _ if gate.fanout.is_empty() => Some(INFINITE_COST),
            _ => None,
        };
        if let Some(co) = seed {
            let gate = circuit.gate_mut(id);
            gate.co = co;
            gate.explored = true;
            let inputs = circuit.gate(id).inputs.clone();
            queue.extend(inputs);
        }
    }

    while let Some(id) = queue.pop_front() {
        if circuit.gate(id).explored {
            continue;
        }
        let fanout_ready = circuit
            .gate(id)
            .fanout
            .iter()
            .all(|&f| circuit.gate(f).explored);
        if !fanout_ready {
            continue;
        }
        let co = circuit
            .gate(id)
            .fanout
            .iter()
            .map(|&f| branch_cost(circuit, f, id))
            .min()
            .unwrap_or(INFINITE_COST);
        let gate = circuit.gate_mut(id);
        gate.co = co;
        gate.explored = true;
        let inputs = circuit.gate(id).inputs.clone();
        queue.extend(inputs);
    }
}

/// Cost of observing `line` through one of its fanout gates: the fanout's
/// own observability plus the cost of holding every sibling input at the
/// fanout's non-controlling value.
fn branch_cost(circuit: &Circuit, fanout: GateId, line: GateId) -> u32 {
    let through = circuit.gate(fanout);
    let siblings = through.inputs.iter().filter(|&&s| s != line);

    match through.kind {
        GateKind::Output => 0,
        GateKind::Not | GateKind::Buff => through.co.saturating_add(1),
        GateKind::And | GateKind::Nand => siblings
            .fold(through.co, |acc, &s| acc.saturating_add(circuit.gate(s).cc1))
            .saturating_add(1),
        GateKind::Or | GateKind::Nor => siblings
            .fold(through.co, |acc, &s| acc.saturating_add(circuit.gate(s).cc0))
            .saturating_add(1),
        GateKind::Xor | GateKind::Xnor => siblings
            .fold(through.co, |acc, &s| {
                let g = circuit.gate(s);
                acc.saturating_add(g.cc0.min(g.cc1))
            })
            .saturating_add(1),
        GateKind::Input => unreachable!("input pins drive nothing upstream"),
    }
}
