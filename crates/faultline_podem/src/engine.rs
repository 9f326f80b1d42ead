//! The PODEM search engine.
//!
//! One [`PodemEngine::generate`] call handles one fault: it annotates the
//! fault site, then runs the recursive decision loop (objective, backtrace
//! to a primary input, assign and imply forward, recurse; on failure try the
//! opposite value, then restore the pre-decision snapshot and give up one
//! level). The recursion depth is bounded by the number of primary inputs.

use faultline_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::backtrace::backtrace;
use crate::objective::select_objective;

/// Result of one test generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestOutcome {
    /// A primary-input assignment that drives a fault effect to an output
    Detected(TestVector),
    /// The search space is exhausted; no assignment detects this fault
    Untestable,
    /// The decision budget ran out before the search finished
    Aborted,
}

impl TestOutcome {
    pub fn is_detected(&self) -> bool {
        matches!(self, TestOutcome::Detected(_))
    }
}

/// PODEM test pattern generator.
///
/// The engine owns no circuit state; it borrows a SCOAP-annotated circuit
/// for the duration of each generation.
///
/// # Example
///
/// ```rust,ignore
/// let engine = PodemEngine::new();
/// for fault in circuit.enumerate_faults() {
///     match engine.generate(&mut circuit, &fault)? {
///         TestOutcome::Detected(vector) => println!("{fault}: {vector}"),
///         other => println!("{fault}: {other:?}"),
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct PodemEngine {
    config: PodemConfig,
}

impl PodemEngine {
    /// Creates an engine with the default (unbounded) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(config: PodemConfig) -> Self {
        Self { config }
    }

    /// Attempts to generate a test for `fault`.
    ///
    /// The circuit is reset, the fault site annotated, and the search run to
    /// completion; the annotation is cleared again before returning. Errors
    /// only on a fault naming an unknown net or an output pin.
    pub fn generate(&self, circuit: &mut Circuit, fault: &Fault) -> Result<TestOutcome> {
        circuit.reset_values();
        circuit.clear_fault();
        let site = circuit.inject_fault(fault)?;

        let (status, decisions) = {
            let mut search = Search {
                circuit: &mut *circuit,
                site,
                stuck: fault.stuck,
                decisions: 0,
                limit: self.config.decision_limit,
            };
            let status = search.podem();
            (status, search.decisions)
        };
        debug!("{}: {:?} after {} decisions", fault, status, decisions);

        let outcome = match status {
            Status::Found => TestOutcome::Detected(TestVector::from_pi_values(
                circuit
                    .primary_inputs()
                    .iter()
                    .map(|&id| circuit.gate(id).value),
            )),
            Status::Exhausted => TestOutcome::Untestable,
            Status::Aborted => TestOutcome::Aborted,
        };
        circuit.clear_fault();
        Ok(outcome)
    }
}

enum Status {
    Found,
    Exhausted,
    Aborted,
}

impl std::fmt::Debug for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Found => write!(f, "found"),
            Status::Exhausted => write!(f, "exhausted"),
            Status::Aborted => write!(f, "aborted"),
        }
    }
}

struct Search<'a> {
    circuit: &'a mut Circuit,
    site: GateId,
    stuck: StuckAt,
    decisions: usize,
    limit: Option<usize>,
}

impl Search<'_> {
    fn podem(&mut self) -> Status {
        if self.fault_observed() {
            return Status::Found;
        }
        let Some((goal, value)) = select_objective(self.circuit, self.site, self.stuck) else {
            return Status::Exhausted;
        };
        let (pi, first) = backtrace(self.circuit, goal, value);

        let snapshot = self.circuit.values_snapshot();
        for attempt in [first, first.inverse()] {
            if let Some(limit) = self.limit {
                if self.decisions >= limit {
                    self.circuit.restore_values(&snapshot);
                    return Status::Aborted;
                }
            }
            self.decisions += 1;
            trace!(
                "decision {}: {} = {}",
                self.decisions,
                self.circuit.gate(pi).name,
                attempt
            );

            self.assign(pi, attempt);
            match self.podem() {
                Status::Found => return Status::Found,
                Status::Aborted => {
                    self.circuit.restore_values(&snapshot);
                    return Status::Aborted;
                }
                Status::Exhausted => self.circuit.restore_values(&snapshot),
            }
        }
        Status::Exhausted
    }

    fn fault_observed(&self) -> bool {
        self.circuit
            .primary_outputs()
            .iter()
            .any(|&id| self.circuit.gate(id).value.is_fault_effect())
    }

    /// Assigns a primary input and implies forward. The pin itself is
    /// evaluated first so a fault site on an input picks up its overlay.
    fn assign(&mut self, pi: GateId, value: LogicValue) {
        self.circuit.gate_mut(pi).value = value;
        self.circuit.evaluate(pi);
        self.imply(pi);
    }

    /// Forward implication: re-evaluate fanout, chasing value changes only.
    /// Values never regress to X here; X restoration is the snapshot's job.
    fn imply(&mut self, from: GateId) {
        let mut worklist = vec![from];
        while let Some(id) = worklist.pop() {
            let fanout = self.circuit.gate(id).fanout.clone();
            for next in fanout {
                let before = self.circuit.gate(next).value;
                self.circuit.evaluate(next);
                if self.circuit.gate(next).value != before {
                    worklist.push(next);
                }
            }
        }
    }
}
