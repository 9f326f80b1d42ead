//! Fault campaign driver.
//!
//! Runs every enumerated fault through the PODEM engine, fills the returned
//! don't-cares per policy, optionally re-simulates each vector, and
//! aggregates the coverage numbers. With more than one worker the fault
//! list is sharded with rayon and every worker owns a private clone of the
//! circuit; per-fault generations never share state.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use faultline_core::prelude::*;
use faultline_podem::{PodemEngine, TestOutcome};
use faultline_sim::PatternSimulator;

/// Outcome of one fault, paired with its fault for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct FaultResult {
    pub fault: Fault,
    pub outcome: TestOutcome,
}

/// Aggregated results of a full campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub total: usize,
    pub detected: usize,
    pub untestable: usize,
    pub aborted: usize,
    /// Detected vectors that failed re-simulation; `None` without `verify`
    pub verify_mismatches: Option<usize>,
    pub wall_time: Duration,
    pub results: Vec<FaultResult>,
}

impl CoverageReport {
    /// Detected faults as a percentage of the fault list.
    pub fn coverage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.detected as f64 * 100.0 / self.total as f64
    }
}

/// Drives the full fault list through the engine.
///
/// # Example
///
/// ```rust,ignore
/// let campaign = FaultCampaign::new();
/// let report = campaign.run(&circuit)?;
/// println!("{:.2}% coverage", report.coverage_percent());
/// ```
#[derive(Debug, Default)]
pub struct FaultCampaign {
    config: FaultlineConfig,
}

impl FaultCampaign {
    /// Creates a campaign with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a campaign with an explicit configuration.
    pub fn with_config(config: FaultlineConfig) -> Self {
        Self { config }
    }

    /// Runs every fault of `circuit` and aggregates the results.
    ///
    /// The borrowed circuit is never mutated; workers operate on clones.
    pub fn run(&self, circuit: &Circuit) -> Result<CoverageReport> {
        let faults = circuit.enumerate_faults();
        info!(
            "Running {} faults on {} gates ({} workers)",
            faults.len(),
            circuit.num_gates(),
            self.config.driver.jobs.max(1)
        );

        let engine = PodemEngine::with_config(self.config.podem.clone());
        let start = Instant::now();

        let outcomes: Vec<TestOutcome> = if self.config.driver.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.driver.jobs)
                .build()
                .context("Failed to build worker pool")?;
            let sharded: faultline_core::Result<Vec<TestOutcome>> = pool.install(|| {
                faults
                    .par_iter()
                    .map_init(
                        || circuit.clone(),
                        |scratch, fault| engine.generate(scratch, fault),
                    )
                    .collect()
            });
            sharded?
        } else {
            let mut scratch = circuit.clone();
            let mut outcomes = Vec::with_capacity(faults.len());
            for fault in &faults {
                outcomes.push(engine.generate(&mut scratch, fault)?);
            }
            outcomes
        };

        // Fill don't-cares so emitted vectors are plain bit strings.
        let mut rng = StdRng::seed_from_u64(self.config.driver.seed);
        let results: Vec<FaultResult> = faults
            .into_iter()
            .zip(outcomes)
            .map(|(fault, outcome)| {
                let outcome = match outcome {
                    TestOutcome::Detected(vector) => {
                        TestOutcome::Detected(match self.config.driver.fill {
                            FillPolicy::Zero => vector.filled_with(|_| false),
                            FillPolicy::One => vector.filled_with(|_| true),
                            FillPolicy::Random => vector.filled_with(|_| rng.gen::<bool>()),
                        })
                    }
                    other => other,
                };
                FaultResult { fault, outcome }
            })
            .collect();

        let verify_mismatches = if self.config.driver.verify {
            Some(self.verify(circuit, &results)?)
        } else {
            None
        };

        let detected = results.iter().filter(|r| r.outcome.is_detected()).count();
        let untestable = results
            .iter()
            .filter(|r| r.outcome == TestOutcome::Untestable)
            .count();
        let aborted = results
            .iter()
            .filter(|r| r.outcome == TestOutcome::Aborted)
            .count();

        let report = CoverageReport {
            total: results.len(),
            detected,
            untestable,
            aborted,
            verify_mismatches,
            wall_time: start.elapsed(),
            results,
        };
        info!(
            "Coverage {:.2}%: {} detected, {} untestable, {} aborted",
            report.coverage_percent(),
            report.detected,
            report.untestable,
            report.aborted
        );
        Ok(report)
    }

    /// Re-simulates every detected vector against its fault.
    fn verify(&self, circuit: &Circuit, results: &[FaultResult]) -> Result<usize> {
        let sim = PatternSimulator::new();
        let mut scratch = circuit.clone();
        let mut mismatches = 0usize;
        for result in results {
            if let TestOutcome::Detected(vector) = &result.outcome {
                if !sim.detects(&mut scratch, &result.fault, vector)? {
                    warn!("{}: vector {} fails re-simulation", result.fault, vector);
                    mismatches += 1;
                }
            }
        }
        Ok(mismatches)
    }
}
