//! Configuration management for Faultline.

use serde::{Deserialize, Serialize};

/// Global configuration for a Faultline run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FaultlineConfig {
    /// PODEM engine configuration
    pub podem: PodemConfig,
    /// Driver configuration
    pub driver: DriverConfig,
}

/// Configuration for the PODEM search engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PodemConfig {
    /// Maximum number of primary-input decisions per fault before the
    /// search gives up with an `Aborted` result. `None` means unbounded.
    pub decision_limit: Option<usize>,
}

/// Configuration for the fault campaign driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Number of worker threads; 1 runs the fault list sequentially
    pub jobs: usize,
    /// Fill policy for don't-care positions in emitted vectors
    pub fill: FillPolicy,
    /// RNG seed for the random fill policy
    pub seed: u64,
    /// Re-simulate every detected vector and count mismatches
    pub verify: bool,
}

/// How don't-care positions in a test vector are filled before emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    /// Fill with '0'
    #[default]
    Zero,
    /// Fill with '1'
    One,
    /// Fill from a seeded RNG
    Random,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            jobs: 1,
            fill: FillPolicy::Zero,
            seed: 1,
            verify: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaultlineConfig::default();
        assert_eq!(config.podem.decision_limit, None);
        assert_eq!(config.driver.jobs, 1);
        assert_eq!(config.driver.fill, FillPolicy::Zero);
        assert!(!config.driver.verify);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = FaultlineConfig {
            podem: PodemConfig {
                decision_limit: Some(5000),
            },
            driver: DriverConfig {
                jobs: 4,
                fill: FillPolicy::Random,
                seed: 99,
                verify: true,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: FaultlineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.podem.decision_limit, Some(5000));
        assert_eq!(back.driver.fill, FillPolicy::Random);
    }
}
