//! Faultline driver library.
//!
//! The binary in `main.rs` is a thin argument layer over these modules:
//! - **driver**: [`driver::FaultCampaign`] iterates a circuit's fault list
//!   through the PODEM engine and aggregates a coverage report.
//! - **report**: renders vectors and coverage reports as text or JSON.

pub mod driver;
pub mod report;
