//! Driving a board through successive generations

pub mod analysis;
pub mod session;

pub use analysis::StabilityAnalysis;
pub use session::{RunSummary, Simulation, StepReport, StopReason};
