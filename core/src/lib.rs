//! Liveness scanning of CIDR blocks and the registry of networks to scan.

pub mod registry;
pub mod report;
pub mod scanner;

pub use registry::{CidrRegistry, RegistryError};
pub use report::LivenessReport;
pub use scanner::{LivenessScanner, ProbeFailure, ProbeOutcome, Prober};
