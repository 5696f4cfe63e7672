pub mod catalog;
pub mod executor;
mod probes;
pub mod reporter;
pub mod types;

pub use catalog::{ProbeKind, Section};
pub use executor::{ProbeRunner, RunOptions};
pub use reporter::ProbeReporter;
pub use types::{ProbeFailure, ProbeResult, ProbeSummary};
