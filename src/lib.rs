pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod listing;
pub mod logger;
pub mod report;
pub mod runner;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use error::{ProbeError, Result};
