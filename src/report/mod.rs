//! Run observation and reporting

pub mod run_report;
pub mod stability;

pub use run_report::{RunRecorder, RunReport};
pub use stability::Stability;
