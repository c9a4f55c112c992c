//! fontprobe - detect installed font families
//!
//! This crate re-exports the detection core and adds the presentation side:
//! - Command-line definition
//! - Plain text and JSON reports
//!
//! Detection never renders anything itself; reports are produced from the
//! values the probe returns.

pub mod cli;
pub mod error;
pub mod report;

// Re-export main types for convenience
pub use cli::{Cli, Commands};
pub use error::{ReportError, ReportResult};
pub use fontprobe_core::*;
pub use report::{render_families, render_report, OutputFormat};
