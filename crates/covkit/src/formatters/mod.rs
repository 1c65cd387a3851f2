//! Coverage Format Converters
//!
//! Lossy projections of a coverage map into schemas consumed by other
//! report generators.

mod lcov;
mod yui;

pub use lcov::LcovFormatter;
pub use yui::{to_yui_coverage, yui_coverage, YuiCoverageMap, YuiFileCoverage};
