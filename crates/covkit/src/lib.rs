//! Covkit: Coverage Summaries, Merges and Conversions
//!
//! Turns istanbul-style per-file instrumentation counters into summary
//! metrics, merges counters from repeated runs of the same code, and
//! converts coverage maps into formats other report generators read.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    COVKIT Architecture                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  FileCoverage ──► derived lines ──► category totals ──► summary │
//! │       │                                                   │     │
//! │       └──► merge (same file, many runs)      merge summaries    │
//! │       └──► YUI / LCOV conversion                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use covkit::{merge_file_coverage, FileCoverage, FunctionMeta, Location, Pct};
//!
//! let mut run1 = FileCoverage::new("src/app.js");
//! run1.insert_statement("1", Location::at_line(1), 1);
//! run1.insert_statement("2", Location::at_line(2), 0);
//! run1.insert_function("1", FunctionMeta::new("main", 1), 1);
//!
//! let mut run2 = run1.clone();
//! run2.s.insert("2".into(), 3);
//!
//! let merged = merge_file_coverage(&run1, &run2).unwrap();
//! assert_eq!(merged.s["2"], 3);
//! assert_eq!(merged.summary().statements.pct, Pct::Value(100.0));
//! ```

#![warn(missing_docs)]

mod config;
mod derived;
pub mod formatters;
mod merge;
mod model;
mod percent;
mod result;
mod summary;
mod thresholds;

pub use config::{CoverageConfig, CoverageConfigBuilder};
pub use derived::{
    add_derived_info, add_derived_info_for_file, remove_derived_info, with_derived_info,
    with_derived_info_for_file,
};
pub use formatters::{
    to_yui_coverage, yui_coverage, LcovFormatter, YuiCoverageMap, YuiFileCoverage,
};
pub use merge::{
    check_same_shape, merge_coverage_maps, merge_file_coverage, merge_file_coverage_with,
    MergeOptions, MergePolicy,
};
pub use model::{
    BranchMeta, CoverageMap, FileCoverage, FunctionMeta, LineCounts, Location, Position,
    REQUIRED_FIELDS,
};
pub use percent::percent;
pub use result::{CoverageError, CoverageResult};
pub use summary::{
    branch_totals, merge_summary_objects, simple_totals, summarize_coverage,
    summarize_file_coverage, CategoryTotals, CoverageSummary, Pct,
};
pub use thresholds::{CoverageThresholds, ThresholdViolation};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        add_derived_info, merge_file_coverage, merge_summary_objects, percent,
        summarize_coverage, summarize_file_coverage, to_yui_coverage, CoverageError,
        CoverageMap, CoverageResult, CoverageSummary, FileCoverage, MergeOptions, MergePolicy,
        Pct,
    };
}
