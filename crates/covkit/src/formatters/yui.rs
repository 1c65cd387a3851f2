//! YUI Coverage Format
//!
//! Per file, line and function counts plus four counters:
//!
//! ```text
//! {
//!   "lines":     { "<line>": count },
//!   "calledLines": n, "coveredLines": n,
//!   "functions": { "<name>:<line>": count },
//!   "calledFunctions": n, "coveredFunctions": n
//! }
//! ```
//!
//! `covered*` counts every entry while `called*` counts entries with a
//! non-zero count. The names look swapped; consumers of this format depend
//! on the values as they are, so they are kept.

use crate::derived::add_derived_info;
use crate::model::{CoverageMap, FileCoverage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// YUI coverage for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YuiFileCoverage {
    /// Line number → derived count
    pub lines: BTreeMap<u32, u64>,
    /// Lines with a non-zero count
    pub called_lines: u64,
    /// Every line entry
    pub covered_lines: u64,
    /// `"<name>:<line>"` → count
    pub functions: BTreeMap<String, u64>,
    /// Functions with a non-zero count
    pub called_functions: u64,
    /// Every function entry
    pub covered_functions: u64,
}

/// YUI coverage keyed by file path
pub type YuiCoverageMap = BTreeMap<String, YuiFileCoverage>;

fn yui_file(file: &FileCoverage) -> YuiFileCoverage {
    let mut out = YuiFileCoverage::default();

    for (&line, &count) in file.line_counts().iter() {
        let _ = out.lines.insert(line, count);
        out.covered_lines += 1;
        if count > 0 {
            out.called_lines += 1;
        }
    }

    for (id, &count) in &file.f {
        let Some(meta) = file.fn_map.get(id) else {
            warn!(path = %file.path, function = %id, "function has no fnMap entry, not converted");
            continue;
        };
        let _ = out.functions.insert(format!("{}:{}", meta.name, meta.line), count);
        out.covered_functions += 1;
        if count > 0 {
            out.called_functions += 1;
        }
    }

    out
}

/// Convert to YUI format, deriving line counts on `coverage` first
///
/// Every record in `coverage` carries derived lines afterwards.
pub fn to_yui_coverage(coverage: &mut CoverageMap) -> YuiCoverageMap {
    add_derived_info(coverage);
    yui_coverage(coverage)
}

/// Convert to YUI format without touching `coverage`
#[must_use]
pub fn yui_coverage(coverage: &CoverageMap) -> YuiCoverageMap {
    coverage
        .iter()
        .map(|(path, file)| (path.clone(), yui_file(file)))
        .collect()
}
