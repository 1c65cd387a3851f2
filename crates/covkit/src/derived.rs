//! Derived Line Coverage
//!
//! Line counts are not instrumented directly. A line's count is the maximum
//! count over the statements that start on it. Derivation is lazy and runs at
//! most once per record: once `l` is present it is left alone until
//! [`FileCoverage::invalidate_derived_lines`] or [`remove_derived_info`] drops
//! it.

use crate::model::{CoverageMap, FileCoverage, LineCounts};
use std::borrow::Cow;
use tracing::warn;

/// Compute line counts from statement counts without touching the record
fn project_lines(file: &FileCoverage) -> LineCounts {
    let mut lines = LineCounts::new();
    for (id, &count) in &file.s {
        let Some(location) = file.statement_map.get(id) else {
            warn!(path = %file.path, statement = %id, "statement has no location, not projected");
            continue;
        };
        let Some(line) = location.start.line else {
            warn!(path = %file.path, statement = %id, "statement has no start line, not projected");
            continue;
        };
        // Skipped statements read as executed once
        let count = if count == 0 && location.skip { 1 } else { count };
        let _ = lines
            .entry(line)
            .and_modify(|current| *current = (*current).max(count))
            .or_insert(count);
    }
    lines
}

/// Derive `l` for one record in place; no-op when already derived
pub fn add_derived_info_for_file(file: &mut FileCoverage) {
    if file.has_derived_lines() {
        return;
    }
    let lines = project_lines(file);
    file.store_derived_lines(lines);
}

/// Derive `l` for every record in the map
pub fn add_derived_info(coverage: &mut CoverageMap) {
    coverage.values_mut().for_each(add_derived_info_for_file);
}

/// Drop `l` from every record in the map
pub fn remove_derived_info(coverage: &mut CoverageMap) {
    for file in coverage.values_mut() {
        let _ = file.invalidate_derived_lines();
    }
}

/// Copy of `file` with `l` derived; `file` is left untouched
#[must_use]
pub fn with_derived_info_for_file(file: &FileCoverage) -> FileCoverage {
    let mut copy = file.clone();
    add_derived_info_for_file(&mut copy);
    copy
}

/// Copy of `coverage` with `l` derived on every record
#[must_use]
pub fn with_derived_info(coverage: &CoverageMap) -> CoverageMap {
    let mut copy = coverage.clone();
    add_derived_info(&mut copy);
    copy
}

impl FileCoverage {
    /// Stored line counts, or freshly projected ones when not yet derived
    #[must_use]
    pub fn line_counts(&self) -> Cow<'_, LineCounts> {
        self.derived_lines()
            .map_or_else(|| Cow::Owned(project_lines(self)), Cow::Borrowed)
    }
}
