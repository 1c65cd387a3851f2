//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests against temporary coverage files

pub mod check;
pub mod convert;
pub mod merge;
pub mod summary;

pub use check::execute_check;
pub use convert::{execute_convert, render_conversion};
pub use merge::execute_merge;
pub use summary::{execute_summary, render_summary_table};

use crate::error::{CliError, CliResult};
use covkit::{merge_coverage_maps, CoverageMap, MergeOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read one coverage map JSON file
pub fn load_coverage(path: &Path) -> CliResult<CoverageMap> {
    let map = CoverageMap::load(path)?;
    debug!(path = %path.display(), files = map.len(), "loaded coverage map");
    Ok(map)
}

/// Read every input and merge them as repeated runs
pub fn load_merged(files: &[PathBuf], options: &MergeOptions) -> CliResult<CoverageMap> {
    if files.is_empty() {
        return Err(CliError::invalid_argument("no coverage files given"));
    }
    let maps = files
        .iter()
        .map(|path| load_coverage(path))
        .collect::<CliResult<Vec<_>>>()?;
    let merged = merge_coverage_maps(&maps, options)?;
    info!(
        inputs = maps.len(),
        files = merged.len(),
        policy = ?options.policy,
        "merged coverage inputs"
    );
    Ok(merged)
}
