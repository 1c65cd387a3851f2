//! File Coverage Merging
//!
//! Combines counters from repeated executions of the same file. The merged
//! record is a fresh value: inputs are never mutated and derived line counts
//! are dropped, since they no longer match the summed statement counts.
//!
//! Operands are expected to share their shape. [`MergePolicy`] decides what
//! happens when they do not.

use crate::model::{CoverageMap, FileCoverage};
use crate::result::{CoverageError, CoverageResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// How to treat operands whose counter shapes differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Reject differing key sets or arm counts with `ShapeMismatch`
    #[default]
    Strict,
    /// Union key sets and zero-extend shorter arm sequences
    BestEffort,
}

/// Merge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Shape policy
    pub policy: MergePolicy,
}

impl MergeOptions {
    /// Options rejecting shape mismatches
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            policy: MergePolicy::Strict,
        }
    }

    /// Options tolerating shape mismatches
    #[must_use]
    pub const fn best_effort() -> Self {
        Self {
            policy: MergePolicy::BestEffort,
        }
    }

    /// Set the shape policy
    #[must_use]
    pub const fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }
}

fn record_path<'a>(first: &'a FileCoverage, second: &'a FileCoverage) -> &'a str {
    if first.path.is_empty() {
        second.path.as_str()
    } else {
        first.path.as_str()
    }
}

fn check_keys<V>(
    path: &str,
    category: &'static str,
    first: &BTreeMap<String, V>,
    second: &BTreeMap<String, V>,
) -> CoverageResult<()> {
    if let Some(key) = second.keys().find(|key| !first.contains_key(*key)) {
        return Err(CoverageError::shape_mismatch(
            path,
            category,
            key.as_str(),
            "is missing from the first record",
        ));
    }
    if let Some(key) = first.keys().find(|key| !second.contains_key(*key)) {
        return Err(CoverageError::shape_mismatch(
            path,
            category,
            key.as_str(),
            "is missing from the second record",
        ));
    }
    Ok(())
}

/// Verify that two records have identical counter shapes
pub fn check_same_shape(first: &FileCoverage, second: &FileCoverage) -> CoverageResult<()> {
    let path = record_path(first, second);
    check_keys(path, "s", &first.s, &second.s)?;
    check_keys(path, "f", &first.f, &second.f)?;
    check_keys(path, "b", &first.b, &second.b)?;

    for (key, arms) in &first.b {
        let other = second.b.get(key).map_or(0, Vec::len);
        if arms.len() != other {
            return Err(CoverageError::shape_mismatch(
                path,
                "b",
                key.as_str(),
                format!("has {} arms in the first record and {other} in the second", arms.len()),
            ));
        }
    }
    Ok(())
}

/// Add `source` counts into `target`, returning keys `target` did not have
fn add_counts(
    path: &str,
    category: &'static str,
    target: &mut BTreeMap<String, u64>,
    source: &BTreeMap<String, u64>,
) -> Vec<String> {
    let mut added = Vec::new();
    for (key, &count) in source {
        if let Some(slot) = target.get_mut(key) {
            *slot = slot.saturating_add(count);
        } else {
            debug!(path, category, key = %key, "counter only in second record, taking it as is");
            let _ = target.insert(key.clone(), count);
            added.push(key.clone());
        }
    }
    added
}

/// Merge two records for the same file with the strict policy
pub fn merge_file_coverage(
    first: &FileCoverage,
    second: &FileCoverage,
) -> CoverageResult<FileCoverage> {
    merge_file_coverage_with(first, second, &MergeOptions::strict())
}

/// Merge two records for the same file
///
/// Statement and function counts are summed per key; branch counts are
/// summed per arm index. Uninterpreted record keys keep the first record's
/// value. The result has no derived line counts.
pub fn merge_file_coverage_with(
    first: &FileCoverage,
    second: &FileCoverage,
    options: &MergeOptions,
) -> CoverageResult<FileCoverage> {
    if options.policy == MergePolicy::Strict {
        check_same_shape(first, second)?;
    }

    let mut merged = first.clone();
    let _ = merged.invalidate_derived_lines();
    let path = record_path(first, second).to_string();
    for (key, value) in &second.extra {
        let _ = merged.extra.entry(key.clone()).or_insert_with(|| value.clone());
    }

    for key in add_counts(&path, "s", &mut merged.s, &second.s) {
        if let Some(location) = second.statement_map.get(&key) {
            let _ = merged.statement_map.insert(key, location.clone());
        }
    }
    for key in add_counts(&path, "f", &mut merged.f, &second.f) {
        if let Some(meta) = second.fn_map.get(&key) {
            let _ = merged.fn_map.insert(key, meta.clone());
        }
    }

    for (key, arms) in &second.b {
        if let Some(existing) = merged.b.get_mut(key) {
            if existing.len() < arms.len() {
                debug!(path = %path, key = %key, from = existing.len(), to = arms.len(), "extending branch arms");
                existing.resize(arms.len(), 0);
            }
            for (slot, &count) in existing.iter_mut().zip(arms) {
                *slot = slot.saturating_add(count);
            }
        } else {
            debug!(path = %path, key = %key, "branch only in second record, taking it as is");
            let _ = merged.b.insert(key.clone(), arms.clone());
            if let Some(meta) = second.branch_map.get(key) {
                let _ = merged.branch_map.insert(key.clone(), meta.clone());
            }
        }
    }

    Ok(merged)
}

/// Merge any number of coverage maps into a new one
pub fn merge_coverage_maps<'a, I>(maps: I, options: &MergeOptions) -> CoverageResult<CoverageMap>
where
    I: IntoIterator<Item = &'a CoverageMap>,
{
    let mut merged = CoverageMap::new();
    for map in maps {
        merged.merge(map, options)?;
    }
    Ok(merged)
}

impl CoverageMap {
    /// Merge `other` into this map
    ///
    /// Files only in `other` are copied in; files in both are merged with
    /// [`merge_file_coverage_with`]. On error the map is left unchanged.
    pub fn merge(&mut self, other: &Self, options: &MergeOptions) -> CoverageResult<()> {
        let mut updates = Vec::with_capacity(other.len());
        for (path, file) in other.iter() {
            let next = match self.get(path) {
                Some(existing) => merge_file_coverage_with(existing, file, options)?,
                None => {
                    let mut copy = file.clone();
                    let _ = copy.invalidate_derived_lines();
                    copy
                }
            };
            updates.push((path.clone(), next));
        }

        debug!(files = updates.len(), "merged coverage map");
        for (path, file) in updates {
            let _ = self.insert(path, file);
        }
        Ok(())
    }
}
