//! Coverage Summaries
//!
//! Per-category totals for a file, a map, or any number of merged runs.
//!
//! Two aggregation shapes exist:
//! - simple categories (lines, statements, functions) count entries
//! - branches count individual arms across every conditional
//!
//! Both finish with [`percent`] over `(covered, total)`.

use crate::derived::add_derived_info;
use crate::derived::add_derived_info_for_file;
use crate::model::{BranchMeta, CoverageMap, FileCoverage};
use crate::percent::percent;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coverage percentage, or `Unknown` for a summary that was never computed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pct {
    /// Not computed yet
    #[default]
    Unknown,
    /// Percentage rounded to two decimals
    Value(f64),
}

impl Pct {
    /// Numeric value, if computed
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Unknown => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Whether the percentage was never computed
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Pct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            Self::Value(v) => write!(f, "{v:.2}"),
        }
    }
}

impl Serialize for Pct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unknown => serializer.serialize_str("Unknown"),
            Self::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

struct PctVisitor;

impl Visitor<'_> for PctVisitor {
    type Value = Pct;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a percentage or the string \"Unknown\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Pct, E> {
        Ok(Pct::Value(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Pct, E> {
        Ok(Pct::Value(v as f64))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Pct, E> {
        Ok(Pct::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Pct, E> {
        if v == "Unknown" {
            Ok(Pct::Unknown)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Pct {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PctVisitor)
    }
}

/// Totals for one coverage category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Number of instrumented entries (or branch arms)
    pub total: u64,
    /// Entries executed at least once, or skipped
    pub covered: u64,
    /// Entries never executed but flagged as skipped
    #[serde(default)]
    pub skipped: u64,
    /// `covered / total` as a percentage
    pub pct: Pct,
}

impl CategoryTotals {
    /// Zero counts with an unknown percentage
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            total: 0,
            covered: 0,
            skipped: 0,
            pct: Pct::Unknown,
        }
    }

    /// Totals with a freshly computed percentage
    #[must_use]
    pub fn from_counts(total: u64, covered: u64, skipped: u64) -> Self {
        Self {
            total,
            covered,
            skipped,
            pct: Pct::Value(percent(covered, total)),
        }
    }

    /// Add another category's counts; the percentage is left stale
    fn accumulate(&mut self, other: &Self) {
        self.total += other.total;
        self.covered += other.covered;
        self.skipped += other.skipped;
    }

    fn recompute_pct(&mut self) {
        self.pct = Pct::Value(percent(self.covered, self.total));
    }
}

/// Aggregate a simple category from `(count, skipped)` entries
pub fn simple_totals<I>(entries: I) -> CategoryTotals
where
    I: IntoIterator<Item = (u64, bool)>,
{
    let (mut total, mut covered, mut skipped) = (0, 0, 0);
    for (count, skip) in entries {
        total += 1;
        if count > 0 || skip {
            covered += 1;
        }
        if count == 0 && skip {
            skipped += 1;
        }
    }
    CategoryTotals::from_counts(total, covered, skipped)
}

/// Aggregate branch arms across every conditional
pub fn branch_totals(
    branches: &BTreeMap<String, Vec<u64>>,
    branch_map: &BTreeMap<String, BranchMeta>,
) -> CategoryTotals {
    let (mut total, mut covered, mut skipped) = (0, 0, 0);
    for (id, arms) in branches {
        let meta = branch_map.get(id);
        for (index, &count) in arms.iter().enumerate() {
            let skip = meta.is_some_and(|m| m.arm_skipped(index));
            if count > 0 || skip {
                covered += 1;
            }
            if count == 0 && skip {
                skipped += 1;
            }
        }
        total += arms.len() as u64;
    }
    CategoryTotals::from_counts(total, covered, skipped)
}

/// Summary across the four coverage categories
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Derived line coverage
    pub lines: CategoryTotals,
    /// Statement coverage
    pub statements: CategoryTotals,
    /// Function coverage
    pub functions: CategoryTotals,
    /// Branch arm coverage
    pub branches: CategoryTotals,
}

impl CoverageSummary {
    /// All-zero summary with unknown percentages
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            lines: CategoryTotals::blank(),
            statements: CategoryTotals::blank(),
            functions: CategoryTotals::blank(),
            branches: CategoryTotals::blank(),
        }
    }

    /// Whether no category has been computed
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }

    /// Categories in reporting order
    #[must_use]
    pub const fn categories(&self) -> [(&'static str, &CategoryTotals); 4] {
        [
            ("lines", &self.lines),
            ("statements", &self.statements),
            ("functions", &self.functions),
            ("branches", &self.branches),
        ]
    }

    /// Fold `other` into this summary and recompute every percentage
    pub fn merge(&mut self, other: &Self) {
        self.lines.accumulate(&other.lines);
        self.statements.accumulate(&other.statements);
        self.functions.accumulate(&other.functions);
        self.branches.accumulate(&other.branches);
        self.recompute_pct();
    }

    fn recompute_pct(&mut self) {
        self.lines.recompute_pct();
        self.statements.recompute_pct();
        self.functions.recompute_pct();
        self.branches.recompute_pct();
    }
}

/// Merge any number of summaries into one
///
/// Items may be `&CoverageSummary` or `Option<&CoverageSummary>`; `None`
/// entries are skipped. When no summary is provided at all the result is
/// [`CoverageSummary::blank`], whose percentages stay `Unknown`.
pub fn merge_summary_objects<'a, I>(summaries: I) -> CoverageSummary
where
    I: IntoIterator,
    I::Item: Into<Option<&'a CoverageSummary>>,
{
    summaries
        .into_iter()
        .filter_map(Into::<Option<&'a CoverageSummary>>::into)
        .fold(CoverageSummary::blank(), |mut acc, summary| {
            acc.merge(summary);
            acc
        })
}

/// Summarize one record, deriving its line counts first if needed
pub fn summarize_file_coverage(file: &mut FileCoverage) -> CoverageSummary {
    add_derived_info_for_file(file);
    file.summary()
}

/// Summarize a whole map by merging every file's summary
pub fn summarize_coverage(coverage: &mut CoverageMap) -> CoverageSummary {
    add_derived_info(coverage);
    coverage.summary()
}

impl FileCoverage {
    /// Summary of this record without mutating it
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        let lines = simple_totals(self.line_counts().values().map(|&count| (count, false)));
        let statements = simple_totals(self.s.iter().map(|(id, &count)| {
            let skip = self.statement_map.get(id).is_some_and(|loc| loc.skip);
            (count, skip)
        }));
        let functions = simple_totals(self.f.iter().map(|(id, &count)| {
            let skip = self.fn_map.get(id).is_some_and(|meta| meta.skip);
            (count, skip)
        }));
        let branches = branch_totals(&self.b, &self.branch_map);

        CoverageSummary {
            lines,
            statements,
            functions,
            branches,
        }
    }
}

impl CoverageMap {
    /// Summary per file, keyed by path
    #[must_use]
    pub fn file_summaries(&self) -> BTreeMap<String, CoverageSummary> {
        self.iter()
            .map(|(path, file)| (path.clone(), file.summary()))
            .collect()
    }

    /// Summary of every file merged, without mutating the map
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        let summaries: Vec<CoverageSummary> = self.iter().map(|(_, file)| file.summary()).collect();
        merge_summary_objects(&summaries)
    }
}
