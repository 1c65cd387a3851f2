//! Coverage Thresholds
//!
//! Minimum percentages per category, checked against a summary.

use crate::summary::{CategoryTotals, CoverageSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum percentage per category; `None` disables the check
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageThresholds {
    /// Minimum line coverage
    pub lines: Option<f64>,
    /// Minimum statement coverage
    pub statements: Option<f64>,
    /// Minimum function coverage
    pub functions: Option<f64>,
    /// Minimum branch coverage
    pub branches: Option<f64>,
}

/// A category whose percentage fell below its threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdViolation {
    /// Category name
    pub category: &'static str,
    /// Configured minimum
    pub required: f64,
    /// Measured percentage
    pub actual: f64,
}

impl fmt::Display for ThresholdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} coverage {:.2}% is below threshold {:.2}%",
            self.category, self.actual, self.required
        )
    }
}

impl CoverageThresholds {
    /// No thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same minimum for every category
    #[must_use]
    pub const fn uniform(min: f64) -> Self {
        Self {
            lines: Some(min),
            statements: Some(min),
            functions: Some(min),
            branches: Some(min),
        }
    }

    /// Set the line threshold
    #[must_use]
    pub const fn with_lines(mut self, min: f64) -> Self {
        self.lines = Some(min);
        self
    }

    /// Set the statement threshold
    #[must_use]
    pub const fn with_statements(mut self, min: f64) -> Self {
        self.statements = Some(min);
        self
    }

    /// Set the function threshold
    #[must_use]
    pub const fn with_functions(mut self, min: f64) -> Self {
        self.functions = Some(min);
        self
    }

    /// Set the branch threshold
    #[must_use]
    pub const fn with_branches(mut self, min: f64) -> Self {
        self.branches = Some(min);
        self
    }

    /// Whether no category has a threshold
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_none()
            && self.statements.is_none()
            && self.functions.is_none()
            && self.branches.is_none()
    }

    /// Overlay `other`'s thresholds on top of these
    #[must_use]
    pub fn overridden_by(self, other: &Self) -> Self {
        Self {
            lines: other.lines.or(self.lines),
            statements: other.statements.or(self.statements),
            functions: other.functions.or(self.functions),
            branches: other.branches.or(self.branches),
        }
    }

    /// Categories falling short of their threshold
    ///
    /// A category whose percentage is still `Unknown` never violates.
    #[must_use]
    pub fn check(&self, summary: &CoverageSummary) -> Vec<ThresholdViolation> {
        let limits = [self.lines, self.statements, self.functions, self.branches];
        summary
            .categories()
            .into_iter()
            .zip(limits)
            .filter_map(|((category, totals), limit)| violation(category, totals, limit?))
            .collect()
    }
}

fn violation(
    category: &'static str,
    totals: &CategoryTotals,
    required: f64,
) -> Option<ThresholdViolation> {
    let actual = totals.pct.value()?;
    (actual < required).then_some(ThresholdViolation {
        category,
        required,
        actual,
    })
}
