//! Configuration Schema
//!
//! Merge policy and coverage thresholds, loadable from YAML or JSON.
//!
//! ```yaml
//! merge:
//!   policy: best-effort
//! thresholds:
//!   lines: 80
//!   branches: 60
//! ```

use crate::merge::{MergeOptions, MergePolicy};
use crate::result::{CoverageError, CoverageResult};
use crate::thresholds::CoverageThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Merge settings
    pub merge: MergeOptions,
    /// Coverage thresholds
    pub thresholds: CoverageThresholds,
}

impl CoverageConfig {
    /// Create a builder for coverage config
    #[must_use]
    pub fn builder() -> CoverageConfigBuilder {
        CoverageConfigBuilder::default()
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(yaml: &str) -> CoverageResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse JSON configuration
    pub fn from_json_str(json: &str) -> CoverageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration, choosing the parser by file extension
    pub fn load(path: &Path) -> CoverageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(CoverageError::config(format!(
                "unsupported config file {}: expected .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

/// Builder for coverage configuration
#[derive(Debug, Default)]
pub struct CoverageConfigBuilder {
    policy: MergePolicy,
    thresholds: CoverageThresholds,
}

impl CoverageConfigBuilder {
    /// Set the merge policy
    #[must_use]
    pub fn policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set all thresholds
    #[must_use]
    pub fn thresholds(mut self, thresholds: CoverageThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the line threshold
    #[must_use]
    pub fn lines(mut self, min: f64) -> Self {
        self.thresholds.lines = Some(min);
        self
    }

    /// Set the statement threshold
    #[must_use]
    pub fn statements(mut self, min: f64) -> Self {
        self.thresholds.statements = Some(min);
        self
    }

    /// Set the function threshold
    #[must_use]
    pub fn functions(mut self, min: f64) -> Self {
        self.thresholds.functions = Some(min);
        self
    }

    /// Set the branch threshold
    #[must_use]
    pub fn branches(mut self, min: f64) -> Self {
        self.thresholds.branches = Some(min);
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> CoverageConfig {
        CoverageConfig {
            merge: MergeOptions::default().with_policy(self.policy),
            thresholds: self.thresholds,
        }
    }
}
