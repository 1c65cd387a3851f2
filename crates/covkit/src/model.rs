//! Coverage Data Model
//!
//! Istanbul-style per-file coverage records as produced by an external
//! instrumenter, and the map of records keyed by file path.
//!
//! ```text
//! FileCoverage
//! ├── statementMap  id → Location        s  id → count
//! ├── fnMap         id → FunctionMeta    f  id → count
//! ├── branchMap     id → BranchMeta      b  id → [count per arm]
//! └── l             line → count   (derived, private, explicit invalidation)
//! ```

use crate::result::{CoverageError, CoverageResult};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Derived per-line execution counts (line number → count)
pub type LineCounts = BTreeMap<u32, u64>;

/// Keys every file coverage record must carry
pub const REQUIRED_FIELDS: [&str; 5] = ["statementMap", "s", "fnMap", "f", "b"];

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// A line/column position in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number; absent for implicit arms such as a missing `else`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Column, when the instrumenter recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Position {
    /// Position at the start of a line
    #[must_use]
    pub const fn line(line: u32) -> Self {
        Self {
            line: Some(line),
            column: None,
        }
    }
}

/// Source span of a statement or branch arm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Where the span starts
    pub start: Position,
    /// Where the span ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
    /// Instrumenter was told to ignore this span
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip: bool,
}

impl Location {
    /// Location starting at `line` with no end or column information
    #[must_use]
    pub const fn at_line(line: u32) -> Self {
        Self {
            start: Position::line(line),
            end: None,
            skip: false,
        }
    }

    /// Mark the span as skipped
    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }
}

/// Function entry point metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionMeta {
    /// Function name (instrumenters use `(anonymous_N)` for unnamed ones)
    pub name: String,
    /// Line of the declaration
    pub line: u32,
    /// Instrumenter was told to ignore this function
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip: bool,
    /// Keys this crate does not interpret (`loc`, `decl`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionMeta {
    /// Create function metadata
    #[must_use]
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
            skip: false,
            extra: Map::new(),
        }
    }
}

/// Conditional branch metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchMeta {
    /// Line of the conditional
    pub line: u32,
    /// Kind of conditional (`if`, `cond-expr`, `switch`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// One location per arm, index-aligned with the arm counts
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BranchMeta {
    /// Create branch metadata without per-arm locations
    #[must_use]
    pub fn new(line: u32, kind: impl Into<String>) -> Self {
        Self {
            line,
            kind: kind.into(),
            locations: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Whether arm `index` is flagged as skipped
    #[must_use]
    pub fn arm_skipped(&self, index: usize) -> bool {
        self.locations.get(index).is_some_and(|loc| loc.skip)
    }
}

/// Coverage counters for one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCoverage {
    /// Source file path
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Statement id → source span
    pub statement_map: BTreeMap<String, Location>,
    /// Statement id → execution count
    pub s: BTreeMap<String, u64>,
    /// Function id → metadata
    pub fn_map: BTreeMap<String, FunctionMeta>,
    /// Function id → execution count
    pub f: BTreeMap<String, u64>,
    /// Branch id → metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub branch_map: BTreeMap<String, BranchMeta>,
    /// Branch id → execution count per arm
    pub b: BTreeMap<String, Vec<u64>>,
    #[serde(
        default,
        deserialize_with = "deserialize_line_counts",
        skip_serializing_if = "Option::is_none"
    )]
    l: Option<LineCounts>,
    /// Record-level keys this crate does not interpret (`hash`, `_coverageSchema`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Flattened records are buffered before decoding, so JSON object keys reach
// `l` as strings rather than integers.
fn deserialize_line_counts<'de, D>(deserializer: D) -> Result<Option<LineCounts>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, u64>> = Option::deserialize(deserializer)?;
    raw.map(|lines| {
        lines
            .into_iter()
            .map(|(line, count)| {
                line.parse::<u32>()
                    .map(|line| (line, count))
                    .map_err(|_| {
                        <D::Error as de::Error>::custom(format!(
                            "line key `{line}` is not a line number"
                        ))
                    })
            })
            .collect()
    })
    .transpose()
}

impl FileCoverage {
    /// Create an empty record for `path`
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Decode a record from JSON, reporting absent required keys by name
    pub fn from_value(path: &str, value: Value) -> CoverageResult<Self> {
        let Value::Object(object) = value else {
            return Err(CoverageError::inconsistent(
                path,
                "file coverage must be a JSON object",
            ));
        };
        if let Some(field) = REQUIRED_FIELDS
            .iter()
            .find(|field| !object.contains_key(**field))
        {
            return Err(CoverageError::missing_field(path, *field));
        }

        let mut file: Self = serde_json::from_value(Value::Object(object))?;
        if file.path.is_empty() {
            file.path = path.to_string();
        }
        Ok(file)
    }

    /// Check that counters and location maps agree on their keys
    pub fn validate(&self) -> CoverageResult<()> {
        if let Some(id) = self.s.keys().find(|id| !self.statement_map.contains_key(*id)) {
            return Err(CoverageError::inconsistent(
                &self.path,
                format!("statement {id} has a count but no statementMap entry"),
            ));
        }
        if let Some(id) = self.statement_map.keys().find(|id| !self.s.contains_key(*id)) {
            return Err(CoverageError::inconsistent(
                &self.path,
                format!("statement {id} has a statementMap entry but no count"),
            ));
        }
        if let Some(id) = self.f.keys().find(|id| !self.fn_map.contains_key(*id)) {
            return Err(CoverageError::inconsistent(
                &self.path,
                format!("function {id} has a count but no fnMap entry"),
            ));
        }
        if let Some(id) = self.fn_map.keys().find(|id| !self.f.contains_key(*id)) {
            return Err(CoverageError::inconsistent(
                &self.path,
                format!("function {id} has a fnMap entry but no count"),
            ));
        }
        Ok(())
    }

    /// Add a statement starting on `line`
    ///
    /// Invalidates derived line counts.
    pub fn insert_statement(&mut self, id: impl Into<String>, location: Location, count: u64) {
        let id = id.into();
        let _ = self.statement_map.insert(id.clone(), location);
        let _ = self.s.insert(id, count);
        self.l = None;
    }

    /// Add a function entry point
    pub fn insert_function(&mut self, id: impl Into<String>, meta: FunctionMeta, count: u64) {
        let id = id.into();
        let _ = self.fn_map.insert(id.clone(), meta);
        let _ = self.f.insert(id, count);
    }

    /// Add a branch with one count per arm
    pub fn insert_branch(&mut self, id: impl Into<String>, meta: BranchMeta, arms: Vec<u64>) {
        let id = id.into();
        let _ = self.branch_map.insert(id.clone(), meta);
        let _ = self.b.insert(id, arms);
    }

    /// Derived line counts, if they have been computed
    #[must_use]
    pub fn derived_lines(&self) -> Option<&LineCounts> {
        self.l.as_ref()
    }

    /// Whether derived line counts are present
    #[must_use]
    pub fn has_derived_lines(&self) -> bool {
        self.l.is_some()
    }

    /// Drop derived line counts so the next derivation recomputes them
    pub fn invalidate_derived_lines(&mut self) -> Option<LineCounts> {
        self.l.take()
    }

    pub(crate) fn store_derived_lines(&mut self, lines: LineCounts) {
        self.l = Some(lines);
    }
}

/// Coverage records keyed by file path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageMap {
    files: BTreeMap<String, FileCoverage>,
}

impl CoverageMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a map from JSON, checking each record's required keys
    pub fn from_value(value: Value) -> CoverageResult<Self> {
        let Value::Object(object) = value else {
            return Err(CoverageError::inconsistent(
                "<coverage map>",
                "coverage map must be a JSON object keyed by file path",
            ));
        };
        let mut map = Self::new();
        for (path, record) in object {
            let file = FileCoverage::from_value(&path, record)?;
            map.insert(path, file);
        }
        Ok(map)
    }

    /// Parse a map from JSON text
    pub fn from_json_str(json: &str) -> CoverageResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Read a map from a JSON file
    pub fn load(path: &std::path::Path) -> CoverageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the map as pretty-printed JSON
    pub fn to_json_string(&self) -> CoverageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert or replace the record for `path`
    pub fn insert(&mut self, path: impl Into<String>, file: FileCoverage) -> Option<FileCoverage> {
        self.files.insert(path.into(), file)
    }

    /// Record for `path`
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileCoverage> {
        self.files.get(path)
    }

    /// Mutable record for `path`
    pub fn get_mut(&mut self, path: &str) -> Option<&mut FileCoverage> {
        self.files.get_mut(path)
    }

    /// Remove the record for `path`
    pub fn remove(&mut self, path: &str) -> Option<FileCoverage> {
        self.files.remove(path)
    }

    /// File paths in sorted order
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the map has no files
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over `(path, record)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileCoverage)> {
        self.files.iter()
    }

    /// Iterate mutably over records
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut FileCoverage> {
        self.files.values_mut()
    }

    /// Validate every record
    pub fn validate(&self) -> CoverageResult<()> {
        self.files.values().try_for_each(FileCoverage::validate)
    }
}

impl FromIterator<(String, FileCoverage)> for CoverageMap {
    fn from_iter<T: IntoIterator<Item = (String, FileCoverage)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CoverageMap {
    type Item = (String, FileCoverage);
    type IntoIter = std::collections::btree_map::IntoIter<String, FileCoverage>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}
