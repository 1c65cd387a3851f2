//! LCOV Tracefile Formatter
//!
//! ## LCOV Format
//!
//! ```text
//! TN:<test name>
//! SF:<source file>
//! FN:<line>,<function name>
//! FNDA:<execution count>,<function name>
//! FNF:<functions found>
//! FNH:<functions hit>
//! BRDA:<line>,<block>,<arm>,<execution count>
//! BRF:<branches found>
//! BRH:<branches hit>
//! DA:<line>,<execution count>
//! LF:<lines found>
//! LH:<lines hit>
//! end_of_record
//! ```

use crate::model::{CoverageMap, FileCoverage};
use crate::result::CoverageResult;
use std::fmt::Write;
use std::path::Path;

/// LCOV format report generator
#[derive(Debug)]
pub struct LcovFormatter<'a> {
    coverage: &'a CoverageMap,
    test_name: Option<String>,
}

impl<'a> LcovFormatter<'a> {
    /// Create a new LCOV formatter over a coverage map
    #[must_use]
    pub fn new(coverage: &'a CoverageMap) -> Self {
        Self {
            coverage,
            test_name: None,
        }
    }

    /// Set the test name for the report
    #[must_use]
    pub fn with_test_name(mut self, name: impl Into<String>) -> Self {
        self.test_name = Some(name.into());
        self
    }

    /// Generate LCOV format report as a string
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        for (key, file) in self.coverage.iter() {
            if let Some(ref name) = self.test_name {
                let _ = writeln!(output, "TN:{name}");
            } else {
                output.push_str("TN:\n");
            }

            let source = if file.path.is_empty() { key } else { &file.path };
            let _ = writeln!(output, "SF:{source}");

            Self::write_functions(&mut output, file);
            Self::write_branches(&mut output, file);
            Self::write_lines(&mut output, file);

            output.push_str("end_of_record\n");
        }

        output
    }

    /// Save the LCOV report to a file
    ///
    /// # Errors
    ///
    /// Returns error if file write fails
    pub fn save(&self, path: &Path) -> CoverageResult<()> {
        let content = self.generate();
        std::fs::write(path, content)?;
        Ok(())
    }

    fn write_functions(output: &mut String, file: &FileCoverage) {
        let mut found = 0;
        let mut hit = 0;

        for (id, meta) in &file.fn_map {
            let count = file.f.get(id).copied().unwrap_or(0);
            let _ = writeln!(output, "FN:{},{}", meta.line, meta.name);
            let _ = writeln!(output, "FNDA:{count},{}", meta.name);
            found += 1;
            if count > 0 {
                hit += 1;
            }
        }

        let _ = writeln!(output, "FNF:{found}");
        let _ = writeln!(output, "FNH:{hit}");
    }

    fn write_branches(output: &mut String, file: &FileCoverage) {
        let mut found = 0;
        let mut hit = 0;

        for (id, arms) in &file.b {
            // BRDA needs a line; arms without branch metadata are left out
            let Some(meta) = file.branch_map.get(id) else {
                continue;
            };
            for (arm, count) in arms.iter().enumerate() {
                let _ = writeln!(output, "BRDA:{},{id},{arm},{count}", meta.line);
                found += 1;
                if *count > 0 {
                    hit += 1;
                }
            }
        }

        let _ = writeln!(output, "BRF:{found}");
        let _ = writeln!(output, "BRH:{hit}");
    }

    fn write_lines(output: &mut String, file: &FileCoverage) {
        let lines = file.line_counts();
        let mut hit = 0;

        for (line, count) in lines.iter() {
            let _ = writeln!(output, "DA:{line},{count}");
            if *count > 0 {
                hit += 1;
            }
        }

        let _ = writeln!(output, "LF:{}", lines.len());
        let _ = writeln!(output, "LH:{hit}");
    }
}
