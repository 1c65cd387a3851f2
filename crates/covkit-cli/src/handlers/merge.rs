//! Merge command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::load_merged;
use crate::output::Reporter;
use crate::MergeArgs;

/// Execute the merge command
pub fn execute_merge(config: &CliConfig, args: &MergeArgs) -> CliResult<()> {
    let reporter = Reporter::from_config(config);
    let merged = load_merged(&args.files, &config.merge_options())?;

    std::fs::write(&args.output, merged.to_json_string()?)?;
    reporter.success(&format!(
        "Merged {} inputs ({} files) into {}",
        args.files.len(),
        merged.len(),
        args.output.display()
    ));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use crate::handlers::fixtures::{write, RUN_A, RUN_B, RUN_WIDER};
    use covkit::{CoverageMap, MergePolicy};

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(Verbosity::Quiet)
    }

    #[test]
    fn test_merge_writes_combined_map() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("merged.json");
        let args = MergeArgs {
            files: vec![
                write(dir.path(), "a.json", RUN_A),
                write(dir.path(), "b.json", RUN_B),
            ],
            output: output.clone(),
        };

        execute_merge(&quiet(), &args).unwrap();

        let merged = CoverageMap::load(&output).unwrap();
        let file = merged.get("src/app.js").unwrap();
        assert_eq!(file.s["1"], 2);
        assert_eq!(file.f["0"], 1);
        assert!(!file.has_derived_lines());
    }

    #[test]
    fn test_merged_output_has_no_line_counts() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("merged.json");
        let args = MergeArgs {
            files: vec![write(dir.path(), "a.json", RUN_A)],
            output: output.clone(),
        };

        execute_merge(&quiet(), &args).unwrap();

        let json = std::fs::read_to_string(&output).unwrap();
        assert!(!json.contains("\"l\""));
    }

    #[test]
    fn test_strict_merge_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("merged.json");
        let args = MergeArgs {
            files: vec![
                write(dir.path(), "a.json", RUN_A),
                write(dir.path(), "wider.json", RUN_WIDER),
            ],
            output: output.clone(),
        };

        assert!(execute_merge(&quiet(), &args).is_err());
        assert!(!output.exists());

        let lenient = quiet().with_policy(Some(MergePolicy::BestEffort));
        execute_merge(&lenient, &args).unwrap();
        assert!(output.exists());
    }
}
