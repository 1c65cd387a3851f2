//! Check command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::load_merged;
use crate::output::Reporter;
use crate::CheckArgs;
use covkit::{CoverageConfig, CoverageThresholds};
use tracing::debug;

/// Thresholds given on the command line
#[must_use]
pub fn thresholds_from_args(args: &CheckArgs) -> CoverageThresholds {
    CoverageThresholds {
        lines: args.lines,
        statements: args.statements,
        functions: args.functions,
        branches: args.branches,
    }
}

/// Execute the check command
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let reporter = Reporter::from_config(config);
    let file_config = args
        .config
        .as_deref()
        .map(CoverageConfig::load)
        .transpose()?;
    let settings = config.resolve(file_config, &thresholds_from_args(args));

    if settings.thresholds.is_empty() {
        return Err(CliError::invalid_argument(
            "no thresholds given; pass --lines, --statements, --functions, --branches or --config",
        ));
    }
    debug!(thresholds = ?settings.thresholds, "checking coverage");

    let coverage = load_merged(&args.files, &settings.merge)?;
    let summary = coverage.summary();
    let violations = settings.thresholds.check(&summary);

    if violations.is_empty() {
        reporter.success("Coverage meets every threshold");
        return Ok(());
    }
    for violation in &violations {
        reporter.failure(&violation.to_string());
    }
    Err(CliError::threshold_failed(violations))
}
