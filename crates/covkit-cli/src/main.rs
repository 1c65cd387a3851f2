//! Covkit CLI: coverage summaries, merges and conversions
//!
//! ## Usage
//!
//! ```bash
//! covkit summary run1.json run2.json          # Merged summary table
//! covkit merge run*.json -o merged.json       # Combine repeated runs
//! covkit convert merged.json --format lcov    # LCOV to stdout
//! covkit check merged.json --lines 80         # Fail below 80% lines
//! ```

use clap::Parser;
use covkit_cli::{
    handlers::{execute_check, execute_convert, execute_merge, execute_summary},
    logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(config.verbosity, config.color.should_color_stderr());

    match cli.command {
        Commands::Summary(args) => execute_summary(&config, &args),
        Commands::Merge(args) => execute_merge(&config, &args),
        Commands::Convert(args) => execute_convert(&config, &args),
        Commands::Check(args) => execute_check(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_policy(cli.policy.map(Into::into))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use covkit::MergePolicy;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&parse(&["covkit", "summary", "a.json"]));
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert_eq!(config.color, ColorChoice::Auto);
        assert_eq!(config.policy, None);
    }

    #[test]
    fn test_build_config_flags() {
        let config = build_config(&parse(&[
            "covkit",
            "-q",
            "--color",
            "never",
            "--policy",
            "best-effort",
            "summary",
            "a.json",
        ]));
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.policy, Some(MergePolicy::BestEffort));
    }

    #[test]
    fn test_build_config_debug() {
        let config = build_config(&parse(&["covkit", "-vvv", "summary", "a.json"]));
        assert_eq!(config.verbosity, Verbosity::Debug);
    }
}
