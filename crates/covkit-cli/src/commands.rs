//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use covkit::MergePolicy;
use std::path::PathBuf;

/// Covkit: summarize, merge and convert istanbul-style coverage
#[derive(Parser, Debug)]
#[command(name = "covkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Merge policy for repeated runs of the same file
    #[arg(long, global = true)]
    pub policy: Option<PolicyArg>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the coverage summary of one or more coverage maps
    Summary(SummaryArgs),

    /// Merge coverage maps from repeated runs into one
    Merge(MergeArgs),

    /// Convert a coverage map to YUI or LCOV
    Convert(ConvertArgs),

    /// Fail when coverage falls below thresholds
    Check(CheckArgs),
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Coverage map JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the merge command
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Coverage map JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output file for the merged map
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Coverage map JSON file
    pub file: PathBuf,

    /// Target format
    #[arg(short, long, value_enum)]
    pub format: ConvertFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Test name written to LCOV `TN:` records
    #[arg(long)]
    pub test_name: Option<String>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Coverage map JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Minimum line coverage percentage
    #[arg(long, value_parser = parse_percentage)]
    pub lines: Option<f64>,

    /// Minimum statement coverage percentage
    #[arg(long, value_parser = parse_percentage)]
    pub statements: Option<f64>,

    /// Minimum function coverage percentage
    #[arg(long, value_parser = parse_percentage)]
    pub functions: Option<f64>,

    /// Minimum branch coverage percentage
    #[arg(long, value_parser = parse_percentage)]
    pub branches: Option<f64>,

    /// Config file with thresholds and merge policy (.yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn parse_percentage(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0..=100"))
    }
}

/// Conversion target format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertFormat {
    /// YUI coverage JSON
    Yui,
    /// LCOV tracefile
    Lcov,
}

/// Color argument for CLI
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Merge policy argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Reject records whose keys differ
    Strict,
    /// Union keys and zero-extend branch arms
    BestEffort,
}

impl From<PolicyArg> for MergePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => Self::Strict,
            PolicyArg::BestEffort => Self::BestEffort,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_verify_cli() {
            use clap::CommandFactory;
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parse_summary() {
            let cli = Cli::try_parse_from(["covkit", "summary", "a.json", "b.json", "--json"])
                .unwrap();
            match cli.command {
                Commands::Summary(args) => {
                    assert_eq!(args.files.len(), 2);
                    assert!(args.json);
                }
                other => panic!("expected summary, got {other:?}"),
            }
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::try_parse_from([
                "covkit",
                "merge",
                "a.json",
                "-o",
                "out.json",
                "-vv",
                "--policy",
                "best-effort",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.policy, Some(PolicyArg::BestEffort));
        }

        #[test]
        fn test_merge_requires_output() {
            assert!(Cli::try_parse_from(["covkit", "merge", "a.json"]).is_err());
        }

        #[test]
        fn test_summary_requires_files() {
            assert!(Cli::try_parse_from(["covkit", "summary"]).is_err());
        }

        #[test]
        fn test_convert_format() {
            let cli =
                Cli::try_parse_from(["covkit", "convert", "a.json", "--format", "lcov"]).unwrap();
            match cli.command {
                Commands::Convert(args) => {
                    assert_eq!(args.format, ConvertFormat::Lcov);
                    assert!(args.output.is_none());
                }
                other => panic!("expected convert, got {other:?}"),
            }
        }

        #[test]
        fn test_check_thresholds() {
            let cli = Cli::try_parse_from([
                "covkit",
                "check",
                "a.json",
                "--lines",
                "80",
                "--branches",
                "62.5",
            ])
            .unwrap();
            match cli.command {
                Commands::Check(args) => {
                    assert_eq!(args.lines, Some(80.0));
                    assert_eq!(args.branches, Some(62.5));
                    assert_eq!(args.functions, None);
                }
                other => panic!("expected check, got {other:?}"),
            }
        }
    }

    mod percentage_tests {
        use super::*;

        #[test]
        fn test_parse_percentage_bounds() {
            assert_eq!(parse_percentage("0"), Ok(0.0));
            assert_eq!(parse_percentage("100"), Ok(100.0));
            assert!(parse_percentage("100.5").is_err());
            assert!(parse_percentage("-1").is_err());
            assert!(parse_percentage("many").is_err());
        }
    }

    mod conversion_tests {
        use super::*;
        use crate::config::ColorChoice;

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        }

        #[test]
        fn test_policy_arg_conversion() {
            assert_eq!(MergePolicy::from(PolicyArg::Strict), MergePolicy::Strict);
            assert_eq!(
                MergePolicy::from(PolicyArg::BestEffort),
                MergePolicy::BestEffort
            );
        }
    }
}
