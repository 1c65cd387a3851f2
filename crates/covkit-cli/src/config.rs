//! CLI configuration

use covkit::{CoverageConfig, CoverageThresholds, MergeOptions, MergePolicy};
use std::io::IsTerminal;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Map `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Whether output written to stdout should be colored
    #[must_use]
    pub fn should_color(self) -> bool {
        self.resolve_for(&std::io::stdout())
    }

    /// Whether status lines and logs written to stderr should be colored
    #[must_use]
    pub fn should_color_stderr(self) -> bool {
        self.resolve_for(&std::io::stderr())
    }

    fn resolve_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Merge policy from `--policy`, overriding any config file
    pub policy: Option<MergePolicy>,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set merge policy
    #[must_use]
    pub const fn with_policy(mut self, policy: Option<MergePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Merge options from `--policy`, strict when unset
    #[must_use]
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions::default().with_policy(self.policy.unwrap_or_default())
    }

    /// Effective coverage settings: file values with command-line overrides
    /// applied on top
    #[must_use]
    pub fn resolve(
        &self,
        file: Option<CoverageConfig>,
        thresholds: &CoverageThresholds,
    ) -> CoverageConfig {
        let base = file.unwrap_or_default();
        let policy = self.policy.unwrap_or(base.merge.policy);
        CoverageConfig::builder()
            .policy(policy)
            .thresholds(base.thresholds.overridden_by(thresholds))
            .build()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 3), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
        }

        #[test]
        fn test_is_quiet() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_quiet());
        }

        #[test]
        fn test_filter_directive() {
            assert_eq!(Verbosity::Quiet.filter_directive(), "error");
            assert_eq!(Verbosity::Normal.filter_directive(), "warn");
            assert_eq!(Verbosity::Debug.filter_directive(), "debug");
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }

        #[test]
        fn test_explicit_choices_on_stderr() {
            assert!(ColorChoice::Always.should_color_stderr());
            assert!(!ColorChoice::Never.should_color_stderr());
        }

        #[test]
        fn test_auto_follows_stderr() {
            let expected = std::io::IsTerminal::is_terminal(&std::io::stderr());
            assert_eq!(ColorChoice::Auto.should_color_stderr(), expected);
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_defaults_without_file() {
            let config = CliConfig::new().resolve(None, &CoverageThresholds::new());
            assert_eq!(config.merge.policy, MergePolicy::Strict);
            assert!(config.thresholds.is_empty());
        }

        #[test]
        fn test_policy_flag_overrides_file() {
            let file = CoverageConfig::builder()
                .policy(MergePolicy::Strict)
                .lines(70.0)
                .build();
            let cli = CliConfig::new().with_policy(Some(MergePolicy::BestEffort));

            let config = cli.resolve(Some(file), &CoverageThresholds::new());
            assert_eq!(config.merge.policy, MergePolicy::BestEffort);
            assert_eq!(config.thresholds.lines, Some(70.0));
        }

        #[test]
        fn test_threshold_flags_override_file() {
            let file = CoverageConfig::builder().lines(70.0).branches(40.0).build();
            let flags = CoverageThresholds::new().with_lines(90.0);

            let config = CliConfig::new().resolve(Some(file), &flags);
            assert_eq!(config.thresholds.lines, Some(90.0));
            assert_eq!(config.thresholds.branches, Some(40.0));
        }

        #[test]
        fn test_merge_options_default_strict() {
            assert_eq!(CliConfig::new().merge_options(), MergeOptions::strict());
            let cli = CliConfig::new().with_policy(Some(MergePolicy::BestEffort));
            assert_eq!(cli.merge_options(), MergeOptions::best_effort());
        }

        #[test]
        fn test_file_policy_kept_without_flag() {
            let file = CoverageConfig::builder()
                .policy(MergePolicy::BestEffort)
                .build();
            let config = CliConfig::new().resolve(Some(file), &CoverageThresholds::new());
            assert_eq!(config.merge.policy, MergePolicy::BestEffort);
        }
    }
}
