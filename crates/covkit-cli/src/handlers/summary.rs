//! Summary command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::load_merged;
use crate::SummaryArgs;
use console::style;
use covkit::{CoverageSummary, Pct};
use std::fmt::Write;

/// Execute the summary command
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let coverage = load_merged(&args.files, &config.merge_options())?;
    let summary = coverage.summary();

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::report_generation(e.to_string()))?;
        println!("{json}");
    } else {
        print!(
            "{}",
            render_summary_table(&summary, config.color.should_color())
        );
    }
    Ok(())
}

/// Render a summary as an aligned text table
#[must_use]
pub fn render_summary_table(summary: &CoverageSummary, use_color: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<12} {:>8} {:>15} {:>8}",
        "Category", "Percent", "Covered/Total", "Skipped"
    );
    for (category, totals) in summary.categories() {
        let ratio = format!("{}/{}", totals.covered, totals.total);
        let _ = writeln!(
            output,
            "{category:<12} {} {ratio:>15} {:>8}",
            styled_pct(totals.pct, use_color),
            totals.skipped
        );
    }
    output
}

fn styled_pct(pct: Pct, use_color: bool) -> String {
    let text = match pct {
        Pct::Unknown => format!("{:>8}", "Unknown"),
        Pct::Value(v) => format!("{v:>7.2}%"),
    };
    if !use_color {
        return text;
    }
    match pct {
        Pct::Unknown => style(text).dim().to_string(),
        Pct::Value(v) if v >= 80.0 => style(text).green().to_string(),
        Pct::Value(v) if v >= 50.0 => style(text).yellow().to_string(),
        Pct::Value(_) => style(text).red().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use covkit::CategoryTotals;
    use crate::handlers::fixtures::{write, RUN_A, RUN_B};
    use std::path::PathBuf;

    fn summary() -> CoverageSummary {
        CoverageSummary {
            lines: CategoryTotals::from_counts(4, 3, 0),
            statements: CategoryTotals::from_counts(5, 3, 1),
            functions: CategoryTotals::from_counts(2, 1, 0),
            branches: CategoryTotals::from_counts(0, 0, 0),
        }
    }

    #[test]
    fn test_table_lists_every_category() {
        let table = render_summary_table(&summary(), false);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("lines"));
        assert!(lines[2].starts_with("statements"));
        assert!(lines[3].starts_with("functions"));
        assert!(lines[4].starts_with("branches"));
    }

    #[test]
    fn test_table_values() {
        let table = render_summary_table(&summary(), false);
        assert!(table.contains("75.00%"));
        assert!(table.contains("3/5"));
        assert!(table.contains("100.00%"));
    }

    #[test]
    fn test_blank_summary_shows_unknown() {
        let table = render_summary_table(&CoverageSummary::blank(), false);
        assert_eq!(table.matches("Unknown").count(), 4);
    }

    #[test]
    fn test_execute_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = vec![
            write(dir.path(), "a.json", RUN_A),
            write(dir.path(), "b.json", RUN_B),
        ];
        let args = SummaryArgs { files, json: true };
        execute_summary(&CliConfig::new(), &args).unwrap();
    }

    #[test]
    fn test_execute_summary_missing_file() {
        let args = SummaryArgs {
            files: vec![PathBuf::from("/nonexistent/coverage.json")],
            json: false,
        };
        assert!(execute_summary(&CliConfig::new(), &args).is_err());
    }
}
