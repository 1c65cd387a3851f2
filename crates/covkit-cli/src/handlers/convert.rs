//! Convert command handler

use crate::commands::ConvertFormat;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::load_coverage;
use crate::output::Reporter;
use crate::ConvertArgs;
use covkit::{to_yui_coverage, CoverageMap, LcovFormatter};

/// Execute the convert command
pub fn execute_convert(config: &CliConfig, args: &ConvertArgs) -> CliResult<()> {
    let mut coverage = load_coverage(&args.file)?;
    let rendered = render_conversion(&mut coverage, args.format, args.test_name.as_deref())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, rendered)?;
        Reporter::from_config(config).success(&format!(
            "Converted {} to {}",
            args.file.display(),
            path.display()
        ));
    } else {
        print!("{rendered}");
    }
    Ok(())
}

/// Render a coverage map in the requested format
pub fn render_conversion(
    coverage: &mut CoverageMap,
    format: ConvertFormat,
    test_name: Option<&str>,
) -> CliResult<String> {
    match format {
        ConvertFormat::Yui => {
            let yui = to_yui_coverage(coverage);
            let mut json = serde_json::to_string_pretty(&yui)
                .map_err(|e| CliError::report_generation(e.to_string()))?;
            json.push('\n');
            Ok(json)
        }
        ConvertFormat::Lcov => {
            let formatter = LcovFormatter::new(coverage);
            let formatter = match test_name {
                Some(name) => formatter.with_test_name(name),
                None => formatter,
            };
            Ok(formatter.generate())
        }
    }
}
