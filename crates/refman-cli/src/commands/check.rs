use anyhow::{Context, Result, bail};
use colored::Colorize;
use refman_core::{Config, DiagnosticSeverity};
use serde_json::json;

use super::load_manual;
use crate::cli::CheckArgs;
use crate::output::OutputFormat;

/// Report diagnostics of both documents.
///
/// Fails when any diagnostic is an error, or with `--strict` when there is
/// any warning.
pub fn execute(args: &CheckArgs, config: &Config) -> Result<()> {
    let manual = load_manual(&args.sources, config)?;
    let findings: Vec<_> = manual.diagnostics().collect();

    match args.format.resolve() {
        OutputFormat::Json => {
            let entries: Vec<_> = findings
                .iter()
                .map(|(source, d)| {
                    json!({
                        "source": source,
                        "severity": d.severity,
                        "line": d.line,
                        "message": d.message,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&entries)
                    .context("Failed to serialize diagnostics to JSON")?
            );
        },
        OutputFormat::Text => {
            for (source, d) in &findings {
                let severity = match d.severity {
                    DiagnosticSeverity::Error => "error".red().bold(),
                    DiagnosticSeverity::Warn => "warn".yellow(),
                    DiagnosticSeverity::Info => "info".blue(),
                };
                let location = d.line.map_or_else(
                    || source.as_str().to_string(),
                    |line| format!("{}:{line}", source.as_str()),
                );
                println!("{severity} {} {}", location.bright_black(), d.message);
            }
            if findings.is_empty() {
                println!("{}", "No problems found".green());
            } else {
                println!("\n{} problem(s)", findings.len());
            }
        },
    }

    let errors = findings
        .iter()
        .filter(|(_, d)| d.severity == DiagnosticSeverity::Error)
        .count();
    let warnings = findings
        .iter()
        .filter(|(_, d)| d.severity == DiagnosticSeverity::Warn)
        .count();

    if errors > 0 {
        bail!("check failed with {errors} error(s)");
    }
    if args.strict && warnings > 0 {
        bail!("check failed with {warnings} warning(s) (--strict)");
    }
    Ok(())
}
