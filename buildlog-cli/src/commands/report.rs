//! `buildlog report` command handler

use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use buildlog_core::config::ReportConfig;
use buildlog_core::types::{BuildReport, PackageReport, PackageStatus, Phase, ReportSummary};
use buildlog_parser::{BuildLogParser, LogSource};

use crate::cli::ReportArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `report` command.
///
/// Returns `CliError::PackagesFailed` (exit code 4) after rendering when any
/// package failed, so CI jobs can gate on the exit status.
pub async fn execute(
    args: ReportArgs,
    config: &ReportConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(log = %args.log.display(), "parsing build log");

    let source = LogSource::load(&args.log).await?;
    let report = BuildLogParser::new().parse_source(&source);

    let view = ReportView::new(
        args.log.display().to_string(),
        &report,
        args.failed_only || config.failed_only,
        config.show_errors && !args.no_errors,
    );
    writer.render(&view)?;

    if view.summary.failed > 0 {
        return Err(CliError::PackagesFailed(view.summary.failed));
    }
    Ok(())
}

/// Rendered report: summary plus the (possibly filtered) packages.
#[derive(Serialize)]
pub struct ReportView<'a> {
    /// Build log path
    pub source: String,
    /// Totals over every package, independent of filtering
    pub summary: ReportSummary,
    /// Packages keyed by built name
    pub packages: BTreeMap<&'a str, &'a PackageReport>,
    #[serde(skip)]
    show_errors: bool,
}

impl<'a> ReportView<'a> {
    pub fn new(source: String, report: &'a BuildReport, failed_only: bool, show_errors: bool) -> Self {
        let packages = report
            .iter()
            .filter(|(_, package)| !failed_only || package.status() == PackageStatus::Failed)
            .map(|(name, package)| (name.as_str(), package))
            .collect();
        Self {
            source,
            summary: report.summary(),
            packages,
            show_errors,
        }
    }
}

/// Cell for one phase column: `ok`, `FAIL`, or `-` when the phase never ran.
fn phase_mark(package: &PackageReport, phase: Phase) -> colored::ColoredString {
    match package.phases.get(&phase) {
        Some(result) if result.is_ok() => format!("{:<7}", "ok").green(),
        Some(_) => format!("{:<7}", "FAIL").red().bold(),
        None => format!("{:<7}", "-").dimmed(),
    }
}

impl Render for ReportView<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Build log: {}", self.source.bold())?;

        let summary = format!(
            "{} total ({} passed, {} failed)",
            self.summary.total, self.summary.passed, self.summary.failed
        );
        if self.summary.failed > 0 {
            writeln!(w, "Packages: {}", summary.red().bold())?;
        } else {
            writeln!(w, "Packages: {}", summary.green().bold())?;
        }
        writeln!(w)?;

        if self.packages.is_empty() {
            writeln!(w, "{}", "No packages to show.".dimmed())?;
            return Ok(());
        }

        writeln!(
            w,
            "{:<40} {:<20} {:<7}{:<7}{:<7}{:<7}Status",
            "Built name", "Package", "init", "build", "test", "upload"
        )?;
        writeln!(w, "{}", "-".repeat(96))?;

        for (built_name, package) in &self.packages {
            write!(w, "{:<40} {:<20} ", built_name, package.package_name)?;
            for phase in Phase::ALL {
                write!(w, "{}", phase_mark(package, phase))?;
            }
            let status = match package.status() {
                PackageStatus::Passed => "PASS".green().bold(),
                PackageStatus::Failed => "FAIL".red().bold(),
            };
            writeln!(w, "{status}")?;
        }

        if !self.show_errors {
            return Ok(());
        }

        for (built_name, package) in &self.packages {
            for result in package.phases.values() {
                for block in result.errors() {
                    writeln!(w)?;
                    writeln!(w, "{} [{}]", built_name.bold(), result.phase())?;
                    for line in block.lines() {
                        writeln!(w, "  | {}", line.red())?;
                    }
                }
            }
        }

        Ok(())
    }
}
