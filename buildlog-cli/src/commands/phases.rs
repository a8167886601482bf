//! `buildlog phases` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use buildlog_core::types::Phase;
use buildlog_parser::{BuildLogParser, LogSource, PhaseOutline};

use crate::cli::PhasesArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `phases` command.
pub async fn execute(args: PhasesArgs, writer: &OutputWriter) -> Result<(), CliError> {
    info!(log = %args.log.display(), "outlining build log phases");

    let source = LogSource::load(&args.log).await?;
    let outline = BuildLogParser::new().phase_outline(source.lines());

    let report = PhasesReport {
        source: args.log.display().to_string(),
        packages: outline.into_iter().map(PhaseEntry::from).collect(),
    };
    writer.render(&report)
}

/// Detected phases per package, in log order.
#[derive(Serialize)]
pub struct PhasesReport {
    pub source: String,
    pub packages: Vec<PhaseEntry>,
}

#[derive(Serialize)]
pub struct PhaseEntry {
    pub built_name: String,
    pub package_name: String,
    pub phases: Vec<Phase>,
}

impl From<PhaseOutline> for PhaseEntry {
    fn from(outline: PhaseOutline) -> Self {
        Self {
            built_name: outline.built_name,
            package_name: outline.package_name,
            phases: outline.phases,
        }
    }
}

impl Render for PhasesReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Build log: {}", self.source.bold())?;
        for entry in &self.packages {
            let phases: Vec<&str> = entry.phases.iter().map(Phase::as_str).collect();
            let complete = entry.phases.len() == Phase::ALL.len();
            let list = format!("[{}]", phases.join(", "));
            writeln!(
                w,
                "{} -- {}",
                entry.built_name,
                if complete { list.normal() } else { list.yellow() }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_phases_per_built_name() {
        colored::control::set_override(false);
        let log = [
            "/tmp/staged-recipes/recipes/foo",
            "BUILD START",
            "BUILD END",
            "TEST START",
            "TEST END",
            "# $ anaconda upload /tmp/x/foo-1.0-0.tar.bz2",
            "/tmp/staged-recipes/recipes/bar",
            "BUILD START",
        ];
        let report = PhasesReport {
            source: "ci.log".to_owned(),
            packages: BuildLogParser::new()
                .phase_outline(log)
                .into_iter()
                .map(PhaseEntry::from)
                .collect(),
        };

        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");

        assert!(output.contains("foo-1.0-0 -- [init, build, test, upload]"));
        assert!(output.contains("bar-build-name-not-found -- [init, build]"));
    }
}
