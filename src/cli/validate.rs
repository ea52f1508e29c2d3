use std::process::ExitCode;

use lessonlint::{Check, ModuleTree, PropertyResult, Report};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{Colorize, is_narrow},
};

/// Runs a set of checks against a module and prints the report.
#[derive(Debug)]
pub struct Validate {
    checks: Vec<Check>,
    output: OutputFormat,
    quiet: bool,
}

impl Validate {
    pub const fn new(checks: Vec<Check>, output: OutputFormat, quiet: bool) -> Self {
        Self {
            checks,
            output,
            quiet,
        }
    }

    /// Exits with failure if any property failed.
    #[instrument(level = "debug", skip_all, fields(checks = ?self.checks))]
    pub fn run(&self, tree: &ModuleTree) -> anyhow::Result<ExitCode> {
        let report = lessonlint::run_all(&self.checks, tree);

        match self.output {
            OutputFormat::Table => self.output_table(tree, &report),
            OutputFormat::Json => Self::output_json(tree, &report)?,
            OutputFormat::Summary => println!("{}", summary_line(&report)),
        }

        Ok(if report.passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    fn output_table(&self, tree: &ModuleTree, report: &Report) {
        if !self.quiet {
            println!(
                "Validating curriculum module at {}\n",
                tree.root().display()
            );

            for result in report.results() {
                print_result(result);
            }

            print_summary_table(report);
            println!();
        }

        println!("{}", outcome(report));
    }

    fn output_json(tree: &ModuleTree, report: &Report) -> anyhow::Result<()> {
        use serde_json::json;

        let output = json!({
            "root": tree.root(),
            "status": if report.passed() { "passed" } else { "failed" },
            "results": report.results(),
            "summary": {
                "properties": report.results().len(),
                "failed": report.failed_count(),
                "violations": report.violation_count(),
                "warnings": report.warning_count(),
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn print_result(result: &PropertyResult) {
    let requirements = result.property.requirements().join(", ");
    let mut header = format!("{} [{requirements}]", result.property.title());
    if result.property.is_advisory() {
        header.push_str(" (advisory)");
    }
    println!("{}", header.info());

    for violation in &result.violations {
        println!("  {}", format!("✗ {violation}").error());
    }
    for warning in &result.warnings {
        println!("  {}", format!("⚠ {warning}").warning());
    }

    if result.passed() {
        println!(
            "{} {}\n",
            "✓ passed".success(),
            format!("({} checked)", result.checked).dim()
        );
    } else {
        println!(
            "{} {}\n",
            format!("✗ failed: {} violations", result.violations.len()).error(),
            format!("({} checked)", result.checked).dim()
        );
    }
}

fn print_summary_table(report: &Report) {
    println!("Summary");
    println!("{}", "───────".dim());

    if is_narrow() {
        for result in report.results() {
            println!(
                "{}: {} ({} violations, {} warnings)",
                result.property.title(),
                status(result),
                result.violations.len(),
                result.warnings.len()
            );
        }
    } else {
        println!(
            "{:<34} {:<6} {:>10} {:>8}",
            "Property", "Status", "Violations", "Warnings"
        );
        for result in report.results() {
            println!(
                "{:<34} {} {:>10} {:>8}",
                result.property.title(),
                status(result),
                result.violations.len(),
                result.warnings.len()
            );
        }
    }
}

/// A fixed-width status cell, coloured after padding.
fn status(result: &PropertyResult) -> String {
    if result.passed() {
        format!("{:<6}", "pass").success()
    } else {
        format!("{:<6}", "FAIL").error()
    }
}

fn outcome(report: &Report) -> String {
    let total = report.results().len();
    let warnings = report.warning_count();
    let suffix = if warnings == 0 {
        String::new()
    } else {
        format!(" ({warnings} warnings)")
    };

    if report.passed() {
        format!("✓ All {total} properties passed{suffix}").success()
    } else {
        format!(
            "✗ {} of {total} properties failed with {} violations{suffix}",
            report.failed_count(),
            report.violation_count()
        )
        .error()
    }
}

fn summary_line(report: &Report) -> String {
    format!(
        "properties={} failed={} violations={} warnings={}",
        report.results().len(),
        report.failed_count(),
        report.violation_count(),
        report.warning_count()
    )
}
