use colored::*;
use playlist::ValidationReport;

pub fn heading(text: &str) {
    println!("{}\n", text.blue());
}

pub fn section(text: &str) {
    println!("{}", text.bold());
}

pub fn step(text: &str) {
    println!("{}", text.cyan());
}

pub fn note(text: &str) {
    println!("{}", text.dimmed());
}

pub fn success(text: &str) {
    println!("{}", text.green());
}

pub fn warning(text: &str) {
    println!("{}", text.yellow());
}

pub fn failure(text: &str) {
    println!("{}", text.red());
}

/// Totals over all validated playlists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub playlists: usize,
    pub valid: usize,
    pub streams: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationSummary {
    pub fn from_reports(reports: &[ValidationReport]) -> Self {
        reports.iter().fold(
            Self {
                playlists: reports.len(),
                ..Default::default()
            },
            |mut acc, report| {
                acc.valid += usize::from(report.valid);
                acc.streams += report.streams_count;
                acc.errors += report.errors.len();
                acc.warnings += report.warnings.len();
                acc
            },
        )
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

pub fn print_validation_report(report: &ValidationReport) {
    let status = if report.valid {
        "✓".green()
    } else {
        "✗".red()
    };
    println!(
        "{} {} ({} streams)",
        status,
        report.file.cyan(),
        report.streams_count
    );

    for error in &report.errors {
        failure(&format!("   ❌ {error}"));
    }
    for warning_text in &report.warnings {
        warning(&format!("   ⚠️  {warning_text}"));
    }
    println!();
}

pub fn print_validation_summary(summary: &ValidationSummary) {
    section("Summary:");
    note(&format!("Total playlists: {}", summary.playlists));
    note(&format!("Valid playlists: {}", summary.valid));
    note(&format!("Total streams: {}", summary.streams));
    note(&format!("Errors: {}", summary.errors));
    note(&format!("Warnings: {}", summary.warnings));
}
