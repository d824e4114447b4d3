//! Console and JSON rendering of a probe run.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use stream_prober::{BatchRun, ProbeOutcome, RunSummary};
use tracing::info;

use crate::{error::Result, output};

/// JSON document written by `test --report`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub outcomes: &'a [ProbeOutcome],
}

impl<'a> ProbeReport<'a> {
    pub fn new(run: &'a BatchRun, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            summary: run.summary(),
            outcomes: run.outcomes(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        playlist::api::write_json(path, self)?;
        info!(path = %path.display(), outcomes = self.outcomes.len(), "Wrote probe report");
        Ok(())
    }
}

/// `Some(1/3)` renders as `33.3%`; an empty run has no rate.
pub fn format_success_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}

/// The failures shown in the console and how many were left out.
#[derive(Debug)]
pub struct FailureListing<'a> {
    pub shown: Vec<&'a ProbeOutcome>,
    pub hidden: usize,
}

impl<'a> FailureListing<'a> {
    pub fn new(run: &'a BatchRun, limit: usize) -> Self {
        let failed = run.failed_count();
        let shown: Vec<_> = run.failures().take(limit).collect();
        Self {
            hidden: failed - shown.len(),
            shown,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty() && self.hidden == 0
    }
}

pub fn print_failures(listing: &FailureListing<'_>) {
    if listing.is_empty() {
        return;
    }

    output::failure("\n❌ Failed streams:\n");
    for outcome in &listing.shown {
        output::note(&format!("   {}", outcome.name));
        output::failure(&format!("   {}", outcome.url));
        output::warning(&format!(
            "   {}\n",
            outcome.error().unwrap_or("Connection failed")
        ));
    }
    if listing.hidden > 0 {
        output::note(&format!("   ... and {} more\n", listing.hidden));
    }
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "Test Summary:".bold());
    println!("{}", format!("✓ Successful: {}", summary.success_count).green());
    println!("{}", format!("✗ Failed: {}", summary.failed_count).red());
    output::note(&format!("Total: {}", summary.total));
    output::note(&format!(
        "Success rate: {}",
        format_success_rate(summary.success_rate)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stream_prober::{ProbeTarget, ProbeVerdict};

    fn outcome(url: &str, verdict: ProbeVerdict) -> ProbeOutcome {
        ProbeOutcome::new(&ProbeTarget::new(url.to_uppercase(), url), verdict)
    }

    fn run_with_failures(failures: usize) -> BatchRun {
        let mut outcomes = vec![outcome(
            "http://ok",
            ProbeVerdict::Success { status_code: 200 },
        )];
        outcomes.extend((0..failures).map(|i| {
            outcome(
                &format!("http://down/{i}"),
                ProbeVerdict::from_status_code(503),
            )
        }));
        BatchRun::new(outcomes)
    }

    #[rstest]
    #[case(Some(1.0 / 3.0), "33.3%")]
    #[case(Some(1.0), "100.0%")]
    #[case(Some(0.0), "0.0%")]
    #[case(None, "n/a")]
    fn formats_success_rate(#[case] rate: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_success_rate(rate), expected);
    }

    #[test]
    fn listing_caps_shown_failures() {
        let run = run_with_failures(12);

        let listing = FailureListing::new(&run, 10);

        assert_eq!(listing.shown.len(), 10);
        assert_eq!(listing.hidden, 2);
        assert_eq!(listing.shown[0].url, "http://down/0");
    }

    #[test]
    fn listing_of_clean_run_is_empty() {
        let run = run_with_failures(0);
        assert!(FailureListing::new(&run, 10).is_empty());
    }

    #[test]
    fn report_json_has_summary_and_flat_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("probe.json");
        let run = BatchRun::new(vec![
            outcome("http://a", ProbeVerdict::Success { status_code: 200 }),
            outcome(
                "http://c",
                ProbeVerdict::Error {
                    error: "connection refused".into(),
                },
            ),
        ]);

        ProbeReport::new(&run, Utc::now()).write_to(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["successCount"], 1);
        assert_eq!(json["summary"]["failedCount"], 1);
        assert_eq!(json["summary"]["successRate"], 0.5);
        assert_eq!(json["outcomes"][0]["status"], "success");
        assert_eq!(json["outcomes"][0]["statusCode"], 200);
        assert_eq!(json["outcomes"][1]["status"], "error");
        assert!(json["outcomes"][1].get("statusCode").is_none());
        assert!(json.get("generatedAt").is_some());
    }

    #[test]
    fn empty_run_reports_null_rate() {
        let run = BatchRun::default();
        let json = serde_json::to_value(ProbeReport::new(&run, Utc::now())).unwrap();
        assert!(json["summary"]["successRate"].is_null());
        assert_eq!(json["outcomes"], serde_json::json!([]));
    }
}
