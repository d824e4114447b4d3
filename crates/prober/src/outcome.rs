use std::fmt;

use serde::Serialize;

use crate::{ProbeTarget, TransportError};

/// Coarse classification of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Failed,
    Error,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Success => "success",
            ProbeStatus::Failed => "failed",
            ProbeStatus::Error => "error",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of probing one target.
///
/// A status code exists only for probes that received a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeVerdict {
    /// Response status in `[200, 400)`
    Success {
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
    /// Response received with any other status
    Failed {
        #[serde(rename = "statusCode")]
        status_code: u16,
        error: String,
    },
    /// No usable response: transport failure, timeout, redirect cap
    Error { error: String },
}

impl ProbeVerdict {
    pub fn from_status_code(status_code: u16) -> Self {
        if (200..400).contains(&status_code) {
            ProbeVerdict::Success { status_code }
        } else {
            ProbeVerdict::Failed {
                status_code,
                error: format!("HTTP {status_code}"),
            }
        }
    }

    pub fn from_transport_error(err: &TransportError) -> Self {
        ProbeVerdict::Error {
            error: err.to_string(),
        }
    }

    pub fn status(&self) -> ProbeStatus {
        match self {
            ProbeVerdict::Success { .. } => ProbeStatus::Success,
            ProbeVerdict::Failed { .. } => ProbeStatus::Failed,
            ProbeVerdict::Error { .. } => ProbeStatus::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub url: String,
    pub name: String,
    #[serde(flatten)]
    pub verdict: ProbeVerdict,
}

impl ProbeOutcome {
    pub fn new(target: &ProbeTarget, verdict: ProbeVerdict) -> Self {
        Self {
            url: target.url.clone(),
            name: target.name.clone(),
            verdict,
        }
    }

    pub fn status(&self) -> ProbeStatus {
        self.verdict.status()
    }

    pub fn is_success(&self) -> bool {
        self.status() == ProbeStatus::Success
    }

    pub fn status_code(&self) -> Option<u16> {
        match &self.verdict {
            ProbeVerdict::Success { status_code } | ProbeVerdict::Failed { status_code, .. } => {
                Some(*status_code)
            }
            ProbeVerdict::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.verdict {
            ProbeVerdict::Success { .. } => None,
            ProbeVerdict::Failed { error, .. } | ProbeVerdict::Error { error } => Some(error),
        }
    }
}

/// Aggregate counters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub success_count: usize,
    /// `failed` and `error` outcomes together
    pub failed_count: usize,
    pub total: usize,
    /// `None` when the run had no targets
    pub success_rate: Option<f64>,
}

/// Ordered outcomes of one run; `outcomes[i]` belongs to `targets[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchRun {
    outcomes: Vec<ProbeOutcome>,
}

impl BatchRun {
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<ProbeOutcome> {
        self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.success_count()
    }

    pub fn success_rate(&self) -> Option<f64> {
        if self.outcomes.is_empty() {
            None
        } else {
            Some(self.success_count() as f64 / self.total() as f64)
        }
    }

    /// Outcomes that are not `success`, in run order.
    pub fn failures(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            success_count: self.success_count(),
            failed_count: self.failed_count(),
            total: self.total(),
            success_rate: self.success_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    fn outcome(verdict: ProbeVerdict) -> ProbeOutcome {
        ProbeOutcome::new(&ProbeTarget::new("A", "http://a"), verdict)
    }

    #[rstest]
    #[case(200, ProbeStatus::Success)]
    #[case(204, ProbeStatus::Success)]
    #[case(302, ProbeStatus::Success)]
    #[case(399, ProbeStatus::Success)]
    #[case(400, ProbeStatus::Failed)]
    #[case(404, ProbeStatus::Failed)]
    #[case(503, ProbeStatus::Failed)]
    #[case(199, ProbeStatus::Failed)]
    fn classifies_status_codes(#[case] code: u16, #[case] expected: ProbeStatus) {
        let verdict = ProbeVerdict::from_status_code(code);
        assert_eq!(verdict.status(), expected);
        assert_eq!(outcome(verdict).status_code(), Some(code));
    }

    #[test]
    fn error_outcome_has_no_status_code() {
        let err = TransportError::Timeout(Duration::from_millis(250));
        let o = outcome(ProbeVerdict::from_transport_error(&err));
        assert_eq!(o.status(), ProbeStatus::Error);
        assert_eq!(o.status_code(), None);
        assert_eq!(o.error(), Some("timeout of 250ms exceeded"));
    }

    #[test]
    fn serializes_flat_outcome() {
        let ok = serde_json::to_value(outcome(ProbeVerdict::from_status_code(200))).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({"url": "http://a", "name": "A", "status": "success", "statusCode": 200})
        );

        let failed = serde_json::to_value(outcome(ProbeVerdict::from_status_code(404))).unwrap();
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["statusCode"], 404);
        assert_eq!(failed["error"], "HTTP 404");

        let error = serde_json::to_value(outcome(ProbeVerdict::Error {
            error: "connection failed: refused".into(),
        }))
        .unwrap();
        assert_eq!(error["status"], "error");
        assert!(error.get("statusCode").is_none());
    }

    #[test]
    fn summary_counts_failed_and_error_together() {
        let run = BatchRun::new(vec![
            outcome(ProbeVerdict::from_status_code(200)),
            outcome(ProbeVerdict::from_status_code(500)),
            outcome(ProbeVerdict::Error {
                error: "boom".into(),
            }),
            outcome(ProbeVerdict::from_status_code(301)),
        ]);

        let summary = run.summary();
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failed_count, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.success_rate, Some(0.5));
        assert_eq!(run.failures().count(), 2);
    }

    #[test]
    fn empty_run_has_no_success_rate() {
        let run = BatchRun::default();
        assert_eq!(run.success_rate(), None);
        let json = serde_json::to_value(run.summary()).unwrap();
        assert!(json["successRate"].is_null());
    }
}
