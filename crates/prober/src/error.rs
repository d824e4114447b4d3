use std::time::Duration;

use thiserror::Error;

/// Errors that abort a whole probe run or prevent it from starting.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("failed to build HTTP client: {source}")]
    Client {
        #[from]
        source: reqwest::Error,
    },

    #[error("failed to collect probe targets: {source}")]
    Source {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProbeError {
    pub fn target_source(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Source { source: err.into() }
    }
}

/// Why a single probe did not complete.
///
/// These never escape a run; they are folded into the target's outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    #[error("maximum redirects ({0}) exceeded")]
    TooManyRedirects(usize),

    #[error("invalid redirect location `{location}`: {reason}")]
    InvalidRedirect { location: String, reason: String },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    pub fn invalid_redirect(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRedirect {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = error_chain(&err);
        if err.is_connect() {
            Self::Connect(message)
        } else {
            Self::Request(message)
        }
    }
}

/// Joins an error and its sources, reqwest's top-level message alone rarely
/// names the actual cause (DNS, TLS, refused).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_reports_milliseconds() {
        let err = TransportError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "timeout of 5000ms exceeded");
        assert!(err.is_timeout());
    }

    #[test]
    fn redirect_cap_message() {
        assert_eq!(
            TransportError::TooManyRedirects(3).to_string(),
            "maximum redirects (3) exceeded"
        );
    }

    #[test]
    fn error_chain_appends_distinct_sources() {
        let inner = std::io::Error::other("connection refused");
        let outer = std::io::Error::other(OuterError(inner));
        let text = error_chain(&outer);
        assert!(text.contains("outer failure"));
        assert!(text.contains("connection refused"));
    }

    #[derive(Debug)]
    struct OuterError(std::io::Error);

    impl std::fmt::Display for OuterError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("outer failure")
        }
    }

    impl std::error::Error for OuterError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }
}
