use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

pub const DEFAULT_CONCURRENCY: usize = 5;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

pub const DEFAULT_MAX_REDIRECTS: usize = 3;

/// Configurable options for a probe run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Probes allowed in flight at once; also the batch size
    pub concurrency: usize,

    /// Wall-clock limit for one probe, redirect hops included
    pub timeout: Duration,

    /// Redirect hops followed before the probe is reported as an error
    pub max_redirects: usize,

    /// Re-issue a hop as GET when the server answers HEAD with 405 or 501.
    ///
    /// The GET body is never read, but the server may still start sending it.
    pub fallback_to_get: bool,

    /// User agent string
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            fallback_to_get: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ProbeConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_fallback_to_get(mut self, enabled: bool) -> Self {
        self.fallback_to_get = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
