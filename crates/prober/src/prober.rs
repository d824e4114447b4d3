use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, trace};
use url::Url;

use crate::{
    BatchRun, HttpTransport, ProbeConfig, ProbeError, ProbeMethod, ProbeOutcome, ProbeResponse,
    ProbeTarget, ProbeTransport, ProbeVerdict, ProgressEvent, ProgressSink, TargetSource,
    TransportError,
};

/// Probes targets in sequential fixed-size batches.
///
/// Within a batch every probe runs concurrently; the next batch starts only
/// after all of them resolved. Peak in-flight requests therefore never exceed
/// `concurrency`, and a hanging target costs its batch at most one timeout.
pub struct BatchProber<T = HttpTransport> {
    transport: T,
    concurrency: usize,
    timeout: Duration,
    max_redirects: usize,
    fallback_to_get: bool,
    progress: Option<ProgressSink>,
}

impl BatchProber<HttpTransport> {
    pub fn from_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(transport, config)
    }
}

impl<T: ProbeTransport> BatchProber<T> {
    pub fn with_transport(transport: T, config: &ProbeConfig) -> Result<Self, ProbeError> {
        if config.concurrency == 0 {
            return Err(ProbeError::InvalidConcurrency);
        }

        Ok(Self {
            transport,
            concurrency: config.concurrency,
            timeout: config.timeout,
            max_redirects: config.max_redirects,
            fallback_to_get: config.fallback_to_get,
            progress: None,
        })
    }

    /// Report progress after each batch.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Collect targets from `source` and probe them.
    ///
    /// Fails only when the source does; individual probe failures are
    /// recorded in the returned run.
    pub async fn run_source<S>(&self, source: &S) -> Result<BatchRun, ProbeError>
    where
        S: TargetSource + ?Sized,
    {
        let targets = source.targets().map_err(ProbeError::target_source)?;
        Ok(self.run(&targets).await)
    }

    pub async fn run(&self, targets: &[ProbeTarget]) -> BatchRun {
        let total = targets.len();
        debug!(
            total,
            concurrency = self.concurrency,
            timeout_ms = self.timeout.as_millis() as u64,
            "Probing streams"
        );

        let mut outcomes = Vec::with_capacity(total);
        for (index, batch) in targets.chunks(self.concurrency).enumerate() {
            debug!(batch = index, size = batch.len(), "Starting probe batch");

            // join_all yields results in input order regardless of completion order
            let results = join_all(batch.iter().map(|target| self.probe(target))).await;
            outcomes.extend(results);

            if let Some(sink) = &self.progress {
                sink(ProgressEvent {
                    done: outcomes.len(),
                    total,
                });
            }
        }

        let run = BatchRun::new(outcomes);
        debug!(
            success = run.success_count(),
            failed = run.failed_count(),
            total,
            "Probe run complete"
        );
        run
    }

    /// Probe a single target. Never fails; errors become the outcome.
    pub async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome {
        let verdict = match tokio::time::timeout(self.timeout, self.follow(&target.url)).await {
            Ok(Ok(status)) => ProbeVerdict::from_status_code(status),
            Ok(Err(err)) => ProbeVerdict::from_transport_error(&err),
            Err(_) => ProbeVerdict::from_transport_error(&TransportError::Timeout(self.timeout)),
        };

        debug!(
            name = %target.name,
            url = %target.url,
            status = %verdict.status(),
            "Probe finished"
        );
        ProbeOutcome::new(target, verdict)
    }

    /// Walk the redirect chain and return the final status code.
    async fn follow(&self, url: &str) -> Result<u16, TransportError> {
        let mut current = url.to_owned();
        let mut hops = 0;

        loop {
            let response = self.hop(&current).await?;

            let location = match response.location {
                Some(location) if is_redirect(response.status) => location,
                _ => return Ok(response.status),
            };

            if hops >= self.max_redirects {
                return Err(TransportError::TooManyRedirects(self.max_redirects));
            }

            let next = resolve_location(&current, &location)?;
            trace!(from = %current, to = %next, status = response.status, "Following redirect");
            current = next;
            hops += 1;
        }
    }

    async fn hop(&self, url: &str) -> Result<ProbeResponse, TransportError> {
        let response = self.transport.request(ProbeMethod::Head, url).await?;

        if self.fallback_to_get && matches!(response.status, 405 | 501) {
            debug!(%url, status = response.status, "HEAD rejected, retrying hop with GET");
            return self.transport.request(ProbeMethod::Get, url).await;
        }

        Ok(response)
    }
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

fn resolve_location(base: &str, location: &str) -> Result<String, TransportError> {
    let base =
        Url::parse(base).map_err(|e| TransportError::invalid_redirect(location, e.to_string()))?;
    base.join(location)
        .map(String::from)
        .map_err(|e| TransportError::invalid_redirect(location, e.to_string()))
}
