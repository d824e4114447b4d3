//! Concurrency-limited liveness prober for stream URLs.
//!
//! Targets are probed in fixed-size batches: every probe of a batch runs
//! concurrently and the next batch starts only once all of them have resolved,
//! so no more than `concurrency` requests are ever in flight.
//!
//! ```no_run
//! use stream_prober::{BatchProber, ProbeConfig, ProbeTarget};
//!
//! # async fn demo() -> Result<(), stream_prober::ProbeError> {
//! let prober = BatchProber::from_config(&ProbeConfig::default())?;
//! let run = prober
//!     .run(&[ProbeTarget::new("News", "https://example.com/news.m3u8")])
//!     .await;
//! println!("{} of {} streams alive", run.success_count(), run.total());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod outcome;
pub mod prober;
pub mod progress;
pub mod target;
pub mod transport;

pub use config::ProbeConfig;
pub use error::{ProbeError, TransportError};
pub use outcome::{BatchRun, ProbeOutcome, ProbeStatus, ProbeVerdict, RunSummary};
pub use prober::BatchProber;
pub use progress::{ProgressEvent, ProgressSink};
pub use target::{ProbeTarget, TargetSource};
pub use transport::{HttpTransport, ProbeMethod, ProbeResponse, ProbeTransport};
