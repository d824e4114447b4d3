use std::sync::Arc;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use playlist::{PlaylistError, PlaylistStore};
use stream_prober::{BatchProber, ProbeTarget, ProgressEvent, TargetSource};
use tracing::{Level, info};

use super::CommandExecutor;
use crate::{
    cli::TestArgs,
    error::Result,
    output,
    report::{self, FailureListing, ProbeReport},
};

/// Every item of every playlist in the store, in file then item order.
struct StoreTargets<'a>(&'a PlaylistStore);

impl TargetSource for StoreTargets<'_> {
    type Error = PlaylistError;

    fn targets(&self) -> std::result::Result<Vec<ProbeTarget>, Self::Error> {
        Ok(self
            .0
            .load_all()?
            .into_iter()
            .flat_map(|loaded| loaded.playlist.items)
            .map(|item| ProbeTarget::new(item.name, item.url))
            .collect())
    }
}

/// Hidden while debug logging is on; debug lines share stderr with the bar.
fn progress_bar(total: usize) -> ProgressBar {
    if tracing::enabled!(Level::DEBUG) {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("Progress |{bar:40.cyan}| {percent}% | {pos}/{len} streams")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░"),
    );
    bar
}

impl CommandExecutor {
    /// Probe every stream and print the failures and a summary.
    pub async fn test_streams(&self, args: &TestArgs) -> Result<()> {
        output::heading("🧪 Testing stream URLs...");
        let store = self.open_store()?;
        let targets = StoreTargets(&store).targets()?;
        output::step(&format!("Testing {} stream(s)...\n", targets.len()));

        let config = self.config.probe_config(args);
        let bar = progress_bar(targets.len());
        let sink_bar = bar.clone();
        let prober = BatchProber::from_config(&config)?.with_progress(Arc::new(
            move |event: ProgressEvent| sink_bar.set_position(event.done as u64),
        ));

        let run = prober.run(&targets).await;
        bar.finish_and_clear();

        report::print_failures(&FailureListing::new(&run, args.show_failures));
        report::print_summary(&run.summary());

        if let Some(path) = &args.report {
            ProbeReport::new(&run, Utc::now()).write_to(path)?;
            output::note(&format!("\nReport written to {}", path.display()));
        }

        info!(
            success = run.success_count(),
            failed = run.failed_count(),
            "Stream test finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{commands::fixtures, config::AppConfig, error::AppError};

    #[test]
    fn store_targets_keep_file_and_item_order() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_streams(dir.path());
        let store = PlaylistStore::open(dir.path().join("streams")).unwrap();

        let targets = StoreTargets(&store).targets().unwrap();

        assert_eq!(
            targets,
            [
                ProbeTarget::new("UK News", "http://uk/news"),
                ProbeTarget::new("US News", "HTTP://US/news"),
                ProbeTarget::new("Weather", "http://us/weather"),
            ]
        );
    }

    #[test]
    fn bar_is_hidden_under_debug_logging() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::sink)
            .finish();

        let bar = tracing::subscriber::with_default(subscriber, || progress_bar(3));

        assert!(bar.is_hidden());
    }

    #[tokio::test]
    async fn empty_collection_writes_report_with_no_rate() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("streams")).unwrap();
        let report_path = dir.path().join("report.json");
        let executor = CommandExecutor::new(fixtures::paths(dir.path()), AppConfig::default());
        let args = TestArgs {
            report: Some(report_path.clone()),
            show_failures: 10,
            ..Default::default()
        };

        executor.test_streams(&args).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(json["summary"]["total"], 0);
        assert!(json["summary"]["successRate"].is_null());
    }

    #[tokio::test]
    async fn zero_concurrency_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("streams")).unwrap();
        let executor = CommandExecutor::new(fixtures::paths(dir.path()), AppConfig::default());
        let args = TestArgs {
            concurrency: Some(0),
            ..Default::default()
        };

        let result = executor.test_streams(&args).await;

        assert!(matches!(result, Err(AppError::Probe(_))));
    }
}
