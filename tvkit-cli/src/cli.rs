use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "tvkit",
    author,
    version,
    about = "Tools for maintaining IPTV M3U playlist collections",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "TVKIT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub paths: Paths,
}

/// Directory layout of a playlist collection.
#[derive(clap::Args, Debug, Clone)]
pub struct Paths {
    /// Repository root, where README.md lives
    #[arg(long, global = true, env = "ROOT_DIR", default_value = "./")]
    pub root_dir: PathBuf,

    /// Directory holding the source *.m3u playlists
    #[arg(long, global = true, env = "STREAMS_DIR", default_value = "./streams")]
    pub streams_dir: PathBuf,

    /// Directory for generated playlists
    #[arg(long, global = true, env = "OUTPUT_DIR", default_value = "./output")]
    pub output_dir: PathBuf,

    /// Directory for the generated JSON API
    #[arg(long, global = true, env = "API_DIR", default_value = "./.api")]
    pub api_dir: PathBuf,

    /// Also write logs to daily files in this directory
    #[arg(long, global = true, env = "LOGS_DIR")]
    pub logs_dir: Option<PathBuf>,
}

impl Paths {
    pub fn readme(&self) -> PathBuf {
        self.root_dir.join("README.md")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite every playlist in place in canonical form
    Format,

    /// Write a master playlist and one playlist per category
    Generate,

    /// Generate the streams, categories and stats JSON documents
    Api,

    /// Check playlists for structural problems
    Validate,

    /// Check that every stream URL responds
    Test(TestArgs),

    /// Refresh the statistics section of README.md from stats.json
    Readme,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct TestArgs {
    /// Streams probed at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-stream timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Redirect hops followed before a stream is reported as an error
    #[arg(long)]
    pub max_redirects: Option<usize>,

    /// Retry with GET when a server rejects HEAD (405/501)
    #[arg(long)]
    pub get_fallback: bool,

    /// Write the full results as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Failed streams listed in the console summary
    #[arg(long, default_value_t = 10)]
    pub show_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_test_overrides() {
        let args = Args::parse_from([
            "tvkit",
            "test",
            "--concurrency",
            "8",
            "--timeout-ms",
            "2500",
            "--get-fallback",
            "--streams-dir",
            "playlists",
        ]);

        let Commands::Test(test) = args.command else {
            panic!("expected test command");
        };
        assert_eq!(test.concurrency, Some(8));
        assert_eq!(test.timeout_ms, Some(2500));
        assert!(test.get_fallback);
        assert_eq!(test.show_failures, 10);
        assert_eq!(args.paths.streams_dir, PathBuf::from("playlists"));
    }
}
