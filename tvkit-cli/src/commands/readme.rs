use std::{fmt, fs};

use chrono::{Local, TimeZone};
use playlist::api::{STATS_FILE, Stats};
use tracing::warn;

use super::CommandExecutor;
use crate::{error::Result, output};

pub const STATS_MARKER: &str = "## 📊 Statistics";

/// Markdown statistics block, timestamps shown in `tz`.
pub fn render_stats_section<Tz>(stats: &Stats, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let updated = stats
        .generated_at
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S");
    let categories: Vec<String> = stats
        .categories
        .iter()
        .map(|c| format!("- **{}:** {} streams", c.name, c.count))
        .collect();

    format!(
        "{STATS_MARKER}\n\n\
         - **Total Streams:** {}\n\
         - **Total Categories:** {}\n\
         - **Total Playlists:** {}\n\
         - **Last Updated:** {updated}\n\n\
         ### Categories\n\n\
         {}\n",
        stats.total_streams,
        stats.total_categories,
        stats.total_playlists,
        categories.join("\n"),
    )
}

/// Replace the existing statistics block up to the next `## ` heading, or
/// append the block when the README has none.
pub fn splice_stats_section(readme: &str, section: &str) -> String {
    let Some(start) = readme.find(STATS_MARKER) else {
        return format!("{readme}\n\n{section}");
    };

    match readme[start + 1..].find("\n## ") {
        Some(offset) => {
            let end = start + 1 + offset;
            format!("{}{}{}", &readme[..start], section, &readme[end..])
        }
        None => format!("{}{}", &readme[..start], section),
    }
}

impl CommandExecutor {
    /// Refresh the README statistics block from `stats.json`.
    pub fn readme(&self) -> Result<()> {
        output::heading("📝 Updating README...");

        let stats_path = self.paths.api_dir.join(STATS_FILE);
        if !stats_path.is_file() {
            warn!(path = %stats_path.display(), "Statistics file not found");
            output::warning(&format!(
                "⚠️  No {STATS_FILE} found. Run `tvkit api` first."
            ));
            return Ok(());
        }

        let stats = Stats::read_from(&stats_path)?;
        let readme_path = self.paths.readme();
        let readme = fs::read_to_string(&readme_path)?;
        let updated = splice_stats_section(&readme, &render_stats_section(&stats, &Local));
        fs::write(&readme_path, updated)?;

        output::success("✅ README.md updated successfully!");
        output::note("\nStatistics:");
        output::note(&format!("  Streams: {}", stats.total_streams));
        output::note(&format!("  Categories: {}", stats.total_categories));
        output::note(&format!("  Playlists: {}", stats.total_playlists));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commands::fixtures, config::AppConfig};
    use chrono::Utc;
    use playlist::api::CategoryCount;

    const SECTION: &str = "## 📊 Statistics\n\nnew block\n";

    fn stats() -> Stats {
        Stats {
            total_streams: 3,
            total_categories: 2,
            total_playlists: 2,
            categories: vec![
                CategoryCount {
                    name: "News".into(),
                    count: 2,
                },
                CategoryCount {
                    name: "Undefined".into(),
                    count: 1,
                },
            ],
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap(),
        }
    }

    #[test]
    fn renders_statistics_block() {
        assert_eq!(
            render_stats_section(&stats(), &Utc),
            "## 📊 Statistics\n\n\
             - **Total Streams:** 3\n\
             - **Total Categories:** 2\n\
             - **Total Playlists:** 2\n\
             - **Last Updated:** 2024-05-01 12:30:05\n\n\
             ### Categories\n\n\
             - **News:** 2 streams\n\
             - **Undefined:** 1 streams\n"
        );
    }

    #[test]
    fn replaces_section_followed_by_another_heading() {
        let readme = "# TV\n\n## 📊 Statistics\n\nold\n\n## License\n\nMIT\n";

        assert_eq!(
            splice_stats_section(readme, SECTION),
            "# TV\n\n## 📊 Statistics\n\nnew block\n\n## License\n\nMIT\n"
        );
    }

    #[test]
    fn replaces_trailing_section() {
        let readme = "# TV\n\n## 📊 Statistics\n\nold\n### Categories\n\n- x\n";

        assert_eq!(
            splice_stats_section(readme, SECTION),
            "# TV\n\n## 📊 Statistics\n\nnew block\n"
        );
    }

    #[test]
    fn appends_when_marker_is_absent() {
        assert_eq!(
            splice_stats_section("# TV\n", SECTION),
            "# TV\n\n\n## 📊 Statistics\n\nnew block\n"
        );
    }

    #[test]
    fn missing_stats_is_only_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let paths = fixtures::paths(dir.path());
        fs::write(paths.readme(), "# TV\n").unwrap();
        let executor = CommandExecutor::new(paths.clone(), AppConfig::default());

        executor.readme().unwrap();

        assert_eq!(fs::read_to_string(paths.readme()).unwrap(), "# TV\n");
    }

    #[test]
    fn updates_readme_from_generated_api() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_streams(dir.path());
        let paths = fixtures::paths(dir.path());
        fs::write(paths.readme(), "# TV\n\n## License\n\nMIT\n").unwrap();
        let executor = CommandExecutor::new(paths.clone(), AppConfig::default());

        executor.api().unwrap();
        executor.readme().unwrap();

        let readme = fs::read_to_string(paths.readme()).unwrap();
        assert!(readme.starts_with("# TV\n\n## License\n\nMIT\n\n\n## 📊 Statistics\n"));
        assert!(readme.contains("- **Total Streams:** 3\n"));
        assert!(readme.contains("- **News:** 2 streams\n"));
    }
}
