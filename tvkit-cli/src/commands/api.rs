use chrono::Utc;
use playlist::api::{ApiBundle, CATEGORIES_FILE, STATS_FILE, STREAMS_FILE};

use super::CommandExecutor;
use crate::{error::Result, output};

impl CommandExecutor {
    /// Write the streams, categories and stats documents.
    pub fn api(&self) -> Result<()> {
        output::heading("🔧 Generating API...");
        let store = self.open_store()?;
        let loaded = store.load_all()?;

        let bundle = ApiBundle::build(&loaded, Utc::now());
        bundle.write_to(&self.paths.api_dir)?;

        output::success(&format!(
            "✓ Generated {STREAMS_FILE} ({} streams)",
            bundle.streams.total
        ));
        output::success(&format!(
            "✓ Generated {CATEGORIES_FILE} ({} categories)",
            bundle.categories.total
        ));
        output::success(&format!("✓ Generated {STATS_FILE}"));
        output::success(&format!(
            "\n✨ API generated successfully in {}!",
            self.paths.api_dir.display()
        ));
        Ok(())
    }
}
