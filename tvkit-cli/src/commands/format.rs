use playlist::render;
use tracing::debug;

use super::CommandExecutor;
use crate::{error::Result, output};

impl CommandExecutor {
    /// Rewrite every playlist in place in canonical form.
    pub fn format(&self) -> Result<()> {
        output::heading("🎨 Formatting playlists...");
        let store = self.open_store()?;

        for file in store.files() {
            output::step(&format!("📝 Formatting: {}", file.file_name));
            let playlist = file.load()?;
            file.write(&render(&playlist.items))?;
            debug!(file = %file.path.display(), streams = playlist.len(), "Formatted playlist");
            output::success(&format!("   ✓ Formatted {} streams", playlist.len()));
        }

        output::success(&format!(
            "\n✨ Formatted {} playlist(s) successfully!",
            store.len()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{commands::fixtures, config::AppConfig, error::AppError};

    #[test]
    fn rewrites_playlists_in_canonical_form() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_streams(dir.path());
        let executor = CommandExecutor::new(fixtures::paths(dir.path()), AppConfig::default());

        executor.format().unwrap();

        let us = fs::read_to_string(dir.path().join("streams/us.m3u")).unwrap();
        assert_eq!(
            us,
            "#EXTM3U\r\n\
             #EXTINF:-1 tvg-id=\"us.news\" group-title=\"News\",US News\r\n\
             http://us/news\r\n\
             #EXTINF:-1,Weather\r\n\
             http://us/weather\r\n"
        );

        executor.format().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("streams/us.m3u")).unwrap(),
            us
        );
    }

    #[test]
    fn missing_streams_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new(fixtures::paths(dir.path()), AppConfig::default());

        assert!(matches!(executor.format(), Err(AppError::Playlist(_))));
    }
}
