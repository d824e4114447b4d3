use std::fs;

use playlist::{Catalog, LoadedPlaylist, PlaylistFile, PlaylistItem, render, sanitize_filename};
use tracing::debug;

use super::CommandExecutor;
use crate::{error::Result, output};

pub const MASTER_PLAYLIST: &str = "index.m3u";

/// One generated playlist file.
#[derive(Debug)]
pub struct PlannedOutput<'a> {
    pub file_name: String,
    /// Category name, or `None` for the master playlist
    pub category: Option<String>,
    pub items: Vec<&'a PlaylistItem>,
}

/// Master playlist first, then one playlist per category in first-seen order.
///
/// Two categories that sanitize to the same file name share it; the later
/// one wins when written.
pub fn plan_outputs<'a>(playlists: &'a [LoadedPlaylist<'_>]) -> Vec<PlannedOutput<'a>> {
    let mut all = Vec::new();
    let mut catalog = Catalog::new();

    for loaded in playlists {
        for item in &loaded.playlist.items {
            all.push(item);
            catalog.insert(item.group_title(), item);
        }
    }

    let mut outputs = vec![PlannedOutput {
        file_name: MASTER_PLAYLIST.to_string(),
        category: None,
        items: all,
    }];
    outputs.extend(
        catalog
            .into_categories()
            .into_iter()
            .map(|(category, items)| PlannedOutput {
                file_name: format!("{}.m3u", sanitize_filename(&category)),
                category: Some(category),
                items,
            }),
    );
    outputs
}

impl CommandExecutor {
    /// Write the master playlist and one playlist per category.
    pub fn generate(&self) -> Result<()> {
        output::heading("🚀 Generating playlists...");
        let output_dir = &self.paths.output_dir;
        fs::create_dir_all(output_dir)?;

        let store = self.open_store()?;
        let loaded = store.load_all()?;
        for entry in &loaded {
            output::step(&format!("📄 Processing: {}", entry.file.file_name));
            output::note(&format!("   Streams: {}", entry.playlist.len()));
        }

        let outputs = plan_outputs(&loaded);
        for planned in &outputs {
            let file = PlaylistFile::new(output_dir.join(&planned.file_name));
            file.write(&render(planned.items.iter().copied()))?;
            debug!(file = %file.path.display(), streams = planned.items.len(), "Wrote playlist");

            match &planned.category {
                None => output::success(&format!(
                    "\n✅ Master playlist: {} ({} streams)\n",
                    file.path.display(),
                    planned.items.len()
                )),
                Some(category) => {
                    output::note(&format!("   {category}: {} streams", planned.items.len()))
                }
            }
        }

        output::success(&format!(
            "\n✨ Generated {} playlists successfully!",
            outputs.len()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commands::fixtures, config::AppConfig};
    use playlist::parse;

    #[test]
    fn plans_master_then_categories() {
        let us = PlaylistFile::new("streams/us.m3u");
        let loaded = vec![LoadedPlaylist {
            file: &us,
            playlist: parse(
                "#EXTM3U\n\
                 #EXTINF:-1 group-title=\"Kids & Family\",Toons\nhttp://a/1\n\
                 #EXTINF:-1,Mystery\nhttp://a/2\n\
                 #EXTINF:-1 group-title=\"Kids & Family\",More Toons\nhttp://a/3\n",
            ),
        }];

        let outputs = plan_outputs(&loaded);

        let names: Vec<_> = outputs.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, ["index.m3u", "kids---family.m3u", "undefined.m3u"]);
        assert_eq!(outputs[0].items.len(), 3);
        assert_eq!(outputs[1].category.as_deref(), Some("Kids & Family"));
        assert_eq!(outputs[1].items.len(), 2);
        assert_eq!(outputs[2].items[0].name, "Mystery");
    }

    #[test]
    fn no_playlists_still_plan_an_empty_master() {
        let outputs = plan_outputs(&[]);
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].items.is_empty());
    }

    #[test]
    fn writes_output_files() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_streams(dir.path());
        let paths = fixtures::paths(dir.path());
        let executor = CommandExecutor::new(paths.clone(), AppConfig::default());

        executor.generate().unwrap();

        let master = fs::read_to_string(paths.output_dir.join("index.m3u")).unwrap();
        assert_eq!(master.matches("#EXTINF").count(), 3);
        let news = fs::read_to_string(paths.output_dir.join("news.m3u")).unwrap();
        assert!(news.contains(",UK News\r\nhttp://uk/news\r\n"));
        assert!(news.contains(",US News\r\nhttp://us/news\r\n"));
        assert!(paths.output_dir.join("undefined.m3u").is_file());
    }
}
