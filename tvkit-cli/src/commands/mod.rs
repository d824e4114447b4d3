mod api;
mod format;
mod generate;
mod probe;
mod readme;
mod validate;

use playlist::PlaylistStore;

use crate::{cli::Paths, config::AppConfig, error::Result, output};

pub struct CommandExecutor {
    paths: Paths,
    config: AppConfig,
}

impl CommandExecutor {
    pub fn new(paths: Paths, config: AppConfig) -> Self {
        Self { paths, config }
    }

    fn open_store(&self) -> Result<PlaylistStore> {
        let store = PlaylistStore::open(&self.paths.streams_dir)?;
        output::note(&format!("Found {} playlist file(s)\n", store.len()));
        Ok(store)
    }
}
