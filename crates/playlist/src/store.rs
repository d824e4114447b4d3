use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{PlaylistError, Result},
    model::Playlist,
    parser,
};

pub const PLAYLIST_EXTENSION: &str = "m3u";

/// A `*.m3u` file in the streams directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistFile {
    pub path: PathBuf,
    pub file_name: String,
    /// File name without the `.m3u` extension
    pub stem: String,
}

impl PlaylistFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            stem,
        }
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| PlaylistError::io(&self.path, e))
    }

    pub fn load(&self) -> Result<Playlist> {
        Ok(parser::parse(&self.read()?))
    }

    pub fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content).map_err(|e| PlaylistError::io(&self.path, e))
    }
}

#[derive(Debug, Clone)]
pub struct LoadedPlaylist<'a> {
    pub file: &'a PlaylistFile,
    pub playlist: Playlist,
}

/// Directory of playlist files, listed once at open time.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    dir: PathBuf,
    files: Vec<PlaylistFile>,
}

impl PlaylistStore {
    /// List `*.m3u` files directly inside `dir`, sorted by file name.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let entries = fs::read_dir(&dir).map_err(|e| PlaylistError::io(&dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| PlaylistError::io(&dir, e))?.path();
            let is_playlist = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == PLAYLIST_EXTENSION);
            if is_playlist {
                files.push(PlaylistFile::new(path));
            }
        }
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        debug!(dir = %dir.display(), count = files.len(), "Found playlist files");
        Ok(Self { dir, files })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[PlaylistFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Read and parse every file. Fails on the first unreadable file.
    pub fn load_all(&self) -> Result<Vec<LoadedPlaylist<'_>>> {
        self.files
            .iter()
            .map(|file| {
                Ok(LoadedPlaylist {
                    file,
                    playlist: file.load()?,
                })
            })
            .collect()
    }
}
