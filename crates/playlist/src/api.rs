//! Static JSON API documents: `streams.json`, `categories.json`, `stats.json`.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    catalog::Catalog,
    error::{PlaylistError, Result},
    store::LoadedPlaylist,
};

pub const STREAMS_FILE: &str = "streams.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const STATS_FILE: &str = "stats.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStream {
    /// `<playlist stem>-<index within that playlist>`
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvg_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamsDocument {
    pub total: usize,
    pub streams: Vec<ApiStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCategory {
    pub name: String,
    pub count: usize,
    pub streams: Vec<ApiStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesDocument {
    pub total: usize,
    pub categories: Vec<ApiCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_streams: usize,
    pub total_categories: usize,
    pub total_playlists: usize,
    pub categories: Vec<CategoryCount>,
    pub generated_at: DateTime<Utc>,
}

impl Stats {
    pub fn read_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| PlaylistError::io(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// The three API documents built from one pass over the playlists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBundle {
    pub streams: StreamsDocument,
    pub categories: CategoriesDocument,
    pub stats: Stats,
}

impl ApiBundle {
    pub fn build(playlists: &[LoadedPlaylist<'_>], generated_at: DateTime<Utc>) -> Self {
        let mut streams = Vec::new();
        let mut catalog = Catalog::new();

        for loaded in playlists {
            for (index, item) in loaded.playlist.items.iter().enumerate() {
                let stream = ApiStream {
                    id: format!("{}-{}", loaded.file.stem, index),
                    name: item.name.clone(),
                    url: item.url.clone(),
                    logo: item.tvg.logo.clone(),
                    group: item.group.title.clone(),
                    tvg_id: item.tvg.id.clone(),
                };
                catalog.insert(item.group_title(), stream.clone());
                streams.push(stream);
            }
        }

        let categories: Vec<ApiCategory> = catalog
            .into_categories()
            .into_iter()
            .map(|(name, streams)| ApiCategory {
                name,
                count: streams.len(),
                streams,
            })
            .collect();

        let stats = Stats {
            total_streams: streams.len(),
            total_categories: categories.len(),
            total_playlists: playlists.len(),
            categories: categories
                .iter()
                .map(|c| CategoryCount {
                    name: c.name.clone(),
                    count: c.count,
                })
                .collect(),
            generated_at,
        };

        Self {
            streams: StreamsDocument {
                total: streams.len(),
                streams,
            },
            categories: CategoriesDocument {
                total: categories.len(),
                categories,
            },
            stats,
        }
    }

    /// Write all three documents into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| PlaylistError::io(dir, e))?;
        write_json(&dir.join(STREAMS_FILE), &self.streams)?;
        write_json(&dir.join(CATEGORIES_FILE), &self.categories)?;
        write_json(&dir.join(STATS_FILE), &self.stats)?;
        info!(
            dir = %dir.display(),
            streams = self.streams.total,
            categories = self.categories.total,
            "Wrote API documents"
        );
        Ok(())
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| PlaylistError::io(path, e))
}
