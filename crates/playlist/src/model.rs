/// `#EXTM3U` line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistHeader {
    /// Whether the playlist declared `#EXTM3U` at all
    pub present: bool,
    /// Header attributes in declaration order, e.g. `x-tvg-url`
    pub attrs: Vec<(String, String)>,
}

impl PlaylistHeader {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tvg {
    pub id: Option<String>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub title: Option<String>,
}

/// Per-stream player options from `#EXTVLCOPT` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpOptions {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistItem {
    pub name: String,
    pub url: String,
    /// `-1` for live streams or when the value is unparseable
    pub duration: f64,
    pub tvg: Tvg,
    pub group: Group,
    pub http: HttpOptions,
    /// 1-based line the item starts on
    pub line: usize,
}

impl Default for PlaylistItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            duration: -1.0,
            tvg: Tvg::default(),
            group: Group::default(),
            http: HttpOptions::default(),
            line: 0,
        }
    }
}

impl PlaylistItem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_group(mut self, title: impl Into<String>) -> Self {
        self.group.title = Some(title.into());
        self
    }

    /// Group title, if set and non-empty.
    pub fn group_title(&self) -> Option<&str> {
        self.group.title.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    pub header: PlaylistHeader,
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
