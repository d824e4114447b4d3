//! Playlist linting.
//!
//! Errors make a playlist invalid; warnings are informational.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::{parser, store::PlaylistFile, uri::is_uri};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub file: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub streams_count: usize,
}

impl ValidationReport {
    fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            streams_count: 0,
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Read and validate one playlist file. Read failures are reported, not returned.
pub fn validate_file(file: &PlaylistFile) -> ValidationReport {
    match file.read() {
        Ok(content) => validate_content(&file.file_name, &content),
        Err(err) => {
            let mut report = ValidationReport::new(&file.file_name);
            report.error(format!("Parse error: {err}"));
            report
        }
    }
}

pub fn validate_content(file: &str, content: &str) -> ValidationReport {
    let mut report = ValidationReport::new(file);

    if !content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .starts_with("#EXTM3U")
    {
        report.error("Missing #EXTM3U header");
    }

    let playlist = parser::parse(content);
    report.streams_count = playlist.len();

    let mut url_counts: HashMap<&str, usize> = HashMap::new();
    for item in &playlist.items {
        let url = item.url.trim();
        if !url.is_empty() {
            *url_counts.entry(url).or_default() += 1;
        }
    }

    for (index, item) in playlist.items.iter().enumerate() {
        let position = index + 1;
        let url = item.url.trim();

        if item.name.trim().is_empty() {
            report.warning(format!("Stream {position}: Missing title"));
        }

        if url.is_empty() {
            report.error(format!("Stream {position}: Missing URL"));
        } else if !is_uri(url) {
            report.error(format!("Stream {position}: Invalid URL format"));
        }

        if url_counts.get(url).is_some_and(|&count| count > 1) {
            report.warning(format!("Stream {position}: Duplicate URL detected"));
        }
    }

    debug!(
        file,
        streams = report.streams_count,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated playlist"
    );
    report
}
