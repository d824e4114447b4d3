//! Lenient line-oriented M3U parser.
//!
//! Recognised directives:
//! - `#EXTM3U [attrs]` header
//! - `#EXTINF:<duration> [key="value" ...],<title>`
//! - `#EXTGRP:<group>` (used when `group-title` is absent)
//! - `#EXTVLCOPT:http-user-agent=...` / `#EXTVLCOPT:http-referrer=...`
//!
//! Every other comment line is ignored. The first non-comment line after an
//! `#EXTINF` is that entry's URL.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::model::{Playlist, PlaylistItem};

const HEADER: &str = "#EXTM3U";
const EXTINF: &str = "#EXTINF:";
const EXTGRP: &str = "#EXTGRP:";
const EXTVLCOPT: &str = "#EXTVLCOPT:";

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9_-]+)\s*=\s*"([^"]*)""#).unwrap());

pub fn parse(content: &str) -> Playlist {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut playlist = Playlist::default();
    let mut pending: Option<PlaylistItem> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let line_no = index + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(HEADER) {
            if !playlist.header.present && playlist.items.is_empty() && pending.is_none() {
                playlist.header.present = true;
                playlist.header.attrs = attributes(rest).collect();
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(EXTINF) {
            if let Some(unterminated) = pending.take() {
                trace!(line = unterminated.line, "Entry without URL");
                playlist.items.push(unterminated);
            }
            pending = Some(parse_extinf(rest, line_no));
            continue;
        }

        if let Some(rest) = line.strip_prefix(EXTGRP) {
            if let Some(item) = pending.as_mut()
                && item.group_title().is_none()
            {
                item.group.title = Some(rest.trim().to_owned());
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(EXTVLCOPT) {
            if let Some(item) = pending.as_mut() {
                apply_vlc_option(item, rest);
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        match pending.take() {
            Some(mut item) => {
                item.url = line.to_owned();
                playlist.items.push(item);
            }
            None => playlist.items.push(PlaylistItem {
                url: line.to_owned(),
                line: line_no,
                ..Default::default()
            }),
        }
    }

    if let Some(unterminated) = pending {
        playlist.items.push(unterminated);
    }

    playlist
}

fn parse_extinf(rest: &str, line: usize) -> PlaylistItem {
    let (info, title) = match split_title(rest) {
        Some(at) => (&rest[..at], rest[at + 1..].trim()),
        None => (rest, ""),
    };

    let duration = info
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(-1.0);

    let mut item = PlaylistItem {
        name: title.to_owned(),
        duration,
        line,
        ..Default::default()
    };

    for (key, value) in attributes(info) {
        let slot = match key.to_ascii_lowercase().as_str() {
            "tvg-id" => &mut item.tvg.id,
            "tvg-name" => &mut item.tvg.name,
            "tvg-logo" => &mut item.tvg.logo,
            "tvg-url" => &mut item.tvg.url,
            "group-title" => &mut item.group.title,
            _ => continue,
        };
        *slot = Some(value);
    }

    item
}

/// Byte offset of the first comma outside double quotes.
fn split_title(info: &str) -> Option<usize> {
    let mut quoted = false;
    for (at, c) in info.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => return Some(at),
            _ => {}
        }
    }
    None
}

fn attributes(text: &str) -> impl Iterator<Item = (String, String)> + '_ {
    ATTRIBUTE
        .captures_iter(text)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
}

fn apply_vlc_option(item: &mut PlaylistItem, option: &str) {
    let Some((key, value)) = option.split_once('=') else {
        return;
    };
    let value = Some(value.trim().to_owned());
    match key.trim().to_ascii_lowercase().as_str() {
        "http-user-agent" => item.http.user_agent = value,
        "http-referrer" | "http-referer" => item.http.referrer = value,
        _ => {}
    }
}
