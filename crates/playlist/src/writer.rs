use crate::{model::PlaylistItem, uri::normalize_url};

/// Line terminator of generated playlists.
pub const EOL: &str = "\r\n";

const UNTITLED: &str = "Untitled";

/// Render items as a canonical `#EXTM3U` playlist.
///
/// Only `tvg-id`, `tvg-name`, `tvg-logo` and `group-title` are written, in
/// that order; URLs are normalised.
pub fn render<'a>(items: impl IntoIterator<Item = &'a PlaylistItem>) -> String {
    let mut out = String::from("#EXTM3U");
    out.push_str(EOL);

    for item in items {
        out.push_str("#EXTINF:-1");
        push_attr(&mut out, "tvg-id", item.tvg.id.as_deref());
        push_attr(&mut out, "tvg-name", item.tvg.name.as_deref());
        push_attr(&mut out, "tvg-logo", item.tvg.logo.as_deref());
        push_attr(&mut out, "group-title", item.group.title.as_deref());
        out.push(',');

        let title = item.name.trim();
        out.push_str(if title.is_empty() { UNTITLED } else { title });
        out.push_str(EOL);

        out.push_str(&normalize_url(&item.url));
        out.push_str(EOL);
    }

    out
}

fn push_attr(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Tvg, parser::parse};

    #[test]
    fn renders_canonical_entries() {
        let mut news = PlaylistItem::new("News HD", " HTTP://Example.com/news.m3u8 ").with_group("News");
        news.tvg = Tvg {
            id: Some("news.us".into()),
            name: Some("News".into()),
            logo: Some("http://img/news.png".into()),
            url: Some("http://epg".into()),
        };
        let bare = PlaylistItem::new("", "http://example.com/x.ts");

        let rendered = render([&news, &bare]);

        assert_eq!(
            rendered,
            "#EXTM3U\r\n\
             #EXTINF:-1 tvg-id=\"news.us\" tvg-name=\"News\" tvg-logo=\"http://img/news.png\" group-title=\"News\",News HD\r\n\
             http://example.com/news.m3u8\r\n\
             #EXTINF:-1,Untitled\r\n\
             http://example.com/x.ts\r\n"
        );
    }

    #[test]
    fn empty_playlist_is_just_the_header() {
        assert_eq!(render(std::iter::empty()), "#EXTM3U\r\n");
    }

    #[test]
    fn formatting_is_stable() {
        let source = "#EXTM3U\n#EXTINF:-1 group-title=\"Kids\" tvg-id=\"k\",Cartoons\nhttp://a/k.m3u8\n";
        let once = render(&parse(source).items);
        let twice = render(&parse(&once).items);
        assert_eq!(once, twice);
    }
}
