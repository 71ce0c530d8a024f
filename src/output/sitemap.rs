use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Result, SiteError};
use crate::models::PagesData;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// `(path, changefreq, priority)` for the pages that exist on every build.
const STATIC_ENTRIES: [(&str, &str, &str); 6] = [
    ("/", "daily", "1.0"),
    ("/about", "monthly", "0.8"),
    ("/blog", "weekly", "0.8"),
    ("/contact", "monthly", "0.8"),
    ("/add-listing", "monthly", "0.8"),
    ("/sitemap", "weekly", "0.7"),
];

/// Render a sitemaps.org `urlset`: static pages, then states, cities and
/// businesses. Every entry carries `lastmod` as the build timestamp.
pub fn render_sitemap(site_url: &str, pages: &PagesData, lastmod: &str) -> Result<String> {
    let base = site_url.trim_end_matches('/');
    let mut entries: Vec<(String, &str, &str)> = STATIC_ENTRIES
        .iter()
        .map(|(path, freq, prio)| (format!("{base}{path}"), *freq, *prio))
        .collect();
    entries.extend(
        pages
            .state_pages
            .iter()
            .map(|s| (format!("{base}/state/{}", s.slug), "weekly", "0.8")),
    );
    entries.extend(
        pages
            .city_pages
            .iter()
            .map(|c| (format!("{base}/city/{}", c.slug), "weekly", "0.8")),
    );
    entries.extend(
        pages
            .business_listings
            .iter()
            .map(|b| (format!("{base}/business/{}", b.slug), "weekly", "0.7")),
    );

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset)).map_err(xml_err)?;

    for (loc, changefreq, priority) in &entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_err)?;
        for (tag, value) in [
            ("loc", loc.as_str()),
            ("lastmod", lastmod),
            ("changefreq", *changefreq),
            ("priority", *priority),
        ] {
            writer
                .write_event(Event::Start(BytesStart::new(tag)))
                .map_err(xml_err)?;
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .map_err(xml_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(xml_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_err)?;
    String::from_utf8(writer.into_inner()).map_err(xml_err)
}

fn xml_err(e: impl std::fmt::Display) -> SiteError {
    SiteError::Sitemap(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::generate;
    use crate::source::SourceTables;
    use std::path::Path;

    /// All `<loc>` values inside `<url>` elements.
    fn parse_urlset(xml: &str) -> Vec<String> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut urls = Vec::new();
        let mut in_url = false;
        let mut in_loc = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => match e.name().as_ref() {
                    b"url" => in_url = true,
                    b"loc" if in_url => in_loc = true,
                    _ => {}
                },
                Event::Text(e) if in_loc => urls.push(e.unescape().unwrap().to_string()),
                Event::End(e) => match e.name().as_ref() {
                    b"loc" => in_loc = false,
                    b"url" => in_url = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        urls
    }

    #[test]
    fn sitemap_lists_every_page() {
        let tables = SourceTables::load(Path::new("tests/fixtures/directory")).unwrap();
        let pages = generate(&tables, "Electrolysis").unwrap();
        let xml = render_sitemap("https://example.com/", &pages, "2026-10-19T00:00:00.000Z").unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(SITEMAP_NS));
        let urls = parse_urlset(&xml);
        assert_eq!(urls.len(), 6 + 2 + 4 + 5);
        assert_eq!(urls[0], "https://example.com/");
        assert_eq!(urls[6], "https://example.com/state/texas");
        assert_eq!(urls[8], "https://example.com/city/austin-te");
        assert_eq!(urls[16], "https://example.com/business/springfield-electrolysis-14");
        assert_eq!(xml.matches("<lastmod>2026-10-19T00:00:00.000Z</lastmod>").count(), 17);
    }

    #[test]
    fn special_characters_are_escaped() {
        let pages = PagesData::default();
        let xml = render_sitemap("https://example.com/?a=1&b=2", &pages, "now").unwrap();
        assert!(xml.contains("&amp;b=2"));
        assert_eq!(parse_urlset(&xml)[0], "https://example.com/?a=1&b=2/");
    }
}
