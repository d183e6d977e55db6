use crate::error::{CoreError, CoreResult};
use crate::model::Item;
use quick_xml::{
    escape,
    events::{BytesStart, Event},
    Reader,
};
use std::io::BufRead;

/// Stream `<item>` elements out of an RSS document, in document order.
///
/// Only `title`, `description`, `pubDate` and `enclosure@url` are kept.
/// Channel-level elements are skipped.
pub fn read_items(r: impl BufRead) -> CoreResult<Vec<Item>> {
    let mut reader = Reader::from_reader(r);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<Item> = None;
    let mut state: Option<ParseState> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_error(reader.buffer_position(), e));
            }
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => current = Some(Item::default()),
                b"enclosure" => read_enclosure(&e, current.as_mut())?,
                name => state = current.as_ref().and_then(|_| ParseState::open(name)),
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"enclosure" {
                    read_enclosure(&e, current.as_mut())?;
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(st), Some(item)) = (&state, current.as_mut()) {
                    let text = match t.unescape() {
                        Ok(s) => s.into_owned(),
                        Err(e) => {
                            log::warn!("lenient unescape after {}", e);
                            unescape_lenient(&String::from_utf8_lossy(&t))
                        }
                    };
                    st.append(item, &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(st), Some(item)) = (&state, current.as_mut()) {
                    st.append(item, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    state = None;
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                name => {
                    if state.as_ref().map_or(false, |st| st.closes(name)) {
                        state = None;
                    }
                }
            },
            Ok(_) => {}
        }
        buf.clear();
    }

    log::debug!("parsed {} feed items", items.len());
    Ok(items)
}

fn read_enclosure(e: &BytesStart, item: Option<&mut Item>) -> CoreResult<()> {
    let item = match item {
        Some(item) => item,
        None => return Ok(()),
    };
    for attr in e.attributes() {
        let attr = attr.map_err(|e| CoreError::Fetch(format!("bad enclosure attribute: {}", e)))?;
        let value = attr
            .unescape_value()
            .map_err(|e| CoreError::Fetch(format!("bad enclosure attribute: {}", e)))?
            .into_owned();
        if attr.key.as_ref() == b"url" {
            item.enclosure.url = value;
        }
    }
    Ok(())
}

/// Resolve each `&...;` reference on its own; unknown ones (`&nbsp;`) stay verbatim.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let end = match rest.find(';') {
            Some(semi) => semi + 1,
            None => break,
        };
        let reference = &rest[..end];
        match escape::unescape(reference) {
            Ok(s) => out.push_str(&s),
            Err(_) => out.push_str(reference),
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

fn xml_error(pos: usize, e: quick_xml::Error) -> CoreError {
    log::error!("rss parse error at byte {}: {:?}", pos, e);
    CoreError::Fetch(format!("malformed feed at byte {}: {}", pos, e))
}

enum ParseState {
    Title,
    Description,
    PubDate,
}

impl ParseState {
    fn open(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(ParseState::Title),
            b"description" => Some(ParseState::Description),
            b"pubDate" => Some(ParseState::PubDate),
            _ => None,
        }
    }

    fn closes(&self, name: &[u8]) -> bool {
        matches!(
            (self, name),
            (ParseState::Title, b"title")
                | (ParseState::Description, b"description")
                | (ParseState::PubDate, b"pubDate")
        )
    }

    fn append(&self, item: &mut Item, text: &str) {
        let field = match self {
            ParseState::Title => &mut item.title,
            ParseState::Description => &mut item.description,
            ParseState::PubDate => &mut item.pub_date,
        };
        field.push_str(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Podcast Channel</title>
    <description>channel description</description>
    <item>
      <title>Kotlin Basics</title>
      <itunes:title>ignored</itunes:title>
      <description><![CDATA[<p>All about Kotlin</p>]]></description>
      <pubDate>Wed, 02 Jan 2019 10:00:00 +0000</pubDate>
      <enclosure url="https://cdn.example.com/kotlin.mp3" length="100" type="audio/mpeg"/>
    </item>
    <item>
      <title>iOS Tips &amp; Tricks</title>
      <description>Tips for iOS</description>
      <pubDate>Tue, 01 Jan 2019 10:00:00 +0000</pubDate>
      <enclosure url="https://cdn.example.com/ios.mp3" type="audio/mpeg"></enclosure>
    </item>
    <item>
      <title>No Audio</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parse_feed() {
        let items = read_items(FEED.as_bytes()).expect("parse failed");
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].title, "Kotlin Basics");
        assert_eq!(items[0].description, "<p>All about Kotlin</p>");
        assert_eq!(items[0].pub_date, "Wed, 02 Jan 2019 10:00:00 +0000");
        assert_eq!(items[0].enclosure.url, "https://cdn.example.com/kotlin.mp3");

        assert_eq!(items[1].title, "iOS Tips & Tricks");
        assert_eq!(items[1].enclosure.url, "https://cdn.example.com/ios.mp3");

        assert_eq!(items[2].title, "No Audio");
        assert!(items[2].enclosure.url.is_empty());
    }

    #[test]
    fn unknown_entity_kept() {
        let xml = "<rss><channel><item><title>Tips &amp; Tricks&nbsp;</title></item></channel></rss>";
        let items = read_items(xml.as_bytes()).expect("parse failed");
        assert_eq!(items[0].title, "Tips & Tricks&nbsp;");
        assert_eq!(unescape_lenient("a &lt; b &bogus; c & d"), "a < b &bogus; c & d");
    }

    #[test]
    fn channel_without_items() {
        let xml = "<rss><channel><title>empty</title></channel></rss>";
        let items = read_items(xml.as_bytes()).expect("parse failed");
        assert!(items.is_empty());
    }

    #[test]
    fn malformed() {
        let xml = "<rss><channel><item><title>x</item></channel></rss>";
        match read_items(xml.as_bytes()) {
            Err(CoreError::Fetch(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
