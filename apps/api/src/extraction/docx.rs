use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, tabs, and soft line breaks (`<w:br/>`, `<w:cr/>`) in document order.
fn text_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:(tab)/>|<w:(?:br|cr)(?:\s[^>]*)?/>")
            .expect("text run pattern is valid")
    })
}

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|lt|gt|quot|apos|amp);")
            .expect("entity pattern is valid")
    })
}

/// Extracts paragraph text from an in-memory DOCX archive, one line per paragraph.
pub(super) fn extract(content: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    Ok(paragraphs_to_text(&xml))
}

fn paragraphs_to_text(xml: &str) -> String {
    let mut text = String::new();
    // Everything after the last closing paragraph tag is section properties.
    let mut paragraphs: Vec<&str> = xml.split("</w:p>").collect();
    paragraphs.pop();

    for paragraph in paragraphs {
        for caps in text_run_pattern().captures_iter(paragraph) {
            if let Some(run) = caps.get(1) {
                text.push_str(&unescape_xml(run.as_str()));
            } else if caps.get(2).is_some() {
                text.push('\t');
            } else {
                text.push('\n');
            }
        }
        text.push('\n');
    }
    text
}

/// Decodes the predefined XML entities and numeric character references in one pass.
/// Unknown or invalid references are left as written.
fn unescape_xml(s: &str) -> String {
    entity_pattern()
        .replace_all(s, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .unwrap_or_else(|| entity[1..].parse::<u32>())
                    .ok()
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
