//! Plain-text segmentation fallback: a single alternation of every known
//! header, anchored to stand-alone (optionally indented, optionally
//! colon-terminated) lines, matched in document order.

use cvforge_core::SectionMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::headers::{clean_header, HEADER_VOCABULARY};

static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    let alternation = HEADER_VOCABULARY
        .iter()
        .map(|h| regex::escape(h))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?im)^[ \t]*(?:{alternation})[ \t]*:?[ \t]*\r?$")).unwrap()
});

pub(crate) fn segment_plain(input: &str) -> SectionMap {
    let mut sections = SectionMap::new();

    let matches: Vec<(usize, usize, String)> = HEADER_LINE
        .find_iter(input)
        .map(|m| (m.start(), m.end(), clean_header(m.as_str())))
        .collect();

    for (i, (_, end, name)) in matches.iter().enumerate() {
        let content_end = matches.get(i + 1).map_or(input.len(), |next| next.0);
        let content = input[*end..content_end].trim().to_string();
        super::insert_section(&mut sections, name.clone(), content);
    }

    sections
}
