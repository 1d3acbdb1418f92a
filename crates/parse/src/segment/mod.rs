//! Document segmentation: HTML-first with a plain-text regex fallback.

mod html;
mod text;

use cvforge_core::SectionMap;
use tracing::debug;

use crate::headers::{canonical_field, CanonicalField};

/// Key used when no structure is found and the whole text stays in one block.
pub const UNSEGMENTED_KEY: &str = "header";

/// Minimum distinct sections for a strategy to be considered successful.
const MIN_SECTIONS: usize = 2;

/// What kind of text the extractor produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Html,
    Plain,
}

/// Which heuristic produced the sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    Html,
    PlainText,
    /// Neither heuristic found structure; the whole text is one block under
    /// [`UNSEGMENTED_KEY`]. Callers should prefer the chunked whole-document
    /// extraction path in this case.
    Unsegmented,
}

#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    pub sections: SectionMap,
    pub strategy: SegmentStrategy,
}

impl SegmentOutcome {
    pub fn is_unsegmented(&self) -> bool {
        matches!(self.strategy, SegmentStrategy::Unsegmented)
    }
}

/// Split document text into named sections. Never fails: when no structure is
/// found the whole text is returned as a single unsegmented block.
pub fn segment_document(input: &str, kind: TextKind) -> SegmentOutcome {
    match kind {
        TextKind::Html => {
            let sections = html::segment_html(input);
            if sections.len() >= MIN_SECTIONS {
                debug!(sections = sections.len(), "HTML segmentation succeeded");
                return finish(sections, SegmentStrategy::Html);
            }
            debug!("HTML segmentation found too little structure, falling back to plain text");
            segment_plain(&html::html_to_text(input))
        }
        TextKind::Plain => segment_plain(input),
    }
}

fn segment_plain(input: &str) -> SegmentOutcome {
    let sections = text::segment_plain(input);
    if sections.len() >= MIN_SECTIONS {
        debug!(sections = sections.len(), "plain-text segmentation succeeded");
        return finish(sections, SegmentStrategy::PlainText);
    }

    let mut sections = SectionMap::new();
    sections.insert(UNSEGMENTED_KEY.to_string(), input.trim().to_string());
    finish(sections, SegmentStrategy::Unsegmented)
}

/// Guarantee that every canonical field is reachable from the map: sections
/// that did not appear in the document are present as explicit empty strings,
/// so consolidation can assume all expected keys exist.
fn finish(mut sections: SectionMap, strategy: SegmentStrategy) -> SegmentOutcome {
    for field in CanonicalField::ALL {
        let covered = sections.keys().any(|k| canonical_field(k) == Some(field));
        if !covered {
            sections.insert(field.primary_header().to_string(), String::new());
        }
    }
    SegmentOutcome { sections, strategy }
}

/// Insert a section, appending under a blank line when the same header
/// appears twice in one document.
pub(crate) fn insert_section(sections: &mut SectionMap, key: String, content: String) {
    if let Some(existing) = sections
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&key))
        .cloned()
    {
        let slot = &mut sections[&existing];
        if !slot.is_empty() && !content.is_empty() {
            slot.push_str("\n\n");
        }
        slot.push_str(&content);
    } else {
        sections.insert(key, content);
    }
}
