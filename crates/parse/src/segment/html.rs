//! HTML segmentation: three passes of decreasing confidence over the DOM.
//!
//! Pass 1 trusts semantic heading tags, pass 2 paragraphs that are entirely a
//! bold run, pass 3 short plain paragraphs that read like a header. Each pass
//! only adds sections the earlier passes did not capture; content is every
//! following sibling block up to the next recognized header.

use cvforge_core::SectionMap;
use scraper::{ElementRef, Html, Selector};

use crate::headers::{clean_header, match_header};

/// Paragraphs at or above this length are never treated as headers.
const HEADER_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Heading,
    Bold,
    ShortParagraph,
}

pub(crate) fn segment_html(input: &str) -> SectionMap {
    let doc = Html::parse_document(input);
    let mut sections = SectionMap::new();

    let headings = Selector::parse("h1,h2,h3,h4,h5,h6").unwrap();
    let bold = Selector::parse("strong,b").unwrap();
    let paragraphs = Selector::parse("p").unwrap();

    collect_pass(&doc, &headings, Pass::Heading, &mut sections);
    collect_pass(&doc, &bold, Pass::Bold, &mut sections);
    collect_pass(&doc, &paragraphs, Pass::ShortParagraph, &mut sections);

    sections
}

fn collect_pass(doc: &Html, selector: &Selector, pass: Pass, sections: &mut SectionMap) {
    for el in doc.select(selector) {
        let own = element_text(&el);
        let own = own.trim();
        if own.is_empty() || own.len() >= HEADER_MAX_CHARS {
            continue;
        }
        if match_header(own).is_none() {
            continue;
        }

        let Some(block) = block_for(el, pass) else {
            continue;
        };

        let key = clean_header(own);
        let already = sections.keys().any(|k| k.eq_ignore_ascii_case(&key));
        if already {
            continue;
        }

        let content = collect_following(block);
        sections.insert(key, content);
    }
}

/// The block element whose following siblings hold the section content. For a
/// bold run that is only part of its paragraph, the paragraph is prose, not a
/// header, and the match is discarded.
fn block_for(el: ElementRef, pass: Pass) -> Option<ElementRef> {
    match pass {
        Pass::Heading | Pass::ShortParagraph => Some(el),
        Pass::Bold => {
            let parent = el.parent().and_then(ElementRef::wrap)?;
            let own = element_text(&el);
            let parent_text = element_text(&parent);
            (own.trim() == parent_text.trim()).then_some(parent)
        }
    }
}

/// Collect sibling content after `block` until the next recognized header,
/// joining block texts with newlines.
fn collect_following(block: ElementRef) -> String {
    let mut parts: Vec<String> = Vec::new();

    for sibling in block.next_siblings() {
        if let Some(el) = ElementRef::wrap(sibling) {
            if is_header_element(&el) {
                break;
            }
            let text = element_text(&el);
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        } else if let Some(text) = sibling.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
    }

    parts.join("\n")
}

/// Would any pass treat this element as a section header?
fn is_header_element(el: &ElementRef) -> bool {
    let text = element_text(el);
    let text = text.trim();
    if text.is_empty() || text.len() >= HEADER_MAX_CHARS || match_header(text).is_none() {
        return false;
    }
    matches!(
        el.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "strong" | "b"
    )
}

/// Descendant text nodes, trimmed and joined with newlines.
fn element_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flatten HTML to plain text for the fallback segmenter.
pub(crate) fn html_to_text(input: &str) -> String {
    let doc = Html::parse_document(input);
    doc.root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
