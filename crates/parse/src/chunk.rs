//! Token-budget chunking for whole-document extraction of unsegmented text.
//!
//! Budgets are expressed in tokens and approximated at 4 characters per
//! token. Each chunk breaks at the last paragraph or sentence boundary
//! before the budget when one exists past the halfway point, otherwise hard
//! at the budget.

/// Rough chars-per-token used to convert a token budget into characters.
pub const CHARS_PER_TOKEN: usize = 4;

/// Split `text` into ordered chunks of at most `max_tokens` tokens each.
pub fn chunk_text(text: &str, max_tokens: usize) -> Vec<String> {
    let budget = max_tokens.max(1) * CHARS_PER_TOKEN;
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while rest.len() > budget {
        let cut = floor_char_boundary(rest, budget);
        let window = &rest[..cut];
        let split_at = natural_break(window).unwrap_or(cut);

        let (head, tail) = rest.split_at(split_at);
        let head = head.trim();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        rest = tail.trim_start();
    }

    let rest = rest.trim();
    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// The best break position in `window`: the last paragraph gap, else the last
/// sentence end, but only when it lies past the halfway point. A single
/// unbroken run is split hard rather than mid-word scanned further.
fn natural_break(window: &str) -> Option<usize> {
    let half = window.len() / 2;

    if let Some(pos) = window.rfind("\n\n") {
        if pos > half {
            return Some(pos);
        }
    }

    let mut best: Option<usize> = None;
    for pattern in [". ", ".\n", "! ", "!\n", "? ", "?\n"] {
        if let Some(pos) = window.rfind(pattern) {
            let end = pos + 1; // keep the terminal punctuation
            if end > half {
                best = Some(best.map_or(end, |b| b.max(end)));
            }
        }
    }
    best
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("Just a short document.", 100);
        assert_eq!(chunks, vec!["Just a short document.".to_string()]);
    }

    #[test]
    fn breaks_at_paragraph_boundary() {
        // Budget of 30 tokens = 120 chars; the paragraph gap sits past halfway.
        let first = "First paragraph with a reasonable amount of content in it, going on a bit.";
        let second = "Second paragraph, also with plenty of content to push past the budget limit.";
        let text = format!("{first}\n\n{second}");
        let chunks = chunk_text(&text, 30);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], first);
        assert_eq!(chunks[1], second);
    }

    #[test]
    fn breaks_at_sentence_boundary_without_paragraphs() {
        let text = "Sentence one runs for a while to fill space. Sentence two also runs for a \
                    while to fill space. Sentence three keeps going past the budget for sure.";
        let chunks = chunk_text(text, 30);
        assert!(chunks.len() >= 2);
        assert!(chunks[0].ends_with('.'), "chunk should end at a sentence: {:?}", chunks[0]);
    }

    #[test]
    fn hard_split_when_no_boundary_exists() {
        let text = "x".repeat(1000);
        let chunks = chunk_text(&text, 50); // 200-char budget
        assert_eq!(chunks.len(), 5);
        for chunk in &chunks {
            assert!(chunk.len() <= 200);
        }
    }

    #[test]
    fn early_boundary_is_ignored() {
        // The only sentence end sits in the first half of the window, so the
        // split is hard at the budget instead.
        let text = format!("Short. {}", "y".repeat(400));
        let chunks = chunk_text(&text, 50); // 200-char budget
        assert!(chunks[0].len() > 100, "must not break at the early boundary");
    }

    #[test]
    fn no_content_is_lost() {
        let sentences: Vec<String> = (0..100).map(|i| format!("Item number {i} here.")).collect();
        let text = sentences.join(" ");
        let chunks = chunk_text(&text, 40);
        assert!(chunks.len() > 1);
        let rejoined = chunks.join(" ");
        for sentence in &sentences {
            assert!(rejoined.contains(sentence.as_str()), "lost: {sentence}");
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "é".repeat(600);
        let chunks = chunk_text(&text, 50);
        assert!(chunks.len() >= 2);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 100).is_empty());
        assert!(chunk_text("   \n ", 100).is_empty());
    }
}
