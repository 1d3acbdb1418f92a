//! Experience splitting: one entry per role, delimited by lines that start
//! with a 4-digit year.

/// Split a consolidated experience block into per-role entries at every
/// newline immediately followed by four digits. With no such boundary the
/// whole block is a single entry.
///
/// Known limitation: entries whose date appears mid-line, or that use
/// non-Western date formats, are not split. The date-at-line-start heuristic
/// is kept deliberately.
pub fn split_experience(block: &str) -> Vec<String> {
    let bytes = block.as_bytes();

    let mut boundaries = Vec::new();
    for i in 0..bytes.len() {
        if bytes[i] == b'\n'
            && i + 4 < bytes.len()
            && bytes[i + 1..i + 5].iter().all(u8::is_ascii_digit)
        {
            boundaries.push(i + 1);
        }
    }

    let mut entries = Vec::new();
    let mut start = 0;
    for boundary in boundaries {
        push_entry(&mut entries, &block[start..boundary]);
        start = boundary;
    }
    push_entry(&mut entries, &block[start..]);
    entries
}

fn push_entry(entries: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        entries.push(trimmed.to_string());
    }
}
