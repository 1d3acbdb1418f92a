/// Try UTF-8 first, fall back to lossy conversion.
pub(crate) fn extract_txt(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_simple_text() {
        assert_eq!(extract_txt(b"Hello, world!"), "Hello, world!");
    }

    #[test]
    fn extract_utf8_text() {
        let content = "Ünïcödé text".as_bytes();
        assert_eq!(extract_txt(content), "Ünïcödé text");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(extract_txt(b"  \n  Hello  \n  "), "Hello");
    }

    #[test]
    fn invalid_utf8_is_lossy() {
        let content = b"Hello \xFF world";
        let text = extract_txt(content);
        assert!(text.starts_with("Hello"));
        assert!(text.ends_with("world"));
    }
}
