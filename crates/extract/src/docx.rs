//! DOCX text extraction.
//!
//! A .docx file is a ZIP archive; the body lives in `word/document.xml`.
//! We walk the XML event stream and render each paragraph as a line of
//! simple HTML so the segmenter downstream can use heading styles and bold
//! runs as section cues: `Heading*`/`Title` styles become `<h1>`/`<h2>`,
//! bold runs become `<strong>`, everything else becomes `<p>`.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

#[derive(Debug, Default)]
struct Run {
    bold: bool,
    text: String,
}

/// Extract an attribute value by key from an element.
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// True when a toggle property like `<w:b w:val="false"/>` is switched off.
fn val_is_off(e: &BytesStart) -> bool {
    matches!(get_attr(e, b"w:val").as_deref(), Some("false") | Some("0"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Map a paragraph style id to a heading level. Word names its built-in
/// heading styles "Heading1".."Heading9"; "Title" is treated as the top.
fn heading_level(style: &str) -> Option<usize> {
    if style == "Title" {
        return Some(1);
    }
    style
        .strip_prefix("Heading")
        .and_then(|n| n.parse::<usize>().ok())
        .map(|n| n.clamp(1, 6))
}

fn push_paragraph(html: &mut String, style: Option<&str>, runs: &[Run]) {
    let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
    if joined.trim().is_empty() {
        return;
    }

    if let Some(level) = style.and_then(heading_level) {
        html.push_str(&format!("<h{level}>{}</h{level}>\n", escape_html(joined.trim())));
        return;
    }

    let all_bold = runs.iter().all(|r| r.bold || r.text.trim().is_empty());
    if all_bold {
        html.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(joined.trim())));
        return;
    }

    html.push_str("<p>");
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        if run.bold {
            html.push_str(&format!("<strong>{}</strong>", escape_html(&run.text)));
        } else {
            html.push_str(&escape_html(&run.text));
        }
    }
    html.push_str("</p>\n");
}

pub(crate) fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxError(format!("not a valid DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::DocxError(format!("word/document.xml missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::DocxError(format!("unreadable document body: {e}")))?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut html = String::new();
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;
    let mut style: Option<String> = None;
    let mut runs: Vec<Run> = Vec::new();
    let mut current: Run = Run::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    style = None;
                    runs.clear();
                }
                b"w:r" if in_paragraph => {
                    in_run = true;
                    current = Run::default();
                }
                b"w:t" if in_run => in_text = true,
                b"w:b" if in_run => current.bold = !val_is_off(&e),
                b"w:pStyle" if in_paragraph && !in_run => style = get_attr(&e, b"w:val"),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:b" if in_run => current.bold = !val_is_off(&e),
                b"w:pStyle" if in_paragraph && !in_run => style = get_attr(&e, b"w:val"),
                b"w:br" | b"w:cr" if in_run => current.text.push('\n'),
                b"w:tab" if in_run => current.text.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::DocxError(format!("malformed XML text: {e}")))?;
                current.text.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => {
                    if in_run {
                        runs.push(std::mem::take(&mut current));
                        in_run = false;
                    }
                }
                b"w:p" => {
                    if in_paragraph {
                        push_paragraph(&mut html, style.as_deref(), &runs);
                        in_paragraph = false;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::DocxError(format!("malformed document XML: {e}")))
            }
            _ => {}
        }
    }

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn wrap_body(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    #[test]
    fn heading_style_becomes_heading_tag() {
        let xml = wrap_body(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Profile</w:t></w:r></w:p>
               <w:p><w:r><w:t>Expert in X.</w:t></w:r></w:p>"#,
        );
        let html = extract_docx(&docx_bytes(&xml)).unwrap();
        assert!(html.contains("<h1>Profile</h1>"));
        assert!(html.contains("<p>Expert in X.</p>"));
    }

    #[test]
    fn fully_bold_paragraph_becomes_strong() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Education</w:t></w:r></w:p>"#,
        );
        let html = extract_docx(&docx_bytes(&xml)).unwrap();
        assert!(html.contains("<p><strong>Education</strong></p>"));
    }

    #[test]
    fn bold_toggle_off_is_not_bold() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:rPr><w:b w:val="false"/></w:rPr><w:t>Plain text.</w:t></w:r></w:p>"#,
        );
        let html = extract_docx(&docx_bytes(&xml)).unwrap();
        assert!(html.contains("<p>Plain text.</p>"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn mixed_runs_keep_inline_strong() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>2020</w:t></w:r><w:r><w:t> Project lead</w:t></w:r></w:p>"#,
        );
        let html = extract_docx(&docx_bytes(&xml)).unwrap();
        assert!(html.contains("<p><strong>2020</strong> Project lead</p>"));
    }

    #[test]
    fn text_is_html_escaped() {
        let xml = wrap_body(r#"<w:p><w:r><w:t>R&amp;D &lt;lead&gt;</w:t></w:r></w:p>"#);
        let html = extract_docx(&docx_bytes(&xml)).unwrap();
        assert!(html.contains("R&amp;D &lt;lead&gt;"));
    }

    #[test]
    fn garbage_bytes_are_a_docx_error() {
        let err = extract_docx(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ExtractionError::DocxError(_)));
    }

    #[test]
    fn missing_document_xml_is_a_docx_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        let err = extract_docx(&bytes).unwrap_err();
        assert!(matches!(err, ExtractionError::DocxError(_)));
    }
}
