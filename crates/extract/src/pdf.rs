use super::ExtractionError;

pub(crate) fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        // Scanned/image-only PDF: extraction succeeded but found no text.
        tracing::warn!("PDF contains no extractable text (scanned document?)");
        return Err(ExtractionError::EmptyDocument);
    }

    // pdf-extract returns all text as one string with form feeds between
    // pages; normalize page breaks to blank lines.
    Ok(trimmed.replace('\x0C', "\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = extract_pdf(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }
}
