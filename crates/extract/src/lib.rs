mod docx;
mod pdf;
mod txt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("DOCX extraction failed: {0}")]
    DocxError(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("Document contains no extractable text")]
    EmptyDocument,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracted document body. DOCX and HTML sources keep their structure (a
/// simple HTML string with headings, bold runs and paragraphs); PDF and TXT
/// sources are plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    Html(String),
    Text(String),
}

impl DocumentContent {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentContent::Html(s) | DocumentContent::Text(s) => s.as_str(),
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, DocumentContent::Html(_))
    }
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// File type: "docx", "pdf", "txt", "html"
    pub file_type: String,
    pub content: DocumentContent,
}

/// Extract text from file bytes based on file type.
pub fn extract_document(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    let file_type = ext.as_str();

    let content = match file_type {
        "docx" => DocumentContent::Html(docx::extract_docx(bytes)?),
        "pdf" => DocumentContent::Text(pdf::extract_pdf(bytes)?),
        "txt" | "text" => DocumentContent::Text(txt::extract_txt(bytes)),
        "html" | "htm" => DocumentContent::Html(txt::extract_txt(bytes)),
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    if content.as_str().trim().is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        content,
    })
}
