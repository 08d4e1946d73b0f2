//! Text extraction — converts an uploaded file into one cleaned text string.
//!
//! PDFs get structured extraction with a byte-level fallback that never
//! fails; Word documents get a permissive decode only (no structured parser
//! — a documented quality limitation, the UI recommends PDF or plain text
//! when it bites); everything else must be plain text.

use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tracing::warn;

use super::ImportError;

/// AI extraction on less text than this produces garbage, so the pipeline
/// refuses to continue.
pub const MIN_EXTRACTED_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Text,
    Word,
    Unknown,
}

/// An uploaded file as received from the multipart form: already fully
/// buffered, consumed synchronously, never persisted.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing the MIME type from the extension.
    /// For tools and tests; the HTTP path receives bytes directly.
    #[allow(dead_code)]
    pub async fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let content_type = match extension_of(&filename).as_deref() {
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        };
        Ok(Self::new(filename, content_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Declared MIME type wins; the filename extension breaks ties for
    /// browsers that send a generic content type.
    pub fn kind(&self) -> FileKind {
        let mime = self.content_type.to_ascii_lowercase();
        if mime.contains("pdf") {
            return FileKind::Pdf;
        }
        if mime.starts_with("text/") {
            return FileKind::Text;
        }
        if mime.contains("msword") || mime.contains("wordprocessingml") {
            return FileKind::Word;
        }
        match extension_of(&self.filename).as_deref() {
            Some("pdf") => FileKind::Pdf,
            Some("txt") => FileKind::Text,
            Some("doc") | Some("docx") => FileKind::Word,
            _ => FileKind::Unknown,
        }
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Extracts cleaned text from an uploaded file.
pub fn extract_text(file: &UploadedFile) -> Result<String, ImportError> {
    match file.kind() {
        FileKind::Text => Ok(collapse_whitespace(&String::from_utf8_lossy(&file.bytes))),
        FileKind::Pdf => Ok(extract_pdf_text(&file.bytes)),
        FileKind::Word => extract_word_text(&file.bytes),
        FileKind::Unknown => Err(ImportError::Extraction(format!(
            "Unsupported file type: {}. Upload a PDF, Word document (.doc/.docx), or plain-text file.",
            file.filename
        ))),
    }
}

/// Structured extraction first; any failure degrades to the printable-byte
/// heuristic. The fallback never raises — quality drops silently instead.
fn extract_pdf_text(data: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(data) {
        Ok(text) => collapse_whitespace(&text),
        Err(e) => {
            warn!("structured PDF extraction failed, using byte-level fallback: {e}");
            printable_fallback(data)
        }
    }
}

/// Permissive decode for .doc/.docx. Binary Word containers leak very little
/// readable text this way, hence the length check and the pointed advice.
fn extract_word_text(data: &[u8]) -> Result<String, ImportError> {
    let text = printable_fallback(data);
    if text.len() < MIN_EXTRACTED_CHARS {
        return Err(ImportError::Extraction(
            "Could not read enough text from this Word document. Save it as PDF or plain text and upload again."
                .to_string(),
        ));
    }
    Ok(text)
}

/// Strips non-printable bytes and collapses whitespace. Best-effort by
/// construction: always returns a string, possibly empty.
fn printable_fallback(data: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(data);
    let printable: String = decoded
        .chars()
        .map(|c| {
            if (' '..='~').contains(&c) || c == '\n' || c == '\r' {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&printable)
}

/// Collapses runs of whitespace to single spaces and trims.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
