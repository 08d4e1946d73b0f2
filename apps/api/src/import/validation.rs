//! Upload validation — the only gate before extraction. Pure and synchronous;
//! callers must not proceed on failure.

use super::extract::UploadedFile;
use super::ImportError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".txt", ".doc", ".docx"];

pub fn validate(file: &UploadedFile) -> Result<(), ImportError> {
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ImportError::Validation(
            "File size must be less than 10MB".to_string(),
        ));
    }

    let mime_ok = ALLOWED_MIME_TYPES.contains(&file.content_type.as_str());
    let name = file.filename.to_lowercase();
    let extension_ok = ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext));

    if !mime_ok && !extension_ok {
        return Err(ImportError::Validation(
            "Please upload a PDF, Word document (.doc/.docx), or text file (.txt)".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, size: usize) -> UploadedFile {
        UploadedFile::new(name, mime, vec![b'a'; size])
    }

    #[test]
    fn test_oversized_file_rejected_regardless_of_type() {
        let err = validate(&file("resume.pdf", "application/pdf", MAX_UPLOAD_BYTES + 1))
            .unwrap_err();
        assert!(matches!(err, ImportError::Validation(ref m) if m.contains("10MB")));
    }

    #[test]
    fn test_file_at_limit_passes() {
        assert!(validate(&file("resume.pdf", "application/pdf", MAX_UPLOAD_BYTES)).is_ok());
    }

    #[test]
    fn test_known_mime_with_odd_extension_passes() {
        assert!(validate(&file("resume.export", "text/plain", 100)).is_ok());
    }

    #[test]
    fn test_known_extension_with_generic_mime_passes() {
        assert!(validate(&file("Resume.DOCX", "application/octet-stream", 100)).is_ok());
    }

    #[test]
    fn test_unknown_mime_and_extension_rejected() {
        let err = validate(&file("photo.png", "image/png", 100)).unwrap_err();
        assert!(matches!(err, ImportError::Validation(ref m) if m.contains("PDF")));
    }
}
