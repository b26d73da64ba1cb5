//! Upload validation for ingestion

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Size ceiling for uploaded files (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Media types accepted by the ingestion pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    PlainText,
    Markdown,
    Json,
    Csv,
}

impl MediaType {
    /// Get MIME types associated with this media type
    pub fn mime_types(&self) -> &[&str] {
        match self {
            Self::PlainText => &["text/plain"],
            Self::Markdown => &["text/markdown", "text/x-markdown"],
            Self::Json => &["application/json"],
            Self::Csv => &["text/csv"],
        }
    }

    /// Detect a media type from a MIME string
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.to_lowercase();

        [Self::PlainText, Self::Markdown, Self::Json, Self::Csv]
            .into_iter()
            .find(|t| t.mime_types().iter().any(|m| mime.starts_with(m)))
    }

    /// Detect a media type from a filename extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        let guess = mime_guess::from_path(filename).first()?;
        Self::from_mime(guess.essence_str())
    }
}

/// A file handed to the ingestion pipeline
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename
    pub name: String,
    /// Declared MIME type, if the uploader supplied one
    pub mime_type: Option<String>,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Validate an uploaded file and resolve its media type.
///
/// Rejects empty files, files over [`MAX_FILE_SIZE`], and files whose declared
/// MIME type (or filename extension, when no type was declared) is not in the
/// accepted set.
pub fn validate_upload(file: &UploadedFile) -> Result<MediaType, DomainError> {
    if file.name.trim().is_empty() {
        return Err(DomainError::validation("No file provided"));
    }

    if file.bytes.is_empty() {
        return Err(DomainError::validation("File is empty"));
    }

    if file.size() > MAX_FILE_SIZE {
        return Err(DomainError::validation(
            "File size must be less than 10 MiB",
        ));
    }

    let media_type = file
        .mime_type
        .as_deref()
        .and_then(MediaType::from_mime)
        .or_else(|| MediaType::from_filename(&file.name));

    media_type.ok_or_else(|| {
        DomainError::validation(
            "Unsupported file type. Accepted types are text, markdown, JSON and CSV",
        )
    })
}

/// Replace path-hostile characters in a filename with underscores
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("text/plain"), Some(MediaType::PlainText));
        assert_eq!(
            MediaType::from_mime("text/plain; charset=utf-8"),
            Some(MediaType::PlainText)
        );
        assert_eq!(
            MediaType::from_mime("application/json"),
            Some(MediaType::Json)
        );
        assert_eq!(MediaType::from_mime("text/csv"), Some(MediaType::Csv));
        assert_eq!(MediaType::from_mime("application/pdf"), None);
        assert_eq!(MediaType::from_mime("image/png"), None);
    }

    #[test]
    fn test_media_type_from_filename() {
        assert_eq!(
            MediaType::from_filename("notes.txt"),
            Some(MediaType::PlainText)
        );
        assert_eq!(MediaType::from_filename("data.json"), Some(MediaType::Json));
        assert_eq!(MediaType::from_filename("table.csv"), Some(MediaType::Csv));
        assert_eq!(MediaType::from_filename("image.png"), None);
    }

    #[test]
    fn test_validate_upload_accepts_plain_text() {
        let file = UploadedFile::new("notes.txt", b"hello".to_vec()).with_mime_type("text/plain");
        assert_eq!(validate_upload(&file).unwrap(), MediaType::PlainText);
    }

    #[test]
    fn test_validate_upload_rejects_empty_file() {
        let file = UploadedFile::new("empty.txt", Vec::new());
        let err = validate_upload(&file).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_validate_upload_rejects_oversized_file() {
        let file = UploadedFile::new("big.txt", vec![b'a'; MAX_FILE_SIZE + 1]);
        let err = validate_upload(&file).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_validate_upload_rejects_unsupported_type() {
        let file = UploadedFile::new("doc.pdf", b"%PDF".to_vec()).with_mime_type("application/pdf");
        assert!(validate_upload(&file).is_err());
    }

    #[test]
    fn test_validate_upload_falls_back_to_extension() {
        let file = UploadedFile::new("notes.md", b"# heading".to_vec());
        assert_eq!(validate_upload(&file).unwrap(), MediaType::Markdown);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my notes (v2).txt"), "my_notes__v2_.txt");
        assert_eq!(sanitize_filename("clean-name.md"), "clean-name.md");
    }
}
