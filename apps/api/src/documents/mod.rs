//! Documents: turns an uploaded resume or job description into plain text.
//!
//! Only two formats are accepted, picked by filename suffix (case-insensitive):
//! `.pdf` (text extracted page by page) and `.txt` (strict UTF-8).

use std::any::Any;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;

use crate::errors::AppError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Sniffs the format from the filename suffix. Returns `None` for anything else.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".txt") {
            Some(DocumentKind::Text)
        } else {
            None
        }
    }
}

/// One uploaded file, held in memory for the lifetime of a request.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub content: Cursor<Bytes>,
}

impl Document {
    pub fn new(filename: impl Into<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content: Cursor::new(data),
        }
    }

    /// Extracts the document text, leaving the stream rewound to its start.
    pub fn extract_text(&mut self) -> Result<String, AppError> {
        extract_text(&self.filename, &mut self.content)
    }
}

/// Extracts text from any seekable stream, using `filename` to pick the format.
///
/// The stream is read from its start and rewound to position 0 on success.
pub fn extract_text<R: Read + Seek>(filename: &str, reader: &mut R) -> Result<String, AppError> {
    let kind = DocumentKind::from_filename(filename).ok_or(AppError::UnsupportedFileType)?;

    let bytes = read_all(reader)?;
    let text = match kind {
        DocumentKind::Pdf => pdf_text(&bytes)?,
        DocumentKind::Text => String::from_utf8(bytes)
            .map_err(|e| AppError::FileProcessing(e.utf8_error().to_string()))?,
    };

    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| AppError::FileProcessing(e.to_string()))?;

    Ok(text)
}

fn read_all<R: Read + Seek>(reader: &mut R) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    reader
        .seek(SeekFrom::Start(0))
        .and_then(|_| reader.read_to_end(&mut bytes))
        .map_err(|e| AppError::FileProcessing(e.to_string()))?;
    Ok(bytes)
}

/// Per-page PDF text, blank pages dropped, joined with newlines.
///
/// pdf-extract panics on some malformed inputs (e.g. dangling object
/// references); those are reported as processing errors like any other.
fn pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| AppError::FileProcessing(panic_message(payload.as_ref())))?
    .map_err(|e| AppError::FileProcessing(e.to_string()))?;

    tracing::debug!("Extracted {} PDF page(s)", pages.len());

    Ok(join_pages(pages))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "malformed PDF".to_string())
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
