// SPDX-License-Identifier: MPL-2.0
//! Validation of user-selected photo files before anything is decoded or sent.

use image_rs::ImageFormat;
use std::fmt;
use std::path::Path;

/// MIME types accepted for uploaded photos.
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// File extensions accepted for uploaded photos (lowercase).
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Reasons an uploaded file is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Filename contains characters outside `[A-Za-z0-9_.-]`.
    InvalidFilename(String),
    /// Extension is missing or not an allowed image extension.
    UnsupportedExtension(String),
    /// Declared MIME type is not an allowed image type.
    UnsupportedMimeType(String),
    /// The file has no content.
    EmptyFile,
}

impl ValidationError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidFilename(_) => "Please rename the file before uploading thanks!",
            ValidationError::UnsupportedExtension(_)
            | ValidationError::UnsupportedMimeType(_)
            | ValidationError::EmptyFile => "Invalid file type. Please upload an image file.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidFilename(name) => write!(f, "invalid filename: {name}"),
            ValidationError::UnsupportedExtension(name) => {
                write!(f, "unsupported file extension: {name}")
            }
            ValidationError::UnsupportedMimeType(mime) => {
                write!(f, "unsupported MIME type: {mime}")
            }
            ValidationError::EmptyFile => write!(f, "file is empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A file picked by the user, as handed over by the platform.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    /// Builds a candidate from a path, guessing the MIME type from the extension.
    #[must_use]
    pub fn from_path_and_bytes(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            mime_type: mime_for_path(path)
                .unwrap_or("application/octet-stream")
                .to_string(),
            file_name,
            bytes,
        }
    }
}

/// Guesses an image MIME type from the file extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path).ok().map(|format| format.to_mime_type())
}

/// Checks filename characters, extension and declared MIME type.
///
/// # Errors
///
/// Returns the first rule the file breaks.
pub fn validate_upload(file_name: &str, mime_type: &str) -> Result<(), ValidationError> {
    let valid_chars = !file_name.is_empty()
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid_chars {
        return Err(ValidationError::InvalidFilename(file_name.to_string()));
    }

    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => return Err(ValidationError::UnsupportedExtension(file_name.to_string())),
    }

    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(ValidationError::UnsupportedMimeType(mime_type.to_string()));
    }

    Ok(())
}

/// Validates a full candidate, including that it is not empty.
///
/// # Errors
///
/// Returns the first rule the candidate breaks.
pub fn validate_candidate(candidate: &UploadCandidate) -> Result<(), ValidationError> {
    validate_upload(&candidate.file_name, &candidate.mime_type)?;
    if candidate.bytes.is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    Ok(())
}
