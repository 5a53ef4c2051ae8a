//! Codec for inline (base64-encoded) image payloads.
//!
//! Classification looks at the first character of the encoded payload: the
//! base64 encodings of the JPEG, PNG, and GIF magic headers begin with `/`,
//! `i`, and `R` respectively. This is the wire contract inherited from the
//! existing clients; it is fragile by design and deliberately preserved —
//! exactly these three formats are accepted, nothing else.
//!
//! The codec is pure: no I/O, no side effects. An empty payload is the
//! "no image" sentinel and is handled by the caller, never by this crate.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

/// Maximum decoded image size in kilobytes (1 KB = 1000 bytes here).
pub const MAX_DECODED_KB: usize = 1000;

/// Errors produced while classifying or decoding an image payload.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The payload's leading character matches none of the accepted formats.
    #[error("unsupported image format (leading character {0:?})")]
    UnsupportedFormat(char),

    /// The decoded image exceeds [`MAX_DECODED_KB`].
    #[error("image too large: {0} KB decoded (limit {MAX_DECODED_KB} KB)")]
    ImageTooLarge(usize),

    /// The payload is not valid base64.
    #[error("image payload is not valid base64: {0}")]
    Decode(String),
}

/// The three accepted image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// MIME content type for this format.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// A decoded image awaiting upload.
///
/// Transient value object: produced here, consumed exactly once by the
/// object-store upload step, then discarded. Never persisted standalone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Classify a payload from its leading character.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedFormat`] for any leading character other
/// than `/`, `i`, or `R` (an empty payload classifies as unsupported too;
/// callers short-circuit the empty sentinel before reaching the codec).
pub fn classify(payload: &str) -> Result<ImageFormat, ImageError> {
    match payload.chars().next() {
        Some('/') => Ok(ImageFormat::Jpeg),
        Some('i') => Ok(ImageFormat::Png),
        Some('R') => Ok(ImageFormat::Gif),
        Some(other) => Err(ImageError::UnsupportedFormat(other)),
        None => Err(ImageError::UnsupportedFormat('\0')),
    }
}

/// Classify and decode an inline image payload.
///
/// The size ceiling is checked only after a successful classification, on
/// the decoded byte length.
///
/// # Errors
///
/// [`ImageError::UnsupportedFormat`] for an unrecognized leading character,
/// [`ImageError::Decode`] for malformed base64, and
/// [`ImageError::ImageTooLarge`] when the decoded length reaches
/// [`MAX_DECODED_KB`].
pub fn classify_and_decode(payload: &str) -> Result<PendingImage, ImageError> {
    let format = classify(payload)?;

    let bytes = B64
        .decode(payload)
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let decoded_kb = bytes.len() / 1000;
    if decoded_kb >= MAX_DECODED_KB {
        return Err(ImageError::ImageTooLarge(decoded_kb));
    }

    Ok(PendingImage {
        bytes,
        content_type: format.content_type(),
    })
}
