//! Content sniffing from leading bytes.
//!
//! Providers need to know what they are being sent, but callers only hand over
//! raw bytes. The signature table here is deliberately small: anything that is
//! not one of the five supported formats is sent as PNG, which the primary
//! provider accepts for arbitrary raster input.

use serde::{Deserialize, Serialize};

pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const PNG_MIME_TYPE: &str = "image/png";
pub const GIF_MIME_TYPE: &str = "image/gif";
pub const BMP_MIME_TYPE: &str = "image/bmp";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Minimum number of leading bytes needed before a signature is trusted.
pub const MIN_SIGNATURE_LEN: usize = 4;

/// Content-type tag attached to every extraction request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Jpeg,
    #[default]
    Png,
    Gif,
    Bmp,
    Pdf,
}

impl ContentType {
    /// Every tag the sniffer can produce.
    pub const ALL: [ContentType; 5] = [
        ContentType::Jpeg,
        ContentType::Png,
        ContentType::Gif,
        ContentType::Bmp,
        ContentType::Pdf,
    ];

    /// Short tag (`"jpeg"`, `"png"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Jpeg => "jpeg",
            ContentType::Png => "png",
            ContentType::Gif => "gif",
            ContentType::Bmp => "bmp",
            ContentType::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentType::Jpeg => JPEG_MIME_TYPE,
            ContentType::Png => PNG_MIME_TYPE,
            ContentType::Gif => GIF_MIME_TYPE,
            ContentType::Bmp => BMP_MIME_TYPE,
            ContentType::Pdf => PDF_MIME_TYPE,
        }
    }

    fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            JPEG_MIME_TYPE => Some(ContentType::Jpeg),
            PNG_MIME_TYPE => Some(ContentType::Png),
            GIF_MIME_TYPE => Some(ContentType::Gif),
            BMP_MIME_TYPE => Some(ContentType::Bmp),
            PDF_MIME_TYPE => Some(ContentType::Pdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify raw bytes by their magic number.
///
/// Inputs shorter than [`MIN_SIGNATURE_LEN`] and signatures outside the
/// supported set map to [`ContentType::Png`]. Never fails.
///
/// # Example
///
/// ```rust
/// use docsift::core::mime::{sniff_content_type, ContentType};
///
/// assert_eq!(sniff_content_type(b"%PDF-1.7\n"), ContentType::Pdf);
/// assert_eq!(sniff_content_type(b"??"), ContentType::Png);
/// ```
pub fn sniff_content_type(bytes: &[u8]) -> ContentType {
    if bytes.len() < MIN_SIGNATURE_LEN {
        return ContentType::default();
    }

    infer::get(bytes)
        .and_then(|kind| ContentType::from_mime_type(kind.mime_type()))
        .unwrap_or_default()
}
