//! Captured image value object

use std::fmt;

/// Supported image MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageMimeType {
    #[default]
    Png,
    Jpeg,
}

impl ImageMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value object holding raw captured image bytes.
/// Lives for the duration of a single pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    data: Vec<u8>,
    mime_type: ImageMimeType,
}

impl ImageData {
    /// Create ImageData from raw bytes
    pub fn new(data: Vec<u8>, mime_type: ImageMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Get the raw image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw image bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> ImageMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Cheap summary for observable pipeline state
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            size_bytes: self.size_bytes(),
            mime_type: self.mime_type,
        }
    }
}

/// Lightweight image summary carried in observable state instead of the
/// full byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub size_bytes: usize,
    pub mime_type: ImageMimeType,
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} B)", self.mime_type, self.size_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_strings() {
        assert_eq!(ImageMimeType::Png.as_str(), "image/png");
        assert_eq!(ImageMimeType::Jpeg.as_str(), "image/jpeg");
        assert_eq!(ImageMimeType::Png.extension(), "png");
        assert_eq!(ImageMimeType::Jpeg.extension(), "jpg");
    }

    #[test]
    fn default_mime_type_is_png() {
        assert_eq!(ImageMimeType::default(), ImageMimeType::Png);
    }

    #[test]
    fn image_data_size() {
        let image = ImageData::new(vec![0u8; 2048], ImageMimeType::Png);
        assert_eq!(image.size_bytes(), 2048);
        assert_eq!(image.human_readable_size(), "2.0 KB");
    }

    #[test]
    fn human_readable_size_bytes_and_mb() {
        let small = ImageData::new(vec![0u8; 500], ImageMimeType::Png);
        assert_eq!(small.human_readable_size(), "500 B");

        let large = ImageData::new(vec![0u8; 3 * 1024 * 1024], ImageMimeType::Jpeg);
        assert_eq!(large.human_readable_size(), "3.0 MB");
    }

    #[test]
    fn info_summarizes_without_bytes() {
        let image = ImageData::new(vec![1, 2, 3], ImageMimeType::Png);
        let info = image.info();
        assert_eq!(info.size_bytes, 3);
        assert_eq!(info.mime_type, ImageMimeType::Png);
    }
}
