//! Embedded media (pictures).

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Binary media stored in the package under `word/media/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Raw binary data
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Source path the media came from
    pub source_path: Option<String>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Resource {
    /// Create an image resource.
    pub fn image(data: Vec<u8>, mime_type: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            source_path: None,
            width,
            height,
        }
    }

    /// Set the source path.
    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Package part name for this resource, e.g. `image3.png`.
    pub fn part_name(&self, id: &str) -> String {
        format!("{}.{}", id, self.extension())
    }

    /// Get the file extension based on MIME type.
    pub fn extension(&self) -> &str {
        extension_for_mime(&self.mime_type)
    }
}

/// Extension used for a MIME type inside the package.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_new() {
        let res = Resource::image(vec![0xFF, 0xD8, 0xFF], "image/jpeg", 4, 3)
            .with_source_path("img/photo.jpg");
        assert_eq!(res.extension(), "jpg");
        assert_eq!(res.part_name("image1"), "image1.jpg");
        assert_eq!(res.data.len(), 3);
        assert_eq!(res.source_path.as_deref(), Some("img/photo.jpg"));
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/gif"), "gif");
        assert_eq!(extension_for_mime("application/octet-stream"), "bin");
    }
}
