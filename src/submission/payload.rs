use crate::{
    Result,
    analysis::ImagePayload,
    gallery::{AssetFetcher, GalleryReference},
};
use std::fmt;

/// Filename gallery images are re-uploaded under.
pub const GALLERY_FILENAME: &str = "selected_image.jpg";

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// What triggered a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Upload(UploadedFile),
    Gallery(GalleryReference),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload(file) => write!(f, "upload {}", file.filename),
            Self::Gallery(reference) => match reference.src.as_deref() {
                Some(src) => write!(f, "gallery {}", src),
                None => write!(f, "gallery <no source>"),
            },
        }
    }
}

/// Keeps `image/*` content types and falls back to JPEG for anything else.
fn image_content_type(content_type: Option<String>) -> String {
    content_type
        .map(|ct| ct.trim().to_string())
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}

impl From<UploadedFile> for ImagePayload {
    fn from(file: UploadedFile) -> Self {
        let content_type = image_content_type(file.content_type);
        ImagePayload::new(file.filename, content_type, file.bytes)
    }
}

/// Turns a trigger into the bytes to analyze. Gallery sources are validated
/// before anything is fetched.
pub async fn build_payload(source: ImageSource, fetcher: &dyn AssetFetcher) -> Result<ImagePayload> {
    match source {
        ImageSource::Upload(file) => Ok(file.into()),
        ImageSource::Gallery(reference) => {
            let src = reference.source()?;
            let asset = fetcher.fetch(src).await?;
            let content_type = image_content_type(asset.content_type);
            Ok(ImagePayload::new(GALLERY_FILENAME, content_type, asset.bytes))
        }
    }
}
