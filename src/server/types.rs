use serde::{Deserialize, Serialize};

/// Form posted by a gallery thumbnail.
#[derive(Debug, Deserialize)]
pub struct GallerySelection {
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
