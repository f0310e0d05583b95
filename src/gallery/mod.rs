mod fetcher;

pub use fetcher::*;

use crate::{
    Error, Result,
    config::{GalleryConfig, GalleryImage, ServerConfig},
};
use reqwest::Url;
use std::path::Path;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// A clicked gallery thumbnail, carrying its `data-src` attribute as posted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryReference {
    pub src: Option<String>,
}

impl GalleryReference {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
        }
    }

    /// The source attribute, or `MissingSource` when absent or blank.
    pub fn source(&self) -> Result<&str> {
        match self.src.as_deref().map(str::trim) {
            Some(src) if !src.is_empty() => Ok(src),
            _ => Err(Error::MissingSource),
        }
    }
}

/// Thumbnails shown on the page and the base URL their sources resolve against.
#[derive(Debug, Clone)]
pub struct Gallery {
    base_url: Url,
    images: Vec<GalleryImage>,
}

impl Gallery {
    pub fn new(base_url: &str, images: Vec<GalleryImage>) -> Result<Self> {
        Ok(Self {
            base_url: directory_url(base_url)?,
            images,
        })
    }

    /// Builds the gallery from config, listing `gallery.dir` when no images
    /// are configured explicitly.
    pub async fn load(config: &GalleryConfig, server: &ServerConfig) -> Result<Self> {
        let images = if config.images.is_empty() {
            discover(Path::new(&config.dir)).await?
        } else {
            config.images.clone()
        };

        debug!("Gallery has {} images", images.len());
        Self::new(&config.resolved_base_url(server), images)
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// Resolves a posted source to the asset URL to fetch. Only sources
    /// listed in the gallery are accepted.
    pub fn resolve(&self, src: &str) -> Result<Url> {
        let image = self
            .images
            .iter()
            .find(|image| image.src == src)
            .ok_or_else(|| Error::UnknownGalleryImage(src.to_string()))?;
        resolve_source(&self.base_url, &image.src)
    }

    /// URL the page uses to display a thumbnail.
    pub fn thumbnail_url(&self, image: &GalleryImage) -> String {
        match resolve_source(&self.base_url, &image.src) {
            Ok(url) => url.to_string(),
            Err(_) => image.src.clone(),
        }
    }
}

/// Absolute http(s) sources are taken as configured; relative sources must
/// stay under `base_url`.
pub fn resolve_source(base_url: &Url, src: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(src) {
        if matches!(url.scheme(), "http" | "https") {
            return Ok(url);
        }
    }

    let url = base_url
        .join(src)
        .map_err(|e| Error::config(format!("Cannot resolve gallery source '{}': {}", src, e)))?;

    if url.origin() != base_url.origin() || !url.path().starts_with(base_url.path()) {
        return Err(Error::UnknownGalleryImage(src.to_string()));
    }
    Ok(url)
}

fn directory_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&normalized)
        .map_err(|e| Error::config(format!("Invalid gallery base_url '{}': {}", base_url, e)))
}

async fn discover(dir: &Path) -> Result<Vec<GalleryImage>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Gallery directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if !is_image || !entry.file_type().await?.is_file() {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            let alt = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(name)
                .replace(|c: char| c == '_' || c == '-', " ");
            images.push(GalleryImage {
                src: name.to_string(),
                alt,
            });
        }
    }

    images.sort_by(|a, b| a.src.cmp(&b.src));
    Ok(images)
}
