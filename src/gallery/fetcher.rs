use super::Gallery;
use crate::{Error, Result};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// A fetched gallery asset.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedAsset {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, src: &str) -> Result<FetchedAsset>;
}

/// Fetches assets listed in the gallery; any other source is refused
/// before a request is made.
pub struct HttpAssetFetcher {
    client: reqwest::Client,
    gallery: Arc<Gallery>,
}

impl HttpAssetFetcher {
    pub fn new(gallery: Arc<Gallery>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, gallery })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, src: &str) -> Result<FetchedAsset> {
        let url = self.gallery.resolve(src)?;
        debug!("Fetching gallery asset {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::AssetFetch {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedAsset {
            content_type,
            bytes,
        })
    }
}
