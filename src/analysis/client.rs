use super::types::*;
use crate::{Error, Result, config::ServiceConfig};
use async_trait::async_trait;
use reqwest::{
    Url,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// The remote analysis service: occupancy statistics and a narrative.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, payload: &ImagePayload) -> Result<AnalysisResult>;

    async fn narrate(&self, payload: &ImagePayload) -> Result<NarrativeResult>;
}

pub struct HttpAnalysisClient {
    client: reqwest::Client,
    analyze_url: Url,
    narrative_url: Url,
}

impl HttpAnalysisClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            analyze_url: endpoint_url(&config.base_url, &config.analyze_path)?,
            narrative_url: endpoint_url(&config.base_url, &config.narrative_path)?,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    pub fn narrative_url(&self) -> &Url {
        &self.narrative_url
    }

    /// Posts the payload as multipart form data under the `file` field.
    async fn post_image(&self, url: &Url, payload: &ImagePayload) -> Result<reqwest::Response> {
        let form = Form::new().part(FILE_FIELD, file_part(payload)?);

        debug!(
            "POST {} with {} ({} bytes)",
            url,
            payload.filename,
            payload.bytes.len()
        );

        Ok(self.client.post(url.clone()).multipart(form).send().await?)
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, payload: &ImagePayload) -> Result<AnalysisResult> {
        let response = self.post_image(&self.analyze_url, payload).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Analysis {
                status: status.as_u16(),
            });
        }

        let body: AnalysisResponse = read_json(response).await?;
        debug!(
            "Analysis returned {} people, {}/{} chairs taken",
            body.people, body.chairs_taken, body.chairs
        );

        AnalysisResult::try_from(body)
    }

    async fn narrate(&self, payload: &ImagePayload) -> Result<NarrativeResult> {
        let response = self.post_image(&self.narrative_url, payload).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Narrative {
                status: status.as_u16(),
            });
        }

        let body: NarrativeResponse = read_json(response).await?;
        Ok(body.into())
    }
}

/// Multipart part for the image. A content type reqwest cannot parse is
/// replaced with `image/jpeg` rather than failing the request.
fn file_part(payload: &ImagePayload) -> Result<Part> {
    let part = || Part::bytes(payload.bytes.clone()).file_name(payload.filename.clone());

    match part().mime_str(&payload.content_type) {
        Ok(part) => Ok(part),
        Err(e) => {
            warn!(
                "Unusable content type '{}' for {}: {}",
                payload.content_type, payload.filename, e
            );
            Ok(part().mime_str("image/jpeg")?)
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| Error::malformed(e.to_string()))
}

/// Joins an endpoint path onto the base URL, keeping any path prefix the base
/// already carries.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined)
        .map_err(|e| Error::config(format!("Invalid endpoint URL '{}': {}", joined, e)))
}
