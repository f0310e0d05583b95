use super::image::decode_labeled_image;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Multipart field name both endpoints read the image from.
pub const FILE_FIELD: &str = "file";

/// The image bytes sent to the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Body returned by the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub people: u32,
    pub chairs: u32,
    pub chairs_taken: u32,
    #[serde(default)]
    pub empty_chairs: Option<u32>,
    pub min_occupancy: f64,
    pub max_occupancy: f64,
    pub labeled_image_base64: String,
}

/// Body returned by the narrative endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeResponse {
    pub gemini_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub people: u32,
    pub chairs: u32,
    pub chairs_taken: u32,
    pub empty_chairs: u32,
    pub min_occupancy: f64,
    pub max_occupancy: f64,
}

impl Statistics {
    /// Occupancy range as shown on the page, e.g. `41.67% - 58.33%`.
    pub fn occupancy_range(&self) -> String {
        format!("{:.2}% - {:.2}%", self.min_occupancy, self.max_occupancy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub statistics: Statistics,
    /// JPEG bytes of the image with detections drawn on it.
    pub labeled_image: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeResult {
    pub narrative: String,
}

impl TryFrom<AnalysisResponse> for Statistics {
    type Error = Error;

    fn try_from(response: AnalysisResponse) -> Result<Self> {
        if response.chairs_taken > response.chairs {
            return Err(Error::malformed(format!(
                "{} chairs taken out of {}",
                response.chairs_taken, response.chairs
            )));
        }

        let (min, max) = (response.min_occupancy, response.max_occupancy);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max || min > 100.0 {
            return Err(Error::malformed(format!(
                "occupancy range {} - {} is not a valid percentage range",
                min, max
            )));
        }

        // More people than chairs pushes the upper bound past 100%.
        if max > 100.0 {
            debug!("Clamping upper occupancy bound {} to 100", max);
        }
        let max = max.min(100.0);

        let empty_chairs = response.chairs - response.chairs_taken;
        if let Some(reported) = response.empty_chairs {
            if reported != empty_chairs {
                warn!(
                    "Service reported {} empty chairs, using derived value {}",
                    reported, empty_chairs
                );
            }
        }

        Ok(Self {
            people: response.people,
            chairs: response.chairs,
            chairs_taken: response.chairs_taken,
            empty_chairs,
            min_occupancy: min,
            max_occupancy: max,
        })
    }
}

impl TryFrom<AnalysisResponse> for AnalysisResult {
    type Error = Error;

    fn try_from(mut response: AnalysisResponse) -> Result<Self> {
        let encoded = std::mem::take(&mut response.labeled_image_base64);
        let statistics = Statistics::try_from(response)?;
        let labeled_image = decode_labeled_image(&encoded)?;

        Ok(Self {
            statistics,
            labeled_image,
        })
    }
}

impl From<NarrativeResponse> for NarrativeResult {
    fn from(response: NarrativeResponse) -> Self {
        Self {
            narrative: response.gemini_analysis,
        }
    }
}
