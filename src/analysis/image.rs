use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_SOI)
}

/// Decodes the service's `labeled_image_base64` field into JPEG bytes.
pub fn decode_labeled_image(encoded: &str) -> Result<Vec<u8>> {
    let bytes = STANDARD.decode(encoded.trim())?;
    if !is_jpeg(&bytes) {
        return Err(Error::malformed("labeled image is not a JPEG"));
    }
    Ok(bytes)
}

pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

pub fn jpeg_data_uri(bytes: &[u8]) -> String {
    data_uri("image/jpeg", bytes)
}
