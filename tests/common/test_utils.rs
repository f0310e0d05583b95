use base64::{Engine as _, engine::general_purpose::STANDARD};
use occupancy_front::{
    analysis::{AnalysisResult, Statistics},
    config::ServiceConfig,
    submission::{ImageSource, UploadedFile},
    view::ViewModel,
};
use serde_json::{Value, json};
use std::time::Duration;

/// Smallest byte sequence that passes as a JPEG (SOI, APP0 marker, EOI)
pub const TINY_JPEG: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9];

/// Statistics for a room with ten chairs, computed the way the analysis
/// service does: taken chairs over chairs, people over chairs
pub fn sample_statistics(people: u32) -> Statistics {
    let chairs_taken = people.min(10);
    Statistics {
        people,
        chairs: 10,
        chairs_taken,
        empty_chairs: 10 - chairs_taken,
        min_occupancy: chairs_taken as f64 * 10.0,
        max_occupancy: people as f64 * 10.0,
    }
}

pub fn analysis_result(people: u32) -> AnalysisResult {
    AnalysisResult {
        statistics: sample_statistics(people),
        labeled_image: TINY_JPEG.to_vec(),
    }
}

/// Analysis endpoint body as the remote service sends it
pub fn analysis_body(people: u32) -> Value {
    let stats = sample_statistics(people);
    json!({
        "people": stats.people,
        "chairs": stats.chairs,
        "chairs_taken": stats.chairs_taken,
        "min_occupancy": stats.min_occupancy,
        "max_occupancy": stats.max_occupancy,
        "labeled_image_base64": STANDARD.encode(TINY_JPEG),
    })
}

pub fn narrative_body(text: &str) -> Value {
    json!({ "gemini_analysis": text })
}

pub fn upload(filename: &str) -> ImageSource {
    ImageSource::Upload(UploadedFile {
        filename: filename.to_string(),
        content_type: Some("image/jpeg".to_string()),
        bytes: format!("image-bytes-of-{}", filename).into_bytes(),
    })
}

pub fn create_service_config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.to_string(),
        analyze_path: "/analyze-image".to_string(),
        narrative_path: "/llm-analyze".to_string(),
        timeout_secs: 5,
    }
}

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks the invariants every rendered statistics block must hold
pub fn assert_consistent_statistics(view: &ViewModel) {
    let stats = view
        .statistics
        .as_ref()
        .expect("statistics region should be visible");
    assert!(stats.chairs_taken <= stats.chairs);
    assert_eq!(stats.empty_chairs, stats.chairs - stats.chairs_taken);
    assert!(0.0 <= stats.min_occupancy);
    assert!(stats.min_occupancy <= stats.max_occupancy);
    assert!(stats.max_occupancy <= 100.0);
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8081
  max_upload_bytes: 1048576
  logs:
    level: "debug"

service:
  base_url: "http://analysis.local:8000"
  timeout_secs: 30

gallery:
  dir: "static/gallery"
  images:
    - src: "lecture_hall.jpg"
      alt: "Lecture hall"
    - src: "library.jpg"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
