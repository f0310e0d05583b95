use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gallery image is missing its source")]
    MissingSource,

    #[error("Image is not in the gallery: {0}")]
    UnknownGalleryImage(String),

    #[error("Gallery image fetch failed: {status}")]
    AssetFetch { status: u16 },

    #[error("Analyze API Error: {status}")]
    Analysis { status: u16 },

    #[error("Narrative API Error: {status}")]
    Narrative { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Submission #{token} superseded by #{latest}")]
    Superseded { token: u64, latest: u64 },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// The text shown in the page's error region.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}
