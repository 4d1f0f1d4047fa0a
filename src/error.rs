use thiserror::Error;

/// Errors raised while talking to the gallery host or decoding its media
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("invalid address: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
