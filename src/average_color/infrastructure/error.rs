use thiserror::Error;
use crate::domain::error::DomainError;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Failed to fetch image: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Failed to fetch image: upstream responded with {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Data decoding failed: {0}")]
    DecodingError(String),

    #[error("Data decoding failed: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error("Failed to decode image: {0}")]
    ImageLibError(#[from] image::ImageError),

    #[error("I/O error while reading image: {0}")]
    IoError(#[from] std::io::Error),

    // ColorAverager の実装が返すドメインエラー (NoVisiblePixels など)
    #[error(transparent)]
    DomainErrorWrapper(#[from] DomainError),
}
