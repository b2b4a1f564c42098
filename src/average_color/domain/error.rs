use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // 全ピクセルが白 (または面積ゼロ) で平均を取れない
    #[error("Image has no visible pixels to average")]
    NoVisiblePixels,
}
