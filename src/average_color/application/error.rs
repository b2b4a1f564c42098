use thiserror::Error;
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;

// 呼び出し元へはメッセージ文字列として返すため、ラップしたエラーはそのまま表示する
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Color averaging failed: {0}")]
    ColorAveragingFailed(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error(transparent)]
    DomainError(#[from] DomainError),

    #[error(transparent)]
    InfrastructureError(#[from] InfrastructureError),
}
