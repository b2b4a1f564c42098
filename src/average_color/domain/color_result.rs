use serde::Serialize;

use crate::domain::color::Color;

/// Body written for every request: either a color, or white plus the error message.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ColorResult {
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ColorResult {
    pub fn success(color: Color) -> Self {
        Self {
            color: color.to_hex(),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            color: Color::WHITE.to_hex(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
