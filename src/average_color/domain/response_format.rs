use crate::domain::color_result::ColorResult;

/// Written verbatim when the body itself cannot be serialized.
pub const FALLBACK_BODY: &str = "{Error:\"Oops\",Color:\"#ffffff\"}";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    Json,
    Jsonp { callback: String },
}

impl ResponseFormat {
    // callback が空ならプレーンな JSON
    pub fn from_callback(callback: &str) -> Self {
        if callback.is_empty() {
            ResponseFormat::Json
        } else {
            ResponseFormat::Jsonp {
                callback: callback.to_string(),
            }
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "text/json",
            ResponseFormat::Jsonp { .. } => "text/jsonp",
        }
    }

    pub fn render_body(&self, result: &ColorResult) -> String {
        let json = serde_json::to_string(result).unwrap_or_else(|_| FALLBACK_BODY.to_string());
        match self {
            ResponseFormat::Json => json,
            ResponseFormat::Jsonp { callback } => format!("{}({})", callback, json),
        }
    }
}
