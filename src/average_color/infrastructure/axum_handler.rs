use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::application::color_service::AverageColorService;
use crate::domain::color_result::ColorResult;
use crate::domain::response_format::ResponseFormat;

/// Results are stable per URL, so successful responses are cached for three days.
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=259200";

#[derive(Clone)]
pub struct AppState {
    pub color_service: Arc<AverageColorService>,
}

#[derive(Debug, Default, PartialEq)]
pub struct AverageColorParams {
    pub url: String,
    pub callback: String,
}

impl AverageColorParams {
    // 同じキーが複数ある場合は最初の値を使う
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut url = None;
        let mut callback = None;
        for (key, value) in pairs {
            match key.as_str() {
                "url" if url.is_none() => url = Some(value),
                "callback" if callback.is_none() => callback = Some(value),
                _ => {}
            }
        }
        Self {
            url: url.unwrap_or_default(),
            callback: callback.unwrap_or_default(),
        }
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/", get(average_color_handler))
        .fallback(average_color_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render(format: &ResponseFormat, status: StatusCode, result: &ColorResult) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, format.content_type())],
        format.render_body(result),
    )
        .into_response()
}

pub async fn average_color_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(pairs)) => AverageColorParams::from_pairs(pairs),
        Err(rejection) => {
            warn!(error = %rejection, "malformed query string");
            return render(
                &ResponseFormat::Json,
                StatusCode::INTERNAL_SERVER_ERROR,
                &ColorResult::failure(rejection.body_text()),
            );
        }
    };
    let format = ResponseFormat::from_callback(&params.callback);

    match state.color_service.average_color_from_url(&params.url).await {
        Ok(color) => {
            let mut response = render(&format, StatusCode::OK, &ColorResult::success(color));
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
            response
        }
        Err(e) => {
            warn!(url = %params.url, error = %e, "failed to compute average color");
            render(
                &format,
                StatusCode::INTERNAL_SERVER_ERROR,
                &ColorResult::failure(e.to_string()),
            )
        }
    }
}
