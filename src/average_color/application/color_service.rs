use std::sync::Arc;
use super::error::ApplicationError;
use tracing::{debug, info};

use crate::domain::color::Color;
use crate::domain::color_averager_trait::ColorAverager;
use crate::domain::error::DomainError;
use crate::infrastructure::external_image_fetcher::DefaultExternalImageFetcher;

pub struct AverageColorService {
    image_fetcher: Arc<DefaultExternalImageFetcher>,
    color_averager: Arc<dyn ColorAverager + Send + Sync>,
}

impl AverageColorService {
    pub fn new(
        image_fetcher: Arc<DefaultExternalImageFetcher>,
        color_averager: Arc<dyn ColorAverager + Send + Sync>,
    ) -> Self {
        Self {
            image_fetcher,
            color_averager,
        }
    }

    pub async fn average_color(&self, image_data: Vec<u8>) -> Result<Color, ApplicationError> {
        debug!(bytes = image_data.len(), "averaging image colors");

        // デコードと走査は CPU バウンドなのでブロッキングプールで実行する
        let averager = Arc::clone(&self.color_averager);
        let color = tokio::task::spawn_blocking(move || averager.average_color(&image_data))
            .await
            .map_err(|e| ApplicationError::ColorAveragingFailed(e.to_string()))??;

        Ok(color)
    }

    pub async fn average_color_from_url(&self, image_url: &str) -> Result<Color, ApplicationError> {
        if image_url.trim().is_empty() {
            return Err(DomainError::InvalidInput("missing url parameter".to_string()).into());
        }
        info!(url = %image_url, "fetching image");

        let image_data = self.image_fetcher.fetch_image_from_url_impl(image_url).await?;
        let color = self.average_color(image_data).await?;

        info!(url = %image_url, color = %color, "computed average color");
        Ok(color)
    }
}
