use std::sync::Arc;

use average_color::application::color_service::AverageColorService;
use average_color::config::Config;
use average_color::infrastructure::axum_handler::{app_router, AppState};
use average_color::infrastructure::color_averager::DefaultColorAverager;
use average_color::infrastructure::external_image_fetcher::DefaultExternalImageFetcher;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let image_fetcher = DefaultExternalImageFetcher::new(config.fetch_timeout)?;
    let color_service = AverageColorService::new(
        Arc::new(image_fetcher),
        Arc::new(DefaultColorAverager::new()),
    );
    let app = app_router(Arc::new(AppState {
        color_service: Arc::new(color_service),
    }));

    // サーバーの開始
    let addr = config.socket_addr()?;
    tracing::info!(%addr, "average color server listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
