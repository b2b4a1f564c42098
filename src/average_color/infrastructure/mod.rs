pub mod axum_handler;
pub mod color_averager;
pub mod error;
pub mod external_image_fetcher;
