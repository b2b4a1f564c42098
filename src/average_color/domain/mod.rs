pub mod color;
pub mod color_averager_trait;
pub mod color_result;
pub mod error;
pub mod response_format;
