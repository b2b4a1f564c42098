pub mod color_service;
pub mod error;
