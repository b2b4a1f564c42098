use crate::domain::color::Color;
use crate::infrastructure::error::InfrastructureError;

// 画像のバイト列を受け取り、白以外のピクセルの平均色を返す
#[cfg_attr(test, mockall::automock)]
pub trait ColorAverager {
    fn average_color(&self, image_bytes: &[u8]) -> Result<Color, InfrastructureError>;
}
