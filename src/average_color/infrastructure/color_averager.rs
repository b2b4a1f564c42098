use crate::domain::color::Color;
use crate::domain::color_averager_trait::ColorAverager;
use crate::domain::error::DomainError;
use super::error::InfrastructureError;
use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;

pub struct DefaultColorAverager;

impl DefaultColorAverager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DefaultColorAverager {
    fn default() -> Self {
        Self::new()
    }
}

/// Alpha-premultiplies a 16-bit channel and downscales it to 8 bits.
fn premultiplied_8bit(channel: u16, alpha: u16) -> u64 {
    (channel as u64 * alpha as u64 / 0xffff) / 256
}

// 8bit -> 16bit (v * 257)
fn widen(channel: u8) -> u16 {
    channel as u16 * 257
}

#[derive(Default)]
struct ChannelTotals {
    count: u64,
    r: u64,
    g: u64,
    b: u64,
}

impl ChannelTotals {
    fn add(&mut self, [r, g, b, a]: [u16; 4]) {
        let r = premultiplied_8bit(r, a);
        let g = premultiplied_8bit(g, a);
        let b = premultiplied_8bit(b, a);

        // 真っ白 (全チャンネル飽和) のピクセルは平均に含めない
        if r < 255 || g < 255 || b < 255 {
            self.count += 1;
            self.r += r;
            self.g += g;
            self.b += b;
        }
    }

    fn average(&self) -> Result<Color, DomainError> {
        if self.count == 0 {
            return Err(DomainError::NoVisiblePixels);
        }
        Ok(Color::new(
            (self.r / self.count) as u8,
            (self.g / self.count) as u8,
            (self.b / self.count) as u8,
        ))
    }
}

impl ColorAverager for DefaultColorAverager {
    fn average_color(&self, image_bytes: &[u8]) -> Result<Color, InfrastructureError> {
        // フォーマットは中身から推測する (PNG, JPEG, ...)
        let reader = ImageReader::new(Cursor::new(image_bytes)).with_guessed_format()?;
        let img = reader.decode()?;

        let mut totals = ChannelTotals::default();
        let color_type = img.color();
        match &img {
            DynamicImage::ImageRgba16(buffer) => {
                buffer.pixels().for_each(|p| totals.add(p.0));
            }
            DynamicImage::ImageRgb16(buffer) => {
                buffer.pixels().for_each(|p| totals.add([p.0[0], p.0[1], p.0[2], 0xffff]));
            }
            // 8bit の画像はコピーせずに 1 ピクセルずつ広げる
            _ if color_type.bytes_per_pixel() == color_type.channel_count() => {
                for (_, _, p) in img.pixels() {
                    let [r, g, b, a] = p.0;
                    totals.add([widen(r), widen(g), widen(b), widen(a)]);
                }
            }
            _ => {
                img.to_rgba16().pixels().for_each(|p| totals.add(p.0));
            }
        }

        Ok(totals.average()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(img: impl Into<DynamicImage>, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.into().write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    fn encode_png(img: impl Into<DynamicImage>) -> Vec<u8> {
        encode(img, ImageFormat::Png)
    }

    #[test]
    fn test_single_pixel() {
        let img = RgbImage::from_pixel(1, 1, Rgb([10, 20, 30]));
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#0a141e");
    }

    #[test]
    fn test_white_pixels_are_ignored() {
        let img = RgbImage::from_fn(4, 4, |x, _| {
            if x < 2 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        });
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color, Color::new(0, 0, 0));
    }

    #[test]
    fn test_average_uses_integer_division() {
        let img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgb([10, 0, 255]) } else { Rgb([21, 255, 0]) }
        });
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color, Color::new(15, 127, 127));
    }

    #[test]
    fn test_all_white_image_has_no_visible_pixels() {
        let img = RgbImage::from_pixel(3, 3, Rgb([255, 255, 255]));
        let result = DefaultColorAverager::new().average_color(&encode_png(img));
        match result {
            Err(InfrastructureError::DomainErrorWrapper(DomainError::NoVisiblePixels)) => {}
            other => panic!("Expected NoVisiblePixels, got {:?}", other),
        }
    }

    #[test]
    fn test_sixteen_bit_channels_are_downscaled() {
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(1, 1, Rgb([0x0aff, 0x1400, 0x1e80]));
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#0a141e");
    }

    #[test]
    fn test_alpha_is_premultiplied() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 128]));
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#643219");

        // 完全に透明なピクセルは黒として数えられる
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([200, 100, 50, 0]) } else { Rgba([255, 255, 255, 255]) }
        });
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#000000");
    }

    #[test]
    fn test_jpeg_is_decoded() {
        let img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        let color = DefaultColorAverager::new().average_color(&encode(img, ImageFormat::Jpeg)).unwrap();
        // JPEG は非可逆なので近似で確認
        assert!(color.r < 8 && color.g < 8 && color.b < 8, "got {}", color);
    }

    #[test]
    fn test_grayscale_images() {
        let img = GrayImage::from_fn(2, 1, |x, _| if x == 0 { Luma([255]) } else { Luma([40]) });
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#282828");

        let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(1, 1, Luma([0x28ff]));
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#282828");
    }

    #[test]
    fn test_sixteen_bit_rgba_white_is_ignored() {
        let img: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([0xffff, 0xffff, 0xffff, 0xffff]) } else { Rgba([0x0aff, 0x1400, 0x1e80, 0xffff]) }
        });
        let color = DefaultColorAverager::new().average_color(&encode_png(img)).unwrap();
        assert_eq!(color.to_hex(), "#0a141e");
    }

    #[test]
    fn test_invalid_image_data() {
        let result = DefaultColorAverager::new().average_color(b"<html><body>not an image</body></html>");
        match result {
            Err(InfrastructureError::ImageLibError(_)) | Err(InfrastructureError::IoError(_)) => {}
            other => panic!("Expected ImageLibError or IoError for invalid image data, got {:?}", other),
        }
    }
}
