//! Label image normalization
//!
//! Images arrive from either acquisition source in whatever channel layout
//! the decoder produced (grayscale, RGB, or RGBA). The text extractor wants
//! one consistent layout: three channels, BGR order. Nothing else is done
//! here; resizing, denoising, and contrast work are non-goals.

use image::DynamicImage;
use tracing::debug;

/// A normalized label image: tightly packed 3-channel BGR pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    /// Pixel data, `width * height * 3` bytes, BGR order.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl NormalizedImage {
    /// Channels per pixel after normalization.
    pub const CHANNELS: usize = 3;

    /// Dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reconstruct an RGB image, undoing the BGR channel order. Used when a
    /// backend needs a standard encoded image rather than a raw buffer.
    pub fn to_rgb(&self) -> image::RgbImage {
        let mut rgb = Vec::with_capacity(self.data.len());
        for pixel in self.data.chunks_exact(Self::CHANNELS) {
            rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }
}

/// Coerce a decoded image to the extractor's expected pixel layout.
///
/// One channel is replicated to three, a fourth (alpha) channel is dropped,
/// and three channels pass through untouched; the result is then reordered
/// to BGR.
pub fn normalize(image: &DynamicImage) -> NormalizedImage {
    let (width, height) = (image.width(), image.height());

    let data: Vec<u8> = match image {
        DynamicImage::ImageLuma8(gray) => gray
            .pixels()
            .flat_map(|p| {
                let v = p.0[0];
                [v, v, v]
            })
            .collect(),
        DynamicImage::ImageRgb8(rgb) => rgb
            .pixels()
            .flat_map(|p| [p.0[2], p.0[1], p.0[0]])
            .collect(),
        DynamicImage::ImageRgba8(rgba) => rgba
            .pixels()
            .flat_map(|p| [p.0[2], p.0[1], p.0[0]])
            .collect(),
        other => {
            debug!("coercing unusual pixel layout through RGB");
            other
                .to_rgb8()
                .pixels()
                .flat_map(|p| [p.0[2], p.0[1], p.0[0]])
                .collect()
        }
    };

    NormalizedImage {
        data,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    #[test]
    fn test_grayscale_replicated_to_three_channels() {
        let mut gray = GrayImage::new(2, 1);
        gray.put_pixel(0, 0, image::Luma([10]));
        gray.put_pixel(1, 0, image::Luma([200]));

        let normalized = normalize(&DynamicImage::ImageLuma8(gray));
        assert_eq!(normalized.data, vec![10, 10, 10, 200, 200, 200]);
        assert_eq!(normalized.data.len(), 2 * 1 * NormalizedImage::CHANNELS);
    }

    #[test]
    fn test_rgb_reordered_to_bgr() {
        let mut rgb = RgbImage::new(1, 1);
        rgb.put_pixel(0, 0, image::Rgb([1, 2, 3]));

        let normalized = normalize(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(normalized.data, vec![3, 2, 1]);
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, image::Rgba([1, 2, 3, 128]));

        let normalized = normalize(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(normalized.data, vec![3, 2, 1]);
    }

    #[test]
    fn test_grayscale_and_rgba_of_same_picture_agree() {
        // Same logical picture: a single gray pixel of value 77
        let mut gray = GrayImage::new(1, 1);
        gray.put_pixel(0, 0, image::Luma([77]));
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, image::Rgba([77, 77, 77, 255]));

        let from_gray = normalize(&DynamicImage::ImageLuma8(gray));
        let from_rgba = normalize(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(from_gray, from_rgba);
    }

    #[test]
    fn test_to_rgb_round_trip() {
        let mut rgb = RgbImage::new(2, 2);
        rgb.put_pixel(0, 0, image::Rgb([5, 10, 15]));
        rgb.put_pixel(1, 1, image::Rgb([200, 100, 50]));

        let normalized = normalize(&DynamicImage::ImageRgb8(rgb.clone()));
        assert_eq!(normalized.to_rgb(), rgb);
    }
}
