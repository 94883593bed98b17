//! Pixel transforms applied by the middle stages.

use image::DynamicImage;

use crate::config::ResizeFilter;

/// Resize to exactly `width` x `height`, ignoring aspect ratio.
pub fn resize(image: &DynamicImage, width: u32, height: u32, filter: ResizeFilter) -> DynamicImage {
    image.resize_exact(width, height, filter.into())
}

/// Collapse to a single 8-bit luminance channel. Alpha is discarded.
pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_resize_then_grayscale_is_500_square_luma() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1200, 800, Rgb([200, 30, 90])));
        let out = grayscale(&resize(&img, 500, 500, ResizeFilter::Lanczos3));
        assert_eq!(out.dimensions(), (500, 500));
        assert_eq!(out.color(), ColorType::L8);
    }

    #[test]
    fn test_resize_upscales_small_images() {
        let img = DynamicImage::new_rgb8(10, 20);
        let out = resize(&img, 500, 500, ResizeFilter::Nearest);
        assert_eq!(out.dimensions(), (500, 500));
    }

    #[test]
    fn test_grayscale_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 10])));
        let out = grayscale(&img);
        assert_eq!(out.color(), ColorType::L8);
        assert_eq!(out.dimensions(), (4, 4));
    }

    #[test]
    fn test_grayscale_keeps_neutral_values() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([128, 128, 128])));
        let out = grayscale(&img).to_luma8();
        assert!(out.pixels().all(|p| p.0[0] == 128));
    }
}
