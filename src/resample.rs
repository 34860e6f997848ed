//! Resampling between source resolution and block resolution.

use crate::grid::Grid;
use crate::{McPixelateError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Block grid size for `width_blocks` columns, keeping the aspect ratio.
///
/// Height is `floor(source_h * width_blocks / source_w)`. Zero in either
/// direction is rejected instead of producing an empty grid.
pub fn block_dimensions(source_w: u32, source_h: u32, width_blocks: u32) -> Result<(u32, u32)> {
    let invalid = |height_blocks| McPixelateError::InvalidDimensions {
        source_w,
        source_h,
        width_blocks,
        height_blocks,
    };

    if width_blocks == 0 || source_w == 0 || source_h == 0 {
        return Err(invalid(0));
    }

    let scale = width_blocks as f64 / source_w as f64;
    let height = (source_h as f64 * scale).floor();
    if height < 1.0 || height > u32::MAX as f64 {
        return Err(invalid(height as u32));
    }

    Ok((width_blocks, height as u32))
}

/// Shrink (or grow) to block resolution with a bicubic filter.
pub fn downsample(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = image.to_rgb8();
    if rgb.dimensions() == (width, height) {
        return rgb;
    }
    imageops::resize(&rgb, width, height, FilterType::CatmullRom)
}

/// Scale back up with nearest-neighbor so each block stays a flat square.
pub fn preview(blocks: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(blocks, width, height, FilterType::Nearest)
}

pub fn pixel_grid(image: &RgbImage) -> Grid<Rgb<u8>> {
    Grid::from_fn(image.width(), image.height(), |x, y| *image.get_pixel(x, y))
}

/// One pixel per cell.
pub fn grid_image(grid: &Grid<Rgb<u8>>) -> RgbImage {
    RgbImage::from_fn(grid.width(), grid.height(), |x, y| {
        grid.get(x, y).copied().unwrap_or(Rgb([0, 0, 0]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_dimensions_keep_aspect() {
        assert_eq!(block_dimensions(100, 50, 10).unwrap(), (10, 5));
        assert_eq!(block_dimensions(640, 480, 64).unwrap(), (64, 48));
        // floor, not round
        assert_eq!(block_dimensions(100, 59, 10).unwrap(), (10, 5));
    }

    #[test]
    fn test_block_dimensions_allow_upsampling() {
        assert_eq!(block_dimensions(4, 2, 8).unwrap(), (8, 4));
    }

    #[test]
    fn test_block_dimensions_reject_degenerate() {
        match block_dimensions(1000, 5, 10) {
            Err(McPixelateError::InvalidDimensions { height_blocks, .. }) => {
                assert_eq!(height_blocks, 0)
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(block_dimensions(100, 50, 0).is_err());
        assert!(block_dimensions(0, 50, 10).is_err());
    }

    #[test]
    fn test_downsample_dimensions() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 50, Rgb([10, 20, 30])));
        let small = downsample(&image, 10, 5);
        assert_eq!(small.dimensions(), (10, 5));
        // uniform input stays uniform
        assert!(small.pixels().all(|p| *p == Rgb([10, 20, 30])));
    }

    #[test]
    fn test_preview_is_blocky() {
        let mut blocks = RgbImage::new(2, 1);
        blocks.put_pixel(0, 0, Rgb([255, 0, 0]));
        blocks.put_pixel(1, 0, Rgb([0, 0, 255]));

        let big = preview(&blocks, 8, 4);
        assert_eq!(big.dimensions(), (8, 4));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(*big.get_pixel(x, y), Rgb([255, 0, 0]));
                assert_eq!(*big.get_pixel(x + 4, y), Rgb([0, 0, 255]));
            }
        }
    }

    #[test]
    fn test_pixel_grid_round_trip() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 0]));
        let grid = pixel_grid(&image);
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.get(2, 1), Some(&Rgb([2, 1, 0])));
        assert_eq!(grid_image(&grid), image);
    }
}
