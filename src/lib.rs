//! Image to block mural converter.
//!
//! Downsamples an image to a grid of blocks, matches every block to the
//! nearest palette color and exports a preview image, build coordinates and
//! a material list.

pub mod grid;
pub mod matcher;
pub mod palette;
pub mod report;
pub mod resample;

pub use grid::Grid;
pub use matcher::{match_color, match_image, Matches};
pub use palette::{BlockFamily, Palette, PaletteEntry};
pub use report::BlockCounts;

use image::{DynamicImage, Rgb};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum McPixelateError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "Invalid dimensions: {source_w}x{source_h} image at {width_blocks} blocks wide \
         gives a {width_blocks}x{height_blocks} grid"
    )]
    InvalidDimensions {
        source_w: u32,
        source_h: u32,
        width_blocks: u32,
        height_blocks: u32,
    },
    #[error("Palette has no blocks")]
    EmptyPalette,
    #[error("Duplicate block name in palette: {0}")]
    DuplicateBlock(String),
}

pub type Result<T> = std::result::Result<T, McPixelateError>;

/// Conversion settings.
#[derive(Clone, Debug)]
pub struct Converter {
    width_blocks: u32,
    origin: (i64, i64),
    palette: Palette,
}

impl Converter {
    pub fn new(width_blocks: u32) -> Self {
        Self {
            width_blocks,
            origin: (0, 0),
            palette: Palette::builtin().clone(),
        }
    }

    /// Build coordinates of the upper left block.
    pub fn with_origin(mut self, x: i64, y: i64) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn open(&self, path: impl AsRef<Path>) -> Result<BlockImage> {
        let image = image::open(path.as_ref())?;
        debug!("Decoded {}", path.as_ref().display());
        self.convert(&image)
    }

    pub fn convert(&self, image: &DynamicImage) -> Result<BlockImage> {
        let (source_w, source_h) = (image.width(), image.height());
        let (width, height) = resample::block_dimensions(source_w, source_h, self.width_blocks)?;
        debug!(
            "Resampling {}x{} to {}x{} blocks against {} palette colors",
            source_w,
            source_h,
            width,
            height,
            self.palette.len()
        );

        let small = resample::downsample(image, width, height);
        let pixels = resample::pixel_grid(&small);
        let matches = match_image(&pixels, &self.palette);

        Ok(BlockImage {
            source: (source_w, source_h),
            origin: self.origin,
            pixels,
            matches,
        })
    }
}

/// A converted image. Grids are fixed once built.
#[derive(Clone, Debug)]
pub struct BlockImage {
    source: (u32, u32),
    origin: (i64, i64),
    pixels: Grid<Rgb<u8>>,
    matches: Matches,
}

impl BlockImage {
    /// Convert a file with the built-in palette and origin (0, 0).
    pub fn open(path: impl AsRef<Path>, width_blocks: u32) -> Result<Self> {
        Converter::new(width_blocks).open(path)
    }

    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source
    }

    pub fn block_width(&self) -> u32 {
        self.matches.dimensions().0
    }

    pub fn block_height(&self) -> u32 {
        self.matches.dimensions().1
    }

    pub fn origin(&self) -> (i64, i64) {
        self.origin
    }

    /// Downsampled colors before matching.
    pub fn pixels(&self) -> &Grid<Rgb<u8>> {
        &self.pixels
    }

    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    pub fn block_counts(&self) -> BlockCounts {
        BlockCounts::from_matches(&self.matches)
    }

    /// Block colors scaled back to the source size.
    pub fn preview(&self) -> image::RgbImage {
        let blocks = resample::grid_image(&self.matches.rgbs());
        resample::preview(&blocks, self.source.0, self.source.1)
    }

    /// Format follows the file extension.
    pub fn save_preview(&self, path: impl AsRef<Path>) -> Result<()> {
        self.preview().save(path.as_ref())?;
        info!("Wrote preview {}", path.as_ref().display());
        Ok(())
    }

    pub fn write_coordinates(&self, writer: impl std::io::Write) -> Result<()> {
        report::write_coordinates(writer, &self.matches.names(), self.origin)?;
        Ok(())
    }

    pub fn save_coordinates(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_coordinates(BufWriter::new(file))?;
        info!("Wrote coordinates {}", path.as_ref().display());
        Ok(())
    }

    pub fn save_summary_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        report::write_summary_json(
            BufWriter::new(file),
            &self.block_counts(),
            self.block_width(),
            self.block_height(),
        )?;
        info!("Wrote summary {}", path.as_ref().display());
        Ok(())
    }

    /// Material list on stdout.
    pub fn print_summary(&self) {
        print!("{}", self.block_counts());
    }
}
