//! Nearest palette color by squared RGB distance.

use crate::grid::Grid;
use crate::palette::Palette;
use image::Rgb;

#[inline]
fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&a, &b)| {
            let d = b as i32 - a as i32;
            (d * d) as u32
        })
        .sum()
}

/// Index and squared distance of the closest entry.
///
/// Only a strictly smaller distance replaces the running best, so the
/// earliest entry wins a tie.
pub fn nearest(pixel: Rgb<u8>, palette: &Palette) -> (usize, u32) {
    let mut best = (0, u32::MAX);
    for (i, entry) in palette.iter().enumerate() {
        let d = distance_sq(pixel.0, entry.rgb);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Name of the closest block for one pixel.
pub fn match_color(pixel: Rgb<u8>, palette: &Palette) -> &str {
    let (index, _) = nearest(pixel, palette);
    &palette.entries()[index].name
}

/// Matched palette indices for a whole pixel grid.
#[derive(Clone, Debug)]
pub struct Matches {
    palette: Palette,
    indices: Grid<usize>,
}

impl Matches {
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn indices(&self) -> &Grid<usize> {
        &self.indices
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.indices.dimensions()
    }

    /// Block name per cell.
    pub fn names(&self) -> Grid<&str> {
        self.indices
            .map(|&i| self.palette.entries()[i].name.as_str())
    }

    /// Palette color per cell.
    pub fn rgbs(&self) -> Grid<Rgb<u8>> {
        self.indices.map(|&i| Rgb(self.palette.entries()[i].rgb))
    }
}

/// Match every cell. Runs in parallel; result order is row-major like the input.
pub fn match_image(pixels: &Grid<Rgb<u8>>, palette: &Palette) -> Matches {
    let indices = pixels.par_map(|&pixel| nearest(pixel, palette).0);
    Matches { palette: palette.clone(), indices }
}
