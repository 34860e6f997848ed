//! Flat row-major grid shared by pixels, matches and colors.

use rayon::prelude::*;

/// A `width` × `height` grid stored row by row. Row 0 is the top of the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(col, row));
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, col: u32, row: u32) -> Option<&T> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row as usize * self.width as usize + col as usize)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// `(col, row, cell)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i as u32 % width, i as u32 / width, cell))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Like [`Grid::map`], spread across the rayon pool. Cell order is kept.
    pub fn par_map<U: Send>(&self, f: impl Fn(&T) -> U + Sync + Send) -> Grid<U>
    where
        T: Sync,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.par_iter().map(f).collect(),
        }
    }
}
