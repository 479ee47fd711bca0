//! Padded grid storage and the read-only logical view.

use std::ops::Index;

/// A `width x height` logical grid stored inside a zero ring of width `pad`.
///
/// Storage is row-major over the padded extent: logical `(x, y)` lives at
/// `(y + pad) * stride + (x + pad)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedGrid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) pad: usize,
    pub(crate) cells: Vec<f64>,
}

impl PaddedGrid {
    /// Allocate an all-zero grid, padding included.
    pub(crate) fn new(width: usize, height: usize, pad: usize) -> Self {
        let size = (width + 2 * pad) * (height + 2 * pad);
        PaddedGrid {
            width,
            height,
            pad,
            cells: vec![0.0; size],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Row length of the padded storage.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width + 2 * self.pad
    }

    /// Number of rows of the padded storage.
    #[inline]
    pub fn padded_height(&self) -> usize {
        self.height + 2 * self.pad
    }

    /// Storage index of a logical coordinate. Caller checks bounds.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        (y + self.pad) * self.stride() + (x + self.pad)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.index_of(x, y)])
        } else {
            None
        }
    }

    /// Write a logical cell. Returns false, leaving the grid untouched, when
    /// `(x, y)` is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index_of(x, y);
        self.cells[idx] = value;
        true
    }

    /// Logical row `y` without its padding.
    #[inline]
    pub fn row(&self, y: usize) -> &[f64] {
        let start = self.index_of(0, y);
        &self.cells[start..start + self.width]
    }

    /// Set every logical cell, leaving the padding at zero.
    pub fn fill(&mut self, value: f64) {
        let stride = self.stride();
        for y in 0..self.height {
            let start = (y + self.pad) * stride + self.pad;
            self.cells[start..start + self.width].fill(value);
        }
    }

    /// Raw padded storage.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// True when every cell of the padding ring is zero.
    #[cfg(test)]
    pub(crate) fn padding_is_zero(&self) -> bool {
        let stride = self.stride();
        self.cells.iter().enumerate().all(|(idx, &value)| {
            let (px, py) = (idx % stride, idx / stride);
            let interior = px >= self.pad
                && px < self.pad + self.width
                && py >= self.pad
                && py < self.pad + self.height;
            interior || value == 0.0
        })
    }

    pub fn view(&self) -> GridView<'_> {
        GridView { grid: self }
    }
}

/// Read-only view of the logical grid, padding excluded.
///
/// Indexed by `(x, y)`. `rows()` yields rows top to bottom (increasing `y`),
/// each row ordered by increasing `x`.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a PaddedGrid,
}

impl<'a> GridView<'a> {
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.grid.get(x, y)
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [f64]> + 'a {
        let grid = self.grid;
        (0..grid.height).map(move |y| grid.row(y))
    }

    /// Row-major copy of the logical grid.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width() * self.height());
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Copy the logical grid row-major into `out_buf`.
    ///
    /// # Returns
    /// Number of values written, or 0 if the buffer is too small.
    pub fn copy_into(&self, out_buf: &mut [f64]) -> usize {
        let total = self.width() * self.height();
        if out_buf.len() < total {
            return 0;
        }

        let mut offset = 0;
        for row in self.rows() {
            out_buf[offset..offset + row.len()].copy_from_slice(row);
            offset += row.len();
        }

        offset
    }
}

impl Index<(usize, usize)> for GridView<'_> {
    type Output = f64;

    fn index(&self, (x, y): (usize, usize)) -> &f64 {
        assert!(
            self.grid.in_bounds(x, y),
            "cell ({}, {}) outside {}x{} view",
            x,
            y,
            self.grid.width,
            self.grid.height
        );
        &self.grid.cells[self.grid.index_of(x, y)]
    }
}
