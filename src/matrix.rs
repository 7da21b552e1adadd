use std::ops::{Index, IndexMut};

/// A dense, rectangular matrix of `f64`.
///
/// Used for every per-layer table in the crate: rows are layers (or the
/// `prev` node of a connectivity layer) and every row is as wide as the
/// largest layer, so short layers leave unused padding at the end of the row.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Mat {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns the full row `r`, padding included.
    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row {} out of range ({})", r, self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        assert!(r < self.rows, "row {} out of range ({})", r, self.rows);
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Resets every entry, padding included, to zero.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    fn offset(&self, r: usize, c: usize) -> usize {
        assert!(
            r < self.rows && c < self.cols,
            "index ({}, {}) out of range ({}x{})",
            r,
            c,
            self.rows,
            self.cols
        );
        r * self.cols + c
    }
}

impl Index<(usize, usize)> for Mat {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[self.offset(r, c)]
    }
}

impl IndexMut<(usize, usize)> for Mat {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        let i = self.offset(r, c);
        &mut self.data[i]
    }
}
