//! Convolution kernel: a square matrix of `f64` weights.
//!
//! Weights are addressed as `weight(i, j)` where `i` runs along the x axis and
//! `j` along the y axis, matching the `(x, y)` addressing of the grid. The
//! weight at `(i, j)` multiplies the neighbor at offset `(i - p, j - p)`.

use crate::error::SimulationError;

/// An immutable square convolution kernel.
///
/// Shape (square, two axes) is checked here. Parity and the fit against a
/// particular grid are checked when the kernel is handed to
/// [`crate::GridSimulation::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>, // i-major: weights[i * side + j]
}

impl Kernel {
    /// Build a kernel from nested vectors. The outer index is `i` (x offset).
    pub fn new(weights: Vec<Vec<f64>>) -> Result<Self, SimulationError> {
        let side = weights.len();
        if side == 0 {
            return Err(SimulationError::shape("kernel has no rows"));
        }

        let mut flat = Vec::with_capacity(side * side);
        for (i, row) in weights.into_iter().enumerate() {
            if row.len() != side {
                return Err(SimulationError::shape(format!(
                    "row {} has {} weights, expected {}",
                    i,
                    row.len(),
                    side
                )));
            }
            flat.extend(row);
        }

        Ok(Kernel {
            side,
            weights: flat,
        })
    }

    /// Build a kernel from an n-dimensional shape and flat i-major weights.
    ///
    /// Anything other than exactly two equal, non-zero axes is rejected.
    pub fn from_shape(shape: &[usize], weights: Vec<f64>) -> Result<Self, SimulationError> {
        let (rows, cols) = match *shape {
            [rows, cols] => (rows, cols),
            _ => {
                return Err(SimulationError::shape(format!(
                    "expected 2 axes, got {}",
                    shape.len()
                )))
            }
        };

        if rows == 0 || cols == 0 {
            return Err(SimulationError::shape(format!(
                "shape {}x{} is empty",
                rows, cols
            )));
        }
        if rows != cols {
            return Err(SimulationError::shape(format!(
                "shape {}x{} is not square",
                rows, cols
            )));
        }
        if weights.len() != rows * cols {
            return Err(SimulationError::shape(format!(
                "shape {}x{} needs {} weights, got {}",
                rows,
                cols,
                rows * cols,
                weights.len()
            )));
        }

        Ok(Kernel {
            side: rows,
            weights,
        })
    }

    /// All-zero kernel.
    pub fn zeros(side: usize) -> Self {
        Kernel {
            side,
            weights: vec![0.0; side * side],
        }
    }

    /// 1 at the center, 0 elsewhere. Leaves the grid unchanged when applied.
    pub fn identity(side: usize) -> Self {
        let mut kernel = Self::zeros(side);
        if side > 0 {
            let center = side / 2;
            kernel.weights[center * side + center] = 1.0;
        }
        kernel
    }

    /// Uniform mean filter: every weight is `1 / side²`.
    pub fn box_blur(side: usize) -> Self {
        let weight = 1.0 / (side * side) as f64;
        Kernel {
            side,
            weights: vec![weight; side * side],
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Convolution radius `p`, where `side = 2p + 1`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.side.saturating_sub(1) / 2
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.side + j]
    }

    /// Flat i-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn is_odd(&self) -> bool {
        self.side % 2 == 1
    }
}
