//! Error taxonomy for the simulation core.

use thiserror::Error;

/// Errors raised by [`crate::GridSimulation`] and [`crate::Kernel`] construction
/// and by cell access.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("kernel must be a square 2D matrix: {reason}")]
    InvalidKernelShape { reason: String },

    #[error("kernel side length {side} must be odd")]
    InvalidKernelParity { side: usize },

    #[error("kernel side length {side} must be strictly smaller than the {width}x{height} grid")]
    KernelTooLarge {
        side: usize,
        width: usize,
        height: usize,
    },

    #[error("grid dimension {width}x{height} must be positive on both axes")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The rayon pool backing a parallel tick could not be built.
    #[error("failed to build tick thread pool: {0}")]
    ThreadPool(String),
}

impl SimulationError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        SimulationError::InvalidKernelShape {
            reason: reason.into(),
        }
    }
}
