//! The grid simulation state machine.

use std::fmt;

use rayon::ThreadPool;

use crate::automaton::grid::{GridView, PaddedGrid};
use crate::automaton::kernel::Kernel;
use crate::automaton::stepping::{step_parallel, step_sequential};
use crate::error::SimulationError;

/// A padded 2D grid advanced one tick at a time by a fixed convolution kernel.
///
/// Ticks are double-buffered: the next generation is written into `next`
/// while `grid` is read, then the two buffers are swapped.
pub struct GridSimulation {
    grid: PaddedGrid,
    next: PaddedGrid,
    kernel: Kernel,
    pad: usize,
    generation: u64,
    thread_pool: Option<ThreadPool>,
}

impl GridSimulation {
    /// Create an all-zero simulation of `dimension = (width, height)`.
    ///
    /// # Errors
    /// - `InvalidDimension` if either axis is zero
    /// - `InvalidKernelParity` if the kernel side is even
    /// - `KernelTooLarge` if the kernel side is not strictly below both axes
    pub fn new(dimension: (usize, usize), kernel: Kernel) -> Result<Self, SimulationError> {
        let (width, height) = dimension;
        validate(width, height, &kernel)?;

        let pad = kernel.radius();
        log::debug!(
            "created {}x{} simulation, kernel side {}, padding {}",
            width,
            height,
            kernel.side(),
            pad
        );

        Ok(GridSimulation {
            grid: PaddedGrid::new(width, height, pad),
            next: PaddedGrid::new(width, height, pad),
            kernel,
            pad,
            generation: 0,
            thread_pool: None,
        })
    }

    /// Like [`GridSimulation::new`], but ticks are computed on a rayon pool of
    /// `num_threads` workers (0 is treated as 1).
    pub fn with_threads(
        dimension: (usize, usize),
        kernel: Kernel,
        num_threads: usize,
    ) -> Result<Self, SimulationError> {
        let mut sim = Self::new(dimension, kernel)?;
        let num_threads = num_threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;

        log::debug!("tick thread pool: {} threads", num_threads);
        sim.thread_pool = Some(pool);
        Ok(sim)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn dimension(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Width of the zero ring around the logical grid (the kernel radius).
    #[inline]
    pub fn padding(&self) -> usize {
        self.pad
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Number of ticks applied since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_parallel(&self) -> bool {
        self.thread_pool.is_some()
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> SimulationError {
        SimulationError::CellOutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Write one logical cell.
    pub fn set_cell(&mut self, x: usize, y: usize, value: f64) -> Result<(), SimulationError> {
        if self.grid.set(x, y, value) {
            Ok(())
        } else {
            Err(self.out_of_bounds(x, y))
        }
    }

    /// Read one logical cell.
    pub fn get_cell(&self, x: usize, y: usize) -> Result<f64, SimulationError> {
        self.grid.get(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Set every logical cell to `value`.
    pub fn fill(&mut self, value: f64) {
        self.grid.fill(value);
    }

    /// Reset every logical cell to zero.
    pub fn clear(&mut self) {
        self.grid.fill(0.0);
    }

    /// Sum of all logical cells.
    pub fn total(&self) -> f64 {
        self.view().rows().map(|row| row.iter().sum::<f64>()).sum()
    }

    /// Read-only view of the logical grid for display.
    pub fn view(&self) -> GridView<'_> {
        self.grid.view()
    }

    /// Advance by one tick.
    ///
    /// Every cell becomes the kernel-weighted sum of its pre-tick
    /// neighborhood, with the padding ring contributing zeros.
    pub fn advance_tick(&mut self) {
        match &self.thread_pool {
            Some(pool) => step_parallel(&self.grid, &mut self.next, &self.kernel, pool),
            None => step_sequential(&self.grid, &mut self.next, &self.kernel),
        }

        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;
        log::trace!("advanced to generation {}", self.generation);
    }

    /// Advance by `ticks` ticks.
    pub fn advance_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.advance_tick();
        }
    }
}

impl fmt::Debug for GridSimulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSimulation")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("kernel_side", &self.kernel.side())
            .field("generation", &self.generation)
            .field("parallel", &self.is_parallel())
            .finish()
    }
}

fn validate(width: usize, height: usize, kernel: &Kernel) -> Result<(), SimulationError> {
    if width == 0 || height == 0 {
        return Err(SimulationError::InvalidDimension { width, height });
    }

    let side = kernel.side();
    if !kernel.is_odd() {
        return Err(SimulationError::InvalidKernelParity { side });
    }
    if side >= width || side >= height {
        return Err(SimulationError::KernelTooLarge {
            side,
            width,
            height,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blur_5x5() -> GridSimulation {
        GridSimulation::new((5, 5), Kernel::box_blur(3)).unwrap()
    }

    #[test]
    fn test_new_simulation() {
        let sim = GridSimulation::new((8, 6), Kernel::identity(5)).unwrap();
        assert_eq!(sim.dimension(), (8, 6));
        assert_eq!(sim.padding(), 2);
        assert_eq!(sim.generation(), 0);
        assert!(!sim.is_parallel());
        assert!(sim.view().to_vec().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_invalid_dimension() {
        assert_eq!(
            GridSimulation::new((0, 5), Kernel::identity(3)).unwrap_err(),
            SimulationError::InvalidDimension {
                width: 0,
                height: 5
            }
        );
        assert!(matches!(
            GridSimulation::new((5, 0), Kernel::identity(3)),
            Err(SimulationError::InvalidDimension { .. })
        ));
        // Dimension is reported before the kernel fit
        assert!(matches!(
            GridSimulation::new((0, 0), Kernel::identity(3)),
            Err(SimulationError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_even_kernel_rejected() {
        assert_eq!(
            GridSimulation::new((8, 8), Kernel::box_blur(4)).unwrap_err(),
            SimulationError::InvalidKernelParity { side: 4 }
        );
        assert!(matches!(
            GridSimulation::new((8, 8), Kernel::zeros(2)),
            Err(SimulationError::InvalidKernelParity { side: 2 })
        ));
    }

    #[test]
    fn test_kernel_too_large() {
        // Equal to a dimension is too large
        assert_eq!(
            GridSimulation::new((3, 10), Kernel::identity(3)).unwrap_err(),
            SimulationError::KernelTooLarge {
                side: 3,
                width: 3,
                height: 10
            }
        );
        assert!(matches!(
            GridSimulation::new((10, 5), Kernel::identity(7)),
            Err(SimulationError::KernelTooLarge { .. })
        ));
        assert!(GridSimulation::new((4, 4), Kernel::identity(3)).is_ok());
    }

    #[test]
    fn test_single_weight_kernel() {
        let sim = GridSimulation::new((2, 2), Kernel::new(vec![vec![2.0]]).unwrap()).unwrap();
        assert_eq!(sim.padding(), 0);
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut sim = blur_5x5();

        for y in 0..5 {
            for x in 0..5 {
                let value = (x * 10 + y) as f64 - 12.5;
                sim.set_cell(x, y, value).unwrap();
                assert_eq!(sim.get_cell(x, y).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_has_no_effect() {
        let mut sim = blur_5x5();
        sim.set_cell(1, 1, 4.0).unwrap();
        let before = sim.view().to_vec();

        assert_eq!(
            sim.set_cell(5, 0, 1.0),
            Err(SimulationError::CellOutOfBounds {
                x: 5,
                y: 0,
                width: 5,
                height: 5
            })
        );
        assert!(sim.set_cell(0, 5, 1.0).is_err());
        assert!(sim.set_cell(usize::MAX, usize::MAX, 1.0).is_err());
        assert!(matches!(
            sim.get_cell(0, 7),
            Err(SimulationError::CellOutOfBounds { .. })
        ));

        assert_eq!(sim.view().to_vec(), before);
        assert!(sim.grid.padding_is_zero());
    }

    #[test]
    fn test_box_blur_center_seed() {
        let mut sim = blur_5x5();
        sim.set_cell(2, 2, 9.0).unwrap();

        sim.advance_tick();

        for y in 0..5 {
            for x in 0..5 {
                let value = sim.get_cell(x, y).unwrap();
                if (1..=3).contains(&x) && (1..=3).contains(&y) {
                    assert_relative_eq!(value, 1.0);
                } else {
                    assert_eq!(value, 0.0, "cell ({}, {}) should stay empty", x, y);
                }
            }
        }
    }

    #[test]
    fn test_box_blur_corner_uses_zero_border() {
        let mut sim = blur_5x5();
        sim.set_cell(0, 0, 9.0).unwrap();

        sim.advance_tick();

        // Only the seed contributes; padding reads are zero, nothing wraps
        assert_relative_eq!(sim.get_cell(0, 0).unwrap(), 1.0);
        assert_relative_eq!(sim.get_cell(1, 1).unwrap(), 1.0);
        assert_eq!(sim.get_cell(4, 4).unwrap(), 0.0);
        assert_eq!(sim.get_cell(4, 0).unwrap(), 0.0);
        assert_eq!(sim.get_cell(0, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_generation_increments() {
        let mut sim = blur_5x5();
        assert_eq!(sim.generation(), 0);

        sim.advance_tick();
        assert_eq!(sim.generation(), 1);

        sim.advance_ticks(3);
        assert_eq!(sim.generation(), 4);
    }

    #[test]
    fn test_zero_kernel_clears_grid() {
        let mut sim = GridSimulation::new((6, 6), Kernel::zeros(3)).unwrap();
        sim.fill(5.0);

        sim.advance_tick();

        assert!(sim.view().to_vec().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_identity_kernel_fixed_point() {
        let mut sim = GridSimulation::new((7, 6), Kernel::identity(5)).unwrap();
        for y in 0..6 {
            for x in 0..7 {
                sim.set_cell(x, y, (x + 7 * y) as f64 * 0.5).unwrap();
            }
        }
        let before = sim.view().to_vec();

        sim.advance_ticks(3);

        assert_eq!(sim.view().to_vec(), before);
    }

    #[test]
    fn test_padding_stays_zero_after_ticks() {
        let mut sim = GridSimulation::new((6, 5), Kernel::box_blur(3)).unwrap();
        sim.fill(1.0);

        sim.advance_ticks(4);

        assert!(sim.grid.padding_is_zero());
        assert!(sim.next.padding_is_zero());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let kernel = Kernel::new(vec![
            vec![0.05, 0.1, 0.05],
            vec![0.1, 0.4, 0.1],
            vec![0.05, 0.1, 0.05],
        ])
        .unwrap();
        let mut sequential = GridSimulation::new((12, 9), kernel.clone()).unwrap();
        let mut parallel = GridSimulation::with_threads((12, 9), kernel, 3).unwrap();
        assert!(parallel.is_parallel());

        for (x, y, value) in [(0, 0, 10.0), (5, 4, -3.0), (11, 8, 7.5), (6, 0, 2.0)] {
            sequential.set_cell(x, y, value).unwrap();
            parallel.set_cell(x, y, value).unwrap();
        }

        sequential.advance_ticks(5);
        parallel.advance_ticks(5);

        assert_eq!(sequential.view().to_vec(), parallel.view().to_vec());
        assert_eq!(parallel.generation(), 5);
    }

    #[test]
    fn test_with_zero_threads() {
        let sim = GridSimulation::with_threads((5, 5), Kernel::identity(3), 0).unwrap();
        assert!(sim.is_parallel());
    }

    #[test]
    fn test_kernel_copied_at_construction() {
        let kernel = Kernel::box_blur(3);
        let sim = GridSimulation::new((5, 5), kernel.clone()).unwrap();
        drop(kernel);
        assert_eq!(sim.kernel(), &Kernel::box_blur(3));
    }

    #[test]
    fn test_fill_clear_total() {
        let mut sim = blur_5x5();
        sim.fill(2.0);
        assert_relative_eq!(sim.total(), 50.0);

        sim.clear();
        assert_eq!(sim.total(), 0.0);
    }
}
