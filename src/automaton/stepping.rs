//! The convolution pass.
//!
//! Every function here reads only from an immutable generation-N `source` and
//! writes only into a generation-N+1 `target` of identical shape. Each output
//! cell depends on the source alone, so the order cells (or rows) are visited
//! in never changes the result.

use rayon::prelude::*;
use rayon::ThreadPool;

use super::grid::PaddedGrid;
use super::kernel::Kernel;

/// Weighted sum of the neighborhood of logical cell `(x, y)` in `source`.
///
/// The kernel radius must equal the grid padding, which lets the neighbor at
/// offset `(i - p, j - p)` be read at storage `(x + i, y + j)` with no bounds
/// checks: the padding ring supplies the zeros beyond the edge. `(x, y)` must be
/// in bounds; the step functions below check the pairing once per pass.
#[inline]
pub(crate) fn convolve_cell(source: &PaddedGrid, kernel: &Kernel, x: usize, y: usize) -> f64 {
    let side = kernel.side();
    let stride = source.stride();
    let weights = kernel.weights();

    let mut sum = 0.0;
    for i in 0..side {
        let column = x + i;
        for j in 0..side {
            sum += weights[i * side + j] * source.cells[(y + j) * stride + column];
        }
    }
    sum
}

/// Fill one padded storage row of the target.
///
/// Rows in the top/bottom padding band and the left/right padding columns are
/// written as zero; interior cells get their convolution sum.
fn write_row(source: &PaddedGrid, kernel: &Kernel, padded_y: usize, row: &mut [f64]) {
    let pad = source.pad;
    let width = source.width;

    if padded_y < pad || padded_y >= pad + source.height {
        row.fill(0.0);
        return;
    }

    let y = padded_y - pad;
    row[..pad].fill(0.0);
    row[pad + width..].fill(0.0);
    for x in 0..width {
        row[pad + x] = convolve_cell(source, kernel, x, y);
    }
}

/// Panics unless source and target share a shape and the padding equals the
/// kernel radius. A mismatch would silently shift every neighborhood.
fn check_pairing(source: &PaddedGrid, target: &PaddedGrid, kernel: &Kernel) {
    assert_eq!(
        (source.width, source.height, source.pad),
        (target.width, target.height, target.pad),
        "source and target grids differ in shape"
    );
    assert_eq!(
        source.pad,
        kernel.radius(),
        "grid padding {} does not match kernel radius {}",
        source.pad,
        kernel.radius()
    );
}

/// Compute the next generation row by row on the calling thread.
pub(crate) fn step_sequential(source: &PaddedGrid, target: &mut PaddedGrid, kernel: &Kernel) {
    check_pairing(source, target, kernel);

    let stride = source.stride();
    for (padded_y, row) in target.cells.chunks_mut(stride).enumerate() {
        write_row(source, kernel, padded_y, row);
    }
}

/// Compute the next generation with rows distributed over `pool`.
///
/// Produces exactly the same values as [`step_sequential`]: rows are disjoint
/// output slices and each cell's sum is accumulated in the same order.
pub(crate) fn step_parallel(
    source: &PaddedGrid,
    target: &mut PaddedGrid,
    kernel: &Kernel,
    pool: &ThreadPool,
) {
    check_pairing(source, target, kernel);

    let stride = source.stride();
    pool.install(|| {
        target
            .cells
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(padded_y, row)| write_row(source, kernel, padded_y, row));
    });
}
