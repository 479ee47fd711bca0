//! Grid extraction for display.

use crate::simulation::GridSimulation;

/// Copies the logical grid into a flat output buffer.
///
/// The buffer is filled in y,x order (y changes slowest, x changes fastest),
/// padding excluded.
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
/// - `out_buf` must point to at least `len` writable `f64`s, or be null
///
/// # Returns
/// Number of values written, or 0 on a null pointer or if `len` is smaller
/// than `width * height`.
#[no_mangle]
pub unsafe extern "C" fn ca_extract_grid(
    ptr: *const GridSimulation,
    out_buf: *mut f64,
    len: u64,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let sim = &*ptr;
    let out_slice = std::slice::from_raw_parts_mut(out_buf, len as usize);
    sim.view().copy_into(out_slice) as u64
}
