//! Simulation creation, destruction, and metadata queries.

use crate::automaton::kernel::Kernel;
use crate::simulation::GridSimulation;

/// Creates a new simulation and returns an opaque pointer.
///
/// The kernel is read as `kernel_side * kernel_side` row-major `f64` weights
/// (outer index along x) and copied; the caller keeps ownership of the buffer.
///
/// # Safety
/// - `kernel` must point to at least `kernel_side * kernel_side` readable `f64`s
/// - The returned pointer must eventually be freed with `ca_destroy()`
///
/// # Returns
/// A pointer to the new simulation, or null if `kernel` is null, any size is
/// negative, or the kernel does not fit the grid. Parity and fit are checked
/// before `kernel` is read.
#[no_mangle]
pub unsafe extern "C" fn ca_create(
    width: i32,
    height: i32,
    kernel: *const f64,
    kernel_side: i32,
) -> *mut GridSimulation {
    if kernel.is_null() {
        log::warn!("ca_create: null kernel pointer");
        return std::ptr::null_mut();
    }
    if width < 0 || height < 0 || kernel_side < 0 {
        log::warn!(
            "ca_create: negative size (width {}, height {}, kernel side {})",
            width,
            height,
            kernel_side
        );
        return std::ptr::null_mut();
    }

    // Reject a kernel that cannot fit before reading the caller's buffer.
    let side = kernel_side as usize;
    if side % 2 == 0 || side >= width as usize || side >= height as usize {
        log::warn!(
            "ca_create: kernel side {} cannot fit a {}x{} grid",
            side,
            width,
            height
        );
        return std::ptr::null_mut();
    }

    let weights = std::slice::from_raw_parts(kernel, side * side).to_vec();

    let sim = Kernel::from_shape(&[side, side], weights)
        .and_then(|kernel| GridSimulation::new((width as usize, height as usize), kernel));

    match sim {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(e) => {
            log::warn!("ca_create: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `ca_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn ca_destroy(ptr: *mut GridSimulation) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the generation counter (ticks applied so far).
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_get_generation(ptr: *const GridSimulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// Logical grid width, or 0 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_width(ptr: *const GridSimulation) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).width() as u32
}

/// Logical grid height, or 0 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_height(ptr: *const GridSimulation) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).height() as u32
}
