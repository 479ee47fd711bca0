//! Cell access and stepping.

use crate::simulation::GridSimulation;

pub const CA_OK: i32 = 0;
pub const CA_ERR_NULL: i32 = 1;
pub const CA_ERR_OUT_OF_BOUNDS: i32 = 2;

/// Sets the value of a logical cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
///
/// # Returns
/// `CA_OK`, `CA_ERR_NULL`, or `CA_ERR_OUT_OF_BOUNDS` (grid left unchanged).
#[no_mangle]
pub unsafe extern "C" fn ca_set_cell(
    ptr: *mut GridSimulation,
    x: i32,
    y: i32,
    value: f64,
) -> i32 {
    if ptr.is_null() {
        return CA_ERR_NULL;
    }
    if x < 0 || y < 0 {
        return CA_ERR_OUT_OF_BOUNDS;
    }

    let sim = &mut *ptr;
    match sim.set_cell(x as usize, y as usize, value) {
        Ok(()) => CA_OK,
        Err(e) => {
            log::warn!("ca_set_cell: {}", e);
            CA_ERR_OUT_OF_BOUNDS
        }
    }
}

/// Gets the value of a logical cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
///
/// # Returns
/// The cell value, or 0.0 if out of bounds or null pointer.
#[no_mangle]
pub unsafe extern "C" fn ca_get_cell(ptr: *const GridSimulation, x: i32, y: i32) -> f64 {
    if ptr.is_null() || x < 0 || y < 0 {
        return 0.0;
    }

    let sim = &*ptr;
    sim.get_cell(x as usize, y as usize).unwrap_or(0.0)
}

/// Advances the simulation by one tick.
///
/// # Safety
/// - `ptr` must be a valid pointer to a simulation, or null
#[no_mangle]
pub unsafe extern "C" fn ca_advance_tick(ptr: *mut GridSimulation) {
    if ptr.is_null() {
        return;
    }

    let sim = &mut *ptr;
    sim.advance_tick();
}
