//! C FFI layer for embedding the simulation in a foreign render loop.
//!
//! This module exports C ABI functions; all are `#[no_mangle] extern "C"`.
//!
//! The actual logic is in `simulation` and `automaton`. These functions are thin
//! wrappers that handle null checks, pointer safety, and C-to-Rust conversions.
//! Rust errors cannot cross the boundary, so they are logged and mapped to
//! null pointers or status codes.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{
    ca_advance_tick, ca_get_cell, ca_set_cell, CA_ERR_NULL, CA_ERR_OUT_OF_BOUNDS, CA_OK,
};
pub use lifecycle::{ca_create, ca_destroy, ca_get_generation, ca_height, ca_width};
pub use region::ca_extract_grid;
