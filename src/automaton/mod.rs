//! Core automaton logic: kernel, padded grid storage, and the convolution pass.
//!
//! `GridSimulation` in `simulation` ties these together; the FFI layer in
//! `ffi/` calls into that.

pub mod grid;
pub mod kernel;
pub(crate) mod stepping;

pub use grid::{GridView, PaddedGrid};
pub use kernel::Kernel;
