//! Convolution Automata - a 2D grid stepped by a fixed convolution kernel.
//!
//! Each tick replaces every cell with the kernel-weighted sum of its
//! neighborhood, read from the previous tick. The grid is surrounded by a
//! fixed zero border as wide as the kernel radius.
//!
//! The library is usable from Rust directly and exposes a C ABI in [`ffi`]
//! for driving it from a foreign render loop.

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod simulation;

pub use automaton::{GridView, Kernel};
pub use config::{ConfigError, SimulationConfig};
pub use error::SimulationError;
pub use simulation::GridSimulation;
