//! Settings loading: a TOML document describing the grid, kernel and seed cells.
//!
//! ```toml
//! width = 64
//! height = 64
//! threads = 4
//!
//! [kernel]
//! preset = "box_blur"
//! side = 3
//!
//! [[seed]]
//! x = 32
//! y = 32
//! value = 9.0
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::automaton::kernel::Kernel;
use crate::error::SimulationError;
use crate::simulation::GridSimulation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("kernel must give exactly one of `preset` or `weights`")]
    KernelSource,

    #[error("kernel preset `{0:?}` needs a `side`")]
    MissingSide(KernelPreset),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelPreset {
    Identity,
    BoxBlur,
    Zeros,
}

/// Kernel description: either a named preset with a side length, or explicit
/// weights (outer index along x).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KernelConfig {
    pub preset: Option<KernelPreset>,
    pub side: Option<usize>,
    pub weights: Option<Vec<Vec<f64>>>,
}

impl KernelConfig {
    pub fn build(&self) -> Result<Kernel, ConfigError> {
        match (&self.preset, &self.weights) {
            (Some(preset), None) => {
                let side = self.side.ok_or(ConfigError::MissingSide(*preset))?;
                Ok(match preset {
                    KernelPreset::Identity => Kernel::identity(side),
                    KernelPreset::BoxBlur => Kernel::box_blur(side),
                    KernelPreset::Zeros => Kernel::zeros(side),
                })
            }
            (None, Some(weights)) => Ok(Kernel::new(weights.clone())?),
            _ => Err(ConfigError::KernelSource),
        }
    }
}

/// An initial cell value applied after construction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CellSeed {
    pub x: usize,
    pub y: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    /// Tick worker threads. 1 (the default) runs ticks on the caller's thread.
    #[serde(default = "default_threads")]
    pub threads: usize,
    pub kernel: KernelConfig,
    #[serde(default, rename = "seed")]
    pub seeds: Vec<CellSeed>,
}

fn default_threads() -> usize {
    1
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading settings from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Construct the simulation and apply every seed.
    pub fn build(&self) -> Result<GridSimulation, ConfigError> {
        let kernel = self.kernel.build()?;
        let dimension = (self.width, self.height);

        let mut sim = if self.threads > 1 {
            GridSimulation::with_threads(dimension, kernel, self.threads)?
        } else {
            GridSimulation::new(dimension, kernel)?
        };

        for seed in &self.seeds {
            sim.set_cell(seed.x, seed.y, seed.value)?;
        }

        log::debug!("seeded {} cells", self.seeds.len());
        Ok(sim)
    }
}
