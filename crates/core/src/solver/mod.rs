//! Field operators for the planet grid
//!
//! This module provides a backend-agnostic layer for the per-tick physics.
//! The core abstraction is the `GridOps` trait, implemented by a reference
//! engine and a rayon data-parallel engine.
//!
//! # Feature Flags
//!
//! - `parallel` (default): Enables the rayon engine. Disable with
//!   `--no-default-features` for single-threaded builds.
//!
//! # Backend Selection
//!
//! `create_grid_ops` honours the requested `Backend`:
//! 1. `Backend::Parallel` uses rayon if the `parallel` feature is enabled
//! 2. Otherwise the reference engine is used (always available)
//!
//! # Example
//!
//! ```rust
//! use planet_sim_core::config::Backend;
//! use planet_sim_core::grid::{PlanetGrid, Shape};
//! use planet_sim_core::solver::create_grid_ops;
//!
//! let mut grid = PlanetGrid::new(Shape::new(&[4, 4, 4]).unwrap());
//! let ops = create_grid_ops(Backend::Reference);
//! ops.compute_chunk_mass(&mut grid);
//! ```

pub mod diffusion;
pub mod kernels;
pub mod profiler;
pub mod reduction;
mod reference;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

#[cfg(feature = "parallel")]
mod parallel;

// Re-exports
pub use kernels::EnergyInput;
pub use profiler::ProfilerScope;
pub use r#trait::GridOps;
pub use reference::ReferenceGridOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelGridOps;

use crate::config::Backend;
use tracing::info;

#[cfg(not(feature = "parallel"))]
use tracing::warn;

/// Create a grid engine for the requested backend
///
/// If the parallel engine is requested but the `parallel` feature is
/// disabled, the reference engine is returned instead.
///
/// # Arguments
///
/// * `backend` - Requested compute engine
///
/// # Returns
///
/// A boxed `GridOps` trait object
pub fn create_grid_ops(backend: Backend) -> Box<dyn GridOps> {
    match backend {
        Backend::Reference => {
            info!("Using reference backend");
            Box::new(ReferenceGridOps::new())
        }
        Backend::Parallel => {
            #[cfg(feature = "parallel")]
            {
                info!(
                    "Using parallel backend ({} threads)",
                    rayon::current_num_threads()
                );
                Box::new(ParallelGridOps::new())
            }

            #[cfg(not(feature = "parallel"))]
            {
                warn!("Parallel feature disabled, falling back to reference backend");
                Box::new(ReferenceGridOps::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reference_backend() {
        let ops = create_grid_ops(Backend::Reference);
        assert_eq!(ops.name(), "reference");
        assert!(!ops.is_parallel());
    }

    #[test]
    fn test_create_parallel_backend() {
        let ops = create_grid_ops(Backend::Parallel);
        assert_eq!(ops.is_parallel(), cfg!(feature = "parallel"));
    }
}
