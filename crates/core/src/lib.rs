//! Planet Simulation Core Library
//!
//! Models a planet surface as a regular 1-D, 2-D or 3-D grid of cells. Every
//! cell holds the mass and thermal energy of three co-located components
//! (water, air and land). The grid advances in discrete ticks through an
//! ordered table of update rules.
//!
//! ## Physics
//!
//! - Heat diffusion between axis-adjacent cells, honouring grid boundaries
//! - Mass-proportional distribution of injected energy
//! - Water to air evaporation
//! - Uniform carbon concentration drift from a global budget
//!
//! ## Engines
//!
//! All field operators go through the `GridOps` trait. A reference engine
//! with plain loops is always available; the rayon engine is enabled by the
//! default `parallel` feature.

// Configuration, constants and errors
pub mod config;
pub mod constants;
pub mod error;

// Field storage and topology
pub mod grid;

// Field operators and compute engines
pub mod solver;

// Tick rules and the planet facade
pub mod planet;
pub mod rules;
pub mod scheduler;

// Re-export core types
pub use config::{Backend, CarbonBudget, EvaporationPolicy, SimulationConfig};
pub use error::{GridError, Result};
pub use grid::{Component, FieldData, FieldKind, InitialFields, PlanetGrid, Shape};

// Re-export engine and scheduler types
pub use planet::{Composition, Planet, PlanetSummary};
pub use scheduler::{TickContext, TickRule, TickScheduler};
pub use solver::{create_grid_ops, GridOps, ReferenceGridOps};

#[cfg(feature = "parallel")]
pub use solver::ParallelGridOps;
