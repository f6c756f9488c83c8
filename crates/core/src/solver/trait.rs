//! Grid engine trait definition
//!
//! This module defines the `GridOps` trait, the backend-agnostic interface
//! every tick rule goes through. Both the reference and the parallel engine
//! implement it.

use crate::config::EvaporationPolicy;
use crate::grid::{FieldData, PlanetGrid};

/// Backend-agnostic interface for the planet field operators
///
/// Engines are stateless: every operation reads and writes the fields of the
/// `PlanetGrid` it is given. Operators are total over well-formed grids and
/// never fail.
pub trait GridOps: Send + Sync {
    /// Short engine name used in logs
    fn name(&self) -> &'static str;

    /// Check if this engine spreads work over multiple threads
    fn is_parallel(&self) -> bool;

    /// Recompute `chunk_mass` as the per-cell sum of the three masses
    fn compute_chunk_mass(&self, grid: &mut PlanetGrid);

    /// Recompute `chunk_temperature`
    ///
    /// Each component with nonzero mass contributes
    /// `energy / (heat_capacity × mass)`.
    fn compute_chunk_temperature(&self, grid: &mut PlanetGrid);

    /// Per-component mass ratio of every cell, in `Component::ALL` order
    ///
    /// Cells with zero total mass report 0 for every component.
    fn compute_composition(&self, grid: &PlanetGrid) -> [FieldData; 3];

    /// Recompute the composition-weighted heat transfer coefficient and
    /// specific heat capacity
    fn compute_thermal_properties(&self, grid: &mut PlanetGrid);

    /// Write the diffusion delta of every cell into the energy delta buffer
    ///
    /// Reads only `chunk_temperature`, `heat_transfer_coefficient` and
    /// `specific_heat_capacity`.
    ///
    /// # Arguments
    ///
    /// * `time_delta` - Tick duration in seconds
    fn diffuse(&self, grid: &mut PlanetGrid, time_delta: f64);

    /// Add the energy delta buffer to the component energies
    ///
    /// Each cell's delta is split over its components in proportion to their
    /// mass. Zero-mass components receive nothing.
    fn commit_energy_delta(&self, grid: &mut PlanetGrid);

    /// Add the same energy increment to every cell, split like
    /// `commit_energy_delta`
    fn add_uniform_energy(&self, grid: &mut PlanetGrid, per_cell: f64);

    /// Move `fraction × water_mass` from water to air in every cell
    ///
    /// # Returns
    ///
    /// Number of cells where the policy limited the flux
    fn evaporate(&self, grid: &mut PlanetGrid, fraction: f64, policy: EvaporationPolicy) -> usize;

    /// Add `per_cell` to every carbon concentration
    fn add_carbon(&self, grid: &mut PlanetGrid, per_cell: f64);

    /// Sum every cell of `field`
    fn reduce_to_scalar(&self, field: &FieldData) -> f64;
}
