//! Per-cell arithmetic shared by every engine
//!
//! Engines differ only in how they walk the grid. Keeping the cell math here
//! makes the reference and parallel engines produce bit-identical results for
//! everything except the stencil, which is verified separately.

use crate::config::EvaporationPolicy;
use crate::grid::Component;

/// Energy source for the distribution operator
#[derive(Debug, Clone, Copy)]
pub enum EnergyInput<'a> {
    /// One increment per cell, e.g. the diffusion delta buffer
    PerCell(&'a [f64]),
    /// The same increment for every cell
    Uniform(f64),
}

impl EnergyInput<'_> {
    #[inline]
    pub fn at(&self, index: usize) -> f64 {
        match self {
            Self::PerCell(values) => values[index],
            Self::Uniform(value) => *value,
        }
    }
}

/// Sum of the per-component temperatures of one cell
///
/// Components with zero mass are skipped instead of dividing by zero.
#[inline]
pub fn cell_temperature(masses: [f64; 3], energies: [f64; 3]) -> f64 {
    let mut temperature = 0.0;
    for component in Component::ALL {
        let i = component.index();
        if masses[i] != 0.0 {
            temperature += energies[i] / (component.heat_capacity() * masses[i]);
        }
    }
    temperature
}

/// Mass fraction of each component; all zero for an empty cell
#[inline]
pub fn mass_ratios(masses: [f64; 3], chunk_mass: f64) -> [f64; 3] {
    if chunk_mass == 0.0 {
        return [0.0; 3];
    }
    masses.map(|m| m / chunk_mass)
}

/// Composition-weighted `(heat_transfer_coefficient, specific_heat_capacity)`
#[inline]
pub fn thermal_mix(masses: [f64; 3]) -> (f64, f64) {
    let ratios = mass_ratios(masses, masses.iter().sum());
    Component::ALL
        .iter()
        .fold((0.0, 0.0), |(htc, shc), &component| {
            let ratio = ratios[component.index()];
            (
                htc + ratio * component.heat_transfer_coefficient(),
                shc + ratio * component.heat_capacity(),
            )
        })
}

/// Split `delta` across the components in proportion to their mass
///
/// Zero-mass components receive nothing and the remainder is not
/// renormalised, so an empty cell absorbs no energy at all.
#[inline]
pub fn energy_split(delta: f64, masses: [f64; 3]) -> [f64; 3] {
    let chunk_mass: f64 = masses.iter().sum();
    masses.map(|m| {
        if m != 0.0 {
            delta * (m / chunk_mass)
        } else {
            0.0
        }
    })
}

/// Move `fraction × water` from water to air
///
/// Returns the new `(water, air)` pair and whether the clamp policy had to
/// limit the flux.
#[inline]
pub fn evaporate_cell(
    water: f64,
    air: f64,
    fraction: f64,
    policy: EvaporationPolicy,
) -> (f64, f64, bool) {
    let flux = fraction * water;
    match policy {
        EvaporationPolicy::Unchecked => (water - flux, air + flux, false),
        EvaporationPolicy::Clamp => {
            let evaporated = flux.clamp(0.0, water.max(0.0));
            (water - evaporated, air + evaporated, evaporated != flux)
        }
    }
}

/// Backward-running cumulative sum along one row of the last axis
///
/// Afterwards `row[0]` holds the sum of the whole row.
#[inline]
pub fn collapse_row(row: &mut [f64]) {
    for k in (0..row.len().saturating_sub(1)).rev() {
        row[k] += row[k + 1];
    }
}
