//! Reference grid engine
//!
//! Plain sequential loops over the flat fields, with the region-by-region
//! diffusion stencil. Slow on large grids but easy to check by hand, and the
//! parallel engine is tested against it.

use super::diffusion::{diffuse_by_region, DiffusionInputs};
use super::kernels::{
    cell_temperature, energy_split, evaporate_cell, mass_ratios, thermal_mix, EnergyInput,
};
use super::reduction;
use super::GridOps;
use crate::config::EvaporationPolicy;
use crate::grid::{FieldData, PlanetGrid};

/// Single-threaded nested-loop engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGridOps;

impl ReferenceGridOps {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Masses of the three components at one cell
#[inline]
fn masses_at(mass: &[FieldData; 3], index: usize) -> [f64; 3] {
    [mass[0].get(index), mass[1].get(index), mass[2].get(index)]
}

fn distribute(mass: &[FieldData; 3], energy: &mut [FieldData; 3], input: EnergyInput<'_>) {
    for index in 0..mass[0].len() {
        let split = energy_split(input.at(index), masses_at(mass, index));
        for (field, share) in energy.iter_mut().zip(split) {
            field.as_mut_slice()[index] += share;
        }
    }
}

impl GridOps for ReferenceGridOps {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn is_parallel(&self) -> bool {
        false
    }

    fn compute_chunk_mass(&self, grid: &mut PlanetGrid) {
        let PlanetGrid {
            mass, chunk_mass, ..
        } = grid;
        for (index, out) in chunk_mass.as_mut_slice().iter_mut().enumerate() {
            *out = masses_at(mass, index).iter().sum();
        }
    }

    fn compute_chunk_temperature(&self, grid: &mut PlanetGrid) {
        let PlanetGrid {
            mass,
            energy,
            chunk_temperature,
            ..
        } = grid;
        for (index, out) in chunk_temperature.as_mut_slice().iter_mut().enumerate() {
            *out = cell_temperature(masses_at(mass, index), masses_at(energy, index));
        }
    }

    fn compute_composition(&self, grid: &PlanetGrid) -> [FieldData; 3] {
        let shape = grid.shape();
        let mut ratios = [
            FieldData::new(shape),
            FieldData::new(shape),
            FieldData::new(shape),
        ];
        for index in 0..grid.len() {
            let masses = masses_at(&grid.mass, index);
            let cell = mass_ratios(masses, masses.iter().sum());
            for (field, ratio) in ratios.iter_mut().zip(cell) {
                field.set(index, ratio);
            }
        }
        ratios
    }

    fn compute_thermal_properties(&self, grid: &mut PlanetGrid) {
        let PlanetGrid {
            mass,
            heat_transfer_coefficient,
            specific_heat_capacity,
            ..
        } = grid;
        for index in 0..mass[0].len() {
            let (htc, shc) = thermal_mix(masses_at(mass, index));
            heat_transfer_coefficient.set(index, htc);
            specific_heat_capacity.set(index, shc);
        }
    }

    fn diffuse(&self, grid: &mut PlanetGrid, time_delta: f64) {
        let shape = grid.shape();
        let PlanetGrid {
            chunk_temperature,
            heat_transfer_coefficient,
            specific_heat_capacity,
            energy_delta,
            ..
        } = grid;
        let inputs = DiffusionInputs {
            shape,
            temperature: chunk_temperature.as_slice(),
            heat_transfer_coefficient: heat_transfer_coefficient.as_slice(),
            specific_heat_capacity: specific_heat_capacity.as_slice(),
            time_delta,
        };
        diffuse_by_region(&inputs, energy_delta.as_mut_slice());
    }

    fn commit_energy_delta(&self, grid: &mut PlanetGrid) {
        let PlanetGrid {
            mass,
            energy,
            energy_delta,
            ..
        } = grid;
        distribute(mass, energy, EnergyInput::PerCell(energy_delta.as_slice()));
    }

    fn add_uniform_energy(&self, grid: &mut PlanetGrid, per_cell: f64) {
        let PlanetGrid { mass, energy, .. } = grid;
        distribute(mass, energy, EnergyInput::Uniform(per_cell));
    }

    fn evaporate(&self, grid: &mut PlanetGrid, fraction: f64, policy: EvaporationPolicy) -> usize {
        let [water, air, _] = &mut grid.mass;
        let mut clamped = 0;
        for (w, a) in water.as_mut_slice().iter_mut().zip(air.as_mut_slice()) {
            let (new_water, new_air, limited) = evaporate_cell(*w, *a, fraction, policy);
            *w = new_water;
            *a = new_air;
            clamped += usize::from(limited);
        }
        clamped
    }

    fn add_carbon(&self, grid: &mut PlanetGrid, per_cell: f64) {
        for ppm in grid.carbon_ppm.as_mut_slice() {
            *ppm += per_cell;
        }
    }

    fn reduce_to_scalar(&self, field: &FieldData) -> f64 {
        reduction::reduce_to_scalar(field)
    }
}
