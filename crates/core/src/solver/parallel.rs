//! Rayon-backed grid engine
//!
//! Every per-cell operator is split into rows along the contiguous last axis
//! and processed with `par_chunks_mut`. Each pass writes only buffers it does
//! not read. The stencil uses the uniform masked formulation, which keeps the
//! inner loop branch-free.

use super::diffusion::{masked_delta, DiffusionInputs};
use super::kernels::{
    cell_temperature, collapse_row, energy_split, evaporate_cell, mass_ratios, thermal_mix,
    EnergyInput,
};
use super::reduction::sum_row_heads;
use super::GridOps;
use crate::config::EvaporationPolicy;
use crate::grid::{FieldData, PlanetGrid};
use rayon::prelude::*;

/// Data-parallel engine using the global rayon pool
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelGridOps;

impl ParallelGridOps {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Read-only views of the three per-component fields
#[derive(Clone, Copy)]
struct Triple<'a>([&'a [f64]; 3]);

impl<'a> Triple<'a> {
    fn of(fields: &'a [FieldData; 3]) -> Self {
        Self([
            fields[0].as_slice(),
            fields[1].as_slice(),
            fields[2].as_slice(),
        ])
    }

    #[inline]
    fn at(&self, index: usize) -> [f64; 3] {
        let [a, b, c] = self.0;
        [a[index], b[index], c[index]]
    }
}

fn distribute(mass: &[FieldData; 3], energy: &mut [FieldData; 3], input: EnergyInput<'_>) {
    let row_len = mass[0].shape().last_axis_len();
    let masses = Triple::of(mass);
    let [water, air, land] = energy;

    water
        .as_mut_slice()
        .par_chunks_mut(row_len)
        .zip(air.as_mut_slice().par_chunks_mut(row_len))
        .zip(land.as_mut_slice().par_chunks_mut(row_len))
        .enumerate()
        .for_each(|(row, ((water, air), land))| {
            let base = row * row_len;
            for k in 0..water.len() {
                let index = base + k;
                let [w, a, l] = energy_split(input.at(index), masses.at(index));
                water[k] += w;
                air[k] += a;
                land[k] += l;
            }
        });
}

impl GridOps for ParallelGridOps {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn compute_chunk_mass(&self, grid: &mut PlanetGrid) {
        let row_len = grid.shape().last_axis_len();
        let PlanetGrid {
            mass, chunk_mass, ..
        } = grid;
        let masses = Triple::of(mass);

        chunk_mass
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, out)| {
                let base = row * row_len;
                for (k, cell) in out.iter_mut().enumerate() {
                    *cell = masses.at(base + k).iter().sum();
                }
            });
    }

    fn compute_chunk_temperature(&self, grid: &mut PlanetGrid) {
        let row_len = grid.shape().last_axis_len();
        let PlanetGrid {
            mass,
            energy,
            chunk_temperature,
            ..
        } = grid;
        let masses = Triple::of(mass);
        let energies = Triple::of(energy);

        chunk_temperature
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, out)| {
                let base = row * row_len;
                for (k, cell) in out.iter_mut().enumerate() {
                    *cell = cell_temperature(masses.at(base + k), energies.at(base + k));
                }
            });
    }

    fn compute_composition(&self, grid: &PlanetGrid) -> [FieldData; 3] {
        let shape = grid.shape();
        let row_len = shape.last_axis_len();
        let masses = Triple::of(&grid.mass);
        let mut ratios = [
            FieldData::new(shape),
            FieldData::new(shape),
            FieldData::new(shape),
        ];
        let [water, air, land] = &mut ratios;

        water
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .zip(air.as_mut_slice().par_chunks_mut(row_len))
            .zip(land.as_mut_slice().par_chunks_mut(row_len))
            .enumerate()
            .for_each(|(row, ((water, air), land))| {
                let base = row * row_len;
                for k in 0..water.len() {
                    let cell = masses.at(base + k);
                    let [w, a, l] = mass_ratios(cell, cell.iter().sum());
                    water[k] = w;
                    air[k] = a;
                    land[k] = l;
                }
            });
        ratios
    }

    fn compute_thermal_properties(&self, grid: &mut PlanetGrid) {
        let row_len = grid.shape().last_axis_len();
        let PlanetGrid {
            mass,
            heat_transfer_coefficient,
            specific_heat_capacity,
            ..
        } = grid;
        let masses = Triple::of(mass);

        heat_transfer_coefficient
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .zip(
                specific_heat_capacity
                    .as_mut_slice()
                    .par_chunks_mut(row_len),
            )
            .enumerate()
            .for_each(|(row, (htc, shc))| {
                let base = row * row_len;
                for k in 0..htc.len() {
                    (htc[k], shc[k]) = thermal_mix(masses.at(base + k));
                }
            });
    }

    fn diffuse(&self, grid: &mut PlanetGrid, time_delta: f64) {
        let shape = grid.shape();
        let row_len = shape.last_axis_len();
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

        energy_delta
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, out)| {
                let base = row * row_len;
                for (k, delta) in out.iter_mut().enumerate() {
                    *delta = masked_delta(&inputs, base + k);
                }
            });
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
        let row_len = grid.shape().last_axis_len();
        let [water, air, _] = &mut grid.mass;

        water
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .zip(air.as_mut_slice().par_chunks_mut(row_len))
            .map(|(water, air)| {
                let mut clamped = 0;
                for (w, a) in water.iter_mut().zip(air.iter_mut()) {
                    let (new_water, new_air, limited) = evaporate_cell(*w, *a, fraction, policy);
                    *w = new_water;
                    *a = new_air;
                    clamped += usize::from(limited);
                }
                clamped
            })
            .sum()
    }

    fn add_carbon(&self, grid: &mut PlanetGrid, per_cell: f64) {
        grid.carbon_ppm
            .as_mut_slice()
            .par_iter_mut()
            .for_each(|ppm| *ppm += per_cell);
    }

    fn reduce_to_scalar(&self, field: &FieldData) -> f64 {
        let row_len = field.shape().last_axis_len();
        let mut scratch = field.as_slice().to_vec();
        scratch.par_chunks_mut(row_len).for_each(collapse_row);
        sum_row_heads(&scratch, row_len)
    }
}
