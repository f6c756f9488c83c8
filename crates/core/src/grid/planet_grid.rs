//! Dense field storage for the planet surface
//!
//! A `PlanetGrid` owns six primary fields (mass and energy for water, air and
//! land) and five derived fields. Derived fields are only refreshed when an
//! aggregation pass runs; between passes they hold whatever was last written.

use super::component::{Component, FieldKind};
use super::fields::FieldData;
use super::shape::Shape;
use crate::constants::{
    FILL_MAX_TEMPERATURE, FILL_MIN_TEMPERATURE, FILL_WATER_MASS, WATER_HEAT_CAPACITY,
};
use crate::error::{GridError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Optional caller-seeded primary fields, flat in row-major order
///
/// Missing fields default to all-zero.
#[derive(Debug, Clone, Default)]
pub struct InitialFields {
    pub water_mass: Option<Vec<f64>>,
    pub water_energy: Option<Vec<f64>>,
    pub air_mass: Option<Vec<f64>>,
    pub air_energy: Option<Vec<f64>>,
    pub land_mass: Option<Vec<f64>>,
    pub land_energy: Option<Vec<f64>>,
}

/// Same-shaped dense fields for every cell of the planet
///
/// Snapshots are checked on deserialization: every field must carry the
/// grid's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot")]
pub struct PlanetGrid {
    shape: Shape,
    /// Component masses (kg), indexed by `Component::index`
    pub(crate) mass: [FieldData; 3],
    /// Component thermal energies (J), indexed by `Component::index`
    pub(crate) energy: [FieldData; 3],
    pub(crate) chunk_mass: FieldData,
    pub(crate) chunk_temperature: FieldData,
    pub(crate) heat_transfer_coefficient: FieldData,
    pub(crate) specific_heat_capacity: FieldData,
    pub(crate) carbon_ppm: FieldData,
    /// Scratch buffer written by the diffusion stencil
    pub(crate) energy_delta: FieldData,
}

/// Unvalidated serialized form of `PlanetGrid`
#[derive(Deserialize)]
struct GridSnapshot {
    shape: Shape,
    mass: [FieldData; 3],
    energy: [FieldData; 3],
    chunk_mass: FieldData,
    chunk_temperature: FieldData,
    heat_transfer_coefficient: FieldData,
    specific_heat_capacity: FieldData,
    carbon_ppm: FieldData,
    energy_delta: FieldData,
}

impl TryFrom<GridSnapshot> for PlanetGrid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self> {
        let grid = Self {
            shape: snapshot.shape,
            mass: snapshot.mass,
            energy: snapshot.energy,
            chunk_mass: snapshot.chunk_mass,
            chunk_temperature: snapshot.chunk_temperature,
            heat_transfer_coefficient: snapshot.heat_transfer_coefficient,
            specific_heat_capacity: snapshot.specific_heat_capacity,
            carbon_ppm: snapshot.carbon_ppm,
            energy_delta: snapshot.energy_delta,
        };

        let fields = FieldKind::ALL
            .into_iter()
            .map(|kind| (kind.name(), grid.field(kind)))
            .chain([("energy_delta", &grid.energy_delta)]);
        for (name, field) in fields {
            if field.shape() != grid.shape {
                return Err(GridError::ShapeMismatch {
                    field: name,
                    expected: grid.len(),
                    found: field.len(),
                });
            }
        }
        Ok(grid)
    }
}

impl PlanetGrid {
    /// Create a grid with every field set to zero
    pub fn new(shape: Shape) -> Self {
        let zero = || FieldData::new(shape);
        Self {
            shape,
            mass: [zero(), zero(), zero()],
            energy: [zero(), zero(), zero()],
            chunk_mass: zero(),
            chunk_temperature: zero(),
            heat_transfer_coefficient: zero(),
            specific_heat_capacity: zero(),
            carbon_ppm: zero(),
            energy_delta: zero(),
        }
    }

    /// Create a grid from caller-seeded primary fields
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if a seeded field does not hold one value per cell.
    pub fn from_fields(shape: Shape, initial: InitialFields) -> Result<Self> {
        let mut grid = Self::new(shape);
        let seeds = [
            (FieldKind::Mass(Component::Water), initial.water_mass),
            (FieldKind::Energy(Component::Water), initial.water_energy),
            (FieldKind::Mass(Component::Air), initial.air_mass),
            (FieldKind::Energy(Component::Air), initial.air_energy),
            (FieldKind::Mass(Component::Land), initial.land_mass),
            (FieldKind::Energy(Component::Land), initial.land_energy),
        ];
        for (kind, values) in seeds {
            if let Some(values) = values {
                *grid.field_mut(kind) = FieldData::from_vec(shape, values, kind.name())?;
            }
        }
        Ok(grid)
    }

    /// Grid shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Total number of cells (the static grid size, not the occupied cells)
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Borrow any field
    pub fn field(&self, kind: FieldKind) -> &FieldData {
        match kind {
            FieldKind::Mass(c) => &self.mass[c.index()],
            FieldKind::Energy(c) => &self.energy[c.index()],
            FieldKind::ChunkMass => &self.chunk_mass,
            FieldKind::ChunkTemperature => &self.chunk_temperature,
            FieldKind::HeatTransferCoefficient => &self.heat_transfer_coefficient,
            FieldKind::SpecificHeatCapacity => &self.specific_heat_capacity,
            FieldKind::CarbonPpm => &self.carbon_ppm,
        }
    }

    /// Mutably borrow any field
    pub fn field_mut(&mut self, kind: FieldKind) -> &mut FieldData {
        match kind {
            FieldKind::Mass(c) => &mut self.mass[c.index()],
            FieldKind::Energy(c) => &mut self.energy[c.index()],
            FieldKind::ChunkMass => &mut self.chunk_mass,
            FieldKind::ChunkTemperature => &mut self.chunk_temperature,
            FieldKind::HeatTransferCoefficient => &mut self.heat_transfer_coefficient,
            FieldKind::SpecificHeatCapacity => &mut self.specific_heat_capacity,
            FieldKind::CarbonPpm => &mut self.carbon_ppm,
        }
    }

    pub fn mass(&self, component: Component) -> &FieldData {
        &self.mass[component.index()]
    }

    pub fn energy(&self, component: Component) -> &FieldData {
        &self.energy[component.index()]
    }

    pub fn chunk_mass(&self) -> &FieldData {
        &self.chunk_mass
    }

    pub fn chunk_temperature(&self) -> &FieldData {
        &self.chunk_temperature
    }

    pub fn heat_transfer_coefficient(&self) -> &FieldData {
        &self.heat_transfer_coefficient
    }

    pub fn specific_heat_capacity(&self) -> &FieldData {
        &self.specific_heat_capacity
    }

    pub fn carbon_ppm(&self) -> &FieldData {
        &self.carbon_ppm
    }

    /// Per-cell energy change produced by the last diffusion pass
    pub fn energy_delta(&self) -> &FieldData {
        &self.energy_delta
    }

    /// Read one cell of a field by linear index
    pub fn get(&self, kind: FieldKind, index: usize) -> f64 {
        self.field(kind).get(index)
    }

    /// Write one cell of a field by linear index
    pub fn set(&mut self, kind: FieldKind, index: usize, value: f64) {
        self.field_mut(kind).set(index, value);
    }

    /// Read one cell of a field by coordinate
    pub fn get_at(&self, kind: FieldKind, coords: &[usize]) -> f64 {
        self.field(kind).get_at(coords)
    }

    /// Write one cell of a field by coordinate
    pub fn set_at(&mut self, kind: FieldKind, coords: &[usize], value: f64) {
        self.field_mut(kind).set_at(coords, value);
    }

    /// Seed every cell with 1000 kg of water at a random temperature in [290, 310) K
    pub fn fill_with_water(&mut self) {
        self.fill_with_water_with(&mut rand::rng());
    }

    /// Same as `fill_with_water`, drawing temperatures from `rng`
    pub fn fill_with_water_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let water = Component::Water.index();
        self.mass[water].fill(FILL_WATER_MASS);

        let masses = self.mass[water].as_slice();
        let energies = self.energy[water].as_mut_slice();
        for (energy, &mass) in energies.iter_mut().zip(masses) {
            let temperature = rng.random_range(FILL_MIN_TEMPERATURE..FILL_MAX_TEMPERATURE);
            *energy = temperature * mass * WATER_HEAT_CAPACITY;
        }
    }
}
