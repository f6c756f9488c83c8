//! Substances co-located in every cell and the fields that describe them

use crate::constants::{
    AIR_HEAT_CAPACITY, AIR_HEAT_TRANSFER_COEFFICIENT, LAND_HEAT_CAPACITY,
    LAND_HEAT_TRANSFER_COEFFICIENT, WATER_HEAT_CAPACITY, WATER_HEAT_TRANSFER_COEFFICIENT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three substances sharing a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Water,
    Air,
    Land,
}

impl Component {
    /// All components, in storage order
    pub const ALL: [Component; 3] = [Component::Water, Component::Air, Component::Land];

    /// Position of the component in per-component field arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Water => 0,
            Self::Air => 1,
            Self::Land => 2,
        }
    }

    /// Specific heat capacity (J/(kg·K))
    pub const fn heat_capacity(self) -> f64 {
        match self {
            Self::Water => WATER_HEAT_CAPACITY,
            Self::Air => AIR_HEAT_CAPACITY,
            Self::Land => LAND_HEAT_CAPACITY,
        }
    }

    /// Heat transfer coefficient (W/(m·K))
    pub const fn heat_transfer_coefficient(self) -> f64 {
        match self {
            Self::Water => WATER_HEAT_TRANSFER_COEFFICIENT,
            Self::Air => AIR_HEAT_TRANSFER_COEFFICIENT,
            Self::Land => LAND_HEAT_TRANSFER_COEFFICIENT,
        }
    }

    /// Upper-case label used in reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::Water => "WATER",
            Self::Air => "AIR",
            Self::Land => "LAND",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every field stored by a `PlanetGrid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Mass(Component),
    Energy(Component),
    ChunkMass,
    ChunkTemperature,
    HeatTransferCoefficient,
    SpecificHeatCapacity,
    CarbonPpm,
}

impl FieldKind {
    /// The six primary and five derived fields
    pub const ALL: [FieldKind; 11] = [
        FieldKind::Mass(Component::Water),
        FieldKind::Energy(Component::Water),
        FieldKind::Mass(Component::Air),
        FieldKind::Energy(Component::Air),
        FieldKind::Mass(Component::Land),
        FieldKind::Energy(Component::Land),
        FieldKind::ChunkMass,
        FieldKind::ChunkTemperature,
        FieldKind::HeatTransferCoefficient,
        FieldKind::SpecificHeatCapacity,
        FieldKind::CarbonPpm,
    ];

    /// Snake-case field name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mass(Component::Water) => "water_mass",
            Self::Mass(Component::Air) => "air_mass",
            Self::Mass(Component::Land) => "land_mass",
            Self::Energy(Component::Water) => "water_energy",
            Self::Energy(Component::Air) => "air_energy",
            Self::Energy(Component::Land) => "land_energy",
            Self::ChunkMass => "chunk_mass",
            Self::ChunkTemperature => "chunk_temperature",
            Self::HeatTransferCoefficient => "heat_transfer_coefficient",
            Self::SpecificHeatCapacity => "specific_heat_capacity",
            Self::CarbonPpm => "carbon_ppm",
        }
    }

    /// True for the six mass/energy fields
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Mass(_) | Self::Energy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_component_indices_are_storage_order() {
        for (i, component) in Component::ALL.iter().enumerate() {
            assert_eq!(component.index(), i);
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        let names: HashSet<_> = FieldKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), 11);
        assert_eq!(FieldKind::ALL.iter().filter(|k| k.is_primary()).count(), 6);
    }
}
