//! Simulation configuration
//!
//! Everything the orchestrator supplies at construction besides the grid
//! shape. All fields have defaults, so a partial JSON document is valid.

use crate::constants::{
    ANTHROPOGENIC_EMISSIONS, BIOSPHERE_CARBON_ABSORPTION, DEFAULT_ALBEDO, DEFAULT_EVAPORATION_RATE,
    DEFAULT_TIME_DELTA, LAND_CARBON_DECAY, OCEAN_CARBON_ABSORPTION,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Compute engine used to execute the field operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Straightforward nested loops with explicit boundary regions
    Reference,
    /// Rayon row-parallel loops with a masked six-offset stencil
    #[default]
    Parallel,
}

/// What evaporation does when the flux exceeds the water available in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaporationPolicy {
    /// Limit the evaporated mass to `[0, water_mass]` so water never goes negative
    #[default]
    Clamp,
    /// Apply `rate × Δt × water_mass` as is, even if water mass turns negative
    Unchecked,
}

/// Global carbon budget applied each step, spread evenly over all cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonBudget {
    pub anthropogenic_emissions: f64,
    pub ocean_absorption: f64,
    pub land_decay: f64,
    pub biosphere_absorption: f64,
}

impl CarbonBudget {
    /// Net carbon added to the whole planet per step
    pub fn net_flux(&self) -> f64 {
        self.anthropogenic_emissions - self.ocean_absorption + self.land_decay
            - self.biosphere_absorption
    }
}

impl Default for CarbonBudget {
    fn default() -> Self {
        Self {
            anthropogenic_emissions: ANTHROPOGENIC_EMISSIONS,
            ocean_absorption: OCEAN_CARBON_ABSORPTION,
            land_decay: LAND_CARBON_DECAY,
            biosphere_absorption: BIOSPHERE_CARBON_ABSORPTION,
        }
    }
}

/// Parameters shared by every tick rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Duration of one tick (s)
    pub time_delta: f64,
    /// Fraction of water mass evaporated per second
    pub evaporation_rate: f64,
    /// Fraction of incoming radiation reflected back to space
    pub albedo: f64,
    pub carbon: CarbonBudget,
    pub evaporation_policy: EvaporationPolicy,
    pub backend: Backend,
}

impl SimulationConfig {
    /// Parse a JSON document, filling omitted fields with defaults
    ///
    /// # Errors
    ///
    /// Returns `GridError::Config` if the document is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fraction of water mass moved to air in one tick
    pub fn evaporation_fraction(&self) -> f64 {
        self.evaporation_rate * self.time_delta
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_delta: DEFAULT_TIME_DELTA,
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
            albedo: DEFAULT_ALBEDO,
            carbon: CarbonBudget::default(),
            evaporation_policy: EvaporationPolicy::default(),
            backend: Backend::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_default_carbon_flux() {
        // 1_000_000 - 100_000 + 330_000 - 300_000
        assert_eq!(CarbonBudget::default().net_flux(), 930_000.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SimulationConfig::from_json(r#"{ "time_delta": 0.5, "backend": "reference" }"#)
                .unwrap();
        assert_eq!(config.time_delta, 0.5);
        assert_eq!(config.backend, Backend::Reference);
        assert_eq!(config.albedo, DEFAULT_ALBEDO);
        assert_eq!(config.evaporation_policy, EvaporationPolicy::Clamp);
        assert_eq!(config.carbon, CarbonBudget::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig {
            evaporation_policy: EvaporationPolicy::Unchecked,
            carbon: CarbonBudget {
                land_decay: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = SimulationConfig::from_json(r#"{ "time_delta": "fast" }"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_evaporation_fraction() {
        let config = SimulationConfig {
            time_delta: 2.0,
            evaporation_rate: 0.25,
            ..Default::default()
        };
        assert_eq!(config.evaporation_fraction(), 0.5);
    }
}
