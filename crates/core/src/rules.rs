//! Built-in tick rules
//!
//! | rule                 | default  |
//! |----------------------|----------|
//! | `update_temperature` | enabled  |
//! | `water_evaporation`  | disabled |
//! | `carbon_cycle`       | disabled |

use crate::scheduler::{TickContext, TickScheduler};
use tracing::warn;

pub const UPDATE_TEMPERATURE: &str = "update_temperature";
pub const WATER_EVAPORATION: &str = "water_evaporation";
pub const CARBON_CYCLE: &str = "carbon_cycle";

/// Refresh chunk temperature, diffuse heat, then commit the deltas
///
/// Thermal properties are not recomputed here; they keep whatever the last
/// `compute_thermal_properties` call or the caller wrote.
pub fn update_temperature(ctx: &mut TickContext<'_>) {
    ctx.ops.compute_chunk_temperature(ctx.grid);
    ctx.ops.diffuse(ctx.grid, ctx.config.time_delta);
    ctx.ops.commit_energy_delta(ctx.grid);
}

/// Move `evaporation_rate × time_delta` of every cell's water mass to air
pub fn water_evaporation(ctx: &mut TickContext<'_>) {
    let policy = ctx.config.evaporation_policy;
    let clamped = ctx
        .ops
        .evaporate(ctx.grid, ctx.config.evaporation_fraction(), policy);
    if clamped > 0 {
        warn!(
            cells = clamped,
            "Evaporation exceeded available water, flux clamped"
        );
    }
}

/// Spread the net global carbon flux evenly over every cell
pub fn carbon_cycle(ctx: &mut TickContext<'_>) {
    let per_cell = ctx.config.carbon.net_flux() / ctx.grid.len() as f64;
    ctx.ops.add_carbon(ctx.grid, per_cell);
}

/// Scheduler holding the built-in rules with their default flags
pub fn default_scheduler() -> TickScheduler {
    let mut scheduler = TickScheduler::new();
    scheduler.register(UPDATE_TEMPERATURE, true, update_temperature);
    scheduler.register(WATER_EVAPORATION, false, water_evaporation);
    scheduler.register(CARBON_CYCLE, false, carbon_cycle);
    scheduler
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarbonBudget, SimulationConfig};
    use crate::grid::{Component, InitialFields, PlanetGrid, Shape};
    use crate::solver::ReferenceGridOps;
    use approx::assert_relative_eq;

    fn water_line(temperatures: &[f64]) -> PlanetGrid {
        let n = temperatures.len();
        let shape = Shape::new(&[n]).unwrap();
        let mut grid = PlanetGrid::from_fields(
            shape,
            InitialFields {
                water_mass: Some(vec![1.0; n]),
                water_energy: Some(
                    temperatures
                        .iter()
                        .map(|t| t * Component::Water.heat_capacity())
                        .collect(),
                ),
                ..Default::default()
            },
        )
        .unwrap();
        grid.heat_transfer_coefficient.fill(1.0);
        grid.specific_heat_capacity.fill(1.0);
        grid
    }

    #[test]
    fn test_default_table() {
        let scheduler = default_scheduler();
        assert_eq!(
            scheduler.rule_names().collect::<Vec<_>>(),
            [UPDATE_TEMPERATURE, WATER_EVAPORATION, CARBON_CYCLE]
        );
        assert!(scheduler.is_enabled(UPDATE_TEMPERATURE));
        assert!(!scheduler.is_enabled(WATER_EVAPORATION));
        assert!(!scheduler.is_enabled(CARBON_CYCLE));
    }

    #[test]
    fn test_update_temperature_moves_heat_down_gradient() {
        let mut grid = water_line(&[100.0, 200.0, 100.0]);
        let before: Vec<f64> = grid.energy(Component::Water).as_slice().to_vec();
        let config = SimulationConfig::default();
        update_temperature(&mut TickContext {
            grid: &mut grid,
            ops: &ReferenceGridOps,
            config: &config,
        });

        let after = grid.energy(Component::Water).as_slice();
        assert_relative_eq!(after[0] - before[0], 100.0, epsilon = 1e-6);
        assert_relative_eq!(after[1] - before[1], -200.0, epsilon = 1e-6);
        assert_relative_eq!(after[2] - before[2], 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_carbon_cycle_spreads_budget() {
        let mut grid = water_line(&[300.0; 4]);
        let config = SimulationConfig {
            carbon: CarbonBudget {
                anthropogenic_emissions: 10.0,
                ocean_absorption: 2.0,
                land_decay: 1.0,
                biosphere_absorption: 1.0,
            },
            ..Default::default()
        };
        carbon_cycle(&mut TickContext {
            grid: &mut grid,
            ops: &ReferenceGridOps,
            config: &config,
        });
        assert!(grid.carbon_ppm().as_slice().iter().all(|&c| c == 2.0));
    }

    #[test]
    fn test_evaporation_with_zero_rate_is_noop() {
        let mut grid = water_line(&[300.0; 3]);
        let before = grid.clone();
        let config = SimulationConfig {
            evaporation_rate: 0.0,
            ..Default::default()
        };
        water_evaporation(&mut TickContext {
            grid: &mut grid,
            ops: &ReferenceGridOps,
            config: &config,
        });
        assert_eq!(grid.mass(Component::Water), before.mass(Component::Water));
        assert_eq!(grid.mass(Component::Air), before.mass(Component::Air));
    }
}
