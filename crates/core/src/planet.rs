//! Planet facade
//!
//! A `Planet` owns one grid together with the configuration, the compute
//! engine and the rule table that advance it. It is the surface an
//! orchestrator talks to: inject radiation, call `tick` once per step, read
//! aggregate quantities back.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::grid::{Component, InitialFields, PlanetGrid, Shape};
use crate::rules::default_scheduler;
use crate::scheduler::{TickContext, TickScheduler};
use crate::solver::{create_grid_ops, GridOps, ProfilerScope};
use rand::Rng;
use std::fmt;
use std::ops::Index;
use tracing::{debug, info};

/// Mean mass fraction of each component over the whole grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composition([f64; 3]);

impl Composition {
    /// Fractions in `Component::ALL` order
    pub fn ratios(&self) -> [f64; 3] {
        self.0
    }
}

impl Index<Component> for Composition {
    type Output = f64;

    fn index(&self, component: Component) -> &f64 {
        &self.0[component.index()]
    }
}

/// Snapshot of the aggregate quantities of a planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSummary {
    pub total_mass: f64,
    pub average_temperature: f64,
    pub composition: Composition,
}

impl fmt::Display for PlanetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Planet:")?;
        writeln!(f, "- Mass: {:.6e} kg", self.total_mass)?;
        writeln!(
            f,
            "- Average temperature: {:.3} K",
            self.average_temperature
        )?;
        write!(f, "- Composition:")?;
        for component in Component::ALL {
            let percent = self.composition[component] * 100.0;
            write!(f, "\n\t{:.2}% {}", percent, component)?;
        }
        Ok(())
    }
}

/// A planet surface advancing in discrete ticks
pub struct Planet {
    grid: PlanetGrid,
    config: SimulationConfig,
    ops: Box<dyn GridOps>,
    scheduler: TickScheduler,
    /// Simulated seconds since creation
    simulation_time: f64,
    /// Wall-clock duration of the last tick (ms)
    last_tick_ms: f64,
}

impl Planet {
    /// Create a planet with every field set to zero
    pub fn new(shape: Shape, config: SimulationConfig) -> Self {
        Self::with_grid(PlanetGrid::new(shape), config)
    }

    /// Create a planet from caller-seeded primary fields
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if a seeded field does not match the shape.
    pub fn with_fields(
        shape: Shape,
        initial: InitialFields,
        config: SimulationConfig,
    ) -> Result<Self> {
        let grid = PlanetGrid::from_fields(shape, initial)?;
        Ok(Self::with_grid(grid, config))
    }

    /// Wrap an existing grid, e.g. one restored from a snapshot
    pub fn with_grid(grid: PlanetGrid, config: SimulationConfig) -> Self {
        let ops = create_grid_ops(config.backend);
        info!(
            shape = ?grid.shape().dims(),
            cells = grid.len(),
            backend = ops.name(),
            time_delta = config.time_delta,
            "Planet created"
        );
        Self {
            grid,
            config,
            ops,
            scheduler: default_scheduler(),
            simulation_time: 0.0,
            last_tick_ms: 0.0,
        }
    }

    /// Advance the planet by one `time_delta`
    ///
    /// # Returns
    ///
    /// Number of rules executed
    pub fn tick(&mut self) -> usize {
        let scope = ProfilerScope::new("tick");
        let mut ctx = TickContext {
            grid: &mut self.grid,
            ops: self.ops.as_ref(),
            config: &self.config,
        };
        let executed = self.scheduler.tick(&mut ctx);
        self.simulation_time += self.config.time_delta;
        self.last_tick_ms = scope.elapsed_ms();
        debug!(
            tick = self.scheduler.ticks_completed(),
            simulation_time = self.simulation_time,
            "planet advanced"
        );
        executed
    }

    /// Absorb incoming radiation, minus the share reflected by the albedo
    pub fn receive_radiation(&mut self, energy: f64) {
        self.add_energy(energy * (1.0 - self.config.albedo));
    }

    /// Spread `energy` evenly over every cell, split by component mass
    pub fn add_energy(&mut self, energy: f64) {
        let per_cell = energy / self.grid.len() as f64;
        self.ops.add_uniform_energy(&mut self.grid, per_cell);
    }

    /// Recompute the composition-weighted heat transfer coefficient and
    /// specific heat capacity of every cell
    pub fn compute_thermal_properties(&mut self) {
        self.ops.compute_thermal_properties(&mut self.grid);
    }

    /// Seed 1000 kg of water per cell at random temperatures in [290, 310) K
    pub fn fill_with_water(&mut self) {
        self.grid.fill_with_water();
        self.compute_thermal_properties();
    }

    /// Same as `fill_with_water`, drawing temperatures from `rng`
    pub fn fill_with_water_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.fill_with_water_with(rng);
        self.compute_thermal_properties();
    }

    /// Mean chunk temperature over all cells (K)
    ///
    /// Refreshes the chunk temperature field.
    pub fn average_temperature(&mut self) -> f64 {
        self.ops.compute_chunk_temperature(&mut self.grid);
        self.ops.reduce_to_scalar(self.grid.chunk_temperature()) / self.grid.len() as f64
    }

    /// Sum of every component mass (kg)
    ///
    /// Refreshes the chunk mass field.
    pub fn total_mass(&mut self) -> f64 {
        self.ops.compute_chunk_mass(&mut self.grid);
        self.ops.reduce_to_scalar(self.grid.chunk_mass())
    }

    /// Sum of every component energy (J)
    pub fn total_energy(&self) -> f64 {
        Component::ALL
            .iter()
            .map(|&c| self.ops.reduce_to_scalar(self.grid.energy(c)))
            .sum()
    }

    /// Mean mass fraction of each component over all cells
    pub fn composition(&self) -> Composition {
        let cells = self.grid.len() as f64;
        let fields = self.ops.compute_composition(&self.grid);
        Composition(fields.map(|field| self.ops.reduce_to_scalar(&field) / cells))
    }

    /// Mass, average temperature and composition in one snapshot
    pub fn summary(&mut self) -> PlanetSummary {
        PlanetSummary {
            total_mass: self.total_mass(),
            average_temperature: self.average_temperature(),
            composition: self.composition(),
        }
    }

    pub fn grid(&self) -> &PlanetGrid {
        &self.grid
    }

    /// Direct field access, e.g. for seeding custom initial conditions
    pub fn grid_mut(&mut self) -> &mut PlanetGrid {
        &mut self.grid
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn ops(&self) -> &dyn GridOps {
        self.ops.as_ref()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Enable, disable or register rules between ticks
    pub fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }

    /// Simulated seconds since creation
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Wall-clock duration of the last tick (ms)
    pub fn last_tick_ms(&self) -> f64 {
        self.last_tick_ms
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

impl fmt::Debug for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planet")
            .field("shape", &self.grid.shape().dims())
            .field("backend", &self.ops.name())
            .field("scheduler", &self.scheduler)
            .field("simulation_time", &self.simulation_time)
            .finish_non_exhaustive()
    }
}
