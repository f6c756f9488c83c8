//! Physical constants and default rule parameters

/// Specific heat capacity of water (J/(kg·K))
pub const WATER_HEAT_CAPACITY: f64 = 4184.0;
/// Specific heat capacity of air at constant pressure (J/(kg·K))
pub const AIR_HEAT_CAPACITY: f64 = 1005.0;
/// Specific heat capacity of dry soil and rock (J/(kg·K))
pub const LAND_HEAT_CAPACITY: f64 = 830.0;

/// Thermal conductivity of liquid water (W/(m·K))
pub const WATER_HEAT_TRANSFER_COEFFICIENT: f64 = 0.6;
/// Thermal conductivity of air at 20°C (W/(m·K))
pub const AIR_HEAT_TRANSFER_COEFFICIENT: f64 = 0.026;
/// Thermal conductivity of continental crust (W/(m·K))
pub const LAND_HEAT_TRANSFER_COEFFICIENT: f64 = 2.5;

/// Default simulation step (s)
pub const DEFAULT_TIME_DELTA: f64 = 1.0;
/// Default fraction of water mass evaporated per second
pub const DEFAULT_EVAPORATION_RATE: f64 = 1e-3;
/// Earth's Bond albedo
pub const DEFAULT_ALBEDO: f64 = 0.3;

/// Anthropogenic carbon emitted per step (ppm)
pub const ANTHROPOGENIC_EMISSIONS: f64 = 1_000_000.0;
/// Carbon absorbed by the oceans per step (ppm)
pub const OCEAN_CARBON_ABSORPTION: f64 = 100_000.0;
/// Carbon released by decaying biomass per step (ppm)
pub const LAND_CARBON_DECAY: f64 = 330_000.0;
/// Carbon absorbed by growing biomass per step (ppm)
pub const BIOSPHERE_CARBON_ABSORPTION: f64 = 300_000.0;

/// Water mass written to every cell by `fill_with_water` (kg)
pub const FILL_WATER_MASS: f64 = 1000.0;
/// Lower bound of the seeded water temperature (K)
pub const FILL_MIN_TEMPERATURE: f64 = 290.0;
/// Upper bound (exclusive) of the seeded water temperature (K)
pub const FILL_MAX_TEMPERATURE: f64 = 310.0;
