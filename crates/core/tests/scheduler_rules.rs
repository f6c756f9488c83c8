//! Rule table behaviour as seen through a planet

use planet_sim_core::grid::{Component, Shape};
use planet_sim_core::rules::{self, CARBON_CYCLE, UPDATE_TEMPERATURE, WATER_EVAPORATION};
use planet_sim_core::{GridError, Planet, SimulationConfig, TickContext};
use std::sync::{Arc, Mutex};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn planet() -> Planet {
    Planet::new(Shape::new(&[3, 3]).unwrap(), SimulationConfig::default())
}

#[test]
fn default_rules_and_flags() {
    let planet = planet();
    let names: Vec<&str> = planet.scheduler().rule_names().collect();
    assert_eq!(names, [UPDATE_TEMPERATURE, WATER_EVAPORATION, CARBON_CYCLE]);

    let flags: Vec<bool> = planet
        .scheduler()
        .rules()
        .iter()
        .map(|rule| rule.is_enabled())
        .collect();
    assert_eq!(flags, [true, false, false]);
}

#[test]
fn custom_rules_run_after_builtins() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut planet = planet();
    planet.scheduler_mut().enable(CARBON_CYCLE).unwrap();

    let seen = Arc::clone(&order);
    planet
        .scheduler_mut()
        .register("observe", true, move |ctx: &mut TickContext<'_>| {
            // Carbon has already been added this tick
            seen.lock().unwrap().push(ctx.grid.carbon_ppm().get(0));
        });

    planet.tick();
    planet.tick();

    let per_cell = SimulationConfig::default().carbon.net_flux() / 9.0;
    let observed = order.lock().unwrap().clone();
    assert_eq!(observed.len(), 2);
    assert!((observed[0] - per_cell).abs() < 1e-9);
    assert!((observed[1] - 2.0 * per_cell).abs() < 1e-9);
}

#[test]
fn replacing_a_builtin_keeps_its_slot() {
    let mut planet = planet();
    planet.fill_with_water();
    planet
        .scheduler_mut()
        .register(UPDATE_TEMPERATURE, false, rules::update_temperature);
    planet
        .scheduler_mut()
        .register(WATER_EVAPORATION, true, rules::water_evaporation);

    let names: Vec<&str> = planet.scheduler().rule_names().collect();
    assert_eq!(names, [UPDATE_TEMPERATURE, WATER_EVAPORATION, CARBON_CYCLE]);

    let energy_before = planet.grid().energy(Component::Water).clone();
    assert_eq!(planet.tick(), 1);
    // Diffusion is off, so energies are untouched
    assert_eq!(planet.grid().energy(Component::Water), &energy_before);
    assert!(planet.grid().mass(Component::Air).get(0) > 0.0);
}

#[test]
fn unknown_rule_is_an_error() {
    let mut planet = planet();
    let err = planet
        .scheduler_mut()
        .disable("ocean_currents")
        .unwrap_err();
    assert!(matches!(err, GridError::UnknownRule(name) if name == "ocean_currents"));
}
