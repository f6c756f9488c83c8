use clap::{Parser, ValueEnum};
use planet_sim_core::rules::{CARBON_CYCLE, WATER_EVAPORATION};
use planet_sim_core::{Backend, Planet, Shape, SimulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Reference,
    Parallel,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Reference => Backend::Reference,
            BackendArg::Parallel => Backend::Parallel,
        }
    }
}

/// Planet grid simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "planet-sim-demo")]
#[command(about = "Headless planet heat and mass simulation", long_about = None)]
struct Args {
    /// Grid extents, 1 to 3 comma-separated values
    #[arg(short, long, value_delimiter = ',', default_value = "16,16,4")]
    shape: Vec<usize>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 100)]
    ticks: u32,

    /// Compute engine (overrides the config file)
    #[arg(short, long, value_enum)]
    backend: Option<BackendArg>,

    /// Radiation received before every tick (J)
    #[arg(short, long, default_value_t = 0.0)]
    radiation: f64,

    /// Enable the water evaporation rule
    #[arg(long)]
    evaporation: bool,

    /// Enable the carbon cycle rule
    #[arg(long)]
    carbon: bool,

    /// JSON simulation config, omitted fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the initial water temperatures
    #[arg(long)]
    seed: Option<u64>,

    /// Print a summary every N ticks (0 = only at the end)
    #[arg(long, default_value_t = 0)]
    report_interval: u32,
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };
    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let shape = Shape::new(&args.shape)?;

    println!("=== Planet Simulation Demo ===\n");

    let mut planet = Planet::new(shape, config);
    match args.seed {
        Some(seed) => planet.fill_with_water_with(&mut StdRng::seed_from_u64(seed)),
        None => planet.fill_with_water(),
    }

    if args.evaporation {
        planet.scheduler_mut().enable(WATER_EVAPORATION)?;
    }
    if args.carbon {
        planet.scheduler_mut().enable(CARBON_CYCLE)?;
    }

    let enabled: Vec<&str> = planet
        .scheduler()
        .rules()
        .iter()
        .filter(|rule| rule.is_enabled())
        .map(|rule| rule.name())
        .collect();
    info!(rules = ?enabled, ticks = args.ticks, "starting run");

    println!("{}\n", planet.summary());

    let mut total_ms = 0.0;
    for tick in 1..=args.ticks {
        if args.radiation != 0.0 {
            planet.receive_radiation(args.radiation);
        }
        planet.tick();
        total_ms += planet.last_tick_ms();

        if args.report_interval > 0 && tick % args.report_interval == 0 {
            println!(
                "[tick {tick}] t={:.1}s, T_avg={:.4} K",
                planet.simulation_time(),
                planet.average_temperature()
            );
        }
    }

    println!("\n{}", planet.summary());
    println!(
        "\nRan {} ticks in {:.2} ms ({:.3} ms/tick)",
        args.ticks,
        total_ms,
        total_ms / f64::from(args.ticks.max(1))
    );

    Ok(())
}
