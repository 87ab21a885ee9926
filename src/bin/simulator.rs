use clap::Parser;
use log::{info, LevelFilter};

use std::path::PathBuf;

use gravity_sim::file::{parse_scenario, read_file, DEFAULT_SCENARIO};
use gravity_sim::nbody::{Simulation, SimulationConfig};

/// Runs an N-body scenario and prints every body's state as it goes.
#[derive(Debug, Parser)]
struct Args {
    /// Scenario file to load; defaults to a Sun and an Earth-like planet
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Length of each step, in seconds
    #[arg(long, default_value_t = 3600.0)]
    dt: f64,
    /// Number of steps to take
    #[arg(long, default_value_t = 50)]
    steps: usize,
    /// Only print every N-th step
    #[arg(long, default_value_t = 1)]
    print_every: usize,
    /// Override Newton's constant, e.g. for scaled units
    #[arg(long)]
    gravitational_constant: Option<f64>,
    /// Distance added to every separation before the inverse square, in meters
    #[arg(long)]
    softening: Option<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let bodies = match &args.scenario {
        Some(path) => read_file(path)?,
        None => parse_scenario(DEFAULT_SCENARIO)?,
    };

    let defaults = SimulationConfig::default();
    let config = SimulationConfig {
        gravitational_constant: args
            .gravitational_constant
            .unwrap_or(defaults.gravitational_constant),
        softening: args.softening.unwrap_or(defaults.softening),
    };
    let mut simulation = Simulation::with_config(config)?;
    for body in bodies {
        simulation.add_body(body);
    }

    info!(
        "Starting simulation: {} bodies, dt = {} s, {} steps",
        simulation.len(),
        args.dt,
        args.steps
    );
    let initial_energy = simulation.total_energy();
    let initial_momentum = simulation.total_momentum();

    let print_every = args.print_every.max(1);
    for _ in 0..args.steps {
        simulation.update(args.dt);

        let step = simulation.steps();
        if step % print_every != 0 && step != args.steps {
            continue;
        }
        println!("Step {} (t = {} s)", step, simulation.time());
        for body in simulation.bodies() {
            let p = body.position();
            let v = body.velocity();
            println!(
                "  {:<10} pos: [{:e}, {:e}, {:e}]  vel: [{:e}, {:e}, {:e}]",
                body.name(),
                p.x,
                p.y,
                p.z,
                v.x,
                v.y,
                v.z
            );
        }
        println!("{}", "-".repeat(40));
    }

    let final_energy = simulation.total_energy();
    info!("Simulation complete after {} s", simulation.time());
    info!(
        "Total momentum: {:?} -> {:?} kg m/s",
        initial_momentum.as_slice(),
        simulation.total_momentum().as_slice()
    );
    match relative_drift(initial_energy, final_energy) {
        Some(drift) => info!(
            "Total energy: {:e} -> {:e} J (relative drift {:e})",
            initial_energy, final_energy, drift
        ),
        None => info!(
            "Total energy: {:e} -> {:e} J (absolute drift {:e} J)",
            initial_energy,
            final_energy,
            (final_energy - initial_energy).abs()
        ),
    }
    if let Some(com) = simulation.center_of_mass() {
        info!("Center of mass: {:?}", com.as_slice());
    }

    Ok(())
}

/// How far `current` has wandered from `initial`, as a fraction of `initial`.
/// There's no meaningful fraction of zero, so that case gives `None`.
#[allow(clippy::float_cmp)]
fn relative_drift(initial: f64, current: f64) -> Option<f64> {
    if initial == 0.0 {
        None
    } else {
        Some(((current - initial) / initial).abs())
    }
}
