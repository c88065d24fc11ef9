use plansim::{ScenarioConfig, SimulationWorld, TimeControl};

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Parser, Debug)]
#[command(about = "Sun and planets under Newtonian gravity")]
struct Args {
    /// Scenario YAML; the built-in solar system is used when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 8760)]
    steps: u64,

    /// Overrides the scenario's time multiplier (clamped to its floor)
    #[arg(long)]
    time_multiplier: Option<f64>,

    /// Print a status table every N frames (0 disables)
    #[arg(long, default_value_t = 720)]
    report_every: u64,

    /// Open the interactive 2D viewer instead of running headless
    #[cfg(feature = "viewer")]
    #[arg(long)]
    viewer: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    match &args.file {
        Some(path) => ScenarioConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load scenario {}", path.display())),
        None => Ok(ScenarioConfig::default()),
    }
}

fn print_report(world: &SimulationWorld) {
    println!(
        "t = {:.1} days, step {}",
        world.time() / SECONDS_PER_DAY,
        world.steps()
    );
    println!("{:<10} {:>10} {:>8} {:>7} {:>9}", "body", "distance", "orbit", "trail", "1st orbit");
    for view in world.views() {
        if let Some(planet) = view.planet {
            println!(
                "{:<10} {:>10} {:>8} {:>7} {:>9}",
                view.name,
                planet.distance_label(),
                if planet.orbit_completed { "done" } else { "-" },
                planet.recent_trail.len(),
                planet.full_first_orbit.len(),
            );
        }
    }
}

fn run_headless(mut world: SimulationWorld, clock: TimeControl, args: &Args) -> Result<()> {
    let e0 = world.total_energy();

    for frame in 1..=args.steps {
        world.step(clock.dt())?;
        if args.report_every > 0 && frame % args.report_every == 0 {
            print_report(&world);
        }
    }

    print_report(&world);
    let drift = (world.total_energy() - e0) / e0.abs();
    println!("relative energy drift: {:.3e}", drift);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scenario_cfg = load_scenario(&args)?;

    let world = SimulationWorld::from_config(&scenario_cfg).context("invalid scenario")?;

    let mut clock = TimeControl::new(world.parameters());
    if let Some(m) = args.time_multiplier {
        clock.set_multiplier(m);
    }
    log::info!(
        "{} bodies, dt = {} s ({}x)",
        world.bodies().len(),
        clock.dt(),
        clock.multiplier()
    );

    #[cfg(feature = "viewer")]
    if args.viewer {
        plansim::run_2d(world, clock);
        return Ok(());
    }

    run_headless(world, clock, &args)
}
