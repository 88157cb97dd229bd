use egsim::{ScenarioConfig, Scenario, Outcome, ModeConfig};
use egsim::{save_comparison, save_galaxy, run_2d};
use egsim::{bench_galaxy_advance, bench_orbit};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "galaxy.yaml")]
    file_name: String,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("cannot open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Orbit(report) => {
            println!("conscious agent: {} trajectory points", report.conscious.len());
            println!("inert matter:    {} trajectory points", report.inert.len());
            println!("final distance, agent: {:.2}", report.conscious_final_distance());
            println!("final distance, inert: {:.2}", report.inert_final_distance());
            if report.agent_outran_inert() {
                println!("agent ended farther out than inert matter");
            } else {
                println!("agent did not outrun inert matter");
            }
        }
        Outcome::Galaxy(report) => {
            println!("galaxy: {} inert particles, {} steps", report.particle_count, report.steps);
            if let Some(agent) = &report.agent {
                println!(
                    "agent final position: ({:.1}, {:.1}), distance {:.1}",
                    agent.final_position.x, agent.final_position.y, agent.final_distance
                );
            }
            if report.escaped {
                println!("agent escaped the galaxy");
            } else if report.reached_goal {
                println!("agent reached its goal");
            } else {
                println!("agent neither escaped nor reached its goal");
            }
        }
    }
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu", log::LevelFilter::Warn)
        .filter_module("naga", log::LevelFilter::Warn)
        .init();

    let args = Args::parse();

    if args.bench {
        bench_orbit()?;
        bench_galaxy_advance()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if scenario.engine.viewer && scenario.engine.mode == ModeConfig::Galaxy {
        run_2d(scenario);
        return Ok(());
    }

    let outcome = scenario.run()?;
    print_outcome(&outcome);

    if scenario.engine.plot {
        match &outcome {
            Outcome::Orbit(report) => {
                save_comparison(report)?;
            }
            Outcome::Galaxy(report) => {
                save_galaxy(report)?;
            }
        }
    }

    Ok(())
}
