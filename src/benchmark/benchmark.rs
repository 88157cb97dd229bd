use std::time::Instant;

use crate::error::Result;
use crate::simulation::galaxy::Galaxy;
use crate::simulation::noise::SeededNoise;
use crate::simulation::orbit::run_agent;
use crate::simulation::policy::DEFAULT_TEMPERATURE;
use crate::simulation::states::{Agent, NVec2};

/// Time `Galaxy::advance` for growing particle counts
/// Paste output directly into excel to graph
pub fn bench_galaxy_advance() -> Result<()> {
    let ns = [100, 200, 400, 800, 1600, 3200, 6400, 12800];
    let steps = 50; // advance calls timed per size
    let dt = 0.01;

    println!("N,ms_per_step");

    for n in ns {
        let mut noise = SeededNoise::new(42);
        let mut galaxy = Galaxy::new(100.0, n, 1000.0, &mut noise)?;
        galaxy.add_agent(NVec2::new(25.0, 0.0), NVec2::new(0.0, 3.0), None)?;

        // Warm up
        galaxy.advance(dt, &mut noise)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            galaxy.advance(dt, &mut noise)?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}

/// Time full single-agent runs of increasing length
pub fn bench_orbit() -> Result<()> {
    println!("steps,ms_total");

    for steps in (10_000..=100_000).step_by(10_000) {
        let mut noise = SeededNoise::new(42);
        let mut agent = Agent::default();

        let t0 = Instant::now();
        let len = run_agent(&mut agent, steps, 0.001, DEFAULT_TEMPERATURE, &mut noise)?.len();
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6}", len - 1, ms); // fewer steps than asked means the agent escaped
    }
    Ok(())
}
