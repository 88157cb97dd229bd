use approx::assert_relative_eq;

use egsim::simulation::forces::coefficient_of_variation;
use egsim::simulation::orbit::ESCAPE_RADIUS;
use egsim::{Agent, ForceField, Galaxy, NVec2, NoNoise, Outcome, Regime, Scenario, ScenarioConfig, SeededNoise};
use egsim::{circular_orbit, compare, decide, density, predict_density, radial_acceleration, run_agent, stable_orbit_speed};

/// Galaxy used by the navigation tests: 30 particles out to r = 80,
/// agent launched at (25, 0) moving at (0, 3) with the default goal
pub fn navigation_galaxy(seed: u64) -> (Galaxy, SeededNoise) {
    let mut noise = SeededNoise::new(seed);
    let mut galaxy = Galaxy::new(80.0, 30, 1000.0, &mut noise).unwrap();
    galaxy.add_agent(NVec2::new(25.0, 0.0), NVec2::new(0.0, 3.0), None).unwrap();
    (galaxy, noise)
}

pub fn scenario_from_yaml(yaml: &str) -> Scenario {
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    Scenario::build_scenario(cfg).unwrap()
}

// ==================================================================================
// Entropy field tests
// ==================================================================================

#[test]
fn density_is_inverse_square_outside_core() {
    assert_relative_eq!(density(&NVec2::new(10.0, 0.0)), 0.01);
    assert_relative_eq!(density(&NVec2::new(3.0, 4.0)), 1.0 / 25.0);
    assert_eq!(density(&NVec2::new(1.0, 0.0)), 1.0);
}

#[test]
fn density_is_clamped_inside_core() {
    assert_eq!(density(&NVec2::zeros()), 1000.0);
    assert_eq!(density(&NVec2::new(0.5, 0.5)), 1000.0);
}

#[test]
fn predicted_density_looks_along_velocity() {
    let x = NVec2::new(10.0, 0.0);
    let v = NVec2::new(-1.0, 0.0);
    // (10,0) + 5·(-1,0) = (5,0)
    assert_relative_eq!(predict_density(&x, &v, 5), 1.0 / 25.0);
    assert!(predict_density(&x, &v, 5) > density(&x));
}

// ==================================================================================
// Force law tests
// ==================================================================================

#[test]
fn newton_inverse_square_ratio() {
    let ratio = radial_acceleration(10.0, Regime::Newton) / radial_acceleration(20.0, Regime::Newton);
    assert!((ratio - 4.0).abs() < 1e-9, "Newton ratio for doubled distance: {ratio}");
}

#[test]
fn newton_acceleration_strictly_decreases() {
    let radii = [5.0, 10.0, 20.0, 50.0, 100.0, 200.0];
    for w in radii.windows(2) {
        assert!(radial_acceleration(w[0], Regime::Newton) > radial_acceleration(w[1], Regime::Newton));
    }
}

#[test]
fn verlinde_matches_newton_close_in() {
    let n = radial_acceleration(5.0, Regime::Newton);
    let v = radial_acceleration(5.0, Regime::Verlinde);
    assert!((n - v).abs() < 0.05, "newton {n}, verlinde {v}");
}

#[test]
fn verlinde_exceeds_newton_far_out() {
    assert!(radial_acceleration(100.0, Regime::Verlinde) > radial_acceleration(100.0, Regime::Newton));
    assert!(stable_orbit_speed(100.0, Regime::Verlinde) > stable_orbit_speed(100.0, Regime::Newton));
}

#[test]
fn verlinde_rotation_curve_is_flatter() {
    let field = ForceField::default();
    let radii = [50.0, 75.0, 100.0, 125.0, 150.0];

    let newton = field.rotation_curve(&radii, Regime::Newton);
    let verlinde = field.rotation_curve(&radii, Regime::Verlinde);

    let cv_n = coefficient_of_variation(&newton);
    let cv_v = coefficient_of_variation(&verlinde);
    assert!(cv_v < cv_n, "verlinde cv {cv_v} should be below newton cv {cv_n}");
}

#[test]
fn circular_orbit_keeps_its_radius() {
    let field = ForceField::default();
    let (traj, mean_speed) = circular_orbit(&field, Regime::Newton, 20.0, 500, 0.01).unwrap();

    assert_eq!(traj.len(), 501);
    let expected = field.stable_orbit_speed(20.0, Regime::Newton);
    assert_relative_eq!(mean_speed, expected, max_relative = 0.02);
    for x in &traj {
        assert!((x.norm() - 20.0).abs() < 0.5, "drifted to r = {}", x.norm());
    }
}

// ==================================================================================
// Agent tests
// ==================================================================================

#[test]
fn agent_run_length_is_bounded() {
    let mut agent = Agent::default();
    let start = agent.body.x;
    let traj = run_agent(&mut agent, 200, 0.1, 0.1, &mut SeededNoise::new(11)).unwrap();

    assert!(traj.len() >= 2 && traj.len() <= 201, "length {}", traj.len());
    assert_eq!(traj[0], start);
    if traj.len() < 201 {
        let last = traj[traj.len() - 1];
        assert!(last.norm() > ESCAPE_RADIUS);
    }
}

#[test]
fn agent_runs_are_reproducible_with_a_seed() {
    let mut a = Agent::default();
    let mut b = Agent::default();
    let ta = run_agent(&mut a, 300, 0.1, 0.1, &mut SeededNoise::new(7)).unwrap().to_vec();
    let tb = run_agent(&mut b, 300, 0.1, 0.1, &mut SeededNoise::new(7)).unwrap().to_vec();
    assert_eq!(ta, tb);
}

#[test]
fn decisions_do_not_touch_the_state() {
    let x = NVec2::new(10.0, 0.0);
    let v = NVec2::new(0.0, 1.0);
    let first = decide(&x, &v, 5, 0.1, 0.1, &mut NoNoise).unwrap();
    let second = decide(&x, &v, 5, 0.1, 0.1, &mut NoNoise).unwrap();
    assert_eq!(first, second);
    assert_eq!(x, NVec2::new(10.0, 0.0));
    assert_eq!(density(&x), density(&x));
}

#[test]
fn comparison_starts_both_bodies_together() {
    let x0 = NVec2::new(10.0, 0.0);
    let v0 = NVec2::new(0.0, 1.0);
    let report = compare(x0, v0, 200, &mut SeededNoise::new(3)).unwrap();

    assert_eq!(report.conscious[0], x0);
    assert_eq!(report.inert[0], x0);
    assert!(report.conscious.len() <= 201);
    assert!(report.inert.len() <= 201);
    assert!(report.conscious_final_distance() >= 0.0);
}

// ==================================================================================
// Galaxy tests
// ==================================================================================

#[test]
fn agent_escapes_the_galaxy() {
    let (mut galaxy, mut noise) = navigation_galaxy(42);
    let report = galaxy.simulate(1500, 0.1, &mut noise).unwrap();

    assert!(report.escaped);
    assert!(!report.reached_goal);
    assert!(report.navigated());
    assert!(report.steps < 1500, "escape should end the run early");

    let agent = report.agent.unwrap();
    assert!(agent.final_distance > 96.0, "final distance {}", agent.final_distance);
    assert_relative_eq!(agent.final_distance, agent.final_position.norm());
}

#[test]
fn galaxy_runs_are_reproducible_with_a_seed() {
    let (mut g1, mut n1) = navigation_galaxy(9);
    let (mut g2, mut n2) = navigation_galaxy(9);
    let r1 = g1.simulate(300, 0.1, &mut n1).unwrap();
    let r2 = g2.simulate(300, 0.1, &mut n2).unwrap();

    assert_eq!(r1.steps, r2.steps);
    assert_eq!(r1.particle_trajectories, r2.particle_trajectories);
    assert_eq!(r1.agent.unwrap().trajectory, r2.agent.unwrap().trajectory);
}

#[test]
fn particles_stay_near_their_orbits() {
    let (mut galaxy, mut noise) = navigation_galaxy(1);
    galaxy.simulate(200, 0.01, &mut noise).unwrap();

    for p in galaxy.particles() {
        let drift = (p.body.radius() - p.orbital_radius).abs() / p.orbital_radius;
        assert!(drift < 0.1, "particle {} drifted {:.3}", p.id, drift);
    }
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn orbit_scenario_from_yaml() {
    let mut scenario = scenario_from_yaml(
        r#"
engine:
  mode: "orbit"
parameters:
  dt: 0.1
  steps: 50
  seed: 5
agent:
  x: [ 10.0, 0.0 ]
  v: [ 0.0, 1.0 ]
  horizon: 5
  strength: 0.1
"#,
    );
    assert_eq!(scenario.noise.seed(), 5);

    match scenario.run().unwrap() {
        Outcome::Orbit(report) => {
            assert!(report.conscious.len() >= 2 && report.conscious.len() <= 51);
            assert!(report.inert.len() >= 2 && report.inert.len() <= 51);
            assert_eq!(report.conscious[0], NVec2::new(10.0, 0.0));
        }
        Outcome::Galaxy(_) => panic!("orbit scenario produced a galaxy outcome"),
    }
}

#[test]
fn galaxy_scenario_from_yaml() {
    let mut scenario = scenario_from_yaml(
        r#"
engine:
  mode: "galaxy"
parameters:
  dt: 0.1
  steps: 1500
  seed: 42
  temperature: 0.1
agent:
  x: [ 25.0, 0.0 ]
  v: [ 0.0, 3.0 ]
galaxy:
  radius: 80.0
  particle_count: 30
"#,
    );

    match scenario.run().unwrap() {
        Outcome::Galaxy(report) => {
            assert_eq!(report.particle_count, 30);
            assert_eq!(report.goal, Some(NVec2::new(120.0, 0.0)));
            assert!(report.escaped);
        }
        Outcome::Orbit(_) => panic!("galaxy scenario produced an orbit outcome"),
    }
}

#[test]
fn scenario_rejects_bad_parameters() {
    let cfg: ScenarioConfig = serde_yaml::from_str(
        r#"
engine:
  mode: "orbit"
parameters:
  dt: 0.0
  steps: 10
"#,
    )
    .unwrap();
    assert!(Scenario::build_scenario(cfg).is_err());

    let cfg: ScenarioConfig = serde_yaml::from_str(
        r#"
engine:
  mode: "orbit"
parameters:
  dt: 0.1
  steps: 10
agent:
  x: [ 10.0, 0.0 ]
  v: [ 0.0, 1.0 ]
  horizon: 0
"#,
    )
    .unwrap();
    assert!(Scenario::build_scenario(cfg).is_err());
}
