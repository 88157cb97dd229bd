use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::log::LogPlugin;

use crate::simulation::galaxy::{Galaxy, ESCAPE_FACTOR};
use crate::simulation::scenario::{Scenario, Simulation};
use crate::simulation::states::NVec2;

/// Which simulated body an entity mirrors
#[derive(Component)]
enum Tracked {
    Particle(usize),
    Agent,
}

/// World-space -> screen-space scaling factor
#[derive(Resource)]
struct ViewScale(f32);

#[derive(Resource, Default)]
struct RunState {
    finished: bool,
}

const VIEW_HALF_HEIGHT: f32 = 340.0; // pixels from center to the escape circle

/// Open a 2D window that steps the galaxy once per frame
///
/// Only galaxy scenarios have something to show; the window stays static for
/// an orbit scenario. Logging goes through the binary's logger, so bevy's own
/// `LogPlugin` is disabled.
pub fn run_2d(scenario: Scenario) {
    let scale = match &scenario.simulation {
        Simulation::Galaxy(g) => {
            log::info!("run_2d: starting viewer with {} particles", g.particles().len());
            VIEW_HALF_HEIGHT / (ESCAPE_FACTOR * g.galaxy_radius) as f32
        }
        Simulation::Orbit { .. } => {
            log::warn!("run_2d: orbit scenarios have no live view");
            1.0
        }
    };

    App::new()
        .insert_resource(scenario)
        .insert_resource(ViewScale(scale))
        .insert_resource(RunState::default())
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (physics_step_system, sync_transforms_system).chain())
        .run();
}

fn screen(x: &NVec2, scale: f32) -> Vec3 {
    Vec3::new(x.x as f32 * scale, x.y as f32 * scale, 0.0)
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    scale: Res<ViewScale>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let Simulation::Galaxy(galaxy) = &scenario.simulation else {
        return;
    };

    // central mass
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(meshes.add(Circle::new(6.0))),
        material: materials.add(ColorMaterial::from(Color::srgb(0.4, 0.4, 0.4))),
        transform: Transform::from_xyz(0.0, 0.0, -1.0),
        ..Default::default()
    });

    let particle_mesh = Mesh2dHandle(meshes.add(Circle::new(2.0)));
    let particle_material = materials.add(ColorMaterial::from(Color::srgb(0.55, 0.65, 1.0)));
    for (i, p) in galaxy.particles().iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: particle_mesh.clone(),
                material: particle_material.clone(),
                transform: Transform::from_translation(screen(&p.body.x, scale.0)),
                ..Default::default()
            },
            Tracked::Particle(i),
        ));
    }

    if let Some(agent) = galaxy.agent() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(4.0))),
                material: materials.add(ColorMaterial::from(Color::srgb(1.0, 0.2, 0.2))),
                transform: Transform::from_translation(screen(&agent.body.x, scale.0).with_z(1.0)),
                ..Default::default()
            },
            Tracked::Agent,
        ));
    }

    if let Some(goal) = galaxy.goal() {
        commands.spawn(MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(5.0))),
            material: materials.add(ColorMaterial::from(Color::srgb(0.2, 0.8, 0.3))),
            transform: Transform::from_translation(screen(&goal, scale.0)),
            ..Default::default()
        });
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut state: ResMut<RunState>) {
    if state.finished {
        return;
    }

    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario {
        simulation,
        parameters,
        noise,
        ..
    } = &mut *scenario;

    let Simulation::Galaxy(galaxy) = simulation else {
        state.finished = true;
        return;
    };

    if galaxy.steps() >= parameters.steps {
        log::info!("viewer: step budget of {} spent", parameters.steps);
        state.finished = true;
        return;
    }

    if let Err(e) = galaxy.advance(parameters.dt, noise) {
        log::warn!("viewer: simulation stopped: {e}");
        state.finished = true;
        return;
    }

    if galaxy.agent_escaped() || galaxy.agent_at_goal() {
        log_arrival(galaxy);
        state.finished = true;
    }
}

fn log_arrival(galaxy: &Galaxy) {
    if galaxy.agent_escaped() {
        log::info!("viewer: agent escaped at step {}", galaxy.steps());
    } else {
        log::info!("viewer: agent reached its goal at step {}", galaxy.steps());
    }
}

fn sync_transforms_system(
    scenario: Res<Scenario>,
    scale: Res<ViewScale>,
    mut query: Query<(&Tracked, &mut Transform)>,
) {
    let Simulation::Galaxy(galaxy) = &scenario.simulation else {
        return;
    };

    for (tracked, mut transform) in &mut query {
        let x = match tracked {
            Tracked::Particle(i) => galaxy.particles().get(*i).map(|p| p.body.x),
            Tracked::Agent => galaxy.agent().map(|a| a.body.x),
        };
        if let Some(x) = x {
            transform.translation.x = x.x as f32 * scale.0;
            transform.translation.y = x.y as f32 * scale.0;
        }
    }
}
