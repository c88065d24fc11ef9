use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::simulation::clock::TimeControl;
use crate::simulation::params::{AU, DIM_FACTOR};
use crate::simulation::states::{NVec2, Rgb};
use crate::simulation::world::SimulationWorld;

const INITIAL_SCALE: f64 = 60.0 / AU; // pixels per metre
const ZOOM_FACTOR: f64 = 1.5;
const MIN_BODY_PX: f64 = 2.0;

#[derive(Resource)]
struct SimWorld(SimulationWorld);

#[derive(Resource)]
struct Clock(TimeControl);

#[derive(Resource)]
struct ViewScale(f64);

#[derive(Component)]
struct BodyIndex(pub usize);

pub fn run_2d(world: SimulationWorld, clock: TimeControl) {
    log::info!("run_2d: starting Bevy 2D viewer with {} bodies", world.bodies().len());

    App::new()
        .insert_resource(SimWorld(world))
        .insert_resource(Clock(clock))
        .insert_resource(ViewScale(INITIAL_SCALE))
        .insert_resource(ClearColor(Color::srgb_u8(15, 15, 15)))
        // env_logger already owns the global logger
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                input_system,
                physics_step_system,
                sync_transforms_system,
                draw_trails_system,
            )
                .chain(),
        )
        .run();
}

fn rgb(c: Rgb) -> Color {
    Color::srgb_u8(c[0], c[1], c[2])
}

fn to_screen(p: NVec2, scale: f64) -> Vec2 {
    Vec2::new((p.x * scale) as f32, (p.y * scale) as f32)
}

fn setup_bodies_system(
    mut commands: Commands,
    world: Res<SimWorld>,
    scale: Res<ViewScale>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    // unit circle, scaled per frame so bodies stay visible at any zoom
    let mesh = Mesh2dHandle(meshes.add(Circle::new(1.0)));

    for (i, view) in world.0.views().enumerate() {
        let pos = to_screen(view.position, scale.0);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: mesh.clone(),
                material: materials.add(ColorMaterial::from(rgb(view.color))),
                transform: Transform::from_xyz(pos.x, pos.y, 1.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut world: ResMut<SimWorld>,
    mut clock: ResMut<Clock>,
    mut scale: ResMut<ViewScale>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        clock.0.speed_up();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        clock.0.slow_down();
    }
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        scale.0 *= ZOOM_FACTOR;
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        scale.0 /= ZOOM_FACTOR;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        world.0.restart();
        scale.0 = INITIAL_SCALE;
    }
}

fn physics_step_system(mut world: ResMut<SimWorld>, clock: Res<Clock>) {
    if let Err(e) = world.0.step(clock.0.dt()) {
        log::error!("step failed: {e}");
    }
}

fn sync_transforms_system(
    world: Res<SimWorld>,
    scale: Res<ViewScale>,
    mut query: Query<(&BodyIndex, &mut Transform)>,
) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = world.0.body(*i) {
            let pos = to_screen(b.x, scale.0);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
            transform.scale = Vec3::splat((b.radius * scale.0).max(MIN_BODY_PX) as f32);
        }
    }
}

fn draw_trails_system(world: Res<SimWorld>, scale: Res<ViewScale>, mut gizmos: Gizmos) {
    for (b, view) in world.0.bodies().iter().zip(world.0.views()) {
        let Some(planet) = view.planet else {
            continue;
        };

        if planet.full_first_orbit.len() > 2 {
            gizmos.linestrip_2d(
                planet.full_first_orbit.iter().map(|p| to_screen(*p, scale.0)),
                rgb(b.dimmed_color(DIM_FACTOR)),
            );
        }
        if planet.recent_trail.len() > 2 {
            gizmos.linestrip_2d(
                planet.recent_trail.iter().map(|p| to_screen(*p, scale.0)),
                rgb(view.color),
            );
        }
    }
}
