use bevy::log::LogPlugin;
use bevy::math::primitives::Cuboid;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tracing::{debug, info};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec3, Texture};

/// Component tagging each cube with its body index into Scenario.state.bodies
#[derive(Component)]
struct BodyIndex3(pub usize);

/// Background colour, pale blue
const CLEAR_COLOR: Color = Color::srgb(0.9, 0.9, 1.0);

/// The scene box spans z in [-15, -5]; look down -z from the origin
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.0, -10.0);

pub fn run_3d(scenario: Scenario) {
    info!(bodies = scenario.state.len(), "starting Bevy 3D viewer");
    let tick = Time::<Fixed>::from_seconds(scenario.engine.tick_ms / 1000.0);

    App::new()
        .insert_resource(scenario)
        .insert_resource(tick)
        // main() already installed a tracing subscriber
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_3d)
        .add_systems(FixedUpdate, physics_step_3d)
        .add_systems(Update, (spawn_on_click, spawn_new_cubes, sync_transforms_3d).chain())
        .run();
}

/// Startup system: camera and light; cubes are spawned by `spawn_new_cubes`
fn setup_3d(mut commands: Commands) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(CLEAR_COLOR),
            ..Default::default()
        },
        // 45 degree vertical field of view
        projection: PerspectiveProjection {
            fov: std::f32::consts::FRAC_PI_4,
            ..Default::default()
        }
        .into(),
        transform: Transform::from_xyz(0.0, 0.0, 0.0).looking_at(CAMERA_TARGET, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2_000_000.0,
            range: 100.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(2.0, 4.0, 0.0),
        ..Default::default()
    });
}

/// Left click adds a small cube at the cursor
fn spawn_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let cx = (cursor.x / window.width()) as f64;
    let cy = (cursor.y / window.height()) as f64;
    let id = scenario.spawn_at_cursor(cx, cy);
    debug!(id = id.0, "click spawn");
}

/// One physics tick per fixed step, on the same clock as headless runs
fn physics_step_3d(mut scenario: ResMut<Scenario>) {
    scenario.run_fixed(1);
}

/// Give every body that has no entity yet a cube mesh
fn spawn_new_cubes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
    mut spawned: Local<usize>,
) {
    let bodies = &scenario.state.bodies;
    for (i, b) in bodies.iter().enumerate().skip(*spawned) {
        let edge = (2.0 * b.size) as f32;

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::new(edge, edge, edge).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: texture_color(b.texture),
                    ..Default::default()
                }),
                transform: body_transform(b),
                ..Default::default()
            },
            BodyIndex3(i),
        ));
    }
    *spawned = bodies.len();
}

fn sync_transforms_3d(scenario: Res<Scenario>, mut query: Query<(&BodyIndex3, &mut Transform)>) {
    for (BodyIndex3(i), mut transform) in &mut query {
        if let Some(b) = scenario.state.bodies.get(*i) {
            *transform = body_transform(b);
        }
    }
}

/// Model transform: translate to the body, then rotate about its axis
fn body_transform(b: &Body) -> Transform {
    let pose = b.pose();
    let q = pose.rotation();
    Transform {
        translation: to_vec3(&pose.translation),
        rotation: Quat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32),
        ..Default::default()
    }
}

fn to_vec3(x: &NVec3) -> Vec3 {
    Vec3::new(x.x as f32, x.y as f32, x.z as f32)
}

/// Flat stand-in colour for each logo
fn texture_color(texture: Texture) -> Color {
    match texture {
        Texture::UccLogo => Color::srgb(0.1, 0.3, 0.8),
        Texture::UnderConstruction => Color::srgb(1.0, 0.8, 0.0),
        Texture::Html5 => Color::srgb(0.89, 0.3, 0.15),
        Texture::Steamroller => Color::srgb(0.4, 0.4, 0.4),
        Texture::Uwa => Color::srgb(0.0, 0.2, 0.5),
        Texture::Guild => Color::srgb(0.6, 0.1, 0.1),
        Texture::Netapp => Color::srgb(0.0, 0.45, 0.8),
    }
}
