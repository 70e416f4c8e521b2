//! Background rendering: starfield and the debris belts.
//!
//! There is no ambient fill; the star's point light lights the scene.

use bevy::prelude::*;
use rand::Rng;

use crate::simulation::{Orrery, OrrerySet};

/// Number of background stars.
const STAR_COUNT: usize = 1500;

/// Stars sit on a shell between these radii.
const STAR_SHELL: (f32, f32) = (700.0, 900.0);

/// Slow drift of the starfield about +Y, radians per second.
const STARFIELD_DRIFT: f32 = 0.005;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_belts))
            .add_systems(Update, (drift_starfield, sync_belts).in_set(OrrerySet::Sync));
    }
}

#[derive(Component)]
struct Starfield;

/// Parent entity of one debris belt's rocks.
#[derive(Component)]
pub struct BeltVisual {
    /// Index into `Orrery::belts`.
    pub index: usize,
}

/// Spawn a shell of randomly placed stars.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(0.6));

    let mut rng = rand::rng();
    commands
        .spawn((Starfield, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for _ in 0..STAR_COUNT {
                // Uniform direction on the sphere
                let y: f32 = rng.random_range(-1.0..1.0);
                let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
                let ring = (1.0 - y * y).sqrt();
                let radius = rng.random_range(STAR_SHELL.0..STAR_SHELL.1);
                let scale = rng.random_range(0.5..1.5);

                parent.spawn((
                    Mesh3d(star_mesh.clone()),
                    MeshMaterial3d(star_material.clone()),
                    Transform::from_translation(
                        Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * radius,
                    )
                    .with_scale(Vec3::splat(scale)),
                ));
            }
        });

    info!("Spawned {} background stars", STAR_COUNT);
}

fn drift_starfield(time: Res<Time>, mut query: Query<&mut Transform, With<Starfield>>) {
    for mut transform in query.iter_mut() {
        transform.rotation = Quat::from_rotation_y(time.elapsed_secs() * STARFIELD_DRIFT);
    }
}

/// Spawn one mesh per belt rock under a per-belt parent.
fn spawn_belts(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orrery: Res<Orrery>,
) {
    let rock_mesh = meshes.add(Sphere::new(1.0).mesh().uv(6, 4));

    for (index, belt) in orrery.belts.iter().enumerate() {
        let material = materials.add(StandardMaterial {
            base_color: if index == 0 {
                Color::srgb(0.66, 0.61, 0.56)
            } else {
                Color::srgb(0.72, 0.77, 0.82)
            },
            perceptual_roughness: 0.8,
            ..default()
        });

        commands
            .spawn((
                BeltVisual { index },
                Transform::default(),
                Visibility::default(),
                Name::new(belt.config().name),
            ))
            .with_children(|parent| {
                for rock in belt.rocks() {
                    let tumble = rock.tumble.as_vec3();
                    parent.spawn((
                        Mesh3d(rock_mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform::from_translation(rock.offset.as_vec3())
                            .with_rotation(Quat::from_euler(EulerRot::XYZ, tumble.x, tumble.y, tumble.z))
                            .with_scale(Vec3::splat(rock.size as f32)),
                    ));
                }
            });

        info!("Spawned {} with {} rocks", belt.config().name, belt.rocks().len());
    }
}

fn sync_belts(orrery: Res<Orrery>, mut query: Query<(&BeltVisual, &mut Transform)>) {
    for (visual, mut transform) in query.iter_mut() {
        if let Some(belt) = orrery.belts.get(visual.index) {
            transform.rotation = Quat::from_rotation_y(belt.rotation() as f32);
        }
    }
}
