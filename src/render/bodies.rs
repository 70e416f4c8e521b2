//! Body meshes: spawned once from the catalog, then placed, spun and scaled
//! every frame from the orrery.

use bevy::prelude::*;

use crate::catalog::Body;
use crate::render::highlight::HoveredBody;
use crate::simulation::{Orrery, OrrerySet};
use crate::types::{BodyCategory, BodyKey};

/// Scale applied to a hovered planet or star.
pub const PLANET_HOVER_SCALE: f32 = 1.2;

/// Scale applied to a hovered moon.
pub const MOON_HOVER_SCALE: f32 = 1.3;

/// Component linking a mesh entity to its catalog body.
#[derive(Component)]
pub struct BodyVisual {
    pub key: BodyKey,
}

/// Plugin spawning and updating body meshes.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies)
            .add_systems(Update, sync_body_transforms.in_set(OrrerySet::Sync));
    }
}

/// Approximate color of a body.
pub fn body_color(key: &BodyKey) -> Color {
    match (key.category, key.id.as_str()) {
        (BodyCategory::Star, _) => Color::srgb(1.0, 0.85, 0.3),
        (_, "mercury") => Color::srgb(0.6, 0.6, 0.6),
        (_, "venus") => Color::srgb(0.9, 0.8, 0.55),
        (_, "earth") => Color::srgb(0.2, 0.5, 0.85),
        (_, "mars") => Color::srgb(0.8, 0.35, 0.2),
        (_, "jupiter") => Color::srgb(0.8, 0.65, 0.5),
        (_, "saturn") => Color::srgb(0.9, 0.8, 0.55),
        (_, "uranus") => Color::srgb(0.55, 0.8, 0.9),
        (_, "neptune") => Color::srgb(0.25, 0.45, 0.9),
        (_, "pluto") => Color::srgb(0.8, 0.7, 0.6),
        (BodyCategory::Moon, "io") => Color::srgb(0.9, 0.8, 0.3),
        (BodyCategory::Moon, "europa") => Color::srgb(0.85, 0.85, 0.8),
        (BodyCategory::Moon, "titan") => Color::srgb(0.8, 0.6, 0.3),
        (BodyCategory::Moon, _) => Color::srgb(0.65, 0.65, 0.65),
        (BodyCategory::Satellite, _) => Color::srgb(0.85, 0.85, 0.9),
        (BodyCategory::Planet, _) => Color::srgb(0.7, 0.7, 0.7),
    }
}

/// Hover scale for a body category.
pub fn hover_scale(category: BodyCategory) -> f32 {
    match category {
        BodyCategory::Star | BodyCategory::Planet => PLANET_HOVER_SCALE,
        BodyCategory::Moon => MOON_HOVER_SCALE,
        // Satellites get a glow instead, see `highlight`
        BodyCategory::Satellite => 1.0,
    }
}

/// Spin angle wrapped to [0, 2π) before narrowing, so long sessions keep
/// f32 precision.
pub fn spin_angle(spin: f64) -> f32 {
    spin.rem_euclid(std::f64::consts::TAU) as f32
}

fn body_mesh(body: &Body) -> Mesh {
    let radius = body.radius as f32;
    match body.key.category {
        // Spacecraft read better as small boxes than as specks
        BodyCategory::Satellite => Cuboid::from_length(radius * 2.0).into(),
        _ => Sphere::new(radius).mesh().uv(32, 18),
    }
}

fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orrery: Res<Orrery>,
) {
    for body in orrery.catalog.iter() {
        let color = body_color(&body.key);
        let is_star = body.key.category == BodyCategory::Star;
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: if is_star {
                color.to_linear() * 4.0
            } else {
                LinearRgba::BLACK
            },
            unlit: is_star,
            ..default()
        });

        let translation = orrery
            .position(&body.key)
            .map(|pos| pos.as_vec3())
            .unwrap_or(Vec3::ZERO);

        let mut entity = commands.spawn((
            Mesh3d(meshes.add(body_mesh(body))),
            MeshMaterial3d(material),
            Transform::from_translation(translation),
            BodyVisual {
                key: body.key.clone(),
            },
            Name::new(body.key.to_string()),
        ));

        if is_star {
            entity.with_child(PointLight {
                intensity: 2.0e9,
                range: 2000.0,
                shadows_enabled: false,
                ..default()
            });
        }

        if body.key == BodyKey::planet("saturn") {
            let ring = meshes.add(Annulus::new(body.radius as f32 * 1.4, body.radius as f32 * 2.3));
            let ring_material = materials.add(StandardMaterial {
                base_color: Color::srgba(0.85, 0.75, 0.55, 0.7),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            });
            entity.with_child((
                Mesh3d(ring),
                MeshMaterial3d(ring_material),
                Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2 + 0.47)),
            ));
        }
    }

    info!("Spawned {} body meshes", orrery.catalog.len());
}

/// Place, spin and scale body meshes. Bodies missing from the frame (hidden
/// layers) are hidden.
fn sync_body_transforms(
    orrery: Res<Orrery>,
    hovered: Res<HoveredBody>,
    mut query: Query<(&BodyVisual, &mut Transform, &mut Visibility)>,
) {
    for (visual, mut transform, mut visibility) in query.iter_mut() {
        let Some(position) = orrery.position(&visual.key) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };
        visibility.set_if_neq(Visibility::Inherited);

        let spin = orrery
            .catalog
            .get(&visual.key)
            .map(|body| spin_angle(body.spin))
            .unwrap_or(0.0);
        let scale = if hovered.key.as_ref() == Some(&visual.key) {
            hover_scale(visual.key.category)
        } else {
            1.0
        };

        transform.translation = position.as_vec3();
        transform.rotation = Quat::from_rotation_y(spin);
        transform.scale = Vec3::splat(scale);
    }
}
