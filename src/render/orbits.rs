//! Orbit path and trail rendering using Bevy Gizmos.
//!
//! Both are gated on the `show_orbits` setting. Paths come from the orrery's
//! cached samples, placed around each body's current parent position; trails
//! fade from transparent (oldest) to the body color (newest).

use bevy::prelude::*;

use crate::render::bodies::body_color;
use crate::simulation::{Orrery, OrrerySet};
use crate::types::{BodyCategory, BodyKey, SimulationSettings};

/// Alpha of orbit path lines.
const PATH_ALPHA: f32 = 0.25;

/// Alpha of the newest trail segment.
const TRAIL_ALPHA: f32 = 0.8;

/// Plugin providing orbit path and trail visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (draw_orbit_paths, draw_trails).in_set(OrrerySet::Sync),
        );
    }
}

fn path_color(key: &BodyKey) -> Color {
    match key.category {
        BodyCategory::Satellite => Color::srgba(0.4, 0.9, 0.5, PATH_ALPHA),
        BodyCategory::Moon => Color::srgba(0.6, 0.6, 0.6, PATH_ALPHA),
        _ => body_color(key).with_alpha(PATH_ALPHA),
    }
}

fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<SimulationSettings>,
    mut orrery: ResMut<Orrery>,
) {
    if !settings.show_orbits {
        return;
    }
    for line in orrery.orbit_lines() {
        gizmos.linestrip(
            line.points.iter().map(|point| point.as_vec3()),
            path_color(&line.key),
        );
    }
}

fn draw_trails(mut gizmos: Gizmos, settings: Res<SimulationSettings>, orrery: Res<Orrery>) {
    if !settings.show_orbits {
        return;
    }
    for (key, history) in orrery.trails.iter() {
        if history.len() < 2 || orrery.position(key).is_none() {
            continue;
        }
        let color = body_color(key);
        let last = (history.len() - 1) as f32;
        gizmos.linestrip_gradient(history.iter().enumerate().map(|(i, point)| {
            (
                point.as_vec3(),
                color.with_alpha(TRAIL_ALPHA * i as f32 / last),
            )
        }));
    }
}
