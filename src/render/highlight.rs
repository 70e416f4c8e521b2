//! Pointer picking: hover detection, click-to-select and the selection
//! marker.

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::{CLICK_TOLERANCE_PX, MainCamera, PointerDrag, camera_orbit_input};
use crate::simulation::{BodyClicked, Orrery, OrrerySet};
use crate::types::{BodyCategory, BodyKey};

/// Fraction of the camera distance used as the smallest pick radius, so tiny
/// bodies stay clickable from afar.
const MIN_PICK_FRACTION: f64 = 0.012;

/// Plugin providing hover and click picking.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredBody>()
            .add_systems(
                Update,
                (detect_hover, emit_clicks)
                    .chain()
                    .after(camera_orbit_input)
                    .in_set(OrrerySet::Input),
            )
            .add_systems(
                Update,
                (draw_selection_marker, draw_satellite_glow).in_set(OrrerySet::Sync),
            );
    }
}

/// Body currently under the pointer.
#[derive(Resource, Default, PartialEq)]
pub struct HoveredBody {
    pub key: Option<BodyKey>,
}

/// Distance along a unit ray to its first hit with a sphere.
pub fn ray_sphere_distance(origin: DVec3, direction: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else if near < 0.0 {
        Some(far)
    } else {
        Some(near)
    }
}

/// Nearest body in the frame hit by the ray.
pub fn pick_body(orrery: &Orrery, origin: DVec3, direction: DVec3) -> Option<BodyKey> {
    let mut closest: Option<(&BodyKey, f64)> = None;
    for body in orrery.catalog.iter() {
        let Some(center) = orrery.position(&body.key) else {
            continue;
        };
        let pick_radius = body
            .radius
            .max(center.distance(origin) * MIN_PICK_FRACTION);
        let Some(distance) = ray_sphere_distance(origin, direction, center, pick_radius) else {
            continue;
        };
        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((&body.key, distance));
        }
    }
    closest.map(|(key, _)| key.clone())
}

/// Cast the cursor ray and record the body under it.
fn detect_hover(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut contexts: EguiContexts,
    orrery: Res<Orrery>,
    mut hovered: ResMut<HoveredBody>,
) {
    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false);

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position().filter(|_| !over_ui) else {
        hovered.set_if_neq(HoveredBody { key: None });
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    let key = pick_body(&orrery, ray.origin.as_dvec3(), ray.direction.as_dvec3());
    hovered.set_if_neq(HoveredBody { key });
}

/// A press and release without dragging selects the hovered body.
fn emit_clicks(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    drag: Res<PointerDrag>,
    hovered: Res<HoveredBody>,
    orrery: Res<Orrery>,
    mut clicks: MessageWriter<BodyClicked>,
) {
    if !mouse_buttons.just_released(MouseButton::Left) {
        return;
    }
    if !drag.in_view || drag.travel > CLICK_TOLERANCE_PX {
        return;
    }
    let Some(key) = &hovered.key else {
        return;
    };
    let Some(world_position) = orrery.position(key) else {
        return;
    };
    clicks.write(BodyClicked {
        key: key.clone(),
        world_position,
    });
}

/// Wire sphere around the selected body.
fn draw_selection_marker(mut gizmos: Gizmos, orrery: Res<Orrery>) {
    let Some(body) = orrery.selected_body() else {
        return;
    };
    let Some(position) = orrery.position(&body.key) else {
        return;
    };
    let radius = (body.radius * 1.6) as f32;
    gizmos.sphere(
        Isometry3d::from_translation(position.as_vec3()),
        radius,
        Color::srgba(0.0, 1.0, 1.0, 0.6),
    );
}

/// Hovered spacecraft glow instead of growing.
fn draw_satellite_glow(mut gizmos: Gizmos, hovered: Res<HoveredBody>, orrery: Res<Orrery>) {
    let Some(key) = hovered.key.as_ref().filter(|key| key.category == BodyCategory::Satellite) else {
        return;
    };
    let Some(position) = orrery.position(key) else {
        return;
    };
    let glow = Color::srgba(0.4, 0.9, 1.0, 0.9);
    let isometry = Isometry3d::from_translation(position.as_vec3());
    gizmos.sphere(isometry, 0.25, glow);
    gizmos.sphere(isometry, 0.35, glow.with_alpha(0.4));
}
