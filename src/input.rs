//! Keyboard shortcuts.
//!
//! - Space: pause / resume
//! - `[` / `]`: halve / double the speed multiplier
//! - `1`: back to 1x
//! - F: toggle follow mode
//! - R or Home: recenter on the overview
//! - Escape: clear the selection

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::simulation::{ClearSelection, OrrerySet, RecenterCamera};
use crate::types::{CameraMode, SimulationSettings};

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts.in_set(OrrerySet::Input));
    }
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut settings: ResMut<SimulationSettings>,
    mut recenter: MessageWriter<RecenterCamera>,
    mut clear: MessageWriter<ClearSelection>,
) {
    // Typing into a text field is not a shortcut
    if contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
    {
        return;
    }

    if keys.just_pressed(KeyCode::Space) {
        settings.paused = !settings.paused;
        info!("Simulation {}", if settings.paused { "paused" } else { "running" });
    }

    if keys.just_pressed(KeyCode::BracketLeft) {
        settings.scale_speed(0.5);
        info!("Speed: {}x", settings.speed_multiplier());
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        settings.scale_speed(2.0);
        info!("Speed: {}x", settings.speed_multiplier());
    }
    if keys.just_pressed(KeyCode::Digit1) && settings.set_speed_multiplier(1.0).is_ok() {
        info!("Speed: 1x");
    }

    if keys.just_pressed(KeyCode::KeyF) {
        settings.toggle_camera_mode();
        info!(
            "Camera mode: {}",
            match settings.camera_mode {
                CameraMode::Free => "free",
                CameraMode::Follow => "follow",
            }
        );
    }

    if keys.just_pressed(KeyCode::KeyR) || keys.just_pressed(KeyCode::Home) {
        recenter.write(RecenterCamera);
    }
    if keys.just_pressed(KeyCode::Escape) {
        clear.write(ClearSelection);
    }
}
