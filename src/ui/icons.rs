//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::types::{BodyCategory, CameraMode};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
/// Recenter on the overview
pub const RECENTER: &str = egui_phosphor::regular::ARROWS_IN_CARDINAL;
pub const CLOSE: &str = egui_phosphor::regular::X;
pub const SLOWER: &str = egui_phosphor::regular::REWIND;
pub const FASTER: &str = egui_phosphor::regular::FAST_FORWARD;
pub const ORBIT: &str = egui_phosphor::regular::PATH;
pub const CROSSHAIR: &str = egui_phosphor::regular::CROSSHAIR;
pub const HAND: &str = egui_phosphor::regular::HAND_GRABBING;
pub const LIST: &str = egui_phosphor::regular::LIST;

pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const MOON: &str = egui_phosphor::regular::MOON;
pub const SATELLITE: &str = egui_phosphor::regular::BROADCAST;
/// Probe leaving the system
pub const ESCAPE: &str = egui_phosphor::regular::ARROW_UP_RIGHT;

pub fn category_icon(category: BodyCategory) -> &'static str {
    match category {
        BodyCategory::Star => SUN,
        BodyCategory::Planet => PLANET,
        BodyCategory::Satellite => SATELLITE,
        BodyCategory::Moon => MOON,
    }
}

pub fn camera_mode_icon(mode: CameraMode) -> &'static str {
    match mode {
        CameraMode::Free => HAND,
        CameraMode::Follow => CROSSHAIR,
    }
}
