//! Control panel: pause, speed, layer toggles, camera mode and recenter.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, icons};
use crate::simulation::RecenterCamera;
use crate::types::{CameraMode, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, SimulationSettings};

/// System that renders the control panel at the bottom left.
pub fn control_panel(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimulationSettings>,
    mut recenter: MessageWriter<RecenterCamera>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("controls")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .frame(
            egui::Frame::new()
                .fill(colors::PANEL_BG)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(14, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                render_play_pause(ui, &mut settings);
                ui.separator();
                render_speed(ui, &mut settings);
            });

            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.checkbox(&mut settings.show_orbits, format!("{} Orbits", icons::ORBIT));
                ui.checkbox(&mut settings.show_moons, format!("{} Moons", icons::MOON));
                ui.checkbox(
                    &mut settings.show_satellites,
                    format!("{} Satellites", icons::SATELLITE),
                );
            });

            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Camera").color(colors::TEXT_DIM));
                for (mode, label) in [(CameraMode::Free, "Free"), (CameraMode::Follow, "Follow (F)")] {
                    let text = format!("{} {}", icons::camera_mode_icon(mode), label);
                    if ui.selectable_label(settings.camera_mode == mode, text).clicked() {
                        settings.camera_mode = mode;
                    }
                }

                ui.separator();

                if ui
                    .button(format!("{} Recenter", icons::RECENTER))
                    .on_hover_text("Back to the overview (R)")
                    .clicked()
                {
                    recenter.write(RecenterCamera);
                }
            });

            if settings.camera_interacting {
                ui.label(
                    egui::RichText::new(format!("{} Paused while dragging", icons::HAND))
                        .small()
                        .color(colors::TEXT_DIM),
                );
            }
        });
}

fn render_play_pause(ui: &mut egui::Ui, settings: &mut SimulationSettings) {
    let (icon, color, tooltip) = if settings.paused {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(20.0).color(color))
        .min_size(egui::vec2(36.0, 30.0));
    if ui.add(button).on_hover_text(tooltip).clicked() {
        settings.paused = !settings.paused;
    }
}

fn render_speed(ui: &mut egui::Ui, settings: &mut SimulationSettings) {
    if ui
        .button(icons::SLOWER)
        .on_hover_text("Half speed ([)")
        .clicked()
    {
        settings.scale_speed(0.5);
    }

    let mut speed = settings.speed_multiplier();
    let slider = egui::Slider::new(&mut speed, MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER)
        .logarithmic(true)
        .max_decimals(3)
        .suffix("x");
    if ui.add(slider).changed() {
        if let Err(err) = settings.set_speed_multiplier(speed) {
            warn!("{err}");
        }
    }

    if ui
        .button(icons::FASTER)
        .on_hover_text("Double speed (])")
        .clicked()
    {
        settings.scale_speed(2.0);
    }
}
