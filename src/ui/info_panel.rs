//! Info card for the current selection.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, icons};
use crate::catalog::Body;
use crate::orbit::OrbitGeometry;
use crate::simulation::{ClearSelection, Orrery};
use crate::types::{BodyCategory, CameraMode, SimulationSettings};

/// System that renders the info card at the top right.
pub fn info_panel(
    mut contexts: EguiContexts,
    orrery: Res<Orrery>,
    mut settings: ResMut<SimulationSettings>,
    mut clear: MessageWriter<ClearSelection>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(body) = orrery.selected_body() else {
        return;
    };

    egui::Window::new("info")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .default_width(240.0)
        .frame(
            egui::Frame::new()
                .fill(colors::PANEL_BG)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!(
                    "{} {}",
                    icons::category_icon(body.key.category),
                    body.name
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(icons::CLOSE)
                        .on_hover_text("Deselect (Esc)")
                        .clicked()
                    {
                        clear.write(ClearSelection);
                    }
                });
            });
            ui.label(egui::RichText::new(category_name(body.key.category)).color(colors::TEXT_DIM));
            ui.separator();

            egui::Grid::new("info_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    if let Some(parent) = body.parent().and_then(|key| orrery.catalog.get(key)) {
                        row(ui, "Orbits", parent.name.clone());
                    }
                    for (label, value) in orbit_rows(body) {
                        row(ui, label, value);
                    }
                    row(ui, "Radius", format!("{:.2}", body.radius));
                    if body.geometry().advances() {
                        row(ui, "Orbital speed", format!("{:+.3}", body.orbital_speed));
                    }
                    row(ui, "Spin", format!("{:+.3}", body.rotation_speed));
                    if let Some(position) = orrery.position(&body.key) {
                        row(
                            ui,
                            "Position",
                            format!("{:.1}, {:.1}, {:.1}", position.x, position.y, position.z),
                        );
                    }
                });

            ui.add_space(6.0);
            let mut follow = settings.camera_mode == CameraMode::Follow;
            if ui
                .checkbox(&mut follow, format!("{} Follow (F)", icons::CROSSHAIR))
                .changed()
            {
                settings.toggle_camera_mode();
            }
        });
}

fn row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(egui::RichText::new(label).color(colors::TEXT_DIM));
    ui.label(egui::RichText::new(value).monospace());
    ui.end_row();
}

fn category_name(category: BodyCategory) -> &'static str {
    match category {
        BodyCategory::Star => "Star",
        BodyCategory::Planet => "Planet",
        BodyCategory::Satellite => "Spacecraft",
        BodyCategory::Moon => "Moon",
    }
}

/// Human-readable orbit parameters.
pub fn orbit_rows(body: &Body) -> Vec<(&'static str, String)> {
    match *body.geometry() {
        OrbitGeometry::Fixed => vec![],
        OrbitGeometry::Circular { distance } => vec![("Distance", format!("{distance:.1}"))],
        OrbitGeometry::EccentricInclined {
            semi_major_axis,
            eccentricity,
            inclination,
        } => {
            let mut rows = vec![("Semi-major axis", format!("{semi_major_axis:.1}"))];
            if eccentricity > 0.0 {
                rows.push(("Eccentricity", format!("{eccentricity:.2}")));
            }
            rows.push(("Inclination", format!("{:.1}°", inclination.to_degrees())));
            rows
        }
        OrbitGeometry::Escape { distance, heading } => vec![
            ("Trajectory", "escaping".to_string()),
            ("Distance", format!("{distance:.1}")),
            ("Heading", format!("{:.0}°", heading.to_degrees())),
        ],
    }
}
