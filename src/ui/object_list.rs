//! Object list: every selectable body grouped by category. Choosing an entry
//! selects it by name; the camera frames it on the next idle tick.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, icons};
use crate::catalog::Body;
use crate::simulation::{Orrery, SelectionRequest};
use crate::types::{BodyCategory, SelectableCategory, SimulationSettings};

/// Whether the list is expanded.
#[derive(Resource)]
pub struct ObjectListState {
    pub open: bool,
}

impl Default for ObjectListState {
    fn default() -> Self {
        Self { open: true }
    }
}

/// Groups in display order. The star leads the planets.
const GROUPS: [(&str, &[BodyCategory]); 3] = [
    ("Sun & planets", &[BodyCategory::Star, BodyCategory::Planet]),
    ("Moons", &[BodyCategory::Moon]),
    ("Spacecraft", &[BodyCategory::Satellite]),
];

pub fn object_list(
    mut contexts: EguiContexts,
    mut state: ResMut<ObjectListState>,
    orrery: Res<Orrery>,
    settings: Res<SimulationSettings>,
    mut requests: MessageWriter<SelectionRequest>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("objects")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .frame(
            egui::Frame::new()
                .fill(colors::PANEL_BG)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(10)),
        )
        .show(ctx, |ui| {
            let header = format!("{} Objects", icons::LIST);
            if ui.selectable_label(state.open, header).clicked() {
                state.open = !state.open;
            }
            if !state.open {
                return;
            }

            let selection = orrery.selection.selection();
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                for (title, categories) in GROUPS {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(title).small().color(colors::TEXT_DIM));

                    for body in orrery
                        .catalog
                        .iter()
                        .filter(|body| categories.contains(&body.key.category))
                    {
                        let category = SelectableCategory::of(body.key.category);
                        let selected = selection.get(category) == Some(body.key.id.as_str());
                        let visible = settings.is_visible(body.key.category);

                        ui.add_enabled_ui(visible, |ui| {
                            if ui.selectable_label(selected, entry_label(body)).clicked() {
                                requests.write(SelectionRequest {
                                    category,
                                    id: body.key.id.clone(),
                                });
                            }
                        });
                    }
                }
            });
        });
}

fn entry_label(body: &Body) -> String {
    let icon = if body.geometry().is_closed() {
        icons::category_icon(body.key.category)
    } else {
        icons::ESCAPE
    };
    format!("{} {}", icon, body.name)
}
