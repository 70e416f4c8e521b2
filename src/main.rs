//! Orrery - solar system orbital motion and camera framing
//!
//! A desktop application showing the Sun, planets, moons and spacecraft in
//! motion, with click or list selection that flies the camera to each body.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::simulation::SimulationPlugin;
use orrery::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)))
        .add_plugins(EguiPlugin::default())
        // Simulation first: the others read the Orrery resource it inserts
        .add_plugins(SimulationPlugin)
        .add_plugins((CameraPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .run();
}
