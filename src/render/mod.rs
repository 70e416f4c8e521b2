//! Rendering for the orrery.
//!
//! Everything here reads the `Orrery` resource after the simulation tick and
//! never writes simulation state, except the orbit path cache.

mod background;
pub mod bodies;
pub mod highlight;
mod orbits;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::CelestialBodyPlugin;
use self::highlight::HighlightPlugin;
use self::orbits::OrbitPathPlugin;

pub use self::bodies::BodyVisual;
pub use self::highlight::HoveredBody;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CelestialBodyPlugin,
            BackgroundPlugin,
            OrbitPathPlugin,
            HighlightPlugin,
        ));
    }
}
