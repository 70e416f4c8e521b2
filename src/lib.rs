//! Orrery - solar system orbital motion and camera framing
//!
//! A library crate providing the simulation core (orbits, frame resolution,
//! trails, camera direction and selection) and the Bevy plugins that render
//! it, so everything except the window can be tested headless.

pub mod belts;
pub mod camera;
pub mod catalog;
pub mod clock;
pub mod frame;
pub mod input;
pub mod orbit;
pub mod render;
pub mod selection;
pub mod simulation;
pub mod trail;
pub mod types;
pub mod ui;

#[cfg(test)]
mod proptest_orbits;
#[cfg(test)]
pub mod test_utils;
