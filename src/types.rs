//! Core identifiers, settings and tuning constants for the orrery.

use bevy::prelude::*;
use std::fmt;

/// Scales simulation seconds to orbital phase. Not a physical unit: an
/// `orbital_speed` of 1.0 sweeps 0.1 rad per second at 1x speed.
pub const PHASE_RATE: f64 = 0.1;

/// Spin speeds in the catalog are expressed per frame at 60 Hz.
pub const SPIN_RATE: f64 = 60.0;

/// Number of recent positions kept per trail.
pub const TRAIL_CAPACITY: usize = 100;

/// Segment count for planet orbit paths.
pub const PLANET_PATH_SEGMENTS: usize = 128;

/// Segment count for moon and satellite orbit paths.
pub const LOCAL_PATH_SEGMENTS: usize = 64;

/// Slowest allowed speed multiplier from keyboard stepping.
pub const MIN_SPEED_MULTIPLIER: f64 = 0.125;

/// Fastest allowed speed multiplier from keyboard stepping.
pub const MAX_SPEED_MULTIPLIER: f64 = 128.0;

/// Category of a simulated body.
///
/// Ids are unique within a category, so the category is part of every key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyCategory {
    Star,
    Planet,
    Satellite,
    Moon,
}

impl BodyCategory {
    /// Prefix used in derived body names (`planet-earth`, `moon-io`).
    pub fn prefix(&self) -> &'static str {
        match self {
            BodyCategory::Star => "star",
            BodyCategory::Planet => "planet",
            BodyCategory::Satellite => "satellite",
            BodyCategory::Moon => "moon",
        }
    }
}

/// Stable key of a body: category plus id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyKey {
    pub category: BodyCategory,
    pub id: String,
}

impl BodyKey {
    pub fn new(category: BodyCategory, id: impl Into<String>) -> Self {
        Self {
            category,
            id: id.into(),
        }
    }

    pub fn star(id: impl Into<String>) -> Self {
        Self::new(BodyCategory::Star, id)
    }

    pub fn planet(id: impl Into<String>) -> Self {
        Self::new(BodyCategory::Planet, id)
    }

    pub fn satellite(id: impl Into<String>) -> Self {
        Self::new(BodyCategory::Satellite, id)
    }

    pub fn moon(id: impl Into<String>) -> Self {
        Self::new(BodyCategory::Moon, id)
    }
}

impl fmt::Display for BodyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.prefix(), self.id)
    }
}

/// Categories a user can select. The star is selected through `Planet`,
/// sharing the planet info card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectableCategory {
    Planet,
    Satellite,
    Moon,
}

impl SelectableCategory {
    pub const ALL: [SelectableCategory; 3] = [
        SelectableCategory::Planet,
        SelectableCategory::Satellite,
        SelectableCategory::Moon,
    ];

    pub(crate) fn index(&self) -> usize {
        match self {
            SelectableCategory::Planet => 0,
            SelectableCategory::Satellite => 1,
            SelectableCategory::Moon => 2,
        }
    }

    /// Selectable category of a body category.
    pub fn of(category: BodyCategory) -> Self {
        match category {
            BodyCategory::Star | BodyCategory::Planet => SelectableCategory::Planet,
            BodyCategory::Satellite => SelectableCategory::Satellite,
            BodyCategory::Moon => SelectableCategory::Moon,
        }
    }
}

/// How the camera treats the selected body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Look-at stays where the last transition left it.
    #[default]
    Free,
    /// Look-at is pulled toward the selected body every tick.
    Follow,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("speed multiplier must be positive and finite, got {0}")]
    InvalidSpeedMultiplier(f64),
}

/// User-facing simulation configuration.
#[derive(Resource, Clone, Debug)]
pub struct SimulationSettings {
    speed_multiplier: f64,
    /// Explicit pause from the controls.
    pub paused: bool,
    /// Set while the user drags the camera; pauses motion like `paused`.
    pub camera_interacting: bool,
    /// Rendering only: orbit paths and trails.
    pub show_orbits: bool,
    pub show_satellites: bool,
    pub show_moons: bool,
    pub camera_mode: CameraMode,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            paused: false,
            camera_interacting: false,
            show_orbits: true,
            show_satellites: true,
            show_moons: true,
            camera_mode: CameraMode::Free,
        }
    }
}

impl SimulationSettings {
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, value: f64) -> Result<(), SettingsError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SettingsError::InvalidSpeedMultiplier(value));
        }
        self.speed_multiplier = value;
        Ok(())
    }

    /// Multiply the speed by `factor`, clamped to the keyboard range.
    pub fn scale_speed(&mut self, factor: f64) {
        self.speed_multiplier =
            (self.speed_multiplier * factor).clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }

    /// Pause flag shared by orbital phase, spin, trails and belts.
    pub fn effective_pause(&self) -> bool {
        self.paused || self.camera_interacting
    }

    /// Whether bodies of `category` take part in the current tick.
    pub fn is_visible(&self, category: BodyCategory) -> bool {
        match category {
            BodyCategory::Star | BodyCategory::Planet => true,
            BodyCategory::Satellite => self.show_satellites,
            BodyCategory::Moon => self.show_moons,
        }
    }

    pub fn toggle_camera_mode(&mut self) {
        self.camera_mode = match self.camera_mode {
            CameraMode::Free => CameraMode::Follow,
            CameraMode::Follow => CameraMode::Free,
        };
    }
}
