//! Test utilities for orbit and frame tests.
//!
//! Provides small hand-built catalogs and assertions on resolved positions.

use bevy::math::DVec3;

use crate::catalog::{Body, BodyCatalog};
use crate::orbit::OrbitGeometry;
use crate::types::BodyKey;

/// Fixtures for building bodies and catalogs.
pub mod fixtures {
    use super::*;

    /// A planet on a circular orbit at `distance`, at `phase`.
    pub fn planet(id: &str, distance: f64, phase: f64) -> Body {
        Body::new(BodyKey::planet(id), id, 1.0, OrbitGeometry::circular(distance))
            .expect("valid planet fixture")
            .with_orbital_speed(1.0)
            .with_phase(phase)
    }

    /// A moon on a circular orbit of `distance` around `parent`.
    pub fn moon(id: &str, parent: BodyKey, distance: f64, phase: f64) -> Body {
        Body::new(BodyKey::moon(id), id, 0.2, OrbitGeometry::circular(distance))
            .expect("valid moon fixture")
            .with_orbital_speed(2.0)
            .with_parent(parent)
            .with_phase(phase)
    }

    /// A satellite on a circular orbit of `distance` around `parent`.
    pub fn satellite(id: &str, parent: BodyKey, distance: f64, phase: f64) -> Body {
        Body::new(BodyKey::satellite(id), id, 0.05, OrbitGeometry::circular(distance))
            .expect("valid satellite fixture")
            .with_orbital_speed(5.0)
            .with_parent(parent)
            .with_phase(phase)
    }

    /// Planet, moon of the planet, and a satellite of the moon.
    pub fn three_level_chain() -> BodyCatalog {
        BodyCatalog::new(vec![
            planet("earth", 25.0, 0.0),
            moon("moon", BodyKey::planet("earth"), 2.5, 0.0),
            satellite("orbiter", BodyKey::moon("moon"), 0.5, 0.0),
        ])
        .expect("valid chain fixture")
    }
}

/// Assertions on positions.
pub mod assertions {
    use super::*;

    /// Assert two positions agree component-wise within `epsilon`.
    pub fn assert_position_eq(actual: DVec3, expected: DVec3, epsilon: f64) {
        assert!(
            (actual - expected).abs().max_element() <= epsilon,
            "position {actual:?} differs from {expected:?} by more than {epsilon}"
        );
    }
}
