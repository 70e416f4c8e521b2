//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec3;
use orrery::camera::TRANSITION_SECONDS;
use orrery::catalog::Body;
use orrery::orbit::OrbitGeometry;
use orrery::simulation::Orrery;
use orrery::types::{BodyKey, SimulationSettings};

/// Fixed tick length used by the integration tests.
pub const TICK: f64 = 1.0 / 60.0;

/// Build a valid body or panic.
pub fn body(key: BodyKey, radius: f64, geometry: OrbitGeometry) -> Body {
    Body::new(key.clone(), key.id.clone(), radius, geometry).expect("valid test body")
}

/// Orrery on the reference catalog with a fixed seed.
pub fn seeded_orrery() -> Orrery {
    Orrery::with_seed(2024).expect("reference catalog is valid")
}

/// Tick until the camera has no transition in flight.
pub fn settle_camera(orrery: &mut Orrery, settings: &SimulationSettings) {
    let max_ticks = ((TRANSITION_SECONDS * 2.0) / TICK).ceil() as usize + 1;
    for _ in 0..max_ticks {
        if !orrery.camera.is_transitioning() {
            return;
        }
        orrery.tick(TICK, settings);
    }
    assert!(!orrery.camera.is_transitioning(), "camera never settled");
}

/// Assert two positions agree component-wise within `epsilon`.
pub fn assert_close(actual: DVec3, expected: DVec3, epsilon: f64) {
    assert!(
        (actual - expected).abs().max_element() <= epsilon,
        "position {actual:?} differs from {expected:?} by more than {epsilon}"
    );
}
