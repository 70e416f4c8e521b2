//! Property-based tests for orbit geometry, the clock, trails and frame
//! resolution.

use bevy::math::DVec3;
use proptest::prelude::*;
use std::f64::consts::{PI, TAU};

use crate::clock::{OrbitalClock, TickInput};
use crate::frame::FrameResolver;
use crate::orbit::OrbitGeometry;
use crate::test_utils::{assertions, fixtures};
use crate::trail::TrailAccumulator;
use crate::types::{BodyKey, PLANET_PATH_SEGMENTS};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A circular path returns to its start after a full turn.
    #[test]
    fn prop_circular_orbit_closes(distance in 0.01f64..500.0) {
        let geometry = OrbitGeometry::circular(distance);
        let start = geometry.position_at_phase(0.0);
        let end = geometry.position_at_phase(TAU);
        assertions::assert_position_eq(start, end, 1e-9 * distance.max(1.0));

        let path = geometry.sample_path(PLANET_PATH_SEGMENTS);
        prop_assert!(path.closed);
        prop_assert_eq!(path.points.len(), PLANET_PATH_SEGMENTS);
        for point in &path.points {
            prop_assert!((point.length() - distance).abs() < 1e-9 * distance.max(1.0));
        }
    }

    /// Distance from the focus is a(1-e) at phase 0 and a(1+e) at phase π.
    #[test]
    fn prop_eccentric_apsides(
        a in 1.0f64..300.0,
        e in 0.0f64..0.95,
        inclination in 0.0f64..90.0,
    ) {
        let geometry = OrbitGeometry::eccentric(a, e, inclination);
        prop_assert!(geometry.validate().is_ok());
        let peri = geometry.position_at_phase(0.0).length();
        let apo = geometry.position_at_phase(PI).length();
        prop_assert!((peri - a * (1.0 - e)).abs() < 1e-9 * a);
        prop_assert!((apo - a * (1.0 + e)).abs() < 1e-9 * a);
    }

    /// e outside [0, 1) is rejected at construction.
    #[test]
    fn prop_open_orbits_rejected(e in prop_oneof![1.0f64..10.0, -10.0f64..-0.0001]) {
        prop_assert!(OrbitGeometry::eccentric(10.0, e, 0.0).validate().is_err());
    }

    /// Pausing freezes phase no matter the delta or multiplier.
    #[test]
    fn prop_pause_invariance(
        phase in -100.0f64..100.0,
        deltas in prop::collection::vec(0.0f64..10.0, 1..50),
        speed_multiplier in 0.125f64..128.0,
    ) {
        let clock = OrbitalClock::default();
        let mut body = fixtures::planet("earth", 25.0, phase);
        for delta_seconds in deltas {
            let tick = TickInput { delta_seconds, speed_multiplier, paused: true };
            clock.advance(&mut body, &tick);
            clock.advance_spin(&mut body, &tick);
        }
        prop_assert_eq!(body.phase, phase);
        prop_assert_eq!(body.spin, 0.0);
    }

    /// After capacity + k records, the newest `capacity` remain, oldest first.
    #[test]
    fn prop_trail_bounding(capacity in 1usize..150, extra in 1usize..200) {
        let mut trails = TrailAccumulator::new(capacity, vec![]);
        let key = BodyKey::planet("earth");
        let total = capacity + extra;
        for i in 0..total {
            trails.record(&key, DVec3::splat(i as f64));
        }
        let snapshot = trails.snapshot(&key);
        prop_assert_eq!(snapshot.len(), capacity);
        for (offset, point) in snapshot.iter().enumerate() {
            prop_assert_eq!(point.x, (extra + offset) as f64);
        }
    }

    /// Dependent = parent + local offset, in any input order.
    #[test]
    fn prop_parent_before_child(
        planet_phase in 0.0f64..TAU,
        moon_phase in 0.0f64..TAU,
        distance in 1.0f64..200.0,
        moon_distance in 0.1f64..20.0,
        reversed in any::<bool>(),
    ) {
        let planet = fixtures::planet("p", distance, planet_phase);
        let moon = fixtures::moon("m", BodyKey::planet("p"), moon_distance, moon_phase);
        let expected = planet.local_offset() + moon.local_offset();

        let order = if reversed { vec![&moon, &planet] } else { vec![&planet, &moon] };
        let frame = FrameResolver::default().resolve_frame(order);
        let resolved = frame.position(&BodyKey::moon("m"));
        prop_assert!(resolved.is_some());
        assertions::assert_position_eq(resolved.unwrap_or_default(), expected, 1e-9);
    }
}
