//! Orbit geometry: position at a phase and sampled path polylines.
//!
//! Frame convention: orbits lie in the XZ plane with +Y up. Inclination tilts
//! the orbit about the X axis, so the in-plane Z component is split between
//! Y and Z.
//!
//! Geometry never looks at a parent. For bodies with a parent the returned
//! position is a local offset; `frame::FrameResolver` adds the parent's world
//! position.

use bevy::math::DVec3;
use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::types::BodyKey;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("eccentricity must be in [0, 1), got {0}")]
    Eccentricity(f64),

    #[error("{parameter} must be positive and finite, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },
}

/// Fixed shape parameters of a body's path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitGeometry {
    /// Sits at its frame origin (the star).
    Fixed,
    /// Flat circle of radius `distance`.
    Circular { distance: f64 },
    /// Conic about the focus, tilted by `inclination` radians.
    EccentricInclined {
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
    },
    /// Probe leaving its parent: parked at `distance` along `heading`,
    /// never advanced.
    Escape { distance: f64, heading: f64 },
}

impl OrbitGeometry {
    pub fn circular(distance: f64) -> Self {
        OrbitGeometry::Circular { distance }
    }

    /// Circle tilted by `inclination_deg`.
    pub fn inclined_circle(distance: f64, inclination_deg: f64) -> Self {
        OrbitGeometry::EccentricInclined {
            semi_major_axis: distance,
            eccentricity: 0.0,
            inclination: inclination_deg.to_radians(),
        }
    }

    pub fn eccentric(semi_major_axis: f64, eccentricity: f64, inclination_deg: f64) -> Self {
        OrbitGeometry::EccentricInclined {
            semi_major_axis,
            eccentricity,
            inclination: inclination_deg.to_radians(),
        }
    }

    /// Escape geometry whose heading is derived from the body id.
    pub fn escape(id: &str, distance: f64) -> Self {
        OrbitGeometry::Escape {
            distance,
            heading: escape_heading(id),
        }
    }

    /// Check shape parameters once, at body construction.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match *self {
            OrbitGeometry::Fixed => Ok(()),
            OrbitGeometry::Circular { distance } => positive("distance", distance),
            OrbitGeometry::EccentricInclined {
                semi_major_axis,
                eccentricity,
                inclination,
            } => {
                positive("semi_major_axis", semi_major_axis)?;
                if !(0.0..1.0).contains(&eccentricity) {
                    return Err(GeometryError::Eccentricity(eccentricity));
                }
                finite("inclination", inclination)
            }
            OrbitGeometry::Escape { distance, heading } => {
                positive("distance", distance)?;
                finite("heading", heading)
            }
        }
    }

    /// Whether the phase of a body with this geometry moves at all.
    pub fn advances(&self) -> bool {
        !matches!(self, OrbitGeometry::Fixed | OrbitGeometry::Escape { .. })
    }

    /// Closed loop, except for escape paths.
    pub fn is_closed(&self) -> bool {
        !matches!(self, OrbitGeometry::Escape { .. })
    }

    /// Position relative to the frame origin at `phase` radians.
    pub fn position_at_phase(&self, phase: f64) -> DVec3 {
        match *self {
            OrbitGeometry::Fixed => DVec3::ZERO,
            OrbitGeometry::Circular { distance } => {
                DVec3::new(phase.cos() * distance, 0.0, phase.sin() * distance)
            }
            OrbitGeometry::EccentricInclined {
                semi_major_axis,
                eccentricity,
                inclination,
            } => {
                let r = semi_major_axis * (1.0 - eccentricity * eccentricity)
                    / (1.0 + eccentricity * phase.cos());
                let x = r * phase.cos();
                let z_plane = r * phase.sin();
                DVec3::new(x, z_plane * inclination.sin(), z_plane * inclination.cos())
            }
            OrbitGeometry::Escape { distance, heading } => {
                DVec3::new(heading.cos() * distance, 0.0, heading.sin() * distance)
            }
        }
    }

    /// Sample the path for drawing.
    ///
    /// Closed geometries give `segments` points at evenly spaced phases over
    /// [0, 2π); the renderer joins the last point back to the first. Escape
    /// geometry gives the open segment from the frame origin to the probe.
    pub fn sample_path(&self, segments: usize) -> OrbitPath {
        match self {
            OrbitGeometry::Fixed => OrbitPath {
                points: Vec::new(),
                closed: false,
            },
            OrbitGeometry::Escape { .. } => OrbitPath {
                points: vec![DVec3::ZERO, self.position_at_phase(0.0)],
                closed: false,
            },
            _ => {
                let segments = segments.max(3);
                let points = (0..segments)
                    .map(|i| self.position_at_phase(i as f64 / segments as f64 * TAU))
                    .collect();
                OrbitPath {
                    points,
                    closed: true,
                }
            }
        }
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { parameter, value })
    }
}

fn finite(parameter: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { parameter, value })
    }
}

/// Stable heading in radians for an escaping probe: whole degrees from a
/// 31-multiplier string hash of the id.
pub fn escape_heading(id: &str) -> f64 {
    // Only the shift truncates to 32 bits; the running sum does not.
    let mut hash: i64 = 0;
    for unit in id.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = shifted - hash + unit as i64;
    }
    let degrees = hash.abs() % 360;
    (degrees as f64).to_radians()
}

/// A sampled path polyline in the body's own frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitPath {
    pub points: Vec<DVec3>,
    pub closed: bool,
}

impl OrbitPath {
    /// Points ready for a line strip, with the closing point repeated for
    /// closed paths.
    pub fn line_strip(&self) -> impl Iterator<Item = DVec3> + '_ {
        let closing = if self.closed {
            self.points.first().copied()
        } else {
            None
        };
        self.points.iter().copied().chain(closing)
    }
}

/// Sampled paths per body, rebuilt only when a body's geometry changes.
#[derive(Default)]
pub struct PathCache {
    entries: HashMap<BodyKey, (OrbitGeometry, usize, OrbitPath)>,
    rebuilds: usize,
}

impl PathCache {
    pub fn path_for(
        &mut self,
        key: &BodyKey,
        geometry: &OrbitGeometry,
        segments: usize,
    ) -> &OrbitPath {
        let stale = match self.entries.get(key) {
            Some((cached, cached_segments, _)) => {
                cached != geometry || *cached_segments != segments
            }
            None => true,
        };
        if stale {
            self.rebuilds += 1;
            self.entries.insert(
                key.clone(),
                (*geometry, segments, geometry.sample_path(segments)),
            );
        }
        &self.entries[key].2
    }

    /// Number of times any path has been (re)sampled.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_circular_position() {
        let geometry = OrbitGeometry::circular(25.0);
        let p = geometry.position_at_phase(0.0);
        assert_relative_eq!(p.x, 25.0);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, 0.0);

        let p = geometry.position_at_phase(PI / 2.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 25.0);
    }

    #[test]
    fn test_eccentric_periapsis_and_apoapsis() {
        let geometry = OrbitGeometry::eccentric(170.0, 0.25, 17.0);
        let peri = geometry.position_at_phase(0.0).length();
        let apo = geometry.position_at_phase(PI).length();
        assert_relative_eq!(peri, 170.0 * 0.75, epsilon = 1e-9);
        assert_relative_eq!(apo, 170.0 * 1.25, epsilon = 1e-9);
    }

    #[test]
    fn test_inclination_tilts_out_of_plane() {
        let geometry = OrbitGeometry::inclined_circle(10.0, 30.0);
        let p = geometry.position_at_phase(PI / 2.0);
        assert_relative_eq!(p.y, 10.0 * 30f64.to_radians().sin(), epsilon = 1e-9);
        assert_relative_eq!(p.z, 10.0 * 30f64.to_radians().cos(), epsilon = 1e-9);
        assert_relative_eq!(p.length(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert_eq!(
            OrbitGeometry::eccentric(10.0, 1.0, 0.0).validate(),
            Err(GeometryError::Eccentricity(1.0))
        );
        assert!(OrbitGeometry::eccentric(10.0, -0.1, 0.0).validate().is_err());
        assert!(OrbitGeometry::circular(0.0).validate().is_err());
        assert!(OrbitGeometry::circular(-5.0).validate().is_err());
        assert!(OrbitGeometry::escape("voyager-1", 0.0).validate().is_err());
        assert!(OrbitGeometry::eccentric(10.0, 0.99, 45.0).validate().is_ok());
    }

    #[test]
    fn test_sample_path_closed_circle() {
        let path = OrbitGeometry::circular(5.0).sample_path(64);
        assert!(path.closed);
        assert_eq!(path.points.len(), 64);
        let strip: Vec<_> = path.line_strip().collect();
        assert_eq!(strip.len(), 65);
        assert_eq!(strip.first(), strip.last());
    }

    #[test]
    fn test_escape_path_is_open() {
        let geometry = OrbitGeometry::escape("voyager-1", 30.0);
        let path = geometry.sample_path(64);
        assert!(!path.closed);
        assert_eq!(path.points.len(), 2);
        assert_eq!(path.points[0], DVec3::ZERO);
        assert_relative_eq!(path.points[1].length(), 30.0, epsilon = 1e-9);
        assert!(!geometry.advances());
    }

    #[test]
    fn test_escape_heading_is_stable() {
        assert_eq!(escape_heading("voyager-1"), escape_heading("voyager-1"));
        let heading = escape_heading("new-horizons");
        assert!((0.0..TAU).contains(&heading));
        // "ab": hash = 97 * 31 + 98 = 3105 -> 3105 % 360 = 225 degrees
        assert_relative_eq!(escape_heading("ab"), 225f64.to_radians());
    }

    #[test]
    fn test_path_cache_rebuilds_only_on_change() {
        let mut cache = PathCache::default();
        let key = BodyKey::planet("earth");
        let geometry = OrbitGeometry::circular(25.0);

        cache.path_for(&key, &geometry, 128);
        cache.path_for(&key, &geometry, 128);
        assert_eq!(cache.rebuilds(), 1);

        let wider = OrbitGeometry::circular(30.0);
        let path = cache.path_for(&key, &wider, 128);
        assert_relative_eq!(path.points[0].x, 30.0);
        assert_eq!(cache.rebuilds(), 2);
    }
}
