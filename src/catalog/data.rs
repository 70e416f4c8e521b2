//! Built-in reference catalog: the Sun, planets, Pluto, a few natural moons
//! and spacecraft.
//!
//! Scene units, not physical ones: distances are compressed so the whole
//! system fits the overview camera, and radii are exaggerated for visibility.

use super::{Body, BodyCatalog, CatalogError};
use crate::orbit::OrbitGeometry;
use crate::types::BodyKey;

/// (id, name, radius, distance, orbital speed, rotation speed)
const PLANETS: &[(&str, &str, f64, f64, f64, f64)] = &[
    ("mercury", "Mercury", 0.38, 12.0, 4.1, 0.01),
    ("venus", "Venus", 0.95, 18.0, 1.6, -0.004),
    ("earth", "Earth", 1.0, 25.0, 1.0, 0.02),
    ("mars", "Mars", 0.53, 35.0, 0.53, 0.018),
    ("jupiter", "Jupiter", 4.0, 55.0, 0.08, 0.04),
    ("saturn", "Saturn", 3.5, 80.0, 0.03, 0.038),
    ("uranus", "Uranus", 2.5, 110.0, 0.01, -0.03),
    ("neptune", "Neptune", 2.4, 140.0, 0.006, 0.032),
];

/// (id, name, parent planet, radius, distance, orbital speed, inclination deg)
const MOONS: &[(&str, &str, &str, f64, f64, f64, f64)] = &[
    ("moon", "Moon", "earth", 0.27, 2.5, 3.0, 5.1),
    ("phobos", "Phobos", "mars", 0.08, 1.0, 9.0, 1.1),
    ("deimos", "Deimos", "mars", 0.06, 1.5, 6.0, 0.9),
    ("io", "Io", "jupiter", 0.29, 6.0, 4.0, 0.05),
    ("europa", "Europa", "jupiter", 0.25, 7.5, 3.2, 0.47),
    ("ganymede", "Ganymede", "jupiter", 0.41, 9.0, 2.4, 0.2),
    ("callisto", "Callisto", "jupiter", 0.38, 11.0, 1.7, 0.28),
    ("titan", "Titan", "saturn", 0.4, 8.0, 1.5, 0.35),
    ("enceladus", "Enceladus", "saturn", 0.1, 5.5, 2.8, 0.02),
    ("triton", "Triton", "neptune", 0.21, 4.5, -1.2, 23.0),
];

/// Pluto: the one eccentric, inclined orbit.
const PLUTO_ECCENTRICITY: f64 = 0.25;
const PLUTO_INCLINATION_DEG: f64 = 17.0;

/// Build the reference catalog with zero phases.
pub fn reference_catalog() -> Result<BodyCatalog, CatalogError> {
    let mut bodies = Vec::new();

    bodies.push(
        Body::new(BodyKey::star("sun"), "Sun", 6.0, OrbitGeometry::Fixed)?
            .with_rotation_speed(0.002),
    );

    for &(id, name, radius, distance, orbital_speed, rotation_speed) in PLANETS {
        bodies.push(
            Body::new(BodyKey::planet(id), name, radius, OrbitGeometry::circular(distance))?
                .with_orbital_speed(orbital_speed)
                .with_rotation_speed(rotation_speed),
        );
    }

    bodies.push(
        Body::new(
            BodyKey::planet("pluto"),
            "Pluto",
            0.18,
            OrbitGeometry::eccentric(170.0, PLUTO_ECCENTRICITY, PLUTO_INCLINATION_DEG),
        )?
        .with_orbital_speed(0.004)
        .with_rotation_speed(0.015),
    );

    for &(id, name, parent, radius, distance, orbital_speed, inclination) in MOONS {
        bodies.push(
            Body::new(
                BodyKey::moon(id),
                name,
                radius,
                OrbitGeometry::inclined_circle(distance, inclination),
            )?
            .with_orbital_speed(orbital_speed)
            .with_rotation_speed(0.01)
            .with_parent(BodyKey::planet(parent)),
        );
    }

    bodies.extend(satellites()?);

    BodyCatalog::new(bodies)
}

fn satellites() -> Result<Vec<Body>, CatalogError> {
    let orbiting = |id: &str, name: &str, parent: BodyKey, distance: f64, speed: f64| {
        Body::new(
            BodyKey::satellite(id),
            name,
            0.05,
            OrbitGeometry::circular(distance),
        )
        .map(|body| body.with_orbital_speed(speed).with_parent(parent))
    };
    let escaping = |id: &str, name: &str, distance: f64| {
        Body::new(
            BodyKey::satellite(id),
            name,
            0.06,
            OrbitGeometry::escape(id, distance),
        )
        .map(|body| body.with_parent(BodyKey::star("sun")))
    };

    Ok(vec![
        orbiting("iss", "ISS", BodyKey::planet("earth"), 1.5, 8.0)?,
        orbiting("hubble", "Hubble", BodyKey::planet("earth"), 1.8, 7.0)?,
        orbiting("jwst", "James Webb", BodyKey::planet("earth"), 4.0, 0.5)?,
        orbiting("lro", "Lunar Reconnaissance Orbiter", BodyKey::moon("moon"), 0.5, 5.0)?,
        orbiting("mro", "Mars Reconnaissance Orbiter", BodyKey::planet("mars"), 0.8, 6.0)?,
        orbiting("juno", "Juno", BodyKey::planet("jupiter"), 13.0, 1.2)?,
        escaping("voyager-1", "Voyager 1", 200.0)?,
        escaping("new-horizons", "New Horizons", 185.0)?,
    ])
}
