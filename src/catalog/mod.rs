//! Body catalog: the arena of simulated bodies.
//!
//! Bodies are validated once when they are built and again as a set when the
//! catalog is assembled (unique keys, resolvable parents, no parent cycles).
//! Nothing here is re-checked per frame.

pub mod data;

use std::collections::HashMap;

use crate::clock::PhaseSeeder;
use crate::orbit::{GeometryError, OrbitGeometry};
use crate::types::{BodyCategory, BodyKey, SelectableCategory};

pub use data::reference_catalog;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("invalid geometry for {key}: {source}")]
    InvalidGeometryParameter {
        key: BodyKey,
        #[source]
        source: GeometryError,
    },

    #[error("radius of {key} must be positive and finite, got {radius}")]
    InvalidRadius { key: BodyKey, radius: f64 },

    #[error("duplicate body {0}")]
    DuplicateBody(BodyKey),

    #[error("{key} references unknown parent {parent}")]
    UnknownParent { key: BodyKey, parent: BodyKey },

    #[error("parent chain of {0} forms a cycle")]
    ParentCycle(BodyKey),

    #[error("star {0} cannot orbit a parent")]
    StarWithParent(BodyKey),
}

/// One simulated body with its mutable angular state.
#[derive(Clone, Debug)]
pub struct Body {
    pub key: BodyKey,
    /// Display name.
    pub name: String,
    /// Visual radius (not comparable across categories).
    pub radius: f64,
    /// Signed angular rate; negative is retrograde.
    pub orbital_speed: f64,
    /// Signed spin rate about the body's Y axis.
    pub rotation_speed: f64,
    geometry: OrbitGeometry,
    parent: Option<BodyKey>,
    /// Orbital phase in radians, unbounded.
    pub phase: f64,
    /// Spin angle in radians, unbounded.
    pub spin: f64,
}

impl Body {
    /// Build a body, validating radius and geometry.
    pub fn new(
        key: BodyKey,
        name: impl Into<String>,
        radius: f64,
        geometry: OrbitGeometry,
    ) -> Result<Self, CatalogError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CatalogError::InvalidRadius { key, radius });
        }
        if let Err(source) = geometry.validate() {
            return Err(CatalogError::InvalidGeometryParameter { key, source });
        }

        Ok(Self {
            key,
            name: name.into(),
            radius,
            orbital_speed: 0.0,
            rotation_speed: 0.0,
            geometry,
            parent: None,
            phase: 0.0,
            spin: 0.0,
        })
    }

    pub fn with_orbital_speed(mut self, speed: f64) -> Self {
        self.orbital_speed = speed;
        self
    }

    pub fn with_rotation_speed(mut self, speed: f64) -> Self {
        self.rotation_speed = speed;
        self
    }

    /// Make the orbit parent-relative.
    pub fn with_parent(mut self, parent: BodyKey) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn geometry(&self) -> &OrbitGeometry {
        &self.geometry
    }

    pub fn parent(&self) -> Option<&BodyKey> {
        self.parent.as_ref()
    }

    /// Position relative to the parent (or origin) at the current phase.
    pub fn local_offset(&self) -> bevy::math::DVec3 {
        self.geometry.position_at_phase(self.phase)
    }
}

/// Validated, read-mostly collection of bodies.
///
/// Only `phase` and `spin` change after construction.
#[derive(Clone, Debug, Default)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
    index: HashMap<BodyKey, usize>,
    depth: Vec<usize>,
}

impl BodyCatalog {
    pub fn new(bodies: Vec<Body>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if index.insert(body.key.clone(), i).is_some() {
                return Err(CatalogError::DuplicateBody(body.key.clone()));
            }
        }

        for body in &bodies {
            let Some(parent) = &body.parent else {
                continue;
            };
            if body.key.category == BodyCategory::Star {
                return Err(CatalogError::StarWithParent(body.key.clone()));
            }
            if !index.contains_key(parent) {
                return Err(CatalogError::UnknownParent {
                    key: body.key.clone(),
                    parent: parent.clone(),
                });
            }
        }

        let mut depth = Vec::with_capacity(bodies.len());
        for body in &bodies {
            depth.push(parent_depth(&bodies, &index, body)?);
        }

        Ok(Self {
            bodies,
            index,
            depth,
        })
    }

    /// Assign every body a random starting phase from `seeder`.
    pub fn with_random_phases(mut self, seeder: &mut PhaseSeeder) -> Self {
        for body in &mut self.bodies {
            if body.geometry.advances() {
                body.phase = seeder.next_phase();
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn get(&self, key: &BodyKey) -> Option<&Body> {
        self.index.get(key).map(|&i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, key: &BodyKey) -> Option<&mut Body> {
        self.index.get(key).map(|&i| &mut self.bodies[i])
    }

    /// Number of parent links between `key` and the origin.
    pub fn depth(&self, key: &BodyKey) -> Option<usize> {
        self.index.get(key).map(|&i| self.depth[i])
    }

    /// Look up a selectable body. The star answers to `Planet`.
    pub fn find_selectable(&self, category: SelectableCategory, id: &str) -> Option<&Body> {
        match category {
            SelectableCategory::Planet => self
                .get(&BodyKey::planet(id))
                .or_else(|| self.get(&BodyKey::star(id))),
            SelectableCategory::Satellite => self.get(&BodyKey::satellite(id)),
            SelectableCategory::Moon => self.get(&BodyKey::moon(id)),
        }
    }

    /// Bodies of one category in catalog order.
    pub fn of_category(&self, category: BodyCategory) -> impl Iterator<Item = &Body> {
        self.bodies
            .iter()
            .filter(move |body| body.key.category == category)
    }
}

fn parent_depth(
    bodies: &[Body],
    index: &HashMap<BodyKey, usize>,
    body: &Body,
) -> Result<usize, CatalogError> {
    let mut depth = 0;
    let mut current = body;
    while let Some(parent) = &current.parent {
        depth += 1;
        if depth > bodies.len() {
            return Err(CatalogError::ParentCycle(body.key.clone()));
        }
        current = &bodies[index[parent]];
    }
    Ok(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(id: &str, distance: f64) -> Body {
        Body::new(BodyKey::planet(id), id, 1.0, OrbitGeometry::circular(distance)).unwrap()
    }

    #[test]
    fn test_body_rejects_invalid_radius() {
        let err = Body::new(BodyKey::planet("x"), "X", 0.0, OrbitGeometry::circular(1.0))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRadius { .. }));
        assert!(Body::new(BodyKey::planet("x"), "X", -1.0, OrbitGeometry::Fixed).is_err());
    }

    #[test]
    fn test_body_rejects_hyperbolic_orbit() {
        let err = Body::new(
            BodyKey::planet("x"),
            "X",
            1.0,
            OrbitGeometry::eccentric(100.0, 1.2, 0.0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidGeometryParameter {
                key: BodyKey::planet("x"),
                source: GeometryError::Eccentricity(1.2),
            }
        );
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let err = BodyCatalog::new(vec![planet("earth", 25.0), planet("earth", 30.0)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateBody(BodyKey::planet("earth")));
    }

    #[test]
    fn test_same_id_in_different_categories_is_allowed() {
        let moon = Body::new(BodyKey::moon("earth"), "Odd", 0.2, OrbitGeometry::circular(2.0))
            .unwrap()
            .with_parent(BodyKey::planet("earth"));
        assert!(BodyCatalog::new(vec![planet("earth", 25.0), moon]).is_ok());
    }

    #[test]
    fn test_catalog_rejects_unknown_parent() {
        let moon = Body::new(BodyKey::moon("moon"), "Moon", 0.27, OrbitGeometry::circular(2.5))
            .unwrap()
            .with_parent(BodyKey::planet("earth"));
        let err = BodyCatalog::new(vec![moon]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownParent { .. }));
    }

    #[test]
    fn test_catalog_rejects_cycles() {
        let a = Body::new(BodyKey::satellite("a"), "A", 0.1, OrbitGeometry::circular(1.0))
            .unwrap()
            .with_parent(BodyKey::satellite("b"));
        let b = Body::new(BodyKey::satellite("b"), "B", 0.1, OrbitGeometry::circular(1.0))
            .unwrap()
            .with_parent(BodyKey::satellite("a"));
        let err = BodyCatalog::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, CatalogError::ParentCycle(_)));
    }

    #[test]
    fn test_catalog_rejects_star_with_parent() {
        let sun = Body::new(BodyKey::star("sun"), "Sun", 6.0, OrbitGeometry::Fixed)
            .unwrap()
            .with_parent(BodyKey::planet("earth"));
        let err = BodyCatalog::new(vec![planet("earth", 25.0), sun]).unwrap_err();
        assert_eq!(err, CatalogError::StarWithParent(BodyKey::star("sun")));
    }

    #[test]
    fn test_find_selectable_maps_star_to_planet() {
        let catalog = reference_catalog().unwrap();
        let sun = catalog
            .find_selectable(SelectableCategory::Planet, "sun")
            .unwrap();
        assert_eq!(sun.key.category, BodyCategory::Star);
        assert!(catalog.find_selectable(SelectableCategory::Moon, "sun").is_none());
    }

    #[test]
    fn test_depths() {
        let catalog = reference_catalog().unwrap();
        assert_eq!(catalog.depth(&BodyKey::star("sun")), Some(0));
        assert_eq!(catalog.depth(&BodyKey::planet("earth")), Some(0));
        assert_eq!(catalog.depth(&BodyKey::moon("moon")), Some(1));
        assert_eq!(catalog.depth(&BodyKey::satellite("lro")), Some(2));
    }

    #[test]
    fn test_random_phases_skip_fixed_bodies() {
        let mut seeder = PhaseSeeder::seeded(7);
        let catalog = reference_catalog().unwrap().with_random_phases(&mut seeder);
        assert_eq!(catalog.get(&BodyKey::star("sun")).unwrap().phase, 0.0);
        assert_eq!(catalog.get(&BodyKey::satellite("voyager-1")).unwrap().phase, 0.0);
    }
}
