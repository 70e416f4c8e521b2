//! World-frame resolution: composes each body's local orbital offset with
//! its parent's world position.
//!
//! Roots (bodies without a parent) are placed first; dependents are then
//! placed in passes, each reading only parents that are already final. With
//! the one-level nesting of the reference catalog this is exactly two passes.
//! Deeper chains (a spacecraft orbiting a moon) take one extra pass per level.

use bevy::math::DVec3;
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::catalog::Body;
use crate::types::BodyKey;

/// Resolved world positions for one tick.
///
/// Built whole by `FrameResolver::resolve_frame` and replaced whole, so
/// readers never see a partially resolved tick.
#[derive(Clone, Debug, Default)]
pub struct WorldFrame {
    tick: u64,
    positions: HashMap<BodyKey, DVec3>,
}

impl WorldFrame {
    /// Tick number this frame was resolved for (starts at 1).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn position(&self, key: &BodyKey) -> Option<DVec3> {
        self.positions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BodyKey, DVec3)> {
        self.positions.iter().map(|(key, pos)| (key, *pos))
    }
}

/// Resolves world positions each tick.
#[derive(Default)]
pub struct FrameResolver {
    ticks: u64,
    /// Bodies already reported with a missing parent.
    dangling: HashSet<BodyKey>,
}

impl FrameResolver {
    /// Resolve world positions for `bodies` (the bodies taking part this tick).
    ///
    /// A body whose parent is not among `bodies` treats the origin as its
    /// parent's position. This is expected when a layer is hidden.
    pub fn resolve_frame<'a>(&mut self, bodies: impl IntoIterator<Item = &'a Body>) -> WorldFrame {
        let bodies: Vec<&Body> = bodies.into_iter().collect();
        let present: HashSet<&BodyKey> = bodies.iter().map(|body| &body.key).collect();

        let mut positions = HashMap::with_capacity(bodies.len());
        let mut pending = Vec::new();

        for &body in &bodies {
            match body.parent() {
                None => {
                    positions.insert(body.key.clone(), body.local_offset());
                }
                Some(parent) if !present.contains(parent) => {
                    self.report_dangling(body, parent);
                    positions.insert(body.key.clone(), body.local_offset());
                }
                Some(parent) => pending.push((body, parent)),
            }
        }

        while !pending.is_empty() {
            let before = pending.len();
            pending.retain(|&(body, parent)| {
                match positions.get(parent).copied() {
                    Some(parent_pos) => {
                        positions.insert(body.key.clone(), parent_pos + body.local_offset());
                        false
                    }
                    None => true,
                }
            });

            if pending.len() == before {
                // Only reachable with a parent cycle, which the catalog rejects.
                for (body, _) in pending.drain(..) {
                    warn!("Unresolvable parent chain for {}; placing at origin", body.key);
                    positions.insert(body.key.clone(), body.local_offset());
                }
            }
        }

        self.forget_recovered(&bodies, &present);

        self.ticks += 1;
        WorldFrame {
            tick: self.ticks,
            positions,
        }
    }

    fn report_dangling(&mut self, body: &Body, parent: &BodyKey) {
        if self.dangling.insert(body.key.clone()) {
            warn!(
                "Parent {} of {} is not in the frame; using origin as parent position",
                parent, body.key
            );
        }
    }

    fn forget_recovered(&mut self, bodies: &[&Body], present: &HashSet<&BodyKey>) {
        if self.dangling.is_empty() {
            return;
        }
        for body in bodies {
            if let Some(parent) = body.parent() {
                if present.contains(parent) && self.dangling.remove(&body.key) {
                    debug!("Parent {} of {} is back", parent, body.key);
                }
            }
        }
    }
}
