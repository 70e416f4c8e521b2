//! Bounded histories of recent world positions, for trail lines.
//!
//! Callers stop recording while paused so trails freeze with the orbits.

use bevy::math::DVec3;
use std::collections::{HashMap, VecDeque};

use crate::frame::WorldFrame;
use crate::types::{BodyCategory, BodyKey, TRAIL_CAPACITY};

/// Fixed-capacity FIFO of positions, oldest first.
#[derive(Clone, Debug)]
pub struct TrailHistory {
    capacity: usize,
    points: VecDeque<DVec3>,
}

impl TrailHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Append at the tail, evicting from the head when full.
    pub fn push(&mut self, point: DVec3) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().copied()
    }
}

/// Trail histories keyed by body.
#[derive(Clone, Debug)]
pub struct TrailAccumulator {
    capacity: usize,
    /// Categories recorded by `record_frame`.
    tracked: Vec<BodyCategory>,
    histories: HashMap<BodyKey, TrailHistory>,
}

impl Default for TrailAccumulator {
    fn default() -> Self {
        Self::new(TRAIL_CAPACITY, vec![BodyCategory::Planet])
    }
}

impl TrailAccumulator {
    pub fn new(capacity: usize, tracked: Vec<BodyCategory>) -> Self {
        Self {
            capacity,
            tracked,
            histories: HashMap::new(),
        }
    }

    pub fn record(&mut self, key: &BodyKey, position: DVec3) {
        let capacity = self.capacity;
        self.histories
            .entry(key.clone())
            .or_insert_with(|| TrailHistory::new(capacity))
            .push(position);
    }

    /// Record every tracked body present in `frame`.
    pub fn record_frame(&mut self, frame: &WorldFrame) {
        for (key, position) in frame.iter() {
            if self.tracked.contains(&key.category) {
                self.record(key, position);
            }
        }
    }

    /// Current history for `key`, oldest first; empty if never recorded.
    pub fn snapshot(&self, key: &BodyKey) -> Vec<DVec3> {
        self.histories
            .get(key)
            .map(|history| history.iter().collect())
            .unwrap_or_default()
    }

    pub fn history(&self, key: &BodyKey) -> Option<&TrailHistory> {
        self.histories.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BodyKey, &TrailHistory)> {
        self.histories.iter()
    }
}
