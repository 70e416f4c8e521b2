//! Debris belts: rings of small rocks laid out once from a seeded RNG and
//! spun slowly about the Y axis as a whole.

use bevy::math::DVec3;
use rand::Rng;
use std::f64::consts::{PI, TAU};

use crate::clock::TickInput;

/// Layout and motion parameters of one belt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeltConfig {
    pub name: &'static str,
    pub count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Total vertical thickness, centred on the ecliptic.
    pub thickness: f64,
    /// Random extra angle added to each rock's even spacing.
    pub angle_jitter: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Radians per second, not scaled by the speed multiplier.
    pub spin_rate: f64,
}

/// Between Mars and Jupiter.
pub const ASTEROID_BELT: BeltConfig = BeltConfig {
    name: "Asteroid belt",
    count: 200,
    inner_radius: 42.0,
    outer_radius: 48.0,
    thickness: 2.0,
    angle_jitter: 0.5,
    min_size: 0.1,
    max_size: 0.4,
    spin_rate: 0.02,
};

/// Beyond Neptune, reaching past Pluto.
pub const KUIPER_BELT: BeltConfig = BeltConfig {
    name: "Kuiper belt",
    count: 400,
    inner_radius: 155.0,
    outer_radius: 220.0,
    thickness: 8.0,
    angle_jitter: 0.8,
    min_size: 0.15,
    max_size: 0.65,
    spin_rate: 0.003,
};

/// One rock, in the belt's own (unspun) frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeltRock {
    pub offset: DVec3,
    /// Euler angles (XYZ), fixed at layout time.
    pub tumble: DVec3,
    pub size: f64,
}

#[derive(Clone, Debug)]
pub struct DebrisBelt {
    config: BeltConfig,
    rocks: Vec<BeltRock>,
    rotation: f64,
}

impl DebrisBelt {
    pub fn generate(config: BeltConfig, rng: &mut impl Rng) -> Self {
        let rocks = (0..config.count)
            .map(|i| {
                let angle =
                    (i as f64 / config.count as f64) * TAU + rng.random::<f64>() * config.angle_jitter;
                let radius = config.inner_radius
                    + rng.random::<f64>() * (config.outer_radius - config.inner_radius);
                let height = (rng.random::<f64>() - 0.5) * config.thickness;
                let tumble = DVec3::new(
                    rng.random::<f64>() * PI,
                    rng.random::<f64>() * PI,
                    rng.random::<f64>() * PI,
                );
                let size = config.min_size + rng.random::<f64>() * (config.max_size - config.min_size);

                BeltRock {
                    offset: DVec3::new(angle.cos() * radius, height, angle.sin() * radius),
                    tumble,
                    size,
                }
            })
            .collect();

        Self {
            config,
            rocks,
            rotation: 0.0,
        }
    }

    /// Spin the belt unless paused.
    pub fn advance(&mut self, tick: &TickInput) {
        if !tick.paused {
            self.rotation += tick.delta_seconds * self.config.spin_rate;
        }
    }

    pub fn config(&self) -> &BeltConfig {
        &self.config
    }

    pub fn rocks(&self) -> &[BeltRock] {
        &self.rocks
    }

    /// Accumulated belt rotation about +Y, radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}
