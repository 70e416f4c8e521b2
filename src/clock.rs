//! Orbital state clock: advances phase and spin once per tick.
//!
//! The pause flag is composed by the caller (`paused || camera_interacting`)
//! and applies uniformly to orbital phase and spin.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use crate::catalog::{Body, BodyCatalog};
use crate::types::{PHASE_RATE, SPIN_RATE};

/// Inputs shared by every body in one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Real seconds since the previous tick.
    pub delta_seconds: f64,
    pub speed_multiplier: f64,
    /// Composed pause flag.
    pub paused: bool,
}

/// Phase after one tick for a body with `orbital_speed`.
pub fn advance_phase(phase: f64, orbital_speed: f64, tick: &TickInput, phase_rate: f64) -> f64 {
    if tick.paused {
        return phase;
    }
    phase + orbital_speed * tick.speed_multiplier * tick.delta_seconds * phase_rate
}

/// Per-body angular accumulator.
#[derive(Clone, Copy, Debug)]
pub struct OrbitalClock {
    pub phase_rate: f64,
    pub spin_rate: f64,
}

impl Default for OrbitalClock {
    fn default() -> Self {
        Self {
            phase_rate: PHASE_RATE,
            spin_rate: SPIN_RATE,
        }
    }
}

impl OrbitalClock {
    /// Advance one body's orbital phase and return it.
    ///
    /// Bodies that do not orbit (the star, escaping probes) keep their phase.
    pub fn advance(&self, body: &mut Body, tick: &TickInput) -> f64 {
        if body.geometry().advances() {
            body.phase = advance_phase(body.phase, body.orbital_speed, tick, self.phase_rate);
        }
        body.phase
    }

    /// Advance one body's spin angle and return it. Not scaled by the speed
    /// multiplier.
    pub fn advance_spin(&self, body: &mut Body, tick: &TickInput) -> f64 {
        if !tick.paused {
            body.spin += body.rotation_speed * tick.delta_seconds * self.spin_rate;
        }
        body.spin
    }

    /// Advance every body in the catalog with the same tick snapshot.
    pub fn advance_all(&self, catalog: &mut BodyCatalog, tick: &TickInput) {
        for body in catalog.iter_mut() {
            self.advance(body, tick);
            self.advance_spin(body, tick);
        }
    }
}

/// Seedable source of initial phases, so bodies do not start lined up.
pub struct PhaseSeeder {
    rng: StdRng,
}

impl PhaseSeeder {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Uniform phase in [0, 2π).
    pub fn next_phase(&mut self) -> f64 {
        self.rng.random_range(0.0..TAU)
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
