use crate::{
    body::{Body, BodyKind},
    config::SimulationConfig,
    error::SimResult,
    gravity::Gravity,
    orbit,
    registry::BodyRegistry,
    trail::{Trail, TrailRecorder},
};

use ultraviolet::Vec2;

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    /// Constructed but never reset; holds no anchor.
    Uninitialized,
    Running,
    Paused,
}

/// Owns the star system: bodies, trails, integrator and clock.
///
/// The host drives it by calling [`Simulation::step`] once per frame and
/// reads positions back through [`Simulation::bodies`] after it returns.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Active settings.
    config: SimulationConfig,
    /// Bodies and their trails.
    registry: BodyRegistry,
    /// Force and integration stage.
    gravity: Gravity,
    /// Trail sampling cadence.
    recorder: TrailRecorder,
    /// Steps are ignored while set.
    paused: bool,
    /// Set by the first reset.
    initialized: bool,
    /// Simulated years since the last reset.
    elapsed: f32,
    /// Unpaused steps since the last reset.
    frame: usize,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Creates a reset simulation with default settings: one anchor star at the origin.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a reset simulation with the given settings.
    pub fn with_config(config: SimulationConfig) -> Self {
        let mut sim = Self::uninitialized(config);
        sim.reset();
        sim
    }

    /// Creates an empty simulation that ignores `step` until the first reset.
    pub fn uninitialized(config: SimulationConfig) -> Self {
        Self {
            gravity: config.gravity(),
            registry: BodyRegistry::new(config.trail_capacity),
            recorder: TrailRecorder::new(config.trail_interval),
            config,
            paused: false,
            initialized: false,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Clears every body and trail and places the configured anchor at the origin.
    pub fn reset(&mut self) {
        let anchor = self.config.anchor.body(Vec2::zero(), Vec2::zero());
        self.reset_registry(anchor);
    }

    /// Like [`Simulation::reset`], with a caller-supplied anchor.
    /// The anchor is made fixed regardless of its flag.
    pub fn reset_with_anchor(&mut self, anchor: Body) -> SimResult<()> {
        if let Err(err) = anchor.validate() {
            log::warn!("rejected anchor {anchor:?}: {err}");
            return Err(err);
        }
        self.reset_registry(anchor);
        Ok(())
    }

    fn reset_registry(&mut self, anchor: Body) {
        self.registry.reset(anchor);
        self.recorder.reset();
        self.elapsed = 0.0;
        self.frame = 0;
        self.initialized = true;
        log::info!(
            "star system reset: anchor mass {} radius {}",
            anchor.mass,
            anchor.radius
        );
    }

    /// Adds a body, returning its index.
    ///
    /// Non-positive mass or radius and non-finite state are rejected instead
    /// of being allowed to poison the integrator with NaN.
    pub fn add_body(&mut self, body: Body) -> SimResult<usize> {
        match self.registry.add(body) {
            Ok(index) => {
                log::debug!(
                    "added body #{index}: mass {} at ({}, {}) fixed={}",
                    body.mass,
                    body.pos.x,
                    body.pos.y,
                    body.fixed
                );
                Ok(index)
            }
            Err(err) => {
                log::warn!("rejected body {body:?}: {err}");
                Err(err)
            }
        }
    }

    /// Places a preset body at `target` on a circular orbit around the anchor.
    ///
    /// Fixed presets are placed at rest.
    pub fn place_body(&mut self, kind: BodyKind, target: Vec2) -> SimResult<usize> {
        let vel = self.compute_orbit_velocity(target, self.registry.anchor());
        self.add_body(kind.body(target, vel))
    }

    /// Circular-orbit insertion velocity at `target` around `reference`, using
    /// this simulation's gravitational constant. Zero without a reference.
    pub fn compute_orbit_velocity(&self, target: Vec2, reference: Option<&Body>) -> Vec2 {
        orbit::orbit_velocity(self.gravity.g, target, reference)
    }

    /// Advances one frame. Returns `false` without touching any state when
    /// paused or not yet reset.
    ///
    /// Runs to completion before returning. Calls must not overlap; hosts that
    /// share a simulation between threads serialize access behind a lock.
    pub fn step(&mut self) -> bool {
        if self.paused || !self.initialized {
            return false;
        }

        self.gravity.step(self.registry.bodies_mut());

        self.elapsed += self.config.years_per_step * self.config.time_scale;
        self.frame += 1;

        if self.recorder.tick() {
            let (bodies, trails) = self.registry.bodies_and_trails_mut();
            self.recorder.record_all(bodies, trails);
        }

        log::trace!("frame {} at {:.2} years", self.frame, self.elapsed);
        true
    }

    /// Ordered read-only view of every body.
    pub fn bodies(&self) -> &[Body] {
        self.registry.bodies()
    }

    pub fn body_count(&self) -> usize {
        self.registry.len()
    }

    /// Trail of the body at `index`; `None` for fixed bodies.
    pub fn trail(&self, index: usize) -> Option<&Trail> {
        self.registry.trail(index)
    }

    /// The most massive fixed body, the default orbit reference.
    pub fn anchor(&self) -> Option<&Body> {
        self.registry.anchor()
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_paused(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn state(&self) -> SimState {
        match (self.initialized, self.paused) {
            (false, _) => SimState::Uninitialized,
            (true, false) => SimState::Running,
            (true, true) => SimState::Paused,
        }
    }

    /// Scales how fast the elapsed-years counter runs.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.config.time_scale = time_scale;
    }

    /// Simulated years since the last reset.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Unpaused steps since the last reset.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Gravitational constant in use.
    pub fn g(&self) -> f32 {
        self.gravity.g
    }
}
