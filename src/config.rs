use crate::{body::BodyKind, gravity::Gravity, trail::Trail};

/// Tunables for a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational constant.
    pub g: f32,
    /// Integration sub-steps per `step()`.
    pub substeps: u32,
    /// Pairs closer than this exert no force on each other.
    pub min_distance: f32,
    /// Samples kept per trail.
    pub trail_capacity: usize,
    /// Trail sampling period, in steps.
    pub trail_interval: u32,
    /// Elapsed years added per unpaused step, before `time_scale`.
    pub years_per_step: f32,
    /// Scales the elapsed-years counter. Physics always advances one tick per step.
    pub time_scale: f32,
    /// Preset used for the anchor body on reset.
    pub anchor: BodyKind,
    /// Compute accelerations on the rayon pool.
    pub use_rayon: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            g: Gravity::DEFAULT_G,
            substeps: Gravity::DEFAULT_SUBSTEPS,
            min_distance: Gravity::DEFAULT_MIN_DISTANCE,
            trail_capacity: Trail::DEFAULT_CAPACITY,
            trail_interval: Self::DEFAULT_TRAIL_INTERVAL,
            years_per_step: Self::DEFAULT_YEARS_PER_STEP,
            time_scale: 1.0,
            anchor: BodyKind::Star,
            use_rayon: false,
        }
    }
}

impl SimulationConfig {
    pub const DEFAULT_TRAIL_INTERVAL: u32 = 1;
    pub const DEFAULT_YEARS_PER_STEP: f32 = 0.05;

    pub fn with_g(mut self, g: f32) -> Self {
        self.g = g;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    pub fn with_trail_interval(mut self, interval: u32) -> Self {
        self.trail_interval = interval;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_anchor(mut self, anchor: BodyKind) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_rayon(mut self, use_rayon: bool) -> Self {
        self.use_rayon = use_rayon;
        self
    }

    /// Builds the integrator these settings describe.
    pub fn gravity(&self) -> Gravity {
        let mut gravity = Gravity::new(self.g, self.substeps, self.min_distance);
        gravity.use_rayon = self.use_rayon;
        gravity
    }
}
