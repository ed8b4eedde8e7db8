use crate::body::Body;

use rayon::prelude::*;
use ultraviolet::Vec2;

/// Direct-summation Newtonian gravity with sub-stepped semi-implicit Euler.
///
/// Every free body feels every other body, fixed ones included. Fixed bodies
/// are force sources only and are never integrated.
///
/// `step` must not be called concurrently on the same bodies; the `&mut`
/// receivers make that a compile-time guarantee for Rust callers.
#[derive(Clone, Debug)]
pub struct Gravity {
    /// Gravitational constant shared by every pair.
    pub g: f32,
    /// Integration sub-steps per frame. Never zero.
    substeps: u32,
    /// Pairs closer than this contribute no force.
    ///
    /// This is a stability clamp against near-singular accelerations, not a
    /// physical model: bodies pass through each other unhindered.
    pub min_distance: f32,
    /// Compute per-body accelerations on the rayon pool.
    pub use_rayon: bool,
    /// Acceleration scratch buffer, reused across sub-steps.
    acc: Vec<Vec2>,
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_G, Self::DEFAULT_SUBSTEPS, Self::DEFAULT_MIN_DISTANCE)
    }
}

impl Gravity {
    pub const DEFAULT_G: f32 = 0.5;
    pub const DEFAULT_SUBSTEPS: u32 = 2;
    pub const DEFAULT_MIN_DISTANCE: f32 = 5.0;
    /// Logical time advanced by one `step`.
    pub const FRAME_DT: f32 = 1.0;

    pub fn new(g: f32, substeps: u32, min_distance: f32) -> Self {
        Self {
            g,
            substeps: substeps.max(1),
            min_distance,
            use_rayon: false,
            acc: Vec::new(),
        }
    }

    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    /// Sets the sub-step count. Zero is treated as one.
    pub fn set_substeps(&mut self, substeps: u32) {
        self.substeps = substeps.max(1);
    }

    /// Acceleration `b` imparts on `a`, or zero inside the clamp distance.
    pub fn pair_acceleration(&self, a: &Body, b: &Body) -> Vec2 {
        let d = b.pos - a.pos;
        let dist_sq = d.mag_sq();
        let dist = dist_sq.sqrt();

        if dist < self.min_distance || dist == 0.0 {
            return Vec2::zero();
        }

        // mass_a cancels out of the acceleration.
        let force = self.g * a.mass * b.mass / dist_sq;
        d * (force / dist) / a.mass
    }

    /// Net acceleration on `bodies[index]` from every other body.
    /// Fixed bodies report zero. Summation follows registry order.
    pub fn acceleration_on(&self, bodies: &[Body], index: usize) -> Vec2 {
        let a = &bodies[index];
        if a.fixed {
            return Vec2::zero();
        }

        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .fold(Vec2::zero(), |acc, (_, b)| acc + self.pair_acceleration(a, b))
    }

    /// Advances all free bodies by one frame.
    pub fn step(&mut self, bodies: &mut [Body]) {
        self.step_by(bodies, Self::FRAME_DT);
    }

    /// Advances all free bodies by `dt`, split into `substeps` equal parts.
    pub fn step_by(&mut self, bodies: &mut [Body], dt: f32) {
        if bodies.is_empty() {
            return;
        }

        let sub_dt = dt / self.substeps as f32;
        for _ in 0..self.substeps {
            self.substep(bodies, sub_dt);
        }
    }

    /// One sub-step in two phases: kick every free body from the current
    /// positions, then drift every free body with its new velocity.
    fn substep(&mut self, bodies: &mut [Body], dt: f32) {
        let mut acc = std::mem::take(&mut self.acc);
        acc.clear();
        acc.resize(bodies.len(), Vec2::zero());

        {
            let gravity = &*self;
            let bodies: &[Body] = bodies;
            if gravity.use_rayon {
                acc.par_iter_mut().enumerate().for_each(|(i, a)| {
                    *a = gravity.acceleration_on(bodies, i);
                });
            } else {
                acc.iter_mut().enumerate().for_each(|(i, a)| {
                    *a = gravity.acceleration_on(bodies, i);
                });
            }
        }

        for (body, a) in bodies.iter_mut().zip(acc.iter()) {
            if !body.fixed {
                body.accelerate(*a, dt);
            }
        }

        for body in bodies.iter_mut().filter(|body| !body.fixed) {
            body.drift(dt);
        }

        self.acc = acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> Body {
        Body::anchored(Vec2::zero(), 1000.0, 15.0)
    }

    fn planet(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::zero(), 15.0, 4.0)
    }

    #[test]
    fn acceleration_points_at_source() {
        let gravity = Gravity::default();
        let a = gravity.pair_acceleration(&planet(100.0, 0.0), &star());
        assert!(a.x < 0.0);
        assert_eq!(a.y, 0.0);
        // G * M / r^2 = 0.5 * 1000 / 10000
        assert!((a.x + 0.05).abs() < 1e-6);
    }

    #[test]
    fn acceleration_independent_of_own_mass() {
        let gravity = Gravity::default();
        let light = Body::new(Vec2::new(40.0, 30.0), Vec2::zero(), 1.0, 1.0);
        let heavy = Body::new(Vec2::new(40.0, 30.0), Vec2::zero(), 400.0, 1.0);
        let a1 = gravity.pair_acceleration(&light, &star());
        let a2 = gravity.pair_acceleration(&heavy, &star());
        assert!((a1 - a2).mag() < 1e-6);
    }

    #[test]
    fn pairs_inside_clamp_contribute_nothing() {
        let gravity = Gravity::default();
        let a = gravity.pair_acceleration(&planet(3.0, 0.0), &star());
        assert_eq!(a, Vec2::zero());

        let coincident = gravity.pair_acceleration(&planet(0.0, 0.0), &star());
        assert_eq!(coincident, Vec2::zero());

        let unclamped = Gravity::new(0.5, 2, 0.0);
        assert_eq!(unclamped.pair_acceleration(&planet(0.0, 0.0), &star()), Vec2::zero());
    }

    #[test]
    fn fixed_bodies_feel_nothing() {
        let gravity = Gravity::default();
        let bodies = [star(), planet(50.0, 0.0)];
        assert_eq!(gravity.acceleration_on(&bodies, 0), Vec2::zero());
        assert!(gravity.acceleration_on(&bodies, 1).x < 0.0);
    }

    #[test]
    fn multiple_fixed_bodies_each_contribute() {
        let gravity = Gravity::default();
        let bodies = [
            Body::anchored(Vec2::new(-100.0, 0.0), 1000.0, 10.0),
            Body::anchored(Vec2::new(100.0, 0.0), 1000.0, 10.0),
            planet(0.0, 0.0),
        ];
        // Symmetric binary: pulls cancel at the midpoint.
        assert!(gravity.acceleration_on(&bodies, 2).mag() < 1e-6);

        let offset = [bodies[0], bodies[1], planet(0.0, 50.0)];
        let a = gravity.acceleration_on(&offset, 2);
        assert!(a.x.abs() < 1e-6);
        assert!(a.y < 0.0);
    }

    #[test]
    fn positions_move_after_all_velocities_update() {
        // Two free bodies that attract each other symmetrically. A sequential
        // kick-drift would break the symmetry within the first sub-step.
        let mut bodies = [planet(-50.0, 0.0), planet(50.0, 0.0)];
        let mut gravity = Gravity::default();
        gravity.step(&mut bodies);

        assert_eq!(bodies[0].pos.x, -bodies[1].pos.x);
        assert_eq!(bodies[0].vel.x, -bodies[1].vel.x);
        assert!(bodies[0].pos.x > -50.0);
    }

    #[test]
    fn frame_is_split_into_substeps() {
        let mut bodies = [Body::new(Vec2::zero(), Vec2::new(1.0, 0.0), 1.0, 1.0)];
        let mut gravity = Gravity::new(0.5, 4, 5.0);
        gravity.step(&mut bodies);
        assert!((bodies[0].pos.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_substeps_still_advance_the_frame() {
        let mut gravity = Gravity::new(0.5, 0, 5.0);
        assert_eq!(gravity.substeps(), 1);

        gravity.set_substeps(0);
        assert_eq!(gravity.substeps(), 1);

        let mut bodies = [Body::new(Vec2::zero(), Vec2::new(1.0, 0.0), 1.0, 1.0)];
        gravity.step(&mut bodies);
        assert_eq!(bodies[0].pos, Vec2::new(1.0, 0.0));
        assert!(bodies[0].vel.x.is_finite());
    }

    #[test]
    fn rayon_path_matches_serial_path() {
        let make = || {
            vec![
                star(),
                planet(100.0, 0.0),
                planet(0.0, -140.0),
                planet(-60.0, 75.0),
            ]
        };
        let mut serial = make();
        let mut parallel = make();

        let mut g1 = Gravity::default();
        let mut g2 = Gravity::default();
        g2.use_rayon = true;

        for _ in 0..50 {
            g1.step(&mut serial);
            g2.step(&mut parallel);
        }
        assert_eq!(serial, parallel);
    }
}
