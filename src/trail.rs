use ultraviolet::Vec2;

use crate::body::Body;

/// Fixed-capacity history of a body's recent positions.
///
/// Writes go to a circular index, so a push never shifts existing samples.
/// Reads are always ordered oldest to newest.
#[derive(Clone, Debug)]
pub struct Trail {
    /// Sample storage. Grows up to `capacity`, then wraps.
    points: Vec<Vec2>,
    /// Maximum number of retained samples.
    capacity: usize,
    /// Slot the next sample is written to once the buffer is full.
    head: usize,
    /// Total number of samples ever written.
    written: u64,
}

impl Trail {
    pub const DEFAULT_CAPACITY: usize = 500;

    /// Creates an empty trail. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            written: 0,
        }
    }

    /// Appends a sample, evicting the oldest one when full.
    pub fn push(&mut self, pos: Vec2) {
        if self.points.len() < self.capacity {
            self.points.push(pos);
        } else {
            self.points[self.head] = pos;
            self.head = (self.head + 1) % self.capacity;
        }
        self.written += 1;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples pushed since creation, including evicted ones.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// The most recently recorded position.
    pub fn latest(&self) -> Option<Vec2> {
        if self.points.is_empty() {
            return None;
        }
        let newest = (self.head + self.points.len() - 1) % self.points.len();
        Some(self.points[newest])
    }

    /// The oldest retained position.
    pub fn oldest(&self) -> Option<Vec2> {
        self.points.get(self.head).copied()
    }

    /// Iterates samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        let (newer, older) = self.points.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    pub fn to_vec(&self) -> Vec<Vec2> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.head = 0;
        self.written = 0;
    }
}

/// Samples body positions into their trails at a reduced rate.
///
/// Sampling is driven by the number of unpaused steps, independent of the
/// integrator's sub-stepping.
#[derive(Clone, Debug)]
pub struct TrailRecorder {
    /// Record once every `interval` steps.
    pub interval: u32,
    /// Steps observed since the last reset.
    ticks: u64,
}

impl Default for TrailRecorder {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TrailRecorder {
    /// Creates a recorder sampling every `interval` steps. Zero is treated as one.
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            ticks: 0,
        }
    }

    /// Appends `body`'s current position to `trail`.
    ///
    /// Fixed bodies never move and own no trail, so passing `None` is a no-op.
    pub fn record(&self, trail: Option<&mut Trail>, body: &Body) {
        if body.fixed {
            return;
        }
        if let Some(trail) = trail {
            trail.push(body.pos);
        }
    }

    /// Advances the step counter and reports whether this step is sampled.
    pub fn tick(&mut self) -> bool {
        let sample = self.ticks % self.interval as u64 == 0;
        self.ticks += 1;
        sample
    }

    /// Records every body that owns a trail. `trails` is indexed like `bodies`.
    pub fn record_all(&self, bodies: &[Body], trails: &mut [Option<Trail>]) {
        for (body, trail) in bodies.iter().zip(trails.iter_mut()) {
            self.record(trail.as_mut(), body);
        }
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32) -> Vec2 {
        Vec2::new(x, 0.0)
    }

    #[test]
    fn push_below_capacity_keeps_order() {
        let mut trail = Trail::new(4);
        trail.push(p(1.0));
        trail.push(p(2.0));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.to_vec(), vec![p(1.0), p(2.0)]);
        assert_eq!(trail.latest(), Some(p(2.0)));
        assert_eq!(trail.oldest(), Some(p(1.0)));
    }

    #[test]
    fn wraps_and_evicts_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..7 {
            trail.push(p(i as f32));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.written(), 7);
        assert_eq!(trail.to_vec(), vec![p(4.0), p(5.0), p(6.0)]);
        assert_eq!(trail.latest(), Some(p(6.0)));
        assert_eq!(trail.oldest(), Some(p(4.0)));
    }

    #[test]
    fn empty_trail_has_no_samples() {
        let trail = Trail::new(0);
        assert_eq!(trail.capacity(), 1);
        assert!(trail.is_empty());
        assert_eq!(trail.latest(), None);
        assert_eq!(trail.oldest(), None);
    }

    #[test]
    fn recorder_ignores_fixed_bodies() {
        let recorder = TrailRecorder::default();
        let star = Body::anchored(Vec2::zero(), 10.0, 1.0);
        let mut trail = Trail::new(4);
        recorder.record(Some(&mut trail), &star);
        recorder.record(None, &star);
        assert!(trail.is_empty());
    }

    #[test]
    fn recorder_samples_every_interval() {
        let mut recorder = TrailRecorder::new(3);
        let sampled: Vec<bool> = (0..7).map(|_| recorder.tick()).collect();
        assert_eq!(sampled, vec![true, false, false, true, false, false, true]);

        recorder.reset();
        assert!(recorder.tick());
    }
}
