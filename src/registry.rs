use crate::{
    body::Body,
    error::SimResult,
    trail::Trail,
};

/// Authoritative, insertion-ordered store of simulated bodies and their trails.
///
/// `trails[i]` belongs to `bodies[i]` and is `None` for fixed bodies.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    trails: Vec<Option<Trail>>,
    trail_capacity: usize,
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new(Trail::DEFAULT_CAPACITY)
    }
}

impl BodyRegistry {
    pub fn new(trail_capacity: usize) -> Self {
        Self {
            bodies: Vec::new(),
            trails: Vec::new(),
            trail_capacity,
        }
    }

    /// Drops every body and trail, then inserts `anchor` as the only body.
    /// The anchor is forced fixed. Callers validate custom anchors first.
    pub fn reset(&mut self, anchor: Body) {
        self.bodies.clear();
        self.trails.clear();
        self.push(anchor.with_fixed(true));
    }

    /// Validates and appends `body`, returning its index.
    pub fn add(&mut self, body: Body) -> SimResult<usize> {
        body.validate()?;
        Ok(self.push(body))
    }

    fn push(&mut self, body: Body) -> usize {
        let trail = (!body.fixed).then(|| Trail::new(self.trail_capacity));
        self.bodies.push(body);
        self.trails.push(trail);
        self.bodies.len() - 1
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Splits the registry for trail recording.
    pub(crate) fn bodies_and_trails_mut(&mut self) -> (&[Body], &mut [Option<Trail>]) {
        (&self.bodies, &mut self.trails)
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn trail(&self, index: usize) -> Option<&Trail> {
        self.trails.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    /// The gravity-dominant fixed body: the most massive one, earliest wins ties.
    pub fn anchor(&self) -> Option<&Body> {
        // max_by keeps the last of equal elements, hence the reversal.
        self.bodies
            .iter()
            .filter(|body| body.fixed)
            .rev()
            .max_by(|a, b| a.mass.total_cmp(&b.mass))
    }
}
