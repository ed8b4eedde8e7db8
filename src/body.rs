use ultraviolet::Vec2;

use crate::error::{InvalidBodyError, SimResult};

/// A simulated point mass on the orbital plane.
///
/// `pos.x` is the scene x axis and `pos.y` carries the scene z axis; the
/// simulation is planar, so the scene y coordinate is always zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Position vector.
    pub pos: Vec2,
    /// Velocity vector, in units per tick.
    pub vel: Vec2,
    /// Mass of the body.
    pub mass: f32,
    /// Radius used by the renderer. Not coupled to mass.
    pub radius: f32,
    /// Fixed bodies attract others but are never integrated.
    pub fixed: bool,
    /// Opaque 0xRRGGBB color for the renderer.
    pub color: u32,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::zero(), 1.0, 1.0)
    }
}

impl Body {
    /// Creates a new free body with the given properties.
    pub fn new(pos: Vec2, vel: Vec2, mass: f32, radius: f32) -> Self {
        Self {
            pos,
            vel,
            mass,
            radius,
            fixed: false,
            color: 0xffffff,
        }
    }

    /// Creates a fixed body at rest at `pos`.
    pub fn anchored(pos: Vec2, mass: f32, radius: f32) -> Self {
        Self {
            fixed: true,
            ..Self::new(pos, Vec2::zero(), mass, radius)
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Checks the invariants every body in a registry must hold:
    /// strictly positive mass and radius, and finite state.
    pub fn validate(&self) -> SimResult<()> {
        let finite = self.pos.x.is_finite()
            && self.pos.y.is_finite()
            && self.vel.x.is_finite()
            && self.vel.y.is_finite();
        if !finite || !self.mass.is_finite() || !self.radius.is_finite() {
            return Err(InvalidBodyError::NonFinite);
        }
        if self.mass <= 0.0 {
            return Err(InvalidBodyError::NonPositiveMass(self.mass));
        }
        if self.radius <= 0.0 {
            return Err(InvalidBodyError::NonPositiveRadius(self.radius));
        }
        Ok(())
    }

    /// Semi-implicit Euler kick: updates velocity only.
    /// Positions are advanced separately once every body has been kicked.
    pub fn accelerate(&mut self, acc: Vec2, dt: f32) {
        self.vel += acc * dt;
    }

    /// Semi-implicit Euler drift using the already-updated velocity.
    pub fn drift(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Placement presets offered by the system builder.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// The central anchor star. Fixed.
    Star,
    RockyPlanet,
    GasPlanet,
    IcePlanet,
    /// A small companion star. Free, unlike [`BodyKind::Star`].
    DwarfStar,
}

impl BodyKind {
    pub const ALL: [BodyKind; 5] = [
        BodyKind::Star,
        BodyKind::RockyPlanet,
        BodyKind::GasPlanet,
        BodyKind::IcePlanet,
        BodyKind::DwarfStar,
    ];

    pub fn mass(self) -> f32 {
        match self {
            BodyKind::Star => 1000.0,
            BodyKind::RockyPlanet => 15.0,
            BodyKind::GasPlanet => 80.0,
            BodyKind::IcePlanet => 40.0,
            BodyKind::DwarfStar => 300.0,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            BodyKind::Star => 15.0,
            BodyKind::RockyPlanet => 4.0,
            BodyKind::GasPlanet => 10.0,
            BodyKind::IcePlanet => 8.0,
            BodyKind::DwarfStar => 12.0,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            BodyKind::Star => 0xffaa33,
            BodyKind::RockyPlanet => 0x94a3b8,
            BodyKind::GasPlanet => 0xd97706,
            BodyKind::IcePlanet => 0x60a5fa,
            BodyKind::DwarfStar => 0xef4444,
        }
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, BodyKind::Star)
    }

    /// Builds a body of this kind at `pos` moving with `vel`.
    /// Fixed kinds ignore `vel` and start at rest.
    pub fn body(self, pos: Vec2, vel: Vec2) -> Body {
        let body = if self.is_fixed() {
            Body::anchored(pos, self.mass(), self.radius())
        } else {
            Body::new(pos, vel, self.mass(), self.radius())
        };
        body.with_color(self.color())
    }
}
