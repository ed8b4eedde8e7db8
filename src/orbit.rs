use crate::body::Body;

use ultraviolet::Vec2;

/// Velocity that puts a body at `target` on a circular orbit around `reference`.
///
/// Speed is `sqrt(g * M / r)`. The direction is the unit radius vector rotated
/// by a quarter turn, `(r.y, -r.x) / |r|`, so every inserted body circles the
/// reference the same way.
///
/// With no reference, or a target exactly on the reference, the body gets no
/// initial motion.
pub fn orbit_velocity(g: f32, target: Vec2, reference: Option<&Body>) -> Vec2 {
    let Some(reference) = reference else {
        return Vec2::zero();
    };

    let r = target - reference.pos;
    let distance = r.mag();
    if distance == 0.0 || !distance.is_finite() {
        return Vec2::zero();
    }

    let speed = (g * reference.mass / distance).sqrt();
    Vec2::new(r.y / distance, -r.x / distance) * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_speed_and_direction() {
        let star = Body::anchored(Vec2::zero(), 1000.0, 15.0);
        let v = orbit_velocity(0.5, Vec2::new(100.0, 0.0), Some(&star));

        assert!((v.mag() - 5.0f32.sqrt()).abs() < 1e-5);
        assert_eq!(v.x, 0.0);
        assert!(v.y < 0.0);
    }

    #[test]
    fn velocity_is_perpendicular_to_radius() {
        let star = Body::anchored(Vec2::new(10.0, -20.0), 1000.0, 15.0);
        let target = Vec2::new(-35.0, 60.0);
        let v = orbit_velocity(0.5, target, Some(&star));
        let r = target - star.pos;
        assert!(v.dot(r).abs() < 1e-3);
    }

    #[test]
    fn same_rotation_everywhere() {
        let star = Body::anchored(Vec2::zero(), 1000.0, 15.0);
        for target in [
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(-70.0, -30.0),
        ] {
            let v = orbit_velocity(0.5, target, Some(&star));
            // z component of r x v; negative means clockwise in (x, y).
            let cross = target.x * v.y - target.y * v.x;
            assert!(cross < 0.0);
        }
    }

    #[test]
    fn no_reference_gives_zero() {
        let v = orbit_velocity(0.5, Vec2::new(42.0, 7.0), None);
        assert_eq!(v, Vec2::zero());
        assert!(v.x.is_finite() && v.y.is_finite());
    }

    #[test]
    fn target_on_reference_gives_zero() {
        let star = Body::anchored(Vec2::new(5.0, 5.0), 1000.0, 15.0);
        assert_eq!(orbit_velocity(0.5, Vec2::new(5.0, 5.0), Some(&star)), Vec2::zero());
    }
}
