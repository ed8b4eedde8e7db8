use crate::{body::BodyKind, error::SimResult, simulation::Simulation};
use ultraviolet::Vec2;

/// Planet presets used when scattering a system.
const PLANETS: [BodyKind; 3] = [
    BodyKind::RockyPlanet,
    BodyKind::GasPlanet,
    BodyKind::IcePlanet,
];

/// Generates `n` points spread with uniform area density over the annulus
/// between `inner_radius` and `outer_radius`, centered on the origin.
/// The same seed always yields the same points.
pub fn uniform_annulus(n: usize, inner_radius: f32, outer_radius: f32, seed: u64) -> Vec<Vec2> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let t = inner_radius / outer_radius;

    (0..n)
        .map(|_| {
            let a = rng.f32() * std::f32::consts::TAU;
            let (sin, cos) = a.sin_cos();
            let r = rng.f32() * (1.0 - t * t) + t * t;
            Vec2::new(cos, sin) * outer_radius * r.sqrt()
        })
        .collect()
}

/// Places `n` random planets on circular orbits around the anchor.
pub fn scatter_planets(
    sim: &mut Simulation,
    n: usize,
    inner_radius: f32,
    outer_radius: f32,
    seed: u64,
) -> SimResult<()> {
    let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(1));
    for pos in uniform_annulus(n, inner_radius, outer_radius, seed) {
        let kind = PLANETS[rng.usize(..PLANETS.len())];
        sim.place_body(kind, pos)?;
    }
    log::debug!("scattered {n} planets with seed {seed}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annulus_points_stay_in_bounds() {
        for p in uniform_annulus(500, 40.0, 300.0, 7) {
            let r = p.mag();
            assert!(r >= 40.0 - 1e-3 && r <= 300.0 + 1e-3, "radius {r} out of bounds");
        }
    }

    #[test]
    fn seed_is_reproducible() {
        assert_eq!(uniform_annulus(32, 40.0, 300.0, 3), uniform_annulus(32, 40.0, 300.0, 3));
    }

    #[test]
    fn scatter_adds_free_orbiting_planets() {
        let mut sim = Simulation::new();
        scatter_planets(&mut sim, 20, 60.0, 250.0, 11).unwrap();
        assert_eq!(sim.body_count(), 21);
        assert!(sim.bodies()[1..].iter().all(|b| !b.fixed && b.vel.mag() > 0.0));
    }
}
