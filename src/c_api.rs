//! C ABI for embedding the simulation in a foreign render host.
//!
//! Every function taking a handle requires a pointer obtained from
//! `Simulation_Create` that has not been destroyed. Calls on one handle must
//! not overlap: the host invokes them from a single render loop.

use crate::{
    body::{Body, BodyKind},
    simulation::Simulation,
};
use ultraviolet::Vec2;

#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create() -> *mut Simulation {
    Box::into_raw(Box::new(Simulation::new()))
}

/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Returns 1 when the step advanced the system, 0 when paused or null.
///
/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => sim.step() as i32,
        None => 0,
    }
}

/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.reset();
    }
}

/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.body_count())
}

/// Pointer to `Simulation_GetBodyCount` bodies, valid until the next
/// mutating call on `handle`.
///
/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodies(handle: *const Simulation) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.bodies().as_ptr())
}

/// Adds a body. Returns its index, or -1 for a null handle or invalid body.
///
/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddBody(
    handle: *mut Simulation,
    x: f32,
    z: f32,
    vx: f32,
    vz: f32,
    mass: f32,
    radius: f32,
    fixed: bool,
    color: u32,
) -> i64 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    let body = Body::new(Vec2::new(x, z), Vec2::new(vx, vz), mass, radius)
        .with_fixed(fixed)
        .with_color(color);
    sim.add_body(body).map_or(-1, |index| index as i64)
}

/// Places a preset (index into `BodyKind::ALL`) on a circular orbit around
/// the anchor. Returns its index, or -1 on failure.
///
/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_PlaceBody(
    handle: *mut Simulation,
    kind: u32,
    x: f32,
    z: f32,
) -> i64 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    let Some(kind) = BodyKind::ALL.get(kind as usize).copied() else {
        return -1;
    };
    sim.place_body(kind, Vec2::new(x, z)).map_or(-1, |index| index as i64)
}

/// Writes the orbit insertion velocity at `(x, z)` around the anchor into
/// `out_vx` / `out_vz`. Zero when there is no anchor.
///
/// # Safety
/// `handle` is null or live; `out_vx` and `out_vz` are valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_ComputeOrbitVelocity(
    handle: *const Simulation,
    x: f32,
    z: f32,
    out_vx: *mut f32,
    out_vz: *mut f32,
) {
    let vel = unsafe { handle.as_ref() }.map_or(Vec2::zero(), |sim| {
        sim.compute_orbit_velocity(Vec2::new(x, z), sim.anchor())
    });
    unsafe {
        if let Some(vx) = out_vx.as_mut() {
            *vx = vel.x;
        }
        if let Some(vz) = out_vz.as_mut() {
            *vz = vel.y;
        }
    }
}

/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTrailLength(handle: *const Simulation, index: usize) -> usize {
    unsafe { handle.as_ref() }
        .and_then(|sim| sim.trail(index))
        .map_or(0, |trail| trail.len())
}

/// Copies up to `capacity` trail points, oldest first, as interleaved
/// `x, z` pairs into `out`. Returns the number of points written.
///
/// # Safety
/// `handle` is null or live; `out` is valid for `2 * capacity` floats.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopyTrail(
    handle: *const Simulation,
    index: usize,
    out: *mut f32,
    capacity: usize,
) -> usize {
    let Some(trail) = unsafe { handle.as_ref() }.and_then(|sim| sim.trail(index)) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }

    let out = unsafe { std::slice::from_raw_parts_mut(out, capacity * 2) };
    let mut written = 0;
    for (slot, point) in out.chunks_exact_mut(2).zip(trail.iter()) {
        slot[0] = point.x;
        slot[1] = point.y;
        written += 1;
    }
    written
}

/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetPaused(handle: *mut Simulation, paused: bool) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_paused(paused);
    }
}

/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_IsPaused(handle: *const Simulation) -> bool {
    unsafe { handle.as_ref() }.is_some_and(|sim| sim.is_paused())
}

/// Simulated years since the last reset.
///
/// # Safety
/// `handle` is null or a live pointer from `Simulation_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetElapsed(handle: *const Simulation) -> f32 {
    unsafe { handle.as_ref() }.map_or(0.0, |sim| sim.elapsed())
}
