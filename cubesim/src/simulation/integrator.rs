//! Per-frame integrator for the cube bodies
//!
//! Semi-implicit Euler driven by wall-clock time. Each body keeps its own
//! `last_update_ms`; the first call for a body only records the clock.
//!
//! Bodies are stepped in id order and read the *current* state of the others,
//! so a later body sees positions already moved (and collisions already
//! resolved) earlier in the same tick. Results depend on that order.

use tracing::trace;

use super::collision::{handle_collision, reflect_axis};
use super::engine::Engine;
use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{BodyId, SimulationState};

/// What happened to one body during [`step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub bootstrapped: bool, // first call, clock recorded, nothing integrated
    pub reflected_axis: Option<usize>,
    pub collisions: usize,
}

/// Summary of one [`step_all`] tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bootstrapped: usize,
    pub reflections: usize,
    pub collisions: usize,
}

/// Advance body `id` to wall-clock time `now_ms`
pub fn step(
    sys: &mut SimulationState,
    id: BodyId,
    now_ms: f64,
    forces: &AccelSet,
    params: &Parameters,
    engine: &Engine,
) -> StepReport {
    let mut report = StepReport::default();
    let i = id.0;
    if i >= sys.bodies.len() {
        return report;
    }

    // Uninitialized -> Active: remember the clock, integrate from the next call
    let Some(last_ms) = sys.bodies[i].last_update_ms else {
        sys.bodies[i].last_update_ms = Some(now_ms);
        report.bootstrapped = true;
        return report;
    };

    let dt = (now_ms - last_ms).max(0.0) / 1000.0;

    // Reads the other bodies as they are right now
    let accel = forces.accumulate_accel(id, sys);
    let bounds = sys.bounds;

    {
        let b = &mut sys.bodies[i];
        b.rotation += b.rotation_speed * dt;
        b.a = accel;

        for k in 0..3 {
            b.v[k] += b.a[k] * dt;
            b.x[k] += b.v[k] * dt;

            // Soft speed limit, positive direction only
            if b.v[k] > params.speed_cap {
                b.v[k] *= params.damping;
            }

            // First wall hit ends the axis loop: later axes wait for the next tick
            if let Some(bounds) = &bounds {
                if reflect_axis(b, bounds, k) {
                    trace!(body = %b.label(id), axis = k, "reflected off bounds");
                    report.reflected_axis = Some(k);
                    break;
                }
            }
        }
    }

    if engine.collisions_enabled() {
        for j in 0..sys.bodies.len() {
            if j == i {
                continue;
            }
            if handle_collision(sys, id, BodyId(j), params.collision_margin).is_some() {
                report.collisions += 1;
            }
        }
    }

    sys.bodies[i].last_update_ms = Some(now_ms);
    report
}

/// Step every body once, in id order
pub fn step_all(
    sys: &mut SimulationState,
    now_ms: f64,
    forces: &AccelSet,
    params: &Parameters,
    engine: &Engine,
) -> TickReport {
    let mut tick = TickReport::default();
    for i in 0..sys.bodies.len() {
        let report = step(sys, BodyId(i), now_ms, forces, params, engine);
        if report.bootstrapped {
            tick.bootstrapped += 1;
        }
        if report.reflected_axis.is_some() {
            tick.reflections += 1;
        }
        tick.collisions += report.collisions;
    }
    sys.ticks += 1;
    tick
}
