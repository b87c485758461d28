//! Sphere-approximated collisions and boundary reflection
//!
//! Cubes collide as spheres of `Body::radius`. Both the wall and the pairwise
//! response use the same elastic reflection, [`bounce`].

use tracing::trace;

use crate::simulation::states::{Body, BodyId, Bounds, NVec3, SimulationState};

/// Reflect `v` off a surface with unit normal `n`: v' = -(2 (v.n) n - v)
pub fn bounce(v: &mut NVec3, n: &NVec3) {
    let dot = v.dot(n);
    *v = -(2.0 * dot * n - *v);
}

/// Unit normal pointing from `b` to `a` if the spheres touch or overlap
///
/// Coincident centres have no separation direction; +x is used so the pair
/// can still be pushed apart.
pub fn collides(a: &Body, b: &Body) -> Option<NVec3> {
    let d = a.x - b.x;
    let dist = d.norm();
    if dist > a.radius + b.radius {
        return None;
    }
    if dist > 0.0 {
        Some(d / dist)
    } else {
        Some(NVec3::x())
    }
}

/// Detect and resolve a collision between `a` and `b`
///
/// On contact both bodies are pushed apart along the normal by half the
/// overlap (times `margin`), then each bounces off its own side of the contact.
/// A pair already moving apart along the normal is only pushed, not bounced,
/// so a contact resolved earlier in the tick is not reflected back.
/// Returns the normal on `a` when the pair bounced; the normal on `b` is its negation.
pub fn handle_collision(sys: &mut SimulationState, a: BodyId, b: BodyId, margin: f64) -> Option<NVec3> {
    let (ba, bb) = pair_mut(&mut sys.bodies, a.0, b.0)?;
    let n = collides(ba, bb)?;

    let dist = (bb.x - ba.x).norm();
    let delta = margin * (ba.radius + bb.radius - dist) / 2.0;
    ba.x += n * delta;
    bb.x -= n * delta;

    // n points from b to a, so a positive closing term means separating
    if (ba.v - bb.v).dot(&n) > 0.0 {
        return None;
    }

    bounce(&mut ba.v, &n);
    bounce(&mut bb.v, &-n);

    trace!(a = %ba.label(a), b = %bb.label(b), overlap = 2.0 * delta / margin, "collision");
    Some(n)
}

/// Reflect off the first out-of-range axis of `bounds`
///
/// Later axes are not checked in the same call. Returns the reflected axis.
pub fn reflect_bounds(body: &mut Body, bounds: &Bounds) -> Option<usize> {
    (0..3).find(|&i| reflect_axis(body, bounds, i))
}

/// Reflect off `bounds` along axis `i` if the body is outside on that axis
///
/// The position is clamped to the violated face and the velocity is bounced
/// off the inward normal.
pub fn reflect_axis(body: &mut Body, bounds: &Bounds, i: usize) -> bool {
    let mut n = NVec3::zeros();
    if body.x[i] < bounds.min[i] {
        n[i] = 1.0;
        body.x[i] = bounds.min[i];
    } else if body.x[i] > bounds.max[i] {
        n[i] = -1.0;
        body.x[i] = bounds.max[i];
    } else {
        return false;
    }

    bounce(&mut body.v, &n);
    true
}

/// Two distinct mutable bodies out of one slice
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        Some((&mut lo[i], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        Some((&mut hi[0], &mut lo[j]))
    }
}
