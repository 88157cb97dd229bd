//! Fixed-step time integration for single bodies
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked first and the
//! position drifts with the new velocity. There is no adaptive step and no
//! energy correction. Callers validate `dt` before looping.

use super::states::{Body, NVec2};

/// Pure transition (x, v) -> (x', v') for one step of length `dt`
pub fn semi_implicit_euler(x: NVec2, v: NVec2, a: NVec2, dt: f64) -> (NVec2, NVec2) {
    let v_next = v + a * dt; // kick
    let x_next = x + v_next * dt; // drift with the updated velocity
    (x_next, v_next)
}

/// Advance `body` by one step under acceleration `a` and log the new position
pub fn euler_step(body: &mut Body, a: NVec2, dt: f64) {
    let (x, v) = semi_implicit_euler(body.x, body.v, a, dt);
    body.x = x;
    body.v = v;
    body.record();
}

/// Apply a velocity change `dv` directly, then drift for `dt`
///
/// Used by the inert baseline, whose attraction is an impulse per step rather
/// than an acceleration scaled by `dt`.
pub fn impulse_step(body: &mut Body, dv: NVec2, dt: f64) {
    body.v += dv;
    body.x += body.v * dt;
    body.record();
}
