//! Smooth angular wander used to steer growing agents.
//!
//! Three sinusoids with distinct frequencies and phase multipliers are
//! summed with decreasing weights. The result is bounded by the sum of the
//! weights (±0.3 rad) and depends only on its inputs.

/// `(frequency, phase multiplier, amplitude)` for each term.
const TERMS: [(f32, f32, f32); 3] = [(8.0, 1.0, 0.15), (12.0, 1.5, 0.10), (15.0, 2.0, 0.05)];

/// Upper bound of `|wander(t, phase)|`.
pub const MAX_WANDER: f32 = 0.3;

/// Heading perturbation (radians) at time `t` for an agent with the given
/// phase offset. The middle term is a cosine, the outer two are sines.
pub fn wander(t: f32, phase: f32) -> f32 {
    let [(f1, p1, a1), (f2, p2, a2), (f3, p3, a3)] = TERMS;
    (t * f1 + phase * p1).sin() * a1
        + (t * f2 + phase * p2).cos() * a2
        + (t * f3 + phase * p3).sin() * a3
}
