//! Non-linear scalar curves shared by the alpha functions.

#[inline]
/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[inline]
/// Hermite smoothstep `3t^2 - 2t^3`.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
/// Exponential ramp through `(0, 0)` and `(1, 1)`: `(2^(10t) - 1) / 1023`.
pub fn exp_ramp(t: f64) -> f64 {
    ((10.0 * t).exp2() - 1.0) / 1023.0
}
