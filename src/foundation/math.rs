/// Linear interpolation of one channel at `t` in `[0, 1]`.
pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let af = f32::from(a);
    let bf = f32::from(b);
    (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
}

/// Round a non-negative cent amount half-up.
pub(crate) fn round_cents(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
