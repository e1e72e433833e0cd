/// Returns the team-style sign of `x`: `-1` if `x` is negative or zero,
/// otherwise `1`.
///
/// Note that zero maps to `-1`, unlike `f32::signum`.
pub fn sign(x: f32) -> i32 {
    if x <= 0.0 {
        -1
    } else {
        1
    }
}

/// Clamps `x` into `low..=high`.
///
/// Unlike `f32::clamp`, this does not panic if `low > high`; `low` wins.
pub fn cap(x: f32, low: f32, high: f32) -> f32 {
    x.min(high).max(low)
}
