use nalgebra::Vector2;
use std::f32::consts::PI;

/// Returns `num_points` points evenly spaced around a circle centered on the
/// origin, starting at `(0, radius)` and going counterclockwise.
pub fn circle_points(num_points: usize, radius: f32) -> Vec<Vector2<f32>> {
    let increment = 2.0 * PI / num_points as f32;
    (0..num_points)
        .map(|i| {
            let (sin, cos) = (i as f32 * increment).sin_cos();
            Vector2::new(-radius * sin, radius * cos)
        })
        .collect()
}
