use crate::{error::Error, math};
use nalgebra::{Vector2, Vector3};

/// Builds a vector from a raw sequence such as `[x, y, z]`.
///
/// Fails if the sequence does not have exactly three components.
pub fn vector3_from_slice(data: &[f32]) -> Result<Vector3<f32>, Error> {
    match *data {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(Error::ArityMismatch {
            expected: 3,
            actual: data.len(),
        }),
    }
}

/// Helpers on top of `nalgebra::Vector3` that nalgebra does not provide in
/// the shape the bot code wants.
///
/// Addition, subtraction, scaling and `abs` come straight from nalgebra. All
/// of these return new values and never mutate `self`.
pub trait ExtendVector3: Sized {
    /// Component-wise division. Fails rather than producing `inf`/`NaN`.
    fn checked_component_div(&self, other: &Self) -> Result<Self, Error>;
    /// Division by a scalar. Fails rather than producing `inf`/`NaN`.
    fn checked_div(&self, divisor: f32) -> Result<Self, Error>;
    /// Component-wise `==`. The result is deliberately not reduced to a single
    /// bool.
    fn eq_each(&self, other: &Self) -> (bool, bool, bool);
    /// Component-wise `>`.
    fn gt_each(&self, other: &Self) -> (bool, bool, bool);
    /// Component-wise `<`.
    fn lt_each(&self, other: &Self) -> (bool, bool, bool);
    /// Clamps each component into the box spanned by `low` and `high`.
    fn cap(&self, low: &Self, high: &Self) -> Self;
    /// Like `normalize`, but returns the zero vector for a zero vector.
    fn normalize_or_zero(&self) -> Self;
    fn to_2d(&self) -> Vector2<f32>;
}

impl ExtendVector3 for Vector3<f32> {
    fn checked_component_div(&self, other: &Self) -> Result<Self, Error> {
        if other.iter().any(|&c| c == 0.0) {
            return Err(Error::DivideByZero);
        }
        Ok(self.component_div(other))
    }

    fn checked_div(&self, divisor: f32) -> Result<Self, Error> {
        if divisor == 0.0 {
            return Err(Error::DivideByZero);
        }
        Ok(self / divisor)
    }

    fn eq_each(&self, other: &Self) -> (bool, bool, bool) {
        (self.x == other.x, self.y == other.y, self.z == other.z)
    }

    fn gt_each(&self, other: &Self) -> (bool, bool, bool) {
        (self.x > other.x, self.y > other.y, self.z > other.z)
    }

    fn lt_each(&self, other: &Self) -> (bool, bool, bool) {
        (self.x < other.x, self.y < other.y, self.z < other.z)
    }

    fn cap(&self, low: &Self, high: &Self) -> Self {
        Vector3::new(
            math::cap(self.x, low.x, high.x),
            math::cap(self.y, low.y, high.y),
            math::cap(self.z, low.z, high.z),
        )
    }

    fn normalize_or_zero(&self) -> Self {
        self.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    fn to_2d(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}
