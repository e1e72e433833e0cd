use nalgebra::{Matrix3, Vector3};

/// An orthonormal basis stored as three rows: forward, right, and up, in
/// world coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationMatrix {
    rows: [Vector3<f32>; 3],
}

impl RotationMatrix {
    /// Builds the basis for an Unreal rotator. Angles are in radians.
    pub fn from_unreal_angles(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        let (sr, cr) = roll.sin_cos();

        Self {
            rows: [
                Vector3::new(cp * cy, cp * sy, sp),
                Vector3::new(cy * sp * sr - cr * sy, sy * sp * sr + cr * cy, -cp * sr),
                Vector3::new(-cr * cy * sp - sr * sy, -cr * sy * sp + sr * cy, cp * cr),
            ],
        }
    }

    /// Same as `from_unreal_angles`, with the rotator packed as
    /// `(pitch, yaw, roll)`.
    pub fn from_rotator(rotation: &Vector3<f32>) -> Self {
        Self::from_unreal_angles(rotation.x, rotation.y, rotation.z)
    }

    pub fn rows(&self) -> &[Vector3<f32>; 3] {
        &self.rows
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rows[0]
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rows[1]
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rows[2]
    }

    /// Projects a world-space vector onto each row, giving the vector in this
    /// basis.
    pub fn to_local(&self, world: &Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            world.dot(&self.rows[0]),
            world.dot(&self.rows[1]),
            world.dot(&self.rows[2]),
        )
    }

    pub fn to_matrix3(&self) -> Matrix3<f32> {
        Matrix3::from_rows(&[
            self.rows[0].transpose(),
            self.rows[1].transpose(),
            self.rows[2].transpose(),
        ])
    }
}

/// Convenience wrapper: a world angular velocity expressed in the basis of the
/// given rotator.
pub fn local_angular_velocity(
    rotation: &Vector3<f32>,
    angular_velocity: &Vector3<f32>,
) -> Vector3<f32> {
    RotationMatrix::from_rotator(rotation).to_local(angular_velocity)
}
