use common::{
    math::sign,
    packet::{Physics, PlayerInfo},
    prelude::*,
    Error,
};
use nalgebra::Vector3;
use std::{f32::consts::PI, str::FromStr};

/// Anything with a world location that a `GameObject` can measure against.
pub trait Locatable {
    fn loc(&self) -> Vector3<f32>;
}

impl Locatable for Vector3<f32> {
    fn loc(&self) -> Vector3<f32> {
        *self
    }
}

impl Locatable for [f32; 3] {
    fn loc(&self) -> Vector3<f32> {
        Vector3::from(*self)
    }
}

impl Locatable for GameObject {
    fn loc(&self) -> Vector3<f32> {
        self.location
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn loc(&self) -> Vector3<f32> {
        (**self).loc()
    }
}

/// The raw physics fields of a `GameObject`, for code that picks one by name.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Field {
    Location,
    Velocity,
    Rotation,
    AngularVelocity,
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location" => Ok(Field::Location),
            "velocity" => Ok(Field::Velocity),
            "rotation" => Ok(Field::Rotation),
            "angular_velocity" => Ok(Field::AngularVelocity),
            _ => Err(Error::UnknownField(s.to_owned())),
        }
    }
}

/// The parts of a `GameObject` that only cars have.
#[derive(Debug, Clone, PartialEq)]
pub struct CarInfo {
    /// `-1` for blue, `1` for orange.
    pub team: i32,
    pub name: String,
    pub boost: f32,
    pub grounded: bool,
}

/// The ball, or one car, as of the latest tick.
///
/// `matrix` and `local_angular_velocity` are derived from `rotation` and
/// `angular_velocity`. The only way to change those is through
/// [`GameObject::update_physics`], which recomputes both.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    location: Vector3<f32>,
    velocity: Vector3<f32>,
    rotation: Vector3<f32>,
    angular_velocity: Vector3<f32>,
    local_angular_velocity: Vector3<f32>,
    matrix: RotationMatrix,
    index: Option<usize>,
    car: Option<CarInfo>,
}

impl Default for GameObject {
    fn default() -> Self {
        Self::from_physics(&Physics::default())
    }
}

impl GameObject {
    pub fn from_physics(physics: &Physics) -> Self {
        let mut result = Self {
            location: physics.location,
            velocity: physics.velocity,
            rotation: physics.rotation.to_vector(),
            angular_velocity: physics.angular_velocity,
            local_angular_velocity: Vector3::zeros(),
            matrix: RotationMatrix::from_unreal_angles(0.0, 0.0, 0.0),
            index: None,
            car: None,
        };
        result.calculate_data();
        result
    }

    pub fn from_player_info(index: usize, info: &PlayerInfo) -> Self {
        Self {
            index: Some(index),
            car: Some(CarInfo {
                team: sign(f32::from(info.team)),
                name: info.name.clone(),
                boost: info.boost,
                grounded: info.has_wheel_contact,
            }),
            ..Self::from_physics(&info.physics)
        }
    }

    /// Overwrites the physics fields and recomputes everything derived from
    /// them.
    pub fn update_physics(&mut self, physics: &Physics) {
        self.location = physics.location;
        self.velocity = physics.velocity;
        self.rotation = physics.rotation.to_vector();
        self.angular_velocity = physics.angular_velocity;
        self.calculate_data();
    }

    fn calculate_data(&mut self) {
        self.matrix = RotationMatrix::from_rotator(&self.rotation);
        self.local_angular_velocity = self.matrix.to_local(&self.angular_velocity);
    }

    pub fn location(&self) -> Vector3<f32> {
        self.location
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// `(pitch, yaw, roll)` in radians.
    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn angular_velocity(&self) -> Vector3<f32> {
        self.angular_velocity
    }

    pub fn local_angular_velocity(&self) -> Vector3<f32> {
        self.local_angular_velocity
    }

    pub fn matrix(&self) -> &RotationMatrix {
        &self.matrix
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn car(&self) -> Option<&CarInfo> {
        self.car.as_ref()
    }

    pub fn team(&self) -> Option<i32> {
        self.car.as_ref().map(|c| c.team)
    }

    pub fn field(&self, field: Field) -> Vector3<f32> {
        match field {
            Field::Location => self.location,
            Field::Velocity => self.velocity,
            Field::Rotation => self.rotation,
            Field::AngularVelocity => self.angular_velocity,
        }
    }

    pub fn field_by_name(&self, name: &str) -> Result<Vector3<f32>, Error> {
        Ok(self.field(name.parse()?))
    }

    /// Returns the target's location relative to this object, as
    /// `(forward, right, up)`.
    pub fn to_local(&self, target: &impl Locatable) -> Vector3<f32> {
        self.matrix.to_local(&(target.loc() - self.location))
    }

    /// A cheap stand-in for ground speed: `|vx| + |vy|`. This is not the
    /// Euclidean norm.
    pub fn velocity2d(&self) -> f32 {
        self.velocity.x.abs() + self.velocity.y.abs()
    }

    pub fn distance_to_target_2d(&self, target: &impl Locatable) -> f32 {
        (self.location - target.loc()).to_2d().norm()
    }

    /// The bearing to the target in the ground plane.
    ///
    /// With `local`, the bearing is relative to this object's yaw and corrected
    /// by at most one full turn, so it lands in `-PI..=PI` as long as the yaw
    /// itself is within `-PI..=PI`.
    pub fn angle_to_target(&self, target: &impl Locatable, local: bool) -> f32 {
        let diff = target.loc() - self.location;
        // atan2 returns -PI for a negative-zero y; adding zero clears the sign.
        let angle = (diff.y + 0.0).atan2(diff.x);
        if !local {
            return angle;
        }

        let mut local_angle = angle - self.rotation.y;
        if local_angle < -PI {
            local_angle += 2.0 * PI;
        }
        if local_angle > PI {
            local_angle -= 2.0 * PI;
        }
        local_angle
    }
}
