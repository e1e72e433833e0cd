//! The per-tick snapshot handed to the bot by the framework.
//!
//! These mirror the framework's packet closely, but with `nalgebra` vectors
//! and snake_case names.

use nalgebra::Vector3;

/// Pitch, yaw, and roll, in radians.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Packs the rotator as `(pitch, yaw, roll)`.
    pub fn to_vector(&self) -> Vector3<f32> {
        Vector3::new(self.pitch, self.yaw, self.roll)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Physics {
    pub location: Vector3<f32>,
    pub rotation: Rotator,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation: Rotator::default(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerInfo {
    pub physics: Physics,
    pub name: String,
    /// The raw team index (0 for blue, 1 for orange).
    pub team: u8,
    pub boost: f32,
    pub has_wheel_contact: bool,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BallInfo {
    pub physics: Physics,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct GameInfo {
    pub seconds_elapsed: f32,
    pub is_round_active: bool,
    pub is_kickoff_pause: bool,
    pub is_match_ended: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GameTickPacket {
    pub game_cars: Vec<PlayerInfo>,
    pub num_cars: usize,
    pub game_ball: BallInfo,
    pub game_info: GameInfo,
}

impl GameTickPacket {
    /// Iterates over the cars that are actually in the match, paired with
    /// their index.
    pub fn cars(&self) -> impl Iterator<Item = (usize, &PlayerInfo)> {
        self.game_cars.iter().take(self.num_cars).enumerate()
    }
}

#[cfg(feature = "rlbot")]
pub use self::flat::deserialize_game_tick_packet;

#[cfg(feature = "rlbot")]
mod flat {
    use super::*;

    fn tables<'a, T: flatbuffers::Follow<'a> + 'a>(
        xs: flatbuffers::Vector<'a, flatbuffers::ForwardsUOffset<T>>,
    ) -> impl Iterator<Item = T::Inner> + 'a {
        (0..xs.len()).map(move |i| xs.get(i))
    }

    pub fn deserialize_game_tick_packet(packet: rlbot::flat::GameTickPacket<'_>) -> GameTickPacket {
        let game_cars: Vec<_> = packet
            .players()
            .map(|ps| tables(ps).map(deserialize_player_info).collect())
            .unwrap_or_default();
        GameTickPacket {
            num_cars: game_cars.len(),
            game_cars,
            game_ball: packet.ball().map(deserialize_ball_info).unwrap_or_default(),
            game_info: packet
                .gameInfo()
                .map(deserialize_game_info)
                .unwrap_or_default(),
        }
    }

    fn deserialize_player_info(info: rlbot::flat::PlayerInfo<'_>) -> PlayerInfo {
        PlayerInfo {
            physics: info.physics().map(deserialize_physics).unwrap_or_default(),
            name: info.name().unwrap_or_default().to_owned(),
            team: info.team() as u8,
            boost: info.boost() as f32,
            has_wheel_contact: info.hasWheelContact(),
        }
    }

    fn deserialize_ball_info(info: rlbot::flat::BallInfo<'_>) -> BallInfo {
        BallInfo {
            physics: info.physics().map(deserialize_physics).unwrap_or_default(),
        }
    }

    fn deserialize_game_info(info: rlbot::flat::GameInfo<'_>) -> GameInfo {
        GameInfo {
            seconds_elapsed: info.secondsElapsed(),
            is_round_active: info.isRoundActive(),
            is_kickoff_pause: info.isKickoffPause(),
            is_match_ended: info.isMatchEnded(),
        }
    }

    fn deserialize_physics(physics: rlbot::flat::Physics<'_>) -> Physics {
        Physics {
            location: physics
                .location()
                .map(deserialize_vector3)
                .unwrap_or_else(Vector3::zeros),
            rotation: physics
                .rotation()
                .map(deserialize_rotator)
                .unwrap_or_default(),
            velocity: physics
                .velocity()
                .map(deserialize_vector3)
                .unwrap_or_else(Vector3::zeros),
            angular_velocity: physics
                .angularVelocity()
                .map(deserialize_vector3)
                .unwrap_or_else(Vector3::zeros),
        }
    }

    fn deserialize_vector3(vector3: &rlbot::flat::Vector3) -> Vector3<f32> {
        Vector3::new(vector3.x(), vector3.y(), vector3.z())
    }

    fn deserialize_rotator(rotator: &rlbot::flat::Rotator) -> Rotator {
        Rotator::new(rotator.pitch(), rotator.yaw(), rotator.roll())
    }
}
