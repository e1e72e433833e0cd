use common::packet::{BallInfo, GameInfo, GameTickPacket, Physics, PlayerInfo, Rotator};
use nalgebra::Vector3;
use std::f32::consts::PI;

const TICK_RATE: f32 = 120.0;
const KICKOFF_SECONDS: f32 = 1.0;
const CIRCLE_RADIUS: f32 = 1500.0;
const CAR_SPEED: f32 = 1410.0;

/// Stands in for the framework: yields packets for a short match where two
/// cars circle the ball and the second one leaves halfway through.
pub struct ScriptedMatch {
    tick: u32,
    num_ticks: u32,
}

impl ScriptedMatch {
    pub fn new(seconds: f32) -> Self {
        Self {
            tick: 0,
            num_ticks: (seconds * TICK_RATE) as u32,
        }
    }

    fn packet(&self) -> GameTickPacket {
        let time = self.tick as f32 / TICK_RATE;
        let mut game_cars = vec![circling_car("Blue Car", 0, time, 0.0)];
        if self.tick < self.num_ticks / 2 {
            game_cars.push(circling_car("Orange Car", 1, time, PI));
        }

        GameTickPacket {
            num_cars: game_cars.len(),
            game_cars,
            game_ball: BallInfo {
                physics: Physics {
                    location: Vector3::new(0.0, 0.0, 92.75),
                    ..Default::default()
                },
            },
            game_info: GameInfo {
                seconds_elapsed: time,
                is_round_active: true,
                is_kickoff_pause: time < KICKOFF_SECONDS,
                is_match_ended: false,
            },
        }
    }
}

impl Iterator for ScriptedMatch {
    type Item = GameTickPacket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.tick >= self.num_ticks {
            return None;
        }
        let packet = self.packet();
        self.tick += 1;
        Some(packet)
    }
}

fn circling_car(name: &str, team: u8, time: f32, phase: f32) -> PlayerInfo {
    let yaw_rate = CAR_SPEED / CIRCLE_RADIUS;
    let theta = phase + yaw_rate * time;
    let (sin, cos) = theta.sin_cos();
    PlayerInfo {
        physics: Physics {
            location: Vector3::new(CIRCLE_RADIUS * cos, CIRCLE_RADIUS * sin, 17.01),
            rotation: Rotator::new(0.0, theta + PI / 2.0, 0.0),
            velocity: Vector3::new(-CAR_SPEED * sin, CAR_SPEED * cos, 0.0),
            angular_velocity: Vector3::new(0.0, 0.0, yaw_rate),
        },
        name: name.to_owned(),
        team,
        boost: 33.0,
        has_wheel_contact: true,
    }
}
