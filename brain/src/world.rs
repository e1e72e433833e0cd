use crate::game_object::GameObject;
use common::packet::GameTickPacket;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Everything the bot knows about the current tick. Create one per bot and
/// feed it every packet through [`WorldState::ingest`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldState {
    ball: GameObject,
    players: BTreeMap<usize, GameObject>,
    is_kickoff: bool,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the state up to date with a new packet.
    ///
    /// Cars are keyed by their index in the packet. A car whose index no longer
    /// appears (because the match shrank) is dropped; every other car is
    /// replaced wholesale.
    pub fn ingest(&mut self, packet: &GameTickPacket) {
        self.is_kickoff = packet.game_info.is_kickoff_pause;

        if packet.num_cars > packet.game_cars.len() {
            warn!(
                "packet claims {} cars but carries {}",
                packet.num_cars,
                packet.game_cars.len(),
            );
        }

        let num_cars = packet.cars().count();
        let before = self.players.len();
        self.players.retain(|&index, _| index < num_cars);
        if self.players.len() < before {
            debug!("dropped {} departed players", before - self.players.len());
        }

        for (index, info) in packet.cars() {
            self.players
                .insert(index, GameObject::from_player_info(index, info));
        }

        self.ball.update_physics(&packet.game_ball.physics);
    }

    pub fn ball(&self) -> &GameObject {
        &self.ball
    }

    /// All tracked cars, ordered by index.
    pub fn players(&self) -> impl Iterator<Item = &GameObject> {
        self.players.values()
    }

    pub fn player(&self, index: usize) -> Option<&GameObject> {
        self.players.get(&index)
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn is_kickoff(&self) -> bool {
        self.is_kickoff
    }
}

#[cfg(test)]
mod tests {
    use crate::world::WorldState;
    use common::packet::{BallInfo, GameInfo, GameTickPacket, Physics, PlayerInfo, Rotator};
    use nalgebra::Vector3;

    fn car(name: &str, team: u8, x: f32) -> PlayerInfo {
        PlayerInfo {
            physics: Physics {
                location: Vector3::new(x, -2000.0, 17.01),
                rotation: Rotator::new(0.0, 1.0, 0.0),
                velocity: Vector3::new(0.0, 500.0, 0.0),
                angular_velocity: Vector3::new(0.0, 0.0, 0.5),
            },
            name: name.to_owned(),
            team,
            boost: 34.0,
            has_wheel_contact: true,
        }
    }

    fn packet(cars: Vec<PlayerInfo>) -> GameTickPacket {
        GameTickPacket {
            num_cars: cars.len(),
            game_cars: cars,
            game_ball: BallInfo {
                physics: Physics {
                    location: Vector3::new(0.0, 0.0, 92.75),
                    angular_velocity: Vector3::new(0.1, 0.2, 0.3),
                    ..Default::default()
                },
            },
            game_info: GameInfo {
                is_kickoff_pause: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn ingest_populates_everything() {
        let mut world = WorldState::new();
        world.ingest(&packet(vec![car("Blue Car", 0, -256.0), car("Orange Car", 1, 256.0)]));

        assert!(world.is_kickoff());
        assert_eq!(world.num_players(), 2);
        let blue = world.player(0).unwrap();
        assert_eq!(blue.index(), Some(0));
        assert_eq!(blue.team(), Some(-1));
        assert_eq!(blue.car().unwrap().name, "Blue Car");
        assert_eq!(world.player(1).unwrap().team(), Some(1));
        assert_eq!(world.ball().location(), Vector3::new(0.0, 0.0, 92.75));
        assert_eq!(world.ball().index(), None);
        // Flat rotation, so the local angular velocity matches the world one.
        assert!((world.ball().local_angular_velocity() - Vector3::new(0.1, 0.2, 0.3)).norm() < 1e-6);
    }

    #[test]
    fn ingest_is_idempotent() {
        let p = packet(vec![car("Blue Car", 0, -256.0), car("Orange Car", 1, 256.0)]);
        let mut world = WorldState::new();
        world.ingest(&p);
        let first = world.clone();
        world.ingest(&p);
        assert_eq!(world, first);
        assert_eq!(world.players().count(), 2);
    }

    #[test]
    fn ingest_replaces_in_place() {
        let mut world = WorldState::new();
        world.ingest(&packet(vec![car("Blue Car", 0, -256.0), car("Orange Car", 1, 256.0)]));
        world.ingest(&packet(vec![car("Blue Car", 0, -100.0), car("Orange Car", 1, 256.0)]));
        assert_eq!(world.num_players(), 2);
        assert_eq!(world.player(0).unwrap().location().x, -100.0);
    }

    #[test]
    fn ingest_handles_departures() {
        let mut world = WorldState::new();
        world.ingest(&packet(vec![car("Blue Car", 0, -256.0), car("Orange Car", 1, 256.0)]));
        world.ingest(&packet(vec![car("Blue Car", 0, -256.0)]));
        assert_eq!(world.num_players(), 1);
        assert!(world.player(1).is_none());
    }

    #[test]
    fn ingest_handles_arrivals() {
        let mut world = WorldState::new();
        world.ingest(&packet(vec![car("Blue Car", 0, -256.0)]));
        world.ingest(&packet(vec![car("Blue Car", 0, -256.0), car("Orange Car", 1, 256.0)]));
        let names: Vec<_> = world
            .players()
            .map(|p| p.car().unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Blue Car", "Orange Car"]);
    }

    #[test]
    fn ingest_ignores_cars_past_num_cars() {
        let mut p = packet(vec![car("Blue Car", 0, -256.0), car("Orange Car", 1, 256.0)]);
        p.num_cars = 1;
        let mut world = WorldState::new();
        world.ingest(&p);
        assert_eq!(world.num_players(), 1);
    }
}
