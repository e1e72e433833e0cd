#![warn(future_incompatible, rust_2018_compatibility, rust_2018_idioms, unused)]
#![cfg_attr(feature = "strict", deny(warnings))]

use brain::{circle_points, Dodger, SplinePathFinding, WorldState};
use common::prelude::*;
use log::{debug, info};
use std::{
    error::Error,
    time::{Duration, Instant},
};

mod logging;
mod scripted;

mod built {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

const MATCH_SECONDS: f32 = 4.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .format(logging::format)
        .init();
    info!("play, built {} ({})", built::BUILD_DATE, built::PROFILE);

    let waypoints = circle_points(8, 1500.0);
    let thresholds: Vec<_> = (0..waypoints.len()).map(|i| 200.0 + 50.0 * i as f32).collect();
    let path = SplinePathFinding::new().calculate(32, &waypoints, &thresholds)?;
    info!(
        "path from {} to {}",
        path.locations[0].pretty(),
        path.locations[path.locations.len() - 1].pretty(),
    );

    let start = Instant::now();
    let mut world = WorldState::new();
    let mut dodger = Dodger::starting_at(1.0, start);

    for packet in scripted::ScriptedMatch::new(MATCH_SECONDS) {
        let time = packet.game_info.seconds_elapsed;
        logging::set_game_time(time);
        world.ingest(&packet);

        let me = match world.player(0) {
            Some(me) => me,
            None => continue,
        };
        let (jump, pitch) = dodger.attempt_dodging_at(start + Duration::from_secs_f32(time));
        debug!(
            "me {} {} ball {} angle {:.2} players {} kickoff {} dodge ({}, {})",
            me.location().pretty(),
            me.matrix().pretty(),
            me.to_local(&world.ball().location()).pretty(),
            me.angle_to_target(world.ball(), true),
            world.num_players(),
            world.is_kickoff(),
            jump,
            pitch,
        );
    }

    info!("finished with {} players", world.num_players());
    Ok(())
}
