#![warn(future_incompatible, rust_2018_compatibility, rust_2018_idioms, unused)]
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(clippy::all)]

pub use crate::{
    dodger::Dodger,
    game_object::{CarInfo, Field, GameObject, Locatable},
    spline::{Extrapolation, SplineError, SplinePath, SplinePathFinding, Waypoint, SPLINE_Z},
    utils::{circle_points, nth_closest_player},
    world::WorldState,
};

mod dodger;
mod game_object;
mod spline;
pub mod utils;
mod world;
