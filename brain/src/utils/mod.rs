pub use crate::utils::geometry::circle_points;

use crate::game_object::{GameObject, Locatable};
use itertools::Itertools;
use ordered_float::NotNan;

pub mod geometry;

/// Returns the `n`th closest player to `target` (0 is the closest), measured
/// in 2D, optionally restricted to one team sign.
///
/// Returns `None` if there are not enough matching players.
pub fn nth_closest_player<'a>(
    players: impl IntoIterator<Item = &'a GameObject>,
    n: usize,
    target: &impl Locatable,
    team: Option<i32>,
) -> Option<&'a GameObject> {
    players
        .into_iter()
        .filter(|p| team.is_none() || p.team() == team)
        .filter_map(|p| {
            let dist = NotNan::new(p.distance_to_target_2d(target)).ok()?;
            Some((dist, p))
        })
        .sorted_by_key(|&(dist, _)| dist)
        .nth(n)
        .map(|(_, p)| p)
}
