use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::data::{Pos, Tile};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicError {
    NoGoalAvailable,
}

impl Display for HeuristicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicError::NoGoalAvailable => {
                write!(f, "No unclaimed goal left for a box - state is corrupted")
            }
        }
    }
}

impl Error for HeuristicError {}

/// Greedy sum of Manhattan distances from each off-goal box to its nearest
/// unclaimed goal.
///
/// Boxes are assigned in canonical index order; ties between equally near
/// goals go to the first one in row-major scan order. Occupied goals show up
/// as box-on-goal / pusher-on-goal in the tile grid, so only free goals are
/// ever claimed. Greedy, not globally optimal - a ranking heuristic, not an
/// exact cost.
pub(crate) fn goal_distance(tiles: &Vec2d<Tile>, boxes: &[Pos]) -> Result<u32, HeuristicError> {
    let mut scratch = tiles.clone();
    let mut total = 0u32;

    for &box_pos in boxes {
        if scratch[box_pos] == Tile::BoxOnGoal {
            continue;
        }

        let mut nearest: Option<(u16, Pos)> = None;
        for r in 0..scratch.rows() {
            for c in 0..scratch.cols() {
                let goal = Pos::new(r, c);
                if scratch[goal] != Tile::Goal {
                    continue;
                }
                let dist = box_pos.dist(goal);
                // strict comparison keeps the first goal in scan order on ties
                if nearest.map_or(true, |(best, _)| dist < best) {
                    nearest = Some((dist, goal));
                }
            }
        }

        let (dist, goal) = nearest.ok_or(HeuristicError::NoGoalAvailable)?;
        scratch[goal] = Tile::Floor; // claimed for the rest of this evaluation
        total += u32::from(dist);
    }

    Ok(total)
}
