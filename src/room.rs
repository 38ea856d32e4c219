use std::fmt::{self, Debug, Display, Formatter};
use std::io::{self, Read, Write};

use log::debug;

use crate::data::{Dir, MapCell, Pos, Tile};
use crate::deadlock;
use crate::heuristic::{self, HeuristicError};
use crate::parser::{self, ParseError};
use crate::state::StateVector;
use crate::vec2d::Vec2d;

/// Outcome of a single [`Room::apply_move`].
///
/// `deadlock` is only meaningful on the result of the move that caused it -
/// the room keeps no ambient deadlock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub accepted: bool,
    pub pushed_box: bool,
    pub deadlock: bool,
}

const REJECTED: MoveResult = MoveResult {
    accepted: false,
    pushed_box: false,
    deadlock: false,
};

/// One Sokoban room: the immutable background, the packed state vector and
/// the tile grid projected from the two.
///
/// All three are allocated at [`Room::from_text`] and never resized;
/// applying a move only patches the tile grid in place.
pub struct Room {
    pub(crate) background: Vec2d<MapCell>,
    pub(crate) tiles: Vec2d<Tile>,
    pub(crate) state: StateVector,
    pub(crate) goals: Vec<Pos>,
    last_push: bool,
}

impl Room {
    pub fn from_text(text: &str) -> Result<Room, ParseError> {
        let parsed = parser::parse(text)?;
        let mut tiles = parsed.background.scratchpad(Tile::Floor);
        project(&parsed.background, &parsed.state, &mut tiles);
        debug!(
            "parsed {}x{} room with {} boxes",
            parsed.background.cols(),
            parsed.background.rows(),
            parsed.state.boxes.len(),
        );
        Ok(Room {
            background: parsed.background,
            tiles,
            state: parsed.state,
            goals: parsed.goals,
            last_push: false,
        })
    }

    /// Validates and applies one directional step, pushing a box if one is in
    /// the way. A rejected move leaves the room untouched.
    ///
    /// When a push lands a box off-goal, the deadlock detector runs around
    /// the pushed box; the move stays applied either way - the flag is
    /// advisory for the caller's search policy, not a rollback.
    pub fn apply_move(&mut self, dir: Dir) -> MoveResult {
        let dest = match self.state.pusher.step(dir) {
            Some(pos) => pos,
            None => return REJECTED,
        };

        let mut pushed_to = None;
        match self.tile(dest) {
            Tile::Wall => return REJECTED,
            Tile::Box | Tile::BoxOnGoal => {
                let beyond = match dest.step(dir) {
                    Some(pos) => pos,
                    None => return REJECTED,
                };
                match self.tile(beyond) {
                    Tile::Floor | Tile::Goal => {
                        let index = self
                            .state
                            .box_at(dest)
                            .expect("tile grid out of sync with state vector");
                        self.clear(dest);
                        self.put_box(beyond);
                        self.state.boxes[index] = beyond;
                        pushed_to = Some(beyond);
                    }
                    _ => return REJECTED,
                }
            }
            Tile::Floor | Tile::Goal => {}
            Tile::Pusher | Tile::PusherOnGoal => unreachable!("pusher next to itself"),
        }

        self.clear(self.state.pusher);
        self.put_pusher(dest);
        self.state.pusher = dest;
        self.last_push = pushed_to.is_some();

        let deadlock = match pushed_to {
            Some(pos) if self.tiles[pos] != Tile::BoxOnGoal => {
                deadlock::is_dead_after_push(&self.tiles, pos)
            }
            _ => false,
        };

        MoveResult {
            accepted: true,
            pushed_box: pushed_to.is_some(),
            deadlock,
        }
    }

    /// Whether [`Room::apply_move`] in `dir` would be accepted, without mutating.
    pub fn can_move(&self, dir: Dir) -> bool {
        let dest = match self.state.pusher.step(dir) {
            Some(pos) => pos,
            None => return false,
        };
        match self.tile(dest) {
            Tile::Wall => false,
            Tile::Box | Tile::BoxOnGoal => match dest.step(dir) {
                Some(beyond) => matches!(self.tile(beyond), Tile::Floor | Tile::Goal),
                None => false,
            },
            _ => true,
        }
    }

    pub fn can_move_up(&self) -> bool {
        self.can_move(Dir::Up)
    }

    pub fn can_move_down(&self) -> bool {
        self.can_move(Dir::Down)
    }

    pub fn can_move_left(&self) -> bool {
        self.can_move(Dir::Left)
    }

    pub fn can_move_right(&self) -> bool {
        self.can_move(Dir::Right)
    }

    pub fn boxes_on_goal(&self) -> usize {
        self.state
            .boxes
            .iter()
            .filter(|&&b| self.tiles[b] == Tile::BoxOnGoal)
            .count()
    }

    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }

    pub fn box_count(&self) -> usize {
        self.state.boxes.len()
    }

    pub fn last_move_pushed_box(&self) -> bool {
        self.last_push
    }

    pub fn state_size(&self) -> usize {
        self.state.size()
    }

    /// 128-bit digest over exactly the state vector bytes - grids excluded.
    pub fn state_hash(&self) -> u128 {
        self.state.hash()
    }

    pub fn goal_distance(&self) -> Result<u32, HeuristicError> {
        heuristic::goal_distance(&self.tiles, &self.state.boxes)
    }

    /// Appends exactly [`Room::state_size`] bytes of raw state vector.
    pub fn serialize_state(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.state.write_to(writer)
    }

    /// Consumes exactly [`Room::state_size`] bytes, installs them as the
    /// state vector and reprojects the tile grid - the only path that
    /// re-establishes grid consistency after an external load.
    pub fn deserialize_state(&mut self, reader: &mut dyn Read) -> io::Result<()> {
        self.state.read_from(reader)?;
        project(&self.background, &self.state, &mut self.tiles);
        self.last_push = false;
        Ok(())
    }

    fn tile(&self, pos: Pos) -> Tile {
        // cells beyond the grid count as walls
        self.tiles.get(pos).copied().unwrap_or(Tile::Wall)
    }

    fn clear(&mut self, pos: Pos) {
        self.tiles[pos] = match self.background[pos] {
            MapCell::Goal => Tile::Goal,
            _ => Tile::Floor,
        };
    }

    fn put_box(&mut self, pos: Pos) {
        self.tiles[pos] = if self.background[pos] == MapCell::Goal {
            Tile::BoxOnGoal
        } else {
            Tile::Box
        };
    }

    fn put_pusher(&mut self, pos: Pos) {
        self.tiles[pos] = if self.background[pos] == MapCell::Goal {
            Tile::PusherOnGoal
        } else {
            Tile::Pusher
        };
    }
}

/// Recomputes the projected tile grid from the background and state vector.
///
/// This and the incremental patches in [`Room::apply_move`] are the only
/// mutation entry points for the tile grid.
pub(crate) fn project(background: &Vec2d<MapCell>, state: &StateVector, tiles: &mut Vec2d<Tile>) {
    for r in 0..background.rows() {
        for c in 0..background.cols() {
            let pos = Pos::new(r, c);
            tiles[pos] = match background[pos] {
                MapCell::Wall => Tile::Wall,
                MapCell::Floor => Tile::Floor,
                MapCell::Goal => Tile::Goal,
            };
        }
    }
    for &b in &state.boxes {
        debug_assert!(tiles[b] != Tile::Wall);
        tiles[b] = if tiles[b] == Tile::Goal {
            Tile::BoxOnGoal
        } else {
            Tile::Box
        };
    }
    let p = state.pusher;
    debug_assert!(matches!(tiles[p], Tile::Floor | Tile::Goal));
    tiles[p] = if tiles[p] == Tile::Goal {
        Tile::PusherOnGoal
    } else {
        Tile::Pusher
    };
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.tiles.rows() {
            for c in 0..self.tiles.cols() {
                write!(f, "{}", self.tiles[Pos::new(r, c)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
