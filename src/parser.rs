use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos, MAX_SIZE};
use crate::room::Room;
use crate::state::StateVector;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    RoomTooLarge,
    BoxGoalMismatch(usize, usize),
    InvalidCell(usize, usize),
    NoPusher,
    MultiplePushers,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::RoomTooLarge => write!(f, "Room larger than 255 rows/columns"),
            ParseError::BoxGoalMismatch(boxes, goals) => {
                write!(f, "{} boxes but {} goals", boxes, goals)
            }
            ParseError::InvalidCell(r, c) => write!(f, "Invalid character at [{}, {}]", r, c),
            ParseError::NoPusher => write!(f, "No pusher"),
            ParseError::MultiplePushers => write!(f, "More than one pusher"),
        }
    }
}

impl Error for ParseError {}

impl FromStr for Room {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Room::from_text(s)
    }
}

pub(crate) struct Parsed {
    pub(crate) background: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
    pub(crate) state: StateVector,
}

/// Parses (a subset of) the XSB format described
/// [here](http://www.sokobano.de/wiki/index.php?title=Level_format).
///
/// Pusher and box markers are stripped down to the floor/goal cell under them;
/// their coordinates go into the initial state vector in row-major scan order.
pub(crate) fn parse(text: &str) -> Result<Parsed, ParseError> {
    // trim so we can specify rooms using raw strings more easily
    let text = text.trim_matches('\n');

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut pusher = None;

    for (r, line) in text.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParseError::RoomTooLarge);
        }
        let mut row = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParseError::RoomTooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);

            let cell = match cur_char {
                '#' => MapCell::Wall,
                ' ' | '-' | '_' => MapCell::Floor,
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                '$' | 'b' => {
                    boxes.push(pos);
                    MapCell::Floor
                }
                '*' | 'B' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '@' | 'p' => {
                    if pusher.is_some() {
                        return Err(ParseError::MultiplePushers);
                    }
                    pusher = Some(pos);
                    MapCell::Floor
                }
                '+' | 'P' => {
                    if pusher.is_some() {
                        return Err(ParseError::MultiplePushers);
                    }
                    pusher = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                _ => return Err(ParseError::InvalidCell(r, c)),
            };
            row.push(cell);
        }
        grid.push(row);
    }

    let pusher = pusher.ok_or(ParseError::NoPusher)?;
    if boxes.len() != goals.len() {
        return Err(ParseError::BoxGoalMismatch(boxes.len(), goals.len()));
    }

    Ok(Parsed {
        background: Vec2d::from_rows(&grid),
        goals,
        state: StateVector::new(pusher, boxes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_eq!("".parse::<Room>().unwrap_err(), ParseError::NoPusher);
    }

    #[test]
    fn fail_invalid_cell() {
        let text = r"
#####
#@X.#
#####
";
        assert_eq!(
            text.parse::<Room>().unwrap_err(),
            ParseError::InvalidCell(1, 2)
        );
    }

    #[test]
    fn fail_box_goal_mismatch() {
        let text = r"
#####
#@$ #
#####
";
        assert_eq!(
            text.parse::<Room>().unwrap_err(),
            ParseError::BoxGoalMismatch(1, 0)
        );
    }

    #[test]
    fn fail_multiple_pushers() {
        let text = r"
#####
#@@ #
#####
";
        assert_eq!(
            text.parse::<Room>().unwrap_err(),
            ParseError::MultiplePushers
        );
    }

    #[test]
    fn fail_too_wide() {
        let wide = "#".repeat(256);
        let text = format!("{}\n#@#\n", wide);
        assert_eq!(text.parse::<Room>().unwrap_err(), ParseError::RoomTooLarge);
    }

    #[test]
    fn fail_too_tall() {
        let mut text = String::from("#@#\n");
        for _ in 0..256 {
            text.push_str("# #\n");
        }
        assert_eq!(text.parse::<Room>().unwrap_err(), ParseError::RoomTooLarge);
    }

    #[test]
    fn on_goal_markers_count_once() {
        // box-on-goal and pusher-on-goal each contribute a goal
        let text = r"
#####
#+*$#
#.  #
#####
";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.goals.len(), 3);
        assert_eq!(parsed.state.boxes.len(), 2);
        assert_eq!(parsed.state.pusher, Pos::new(1, 1));
        assert_eq!(parsed.background[Pos::new(1, 1)], MapCell::Goal);
        assert_eq!(parsed.background[Pos::new(1, 2)], MapCell::Goal);
        assert_eq!(parsed.background[Pos::new(1, 3)], MapCell::Floor);
    }

    #[test]
    fn aliases() {
        let xsb = r"
#####
#@$.#
#####
";
        let aliased = r"
#####
#pb.#
#####
";
        let a: Room = xsb.parse().unwrap();
        let b: Room = aliased.parse().unwrap();
        assert_eq!(a.state_hash(), b.state_hash());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn boxes_in_row_major_scan_order() {
        let text = r"
######
#@$ .#
#$  .#
######
";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.state.boxes, vec![Pos::new(1, 2), Pos::new(2, 1)]);
    }

    #[test]
    fn short_rows_padded_with_floor() {
        let text = "####\n#@$.#\n####";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.background.cols(), 5);
        assert_eq!(parsed.background[Pos::new(0, 4)], MapCell::Floor);
        assert_eq!(parsed.background[Pos::new(2, 4)], MapCell::Floor);
    }
}
