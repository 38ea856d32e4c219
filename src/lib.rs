// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod config;
pub mod data;
pub mod input;
pub mod playback;
pub mod room;

mod deadlock;
mod fs;
mod heuristic;
mod parser;
mod state;
mod vec2d;

use std::error::Error;
use std::io::{self, Read, Write};

use crate::data::Dir;
use crate::room::{MoveResult, Room};

pub use crate::heuristic::HeuristicError;
pub use crate::parser::ParseError;

pub trait LoadRoom {
    fn load_room(&self) -> Result<Room, Box<dyn Error>>;
}

/// The surface a state-space search driver uses, with [`Room`] as one
/// concrete core behind it.
///
/// A driver holds one core per worker, snapshots with `serialize_state`,
/// forks by deserializing into another instance and deduplicates visited
/// states by `state_hash`.
pub trait EmulatorCore {
    fn advance(&mut self, dir: Dir) -> MoveResult;
    fn can_move(&self, dir: Dir) -> bool;
    fn state_size(&self) -> usize;
    fn state_hash(&self) -> u128;
    fn serialize_state(&self, writer: &mut dyn Write) -> io::Result<()>;
    fn deserialize_state(&mut self, reader: &mut dyn Read) -> io::Result<()>;
    fn boxes_on_goal(&self) -> usize;
    fn goal_count(&self) -> usize;
    fn box_count(&self) -> usize;
    fn goal_distance(&self) -> Result<u32, HeuristicError>;
    fn core_name(&self) -> &'static str;
}

impl EmulatorCore for Room {
    fn advance(&mut self, dir: Dir) -> MoveResult {
        self.apply_move(dir)
    }

    fn can_move(&self, dir: Dir) -> bool {
        Room::can_move(self, dir)
    }

    fn state_size(&self) -> usize {
        Room::state_size(self)
    }

    fn state_hash(&self) -> u128 {
        Room::state_hash(self)
    }

    fn serialize_state(&self, writer: &mut dyn Write) -> io::Result<()> {
        Room::serialize_state(self, writer)
    }

    fn deserialize_state(&mut self, reader: &mut dyn Read) -> io::Result<()> {
        Room::deserialize_state(self, reader)
    }

    fn boxes_on_goal(&self) -> usize {
        Room::boxes_on_goal(self)
    }

    fn goal_count(&self) -> usize {
        Room::goal_count(self)
    }

    fn box_count(&self) -> usize {
        Room::box_count(self)
    }

    fn goal_distance(&self) -> Result<u32, HeuristicError> {
        Room::goal_distance(self)
    }

    fn core_name(&self) -> &'static str {
        "sokoban"
    }
}
