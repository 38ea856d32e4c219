use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use fnv::FnvHashSet;
use log::debug;

use crate::config::CycleType;
use crate::data::Dir;
use crate::input;
use crate::room::Room;

#[derive(Debug)]
pub enum PlaybackError {
    BadInput(usize, char),
    Io(io::Error),
}

impl Display for PlaybackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            PlaybackError::BadInput(index, c) => {
                write!(f, "Undecodable input '{}' at position {}", c, index)
            }
            PlaybackError::Io(ref err) => write!(f, "I/O error during playback: {}", err),
        }
    }
}

impl Error for PlaybackError {}

impl From<io::Error> for PlaybackError {
    fn from(err: io::Error) -> Self {
        PlaybackError::Io(err)
    }
}

/// One recorded step: the input about to be applied plus the state snapshot
/// and hash from just before applying it.
#[derive(Debug)]
pub struct Step {
    pub input: char,
    pub state: Vec<u8>,
    pub hash: u128,
}

/// Replays a fixed move string against a room and keeps a snapshot and hash
/// per step, so a driver can seek to any point of the sequence later.
///
/// The final step (input `.`) records the terminal state.
#[derive(Debug)]
pub struct Playback {
    steps: Vec<Step>,
}

impl Playback {
    pub fn record(
        room: &mut Room,
        sequence: &str,
        cycle: CycleType,
    ) -> Result<Playback, PlaybackError> {
        let mut steps = Vec::with_capacity(sequence.len() + 1);
        let mut snapshot = Vec::with_capacity(room.state_size());

        for (index, c) in sequence.chars().enumerate() {
            let dir = input::decode(c).ok_or(PlaybackError::BadInput(index, c))?;

            snapshot.clear();
            room.serialize_state(&mut snapshot)?;
            steps.push(Step {
                input: c,
                state: snapshot.clone(),
                hash: room.state_hash(),
            });

            advance(room, dir, &snapshot, cycle)?;
        }

        snapshot.clear();
        room.serialize_state(&mut snapshot)?;
        steps.push(Step {
            input: '.',
            state: snapshot,
            hash: room.state_hash(),
        });

        debug!("recorded {} steps ({} cycle)", steps.len(), cycle);
        Ok(Playback { steps })
    }

    /// Number of recorded steps - sequence length plus the closing step.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn final_hash(&self) -> u128 {
        self.steps.last().unwrap().hash
    }

    /// Distinct state hashes seen across the whole recording.
    pub fn unique_states(&self) -> usize {
        let hashes: FnvHashSet<u128> = self.steps.iter().map(|s| s.hash).collect();
        hashes.len()
    }
}

fn advance(room: &mut Room, dir: Dir, snapshot: &[u8], cycle: CycleType) -> Result<(), PlaybackError> {
    match cycle {
        CycleType::Simple => {
            room.apply_move(dir);
        }
        CycleType::Rerecord => {
            room.apply_move(dir);
            let mut reader = snapshot;
            room.deserialize_state(&mut reader)?;
            room.apply_move(dir);
        }
    }
    Ok(())
}
