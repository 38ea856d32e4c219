use std::fmt::{self, Display, Formatter};

/// What a replay does per input.
///
/// `Simple` advances once. `Rerecord` advances, restores the pre-input
/// snapshot, advances again and re-serializes - the access pattern of a
/// search driver redistributing snapshots between workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleType {
    Simple,
    Rerecord,
}

impl Display for CycleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            CycleType::Simple => write!(f, "simple"),
            CycleType::Rerecord => write!(f, "rerecord"),
        }
    }
}
