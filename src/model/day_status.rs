use serde::{Deserialize, Serialize};

/// Calendar classification for one day of a browsed month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DayStatus {
    /// Future date; not selectable for play.
    Locked,
    /// A recorded result exists and was solved.
    Solved,
    /// A recorded result exists and was failed.
    Failed,
    /// The current real-world date, not yet played.
    Today,
    /// Past date with no recorded result; playable retroactively.
    Playable,
}

impl DayStatus {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, DayStatus::Locked)
    }
}
