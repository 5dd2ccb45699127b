use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted cumulative statistics. `total_solved` is a derived cache of the
/// games map and is recomputed on every commit; the streak fields follow the
/// today-only recurrence in `ProgressStore::commit`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_solved: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub total_time: u64,
    pub total_score: u32,
    pub last_played: Option<NaiveDate>,
}
