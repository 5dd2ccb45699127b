use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The persisted outcome of one calendar date's attempt. Written exactly once
/// on completion; the only later mutation is the one-shot replay path, which
/// swaps a failed record for a solved one with a fixed nominal score.
///
/// Field names match the original stored-JSON schema (`guessesUsed`, `time`,
/// `replaySuccess`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub date: NaiveDate,
    pub solved: bool,
    pub guesses_used: u32,
    pub score: u32,
    #[serde(rename = "time")]
    pub time_seconds: u64,
    pub completed: bool,
    #[serde(default)]
    pub replay_success: bool,
}
