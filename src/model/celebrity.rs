use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of progressively revealed clues per celebrity.
pub const CLUE_COUNT: usize = 5;

/// Static catalog entry: a celebrity, their birthday key, and ordered clues.
///
/// `date` is normally a year-independent `"MM-DD"` key. The source data also
/// carries legacy duplicate entries with full `"YYYY-MM-DD"` dates; those are
/// kept verbatim and are reachable only through the seeded fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CelebrityRecord {
    pub name: String,
    pub date: String,
    pub clues: Vec<String>,
}

impl CelebrityRecord {
    /// The fully-dated form of this record, if its `date` carries a year.
    pub fn fixed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Formats a date as the year-independent `"MM-DD"` puzzle key.
pub fn month_day_key(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}
