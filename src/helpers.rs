use std::path::PathBuf;

use chrono::NaiveDateTime;

/// Guess comparison is case- and whitespace-insensitive only.
pub fn normalize_guess(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Resolves the directory for settings and user data. Honors
/// `CELEBDAY_DATA_DIR`, then the XDG data dir, then a dotted fallback.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CELEBDAY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(dir).join("celebday");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/share/celebday");
    }
    PathBuf::from(".celebday")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Time remaining until local midnight, when the next puzzle unlocks.
/// Informational only; nothing in the core gates on it.
pub fn time_until_next_puzzle(now: NaiveDateTime) -> Countdown {
    let next_midnight = now
        .date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(now);
    let diff = next_midnight - now;
    Countdown {
        hours: diff.num_hours(),
        minutes: diff.num_minutes() % 60,
        seconds: diff.num_seconds() % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_guess_case_and_whitespace() {
        assert_eq!(normalize_guess("  Tom Hanks  "), "tom hanks");
        assert_eq!(normalize_guess("TOM HANKS"), "tom hanks");
        // interior whitespace is significant
        assert_ne!(normalize_guess("tomhanks"), normalize_guess("tom hanks"));
    }

    #[test]
    fn test_countdown_to_midnight() {
        let now = NaiveDate::from_ymd_opt(2025, 7, 9)
            .unwrap()
            .and_hms_opt(23, 59, 30)
            .unwrap();
        let countdown = time_until_next_puzzle(now);
        assert_eq!(
            countdown,
            Countdown {
                hours: 0,
                minutes: 0,
                seconds: 30
            }
        );
    }

    #[test]
    fn test_countdown_full_day_boundary() {
        let now = NaiveDate::from_ymd_opt(2025, 7, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let countdown = time_until_next_puzzle(now);
        assert_eq!(countdown.hours, 24);
        assert_eq!(countdown.minutes, 0);
        assert_eq!(countdown.seconds, 0);
    }
}
