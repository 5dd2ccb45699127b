use chrono::NaiveDate;

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsChange {
    pub sound_effects_enabled: Option<bool>,
    pub background_music_enabled: Option<bool>,
}

/// Commands the presentation layer sends to the engine.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Select the current real-world date for play.
    LoadToday,
    /// Select a specific date (calendar click); future dates are ignored.
    LoadDate(NaiveDate),
    /// Re-emit the events describing the current state (fresh UI attach).
    InitDisplay,
    SubmitGuess(String),
    Skip,
    /// One-attempt retry for a previously failed past date.
    ReplayGuess(String),
    /// Reveal the answer for a failed past date.
    ShowAnswer,
    ShowCalendar,
    CalendarPrev,
    CalendarNext,
    ShowStats,
    ChangeSettings(SettingsChange),
}
