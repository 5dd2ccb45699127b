use chrono::NaiveDate;

use crate::game::calendar::CalendarMonth;
use crate::game::settings::Settings;
use crate::game::stats::StatsSummary;
use crate::model::GameResult;

/// Notifications the engine emits for the presentation layer. The engine
/// never waits on a listener; persisted state is already committed by the
/// time a completion event goes out.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    PuzzleLoaded {
        date: NaiveDate,
        guesses_remaining: u32,
    },
    ClueRevealed {
        index: usize,
        text: String,
    },
    /// A wrong guess (`Some`) or a skip (`None`) was consumed.
    GuessRejected {
        guess: Option<String>,
        guesses_remaining: u32,
    },
    GameWon {
        score: u32,
        guesses_used: u32,
    },
    GameLost,
    PuzzleAlreadyComplete(GameResult),
    /// The displayed date was failed in the past and may be replayed once.
    ReplayOffered,
    ReplaySucceeded {
        name: String,
    },
    ReplayRejected {
        guess: String,
    },
    AnswerRevealed {
        name: String,
    },
    CalendarUpdated(CalendarMonth),
    StatsUpdated(StatsSummary),
    SettingsChanged(Settings),
}
