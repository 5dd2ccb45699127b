mod celebrity;
mod day_status;
mod engine_command;
mod engine_event;
mod game_result;
mod statistics;
mod timer_state;

pub use celebrity::{month_day_key, CelebrityRecord, CLUE_COUNT};
pub use day_status::DayStatus;
pub use engine_command::{EngineCommand, SettingsChange};
pub use engine_event::EngineEvent;
pub use game_result::GameResult;
pub use statistics::Statistics;
pub use timer_state::TimerState;
