pub mod calendar;
pub mod catalog;
pub mod date_seed;
pub mod game_engine;
pub mod game_session;
pub mod progress_store;
pub mod puzzle_selector;
pub mod settings;
pub mod stats;

pub use game_engine::GameEngine;
pub use puzzle_selector::PuzzleSelector;
