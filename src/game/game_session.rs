use std::rc::Rc;
use std::time::SystemTime;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::helpers::normalize_guess;
use crate::model::{CelebrityRecord, GameResult, TimerState};

pub const MAX_GUESSES: u32 = 5;

/// Result of feeding one guess or skip into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { score: u32, guesses_used: u32 },
    Incorrect { guesses_remaining: u32 },
    OutOfGuesses,
    /// The session was already complete; nothing changed.
    Ignored,
}

/// Finite-state engine for a single puzzle attempt:
/// `AwaitingGuess(clue 0..4)` until a correct guess (won) or the fifth
/// consumed guess/skip (lost). Terminal states ignore further input.
#[derive(Debug, Clone)]
pub struct GameSession {
    celebrity: Rc<CelebrityRecord>,
    date: NaiveDate,
    guesses_remaining: u32,
    active_clue_index: usize,
    /// Wrong guesses in order; `None` marks a skip.
    guesses: Vec<Option<String>>,
    complete: bool,
    won: bool,
    score: u32,
    timer_state: TimerState,
    playthrough_id: Uuid,
}

impl GameSession {
    pub fn new(celebrity: Rc<CelebrityRecord>, date: NaiveDate) -> Self {
        Self {
            celebrity,
            date,
            guesses_remaining: MAX_GUESSES,
            active_clue_index: 0,
            guesses: Vec::new(),
            complete: false,
            won: false,
            score: 0,
            timer_state: TimerState::default(),
            playthrough_id: Uuid::new_v4(),
        }
    }

    pub fn celebrity(&self) -> &Rc<CelebrityRecord> {
        &self.celebrity
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn guesses_remaining(&self) -> u32 {
        self.guesses_remaining
    }

    pub fn active_clue_index(&self) -> usize {
        self.active_clue_index
    }

    pub fn guesses(&self) -> &[Option<String>] {
        &self.guesses
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }

    /// A winning guess consumes the guess it was made with:
    /// `5 - remaining + 1` when won, all five when lost.
    pub fn guesses_used(&self) -> u32 {
        MAX_GUESSES - self.guesses_remaining + u32::from(self.won)
    }

    pub fn submit_guess(&mut self, guess: &str) -> GuessOutcome {
        if self.complete || self.guesses_remaining == 0 {
            return GuessOutcome::Ignored;
        }

        if normalize_guess(guess) == normalize_guess(&self.celebrity.name) {
            self.won = true;
            self.complete = true;
            self.timer_state = self.timer_state.ended(SystemTime::now());
            let guesses_used = self.guesses_used();
            self.score = score_for(guesses_used);
            GuessOutcome::Correct {
                score: self.score,
                guesses_used,
            }
        } else {
            self.consume_miss(Some(guess.to_string()))
        }
    }

    /// Identical to a wrong guess, but records no guess text.
    pub fn skip(&mut self) -> GuessOutcome {
        if self.complete || self.guesses_remaining == 0 {
            return GuessOutcome::Ignored;
        }
        self.consume_miss(None)
    }

    fn consume_miss(&mut self, guess: Option<String>) -> GuessOutcome {
        self.guesses_remaining -= 1;
        self.guesses.push(guess);

        if self.guesses_remaining == 0 {
            self.complete = true;
            self.score = 0;
            self.timer_state = self.timer_state.ended(SystemTime::now());
            GuessOutcome::OutOfGuesses
        } else {
            self.active_clue_index += 1;
            GuessOutcome::Incorrect {
                guesses_remaining: self.guesses_remaining,
            }
        }
    }

    /// The immutable record handed to the progress store on completion.
    pub fn to_result(&self) -> GameResult {
        GameResult {
            date: self.date,
            solved: self.won,
            guesses_used: self.guesses_used(),
            score: self.score,
            time_seconds: self.timer_state.elapsed_seconds(),
            completed: true,
            replay_success: false,
        }
    }
}

fn score_for(guesses_used: u32) -> u32 {
    (6i32 - guesses_used as i32).max(0) as u32 * 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let celebrity = Rc::new(CelebrityRecord {
            name: "Tom Hanks".to_string(),
            date: "07-09".to_string(),
            clues: vec![
                "clue one".to_string(),
                "clue two".to_string(),
                "clue three".to_string(),
                "clue four".to_string(),
                "clue five".to_string(),
            ],
        });
        GameSession::new(celebrity, NaiveDate::from_ymd_opt(2025, 7, 9).unwrap())
    }

    #[test]
    fn test_first_guess_win_scores_500() {
        let mut session = session();
        let outcome = session.submit_guess("Tom Hanks");
        assert_eq!(
            outcome,
            GuessOutcome::Correct {
                score: 500,
                guesses_used: 1
            }
        );
        assert!(session.is_complete());
        assert!(session.is_won());
    }

    #[test]
    fn test_guess_matching_is_case_and_whitespace_insensitive() {
        let mut session = session();
        let outcome = session.submit_guess("  tom hanks ");
        assert!(matches!(outcome, GuessOutcome::Correct { .. }));
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let mut session = session();
        let outcome = session.submit_guess("Tom Hank");
        assert_eq!(
            outcome,
            GuessOutcome::Incorrect {
                guesses_remaining: 4
            }
        );
        assert_eq!(session.active_clue_index(), 1);
    }

    #[test]
    fn test_score_decreases_with_guesses_used() {
        for (misses, expected_score) in [(0u32, 500u32), (1, 400), (2, 300), (3, 200), (4, 100)] {
            let mut session = session();
            for _ in 0..misses {
                session.submit_guess("wrong");
            }
            let outcome = session.submit_guess("tom hanks");
            assert_eq!(
                outcome,
                GuessOutcome::Correct {
                    score: expected_score,
                    guesses_used: misses + 1
                }
            );
        }
    }

    #[test]
    fn test_win_on_last_guess_still_consumes_it() {
        let mut session = session();
        for _ in 0..4 {
            session.submit_guess("wrong");
        }
        assert_eq!(session.guesses_remaining(), 1);
        let outcome = session.submit_guess("tom hanks");
        assert_eq!(
            outcome,
            GuessOutcome::Correct {
                score: 100,
                guesses_used: 5
            }
        );
    }

    #[test]
    fn test_five_misses_lose() {
        let mut session = session();
        for _ in 0..4 {
            assert!(matches!(
                session.submit_guess("wrong"),
                GuessOutcome::Incorrect { .. }
            ));
        }
        assert_eq!(session.submit_guess("wrong"), GuessOutcome::OutOfGuesses);
        assert!(session.is_complete());
        assert!(!session.is_won());
        assert_eq!(session.guesses_remaining(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.guesses_used(), 5);
    }

    #[test]
    fn test_skip_consumes_a_guess_without_text() {
        let mut session = session();
        let outcome = session.skip();
        assert_eq!(
            outcome,
            GuessOutcome::Incorrect {
                guesses_remaining: 4
            }
        );
        assert_eq!(session.guesses(), &[None]);
    }

    #[test]
    fn test_mixed_skips_and_guesses_lose() {
        let mut session = session();
        session.skip();
        session.submit_guess("wrong one");
        session.skip();
        session.submit_guess("wrong two");
        assert_eq!(session.skip(), GuessOutcome::OutOfGuesses);
        assert_eq!(
            session.guesses(),
            &[
                None,
                Some("wrong one".to_string()),
                None,
                Some("wrong two".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_completed_session_ignores_input() {
        let mut session = session();
        session.submit_guess("tom hanks");
        assert_eq!(session.submit_guess("tom hanks"), GuessOutcome::Ignored);
        assert_eq!(session.skip(), GuessOutcome::Ignored);
        // state untouched
        assert_eq!(session.guesses_used(), 1);
        assert_eq!(session.score(), 500);
    }

    #[test]
    fn test_each_session_gets_its_own_playthrough_id() {
        let a = session();
        let b = session();
        assert_ne!(a.playthrough_id(), b.playthrough_id());
    }

    #[test]
    fn test_to_result_reflects_outcome() {
        let mut session = session();
        session.submit_guess("wrong");
        session.submit_guess("tom hanks");
        let result = session.to_result();
        assert!(result.solved);
        assert!(result.completed);
        assert_eq!(result.guesses_used, 2);
        assert_eq!(result.score, 400);
        assert!(!result.replay_success);
        assert_eq!(result.date, session.date());
    }
}
