use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use log::trace;

use super::calendar::CalendarNavigator;
use super::game_session::{GameSession, GuessOutcome, MAX_GUESSES};
use super::progress_store::ProgressStore;
use super::puzzle_selector::PuzzleSelector;
use super::settings::Settings;
use super::stats;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{EngineCommand, EngineEvent, SettingsChange};
use std::path::PathBuf;

pub type Clock = Rc<dyn Fn() -> NaiveDate>;

/// Central coordinator: routes commands from the presentation layer into the
/// active `GameSession`, the `ProgressStore` and the `CalendarNavigator`, and
/// broadcasts the resulting events. Completed games are committed to the
/// store before any completion event is emitted.
pub struct GameEngine {
    selector: PuzzleSelector,
    store: ProgressStore,
    settings: Settings,
    data_dir: PathBuf,
    calendar: CalendarNavigator,
    session: Option<GameSession>,
    current_date: Option<NaiveDate>,
    subscription_id: Option<Unsubscriber<EngineCommand>>,
    event_emitter: EventEmitter<EngineEvent>,
    clock: Clock,
}

impl Destroyable for GameEngine {
    fn destroy(&mut self) {
        if let Some(subscription_id) = self.subscription_id.take() {
            subscription_id.unsubscribe();
        }
    }
}

impl GameEngine {
    pub fn new(
        command_observer: EventObserver<EngineCommand>,
        event_emitter: EventEmitter<EngineEvent>,
        selector: PuzzleSelector,
        data_dir: PathBuf,
    ) -> Rc<RefCell<Self>> {
        Self::with_clock(
            command_observer,
            event_emitter,
            selector,
            data_dir,
            Rc::new(|| Local::now().date_naive()),
        )
    }

    pub fn with_clock(
        command_observer: EventObserver<EngineCommand>,
        event_emitter: EventEmitter<EngineEvent>,
        selector: PuzzleSelector,
        data_dir: PathBuf,
        clock: Clock,
    ) -> Rc<RefCell<Self>> {
        let store = ProgressStore::new(&data_dir);
        let settings = Settings::load(&data_dir);
        let calendar = CalendarNavigator::new(selector.catalog(), clock());
        let engine = Self {
            selector,
            store,
            settings,
            data_dir,
            calendar,
            session: None,
            current_date: None,
            subscription_id: None,
            event_emitter,
            clock,
        };
        let refcell = Rc::new(RefCell::new(engine));
        GameEngine::wire_subscription(refcell.clone(), command_observer);
        refcell
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        command_observer: EventObserver<EngineCommand>,
    ) {
        let engine_handler = engine.clone();
        let subscription_id = command_observer.subscribe(move |command| {
            let mut engine = engine_handler.borrow_mut();
            engine.handle_command(command.clone());
        });
        engine.borrow_mut().subscription_id = Some(subscription_id);
    }

    pub fn handle_command(&mut self, command: EngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            EngineCommand::LoadToday => self.load_date(self.today()),
            EngineCommand::LoadDate(date) => self.load_date(date),
            EngineCommand::InitDisplay => self.sync_display(),
            EngineCommand::SubmitGuess(guess) => self.handle_guess(&guess),
            EngineCommand::Skip => self.handle_skip(),
            EngineCommand::ReplayGuess(guess) => self.handle_replay_guess(&guess),
            EngineCommand::ShowAnswer => self.handle_show_answer(),
            EngineCommand::ShowCalendar => self.sync_calendar(),
            EngineCommand::CalendarPrev => {
                let today = self.today();
                self.calendar.prev(today);
                self.sync_calendar();
            }
            EngineCommand::CalendarNext => {
                let today = self.today();
                self.calendar.next(today);
                self.sync_calendar();
            }
            EngineCommand::ShowStats => self.sync_stats(),
            EngineCommand::ChangeSettings(change) => self.change_settings(change),
        }
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    fn load_date(&mut self, date: NaiveDate) {
        if date > self.today() {
            trace!(target: "game_engine", "Ignoring future date {}", date);
            return;
        }
        self.current_date = Some(date);

        if let Some(result) = self.store.get_result(date).cloned() {
            self.session = None;
            self.reveal_all_clues(date);
            self.event_emitter
                .emit(&EngineEvent::PuzzleAlreadyComplete(result.clone()));
            if !result.solved && date != self.today() {
                self.event_emitter.emit(&EngineEvent::ReplayOffered);
            }
            return;
        }

        let celebrity = self.selector.select_for_date(date);
        let session = GameSession::new(celebrity, date);
        self.event_emitter.emit(&EngineEvent::PuzzleLoaded {
            date,
            guesses_remaining: session.guesses_remaining(),
        });
        self.emit_clue(&session, 0);
        self.session = Some(session);
    }

    fn handle_guess(&mut self, guess: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.submit_guess(guess) {
            GuessOutcome::Correct { .. } => self.finish_session(None),
            GuessOutcome::Incorrect { guesses_remaining } => {
                self.event_emitter.emit(&EngineEvent::GuessRejected {
                    guess: Some(guess.to_string()),
                    guesses_remaining,
                });
                self.emit_active_clue();
            }
            GuessOutcome::OutOfGuesses => self.finish_session(Some(Some(guess.to_string()))),
            GuessOutcome::Ignored => (),
        }
    }

    fn handle_skip(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.skip() {
            GuessOutcome::Incorrect { guesses_remaining } => {
                self.event_emitter.emit(&EngineEvent::GuessRejected {
                    guess: None,
                    guesses_remaining,
                });
                self.emit_active_clue();
            }
            GuessOutcome::OutOfGuesses => self.finish_session(Some(None)),
            _ => (),
        }
    }

    /// Commits the finished session, then announces the outcome.
    /// `last_guess` carries the fifth consumed miss so listeners see the
    /// rejection before the loss.
    fn finish_session(&mut self, last_guess: Option<Option<String>>) {
        let Some(session) = self.session.take() else {
            return;
        };
        let date = session.date();
        let result = session.to_result();
        let today = self.today();
        trace!(
            target: "game_engine",
            "Committing playthrough {} for {}: {:?}",
            session.playthrough_id(),
            date,
            result
        );
        self.store.commit(result, today);

        if let Some(guess) = last_guess {
            self.event_emitter.emit(&EngineEvent::GuessRejected {
                guess,
                guesses_remaining: 0,
            });
        }
        self.reveal_all_clues(date);
        if session.is_won() {
            self.event_emitter.emit(&EngineEvent::GameWon {
                score: session.score(),
                guesses_used: session.guesses_used(),
            });
        } else {
            self.event_emitter.emit(&EngineEvent::GameLost);
        }
        self.sync_stats();
    }

    fn handle_replay_guess(&mut self, guess: &str) {
        let Some(date) = self.replayable_date() else {
            return;
        };
        let celebrity = self.selector.select_for_date(date);
        if crate::helpers::normalize_guess(guess)
            == crate::helpers::normalize_guess(&celebrity.name)
        {
            if self.store.record_replay_success(date) {
                self.event_emitter.emit(&EngineEvent::ReplaySucceeded {
                    name: celebrity.name.clone(),
                });
                self.sync_stats();
            }
        } else {
            self.event_emitter.emit(&EngineEvent::ReplayRejected {
                guess: guess.to_string(),
            });
        }
    }

    fn handle_show_answer(&mut self) {
        let Some(date) = self.replayable_date() else {
            return;
        };
        let celebrity = self.selector.select_for_date(date);
        self.event_emitter.emit(&EngineEvent::AnswerRevealed {
            name: celebrity.name.clone(),
        });
    }

    /// A date qualifies for the replay/answer path when it is in the past
    /// and its stored result is a failure.
    fn replayable_date(&self) -> Option<NaiveDate> {
        let date = self.current_date?;
        if date == self.today() {
            return None;
        }
        match self.store.get_result(date) {
            Some(result) if !result.solved => Some(date),
            _ => None,
        }
    }

    fn emit_clue(&self, session: &GameSession, index: usize) {
        if let Some(text) = session.celebrity().clues.get(index) {
            self.event_emitter.emit(&EngineEvent::ClueRevealed {
                index,
                text: text.clone(),
            });
        }
    }

    fn emit_active_clue(&self) {
        if let Some(session) = &self.session {
            self.emit_clue(session, session.active_clue_index());
        }
    }

    fn reveal_all_clues(&self, date: NaiveDate) {
        let celebrity = self.selector.select_for_date(date);
        for (index, text) in celebrity.clues.iter().enumerate() {
            self.event_emitter.emit(&EngineEvent::ClueRevealed {
                index,
                text: text.clone(),
            });
        }
    }

    fn sync_display(&mut self) {
        if self.session.is_some() {
            self.replay_session_events();
        } else {
            match self.current_date {
                Some(date) => self.load_date(date),
                None => self.load_date(self.today()),
            }
        }
        self.sync_stats();
        self.event_emitter
            .emit(&EngineEvent::SettingsChanged(self.settings.clone()));
    }

    /// Re-emits the event history of the in-progress session for a freshly
    /// attached UI. The session itself is untouched.
    fn replay_session_events(&self) {
        let Some(session) = &self.session else {
            return;
        };
        self.event_emitter.emit(&EngineEvent::PuzzleLoaded {
            date: session.date(),
            guesses_remaining: session.guesses_remaining(),
        });
        self.emit_clue(session, 0);
        let mut remaining = MAX_GUESSES;
        for guess in session.guesses() {
            remaining -= 1;
            self.event_emitter.emit(&EngineEvent::GuessRejected {
                guess: guess.clone(),
                guesses_remaining: remaining,
            });
            self.emit_clue(session, (MAX_GUESSES - remaining) as usize);
        }
    }

    fn sync_calendar(&self) {
        let month = self.calendar.month_view(&self.store, self.today());
        self.event_emitter.emit(&EngineEvent::CalendarUpdated(month));
    }

    fn sync_stats(&self) {
        let summary = stats::summarize(self.store.user_data());
        self.event_emitter.emit(&EngineEvent::StatsUpdated(summary));
    }

    fn change_settings(&mut self, change: SettingsChange) {
        if let Some(enabled) = change.sound_effects_enabled {
            self.settings.sound_effects_enabled = enabled;
        }
        if let Some(enabled) = change.background_music_enabled {
            self.settings.background_music_enabled = enabled;
        }
        if let Err(e) = self.settings.save(&self.data_dir) {
            log::warn!(target: "game_engine", "Could not persist settings: {}", e);
        }
        self.event_emitter
            .emit(&EngineEvent::SettingsChanged(self.settings.clone()));
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
