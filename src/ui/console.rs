use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use rand::Rng;

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::game::calendar::CalendarMonth;
use crate::game::stats::StatsSummary;
use crate::helpers::time_until_next_puzzle;
use crate::model::{DayStatus, EngineEvent};

const WRONG_GUESS_MESSAGES: &[&str] = &[
    "Not quite the star we're looking for!",
    "Close, but no Hollywood Walk of Fame!",
    "That's not ringing any bells... or Oscar bells!",
    "Swing and a miss! Try channeling your inner celebrity!",
    "Hmm, that name doesn't sparkle like a celebrity!",
    "Not the right celebrity, but nice try!",
    "That guess is more like a background extra!",
    "Keep trying - fame awaits the persistent!",
    "Not quite A-list material... yet!",
    "That's not hitting the red carpet!",
];

const FINAL_FAILURE_MESSAGES: &[&str] = &[
    "Looks like you don't know everyone in Hollywood!",
    "Even the paparazzi would have gotten this one!",
    "Time to brush up on your celebrity knowledge!",
    "This star was hiding in plain sight!",
    "Better luck next time, future celebrity expert!",
    "Don't worry, even celebrities forget each other's names!",
    "You gave it your best shot - that's what counts!",
    "Sometimes the stars just don't align!",
    "This celebrity will remember you tried!",
    "Practice makes perfect in the celebrity game!",
];

/// Renders engine events to stdout.
pub struct ConsoleUi {
    subscription: Option<Unsubscriber<EngineEvent>>,
}

impl Destroyable for ConsoleUi {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl ConsoleUi {
    pub fn new(event_observer: EventObserver<EngineEvent>) -> Rc<RefCell<Self>> {
        let console = Rc::new(RefCell::new(Self { subscription: None }));

        let subscription = event_observer.subscribe(move |event| {
            render(event);
        });
        console.borrow_mut().subscription = Some(subscription);
        console
    }
}

fn render(event: &EngineEvent) {
    match event {
        EngineEvent::PuzzleLoaded {
            date,
            guesses_remaining,
        } => {
            println!();
            println!("=== Celebrity birthday challenge for {} ===", date);
            println!("Guess who was born today. {} guesses.", guesses_remaining);
        }
        EngineEvent::ClueRevealed { index, text } => {
            println!("Clue {}: {}", index + 1, text);
        }
        EngineEvent::GuessRejected {
            guess,
            guesses_remaining,
        } => {
            match guess {
                Some(_) => println!("{}", pick(WRONG_GUESS_MESSAGES)),
                None => println!("Skipped."),
            }
            if *guesses_remaining > 0 {
                println!("{} guesses left.", guesses_remaining);
            }
        }
        EngineEvent::GameWon {
            score,
            guesses_used,
        } => {
            println!(
                "Correct! Solved in {} guess{} for {} points.",
                guesses_used,
                if *guesses_used == 1 { "" } else { "es" },
                score
            );
            print_countdown();
        }
        EngineEvent::GameLost => {
            println!("{}", pick(FINAL_FAILURE_MESSAGES));
            println!("Out of guesses. Type 'answer' after revisiting this date to see who it was.");
        }
        EngineEvent::PuzzleAlreadyComplete(result) => {
            if result.solved {
                println!(
                    "Already solved on {}: {} points in {} guesses.",
                    result.date, result.score, result.guesses_used
                );
            } else {
                println!("You ran out of guesses on {}.", result.date);
            }
        }
        EngineEvent::ReplayOffered => {
            println!("One more chance: type 'replay <name>' for a single retry, or 'answer' to give up.");
        }
        EngineEvent::ReplaySucceeded { name } => {
            println!("Redemption! It was {}. 100 points banked.", name);
        }
        EngineEvent::ReplayRejected { guess } => {
            println!("'{}' is not it. No more retries for this date.", guess);
        }
        EngineEvent::AnswerRevealed { name } => {
            println!("It was {}.", name);
        }
        EngineEvent::CalendarUpdated(month) => render_calendar(month),
        EngineEvent::StatsUpdated(summary) => render_stats(summary),
        EngineEvent::SettingsChanged(settings) => {
            println!(
                "Settings: sound effects {}, background music {}.",
                on_off(settings.sound_effects_enabled),
                on_off(settings.background_music_enabled)
            );
        }
    }
}

fn pick(messages: &[&'static str]) -> &'static str {
    messages[rand::rng().random_range(0..messages.len())]
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn print_countdown() {
    let countdown = time_until_next_puzzle(Local::now().naive_local());
    println!(
        "Next challenge in {:02}:{:02}:{:02}.",
        countdown.hours, countdown.minutes, countdown.seconds
    );
}

fn render_calendar(month: &CalendarMonth) {
    println!();
    println!("    {:>4}-{:02}", month.year, month.month);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    let mut column = month.leading_blanks;
    for _ in 0..month.leading_blanks {
        print!("    ");
    }
    for cell in &month.days {
        print!("{:>3}{}", cell.date.format("%-d"), status_marker(cell.status));
        column += 1;
        if column % 7 == 0 {
            println!();
        }
    }
    if column % 7 != 0 {
        println!();
    }
    println!("  *=solved  x=failed  .=playable");
    if month.can_prev || month.can_next {
        println!(
            "  ({}{})",
            if month.can_prev { "'prev' " } else { "" },
            if month.can_next { "'next'" } else { "" }
        );
    }
}

fn status_marker(status: DayStatus) -> char {
    match status {
        DayStatus::Solved => '*',
        DayStatus::Failed => 'x',
        DayStatus::Today => '!',
        DayStatus::Playable => '.',
        DayStatus::Locked => ' ',
    }
}

fn render_stats(summary: &StatsSummary) {
    println!();
    println!("--- Your stats ---");
    println!("Played:         {}", summary.total_played);
    println!("Solved:         {}", summary.total_solved);
    println!("Win rate:       {}%", summary.win_percentage);
    println!("Current streak: {}", summary.current_streak);
    println!("Max streak:     {}", summary.max_streak);
    println!("Total score:    {}", summary.total_score);
    println!(
        "Time played:    {}m {}s",
        summary.total_time / 60,
        summary.total_time % 60
    );
}
