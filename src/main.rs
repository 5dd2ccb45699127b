use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use log::trace;

use celebday::events::Channel;
use celebday::game::catalog::CelebrityCatalog;
use celebday::game::{GameEngine, PuzzleSelector};
use celebday::helpers::default_data_dir;
use celebday::model::{EngineCommand, EngineEvent, SettingsChange};
use celebday::ui::ConsoleUi;
use celebday::Destroyable;

fn main() {
    env_logger::init();

    let data_dir = default_data_dir();
    trace!(target: "main", "Using data dir {:?}", data_dir);

    let (command_emitter, command_observer) = Channel::<EngineCommand>::new();
    let (event_emitter, event_observer) = Channel::<EngineEvent>::new();

    let engine = GameEngine::new(
        command_observer,
        event_emitter,
        PuzzleSelector::new(CelebrityCatalog::builtin()),
        data_dir,
    );
    let console = ConsoleUi::new(event_observer);

    command_emitter.emit(&EngineCommand::LoadToday);
    println!();
    println!("Type a name to guess, or 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => (),
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_input(input) {
            Input::Command(command) => command_emitter.emit(&command),
            Input::Help => print_help(),
            Input::Quit => break,
            Input::Unknown(text) => println!("Unrecognized command: {}", text),
        }
    }

    engine.borrow_mut().destroy();
    console.borrow_mut().destroy();
}

enum Input {
    Command(EngineCommand),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(input: &str) -> Input {
    let (word, rest) = match input.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match (word.to_lowercase().as_str(), rest) {
        ("quit" | "exit", _) => Input::Quit,
        ("help", _) => Input::Help,
        ("skip", _) => Input::Command(EngineCommand::Skip),
        ("today", _) => Input::Command(EngineCommand::LoadToday),
        ("calendar", _) => Input::Command(EngineCommand::ShowCalendar),
        ("prev", _) => Input::Command(EngineCommand::CalendarPrev),
        ("next", _) => Input::Command(EngineCommand::CalendarNext),
        ("stats", _) => Input::Command(EngineCommand::ShowStats),
        ("answer", _) => Input::Command(EngineCommand::ShowAnswer),
        ("replay", guess) if !guess.is_empty() => {
            Input::Command(EngineCommand::ReplayGuess(guess.to_string()))
        }
        ("date", text) => match text.parse::<NaiveDate>() {
            Ok(date) => Input::Command(EngineCommand::LoadDate(date)),
            Err(_) => Input::Unknown(format!("date {} (expected YYYY-MM-DD)", text)),
        },
        ("sound", toggle @ ("on" | "off")) => {
            Input::Command(EngineCommand::ChangeSettings(SettingsChange {
                sound_effects_enabled: Some(toggle == "on"),
                ..SettingsChange::default()
            }))
        }
        ("music", toggle @ ("on" | "off")) => {
            Input::Command(EngineCommand::ChangeSettings(SettingsChange {
                background_music_enabled: Some(toggle == "on"),
                ..SettingsChange::default()
            }))
        }
        _ => Input::Command(EngineCommand::SubmitGuess(input.to_string())),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <name>            guess the celebrity");
    println!("  skip              spend a guess to see the next clue");
    println!("  today             return to today's challenge");
    println!("  date YYYY-MM-DD   play or review a past date");
    println!("  calendar          show the month view");
    println!("  prev / next       page the calendar");
    println!("  stats             show your statistics");
    println!("  replay <name>     one retry for a failed past date");
    println!("  answer            reveal a failed past date's answer");
    println!("  sound on|off      toggle sound effects");
    println!("  music on|off      toggle background music");
    println!("  quit              exit");
}
