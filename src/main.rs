mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::UiEvent;
use crate::ui::format::format_start;
use anyhow::Context;
use bracket_engine::schedule::{self, SCHEDULE_ENV};
use bracket_engine::{BracketResolver, ScoreStore, Tournament};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

enum CliAction {
    Run,
    Exit,
    PrintSchedule,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let action = handle_cli_args();
    if matches!(action, CliAction::Exit) {
        return Ok(());
    }

    // Load before touching the terminal so schedule errors print normally.
    let tournament = schedule::load_tournament().context("failed to load tournament schedule")?;

    if matches!(action, CliAction::PrintSchedule) {
        print_schedule(&tournament);
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Debug)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let app = Arc::new(Mutex::new(App::new(tournament)));
    info!("tracking {} games", app.lock().await.tournament.games().len());

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Footer clock thread
    let clock_tx = ui_event_tx.clone();
    let clock_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if clock_tx.send(UiEvent::ClockTick).await.is_err() {
                break;
            }
        }
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx).await;

    input_handler.abort();
    clock_task.abort();

    Ok(())
}

fn handle_cli_args() -> CliAction {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return CliAction::Run;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            CliAction::Exit
        }
        "-V" | "--version" => {
            println!("pcl-bracket {}", env!("CARGO_PKG_VERSION"));
            CliAction::Exit
        }
        "-p" | "--print-schedule" => CliAction::PrintSchedule,
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> String {
    format!(
        "pcl-bracket - Parker County League tournament bracket tracker

Usage:
  pcl-bracket
  pcl-bracket --print-schedule
  pcl-bracket --help
  pcl-bracket --version

Environment:
  {SCHEDULE_ENV}      Path to a JSON schedule (default: built-in 2025 schedule)
  PCL_BRACKET_LOG_LEVEL     Log level shown in the log pane (default error)
  PCL_BRACKET_FULL_SCREEN   Start without header and tabs (1/true)"
    )
}

/// Plain-text schedule with no scores entered.
fn print_schedule(tournament: &Tournament) {
    let scores = ScoreStore::new();
    let resolver = BracketResolver::new(tournament, &scores);
    println!("{}\n{}\n", tournament.name, tournament.dates);
    for division in tournament.divisions() {
        println!("{} Schedule", division.name);
        for game in &division.games {
            let (a, b) = resolver.resolve_label(game.id);
            let when = game.start.map(format_start).unwrap_or_else(|| "TBD".to_string());
            println!("  {when} - {}: {a} vs {b}", game.title);
        }
        println!();
    }
    println!("{}", tournament.venue);
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
) {
    while let Some(ui_event) = ui_events.recv().await {
        let should_redraw = handle_ui_event(ui_event, &app).await;
        if should_redraw {
            let mut app_guard = app.lock().await;
            draw::draw(&mut terminal, &mut app_guard);
        }
    }
}

async fn handle_ui_event(ui_event: UiEvent, app: &Arc<Mutex<App>>) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            debug!("app started");
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::ClockTick => {
            let mut guard = app.lock().await;
            guard.on_clock_tick();
            true
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let Ok(event) = tokio::task::spawn_blocking(crossterm_event::read).await else {
            break;
        };
        if let Ok(event) = event {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
