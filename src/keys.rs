use crate::app::{App, MenuItem};
use bracket_engine::Side;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Score entry — digits type into the form instead of switching tabs
        (MenuItem::Scores, Char('j') | KeyCode::Down, _) => guard.entry_down(),
        (MenuItem::Scores, Char('k') | KeyCode::Up, _) => guard.entry_up(),
        (MenuItem::Scores, Char('h') | KeyCode::Left, _) => guard.entry_set_side(Side::A),
        (MenuItem::Scores, Char('l') | KeyCode::Right, _) => guard.entry_set_side(Side::B),
        (MenuItem::Scores, KeyCode::Enter | Char(' '), _) => guard.entry_switch_side(),
        (MenuItem::Scores, KeyCode::Backspace, _) => guard.entry_backspace(),
        (MenuItem::Scores, Char('x') | KeyCode::Delete, _) => guard.entry_clear(),
        (MenuItem::Scores, Char(ch), _) if ch.is_ascii_digit() || ch == '-' => {
            guard.entry_push(ch)
        }
        (MenuItem::Scores, KeyCode::Esc, _) => guard.update_tab(MenuItem::Schedule),

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Bracket),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Scores),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Standings),
        (_, KeyCode::Tab, _) => guard.next_tab(),
        (_, KeyCode::BackTab, _) => guard.prev_tab(),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
