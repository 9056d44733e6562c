use crate::app::MenuItem;
use bracket_engine::Side;
use chrono::{DateTime, Local};

// ---------------------------------------------------------------------------
// Score entry form state
// ---------------------------------------------------------------------------

/// Cursor for the Enter Scores form: which game row and which side of it
/// receives keystrokes.
#[derive(Debug, Clone, Copy)]
pub struct EntryState {
    /// Row index into the schedule's games, ordered by id.
    pub selected: usize,
    pub side: Side,
}

impl Default for EntryState {
    fn default() -> Self {
        Self { selected: 0, side: Side::A }
    }
}

impl EntryState {
    pub fn move_down(&mut self, game_count: usize) {
        let max = game_count.saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn switch_side(&mut self) {
        self.side = self.side.other();
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }
}

/// Keystroke filter for score inputs: digits, plus a sign in front.
pub fn accepts_score_char(current: &str, ch: char) -> bool {
    ch.is_ascii_digit() || (ch == '-' && current.is_empty())
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub entry: EntryState,
    pub now: DateTime<Local>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            entry: EntryState::default(),
            now: Local::now(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
