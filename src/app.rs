use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, accepts_score_char};
use bracket_engine::{
    BracketResolver, GameDefinition, GameId, ScoreStore, Side, StandingsAggregator, Tournament,
};
use chrono::Local;
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Schedule,
    Bracket,
    Scores,
    Standings,
    Help,
}

impl MenuItem {
    const TABS: [MenuItem; 4] = [
        MenuItem::Schedule,
        MenuItem::Bracket,
        MenuItem::Scores,
        MenuItem::Standings,
    ];

    pub fn tab_index(self) -> usize {
        Self::TABS.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::TABS[(self.tab_index() + 1) % Self::TABS.len()]
    }

    pub fn prev(self) -> Self {
        Self::TABS[(self.tab_index() + Self::TABS.len() - 1) % Self::TABS.len()]
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub tournament: Tournament,
    pub scores: ScoreStore,
}

impl App {
    pub fn new(tournament: Tournament) -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
            tournament,
            scores: ScoreStore::new(),
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn resolver(&self) -> BracketResolver<'_> {
        BracketResolver::new(&self.tournament, &self.scores)
    }

    pub fn standings(&self) -> StandingsAggregator<'_> {
        StandingsAggregator::from_resolver(self.resolver())
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn next_tab(&mut self) {
        let next = self.tab_anchor().next();
        self.update_tab(next);
    }

    pub fn prev_tab(&mut self) {
        let prev = self.tab_anchor().prev();
        self.update_tab(prev);
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn on_clock_tick(&mut self) {
        self.state.now = Local::now();
    }

    fn tab_anchor(&self) -> MenuItem {
        match self.state.active_tab {
            MenuItem::Help => self.state.previous_tab,
            tab => tab,
        }
    }

    // -----------------------------------------------------------------------
    // Score entry — every keystroke goes straight into the ScoreStore
    // -----------------------------------------------------------------------

    pub fn selected_game(&self) -> Option<&GameDefinition> {
        self.tournament.games().get(self.state.entry.selected).copied()
    }

    pub fn entry_down(&mut self) {
        let count = self.tournament.games().len();
        self.state.entry.move_down(count);
    }

    pub fn entry_up(&mut self) {
        self.state.entry.move_up();
    }

    pub fn entry_switch_side(&mut self) {
        self.state.entry.switch_side();
    }

    pub fn entry_set_side(&mut self, side: Side) {
        self.state.entry.set_side(side);
    }

    pub fn entry_push(&mut self, ch: char) {
        let Some((game, side)) = self.entry_target() else {
            return;
        };
        let mut raw = self.scores.raw_side(game, side).to_string();
        if !accepts_score_char(&raw, ch) {
            return;
        }
        raw.push(ch);
        self.set_score(game, side, raw);
    }

    pub fn entry_backspace(&mut self) {
        let Some((game, side)) = self.entry_target() else {
            return;
        };
        let mut raw = self.scores.raw_side(game, side).to_string();
        if raw.pop().is_some() {
            self.set_score(game, side, raw);
        }
    }

    pub fn entry_clear(&mut self) {
        if let Some((game, side)) = self.entry_target() {
            self.set_score(game, side, String::new());
        }
    }

    fn entry_target(&self) -> Option<(GameId, Side)> {
        self.selected_game().map(|g| (g.id, self.state.entry.side))
    }

    fn set_score(&mut self, game: GameId, side: Side, raw: String) {
        debug!("score update: game {game} side {side:?} = {raw:?}");
        self.scores.update(game, side, raw);
        if let Some(score) = self.scores.get_score(game) {
            let resolver = self.resolver();
            debug!(
                "game {game} decided {}-{}: winner {}, loser {}",
                score.0,
                score.1,
                resolver.winner(game),
                resolver.loser(game)
            );
        }
    }
}
