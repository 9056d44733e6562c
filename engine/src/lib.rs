pub mod config;
pub mod resolver;
pub mod schedule;
pub mod scores;
pub mod standings;

use chrono::NaiveDateTime;
use std::fmt;

pub use resolver::{BracketResolver, ResolvedGame, ResolvedSlot};
pub use scores::ScoreStore;
pub use standings::{StandingsAggregator, StandingsRow};

/// Stable game number from the schedule. Also the topological ordering key:
/// a game may only reference games with a lower id.
pub type GameId = u32;

/// Label used for either side of a game whose template cannot be split.
pub const FALLBACK_TEAMS: (&str, &str) = ("Team A", "Team B");

// ---------------------------------------------------------------------------
// Domain types — independent of the schedule file format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Tournament {
    pub name: String,
    pub dates: String,
    pub venue: String,
    divisions: Vec<Division>,
}

impl Tournament {
    /// Callers outside this crate go through `schedule::load_tournament`,
    /// which validates the placeholder graph before calling this.
    pub(crate) fn new(name: String, dates: String, venue: String, divisions: Vec<Division>) -> Self {
        Self { name, dates, venue, divisions }
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    /// All games across divisions, ordered by id.
    pub fn games(&self) -> Vec<&GameDefinition> {
        let mut games: Vec<&GameDefinition> =
            self.divisions.iter().flat_map(|d| d.games.iter()).collect();
        games.sort_by_key(|g| g.id);
        games
    }

    pub fn find_game(&self, id: GameId) -> Option<&GameDefinition> {
        self.divisions
            .iter()
            .flat_map(|d| d.games.iter())
            .find(|g| g.id == id)
    }

    pub fn division_of(&self, id: GameId) -> Option<&Division> {
        self.divisions
            .iter()
            .find(|d| d.games.iter().any(|g| g.id == id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Division {
    pub name: String, // "8U", "12U"
    pub bracket_image: Option<String>,
    pub games: Vec<GameDefinition>,
}

#[derive(Debug, Clone)]
pub struct GameDefinition {
    pub id: GameId,
    /// Raw schedule line, e.g. "8U Game 2: 8U Poolville Ripple vs WINNER1".
    pub template: String,
    /// Text before the first ": ", e.g. "8U Game 5 (if needed)".
    pub title: String,
    pub slots: [SlotExpr; 2],
    pub start: Option<NaiveDateTime>,
}

impl GameDefinition {
    pub fn new(id: GameId, template: impl Into<String>, start: Option<NaiveDateTime>) -> Self {
        let template = template.into();
        let (title, slots) = match split_template(&template) {
            Some((title, left, right)) => (
                title.to_string(),
                [SlotExpr::parse(left), SlotExpr::parse(right)],
            ),
            None => (
                template.clone(),
                [
                    SlotExpr::Literal(FALLBACK_TEAMS.0.to_string()),
                    SlotExpr::Literal(FALLBACK_TEAMS.1.to_string()),
                ],
            ),
        };
        Self { id, template, title, slots, start }
    }

    pub fn placeholders(&self) -> impl Iterator<Item = (GameId, Outcome)> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            SlotExpr::Placeholder { game, outcome } => Some((*game, *outcome)),
            SlotExpr::Literal(_) => None,
        })
    }
}

const VS: &str = " vs ";

/// Split `"<title>: <left> vs <right>"`. The title ends at the first ": ";
/// the pair splits on the last " vs " that leaves both sides non-empty,
/// overlapping occurrences included.
pub(crate) fn split_template(template: &str) -> Option<(&str, &str, &str)> {
    let colon = template.find(": ")?;
    let title = &template[..colon];
    let rest = &template[colon + 2..];
    let idx = rest
        .char_indices()
        .rev()
        .map(|(idx, _)| idx)
        .find(|&idx| idx > 0 && idx + VS.len() < rest.len() && rest[idx..].starts_with(VS))?;
    Some((title, &rest[..idx], &rest[idx + VS.len()..]))
}

/// One participant position in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::A),
            1 => Some(Side::B),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner,
    Loser,
}

impl Outcome {
    /// Token used in schedule templates.
    pub fn token(&self) -> &'static str {
        match self {
            Outcome::Winner => "WINNER",
            Outcome::Loser => "LOSER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Winner => "Winner",
            Outcome::Loser => "Loser",
        }
    }
}

/// A slot as written in the schedule: either a team name or a reference to
/// the winner/loser of an earlier game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotExpr {
    Literal(String),
    Placeholder { game: GameId, outcome: Outcome },
}

impl SlotExpr {
    /// `WINNER<n>` / `LOSER<n>` must make up the whole expression; anything
    /// else is a team name.
    pub fn parse(expr: &str) -> Self {
        let trimmed = expr.trim();
        for outcome in [Outcome::Winner, Outcome::Loser] {
            if let Some(digits) = trimmed.strip_prefix(outcome.token())
                && !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && let Ok(game) = digits.parse::<GameId>()
            {
                return SlotExpr::Placeholder { game, outcome };
            }
        }
        SlotExpr::Literal(expr.to_string())
    }
}

impl fmt::Display for SlotExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotExpr::Literal(name) => f.write_str(name),
            SlotExpr::Placeholder { game, outcome } => write!(f, "{}{game}", outcome.token()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_splits_title_and_slots() {
        let game = GameDefinition::new(2, "8U Game 2: 8U Poolville Ripple vs WINNER1", None);
        assert_eq!(game.title, "8U Game 2");
        assert_eq!(game.slots[0], SlotExpr::Literal("8U Poolville Ripple".into()));
        assert_eq!(
            game.slots[1],
            SlotExpr::Placeholder { game: 1, outcome: Outcome::Winner }
        );
    }

    #[test]
    fn if_needed_title_is_kept_whole() {
        let game = GameDefinition::new(5, "8U Game 5 (if needed): WINNER2 vs WINNER3", None);
        assert_eq!(game.title, "8U Game 5 (if needed)");
        let refs: Vec<_> = game.placeholders().collect();
        assert_eq!(refs, vec![(2, Outcome::Winner), (3, Outcome::Winner)]);
    }

    #[test]
    fn malformed_template_falls_back_to_generic_teams() {
        for template in ["", "Game 1 Perrin vs Lynch", "Game 1: Perrin and Lynch", "Game 1: vs Lynch"] {
            let game = GameDefinition::new(1, template, None);
            assert_eq!(game.slots[0], SlotExpr::Literal("Team A".into()), "{template:?}");
            assert_eq!(game.slots[1], SlotExpr::Literal("Team B".into()), "{template:?}");
        }
    }

    #[test]
    fn split_uses_last_vs_with_non_empty_sides() {
        assert_eq!(split_template("G: a vs b vs c"), Some(("G", "a vs b", "c")));
        assert_eq!(split_template("G: a vs b vs "), Some(("G", "a", "b vs ")));
        assert_eq!(split_template("G: x: a vs b"), Some(("G", "x: a", "b")));
        assert_eq!(split_template("G: a vs vs "), Some(("G", "a", "vs ")));
        assert_eq!(split_template("G: vs vs b"), Some(("G", "vs", "b")));
    }

    #[test]
    fn placeholder_must_be_whole_expression() {
        assert_eq!(
            SlotExpr::parse(" LOSER7 "),
            SlotExpr::Placeholder { game: 7, outcome: Outcome::Loser }
        );
        assert_eq!(SlotExpr::parse("WINNER"), SlotExpr::Literal("WINNER".into()));
        assert_eq!(SlotExpr::parse("WINNER1 B"), SlotExpr::Literal("WINNER1 B".into()));
        assert_eq!(SlotExpr::parse("Winner1"), SlotExpr::Literal("Winner1".into()));
        assert_eq!(SlotExpr::parse("WINNER+1"), SlotExpr::Literal("WINNER+1".into()));
    }

    #[test]
    fn side_index_round_trips() {
        assert_eq!(Side::from_index(0), Some(Side::A));
        assert_eq!(Side::from_index(1), Some(Side::B));
        assert_eq!(Side::from_index(2), None);
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.index(), 1);
    }
}
