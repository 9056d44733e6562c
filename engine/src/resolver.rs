use crate::scores::ScoreStore;
use crate::{FALLBACK_TEAMS, GameId, Outcome, Side, SlotExpr, Tournament};
use std::collections::HashMap;
use std::fmt;

/// A participant after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSlot {
    Team(String),
    /// The referenced game has no valid score yet.
    Pending { game: GameId, outcome: Outcome },
}

impl ResolvedSlot {
    pub fn team(&self) -> Option<&str> {
        match self {
            ResolvedSlot::Team(name) => Some(name),
            ResolvedSlot::Pending { .. } => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResolvedSlot::Pending { .. })
    }
}

impl fmt::Display for ResolvedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedSlot::Team(name) => f.write_str(name),
            ResolvedSlot::Pending { game, outcome } => {
                write!(f, "{} of Game {game}", outcome.label())
            }
        }
    }
}

/// One game with both participants resolved against the current scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGame {
    pub id: GameId,
    pub title: String,
    pub slots: [ResolvedSlot; 2],
    pub score: Option<(i64, i64)>,
}

impl ResolvedGame {
    pub fn slot(&self, side: Side) -> &ResolvedSlot {
        &self.slots[side.index()]
    }

    pub fn names(&self) -> (String, String) {
        (self.slots[0].to_string(), self.slots[1].to_string())
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.score.map(winning_side)
    }

    pub fn winner(&self) -> Option<&ResolvedSlot> {
        self.winning_side().map(|side| self.slot(side))
    }

    pub fn loser(&self) -> Option<&ResolvedSlot> {
        self.winning_side().map(|side| self.slot(side.other()))
    }
}

/// Side A wins only on a strictly greater score, so an equal score goes to
/// side B and the loss to side A.
pub fn winning_side((a, b): (i64, i64)) -> Side {
    if a > b { Side::A } else { Side::B }
}

/// Resolves placeholders in the schedule against a snapshot of entered
/// scores. Nothing is cached between calls; build a new resolver (or reuse
/// this one) after every `ScoreStore::update`.
#[derive(Debug, Clone, Copy)]
pub struct BracketResolver<'a> {
    tournament: &'a Tournament,
    scores: &'a ScoreStore,
}

impl<'a> BracketResolver<'a> {
    pub fn new(tournament: &'a Tournament, scores: &'a ScoreStore) -> Self {
        Self { tournament, scores }
    }

    pub fn tournament(&self) -> &'a Tournament {
        self.tournament
    }

    pub fn scores(&self) -> &'a ScoreStore {
        self.scores
    }

    /// Both participants of a game as display strings.
    pub fn resolve_label(&self, id: GameId) -> (String, String) {
        let [a, b] = self.resolve_slots(id);
        (a.to_string(), b.to_string())
    }

    /// Both participants of a game. Unknown ids get the generic
    /// "Team A"/"Team B" pair.
    pub fn resolve_slots(&self, id: GameId) -> [ResolvedSlot; 2] {
        match self.tournament.find_game(id) {
            Some(game) => [self.resolve_expr(&game.slots[0]), self.resolve_expr(&game.slots[1])],
            None => fallback_slots(),
        }
    }

    pub fn winner(&self, id: GameId) -> String {
        self.outcome_of(id, Outcome::Winner).to_string()
    }

    pub fn loser(&self, id: GameId) -> String {
        self.outcome_of(id, Outcome::Loser).to_string()
    }

    /// Who came out of game `id` with the given outcome. Recurses through
    /// the game's own placeholders; depth is bounded because references
    /// always point at lower ids.
    pub fn outcome_of(&self, id: GameId, outcome: Outcome) -> ResolvedSlot {
        match self.scores.get_score(id) {
            Some(score) => pick(self.resolve_slots(id), score, outcome),
            None => ResolvedSlot::Pending { game: id, outcome },
        }
    }

    /// Every game, in id order, each resolved once. Ids are a topological
    /// order of the placeholder graph, so each reference is already in the
    /// table when it is needed.
    pub fn resolve_all(&self) -> Vec<ResolvedGame> {
        let mut resolved: HashMap<GameId, [ResolvedSlot; 2]> = HashMap::new();
        let mut out = Vec::new();

        for game in self.tournament.games() {
            let slots = [&game.slots[0], &game.slots[1]].map(|expr| match expr {
                SlotExpr::Literal(name) => ResolvedSlot::Team(name.clone()),
                SlotExpr::Placeholder { game: source, outcome } => {
                    match (self.scores.get_score(*source), resolved.get(source)) {
                        (None, _) => ResolvedSlot::Pending { game: *source, outcome: *outcome },
                        (Some(score), Some(slots)) => pick(slots.clone(), score, *outcome),
                        (Some(_), None) => self.outcome_of(*source, *outcome),
                    }
                }
            });
            resolved.insert(game.id, slots.clone());
            out.push(ResolvedGame {
                id: game.id,
                title: game.title.clone(),
                slots,
                score: self.scores.get_score(game.id),
            });
        }

        out
    }

    fn resolve_expr(&self, expr: &SlotExpr) -> ResolvedSlot {
        match expr {
            SlotExpr::Literal(name) => ResolvedSlot::Team(name.clone()),
            SlotExpr::Placeholder { game, outcome } => self.outcome_of(*game, *outcome),
        }
    }
}

fn pick(slots: [ResolvedSlot; 2], score: (i64, i64), outcome: Outcome) -> ResolvedSlot {
    let winner = winning_side(score);
    let side = match outcome {
        Outcome::Winner => winner,
        Outcome::Loser => winner.other(),
    };
    let [a, b] = slots;
    match side {
        Side::A => a,
        Side::B => b,
    }
}

fn fallback_slots() -> [ResolvedSlot; 2] {
    [
        ResolvedSlot::Team(FALLBACK_TEAMS.0.to_string()),
        ResolvedSlot::Team(FALLBACK_TEAMS.1.to_string()),
    ]
}
