use crate::resolver::{BracketResolver, ResolvedGame};
use crate::scores::ScoreStore;
use crate::{Side, Tournament};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsRow {
    pub team: String,
    /// Division of the first game the team shows up in.
    pub division: String,
    pub games_played: u32,
    pub runs_earned: i64,
    pub runs_allowed: i64,
}

impl StandingsRow {
    pub fn run_differential(&self) -> i64 {
        self.runs_earned.saturating_sub(self.runs_allowed)
    }
}

/// Per-team totals over every scored game. Recomputed from scratch on each
/// call.
#[derive(Debug, Clone, Copy)]
pub struct StandingsAggregator<'a> {
    resolver: BracketResolver<'a>,
}

impl<'a> StandingsAggregator<'a> {
    pub fn new(tournament: &'a Tournament, scores: &'a ScoreStore) -> Self {
        Self { resolver: BracketResolver::new(tournament, scores) }
    }

    pub fn from_resolver(resolver: BracketResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Every known team, in the order it first appears (by game id, side A
    /// first). Slots still waiting on an earlier game are left out.
    pub fn compute_teams(&self) -> Vec<String> {
        teams_in(&self.resolver.resolve_all())
    }

    pub fn compute_standings(&self) -> Vec<StandingsRow> {
        let games = self.resolver.resolve_all();
        let tournament = self.resolver.tournament();

        teams_in(&games)
            .into_iter()
            .map(|team| {
                let mut row = StandingsRow {
                    division: games
                        .iter()
                        .find(|g| g.slots.iter().any(|s| s.team() == Some(team.as_str())))
                        .and_then(|g| tournament.division_of(g.id))
                        .map(|d| d.name.clone())
                        .unwrap_or_default(),
                    team,
                    ..StandingsRow::default()
                };

                for game in &games {
                    let Some((a, b)) = game.score else {
                        continue;
                    };
                    // A team on both sides of one game counts once, as side A.
                    let side = if game.slot(Side::A).team() == Some(row.team.as_str()) {
                        Side::A
                    } else if game.slot(Side::B).team() == Some(row.team.as_str()) {
                        Side::B
                    } else {
                        continue;
                    };
                    let (own, opponent) = match side {
                        Side::A => (a, b),
                        Side::B => (b, a),
                    };
                    row.games_played += 1;
                    // Entries are free text; totals pin at the i64 bounds.
                    row.runs_earned = row.runs_earned.saturating_add(own);
                    row.runs_allowed = row.runs_allowed.saturating_add(opponent);
                }

                row
            })
            .collect()
    }
}

fn teams_in(games: &[ResolvedGame]) -> Vec<String> {
    let mut seen = HashSet::new();
    games
        .iter()
        .flat_map(|g| g.slots.iter())
        .filter_map(|slot| slot.team())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{default_tournament, parse_schedule};

    fn row<'r>(rows: &'r [StandingsRow], team: &str) -> &'r StandingsRow {
        rows.iter()
            .find(|r| r.team == team)
            .unwrap_or_else(|| panic!("no standings row for {team}"))
    }

    #[test]
    fn teams_before_any_scores_are_the_literal_entrants() {
        let tournament = default_tournament().unwrap();
        let scores = ScoreStore::new();
        let teams = StandingsAggregator::new(&tournament, &scores).compute_teams();
        assert_eq!(
            teams,
            vec![
                "8U Poolville Perrin",
                "8U Millsap Lynch",
                "8U Poolville Ripple",
                "12U Poolville Miles",
                "12U Pike",
                "12U Mcgee",
            ]
        );
        assert!(teams.iter().all(|t| !t.contains("Winner") && !t.contains("Loser")));
    }

    #[test]
    fn single_scored_game_accumulates_both_sides() {
        let tournament = default_tournament().unwrap();
        let mut scores = ScoreStore::new();
        scores.update(1, Side::A, "3");
        scores.update(1, Side::B, "5");
        let rows = StandingsAggregator::new(&tournament, &scores).compute_standings();

        let perrin = row(&rows, "8U Poolville Perrin");
        assert_eq!((perrin.games_played, perrin.runs_earned, perrin.runs_allowed), (1, 3, 5));
        assert_eq!(perrin.division, "8U");
        let lynch = row(&rows, "8U Millsap Lynch");
        assert_eq!((lynch.games_played, lynch.runs_earned, lynch.runs_allowed), (1, 5, 3));
        assert_eq!(lynch.run_differential(), 2);
        let ripple = row(&rows, "8U Poolville Ripple");
        assert_eq!(ripple.games_played, 0);
    }

    #[test]
    fn resolved_placeholders_count_toward_the_team() {
        let tournament = default_tournament().unwrap();
        let mut scores = ScoreStore::new();
        for (game, a, b) in [(6, "8", "2"), (7, "1", "4"), (8, "6", "3"), (9, "5", "7")] {
            scores.update(game, Side::A, a);
            scores.update(game, Side::B, b);
        }
        let rows = StandingsAggregator::new(&tournament, &scores).compute_standings();

        // Miles: 8-2 over Pike, 4-1 over Mcgee, 5-7 to Pike.
        let miles = row(&rows, "12U Poolville Miles");
        assert_eq!((miles.games_played, miles.runs_earned, miles.runs_allowed), (3, 17, 10));
        // Pike: 2-8, 6-3 over Mcgee, 7-5 over Miles.
        let pike = row(&rows, "12U Pike");
        assert_eq!((pike.games_played, pike.runs_earned, pike.runs_allowed), (3, 15, 16));
        let mcgee = row(&rows, "12U Mcgee");
        assert_eq!((mcgee.games_played, mcgee.runs_earned, mcgee.runs_allowed), (2, 4, 10));
        assert_eq!(mcgee.division, "12U");
    }

    #[test]
    fn unscored_games_never_leak_placeholders_into_teams() {
        let tournament = default_tournament().unwrap();
        let mut scores = ScoreStore::new();
        scores.update(2, Side::A, "4");
        let teams = StandingsAggregator::new(&tournament, &scores).compute_teams();
        assert_eq!(teams.len(), 6);
    }

    #[test]
    fn team_names_resembling_placeholders_are_kept() {
        let json = r#"{ "divisions": [ { "name": "8U", "games": [
            { "id": 1, "template": "G1: Winner Lake vs LOSER County" }
        ] } ] }"#;
        let tournament = parse_schedule(json, "test").unwrap();
        let scores = ScoreStore::new();
        let teams = StandingsAggregator::new(&tournament, &scores).compute_teams();
        assert_eq!(teams, vec!["Winner Lake", "LOSER County"]);
    }

    #[test]
    fn self_play_counts_once_from_side_a() {
        let json = r#"{ "divisions": [ { "name": "8U", "games": [
            { "id": 1, "template": "G1: Perrin vs Perrin" }
        ] } ] }"#;
        let tournament = parse_schedule(json, "test").unwrap();
        let mut scores = ScoreStore::new();
        scores.update(1, Side::A, "2");
        scores.update(1, Side::B, "6");
        let rows = StandingsAggregator::new(&tournament, &scores).compute_standings();
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].games_played, rows[0].runs_earned, rows[0].runs_allowed), (1, 2, 6));
    }

    #[test]
    fn extreme_run_totals_saturate() {
        let tournament = default_tournament().unwrap();
        let mut scores = ScoreStore::new();
        scores.update(1, Side::A, i64::MAX.to_string());
        scores.update(1, Side::B, i64::MAX.to_string());
        // Perrin loses game 1 on the tie and comes back as LOSER1 in game 3.
        scores.update(3, Side::A, "1");
        scores.update(3, Side::B, "0");
        let rows = StandingsAggregator::new(&tournament, &scores).compute_standings();

        let perrin = row(&rows, "8U Poolville Perrin");
        assert_eq!(perrin.games_played, 2);
        assert_eq!(perrin.runs_earned, i64::MAX);
        assert_eq!(perrin.runs_allowed, i64::MAX);
        assert_eq!(perrin.run_differential(), 0);
    }

    #[test]
    fn run_differential_saturates_at_the_negative_bound() {
        let tournament = default_tournament().unwrap();
        let mut scores = ScoreStore::new();
        scores.update(1, Side::A, i64::MIN.to_string());
        scores.update(1, Side::B, "1");
        scores.update(3, Side::A, "-99999999999999999999");
        scores.update(3, Side::B, "99999999999999999999");
        let rows = StandingsAggregator::new(&tournament, &scores).compute_standings();

        let perrin = row(&rows, "8U Poolville Perrin");
        assert_eq!((perrin.runs_earned, perrin.runs_allowed), (i64::MIN, i64::MAX));
        assert_eq!(perrin.run_differential(), i64::MIN);
        let lynch = row(&rows, "8U Millsap Lynch");
        assert_eq!(lynch.runs_allowed, i64::MIN);
        assert_eq!(lynch.run_differential(), i64::MAX);
    }
}
