use crate::config::ScheduleFile;
use crate::{Division, GameDefinition, GameId, Outcome, Tournament};
use log::{debug, info};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

pub const SCHEDULE_ENV: &str = "PCL_BRACKET_SCHEDULE";
const DEFAULT_SCHEDULE_JSON: &str = include_str!("../schedule.json");
const DEFAULT_SOURCE: &str = "<embedded schedule>";

#[derive(Debug)]
pub enum ScheduleError {
    Io(std::io::Error, String),
    Parsing(serde_json::Error, String),
    Empty(String),
    DuplicateGame(GameId),
    /// A placeholder names a game that is not on the schedule.
    UnknownReference { game: GameId, referenced: GameId },
    /// A placeholder names the game itself or a later one.
    ForwardReference { game: GameId, referenced: GameId },
    /// Both slots of one game name the same placeholder.
    DuplicateSlot { game: GameId, referenced: GameId, outcome: Outcome },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Io(e, path) => write!(f, "Could not read schedule {path}: {e}"),
            ScheduleError::Parsing(e, source) => write!(f, "Invalid schedule json in {source}: {e}"),
            ScheduleError::Empty(source) => write!(f, "Schedule {source} has no games"),
            ScheduleError::DuplicateGame(id) => write!(f, "Game {id} is defined more than once"),
            ScheduleError::UnknownReference { game, referenced } => {
                write!(f, "Game {game} references game {referenced}, which is not on the schedule")
            }
            ScheduleError::ForwardReference { game, referenced } => write!(
                f,
                "Game {game} references game {referenced}; placeholders must point at earlier games"
            ),
            ScheduleError::DuplicateSlot { game, referenced, outcome } => write!(
                f,
                "Game {game} uses {}{referenced} for both slots",
                outcome.token()
            ),
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleError::Io(e, _) => Some(e),
            ScheduleError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

/// Load the tournament schedule.
///
/// Fallback chain:
/// 1) `PCL_BRACKET_SCHEDULE` env var — path to a JSON schedule file.
/// 2) Embedded schedule for the 2025 tournament.
pub fn load_tournament() -> ScheduleResult<Tournament> {
    if let Ok(path) = std::env::var(SCHEDULE_ENV)
        && !path.trim().is_empty()
    {
        return load_from_path(Path::new(path.trim()));
    }
    default_tournament()
}

pub fn load_from_path(path: &Path) -> ScheduleResult<Tournament> {
    let source = path.display().to_string();
    debug!("loading schedule from {source}");
    let content =
        std::fs::read_to_string(path).map_err(|e| ScheduleError::Io(e, source.clone()))?;
    parse_schedule(&content, &source)
}

pub fn default_tournament() -> ScheduleResult<Tournament> {
    parse_schedule(DEFAULT_SCHEDULE_JSON, DEFAULT_SOURCE)
}

pub fn parse_schedule(json: &str, source: &str) -> ScheduleResult<Tournament> {
    let raw: ScheduleFile =
        serde_json::from_str(json).map_err(|e| ScheduleError::Parsing(e, source.to_owned()))?;
    let tournament = map_schedule(raw);
    validate(&tournament, source)?;
    info!(
        "loaded {} games in {} divisions from {source}",
        tournament.games().len(),
        tournament.divisions().len()
    );
    Ok(tournament)
}

// ---------------------------------------------------------------------------
// Mapping: schedule wire types → domain types
// ---------------------------------------------------------------------------

fn map_schedule(raw: ScheduleFile) -> Tournament {
    let divisions = raw
        .divisions
        .unwrap_or_default()
        .into_iter()
        .map(|d| Division {
            name: d.name,
            bracket_image: d.bracket_image.filter(|url| !url.trim().is_empty()),
            games: d
                .games
                .into_iter()
                .map(|g| GameDefinition::new(g.id, g.template, g.start))
                .collect(),
        })
        .collect();

    Tournament::new(
        raw.name.unwrap_or_else(|| "Baseball Tournament".into()),
        raw.dates.unwrap_or_default(),
        raw.venue.unwrap_or_default(),
        divisions,
    )
}

/// Reject schedules whose placeholder graph is not a DAG ordered by id.
/// Resolution recurses through placeholders without a cycle guard, so this
/// is the only place cycles are caught.
fn validate(tournament: &Tournament, source: &str) -> ScheduleResult<()> {
    let games = tournament.games();
    if games.is_empty() {
        return Err(ScheduleError::Empty(source.to_owned()));
    }

    let mut ids = HashSet::new();
    for game in &games {
        if !ids.insert(game.id) {
            return Err(ScheduleError::DuplicateGame(game.id));
        }
    }

    for game in &games {
        let mut seen = HashSet::new();
        for (referenced, outcome) in game.placeholders() {
            if !ids.contains(&referenced) {
                return Err(ScheduleError::UnknownReference { game: game.id, referenced });
            }
            if referenced >= game.id {
                return Err(ScheduleError::ForwardReference { game: game.id, referenced });
            }
            if !seen.insert((referenced, outcome)) {
                return Err(ScheduleError::DuplicateSlot { game: game.id, referenced, outcome });
            }
        }
        debug!("game {} ok: {}", game.id, game.template);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn schedule_with(games: &str) -> String {
        format!(r#"{{ "name": "Test", "divisions": [ {{ "name": "8U", "games": [ {games} ] }} ] }}"#)
    }

    #[test]
    fn embedded_schedule_parses() {
        let t = default_tournament().expect("embedded schedule should parse");
        assert_eq!(t.name, "Parker County League Baseball Tournament");
        assert_eq!(t.divisions().len(), 2);
        let ids: Vec<GameId> = t.games().iter().map(|g| g.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(t.division_of(7).map(|d| d.name.as_str()), Some("12U"));
    }

    #[test]
    fn embedded_schedule_keeps_start_times() {
        let t = default_tournament().unwrap();
        let game = t.find_game(8).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 5, 31)
            .unwrap()
            .and_hms_opt(16, 30, 0)
            .unwrap();
        assert_eq!(game.start, Some(expected));
        assert_eq!(game.template, "12U Game 3: LOSER6 vs LOSER7");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let t = parse_schedule(&schedule_with(r#"{ "id": 1, "template": "G1: A vs B" }"#), "test")
            .unwrap();
        assert_eq!(t.name, "Test");
        assert_eq!(t.venue, "");
        assert_eq!(t.find_game(1).unwrap().start, None);
        assert_eq!(t.divisions()[0].bracket_image, None);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_schedule("{ not json", "broken.json").unwrap_err();
        assert!(matches!(err, ScheduleError::Parsing(_, ref s) if s == "broken.json"));
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let err = parse_schedule(r#"{ "divisions": [] }"#, "empty.json").unwrap_err();
        assert!(matches!(err, ScheduleError::Empty(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = schedule_with(
            r#"{ "id": 1, "template": "G1: A vs B" }, { "id": 1, "template": "G2: C vs D" }"#,
        );
        let err = parse_schedule(&json, "test").unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateGame(1)));
    }

    #[test]
    fn unknown_reference_is_rejected() {
        let json = schedule_with(
            r#"{ "id": 1, "template": "G1: A vs B" }, { "id": 2, "template": "G2: C vs WINNER9" }"#,
        );
        let err = parse_schedule(&json, "test").unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownReference { game: 2, referenced: 9 }));
    }

    #[test]
    fn forward_and_self_references_are_rejected() {
        let forward = schedule_with(
            r#"{ "id": 1, "template": "G1: A vs LOSER2" }, { "id": 2, "template": "G2: C vs D" }"#,
        );
        let err = parse_schedule(&forward, "test").unwrap_err();
        assert!(matches!(err, ScheduleError::ForwardReference { game: 1, referenced: 2 }));

        let itself = schedule_with(r#"{ "id": 1, "template": "G1: A vs WINNER1" }"#);
        let err = parse_schedule(&itself, "test").unwrap_err();
        assert!(matches!(err, ScheduleError::ForwardReference { game: 1, referenced: 1 }));
    }

    #[test]
    fn repeated_placeholder_in_one_game_is_rejected() {
        let json = schedule_with(
            r#"{ "id": 1, "template": "G1: A vs B" }, { "id": 2, "template": "G2: WINNER1 vs WINNER1" }"#,
        );
        let err = parse_schedule(&json, "test").unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::DuplicateSlot { game: 2, referenced: 1, outcome: Outcome::Winner }
        ));
        assert_eq!(err.to_string(), "Game 2 uses WINNER1 for both slots");
    }

    #[test]
    fn winner_and_loser_of_same_game_may_meet() {
        let json = schedule_with(
            r#"{ "id": 1, "template": "G1: A vs B" }, { "id": 2, "template": "G2: WINNER1 vs LOSER1" }"#,
        );
        assert!(parse_schedule(&json, "test").is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_from_path(Path::new("/nonexistent/pcl-schedule.json")).unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_, _)));
        assert!(err.to_string().contains("/nonexistent/pcl-schedule.json"));
    }
}
