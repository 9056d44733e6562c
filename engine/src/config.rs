/// Schedule file wire types — serde shapes for the JSON schedule.
/// These map to the domain types in lib.rs via `schedule::map_schedule`.
use crate::GameId;
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleFile {
    pub name: Option<String>,
    pub dates: Option<String>,
    pub venue: Option<String>,
    pub divisions: Option<Vec<DivisionEntry>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DivisionEntry {
    pub name: String,
    /// Link to the printed bracket sheet for this division.
    pub bracket_image: Option<String>,
    #[serde(default)]
    pub games: Vec<GameEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameEntry {
    pub id: GameId,
    pub template: String,
    /// Local first pitch, e.g. "2025-05-31T08:00:00".
    pub start: Option<NaiveDateTime>,
}
