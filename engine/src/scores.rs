use crate::{GameId, Side};
use std::collections::HashMap;

/// Raw score entries as typed by the user, keyed by game.
///
/// Nothing is parsed on the way in; `get_score` decides whether a game has a
/// usable result.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    entries: HashMap<GameId, [String; 2]>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` verbatim for one side of a game. The sibling side keeps
    /// whatever it had, or "" if this is the first touch.
    pub fn update(&mut self, game: GameId, side: Side, raw: impl Into<String>) {
        let entry = self.entries.entry(game).or_default();
        entry[side.index()] = raw.into();
    }

    /// The pair exactly as entered, for echoing back into the entry form.
    pub fn raw(&self, game: GameId) -> Option<&[String; 2]> {
        self.entries.get(&game)
    }

    pub fn raw_side(&self, game: GameId, side: Side) -> &str {
        self.entries
            .get(&game)
            .map(|pair| pair[side.index()].as_str())
            .unwrap_or("")
    }

    /// `(side A, side B)` runs, or `None` unless both sides hold an integer.
    pub fn get_score(&self, game: GameId) -> Option<(i64, i64)> {
        let [a, b] = self.entries.get(&game)?;
        Some((parse_runs(a)?, parse_runs(b)?))
    }

    pub fn is_decided(&self, game: GameId) -> bool {
        self.get_score(game).is_some()
    }
}

/// Lenient base-10 parse: leading whitespace, an optional sign, then the
/// longest run of ASCII digits. Whatever follows the digits is ignored.
/// Digit runs too long for an `i64` clamp to its bounds.
pub fn parse_runs(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let negative = s.starts_with('-');
    match s[..sign_len + digits_len].parse() {
        Ok(runs) => Some(runs),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
