use chrono::{Datelike, NaiveDateTime};

/// "May 31st, 8:00 AM"
pub fn format_start(start: NaiveDateTime) -> String {
    format!(
        "{} {}, {}",
        start.format("%B"),
        ordinal(start.day()),
        start.format("%-I:%M %p")
    )
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Pad or clip to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    let mut s: String = text.chars().take(width).collect();
    while s.chars().count() < width {
        s.push(' ');
    }
    s
}
