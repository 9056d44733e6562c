use log::LevelFilter;
use std::str::FromStr;

pub const LOG_LEVEL_ENV: &str = "PCL_BRACKET_LOG_LEVEL";
pub const FULL_SCREEN_ENV: &str = "PCL_BRACKET_FULL_SCREEN";

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_values(
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
            std::env::var(FULL_SCREEN_ENV).ok().as_deref(),
        )
    }

    fn from_values(log_level: Option<&str>, full_screen: Option<&str>) -> Self {
        let log_level = log_level
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| LevelFilter::from_str(s).ok());
        let full_screen = full_screen
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { full_screen, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_use_defaults() {
        let settings = AppSettings::from_values(None, None);
        assert!(!settings.full_screen);
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        let settings = AppSettings::from_values(Some("Debug"), None);
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
        assert_eq!(AppSettings::from_values(Some("loud"), None).log_level, None);
    }

    #[test]
    fn full_screen_accepts_common_truthy_values() {
        for value in ["1", "true", "TRUE", " yes "] {
            assert!(AppSettings::from_values(None, Some(value)).full_screen, "{value}");
        }
        assert!(!AppSettings::from_values(None, Some("0")).full_screen);
    }
}
