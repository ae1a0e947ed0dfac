//! Play modes: free play and the daily challenge

use crate::rng::{EntropyRng, RandomSource, SeededRng};
use chrono::NaiveDate;

/// How a playthrough draws its pieces
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Fresh entropy every run
    #[default]
    Free,
    /// Same pieces for everyone on the given date key (YYYY-MM-DD)
    Daily(String),
}

impl PlayMode {
    pub fn name(&self) -> &'static str {
        match self {
            PlayMode::Free => "Classic",
            PlayMode::Daily(_) => "Daily",
        }
    }

    pub fn description(&self) -> String {
        match self {
            PlayMode::Free => "Endless play with random pieces".to_string(),
            PlayMode::Daily(key) => format!("Daily challenge for {}", key),
        }
    }

    /// Random source for gameplay draws in this mode
    pub fn gameplay_rng(&self) -> Box<dyn RandomSource> {
        match self {
            PlayMode::Free => Box::new(EntropyRng::new()),
            PlayMode::Daily(key) => Box::new(SeededRng::from_key(key)),
        }
    }
}

/// Check that `key` is a real calendar date written as YYYY-MM-DD
pub fn is_daily_key(key: &str) -> bool {
    key.len() == 10 && NaiveDate::parse_from_str(key, "%Y-%m-%d").is_ok()
}
