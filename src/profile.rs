//! Player profile and its persistence
//!
//! The profile is the only state that outlives a playthrough. It is stored as
//! a JSON blob through an injected [`ProfileStore`], so the engine never
//! touches a global key-value store.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Storage key for the profile blob
pub const PROFILE_KEY: &str = "snapstack_v1";

/// Every this-many game overs an interstitial break is due
pub const INTERSTITIAL_EVERY: u32 = 3;

/// Cross-session player state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub coins: u64,
    /// Best score ever reached
    pub best: u64,
    /// Theme identifier, interpreted by the front-end
    pub theme: String,
    /// Date key (YYYY-MM-DD) of the last daily run
    pub last_daily: Option<String>,
    pub daily_streak: u32,
    pub remove_ads: bool,
    /// Game overs counted toward the next interstitial break
    pub interstitial_counter: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            coins: 0,
            best: 0,
            theme: "classic".to_string(),
            last_daily: None,
            daily_streak: 0,
            remove_ads: false,
            interstitial_counter: 0,
        }
    }
}

/// Failure to write the profile
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "profile storage failed: {}", e),
            StoreError::Encode(e) => write!(f, "profile encoding failed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Encode(e)
    }
}

/// Named blob storage
pub trait ProfileStore {
    /// Read the blob stored under `key`, `Ok(None)` if there is none
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, blob: &str) -> io::Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one blob
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let mut store = Self::new();
        store.blobs.insert(key.to_string(), blob.to_string());
        store
    }
}

impl ProfileStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> io::Result<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per blob in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory (e.g. ~/.local/share/snapstack)
    pub fn platform() -> Option<Self> {
        ProjectDirs::from("com", "snapstack", "snapstack")
            .map(|dirs| Self::new(dirs.data_dir()))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ProfileStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, blob: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), blob)
    }
}

impl Profile {
    /// Load the profile, falling back to defaults for anything missing or unreadable
    pub fn load(store: &dyn ProfileStore) -> Self {
        let raw = match store.read(PROFILE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("could not read profile, using defaults: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("corrupt profile record, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Write the profile to the store
    pub fn save(&self, store: &mut dyn ProfileStore) -> Result<(), StoreError> {
        let blob = serde_json::to_string(self)?;
        store.write(PROFILE_KEY, &blob)?;
        debug!(best = self.best, coins = self.coins, "profile saved");
        Ok(())
    }

    /// Raise the best score if `score` beats it
    pub fn record_score(&mut self, score: u64) {
        self.best = self.best.max(score);
    }

    /// Count a game over toward the next interstitial break
    pub fn record_game_over(&mut self) {
        if !self.remove_ads {
            self.interstitial_counter += 1;
        }
    }

    /// Whether the most recent game over lands on an interstitial break
    pub fn interstitial_due(&self) -> bool {
        !self.remove_ads
            && self.interstitial_counter > 0
            && self.interstitial_counter % INTERSTITIAL_EVERY == 0
    }

    /// Track the daily streak when a daily run starts on `today`.
    ///
    /// The streak grows when the previous daily run was `yesterday` and
    /// restarts at 1 otherwise. Replaying the same day changes nothing.
    pub fn record_daily(&mut self, today: &str, yesterday: &str) {
        match self.last_daily.as_deref() {
            Some(last) if last == today => return,
            Some(last) if last == yesterday => self.daily_streak += 1,
            _ => self.daily_streak = 1,
        }
        self.last_daily = Some(today.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Profile::load(&store), Profile::default());
    }

    #[test]
    fn test_corrupt_record_gives_defaults() {
        let store = MemoryStore::with_blob(PROFILE_KEY, "{not json");
        assert_eq!(Profile::load(&store), Profile::default());
    }

    #[test]
    fn test_missing_field_takes_default() {
        let blob = r#"{"coins":42,"best":310,"theme":"arcade","lastDaily":"2024-03-09",
                       "removeAds":true,"interstitialCounter":5}"#;
        let store = MemoryStore::with_blob(PROFILE_KEY, blob);
        let profile = Profile::load(&store);

        assert_eq!(profile.daily_streak, 0);
        assert_eq!(profile.coins, 42);
        assert_eq!(profile.best, 310);
        assert_eq!(profile.theme, "arcade");
        assert_eq!(profile.last_daily.as_deref(), Some("2024-03-09"));
        assert!(profile.remove_ads);
        assert_eq!(profile.interstitial_counter, 5);
    }

    #[test]
    fn test_null_last_daily() {
        let store = MemoryStore::with_blob(PROFILE_KEY, r#"{"lastDaily":null,"coins":3}"#);
        let profile = Profile::load(&store);
        assert_eq!(profile.last_daily, None);
        assert_eq!(profile.coins, 3);
        assert_eq!(profile.theme, "classic");
    }

    #[test]
    fn test_save_uses_camel_case_keys() {
        let mut store = MemoryStore::new();
        let profile = Profile {
            daily_streak: 4,
            ..Profile::default()
        };
        profile.save(&mut store).unwrap();

        let raw = store.read(PROFILE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"dailyStreak\":4"));
        assert!(raw.contains("\"interstitialCounter\":0"));
        assert_eq!(Profile::load(&store), profile);
    }

    #[test]
    fn test_best_never_decreases() {
        let mut profile = Profile::default();
        profile.record_score(50);
        profile.record_score(20);
        assert_eq!(profile.best, 50);
    }

    #[test]
    fn test_interstitial_every_third_game_over() {
        let mut profile = Profile::default();
        let due: Vec<bool> = (0..6)
            .map(|_| {
                profile.record_game_over();
                profile.interstitial_due()
            })
            .collect();
        assert_eq!(due, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_remove_ads_skips_interstitials() {
        let mut profile = Profile {
            remove_ads: true,
            ..Profile::default()
        };
        for _ in 0..3 {
            profile.record_game_over();
        }
        assert_eq!(profile.interstitial_counter, 0);
        assert!(!profile.interstitial_due());
    }

    #[test]
    fn test_daily_streak() {
        let mut profile = Profile::default();
        profile.record_daily("2024-03-09", "2024-03-08");
        assert_eq!(profile.daily_streak, 1);

        profile.record_daily("2024-03-09", "2024-03-08");
        assert_eq!(profile.daily_streak, 1);

        profile.record_daily("2024-03-10", "2024-03-09");
        assert_eq!(profile.daily_streak, 2);

        // skipped a day
        profile.record_daily("2024-03-12", "2024-03-11");
        assert_eq!(profile.daily_streak, 1);
        assert_eq!(profile.last_daily.as_deref(), Some("2024-03-12"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("snapstack-test-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.read("missing").unwrap(), None);

        store.write("blob", "hello").unwrap();
        assert_eq!(store.read("blob").unwrap().as_deref(), Some("hello"));

        store.write("blob", "again").unwrap();
        assert_eq!(store.read("blob").unwrap().as_deref(), Some("again"));

        let _ = fs::remove_dir_all(&dir);
    }
}
