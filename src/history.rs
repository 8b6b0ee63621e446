use crate::app_dirs::AppDirs;
use crate::util::mean;
use chrono::{DateTime, Duration, Local};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One persisted session result. Immutable once appended to the log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub mode: String,
    pub score: i32,
    pub date: DateTime<Local>,
}

impl ScoreEntry {
    pub fn new(name: &str, mode: &str, score: i32) -> Self {
        Self::with_date(name, mode, score, Local::now())
    }

    pub fn with_date(name: &str, mode: &str, score: i32, date: DateTime<Local>) -> Self {
        let trimmed = name.trim();
        Self {
            name: if trimmed.is_empty() {
                "Unknown".to_string()
            } else {
                trimmed.to_string()
            },
            mode: mode.to_string(),
            score,
            date,
        }
    }
}

/// Arithmetic mean of entry scores, rounded to the nearest integer.
/// Empty input averages to 0.
pub fn average(entries: &[ScoreEntry]) -> i32 {
    let scores: Vec<f64> = entries.iter().map(|e| e.score as f64).collect();
    mean(&scores).map(|m| m.round() as i32).unwrap_or(0)
}

pub trait ScoreStore {
    fn load(&self) -> Vec<ScoreEntry>;
    fn save(&self, entries: &[ScoreEntry]) -> std::io::Result<()>;
}

/// Score log persisted as a JSON array. A missing or corrupt file loads
/// as an empty log.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::scores_path().unwrap_or_else(|| PathBuf::from("cuedrill_scores.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Vec<ScoreEntry> {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(entries) = serde_json::from_slice::<Vec<ScoreEntry>>(&bytes) {
                return entries;
            }
        }
        Vec::new()
    }

    fn save(&self, entries: &[ScoreEntry]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(entries).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

/// Append-only log of score entries with derived views. Writes through
/// to its store on every mutation when one is attached.
pub struct HistoryLog {
    entries: Vec<ScoreEntry>,
    store: Option<Box<dyn ScoreStore>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            store: None,
        }
    }

    /// Load the log from a store and keep it for write-through saves.
    pub fn with_store(store: Box<dyn ScoreStore>) -> Self {
        let entries = store.load();
        Self {
            entries,
            store: Some(store),
        }
    }

    pub fn append(&mut self, entry: ScoreEntry) {
        self.entries.push(entry);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save(&self.entries);
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first; insertion order breaks timestamp ties.
    pub fn sorted_by_date_desc(&self) -> Vec<ScoreEntry> {
        self.entries
            .iter()
            .cloned()
            .sorted_by(|a, b| b.date.cmp(&a.date))
            .collect()
    }

    /// Entries dated within the last `days` days.
    pub fn filter_by_window(&self, days: i64) -> Vec<ScoreEntry> {
        let cutoff = Local::now() - Duration::days(days);
        self.entries
            .iter()
            .filter(|e| e.date >= cutoff)
            .cloned()
            .collect()
    }

    /// Best `n` finishes, highest score first.
    pub fn top_n(&self, n: usize) -> Vec<ScoreEntry> {
        self.entries
            .iter()
            .cloned()
            .sorted_by(|a, b| b.score.cmp(&a.score))
            .take(n)
            .collect()
    }

    /// The `n` most recent entries.
    pub fn latest_n(&self, n: usize) -> Vec<ScoreEntry> {
        self.sorted_by_date_desc().into_iter().take(n).collect()
    }

    /// Entries recorded under a player's name (exact match, trimmed).
    pub fn for_player(&self, name: &str) -> Vec<ScoreEntry> {
        let trimmed = name.trim();
        self.entries
            .iter()
            .filter(|e| e.name == trimmed)
            .cloned()
            .collect()
    }

    /// The high-scores panel derivation: one player's rounded average
    /// over the last 30/182/365 days and all time. A blank name has no
    /// entries and averages to zeroes.
    pub fn averages_for_player(&self, name: &str) -> PlayerAverages {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return PlayerAverages::default();
        }
        let mine = self.for_player(trimmed);
        let windowed = |days: i64| {
            let cutoff = Local::now() - Duration::days(days);
            let recent: Vec<ScoreEntry> =
                mine.iter().filter(|e| e.date >= cutoff).cloned().collect();
            average(&recent)
        };
        PlayerAverages {
            last_30_days: windowed(30),
            last_6_months: windowed(182),
            last_12_months: windowed(365),
            all_time: average(&mine),
        }
    }
}

/// Windowed averages for a single player's score entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerAverages {
    pub last_30_days: i32,
    pub last_6_months: i32,
    pub last_12_months: i32,
    pub all_time: i32,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}
