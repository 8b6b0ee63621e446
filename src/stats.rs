use crate::app_dirs::AppDirs;
use crate::cards::CardId;
use crate::scoring::Outcome;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::PathBuf;

/// The recent-drills log keeps at most this many distinct cards.
pub const RECENT_CAP: usize = 10;

/// Lifetime make/miss/scratch tallies for one card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStats {
    pub makes: u32,
    pub misses: u32,
    pub scratches: u32,
}

impl CardStats {
    pub fn total(&self) -> u32 {
        self.makes + self.misses + self.scratches
    }
}

/// One entry of the recently-played log
#[derive(Debug, Clone)]
pub struct RecentDrill {
    pub id: CardId,
    pub mode: String,
    pub date: DateTime<Local>,
}

/// Database manager for per-card statistics and the recent-drills log
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Initialize the database connection and create tables if needed
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("cuedrill_stats.db"));

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        let conn = Connection::open(&db_path)?;
        Self::with_connection(conn)
    }

    /// Build a stats DB over an existing connection (tests use an
    /// in-memory one)
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS card_stats (
                card_id INTEGER PRIMARY KEY,
                makes INTEGER NOT NULL DEFAULT 0,
                misses INTEGER NOT NULL DEFAULT 0,
                scratches INTEGER NOT NULL DEFAULT 0
            )
            "#,
            [],
        )?;

        // REPLACE on card_id gives each touch a fresh seq, so seq order
        // is recency order even when timestamps collide
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS recent_drills (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                card_id INTEGER NOT NULL UNIQUE,
                mode TEXT NOT NULL,
                played_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        Ok(StatsDb { conn })
    }

    /// Tally one outcome against a card. Shot-count outcomes on drill 49
    /// fold into the same three counters.
    pub fn record_outcome(&self, id: CardId, outcome: Outcome) -> Result<()> {
        let (makes, misses, scratches): (u32, u32, u32) = match outcome {
            Outcome::Make | Outcome::ThreeShots | Outcome::FourShots => (1, 0, 0),
            Outcome::Miss | Outcome::OverFour => (0, 1, 0),
            Outcome::Scratch | Outcome::ScratchSpecial => (0, 0, 1),
        };

        self.conn.execute(
            r#"
            INSERT INTO card_stats (card_id, makes, misses, scratches)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(card_id) DO UPDATE SET
                makes = makes + ?2,
                misses = misses + ?3,
                scratches = scratches + ?4
            "#,
            params![id, makes, misses, scratches],
        )?;

        Ok(())
    }

    /// Get tallies for a card; unseen cards report all zeroes
    pub fn card_stats(&self, id: CardId) -> Result<CardStats> {
        let stats = self
            .conn
            .query_row(
                "SELECT makes, misses, scratches FROM card_stats WHERE card_id = ?1",
                [id],
                |row| {
                    Ok(CardStats {
                        makes: row.get(0)?,
                        misses: row.get(1)?,
                        scratches: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(stats.unwrap_or_default())
    }

    /// Percentage of makes over all recorded outcomes for a card
    pub fn make_rate(&self, id: CardId) -> Result<f64> {
        let stats = self.card_stats(id)?;
        if stats.total() == 0 {
            Ok(0.0)
        } else {
            Ok((stats.makes as f64 / stats.total() as f64) * 100.0)
        }
    }

    /// Log a card as recently played, bumping it to the front and
    /// trimming the log to [`RECENT_CAP`] cards
    pub fn touch_recent(&self, id: CardId, mode: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO recent_drills (card_id, mode, played_at) VALUES (?1, ?2, ?3)",
            params![id, mode, Local::now().to_rfc3339()],
        )?;

        self.conn.execute(
            r#"
            DELETE FROM recent_drills WHERE seq NOT IN (
                SELECT seq FROM recent_drills ORDER BY seq DESC LIMIT ?1
            )
            "#,
            [RECENT_CAP],
        )?;

        Ok(())
    }

    /// Most recently played cards first, at most `limit` of them
    pub fn recent_drills(&self, limit: usize) -> Result<Vec<RecentDrill>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT card_id, mode, played_at
            FROM recent_drills
            ORDER BY seq DESC
            LIMIT ?1
            "#,
        )?;

        let drill_iter = stmt.query_map([limit], |row| {
            let played_at: String = row.get(2)?;
            let date = DateTime::parse_from_rfc3339(&played_at)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        2,
                        "played_at".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);

            Ok(RecentDrill {
                id: row.get(0)?,
                mode: row.get(1)?,
                date,
            })
        })?;

        let mut drills = Vec::new();
        for drill in drill_iter {
            drills.push(drill?);
        }

        Ok(drills)
    }

    /// Clear all statistics (for testing or reset purposes)
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM card_stats", [])?;
        self.conn.execute("DELETE FROM recent_drills", [])?;
        Ok(())
    }
}
