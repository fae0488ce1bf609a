use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

const CACHE_DIR: &str = "hoopline";
const LEDGER_FILE: &str = "posted.sqlite";

/// Local record of already-posted games. The remote duplicate search has a
/// documented indexing lag; this ledger closes that window for re-runs on
/// the same machine.
pub struct PostLedger {
    conn: Connection,
}

impl PostLedger {
    pub fn open_default() -> Result<Self> {
        let path = ledger_path().context("no usable cache directory")?;
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        Self::open(path)
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let conn = Connection::open(&path)
            .with_context(|| format!("open ledger at {}", path.display()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS posted_games (
                game_key TEXT PRIMARY KEY,
                posted_at INTEGER NOT NULL
            );",
        )
        .context("create ledger schema")?;
        Ok(Self { conn })
    }

    /// In-memory ledger for tests and dry runs.
    pub fn open_ephemeral() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory ledger")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS posted_games (
                game_key TEXT PRIMARY KEY,
                posted_at INTEGER NOT NULL
            );",
        )
        .context("create ledger schema")?;
        Ok(Self { conn })
    }

    pub fn was_posted(&self, game_key: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM posted_games WHERE game_key = ?1")
            .context("prepare ledger lookup")?;
        let found = stmt
            .exists(params![game_key])
            .context("query ledger")?;
        Ok(found)
    }

    pub fn mark_posted(&self, game_key: &str) -> Result<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.conn
            .execute(
                "INSERT INTO posted_games (game_key, posted_at) VALUES (?1, ?2)
                 ON CONFLICT(game_key) DO UPDATE SET posted_at = excluded.posted_at",
                params![game_key, now as i64],
            )
            .context("record posted game")?;
        Ok(())
    }
}

fn ledger_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(LEDGER_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(LEDGER_FILE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_then_lookup_round_trips() {
        let ledger = PostLedger::open_ephemeral().unwrap();
        let key = "#BOSvsMIA 101:99 on 2026-01-05";
        assert!(!ledger.was_posted(key).unwrap());
        ledger.mark_posted(key).unwrap();
        assert!(ledger.was_posted(key).unwrap());
        // Re-marking is idempotent.
        ledger.mark_posted(key).unwrap();
        assert!(ledger.was_posted(key).unwrap());
    }
}
