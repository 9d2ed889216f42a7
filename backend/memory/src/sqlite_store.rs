//! SQLite-backed durable learned-item store.
//!
//! Rows live in a `learned_items` table keyed by `(guild_id, message)`.
//! The connection sits behind an async mutex, so every statement runs
//! with exclusive access and single-key calls stay atomic.
use std::path::Path;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::LearnStore;
use crate::types::LearnedItem;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS learned_items (
     guild_id    TEXT NOT NULL,
     message     TEXT NOT NULL,
     response    TEXT NOT NULL,
     created_at  INTEGER NOT NULL,
     PRIMARY KEY (guild_id, message)
 );";

pub struct SqliteLearnStore {
    conn: Mutex<Connection>,
}

impl SqliteLearnStore {
    /// Create or open a database at the given path, creating missing parent
    /// directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("SqliteLearnStore opened at {:?}", path);
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory database (for tests).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

#[async_trait]
impl LearnStore for SqliteLearnStore {
    async fn get(&self, scope: &str, key: &str) -> Result<LearnedItem, StoreError> {
        let conn = self.conn.lock().await;
        let item = conn
            .query_row(
                "SELECT guild_id, message, response FROM learned_items
                 WHERE guild_id = ?1 AND message = ?2",
                params![scope, key],
                row_to_item,
            )
            .optional()?;

        item.ok_or_else(|| StoreError::not_found(scope, key))
    }

    async fn new_item(&self, item: LearnedItem) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO learned_items (guild_id, message, response, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                item.guild_id,
                item.message,
                item.response,
                chrono::Utc::now().timestamp(),
            ],
        )?;
        debug!(guild_id = %item.guild_id, item = %item.message, "Stored learned item");
        Ok(())
    }

    async fn insert_if_absent(&self, item: LearnedItem) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO learned_items (guild_id, message, response, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                item.guild_id,
                item.message,
                item.response,
                chrono::Utc::now().timestamp(),
            ],
        )?;
        debug!(guild_id = %item.guild_id, item = %item.message, inserted = changed > 0, "Conditional insert");
        Ok(changed > 0)
    }

    async fn remove(&self, scope: &str, key: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM learned_items WHERE guild_id = ?1 AND message = ?2",
            params![scope, key],
        )?;
        Ok(())
    }
}

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<LearnedItem> {
    Ok(LearnedItem {
        guild_id: row.get(0)?,
        message: row.get(1)?,
        response: row.get(2)?,
    })
}
