// ABOUTME: Press release rows: listing, lookup, insert, update and delete.
// ABOUTME: release_date is free text; listing sorts it lexically, which orders ISO dates correctly.
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::MediaStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressRelease {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub created_at: String,
}

impl PressRelease {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            release_date: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    /// Human-friendly release date ("January 15, 2025"), or the raw text
    /// when it isn't an ISO date
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d")
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|_| self.release_date.clone())
    }
}

const COLUMNS: &str = "id, title, description, release_date, created_at";

pub(super) fn list(conn: &Connection) -> Result<Vec<PressRelease>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM press_releases ORDER BY release_date DESC, id DESC"
    ))?;
    let rows = stmt
        .query_map([], PressRelease::from_row)?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list press releases")?;
    Ok(rows)
}

impl MediaStore {
    pub fn get_press_release(&self, id: i64) -> Result<Option<PressRelease>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM press_releases WHERE id = ?1"),
            params![id],
            PressRelease::from_row,
        )
        .optional()
        .context("Failed to load press release")
    }

    /// Insert a press release and return its id
    pub fn insert_press_release(
        &self,
        title: &str,
        description: &str,
        release_date: &str,
    ) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO press_releases (title, description, release_date) VALUES (?1, ?2, ?3)",
            params![title, description, release_date],
        )
        .context("Failed to insert press release")?;
        let id = conn.last_insert_rowid();
        tracing::info!(id, title = %title, "Press release added");
        Ok(id)
    }

    /// Update in place. Returns the number of rows touched (0 for an unknown id).
    pub fn update_press_release(
        &self,
        id: i64,
        title: &str,
        description: &str,
        release_date: &str,
    ) -> Result<usize> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                "UPDATE press_releases SET title = ?1, description = ?2, release_date = ?3 WHERE id = ?4",
                params![title, description, release_date, id],
            )
            .context("Failed to update press release")?;
        tracing::info!(id, changed, "Press release updated");
        Ok(changed)
    }

    pub fn delete_press_release(&self, id: i64) -> Result<usize> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM press_releases WHERE id = ?1", params![id])
            .context("Failed to delete press release")?;
        tracing::info!(id, deleted, "Press release deleted");
        Ok(deleted)
    }
}
