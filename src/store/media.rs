// ABOUTME: Media coverage rows: external article/interview links with a title.
// ABOUTME: URLs are stored as given; no format validation happens here.
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::MediaStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCoverage {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub created_at: String,
}

impl MediaCoverage {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

pub(super) fn list(conn: &Connection) -> Result<Vec<MediaCoverage>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, url, created_at FROM media_coverage ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt
        .query_map([], MediaCoverage::from_row)?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list media coverage")?;
    Ok(rows)
}

impl MediaStore {
    pub fn get_media_coverage(&self, id: i64) -> Result<Option<MediaCoverage>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, title, url, created_at FROM media_coverage WHERE id = ?1",
            params![id],
            MediaCoverage::from_row,
        )
        .optional()
        .context("Failed to load media coverage")
    }

    pub fn insert_media_coverage(&self, title: &str, url: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO media_coverage (title, url) VALUES (?1, ?2)",
            params![title, url],
        )
        .context("Failed to insert media coverage")?;
        let id = conn.last_insert_rowid();
        tracing::info!(id, title = %title, "Media coverage added");
        Ok(id)
    }

    pub fn update_media_coverage(&self, id: i64, title: &str, url: &str) -> Result<usize> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                "UPDATE media_coverage SET title = ?1, url = ?2 WHERE id = ?3",
                params![title, url, id],
            )
            .context("Failed to update media coverage")?;
        tracing::info!(id, changed, "Media coverage updated");
        Ok(changed)
    }

    pub fn delete_media_coverage(&self, id: i64) -> Result<usize> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM media_coverage WHERE id = ?1", params![id])
            .context("Failed to delete media coverage")?;
        tracing::info!(id, deleted, "Media coverage deleted");
        Ok(deleted)
    }
}
