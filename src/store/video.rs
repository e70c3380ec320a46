// ABOUTME: Video embed rows: an embeddable URL plus an optional caption.
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::MediaStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: i64,
    pub video_url: String,
    pub description: String,
    pub uploaded_at: String,
}

impl Video {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            video_url: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            uploaded_at: row.get(3)?,
        })
    }
}

pub(super) fn list(conn: &Connection) -> Result<Vec<Video>> {
    let mut stmt = conn.prepare(
        "SELECT id, video_url, description, uploaded_at FROM videos ORDER BY uploaded_at DESC, id DESC",
    )?;
    let rows = stmt
        .query_map([], Video::from_row)?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list videos")?;
    Ok(rows)
}

impl MediaStore {
    pub fn get_video(&self, id: i64) -> Result<Option<Video>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, video_url, description, uploaded_at FROM videos WHERE id = ?1",
            params![id],
            Video::from_row,
        )
        .optional()
        .context("Failed to load video")
    }

    pub fn insert_video(&self, video_url: &str, description: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO videos (video_url, description) VALUES (?1, ?2)",
            params![video_url, description],
        )
        .context("Failed to insert video")?;
        let id = conn.last_insert_rowid();
        tracing::info!(id, video_url = %video_url, "Video added");
        Ok(id)
    }

    pub fn update_video(&self, id: i64, video_url: &str, description: &str) -> Result<usize> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                "UPDATE videos SET video_url = ?1, description = ?2 WHERE id = ?3",
                params![video_url, description, id],
            )
            .context("Failed to update video")?;
        tracing::info!(id, changed, "Video updated");
        Ok(changed)
    }

    pub fn delete_video(&self, id: i64) -> Result<usize> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM videos WHERE id = ?1", params![id])
            .context("Failed to delete video")?;
        tracing::info!(id, deleted, "Video deleted");
        Ok(deleted)
    }
}
