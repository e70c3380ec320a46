// ABOUTME: Gallery image rows. image_path holds only the stored filename inside the upload dir.
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::MediaStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub id: i64,
    pub image_path: String,
    pub description: String,
    pub uploaded_at: String,
}

impl GalleryImage {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            image_path: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            uploaded_at: row.get(3)?,
        })
    }
}

pub(super) fn list(conn: &Connection) -> Result<Vec<GalleryImage>> {
    let mut stmt = conn.prepare(
        "SELECT id, image_path, description, uploaded_at FROM image_gallery ORDER BY uploaded_at DESC, id DESC",
    )?;
    let rows = stmt
        .query_map([], GalleryImage::from_row)?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list gallery images")?;
    Ok(rows)
}

impl MediaStore {
    pub fn get_image(&self, id: i64) -> Result<Option<GalleryImage>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, image_path, description, uploaded_at FROM image_gallery WHERE id = ?1",
            params![id],
            GalleryImage::from_row,
        )
        .optional()
        .context("Failed to load gallery image")
    }

    pub fn insert_image(&self, image_path: &str, description: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO image_gallery (image_path, description) VALUES (?1, ?2)",
            params![image_path, description],
        )
        .context("Failed to insert gallery image")?;
        let id = conn.last_insert_rowid();
        tracing::info!(id, image_path = %image_path, "Gallery image added");
        Ok(id)
    }

    pub fn delete_image(&self, id: i64) -> Result<usize> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM image_gallery WHERE id = ?1", params![id])
            .context("Failed to delete gallery image")?;
        tracing::info!(id, deleted, "Gallery image deleted");
        Ok(deleted)
    }
}
