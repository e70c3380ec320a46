// ABOUTME: Admin credential rows. The password column holds an argon2 PHC string;
// ABOUTME: rows written by older deployments may still hold plaintext until the next login upgrades them.
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::MediaStore;

#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Insert a credential row, treating a duplicate username as "already there".
/// Returns true when a row was created.
pub(super) fn insert_ignoring_duplicate(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<bool> {
    match conn.execute(
        "INSERT INTO admin (username, password) VALUES (?1, ?2)",
        params![username, password],
    ) {
        Ok(_) => Ok(true),
        Err(rusqlite::Error::SqliteFailure(sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Ok(false)
        }
        Err(e) => Err(e).context("Failed to insert admin credential"),
    }
}

impl MediaStore {
    pub fn find_admin(&self, username: &str) -> Result<Option<AdminCredential>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, username, password FROM admin WHERE username = ?1",
            params![username],
            |row| {
                Ok(AdminCredential {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password: row.get(2)?,
                })
            },
        )
        .optional()
        .context("Failed to query admin credential")
    }

    /// Replace the stored password for `username`. Returns false for an unknown user.
    pub fn set_admin_password(&self, username: &str, password_hash: &str) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn
            .execute(
                "UPDATE admin SET password = ?1 WHERE username = ?2",
                params![password_hash, username],
            )
            .context("Failed to update admin password")?;
        Ok(changed > 0)
    }

    pub fn count_admins(&self) -> Result<i64> {
        let conn = self.connect()?;
        conn.query_row("SELECT COUNT(*) FROM admin", [], |row| row.get(0))
            .context("Failed to count admin credentials")
    }
}
