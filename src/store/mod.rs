// ABOUTME: SQLite-backed storage for press releases, coverage links, gallery images and videos.
// ABOUTME: Each operation opens its own connection; bootstrap creates the schema and seeds first-run rows.
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

mod credentials;
mod gallery;
mod media;
mod press;
mod video;

pub use credentials::AdminCredential;
pub use gallery::GalleryImage;
pub use media::MediaCoverage;
pub use press::PressRelease;
pub use video::Video;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS press_releases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        release_date TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS media_coverage (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS image_gallery (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        image_path TEXT NOT NULL,
        description TEXT,
        uploaded_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS videos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        video_url TEXT NOT NULL,
        description TEXT,
        uploaded_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS admin (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )",
];

const SAMPLE_PRESS: &[(&str, &str, &str)] = &[
    (
        "NGO Launches New Initiative to Support Underprivileged Children",
        "Our NGO is excited to announce a new initiative aimed at providing education and resources to children from low-income families.",
        "2025-01-15",
    ),
    (
        "NGO Partners with Local Communities for Clean Water Project",
        "In partnership with local communities, our NGO has launched a clean water initiative in rural areas.",
        "2024-12-12",
    ),
];

const SAMPLE_MEDIA: &[(&str, &str)] = &[
    (
        "Our NGO Featured in Global News Network",
        "https://example.com/article1",
    ),
    (
        "TV Interview on Our Recent Environmental Initiative",
        "https://example.com/article2",
    ),
];

const SAMPLE_VIDEO: (&str, &str) = (
    "https://www.youtube.com/embed/dQw4w9WgXcQ",
    "NGO Impact Highlights 2024",
);

/// What `MediaStore::bootstrap` changed on this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub samples_seeded: bool,
}

/// Every row of every content table, newest first, as shown on the public
/// page and the admin dashboard
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    pub press_releases: Vec<PressRelease>,
    pub media_coverage: Vec<MediaCoverage>,
    pub images: Vec<GalleryImage>,
    pub videos: Vec<Video>,
}

#[derive(Clone)]
pub struct MediaStore {
    db_path: PathBuf,
}

impl MediaStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection for a single unit of work
    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).with_context(|| {
            format!(
                "Failed to open SQLite database at {}",
                self.db_path.display()
            )
        })
    }

    /// Create missing tables, seed the admin credential and first-run sample rows.
    ///
    /// `admin_password_hash` is stored verbatim; hashing is the caller's job.
    /// A pre-existing admin row with the same username is left untouched.
    pub fn bootstrap(
        &self,
        admin_username: &str,
        admin_password_hash: &str,
    ) -> Result<BootstrapReport> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        for statement in SCHEMA {
            tx.execute(statement, [])
                .context("Failed to create schema")?;
        }

        let admin_created =
            credentials::insert_ignoring_duplicate(&tx, admin_username, admin_password_hash)?;

        let press_count: i64 =
            tx.query_row("SELECT COUNT(*) FROM press_releases", [], |row| row.get(0))?;
        let samples_seeded = press_count == 0;
        if samples_seeded {
            for (title, description, release_date) in SAMPLE_PRESS {
                tx.execute(
                    "INSERT INTO press_releases (title, description, release_date) VALUES (?1, ?2, ?3)",
                    params![title, description, release_date],
                )?;
            }
            for (title, url) in SAMPLE_MEDIA {
                tx.execute(
                    "INSERT INTO media_coverage (title, url) VALUES (?1, ?2)",
                    params![title, url],
                )?;
            }
            tx.execute(
                "INSERT INTO videos (video_url, description) VALUES (?1, ?2)",
                params![SAMPLE_VIDEO.0, SAMPLE_VIDEO.1],
            )?;
        }

        tx.commit().context("Failed to commit bootstrap")?;

        tracing::info!(
            db = %self.db_path.display(),
            admin_created,
            samples_seeded,
            "Database bootstrapped"
        );

        Ok(BootstrapReport {
            admin_created,
            samples_seeded,
        })
    }

    /// Load all four content tables in display order
    pub fn library(&self) -> Result<MediaLibrary> {
        let conn = self.connect()?;
        Ok(MediaLibrary {
            press_releases: press::list(&conn)?,
            media_coverage: media::list(&conn)?,
            images: gallery::list(&conn)?,
            videos: video::list(&conn)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn bootstrapped_store() -> (TempDir, MediaStore) {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path().join("media.db"));
        store.bootstrap("admin", "seed-hash").unwrap();
        (dir, store)
    }

    #[test]
    fn test_bootstrap_seeds_empty_database() {
        let (_dir, store) = bootstrapped_store();

        let library = store.library().unwrap();
        assert_eq!(library.press_releases.len(), 2);
        assert_eq!(library.media_coverage.len(), 2);
        assert_eq!(library.videos.len(), 1);
        assert!(library.images.is_empty());
        assert_eq!(store.count_admins().unwrap(), 1);
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let (_dir, store) = bootstrapped_store();

        let report = store.bootstrap("admin", "another-hash").unwrap();
        assert!(!report.admin_created);
        assert!(!report.samples_seeded);

        let library = store.library().unwrap();
        assert_eq!(library.press_releases.len(), 2);
        assert_eq!(library.media_coverage.len(), 2);
        assert_eq!(library.videos.len(), 1);
        assert_eq!(store.count_admins().unwrap(), 1);

        // The original credential survives a re-run
        let admin = store.find_admin("admin").unwrap().unwrap();
        assert_eq!(admin.password, "seed-hash");
    }

    #[test]
    fn test_bootstrap_skips_samples_when_press_exists() {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path().join("media.db"));
        store.bootstrap("admin", "h").unwrap();

        // Clearing media but keeping press rows must not reseed anything
        for item in store.library().unwrap().media_coverage {
            store.delete_media_coverage(item.id).unwrap();
        }
        let report = store.bootstrap("admin", "h").unwrap();
        assert!(!report.samples_seeded);
        assert!(store.library().unwrap().media_coverage.is_empty());
    }

    #[test]
    fn test_bootstrap_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path().join("nested").join("data").join("media.db"));
        store.bootstrap("admin", "h").unwrap();
        assert!(store.db_path().exists());
    }

    #[test]
    fn test_seeded_press_ordered_by_release_date() {
        let (_dir, store) = bootstrapped_store();
        let press = store.library().unwrap().press_releases;
        assert_eq!(press[0].release_date, "2025-01-15");
        assert_eq!(press[1].release_date, "2024-12-12");
    }
}
