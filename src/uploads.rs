// ABOUTME: Image upload handling: extension allow-list, filename sanitizing, and the upload directory.
// ABOUTME: Files are written under their sanitized name; colliding names overwrite.
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Extensions accepted for gallery uploads, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Device names Windows refuses as file stems; only guarded on Windows hosts
const WINDOWS_DEVICE_FILES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3",
];

/// True when the text after the last '.' is an allowed image extension
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to something safe to join onto the upload dir.
///
/// The name is NFKD-normalized so accented letters keep their base letter,
/// then remaining non-ASCII characters are dropped. Path separators split
/// words, whitespace runs become `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading or trailing `.`/`_` are trimmed. May return an empty
/// string.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default();
    if cfg!(windows)
        && !trimmed.is_empty()
        && WINDOWS_DEVICE_FILES.contains(&stem.to_ascii_uppercase().as_str())
    {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}

/// The directory gallery images are stored in and served from
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory (and parents) if missing
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!("Failed to create upload directory {}", self.root.display())
        })
    }

    /// Resolve a stored filename inside the upload dir.
    ///
    /// Only the final path component is used so a tampered database row
    /// cannot point outside the directory.
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        Path::new(filename)
            .file_name()
            .map(|name| self.root.join(name))
    }

    /// Write an already-sanitized file, replacing any existing file of the same name
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self
            .path_for(filename)
            .with_context(|| format!("Invalid upload filename: {:?}", filename))?;
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = data.len(), "Upload stored");
        Ok(path)
    }

    /// Best-effort removal. Returns whether a file was actually deleted;
    /// failures are logged and otherwise ignored.
    pub async fn remove(&self, filename: &str) -> bool {
        let Some(path) = self.path_for(filename) else {
            return false;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Upload removed");
                true
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Ignoring upload removal failure");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_allowed_file_extensions() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("photo.PNG"));
        assert!(allowed_file("scan.JpEg"));
        assert!(allowed_file("anim.gif"));
        assert!(allowed_file("modern.webp"));
        assert!(allowed_file("archive.tar.jpg"));

        assert!(!allowed_file("photo.exe"));
        assert!(!allowed_file("photo.png.exe"));
        assert!(!allowed_file("png"));
        assert!(!allowed_file("photo."));
        assert!(!allowed_file(""));
    }

    #[test]
    fn test_secure_filename_keeps_simple_names() {
        assert_eq!(secure_filename("photo.PNG"), "photo.PNG");
        assert_eq!(secure_filename("team-photo_2024.jpg"), "team-photo_2024.jpg");
    }

    #[test]
    fn test_secure_filename_whitespace_and_symbols() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
        assert_eq!(secure_filename("  field   day .png"), "field_day_.png");
        assert_eq!(secure_filename("a&b(1).jpg"), "ab1.jpg");
    }

    #[test]
    fn test_secure_filename_strips_traversal() {
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("..\\..\\boot.ini.png"), "boot.ini.png");
        assert_eq!(secure_filename("/absolute/path/img.gif"), "absolute_path_img.gif");
    }

    #[test]
    fn test_secure_filename_folds_accents() {
        assert_eq!(secure_filename("fotó.png"), "foto.png");
        assert_eq!(secure_filename("Café déjà vu.jpg"), "Cafe_deja_vu.jpg");
        assert_eq!(secure_filename("ﬁeld.gif"), "field.gif");
    }

    #[test]
    fn test_secure_filename_drops_non_ascii() {
        assert_eq!(secure_filename("日本.png"), "png");
    }

    #[test]
    fn test_secure_filename_windows_devices() {
        if cfg!(windows) {
            assert_eq!(secure_filename("con.png"), "_con.png");
            assert_eq!(secure_filename("NUL"), "_NUL");
        } else {
            assert_eq!(secure_filename("con.png"), "con.png");
            assert_eq!(secure_filename("NUL"), "NUL");
        }
        assert_eq!(secure_filename("console.png"), "console.png");
    }

    #[test]
    fn test_secure_filename_can_be_empty() {
        assert_eq!(secure_filename("..."), "");
        assert_eq!(secure_filename("___"), "");
        assert_eq!(secure_filename(""), "");
    }

    #[test]
    fn test_path_for_uses_final_component() {
        let dir = UploadDir::new("/srv/uploads");
        assert_eq!(
            dir.path_for("photo.png"),
            Some(PathBuf::from("/srv/uploads/photo.png"))
        );
        assert_eq!(
            dir.path_for("../../etc/passwd"),
            Some(PathBuf::from("/srv/uploads/passwd"))
        );
        assert_eq!(dir.path_for(".."), None);
        assert_eq!(dir.path_for(""), None);
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let tmp = TempDir::new().unwrap();
        let dir = UploadDir::new(tmp.path().join("uploads"));
        dir.ensure().unwrap();

        let path = dir.save("photo.png", b"\x89PNG").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");

        assert!(dir.remove("photo.png").await);
        assert!(!path.exists());

        // Second removal is a quiet no-op
        assert!(!dir.remove("photo.png").await);
    }

    #[tokio::test]
    async fn test_save_overwrites_colliding_name() {
        let tmp = TempDir::new().unwrap();
        let dir = UploadDir::new(tmp.path());

        dir.save("same.jpg", b"first").await.unwrap();
        let path = dir.save("same.jpg", b"second").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }
}
