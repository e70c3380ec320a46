// ABOUTME: Configuration parsing from TOML file with environment variable overrides
// ABOUTME: Validates required fields and provides sensible defaults for optional ones
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var that points at an explicit config file
pub const CONFIG_PATH_ENV: &str = "PRESSROOM_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "pressroom.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Credentials seeded into the admin table on first run
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

// Custom Debug impl to redact the seed password
impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily-rolling log files; stdout only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("media.db")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("static").join("uploads")
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl Config {
    /// Find the config file: PRESSROOM_CONFIG if set, else ./pressroom.toml
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(env_path));
        }

        let local_config = PathBuf::from(DEFAULT_CONFIG_FILE);
        local_config.exists().then_some(local_config)
    }

    /// Load configuration from the discovered file with environment variable overrides
    pub fn load() -> Result<Self> {
        Self::load_from(Self::find_config_file().as_deref())
    }

    /// Load configuration from an explicit file (or defaults when `None`),
    /// then apply env overrides and validate
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading configuration from file");
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Self::parse(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => Config::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections fall back to defaults
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str::<Config>(content).context("Invalid TOML configuration")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PRESSROOM_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("PRESSROOM_PORT") {
            self.server.port = val.parse().with_context(|| {
                format!("PRESSROOM_PORT must be a valid port number, got: {}", val)
            })?;
        }
        if let Ok(val) = std::env::var("PRESSROOM_DATABASE") {
            self.storage.database_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("PRESSROOM_UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("PRESSROOM_MAX_UPLOAD_BYTES") {
            self.storage.max_upload_bytes = val.parse().with_context(|| {
                format!("PRESSROOM_MAX_UPLOAD_BYTES must be a byte count, got: {}", val)
            })?;
        }
        if let Ok(val) = std::env::var("PRESSROOM_ADMIN_USERNAME") {
            self.admin.username = val;
        }
        if let Ok(val) = std::env::var("PRESSROOM_ADMIN_PASSWORD") {
            self.admin.password = val;
        }
        if let Ok(val) = std::env::var("PRESSROOM_LOG_DIR") {
            self.logging.dir = Some(PathBuf::from(val));
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.admin.username.trim().is_empty() {
            anyhow::bail!(
                "admin.username must not be empty (set in pressroom.toml or PRESSROOM_ADMIN_USERNAME)"
            );
        }
        if self.admin.password.is_empty() {
            anyhow::bail!(
                "admin.password must not be empty (set in pressroom.toml or PRESSROOM_ADMIN_PASSWORD)"
            );
        }
        if self.storage.max_upload_bytes == 0 {
            anyhow::bail!("storage.max_upload_bytes must be greater than zero");
        }
        Ok(())
    }

    /// Socket address string the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_deployment() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.database_path, PathBuf::from("media.db"));
        assert_eq!(config.storage.upload_dir, PathBuf::from("static/uploads"));
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "admin123");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
[server]
port = 8080

[storage]
upload_dir = "/srv/media/uploads"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.upload_dir, PathBuf::from("/srv/media/uploads"));
        assert_eq!(config.storage.database_path, PathBuf::from("media.db"));
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(Config::parse("[server]\nport = \"not-a-port\"").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_admin() {
        let mut config = Config::default();
        config.admin.username = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.admin.password = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_upload_limit() {
        let mut config = Config::default();
        config.storage.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_admin_debug_redacts_password() {
        let rendered = format!("{:?}", AdminConfig::default());
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("admin123"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_bind_addr() {
        let mut config = Config::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8000;
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }
}
