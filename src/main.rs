// ABOUTME: Main entry point for the media page server
// ABOUTME: Parses the CLI, loads configuration, initializes logging and dispatches subcommands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pressroom::{admin::auth, config::Config, server, store::MediaStore};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// NGO media page: press releases, coverage links, gallery and videos
#[derive(Parser)]
#[command(name = "pressroom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to PRESSROOM_CONFIG or ./pressroom.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve,

    /// Create the database, seed the admin account and sample content, then exit
    Init,

    /// Replace an admin password with a freshly hashed one
    SetPassword {
        /// Admin username
        username: String,
        /// New password
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(Some(path))?,
        None => Config::load()?,
    };

    // Guard must outlive the server or buffered file logs are lost
    let _log_guard = init_logging(&config)?;

    tracing::info!(
        addr = %config.bind_addr(),
        database = %config.storage.database_path.display(),
        uploads = %config.storage.upload_dir.display(),
        admin = %config.admin.username,
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => server::serve(config).await,
        Commands::Init => {
            server::bootstrap(config)?;
            println!("Database ready.");
            Ok(())
        }
        Commands::SetPassword { username, password } => {
            set_password(&config, &username, &password)
        }
    }
}

fn init_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pressroom=info,tower_http=info".into());

    let Some(log_dir) = config.logging.dir.as_ref() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pressroom")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create log file appender")?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(Some(guard))
}

fn set_password(config: &Config, username: &str, password: &str) -> Result<()> {
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let store = MediaStore::new(&config.storage.database_path);
    let hash = auth::hash_password(password)?;
    if !store.set_admin_password(username, &hash)? {
        anyhow::bail!("No admin account named '{}'", username);
    }

    tracing::info!(username = %username, "Admin password updated");
    println!("Password updated for {}.", username);
    Ok(())
}
