//! CLI administration tool for shorturl.
//!
//! Adds and looks up short URLs, dumps the store and checks the database
//! connection without going through the HTTP surface.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (same rules as the web form)
//! cargo run --bin admin -- add https://example.com/a/long/path
//!
//! # Look up a short code
//! cargo run --bin admin -- get za
//!
//! # Dump every record as NDJSON
//! cargo run --bin admin -- list > shorturls.ndjson
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Try commands against a throwaway in-memory store
//! cargo run --bin admin -- --memory add https://example.com/a/long/path
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shorturl::config`]. `ID_BASE` and
//! `CODE_CASE_INSENSITIVE` must match the server's for codes to agree.

use shorturl::api::dto::export::ExportRecord;
use shorturl::application::services::ShortUrlService;
use shorturl::config::{self, Config};
use shorturl::domain::entities::{Creator, ShortUrl};
use shorturl::domain::repositories::ShortUrlRepository;
use shorturl::infrastructure::persistence::MemoryShortUrlRepository;
use shorturl::server;
use shorturl::utils::codec::{CodecConfig, IdCodec};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use futures_util::TryStreamExt;
use std::io::Write;
use std::sync::Arc;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use an empty in-memory store instead of PostgreSQL
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL, or print its existing code
    Add {
        url: String,

        /// Creator address recorded with the new record
        #[arg(long, default_value = "::1")]
        host: String,

        /// Skip the length and scheme checks
        #[arg(long)]
        force: bool,
    },

    /// Look up a short code
    Get { code: String },

    /// Print every record as NDJSON
    List,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let (service, config) = if cli.memory {
        let repository: Arc<dyn ShortUrlRepository> = Arc::new(MemoryShortUrlRepository::new());
        let codec = IdCodec::new(memory_codec_config()).context("Invalid ID_BASE")?;
        (ShortUrlService::new(repository, codec), None)
    } else {
        let config = config::load_from_env()?;
        let pool = server::connect_pool(&config).await?;
        let repository: Arc<dyn ShortUrlRepository> = Arc::new(server::repository(pool, &config));
        let codec = IdCodec::new(config.codec_config()).context("Invalid ID_BASE")?;
        (ShortUrlService::new(repository, codec), Some(config))
    };

    match cli.command {
        Commands::Add { url, host, force } => {
            add(&service, config.as_ref(), &url, &host, force).await?
        }
        Commands::Get { code } => get(&service, config.as_ref(), &code).await?,
        Commands::List => list(&service).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

/// Codec settings in `--memory` mode, where no database config is required.
fn memory_codec_config() -> CodecConfig {
    let mut codec_config = CodecConfig::default();
    if let Some(radix) = std::env::var("ID_BASE").ok().and_then(|v| v.parse().ok()) {
        codec_config.radix = radix;
    }
    codec_config
}

async fn add(
    service: &ShortUrlService<dyn ShortUrlRepository>,
    config: Option<&Config>,
    url: &str,
    host: &str,
    force: bool,
) -> Result<()> {
    let creator = Creator::new(host, None);

    let result = if force {
        service.get_or_create(url, &creator).await
    } else {
        service.create_with_retry(url, &creator).await
    };

    let short_url = result.map_err(|e| anyhow::anyhow!("Failed to add short URL: {}", e))?;

    println!("{}", "✅ Short URL ready".green().bold());
    print_record(service, config, &short_url);

    Ok(())
}

async fn get(
    service: &ShortUrlService<dyn ShortUrlRepository>,
    config: Option<&Config>,
    code: &str,
) -> Result<()> {
    match service
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    {
        Some(short_url) => {
            print_record(service, config, &short_url);
            Ok(())
        }
        None => anyhow::bail!("Short URL {:?} not found", code),
    }
}

/// Writes the export format to stdout, one record per line.
async fn list(service: &ShortUrlService<dyn ShortUrlRepository>) -> Result<()> {
    let codec = *service.codec();
    let mut records = service.list();
    let mut stdout = std::io::stdout().lock();
    let mut count = 0u64;

    while let Some(short_url) = records
        .try_next()
        .await
        .map_err(|e| anyhow::anyhow!("Listing failed after {} records: {}", count, e))?
    {
        serde_json::to_writer(&mut stdout, &ExportRecord::from_short_url(short_url, &codec))?;
        writeln!(stdout)?;
        count += 1;
    }

    stdout.flush()?;
    eprintln!("{} {}", count.to_string().bright_white().bold(), "records".bright_black());

    Ok(())
}

async fn handle_db_action(
    action: DbAction,
    service: &ShortUrlService<dyn ShortUrlRepository>,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

fn print_record(
    service: &ShortUrlService<dyn ShortUrlRepository>,
    config: Option<&Config>,
    short_url: &ShortUrl,
) {
    let code = service.code_of(short_url);
    let link = match config {
        Some(config) => config.http_settings().base_url() + "/" + &code,
        None => format!("/{}", code),
    };

    println!("  Code:    {}", code.bright_yellow().bold());
    println!("  Link:    {}", link.cyan());
    println!("  Target:  {}", short_url.url);
    println!(
        "  Added:   {} by {}",
        short_url
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        short_url.creator.bright_black()
    );
}
