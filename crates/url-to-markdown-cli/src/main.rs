use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url_to_markdown_config::Settings;
use url_to_markdown_engine::{UrlSpan, analyze_urls, io};

mod convert;
mod settings;

use convert::{ConvertOptions, convert_notes};

#[derive(Parser)]
#[command(
    name = "url-to-markdown",
    version,
    about = "Turns bare URLs in markdown notes into titled links"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "URL_TO_MARKDOWN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the formatted links and raw URLs found in TEXT
    Scan { text: String },

    /// Convert raw URLs in every markdown file of a notes folder
    Convert {
        /// Notes folder; defaults to `notes_path` from the config file
        notes_path: Option<PathBuf>,

        /// Report what would change without writing files
        #[arg(long)]
        dry_run: bool,

        /// Convert only the first raw URL of each block
        #[arg(long)]
        first_only: bool,
    },

    /// Show the config file location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);

    match cli.command {
        Command::Scan { text } => {
            cmd_scan(&text);
            Ok(())
        }
        Command::Convert {
            notes_path,
            dry_run,
            first_only,
        } => cmd_convert(&config_path, notes_path, dry_run, first_only).await,
        Command::Config { init } => cmd_config(&config_path, init),
    }
}

fn load_settings(config_path: &Path) -> Result<(Settings, bool)> {
    let loaded = Settings::load_from_path(config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;
    let from_file = loaded.is_some();
    Ok((loaded.unwrap_or_default(), from_file))
}

fn cmd_scan(text: &str) {
    let analysis = analyze_urls(text);
    for link in &analysis.formatted {
        println!("formatted {}", describe(link));
    }
    for raw in &analysis.raw {
        println!("raw       {}", describe(raw));
    }
    if analysis.formatted.is_empty() && analysis.raw.is_empty() {
        println!("no URLs found");
    }
}

fn describe(found: &UrlSpan) -> String {
    match &found.title {
        Some(title) => format!("{}..{} {} [{title}]", found.start(), found.end(), found.url),
        None => format!("{}..{} {}", found.start(), found.end(), found.url),
    }
}

async fn cmd_convert(
    config_path: &Path,
    notes_path: Option<PathBuf>,
    dry_run: bool,
    first_only: bool,
) -> Result<()> {
    let (settings, from_config) = load_settings(config_path)?;

    let notes_path = match notes_path.or_else(|| settings.notes_path.clone()) {
        Some(path) => path,
        None => bail!(
            "No notes path given and none set in {}",
            config_path.display()
        ),
    };

    if let Err(e) = io::validate_notes_dir(&notes_path) {
        let source = if from_config {
            format!(" (config file '{}')", config_path.display())
        } else {
            String::new()
        };
        bail!(
            "Notes path '{}'{source} is invalid: {e}",
            notes_path.display()
        );
    }

    let resolver = Arc::new(settings::build_resolver(&settings)?);
    let options = ConvertOptions {
        limit: settings::rewrite_limit(&settings, first_only),
        suppression_window: settings.suppression_window(),
        dry_run,
    };

    let summary = convert_notes(&notes_path, resolver, &options).await?;
    println!(
        "{} of {} file(s) {}; {} block(s) converted, {} failed",
        summary.files_changed,
        summary.files_scanned,
        if dry_run { "would change" } else { "changed" },
        summary.blocks.updated,
        summary.blocks.failed,
    );

    if summary.blocks.failed > 0 {
        log::warn!("{} block(s) could not be processed", summary.blocks.failed);
    }
    Ok(())
}

fn cmd_config(config_path: &Path, init: bool) -> Result<()> {
    println!("config file: {}", config_path.display());

    if init {
        if config_path.exists() {
            println!("already exists, leaving it unchanged");
        } else {
            Settings::default().save_to_path(config_path)?;
            println!("wrote default settings");
        }
    }

    let (settings, from_file) = load_settings(config_path)?;
    if !from_file {
        println!("(not found, showing defaults)");
    }
    print!("{}", settings.to_toml()?);
    Ok(())
}
