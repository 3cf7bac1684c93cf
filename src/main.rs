//! hbd CLI
//!
//! Themed, multi-page birthday greeting for the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use hbd::assets::{AssetList, DirAssetProvider};
use hbd::logging;
use hbd::shuffle::Scripted;
use hbd::tui::run::run;
use hbd::tui::state::App;
use hbd::types::{AppConfig, Now, PageId};

#[derive(Parser)]
#[command(name = "hbd")]
#[command(about = "Themed multi-page birthday greeting")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CommonArgs {
    /// Directory to load photos from
    #[arg(long, global = true, env = "HBD_ASSETS", default_value = "assets/images")]
    assets: PathBuf,

    /// Maximum directory depth for photo discovery
    #[arg(long, global = true, default_value_t = 1)]
    max_depth: usize,

    /// Start in dark mode
    #[arg(long, global = true)]
    dark: bool,

    /// Reference instant for the countdown (RFC 3339 or YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_reference)]
    since: Option<DateTime<Utc>>,

    /// Log file (default: <cache dir>/hbd/hbd.log)
    #[arg(long, global = true, env = "HBD_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive greeting (default)
    Run,

    /// Print a page's view document as JSON
    Dump {
        /// Page to render
        #[arg(long, value_enum, default_value = "home")]
        page: PageArg,
    },

    /// List the photos that would be shown
    Assets,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PageArg {
    Home,
    Subject,
    Author,
}

impl From<PageArg> for PageId {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::Home => PageId::Home,
            PageArg::Subject => PageId::Subject,
            PageArg::Author => PageId::Author,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli
        .common
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_file);
    let _guard = match logging::init(&log_file, &cli.common.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = build_config(&cli.common);

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&config),
        Commands::Dump { page } => cmd_dump(&config, page.into()),
        Commands::Assets => cmd_assets(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// CONFIG
// ============================================================================

fn build_config(args: &CommonArgs) -> AppConfig {
    let defaults = AppConfig::default();
    AppConfig {
        assets_dir: args.assets.clone(),
        max_depth: args.max_depth,
        reference: args.since.unwrap_or(defaults.reference),
        dark_mode: args.dark,
    }
}

/// Accept a full RFC 3339 timestamp or a bare date (midnight UTC).
fn parse_reference(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected RFC 3339 timestamp or YYYY-MM-DD, got '{}'", s))
}

fn load_assets(config: &AppConfig) -> AssetList {
    let provider = DirAssetProvider::new(&config.assets_dir).with_max_depth(config.max_depth);
    AssetList::load(&provider)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(config: &AppConfig) -> hbd::Result<()> {
    let assets = load_assets(config);
    run(config, assets)
}

fn cmd_dump(config: &AppConfig, page: PageId) -> hbd::Result<()> {
    let now = Now::capture();
    // Output is a snapshot: the initial vault selection, no randomness involved
    let mut app = App::new(
        load_assets(config),
        config.reference,
        config.dark_mode,
        Box::new(Scripted::new(Vec::new())),
        now,
    );
    app.router.navigate(page, now);

    let json = serde_json::to_string_pretty(&app.document())?;
    println!("{}", json);
    Ok(())
}

fn cmd_assets(config: &AppConfig) -> hbd::Result<()> {
    let assets = load_assets(config);

    println!("Directory: {}", config.assets_dir.display());
    if assets.discovered() == 0 {
        println!("No photos found; using placeholder.");
    }
    println!();

    for (i, photo) in assets.photos().iter().enumerate() {
        println!("  {:>3}. {}  ({})", i + 1, photo.title, photo.locator);
    }

    println!();
    println!("Subject portrait: {}", assets.subject_portrait().locator);
    println!("Author portrait:  {}", assets.author_portrait().locator);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_date_as_utc_midnight() {
        let dt = parse_reference("2023-08-01").unwrap();
        assert_eq!(dt, hbd::types::default_reference());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_reference("2023-08-01T05:30:00+05:30").unwrap();
        assert_eq!(dt, hbd::types::default_reference());
    }

    #[test]
    fn rejects_garbage_reference() {
        assert!(parse_reference("yesterday").is_err());
    }

    #[test]
    fn cli_defaults_to_run_with_default_reference() {
        let cli = Cli::try_parse_from(["hbd"]).unwrap();
        assert!(cli.command.is_none());
        let config = build_config(&cli.common);
        assert_eq!(config.reference, hbd::types::default_reference());
        assert!(!config.dark_mode);
    }

    #[test]
    fn dump_accepts_page_and_global_flags() {
        let cli = Cli::try_parse_from(["hbd", "dump", "--page", "author", "--dark"]).unwrap();
        assert!(cli.common.dark);
        match cli.command {
            Some(Commands::Dump { page }) => assert_eq!(PageId::from(page), PageId::Author),
            _ => panic!("Expected Dump command"),
        }
    }
}
