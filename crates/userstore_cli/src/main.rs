//! `userstore` entry point.
//!
//! # Responsibility
//! - Resolve the store location and logging setup from flags/environment.
//! - Run one store operation per invocation and print its result.
//! - In `serve` mode (the default), stay alive until interrupted.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use userstore_core::{default_log_level, init_logging, RecordsStore, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "userstore")]
#[command(version = userstore_core::core_version())]
#[command(about = "Seeded user records store with purge and anonymize maintenance", long_about = None)]
struct Args {
    /// Store file path (falls back to DATABASE_PATH, then /data/test_users.db)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when omitted)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Initialize, list, then wait for Ctrl-C
    Serve,
    /// Create the table and seed it when empty
    Init,
    /// Print every record
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all records
    Purge,
    /// Overwrite names and emails with placeholders
    Anonymize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, args.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let store = RecordsStore::new(store_config(&args));
    info!(
        "event=cli_start module=cli status=ok command={:?}",
        args.command
    );

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&store),
        Command::Init => init(&store),
        Command::List { json } => list(&store, json),
        Command::Purge => {
            let deleted = store.purge().context("failed to purge users")?;
            println!("{}", render::purge_line(deleted));
            Ok(())
        }
        Command::Anonymize => {
            let changed = store.anonymize().context("failed to anonymize users")?;
            println!("{}", render::anonymize_line(changed));
            Ok(())
        }
    }
}

fn store_config(args: &Args) -> StoreConfig {
    args.db_path
        .clone()
        .map(StoreConfig::new)
        .unwrap_or_else(StoreConfig::from_env)
}

fn init(store: &RecordsStore) -> Result<()> {
    println!("{}", init_line(store)?);
    Ok(())
}

fn init_line(store: &RecordsStore) -> Result<String> {
    let outcome = store.initialize().with_context(|| {
        format!(
            "failed to initialize store at `{}`",
            store.config().path().display()
        )
    })?;
    Ok(render::init_outcome_line(&outcome))
}

fn list(store: &RecordsStore, json: bool) -> Result<()> {
    if json {
        let users = store.list().context("failed to list users")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&users).context("failed to encode users")?
        );
        return Ok(());
    }
    for line in listing_lines(store)? {
        println!("{line}");
    }
    Ok(())
}

fn listing_lines(store: &RecordsStore) -> Result<Vec<String>> {
    let users = store.list().context("failed to list users")?;
    Ok(render::user_listing(&users))
}

/// Initializes then lists; returns the lines `serve` prints before idling.
fn startup_lines(store: &RecordsStore) -> Result<Vec<String>> {
    let mut lines = vec![init_line(store)?];
    lines.extend(listing_lines(store)?);
    Ok(lines)
}

fn serve(store: &RecordsStore) -> Result<()> {
    for line in startup_lines(store)? {
        println!("{line}");
    }

    println!("Waiting for interrupt (Ctrl-C) to exit");
    wait_for_interrupt()?;
    info!("event=cli_stop module=cli status=ok reason=interrupt");
    Ok(())
}

fn wait_for_interrupt() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build signal runtime")?;
    runtime
        .block_on(tokio::signal::ctrl_c())
        .context("failed to listen for interrupt signal")
}

#[cfg(test)]
mod tests {
    use super::{startup_lines, store_config, Args, Command};
    use clap::{CommandFactory, Parser};
    use std::path::Path;
    use userstore_core::{core_version, RecordsStore, StoreConfig};

    #[test]
    fn startup_initializes_then_lists_seed_users() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordsStore::new(StoreConfig::new(dir.path().join("users.db")));

        let first = startup_lines(&store).unwrap();
        assert_eq!(
            first,
            vec![
                "Database initialized with test users".to_string(),
                "Users in database (2):".to_string(),
                "ID: 1, Name: Anna Andersson, Email: anna@test.se".to_string(),
                "ID: 2, Name: Bo Bengtsson, Email: bo@test.se".to_string(),
            ]
        );

        let restart = startup_lines(&store).unwrap();
        assert_eq!(restart[0], "Database already contains 2 users");
        assert_eq!(restart.len(), 4);
    }

    #[test]
    fn startup_reports_uncreatable_store_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("users.db");
        let store = RecordsStore::new(StoreConfig::new(&path));

        let err = startup_lines(&store).unwrap_err();
        assert!(format!("{err:#}").contains("failed to initialize store"));
        assert!(!path.exists());
    }

    #[test]
    fn version_flag_reports_core_version() {
        assert_eq!(Args::command().get_version(), Some(core_version()));
    }

    #[test]
    fn no_subcommand_means_serve() {
        let args = Args::try_parse_from(["userstore"]).unwrap();
        assert_eq!(args.command, None);
    }

    #[test]
    fn db_path_flag_wins_over_environment() {
        let args =
            Args::try_parse_from(["userstore", "purge", "--db-path", "/tmp/x.db"]).unwrap();
        assert_eq!(args.command, Some(Command::Purge));
        assert_eq!(store_config(&args).path(), Path::new("/tmp/x.db"));
    }

    #[test]
    fn list_accepts_json_flag() {
        let args = Args::try_parse_from(["userstore", "list", "--json"]).unwrap();
        assert_eq!(args.command, Some(Command::List { json: true }));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["userstore", "drop-table"]).is_err());
    }
}
