//! initdeck - A terminal dashboard for init.d services
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::{error, info, warn};

use initdeck_app::config::{default_config_path, load_settings};
use initdeck_app::Settings;
use initdeck_control::{catalog, is_elevated, program_available, ServiceController};
use initdeck_core::{classify, ServiceAction, ServiceRecord};

/// initdeck - inspect and control the services in an init script directory
#[derive(Parser, Debug)]
#[command(name = "initdeck", version)]
#[command(about = "A terminal dashboard for init.d services", long_about = None)]
struct Args {
    /// Service directory to scan (overrides the config file)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Control program timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Do not query status after start/stop/restart
    #[arg(long)]
    no_requery: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive dashboard (default)
    Tui,

    /// Print the service catalog and exit
    List {
        /// Query each service's status first
        #[arg(long)]
        status: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging(&initdeck_core::logging::log_directory());

    let args = Args::parse();
    let settings = resolve_settings(&args);

    if !is_elevated() {
        eprintln!("Warning: not running as root; start/stop/restart will likely fail.");
        warn!("Running without root privileges");
    }
    if !program_available(&settings.control.program) {
        warn!(
            "Control program '{}' not found on PATH",
            settings.control.program
        );
    }

    let result = match args.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let controller = settings.control.control_program();
            initdeck_tui::run(settings, controller)
                .await
                .map_err(Into::into)
        }
        Command::List { status, json } => list(&settings, status, json).await,
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    info!("initdeck exiting");
    result
}

/// File logging is best effort: without it the dashboard still runs
fn init_logging(log_dir: &Path) -> bool {
    match initdeck_core::logging::init_in(log_dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "Warning: logging disabled, cannot use {}: {}",
                log_dir.display(),
                e
            );
            false
        }
    }
}

/// Config file first, then command-line overrides
fn resolve_settings(args: &Args) -> Settings {
    let mut settings = match args.config.clone().or_else(default_config_path) {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };

    if let Some(dir) = &args.dir {
        settings.services.directory = dir.clone();
    }
    if let Some(secs) = args.timeout {
        settings.control.timeout_secs = secs;
    }
    if args.no_requery {
        settings.control.requery_after_action = false;
    }
    settings
}

async fn list(settings: &Settings, with_status: bool, json: bool) -> Result<()> {
    let mut records = catalog(&settings.services.directory)?;

    if with_status {
        let controller = settings.control.control_program();
        for record in &mut records {
            let result = controller.execute(&record.name, ServiceAction::Status).await;
            if result.succeeded {
                record.status = classify(&result.combined_output);
            } else {
                warn!(
                    "{}: {}",
                    result.summary(),
                    result.error_detail.as_deref().unwrap_or_default()
                );
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_table(&records, with_status);
    }
    Ok(())
}

fn print_table(records: &[ServiceRecord], with_status: bool) {
    if records.is_empty() {
        println!("No services found");
        return;
    }

    let width = records
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    if with_status {
        println!("{:<width$}  {:>12}  {:<11}  STATUS", "NAME", "SIZE", "PERMS");
    } else {
        println!("{:<width$}  {:>12}  PERMS", "NAME", "SIZE");
    }

    for record in records {
        let size = record.size_display();
        if with_status {
            println!(
                "{:<width$}  {:>12}  {:<11}  {}",
                record.name,
                size,
                record.permissions_display(),
                record.status
            );
        } else {
            println!(
                "{:<width$}  {:>12}  {}",
                record.name,
                size,
                record.permissions_display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let args = Args::parse_from([
            "initdeck",
            "--config",
            "/nonexistent/initdeck.toml",
            "--dir",
            "/srv/init",
            "--timeout",
            "5",
            "--no-requery",
        ]);
        let settings = resolve_settings(&args);

        assert_eq!(settings.services.directory, PathBuf::from("/srv/init"));
        assert_eq!(settings.control.timeout_secs, 5);
        assert!(!settings.control.requery_after_action);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_uncreatable_log_dir_is_not_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!init_logging(&file.path().join("logs")));
    }

    #[test]
    fn test_list_subcommand_flags() {
        let args = Args::parse_from(["initdeck", "list", "--status", "--json"]);
        assert!(matches!(
            args.command,
            Some(Command::List {
                status: true,
                json: true
            })
        ));
    }
}
