//! Deskshortcut - put a launcher on the desktop.
//!
//! This binary is a thin host around `deskshortcut-core`: it turns command-line
//! arguments into a configuration, runs one shortcut operation and reports the
//! terminal outcome.

use anyhow::Result;
use clap::Parser;
use deskshortcut_core::{
    Identity, ShortcutConfig, ShortcutMaker, ShortcutMode, ShortcutOutcome,
};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "deskshortcut")]
#[command(about = "Create a desktop shortcut for an application launcher")]
struct Args {
    /// Launcher file (e.g. /usr/share/applications/firefox.desktop)
    launcher: PathBuf,

    /// Shortcut kind: "copy" or "symlink"
    #[arg(short, long, default_value = "copy")]
    mode: ShortcutMode,

    /// Directory to place the shortcut in (defaults to the user's desktop)
    #[arg(long)]
    desktop_dir: Option<PathBuf>,

    /// Command used for privilege escalation, split on whitespace
    #[arg(long, default_value = "pkexec")]
    escalation_command: String,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn build_config(args: &Args) -> deskshortcut_core::Result<ShortcutConfig> {
    let config = match &args.desktop_dir {
        Some(dir) => ShortcutConfig::new(Identity::current()?, dir, args.mode),
        None => ShortcutConfig::from_environment(args.mode)?,
    };
    Ok(config.with_escalation_prefix(args.escalation_command.split_whitespace()))
}

fn report(outcome: &ShortcutOutcome) {
    match (&outcome.target, &outcome.failure) {
        (Some(target), None) => info!("Shortcut created: {}", target.path.display()),
        (_, Some(failure)) => error!(
            "Failed to create shortcut for {} ({:?}): {}",
            outcome.source.display(),
            failure.kind,
            failure.message
        ),
        (None, None) => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    };
    info!(
        "Creating {} shortcut for {} in {}",
        args.mode,
        args.launcher.display(),
        config.desktop_dir.display()
    );

    let maker = match ShortcutMaker::new(config) {
        Ok(maker) => maker,
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    let outcome = maker.spawn_shortcut(&args.launcher, args.mode).await?;
    report(&outcome);

    if args.json {
        // Intentional stdout: machine-readable result for the calling host
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    let code = outcome.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
