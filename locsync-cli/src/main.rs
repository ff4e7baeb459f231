mod patterns;
mod sync;
mod validation;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    patterns::run_patterns_command,
    sync::{SyncOptions, run_sync_command},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Write .lproj resources and Info.plist from i18n JSON sources.
    Sync {
        /// Directory containing `<lang>.json` and one `<lang>.default.json`
        #[arg(short, long)]
        i18n: String,
        /// Platform resource directory (e.g. App_Resources/iOS)
        #[arg(short, long)]
        resources: String,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print glob patterns matching generated resources.
    Patterns {
        /// Platform resource directory (e.g. App_Resources/iOS)
        #[arg(short, long)]
        resources: String,
    },
}

fn main() {
    // Logs go to stderr; stdout carries signals only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("locsync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Sync {
            i18n,
            resources,
            json,
        } => run_sync_command(SyncOptions {
            i18n,
            resources,
            json,
        }),
        Commands::Patterns { resources } => run_patterns_command(&resources),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
