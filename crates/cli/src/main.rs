//! ViralCopy CLI - operator tools for the dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Show or clear the persisted session
//! vc-cli session show
//! vc-cli session clear --data-dir .viralcopy
//!
//! # Validate the route table
//! vc-cli routes check
//!
//! # Print the navigation for a role
//! vc-cli nav --role admin
//!
//! # Dry-run the gate for a path
//! vc-cli authorize /admin --role user
//! ```
//!
//! # Commands
//!
//! - `session` - Inspect or clear the persisted session
//! - `routes check` - Validate the route table
//! - `nav` - Print composed navigation
//! - `authorize` - Resolve a navigation without starting the server

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use viralcopy_core::Role;

mod commands;

#[derive(Parser)]
#[command(name = "vc-cli")]
#[command(author, version, about = "ViralCopy dashboard tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or clear the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Route table tools
    Routes {
        #[command(subcommand)]
        action: RoutesAction,
    },
    /// Print the navigation composed for a role
    Nav {
        /// Role (`admin`, `user`); omit for no identity
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Resolve a path through the gate
    Authorize {
        /// Path to navigate to
        path: String,

        /// Role of the signed-in identity (`admin`, `user`); omit for anonymous
        #[arg(short, long)]
        role: Option<Role>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the stored identity
    Show {
        /// Session directory (defaults to `DASHBOARD_DATA_DIR` or `.viralcopy`)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Remove the stored identity
    Clear {
        /// Session directory (defaults to `DASHBOARD_DATA_DIR` or `.viralcopy`)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RoutesAction {
    /// Validate the standard route table
    Check,
}

fn main() {
    dotenvy::dotenv().ok();

    // Command output is logged, so default to info when RUST_LOG is unset
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Session { action } => match action {
            SessionAction::Show { data_dir } => {
                commands::session::show(&commands::session::data_dir(data_dir))?;
            }
            SessionAction::Clear { data_dir } => {
                commands::session::clear(&commands::session::data_dir(data_dir))?;
            }
        },
        Commands::Routes { action } => match action {
            RoutesAction::Check => {
                commands::routes::check()?;
            }
        },
        Commands::Nav { role } => {
            commands::routes::nav(role);
        }
        Commands::Authorize { path, role } => {
            commands::routes::authorize(&path, role)?;
        }
    }
    Ok(())
}
