//! Clearance administration CLI
//!
//! Operator tooling over a snapshot principal store: seed the admin, manage
//! principals and their grants, and check what a principal may read or write.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clearance_core::{ClassificationLevel, PermissionAction};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{
    access,
    common::Session,
    init,
    permissions::{handle_permission_command, PermissionCommand},
    users::{handle_user_command, UserCommand},
};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "clearance")]
#[command(about = "Clearance - classification-based access control administration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".clearance/config.toml")]
    config: PathBuf,

    /// Act as this username instead of the configured admin
    #[arg(long = "as", global = true, value_name = "USERNAME")]
    acting_as: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the admin and backfill grants for principals without any
    Init,

    /// Principal management
    #[command(subcommand)]
    User(UserCommand),

    /// Grant-set replacement
    #[command(subcommand)]
    Permissions(PermissionCommand),

    /// Check whether a principal may perform an action at a level
    Check {
        /// Username or id
        user: String,

        /// read or write
        action: PermissionAction,

        /// Level (ordinal or name)
        level: ClassificationLevel,
    },

    /// Show the levels a principal may read and write
    Levels {
        /// Username or id
        user: String,
    },

    /// List classification levels and permission keys
    Vocabulary {
        /// Print the permission keys as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool, config: &CliConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CLEARANCE_LOG")
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_ascii_lowercase()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = CliConfig::load(&cli.config)?.merge_with_env();
    config.validate()?;
    init_tracing(cli.verbose, &config);

    if let Commands::Vocabulary { json } = cli.command {
        access::vocabulary(json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let session = Session::open(&config).await?;
    let acting_as = cli.acting_as.as_deref();

    match cli.command {
        Commands::Init => {
            init::run(&session).await?;
        }

        Commands::User(cmd) => {
            handle_user_command(cmd, &session, acting_as).await?;
        }

        Commands::Permissions(cmd) => {
            handle_permission_command(cmd, &session, acting_as).await?;
        }

        Commands::Check {
            user,
            action,
            level,
        } => {
            if !access::check(&session, &user, action, level).await? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Levels { user } => {
            access::levels(&session, &user).await?;
        }

        Commands::Vocabulary { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
