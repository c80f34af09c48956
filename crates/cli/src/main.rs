//! Tangerine Market CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tangerine-cli migrate
//!
//! # Seed the catalog with sample products
//! tangerine-cli seed
//!
//! # Grant or revoke the admin role
//! tangerine-cli role set --email admin@example.com --role admin
//! ```
//!
//! # Environment Variables
//!
//! - `TANGERINE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tangerine-cli")]
#[command(author, version, about = "Tangerine Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with sample products
    Seed,
    /// Manage user roles
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    /// Set a user's role
    Set {
        /// User email address
        #[arg(short, long)]
        email: String,

        /// Role name (`customer`, `admin`)
        #[arg(short, long)]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Role { action } => match action {
            RoleAction::Set { email, role } => {
                commands::role::set(&email, &role).await?;
            }
        },
    }
    Ok(())
}
