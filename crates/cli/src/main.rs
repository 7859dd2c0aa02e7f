//! Kostpanel CLI - seeding and tenant management tools.
//!
//! # Usage
//!
//! ```bash
//! # Push the demo dataset into the backend
//! kost-cli seed --backend-url http://localhost:8080 -u admin -p 'Rahasia1'
//!
//! # Reset a tenant's password (policy-checked before it goes on the wire)
//! kost-cli tenant reset-password --id 7 --password 'BaruAman1' \
//!     --backend-url http://localhost:8080 -u admin -p 'Rahasia1'
//! ```
//!
//! # Commands
//!
//! - `seed` - Populate the backend with demo rooms, rules, FAQs and an
//!   announcement
//! - `tenant reset-password` - Admin-initiated password reset

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kost-cli")]
#[command(author, version, about = "Kostpanel CLI tools")]
struct Cli {
    /// Base URL of the kost backend (falls back to KOST_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Admin username for backend login
    #[arg(short = 'u', long, global = true, default_value = "admin")]
    username: String,

    /// Admin password for backend login
    #[arg(short = 'p', long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate the backend with the demo dataset
    Seed,
    /// Manage tenant accounts
    Tenant {
        #[command(subcommand)]
        action: TenantAction,
    },
}

#[derive(Subcommand)]
enum TenantAction {
    /// Reset a tenant's password
    ResetPassword {
        /// Tenant user id
        #[arg(long)]
        id: i64,

        /// New password (needs 8+ chars, an uppercase letter and a digit)
        #[arg(long)]
        password: String,

        /// Confirmation; defaults to the password itself
        #[arg(long)]
        confirm: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let backend = commands::connect(cli.backend_url.as_deref())?;
    let admin_password = cli
        .password
        .or_else(|| std::env::var("KOST_ADMIN_PASSWORD").ok())
        .ok_or("missing admin password (use --password or KOST_ADMIN_PASSWORD)")?;
    let token = backend.login(&cli.username, &admin_password).await?;

    match cli.command {
        Commands::Seed => commands::seed::run(&backend, &token).await?,
        Commands::Tenant { action } => match action {
            TenantAction::ResetPassword {
                id,
                password,
                confirm,
            } => {
                commands::tenant::reset_password(&backend, &token, id, &password, confirm.as_deref())
                    .await?;
            }
        },
    }

    Ok(())
}
