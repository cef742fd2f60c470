// ABOUTME: Command-line tool for bootstrapping administrator accounts
// ABOUTME: Creates an admin user directly in the credential store or promotes an existing one
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin setup tool.
//!
//! The HTTP API only lets an existing admin manage users, so the first admin
//! has to be created out of band:
//!
//! ```bash
//! admin-setup create-admin-user --username admin --email admin@example.com --password 'secret'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use tracing::{error, info};
use weatherapp_server::{
    bootstrap::{ensure_admin_user, AdminAccount, AdminSetupAction, AdminSetupOutcome},
    config::DatabaseUrl,
    constants::{defaults, env_vars},
    crypto::PasswordHasher,
    database::Database,
};

#[derive(Parser)]
#[command(name = "admin-setup")]
#[command(about = "Weather app admin account management")]
struct AdminSetupArgs {
    #[command(subcommand)]
    command: AdminCommand,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create an admin user, or promote and re-password an existing one
    CreateAdminUser {
        /// Admin username
        #[arg(long)]
        username: String,

        /// Admin email address
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,

        /// Update the account if the username already exists, applying the
        /// new password and email
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AdminSetupArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let database_url = args
        .database_url
        .or_else(|| env::var(env_vars::DATABASE_URL).ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.into());
    let database_url = DatabaseUrl::parse_url(&database_url)?;

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url.to_connection_string())
        .await
        .context("Failed to open database")?;

    let hasher = PasswordHasher::new(
        env::var(env_vars::BCRYPT_COST)
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults::BCRYPT_COST),
    );

    match args.command {
        AdminCommand::CreateAdminUser {
            username,
            email,
            password,
            force,
        } => {
            let account = AdminAccount {
                username,
                email,
                password,
            };
            let outcome = match ensure_admin_user(&database, &hasher, account, force).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Admin setup failed: {:#}", e);
                    return Err(e);
                }
            };
            print_summary(&outcome);
        }
    }

    Ok(())
}

fn print_summary(outcome: &AdminSetupOutcome) {
    let action = match outcome.action {
        AdminSetupAction::Created => "created",
        AdminSetupAction::Updated => "updated",
    };
    println!("\nAdmin user {action}");
    println!("{}", "=".repeat(40));
    println!("   Username: {}", outcome.user.username);
    println!("   Email:    {}", outcome.user.email);
    println!("\nLog in with POST /api/login to receive the session cookie.");
}
