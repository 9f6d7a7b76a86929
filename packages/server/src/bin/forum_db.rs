//! CLI for managing the forum database schema
//!
//! Runs the embedded sqlx migrations and checks connectivity. Outputs JSON
//! so deployment tooling can parse the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forum_core::config::Config;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "forum_db")]
#[command(about = "Forum database schema CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Check database connectivity
    Check,
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn print_response(response: &Response) {
    // Fall back to plain output if serialization somehow fails
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("success: {}", response.success),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            print_response(&Response {
                success: true,
                message: Some("Migrations applied".to_string()),
            });
        }
        Commands::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&pool)
                .await
                .context("Connectivity check failed")?;
            print_response(&Response {
                success: true,
                message: Some("Database reachable".to_string()),
            });
        }
    }

    Ok(())
}
