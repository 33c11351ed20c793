//! Interactive Dubilist posting CLI
//!
//! Drives the posting wizard (category → fields → media → review → publish)
//! and a handful of account and listing management commands against a
//! Dubilist backend.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;

#[derive(Parser)]
#[command(name = "dubilist")]
#[command(about = "Post and manage Dubilist marketplace listings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management (login, register, whoami)
    #[command(subcommand)]
    Auth(cmd::auth::AuthCommand),

    /// Run the interactive posting wizard
    Post,

    /// Browse and manage listings
    #[command(subcommand)]
    Listings(cmd::listings::ListingsCommand),
}

fn main() -> ExitCode {
    // Load environment variables
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,dubilist_posting=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Auth(auth)) => cmd::auth::run(auth).await,
        Some(Commands::Post) => cmd::post::run().await,
        Some(Commands::Listings(listings)) => cmd::listings::run(listings).await,
        None => interactive_menu().await,
    }
}

async fn interactive_menu() -> Result<()> {
    use dialoguer::FuzzySelect;

    let items = vec![
        "Post a listing",
        "Browse listings",
        "Log in",
        "Who am I",
        "Exit",
    ];

    loop {
        println!();
        let choice = FuzzySelect::new()
            .with_prompt("What would you like to do?")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => cmd::post::run().await?,
            1 => {
                cmd::listings::run(cmd::listings::ListingsCommand::List {
                    category: None,
                    page: None,
                    limit: None,
                })
                .await?
            }
            2 => cmd::auth::run(cmd::auth::AuthCommand::Login).await?,
            3 => cmd::auth::run(cmd::auth::AuthCommand::Whoami).await?,
            _ => break,
        }
    }

    Ok(())
}
