//! Account commands: log in, register, inspect the current session.

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use dubilist_api::{AuthData, RegisterRequest};

use super::{authed_client, client, prompt, prompt_optional};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in with email and password.
    Login,
    /// Create a new account.
    Register,
    /// Show the account behind the current token.
    Whoami,
}

pub async fn run(cmd: AuthCommand) -> Result<()> {
    match cmd {
        AuthCommand::Login => login().await,
        AuthCommand::Register => register().await,
        AuthCommand::Whoami => whoami().await,
    }
}

async fn login() -> Result<()> {
    let email = prompt("Email")?;
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .context("input aborted")?;

    let auth = client()
        .login(&email, &password)
        .await
        .context("login failed")?;
    print_session(&auth);
    Ok(())
}

async fn register() -> Result<()> {
    let name = prompt("Name")?;
    let email = prompt("Email")?;
    let phone = prompt_optional("Phone")?;
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "passwords do not match")
        .interact()
        .context("input aborted")?;

    let auth = client()
        .register(&RegisterRequest {
            name,
            email,
            phone,
            password,
        })
        .await
        .context("registration failed")?;
    print_session(&auth);
    Ok(())
}

async fn whoami() -> Result<()> {
    let user = authed_client()?.me().await.context("session check failed")?;
    println!(
        "{} {} <{}>",
        style("Logged in as").green(),
        style(&user.name).bold(),
        user.email
    );
    Ok(())
}

fn print_session(auth: &AuthData) {
    println!(
        "{} {}",
        style("Welcome,").green(),
        style(&auth.user.name).bold()
    );
    println!("To use authenticated commands in this shell:");
    println!(
        "  export DUBILIST_API_TOKEN={}",
        auth.tokens.access_token
    );
}
