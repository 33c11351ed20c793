//! CLI command implementations.

pub mod auth;
pub mod listings;
pub mod post;

use anyhow::{Context, Result};
use dubilist_api::DubilistClient;

/// Client for unauthenticated endpoints, honoring `DUBILIST_API_URL`.
pub fn client() -> DubilistClient {
    DubilistClient::from_env()
}

/// Client for endpoints that need a bearer token.
pub fn authed_client() -> Result<DubilistClient> {
    let client = DubilistClient::from_env();
    if !client.has_token() {
        anyhow::bail!(
            "not logged in. Run `dubilist auth login` and export DUBILIST_API_TOKEN first"
        );
    }
    Ok(client)
}

/// Prompt for a non-empty line of input.
pub fn prompt(label: &str) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .context("input aborted")
}

/// Prompt for an optional line; empty input becomes `None`.
pub fn prompt_optional(label: &str) -> Result<Option<String>> {
    let value: String = dialoguer::Input::new()
        .with_prompt(format!("{label} (optional)"))
        .allow_empty(true)
        .interact_text()
        .context("input aborted")?;
    let value = value.trim().to_string();
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Prompt for an optional number; empty input becomes `None`.
pub fn prompt_optional_number<T: std::str::FromStr>(label: &str) -> Result<Option<T>> {
    loop {
        let Some(raw) = prompt_optional(label)? else {
            return Ok(None);
        };
        match raw.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("  not a number, try again"),
        }
    }
}
