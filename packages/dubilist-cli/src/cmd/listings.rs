//! Browse and manage existing listings.

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use dubilist_api::{ListingData, ListingsQuery};

use super::{authed_client, client};

#[derive(Debug, Subcommand)]
pub enum ListingsCommand {
    /// List recent listings, optionally scoped to a category.
    List {
        /// Category or sub-category id to filter on.
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one listing in full, including its images.
    Show { id: i64 },
    /// Mark a listing as sold.
    Sold { id: i64 },
    /// Delete a listing.
    Delete { id: i64 },
}

pub async fn run(cmd: ListingsCommand) -> Result<()> {
    match cmd {
        ListingsCommand::List {
            category,
            page,
            limit,
        } => list(category, page, limit).await,
        ListingsCommand::Show { id } => show(id).await,
        ListingsCommand::Sold { id } => sold(id).await,
        ListingsCommand::Delete { id } => delete(id).await,
    }
}

async fn list(category: Option<i64>, page: Option<u32>, limit: Option<u32>) -> Result<()> {
    let query = ListingsQuery {
        category_id: category,
        page,
        limit,
    };
    let listings = client()
        .list_listings(&query)
        .await
        .context("failed to fetch listings")?;

    if listings.is_empty() {
        println!("No listings found.");
        return Ok(());
    }
    for listing in &listings {
        println!(
            "{:>8}  {}  {}",
            style(listing.id).cyan(),
            style(format!("{:<40}", truncate(&listing.title, 40))).bold(),
            price_tag(listing)
        );
    }
    Ok(())
}

async fn show(id: i64) -> Result<()> {
    let listing = client()
        .get_listing(id)
        .await
        .context("failed to fetch listing")?;

    println!("{} {}", style("#").dim(), style(&listing.title).bold());
    println!("  id:       {}", listing.id);
    println!("  price:    {}", price_tag(&listing));
    if let Some(city) = &listing.city {
        println!("  city:     {}", city);
    }
    if let Some(status) = &listing.status {
        println!("  status:   {}", status);
    }
    if listing.is_sold.unwrap_or(false) {
        println!("  {}", style("SOLD").red().bold());
    }
    if let Some(description) = &listing.description {
        println!("\n{}", description);
    }
    if !listing.images.is_empty() {
        println!("\n  images:");
        for image in &listing.images {
            let primary = if image.is_primary.unwrap_or(false) {
                " (primary)"
            } else {
                ""
            };
            println!("    {}{}", image.url, primary);
        }
    }
    if let Some(logo) = &listing.logo_url {
        println!("  logo:     {}", logo);
    }
    Ok(())
}

async fn sold(id: i64) -> Result<()> {
    authed_client()?
        .mark_listing_sold(id)
        .await
        .context("failed to mark listing sold")?;
    println!("{} listing {} marked as sold", style("Done:").green(), id);
    Ok(())
}

async fn delete(id: i64) -> Result<()> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Delete listing {id}? This cannot be undone"))
        .default(false)
        .interact()
        .context("input aborted")?;
    if !confirmed {
        println!("Kept.");
        return Ok(());
    }
    authed_client()?
        .delete_listing(id)
        .await
        .context("failed to delete listing")?;
    println!("{} listing {} deleted", style("Done:").green(), id);
    Ok(())
}

fn price_tag(listing: &ListingData) -> String {
    match listing.price {
        Some(price) => format!(
            "{} {}",
            listing.currency.as_deref().unwrap_or("AED"),
            price
        ),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
