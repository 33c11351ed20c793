//! The interactive posting wizard.
//!
//! Walks one listing from category selection through the per-category form,
//! media staging, review and publish. Media failures after the listing is
//! created offer a retry that picks up where the last attempt stopped.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select};
use dubilist_api::DubilistClient;
use dubilist_posting::{
    CategoryDetails, DraftMedia, ImageFile, ListingDraft, MainCategory, PublishError,
    SubmissionCoordinator, WizardSession, AMENITIES, MAX_GALLERY_IMAGES,
};

use super::{authed_client, prompt, prompt_optional, prompt_optional_number};

const CONDITIONS: &[&str] = &["New", "Used"];

pub async fn run() -> Result<()> {
    let client = authed_client()?;
    let coordinator = SubmissionCoordinator::new(client);
    let mut session = WizardSession::new();

    println!();
    println!("{}", style("Post a listing").bold());
    println!();

    select_category(&mut session)?;
    fill_common_fields(&mut session)?;
    fill_details(&mut session)?;
    stage_media(&mut session)?;

    review_loop(&mut session, &coordinator).await
}

// =============================================================================
// Category selection
// =============================================================================

fn select_category(session: &mut WizardSession) -> Result<()> {
    let names: Vec<&str> = MainCategory::ALL.iter().map(|c| c.name()).collect();
    let idx = FuzzySelect::new()
        .with_prompt("Category")
        .items(&names)
        .default(0)
        .interact()
        .context("input aborted")?;
    session
        .composer_mut()
        .select_main_category(MainCategory::ALL[idx].id())?;

    let subs = session.composer().sub_category_choices();
    if !subs.is_empty() {
        let sub_names: Vec<&str> = subs.iter().map(|s| s.name).collect();
        let sub_idx = Select::new()
            .with_prompt("Sub-category")
            .items(&sub_names)
            .default(0)
            .interact()
            .context("input aborted")?;
        session.composer_mut().select_sub_category(subs[sub_idx].id)?;
    }
    Ok(())
}

// =============================================================================
// Form sections
// =============================================================================

fn fill_common_fields(session: &mut WizardSession) -> Result<()> {
    let category = session
        .composer()
        .main_category()
        .context("no category chosen")?;
    let current_title = session
        .composer()
        .draft()
        .map(|d| d.common.title.clone())
        .unwrap_or_default();

    let title: String = Input::new()
        .with_prompt("Title")
        .with_initial_text(current_title)
        .interact_text()
        .context("input aborted")?;
    let description = prompt_optional("Description")?;
    let price = if category.requires_price() {
        Some(prompt_price()?)
    } else {
        None
    };
    let negotiable = price.is_some()
        && Confirm::new()
            .with_prompt("Negotiable?")
            .default(false)
            .interact()
            .context("input aborted")?;
    let city = prompt_optional("City")?;
    let phone = prompt_optional("Contact phone")?;

    let common = session.composer_mut().common_mut()?;
    common.title = title;
    common.description = description;
    common.price = price;
    common.negotiable = negotiable;
    common.city = city;
    common.phone = phone;
    Ok(())
}

fn fill_details(session: &mut WizardSession) -> Result<()> {
    let category = session
        .composer()
        .main_category()
        .context("no category chosen")?;
    match category {
        MainCategory::Motors => fill_motors(session),
        MainCategory::Electronics => fill_electronics(session),
        MainCategory::Property => fill_property(session),
        MainCategory::Classifieds | MainCategory::Furniture => fill_item(session),
        MainCategory::Jobs => fill_jobs(session),
    }
}

fn fill_motors(session: &mut WizardSession) -> Result<()> {
    let make = prompt_optional("Make")?;
    let model = prompt_optional("Model")?;
    let year = prompt_optional_number::<i32>("Year")?;
    let kilometres = prompt_optional_number::<u32>("Kilometres")?;
    let fuel_type = select_one("Fuel type", &["Petrol", "Diesel", "Hybrid", "Electric"])?;
    let transmission = select_one("Transmission", &["Automatic", "Manual"])?;
    let condition = select_one("Condition", CONDITIONS)?;

    match session.composer_mut().details_mut()? {
        CategoryDetails::Motors(details) => {
            details.make = make;
            details.model = model;
            details.year = year;
            details.kilometres = kilometres;
            details.fuel_type = fuel_type;
            details.transmission = transmission;
            details.condition = condition;
        }
        _ => anyhow::bail!("draft category changed mid-edit"),
    }
    Ok(())
}

fn fill_electronics(session: &mut WizardSession) -> Result<()> {
    // The device type mirrors the chosen sub-category ("Mobiles", ...).
    let device_type = session
        .composer()
        .draft()
        .and_then(|d| d.sub_category())
        .map(|s| s.name.to_string());
    let brand = prompt_optional("Brand")?;
    let model = prompt_optional("Model")?;
    let storage = prompt_optional("Storage (e.g. 256GB)")?;
    let colour = prompt_optional("Colour")?;
    let condition = select_one("Condition", CONDITIONS)?;

    match session.composer_mut().details_mut()? {
        CategoryDetails::Electronics(details) => {
            details.brand = brand;
            details.model = model;
            details.storage = storage;
            details.colour = colour;
            details.condition = condition;
            details.device_type = device_type;
        }
        _ => anyhow::bail!("draft category changed mid-edit"),
    }
    Ok(())
}

fn fill_property(session: &mut WizardSession) -> Result<()> {
    let sale_type = select_one("Offer", &["Sale", "Rent"])?;
    let bedrooms = prompt_optional_number::<u32>("Bedrooms")?.unwrap_or(0);
    let bathrooms = prompt_optional_number::<u32>("Bathrooms")?.unwrap_or(0);
    let area = prompt_optional("Area (sqft)")?;
    let furnishing = select_one(
        "Furnishing",
        &["Furnished", "Semi-furnished", "Unfurnished"],
    )?;
    let picked = MultiSelect::new()
        .with_prompt("Amenities (space to toggle)")
        .items(AMENITIES)
        .interact()
        .context("input aborted")?;
    let amenities: Vec<String> = picked.iter().map(|&i| AMENITIES[i].to_string()).collect();

    match session.composer_mut().details_mut()? {
        CategoryDetails::Property(details) => {
            details.sale_type = sale_type;
            details.bedrooms = bedrooms;
            details.bathrooms = bathrooms;
            details.area = area;
            details.furnishing = furnishing;
            details.amenities = amenities;
        }
        _ => anyhow::bail!("draft category changed mid-edit"),
    }
    Ok(())
}

fn fill_item(session: &mut WizardSession) -> Result<()> {
    let condition = select_one("Condition", CONDITIONS)?;
    let material = prompt_optional("Material")?;
    println!("{}", style("Dimensions in cm; leave blank to skip.").dim());
    let length_cm = prompt_optional_number::<f64>("Length")?;
    let width_cm = prompt_optional_number::<f64>("Width")?;
    let height_cm = prompt_optional_number::<f64>("Height")?;
    let weight = prompt_optional("Weight (e.g. 40kg)")?;

    match session.composer_mut().details_mut()? {
        CategoryDetails::Classifieds(details) | CategoryDetails::Furniture(details) => {
            details.condition = condition;
            details.material = material;
            details.length_cm = length_cm;
            details.width_cm = width_cm;
            details.height_cm = height_cm;
            details.weight = weight;
        }
        _ => anyhow::bail!("draft category changed mid-edit"),
    }
    Ok(())
}

fn fill_jobs(session: &mut WizardSession) -> Result<()> {
    let job_title = prompt_optional("Job title")?;
    let company_name = prompt_optional("Company name")?;
    let industry = prompt_optional("Industry")?;
    let experience = select_one("Experience level", &["Entry", "Mid", "Senior", "Lead"])?;
    let salary_min = prompt_optional_number::<f64>("Salary from (AED/month)")?;
    let salary_max = prompt_optional_number::<f64>("Salary to (AED/month)")?;
    let job_description = prompt_optional("Role description")?;
    let skills_required = prompt_lines("Skills required")?;
    let responsibilities = prompt_lines("Responsibilities")?;
    let requirements = prompt_optional("Requirements")?;
    let benefits = prompt_optional("Benefits")?;
    let company_website = prompt_optional("Company website")?;

    session.composer_mut().common_mut()?.company_website = company_website;
    match session.composer_mut().details_mut()? {
        CategoryDetails::Jobs(details) => {
            details.job_title = job_title;
            details.company_name = company_name;
            details.industry = industry;
            details.experience = experience;
            details.salary_min = salary_min;
            details.salary_max = salary_max;
            details.job_description = job_description;
            details.skills_required = skills_required;
            details.responsibilities = responsibilities;
            details.requirements = requirements;
            details.benefits = benefits;
        }
        _ => anyhow::bail!("draft category changed mid-edit"),
    }
    Ok(())
}

// =============================================================================
// Media staging
// =============================================================================

fn stage_media(session: &mut WizardSession) -> Result<()> {
    let category = session
        .composer()
        .main_category()
        .context("no category chosen")?;
    if category.uses_logo() {
        let attach = Confirm::new()
            .with_prompt("Attach a company logo?")
            .default(true)
            .interact()
            .context("input aborted")?;
        if attach {
            add_logo(session)?;
        }
        return Ok(());
    }

    println!(
        "Add up to {MAX_GALLERY_IMAGES} photos (png, jpeg or webp). The first one becomes the cover."
    );
    loop {
        let staged = session
            .composer()
            .draft()
            .map(|d| d.media().file_count())
            .unwrap_or(0);
        if staged >= MAX_GALLERY_IMAGES {
            println!("  gallery full ({MAX_GALLERY_IMAGES} photos)");
            break;
        }
        let path: String = Input::new()
            .with_prompt(format!("Photo {} path (empty to finish)", staged + 1))
            .allow_empty(true)
            .interact_text()
            .context("input aborted")?;
        let path = path.trim().to_string();
        if path.is_empty() {
            break;
        }
        match read_image(Path::new(&path)) {
            Ok(file) => match session.composer_mut().add_gallery_image(file) {
                Ok(()) => println!("  added"),
                Err(e) => println!("  {}", style(e).yellow()),
            },
            Err(e) => println!("  {}", style(format!("{e:#}")).yellow()),
        }
    }
    Ok(())
}

fn add_logo(session: &mut WizardSession) -> Result<()> {
    loop {
        let path: String = Input::new()
            .with_prompt("Logo path (empty to skip)")
            .allow_empty(true)
            .interact_text()
            .context("input aborted")?;
        let path = path.trim().to_string();
        if path.is_empty() {
            return Ok(());
        }
        match read_image(Path::new(&path)) {
            Ok(file) => match session.composer_mut().set_logo(file) {
                Ok(()) => return Ok(()),
                Err(e) => println!("  {}", style(e).yellow()),
            },
            Err(e) => println!("  {}", style(format!("{e:#}")).yellow()),
        }
    }
}

fn edit_media(session: &mut WizardSession) -> Result<()> {
    let category = session
        .composer()
        .main_category()
        .context("no category chosen")?;
    if category.uses_logo() {
        let choice = Select::new()
            .with_prompt("Logo")
            .items(&["Replace", "Remove", "Keep as-is"])
            .default(2)
            .interact()
            .context("input aborted")?;
        match choice {
            0 => add_logo(session)?,
            1 => session.composer_mut().clear_logo()?,
            _ => {}
        }
        return Ok(());
    }

    loop {
        let files: Vec<String> = session
            .composer()
            .draft()
            .and_then(|d| d.media().gallery())
            .map(|g| g.iter().map(|f| f.file_name.clone()).collect())
            .unwrap_or_default();
        println!("  {} photo(s) staged", files.len());
        let choice = Select::new()
            .with_prompt("Photos")
            .items(&["Add", "Remove", "Done"])
            .default(2)
            .interact()
            .context("input aborted")?;
        match choice {
            0 => stage_media(session)?,
            1 => {
                if files.is_empty() {
                    println!("  nothing to remove");
                    continue;
                }
                let idx = Select::new()
                    .with_prompt("Remove which?")
                    .items(&files)
                    .default(0)
                    .interact()
                    .context("input aborted")?;
                let removed = session.composer_mut().remove_gallery_image(idx)?;
                println!("  removed {}", removed.file_name);
            }
            _ => return Ok(()),
        }
    }
}

// =============================================================================
// Review and publish
// =============================================================================

async fn review_loop(
    session: &mut WizardSession,
    coordinator: &SubmissionCoordinator<DubilistClient>,
) -> Result<()> {
    loop {
        let draft = match session.hand_off_to_review() {
            Ok(draft) => draft,
            Err(e) => {
                println!("{} {}", style("Not ready to publish:").yellow(), e);
                if !edit_menu(session)? {
                    session.abandon();
                    println!("Draft discarded.");
                    return Ok(());
                }
                continue;
            }
        };

        render_review(&draft);

        let choice = Select::new()
            .with_prompt("Ready?")
            .items(&["Publish", "Edit", "Discard"])
            .default(0)
            .interact()
            .context("input aborted")?;
        match choice {
            0 => return publish_staged(session, coordinator).await,
            1 => {
                session.back_to_compose()?;
                if !edit_menu(session)? {
                    session.abandon();
                    println!("Draft discarded.");
                    return Ok(());
                }
            }
            _ => {
                session.abandon();
                println!("Draft discarded.");
                return Ok(());
            }
        }
    }
}

/// Per-section edit menu. Returns `false` when the user discards the draft.
fn edit_menu(session: &mut WizardSession) -> Result<bool> {
    loop {
        let choice = Select::new()
            .with_prompt("Edit")
            .items(&[
                "Common fields",
                "Category details",
                "Photos / logo",
                "Back to review",
                "Discard draft",
            ])
            .default(3)
            .interact()
            .context("input aborted")?;
        match choice {
            0 => fill_common_fields(session)?,
            1 => fill_details(session)?,
            2 => edit_media(session)?,
            3 => return Ok(true),
            _ => return Ok(false),
        }
    }
}

async fn publish_staged(
    session: &mut WizardSession,
    coordinator: &SubmissionCoordinator<DubilistClient>,
) -> Result<()> {
    println!();
    let mut outcome = session.publish(coordinator).await;
    loop {
        match outcome {
            Ok(receipt) => {
                println!(
                    "{} listing {} is live with {} image(s)",
                    style("Published:").green().bold(),
                    receipt.listing_id,
                    receipt.images_attached
                );
                return Ok(());
            }
            Err(PublishError::Media {
                listing_id,
                attached,
                failed_index,
                stage,
                source,
            }) => {
                println!(
                    "{} image {} failed to {}: {}",
                    style("Partial failure:").yellow(),
                    failed_index + 1,
                    stage,
                    source
                );
                println!("  Listing {listing_id} was created; {attached} image(s) are attached.");
                let retry = Confirm::new()
                    .with_prompt("Retry the remaining images?")
                    .default(true)
                    .interact()
                    .context("input aborted")?;
                if !retry {
                    println!(
                        "Listing {listing_id} stays live with {attached} image(s); the rest were not uploaded."
                    );
                    return Ok(());
                }
                outcome = session.resume_media(coordinator, listing_id, attached).await;
            }
            Err(err) => return Err(err).context("publish failed"),
        }
    }
}

fn render_review(draft: &ListingDraft) {
    println!();
    println!("{}", style("Review").bold().underlined());
    let sub = draft.sub_category().map(|s| s.name).unwrap_or("-");
    println!("  category:  {} / {}", draft.main_category(), sub);
    println!("  title:     {}", style(&draft.common.title).bold());
    if let Some(price) = draft.common.price {
        let negotiable = if draft.common.negotiable {
            ", negotiable"
        } else {
            ""
        };
        println!("  price:     {} {}{}", draft.common.currency, price, negotiable);
    }
    if let Some(city) = &draft.common.city {
        println!("  city:      {city}");
    }
    if let Some(description) = &draft.common.description {
        println!("  about:     {description}");
    }
    render_details(draft.details());
    match draft.media() {
        DraftMedia::Gallery(files) => {
            println!("  photos:    {}", files.len());
            for (i, file) in files.iter().enumerate() {
                let cover = if i == 0 { "  (cover)" } else { "" };
                println!("    {}. {}{}", i + 1, file.file_name, cover);
            }
        }
        DraftMedia::Logo(Some(file)) => println!("  logo:      {}", file.file_name),
        DraftMedia::Logo(None) => println!("  logo:      none"),
    }
    println!();
}

fn render_details(details: &CategoryDetails) {
    let mut parts: Vec<String> = Vec::new();
    match details {
        CategoryDetails::Motors(m) => {
            push_part(&mut parts, &m.make);
            push_part(&mut parts, &m.model);
            if let Some(year) = m.year {
                parts.push(year.to_string());
            }
            if let Some(km) = m.kilometres {
                parts.push(format!("{km} km"));
            }
            push_part(&mut parts, &m.fuel_type);
            push_part(&mut parts, &m.transmission);
            push_part(&mut parts, &m.condition);
        }
        CategoryDetails::Electronics(e) => {
            push_part(&mut parts, &e.brand);
            push_part(&mut parts, &e.model);
            push_part(&mut parts, &e.storage);
            push_part(&mut parts, &e.colour);
            push_part(&mut parts, &e.condition);
        }
        CategoryDetails::Property(p) => {
            push_part(&mut parts, &p.sale_type);
            parts.push(format!("{} bed", p.bedrooms));
            parts.push(format!("{} bath", p.bathrooms));
            push_part(&mut parts, &p.area);
            push_part(&mut parts, &p.furnishing);
            if !p.amenities.is_empty() {
                parts.push(p.amenities.join(", "));
            }
        }
        CategoryDetails::Classifieds(i) | CategoryDetails::Furniture(i) => {
            push_part(&mut parts, &i.condition);
            push_part(&mut parts, &i.material);
            push_part(&mut parts, &i.weight);
        }
        CategoryDetails::Jobs(j) => {
            push_part(&mut parts, &j.company_name);
            push_part(&mut parts, &j.job_type);
            push_part(&mut parts, &j.experience);
            if let (Some(min), Some(max)) = (j.salary_min, j.salary_max) {
                parts.push(format!("AED {min}-{max}"));
            }
        }
    }
    if !parts.is_empty() {
        println!("  details:   {}", parts.join(" / "));
    }
}

fn push_part(parts: &mut Vec<String>, value: &Option<String>) {
    if let Some(v) = value {
        if !v.trim().is_empty() {
            parts.push(v.trim().to_string());
        }
    }
}

// =============================================================================
// Input helpers
// =============================================================================

fn prompt_price() -> Result<f64> {
    loop {
        let raw = prompt("Price (AED)")?;
        match raw.trim().parse::<f64>() {
            Ok(price) if price > 0.0 => return Ok(price),
            Ok(_) => println!("  price must be greater than zero"),
            Err(_) => println!("  not a number, try again"),
        }
    }
}

/// Pick one option or skip.
fn select_one(label: &str, options: &[&str]) -> Result<Option<String>> {
    let mut items: Vec<&str> = options.to_vec();
    items.push("(skip)");
    let idx = Select::new()
        .with_prompt(label)
        .items(&items)
        .default(0)
        .interact()
        .context("input aborted")?;
    Ok((idx < options.len()).then(|| options[idx].to_string()))
}

/// Multi-line entry, one item per line, blank line to finish.
fn prompt_lines(label: &str) -> Result<String> {
    println!(
        "{}",
        style(format!("{label} (one per line, empty line to finish)")).dim()
    );
    let mut lines: Vec<String> = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .context("input aborted")?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.trim().to_string());
    }
    Ok(lines.join("\n"))
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();
    Ok(ImageFile::new(file_name, content_type, bytes))
}
