//! Roster command-line entry point.
//!
//! Compares the members of a research organization in the people directory
//! against the people listed on a public web page, and mails the names of
//! those missing from the page.

mod cli;
mod workflow;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Cli;
use roster_core::AppConfig;
use roster_directory::{ApiConfiguration, DirectoryClient, HttpFetcher};
use roster_mail::{send_plaintext_email, MembershipReport};
use roster_scraper::PeoplePageScraper;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,roster=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        AppConfig::load_with_env(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    if config.directory.api_key.is_none() {
        tracing::warn!("No directory API key configured, requests will likely be rejected");
    }

    let scraper = PeoplePageScraper::new(&config.scraper)?;
    let Some(page_ids) = scraper
        .scrape(&config.scraper.website)
        .await
        .with_context(|| format!("Failed to scrape {}", config.scraper.website))?
    else {
        bail!("Could not retrieve people page {}", config.scraper.website);
    };
    info!(count = page_ids.len(), "People listed on page");

    let fetcher = HttpFetcher::from_settings(&config.directory)?;
    let client = DirectoryClient::new(fetcher, ApiConfiguration::from_settings(&config.directory))
        .with_locale(config.directory.locale.clone());

    let missing = workflow::find_missing_members(&client, &cli.organization_query(), &page_ids)
        .await
        .context("Directory lookup failed")?;
    info!(
        organization_id = %missing.organization_id,
        listed = missing.listed,
        missing = missing.names.len(),
        "Total of {} missing from the people page",
        missing.names.len()
    );

    if missing.names.is_empty() {
        info!("Every member is listed, no report sent");
        return Ok(());
    }

    let report = MembershipReport::new(&cli.group_label, &config.scraper.website, missing.names);
    let email = report.render(&cli.email_recipient);

    if cli.dry_run {
        println!("To: {}\nSubject: {}\n\n{}", email.to, email.subject, email.body);
        return Ok(());
    }

    send_plaintext_email(
        &email.to,
        &email.subject,
        &email.body,
        &config.mail.sender,
        &config.mail.sendmail_path,
    )
    .context("Failed to send report")?;
    info!(recipient = %email.to, "Report sent");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("Starting roster v{}", env!("CARGO_PKG_VERSION"));

    run(Cli::parse()).await
}
