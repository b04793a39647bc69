//! # cynews
//!
//! Command-line reader for cybersecurity news.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... cynews --country gb --page 2 -k ransomware
//! ```
//!
//! Without a key (or with the placeholder from a sample env file) the reader
//! serves a deterministic offline article set, so it is usable with no setup.
//!
//! ## Flow
//!
//! 1. **Configure**: merge the YAML config file, environment and flags
//! 2. **Filter**: apply flags to a fresh [`Session`], rejecting invalid date ranges
//! 3. **Resolve**: run one resolution cycle (headlines, full-text search, offline)
//! 4. **Output**: render Markdown or JSON to stdout or a file

use clap::Parser;
use cynews::config::Config;
use cynews::outputs::{self, Format};
use cynews::{Resolver, Session};
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cynews starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.country, ?args.language, page = args.page, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    info!(
        base_url = %config.base_url,
        live = config.has_live_credential(),
        timeout_secs = config.timeout_secs,
        "Configuration resolved"
    );

    // ---- Session state from flags ----
    let mut session = Session::new(
        args.country.unwrap_or(config.country),
        args.language.unwrap_or(config.language),
    );
    session.theme = args.theme;
    session.set_manual_query(args.query.as_str());
    for chip in args.keywords.iter().unique() {
        session.toggle_keyword(chip);
    }
    for source in args.sources.iter().unique() {
        session.toggle_source(*source);
    }
    if let Err(e) = session.set_date_from(args.from) {
        warn!(error = %e, "Ignoring start date");
    }
    if let Err(e) = session.set_date_to(args.to) {
        warn!(error = %e, "Ignoring end date");
    }
    session.set_page(args.page);

    // ---- Resolve ----
    let resolver = Resolver::from_config(&config)?;
    session.refresh(&resolver).await;
    if let Some(advisory) = &session.advisory {
        warn!(%advisory, "Empty result for date filter");
    }

    // ---- Output ----
    let rendered = match args.format {
        Format::Markdown => outputs::markdown::render(&session),
        Format::Json => outputs::json::render(&session.result)?,
    };
    match &args.output {
        Some(path) => outputs::write_output(path, &rendered).await?,
        None => println!("{rendered}"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        origin = ?session.result.origin,
        articles = session.result.articles.len(),
        total = session.result.total_results,
        "Execution complete"
    );

    Ok(())
}
