//! Command-line interface definitions for cynews.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Connection settings can also come from environment variables or a YAML
//! config file; flags win over both.

use chrono::NaiveDate;
use clap::Parser;
use cynews::models::{Country, KnownSource, Language};
use cynews::outputs::Format;
use cynews::session::Theme;
use std::path::PathBuf;

/// Command-line arguments for one news lookup.
///
/// # Examples
///
/// ```sh
/// # Offline demo data for the UK, page 2
/// cynews --country gb --page 2
///
/// # Live search with chips, a date window and two publishers
/// NEWS_API_KEY=... cynews -q "bank" -k ransomware -k phishing \
///     --from 2026-10-01 --to 2026-10-10 -s wired -s the-hacker-news
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Country to scope headlines to (us, gb, ca, au, de, fr, es, it, in, jp, br, mx)
    #[arg(short, long)]
    pub country: Option<Country>,

    /// Language hint (en, es, fr, de, it, pt, ru, ja, ko, zh, ar, hi)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// 1-based page number
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Free-text search query
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Keyword chip appended to the query (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Restrict to a publisher id (repeatable)
    #[arg(short, long = "source")]
    pub sources: Vec<KnownSource>,

    /// NewsAPI key; without one, offline demo articles are shown
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream API base URL
    #[arg(long, env = "NEWS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Optional path to a YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(short, long, default_value = "markdown")]
    pub format: Format,

    /// Display theme (light, dark)
    #[arg(long, default_value = "light")]
    pub theme: Theme,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
