//! Deterministic offline article set.
//!
//! Used whenever live retrieval is unavailable: no credential configured, or
//! every upstream tier failed. The set always holds 100 articles, is sliced
//! into pages of [`PAGE_SIZE`], and only depends on the country and a clock
//! reading taken once per call.
//!
//! Each title carries a `(Page N)` suffix and timestamps step back one hour
//! per article, so pagination can be checked by eye without live data.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::{debug, instrument};

use crate::models::{
    Article, ArticleSource, Country, Language, PageResult, ResultOrigin, PAGE_SIZE,
    SENTINEL_DOMAIN,
};

/// Size of the whole synthetic set.
pub const FALLBACK_TOTAL: u32 = 100;

struct Template {
    title: &'static str,
    description: &'static str,
    image: &'static str,
}

/// `{country}` is replaced with the country's display name.
const TEMPLATES: [Template; 8] = [
    Template {
        title: "Major Cybersecurity Breach Affects {country} Organizations",
        description: "A sophisticated cyber attack has compromised several major corporations in {country}, highlighting the need for enhanced security measures.",
        image: "https://via.placeholder.com/300x200?text=Cybersecurity",
    },
    Template {
        title: "New Ransomware Campaign Targets {country} Healthcare Sector",
        description: "Security researchers have identified a new strain of ransomware specifically designed to target healthcare infrastructure in {country}.",
        image: "https://via.placeholder.com/300x200?text=Ransomware",
    },
    Template {
        title: "Zero-Day Vulnerability Discovered in Popular Software Used in {country}",
        description: "A critical zero-day vulnerability has been found in widely-used software, prompting immediate security updates across {country}.",
        image: "https://via.placeholder.com/300x200?text=Vulnerability",
    },
    Template {
        title: "{country} Government Strengthens Cybersecurity Regulations",
        description: "New cybersecurity regulations have been announced by {country} authorities to protect critical infrastructure and personal data.",
        image: "https://via.placeholder.com/300x200?text=Regulations",
    },
    Template {
        title: "AI-Powered Security Solutions Deployed in {country}",
        description: "Leading technology companies in {country} are implementing advanced AI-powered security solutions to combat emerging cyber threats.",
        image: "https://via.placeholder.com/300x200?text=AI+Security",
    },
    Template {
        title: "{country} Financial Sector Faces Increased Cyber Threats",
        description: "Banks and financial institutions in {country} are experiencing a surge in sophisticated cyber attacks targeting customer data and financial systems.",
        image: "https://via.placeholder.com/300x200?text=Finance+Security",
    },
    Template {
        title: "Cloud Security Breach Affects {country} Tech Companies",
        description: "A major cloud security incident has impacted several technology companies in {country}, raising concerns about cloud infrastructure security.",
        image: "https://via.placeholder.com/300x200?text=Cloud+Security",
    },
    Template {
        title: "{country} Universities Strengthen Cybersecurity Education",
        description: "Educational institutions in {country} are expanding cybersecurity programs to address the growing demand for skilled security professionals.",
        image: "https://via.placeholder.com/300x200?text=Education",
    },
];

/// Localized pseudo-publishers. Countries without their own table use the US one.
fn publishers(country: Country) -> [&'static str; 4] {
    match country {
        Country::Gb => ["UK Cyber News", "Security Guardian", "Tech Security UK", "Cyber Watch"],
        Country::De => [
            "Sicherheits News",
            "Cyber Security DE",
            "Tech Sicherheit",
            "Security Report",
        ],
        Country::Fr => ["Sécurité Cyber", "News Sécurité", "Tech Sécurité", "Cyber France"],
        Country::Es => [
            "Noticias Ciberseguridad",
            "Seguridad Digital",
            "Tech Seguridad",
            "Cyber España",
        ],
        Country::In => [
            "Cyber India News",
            "Security India",
            "Tech Security IN",
            "Cyber Watch India",
        ],
        _ => ["Cyber Security News", "Security Weekly", "Tech Security", "InfoSec Today"],
    }
}

/// Build the full 100-article sequence, newest first.
fn synthesize_all(country: Country, now: DateTime<Utc>) -> Vec<Article> {
    let name = country.display_name();
    let sources = publishers(country);

    (0..FALLBACK_TOTAL as usize)
        .map(|i| {
            let template = &TEMPLATES[i % TEMPLATES.len()];
            let page_label = (i as u32 + 1).div_ceil(PAGE_SIZE);
            let published = now - Duration::hours(i as i64);
            Article {
                title: format!(
                    "{} (Page {})",
                    template.title.replace("{country}", name),
                    page_label
                ),
                description: Some(template.description.replace("{country}", name)),
                source: Some(ArticleSource {
                    id: None,
                    name: sources[i % sources.len()].to_string(),
                }),
                published_at: published.to_rfc3339_opts(SecondsFormat::Millis, true),
                url: Some(format!("https://{SENTINEL_DOMAIN}/news{}-{}", i + 1, country.code())),
                url_to_image: Some(template.image.to_string()),
                language: None,
            }
        })
        .collect()
}

/// Offline page for `(country, page)`, stamped against the current time.
///
/// `language` is accepted so callers can pass the full request tuple; the
/// synthetic set is not localized by language.
pub fn generate_fallback(country: Country, language: Language, page: u32) -> PageResult {
    generate_fallback_at(country, language, page, Utc::now())
}

/// Offline page for `(country, page)` with an explicit reference clock.
///
/// Pages past the end of the set come back empty; `total_results` is always
/// [`FALLBACK_TOTAL`].
#[instrument(level = "debug", skip(now))]
pub fn generate_fallback_at(
    country: Country,
    language: Language,
    page: u32,
    now: DateTime<Utc>,
) -> PageResult {
    let page = page.max(1);
    let start = (page as usize - 1).saturating_mul(PAGE_SIZE as usize);

    let articles: Vec<Article> = synthesize_all(country, now)
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE as usize)
        .collect();

    debug!(count = articles.len(), "Generated fallback page");
    PageResult {
        articles,
        total_results: FALLBACK_TOTAL,
        current_page: page,
        origin: ResultOrigin::Fallback,
    }
}
