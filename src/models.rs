//! Data models for articles, filters and resolved pages.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`Article`]: A news item as returned by the upstream API or synthesized offline
//! - [`QueryParameters`]: The resolved search intent for one request
//! - [`PageResult`]: One page of articles plus pagination metadata
//! - Closed code sets: [`Country`], [`Language`], [`KnownSource`]
//!
//! Wire-facing structs use `#[serde(rename_all = "camelCase")]` so they match
//! the upstream JSON (`publishedAt`, `urlToImage`, `totalResults`).

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed number of articles per page, both upstream and offline.
pub const PAGE_SIZE: u32 = 20;

/// Domain used by synthetic articles. Links on this domain are never followed.
pub const SENTINEL_DOMAIN: &str = "example.com";

/// Shown when an article carries no source name.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Keyword chips that can be appended to the manual query.
pub const KEYWORD_CHIPS: [&str; 12] = [
    "malware",
    "phishing",
    "social engineering",
    "iPhone",
    "Samsung",
    "Google",
    "Android",
    "Microsoft",
    "data breach",
    "ransomware",
    "privacy",
    "exploit",
];

/// Reads an explicit JSON `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Named origin of an article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleSource {
    /// Upstream source identifier, often absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable publisher name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A retrieved or synthesized news item.
///
/// The upstream API guarantees no identity field, so lists of articles are
/// only ever addressed by position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Teaser text. Absent is treated as empty when filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Publisher, if the upstream supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ArticleSource>,
    /// ISO-8601 publication timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
    /// Canonical link. Synthetic articles point at [`SENTINEL_DOMAIN`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Lead image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    /// Language code, only present when the upstream declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Article {
    /// Publisher name, or [`UNKNOWN_SOURCE`] when none was supplied.
    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .map(|s| s.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_SOURCE)
    }

    /// Whether the article links somewhere real.
    ///
    /// Synthetic articles (and articles with no url) must not be opened or shared.
    pub fn is_navigable(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|url| !url.is_empty() && !url.contains(SENTINEL_DOMAIN))
    }
}

/// Returned when a code is not part of a closed code set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported {kind} code \"{code}\" (expected one of: {expected})")]
pub struct UnknownCodeError {
    kind: &'static str,
    code: String,
    expected: String,
}

impl UnknownCodeError {
    pub(crate) fn new(kind: &'static str, code: &str, mut expected: impl Iterator<Item = &'static str>) -> Self {
        Self {
            kind,
            code: code.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Countries the reader can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[default]
    Us,
    Gb,
    Ca,
    Au,
    De,
    Fr,
    Es,
    It,
    In,
    Jp,
    Br,
    Mx,
}

impl Country {
    pub const ALL: [Country; 12] = [
        Country::Us,
        Country::Gb,
        Country::Ca,
        Country::Au,
        Country::De,
        Country::Fr,
        Country::Es,
        Country::It,
        Country::In,
        Country::Jp,
        Country::Br,
        Country::Mx,
    ];

    /// Two-letter lowercase code as sent upstream.
    pub fn code(self) -> &'static str {
        match self {
            Country::Us => "us",
            Country::Gb => "gb",
            Country::Ca => "ca",
            Country::Au => "au",
            Country::De => "de",
            Country::Fr => "fr",
            Country::Es => "es",
            Country::It => "it",
            Country::In => "in",
            Country::Jp => "jp",
            Country::Br => "br",
            Country::Mx => "mx",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Country::Us => "United States",
            Country::Gb => "United Kingdom",
            Country::Ca => "Canada",
            Country::Au => "Australia",
            Country::De => "Germany",
            Country::Fr => "France",
            Country::Es => "Spain",
            Country::It => "Italy",
            Country::In => "India",
            Country::Jp => "Japan",
            Country::Br => "Brazil",
            Country::Mx => "Mexico",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Country::ALL
            .into_iter()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| {
                UnknownCodeError::new("country", s, Country::ALL.iter().map(|c| c.code()))
            })
    }
}

/// Languages the reader can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Ja,
    Ko,
    Zh,
    Ar,
    Hi,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ru,
        Language::Ja,
        Language::Ko,
        Language::Zh,
        Language::Ar,
        Language::Hi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Ar => "ar",
            Language::Hi => "hi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
            Language::Ru => "Russian",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Zh => "Chinese",
            Language::Ar => "Arabic",
            Language::Hi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == wanted)
            .ok_or_else(|| {
                UnknownCodeError::new("language", s, Language::ALL.iter().map(|l| l.code()))
            })
    }
}

/// Publishers that can be used to narrow a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownSource {
    Techcrunch,
    TheVerge,
    Wired,
    TheHackerNews,
    ArsTechnica,
    Engadget,
}

impl KnownSource {
    pub const ALL: [KnownSource; 6] = [
        KnownSource::Techcrunch,
        KnownSource::TheVerge,
        KnownSource::Wired,
        KnownSource::TheHackerNews,
        KnownSource::ArsTechnica,
        KnownSource::Engadget,
    ];

    /// Upstream source identifier.
    pub fn id(self) -> &'static str {
        match self {
            KnownSource::Techcrunch => "techcrunch",
            KnownSource::TheVerge => "the-verge",
            KnownSource::Wired => "wired",
            KnownSource::TheHackerNews => "the-hacker-news",
            KnownSource::ArsTechnica => "ars-technica",
            KnownSource::Engadget => "engadget",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KnownSource::Techcrunch => "TechCrunch",
            KnownSource::TheVerge => "The Verge",
            KnownSource::Wired => "Wired",
            KnownSource::TheHackerNews => "The Hacker News",
            KnownSource::ArsTechnica => "Ars Technica",
            KnownSource::Engadget => "Engadget",
        }
    }
}

impl fmt::Display for KnownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for KnownSource {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        KnownSource::ALL
            .into_iter()
            .find(|src| src.id() == wanted)
            .ok_or_else(|| {
                UnknownCodeError::new("source", s, KnownSource::ALL.iter().map(|src| src.id()))
            })
    }
}

/// Rejected date-range edits. The range is left untouched when one is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("start date {from} is after end date {to}")]
    FromAfterTo { from: NaiveDate, to: NaiveDate },

    #[error("end date {to} is before start date {from}")]
    ToBeforeFrom { from: NaiveDate, to: NaiveDate },
}

/// Optional publication window. `from <= to` whenever both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Set or clear the start date.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::FromAfterTo`] when the new start falls after
    /// the current end date.
    pub fn set_from(&mut self, from: Option<NaiveDate>) -> Result<(), DateRangeError> {
        if let (Some(from), Some(to)) = (from, self.to) {
            if from > to {
                return Err(DateRangeError::FromAfterTo { from, to });
            }
        }
        self.from = from;
        Ok(())
    }

    /// Set or clear the end date.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::ToBeforeFrom`] when the new end falls before
    /// the current start date.
    pub fn set_to(&mut self, to: Option<NaiveDate>) -> Result<(), DateRangeError> {
        if let (Some(from), Some(to)) = (self.from, to) {
            if to < from {
                return Err(DateRangeError::ToBeforeFrom { from, to });
            }
        }
        self.to = to;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Build the free-text query from typed text and selected keyword chips.
///
/// Manual text (trimmed) comes first, then the chips, all space-joined.
pub fn combined_query(manual: &str, chips: &[String]) -> String {
    std::iter::once(manual.trim())
        .filter(|m| !m.is_empty())
        .chain(chips.iter().map(String::as_str))
        .join(" ")
}

/// The resolved search intent for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub country: Country,
    pub language: Language,
    /// 1-based page number.
    pub page: u32,
    /// Free-text query; empty means "no user query".
    pub query: String,
    pub date_range: DateRange,
    /// Selected publishers, in selection order, without duplicates.
    pub sources: Vec<KnownSource>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            country: Country::default(),
            language: Language::default(),
            page: 1,
            query: String::new(),
            date_range: DateRange::default(),
            sources: Vec::new(),
        }
    }
}

impl QueryParameters {
    /// Page number, clamped to at least 1.
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// The user query, if it has any non-whitespace content.
    pub fn user_query(&self) -> Option<&str> {
        Some(self.query.as_str()).filter(|q| !q.trim().is_empty())
    }

    /// Comma-joined source ids, or `None` when no source is selected.
    pub fn sources_param(&self) -> Option<String> {
        if self.sources.is_empty() {
            None
        } else {
            Some(self.sources.iter().map(|s| s.id()).unique().join(","))
        }
    }
}

/// Which retrieval path produced a [`PageResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrigin {
    Headlines,
    Everything,
    #[default]
    Fallback,
}

/// The outcome of one resolution.
///
/// `total_results` is the logical total across all pages (an upstream
/// estimate), so it can legitimately differ from `articles.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub articles: Vec<Article>,
    pub total_results: u32,
    pub current_page: u32,
    #[serde(default)]
    pub origin: ResultOrigin,
}

impl PageResult {
    /// Number of pages needed to display `total_results`.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }
}

/// `ceil(total_results / PAGE_SIZE)`.
pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(41), 3);
        assert_eq!(total_pages(40), 2);
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
    }

    #[test]
    fn test_article_deserializes_upstream_shape() {
        let json = r#"{
            "source": {"id": null, "name": "Wired"},
            "author": "Someone",
            "title": "Ransomware hits bank",
            "description": null,
            "url": "https://wired.com/story",
            "urlToImage": null,
            "publishedAt": "2026-10-17T08:00:00Z",
            "content": "..."
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Ransomware hits bank");
        assert_eq!(article.description, None);
        assert_eq!(article.source_name(), "Wired");
        assert_eq!(article.published_at, "2026-10-17T08:00:00Z");
        assert!(article.is_navigable());
    }

    #[test]
    fn test_article_tolerates_null_text_fields() {
        let json = r#"{
            "source": {"id": null, "name": null},
            "title": null,
            "description": "malware",
            "url": null,
            "publishedAt": null
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.published_at, "");
        assert_eq!(article.source_name(), UNKNOWN_SOURCE);
    }

    #[test]
    fn test_source_name_defaults_to_unknown() {
        let article = Article {
            title: "t".into(),
            description: None,
            source: None,
            published_at: String::new(),
            url: None,
            url_to_image: None,
            language: None,
        };
        assert_eq!(article.source_name(), UNKNOWN_SOURCE);
        assert!(!article.is_navigable());
    }

    #[test]
    fn test_sentinel_url_is_not_navigable() {
        let article = Article {
            title: "t".into(),
            description: None,
            source: None,
            published_at: String::new(),
            url: Some("https://example.com/news1-us".into()),
            url_to_image: None,
            language: None,
        };
        assert!(!article.is_navigable());
    }

    #[test]
    fn test_country_parsing() {
        assert_eq!("GB".parse::<Country>().unwrap(), Country::Gb);
        assert_eq!(" in ".parse::<Country>().unwrap(), Country::In);
        let err = "zz".parse::<Country>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported country code \"zz\" (expected one of: us, gb, ca, au, de, fr, es, it, in, jp, br, mx)"
        );
        assert_eq!(Country::ALL.len(), 12);
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("pt".parse::<Language>().unwrap(), Language::Pt);
        assert!("xx".parse::<Language>().is_err());
        assert_eq!(Language::ALL.len(), 12);
    }

    #[test]
    fn test_known_source_parsing() {
        assert_eq!(
            "the-hacker-news".parse::<KnownSource>().unwrap(),
            KnownSource::TheHackerNews
        );
        assert!("bbc-news".parse::<KnownSource>().is_err());
    }

    #[test]
    fn test_date_range_rejects_from_after_to() {
        let mut range = DateRange::default();
        range.set_from(Some(date("2026-10-01"))).unwrap();
        range.set_to(Some(date("2026-10-10"))).unwrap();

        let err = range.set_from(Some(date("2026-10-11"))).unwrap_err();
        assert!(matches!(err, DateRangeError::FromAfterTo { .. }));
        assert_eq!(range.from(), Some(date("2026-10-01")));
        assert_eq!(range.to(), Some(date("2026-10-10")));
    }

    #[test]
    fn test_date_range_rejects_to_before_from() {
        let mut range = DateRange::default();
        range.set_from(Some(date("2026-10-05"))).unwrap();

        let err = range.set_to(Some(date("2026-10-04"))).unwrap_err();
        assert!(matches!(err, DateRangeError::ToBeforeFrom { .. }));
        assert_eq!(range.to(), None);

        range.set_to(Some(date("2026-10-05"))).unwrap();
        assert_eq!(range.to(), Some(date("2026-10-05")));
    }

    #[test]
    fn test_date_range_clearing_is_always_allowed() {
        let mut range = DateRange::default();
        range.set_from(Some(date("2026-10-05"))).unwrap();
        range.set_to(Some(date("2026-10-06"))).unwrap();
        range.set_from(None).unwrap();
        assert!(range.is_active());
        range.set_to(None).unwrap();
        assert!(!range.is_active());
    }

    #[test]
    fn test_combined_query() {
        let chips = vec!["malware".to_string(), "data breach".to_string()];
        assert_eq!(combined_query("  bank  ", &chips), "bank malware data breach");
        assert_eq!(combined_query("", &chips), "malware data breach");
        assert_eq!(combined_query("bank", &[]), "bank");
        assert_eq!(combined_query("   ", &[]), "");
    }

    #[test]
    fn test_query_parameters_helpers() {
        let params = QueryParameters {
            page: 0,
            query: "   ".into(),
            sources: vec![KnownSource::Wired, KnownSource::TheVerge, KnownSource::Wired],
            ..QueryParameters::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.user_query(), None);
        assert_eq!(params.sources_param().as_deref(), Some("wired,the-verge"));
        assert_eq!(QueryParameters::default().sources_param(), None);
    }

    #[test]
    fn test_page_result_serializes_camel_case() {
        let result = PageResult {
            articles: vec![],
            total_results: 41,
            current_page: 2,
            origin: ResultOrigin::Everything,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"totalResults\":41"));
        assert!(json.contains("\"currentPage\":2"));
        assert!(json.contains("\"origin\":\"everything\""));
        assert_eq!(result.total_pages(), 3);
    }
}
