//! Local relevance filters applied to headline results.
//!
//! The headline endpoint can only be narrowed to the coarse `technology`
//! category, so its results are re-filtered here against a fixed list of
//! cybersecurity keywords. Matching is a case-insensitive substring test,
//! not a word-boundary match: "hack" also matches "hackathon".

use crate::models::{Article, Country, Language};

/// Terms that mark an article as cybersecurity-related.
pub const CYBER_KEYWORDS: [&str; 18] = [
    "cybersecurity",
    "cyber security",
    "data breach",
    "malware",
    "phishing",
    "ransomware",
    "cyber attack",
    "security breach",
    "hack",
    "hacker",
    "vulnerability",
    "exploit",
    "firewall",
    "encryption",
    "privacy",
    "cyber threat",
    "information security",
    "network security",
];

/// Terms OR-ed together when the full-text search has no user query.
const SEARCH_TERMS: [&str; 8] = [
    "\"cybersecurity\"",
    "\"cyber security\"",
    "\"data breach\"",
    "malware",
    "phishing",
    "ransomware",
    "\"cyber attack\"",
    "\"security breach\"",
];

/// Check whether a title/description pair mentions any cybersecurity keyword.
pub fn is_cybersecurity_related(title: &str, description: Option<&str>) -> bool {
    let text = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();
    CYBER_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Keep only cybersecurity-related articles, preserving order.
pub fn retain_cybersecurity(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| is_cybersecurity_related(&a.title, a.description.as_deref()))
        .collect()
}

/// Drop articles that declare a language other than `language`.
///
/// Articles without a declared language are kept, which makes this a no-op
/// for most upstream payloads.
pub fn retain_language(articles: Vec<Article>, language: Language) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| a.language.as_deref().is_none_or(|l| l == language.code()))
        .collect()
}

/// Boolean full-text query used when the user typed nothing.
///
/// ```text
/// ("cybersecurity" OR ... OR "security breach") AND us
/// ```
pub fn synthesized_query(country: Country) -> String {
    format!("({}) AND {}", SEARCH_TERMS.join(" OR "), country.code())
}
