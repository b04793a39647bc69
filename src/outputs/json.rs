//! JSON output.
//!
//! The page is serialized with the same camelCase field names the upstream
//! API uses, so downstream tools can treat live and offline pages alike.

use crate::models::PageResult;

/// Pretty-printed JSON for `result`.
pub fn render(result: &PageResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::generate_fallback_at;
    use crate::models::{Country, Language};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_fallback_page() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let page = generate_fallback_at(Country::Us, Language::En, 1, now);
        let json = render(&page).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalResults"], 100);
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["origin"], "fallback");
        assert_eq!(value["articles"].as_array().unwrap().len(), 20);
        assert_eq!(value["articles"][0]["source"]["name"], "Cyber Security News");
        assert_eq!(value["articles"][0]["publishedAt"], "2026-10-17T12:00:00.000Z");
    }

    #[test]
    fn test_render_round_trips() {
        let page = PageResult::default();
        let back: PageResult = serde_json::from_str(&render(&page).unwrap()).unwrap();
        assert_eq!(back, page);
    }
}
