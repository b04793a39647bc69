//! Reader session state.
//!
//! [`Session`] owns everything the front end tracks between requests: the
//! selected country and language, the page, the search filters, the theme,
//! and the outcome of the last completed request. The resolver never reads
//! or writes it; instead the session derives a [`QueryParameters`] and
//! applies the returned [`PageResult`] wholesale.
//!
//! Requests are tagged with a [`RequestToken`]. A result is only applied if
//! its token is the most recently issued one, so a slow stale response cannot
//! overwrite a newer page.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::api::NewsApi;
use crate::models::{
    combined_query, Country, DateRange, DateRangeError, KnownSource, Language, PageResult,
    QueryParameters, UnknownCodeError,
};
use crate::resolver::Resolver;

/// Advisory shown when a date filter yields nothing.
pub const EMPTY_DATE_RANGE_ADVISORY: &str = "No news found for the selected date range.";

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownCodeError::new("theme", s, ["light", "dark"].into_iter())),
        }
    }
}

/// Identifies one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Issues monotonically increasing request tokens.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` is the most recently issued one.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub country: Country,
    pub language: Language,
    pub page: u32,
    /// Text typed into the search box.
    pub manual_query: String,
    /// Selected keyword chips, in selection order.
    pub keywords: Vec<String>,
    pub date_range: DateRange,
    pub sources: Vec<KnownSource>,
    pub theme: Theme,

    pub loading: bool,
    pub advisory: Option<String>,
    pub result: PageResult,
    sequencer: RequestSequencer,
}

impl Session {
    pub fn new(country: Country, language: Language) -> Self {
        Self {
            country,
            language,
            page: 1,
            ..Self::default()
        }
    }

    /// Switch country. Language resets to the default and paging restarts.
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
        self.language = Language::default();
        self.page = 1;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_manual_query(&mut self, query: impl Into<String>) {
        self.manual_query = query.into();
        self.page = 1;
    }

    /// Select the chip if unselected, otherwise deselect it.
    pub fn toggle_keyword(&mut self, chip: &str) {
        if let Some(pos) = self.keywords.iter().position(|k| k == chip) {
            self.keywords.remove(pos);
        } else {
            self.keywords.push(chip.to_string());
        }
        self.page = 1;
    }

    pub fn toggle_source(&mut self, source: KnownSource) {
        if let Some(pos) = self.sources.iter().position(|s| *s == source) {
            self.sources.remove(pos);
        } else {
            self.sources.push(source);
        }
        self.page = 1;
    }

    /// Set or clear the start date; rejected edits leave the range unchanged.
    pub fn set_date_from(&mut self, from: Option<NaiveDate>) -> Result<(), DateRangeError> {
        self.date_range.set_from(from)?;
        self.page = 1;
        Ok(())
    }

    /// Set or clear the end date; rejected edits leave the range unchanged.
    pub fn set_date_to(&mut self, to: Option<NaiveDate>) -> Result<(), DateRangeError> {
        self.date_range.set_to(to)?;
        self.page = 1;
        Ok(())
    }

    /// Reset query, chips, dates and sources.
    pub fn clear_filters(&mut self) {
        self.manual_query.clear();
        self.keywords.clear();
        self.date_range.clear();
        self.sources.clear();
        self.page = 1;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Number of active advanced filters (query, from, to, sources).
    pub fn active_filter_count(&self) -> usize {
        [
            !self.query().is_empty(),
            self.date_range.from().is_some(),
            self.date_range.to().is_some(),
            !self.sources.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Manual text followed by the selected chips.
    pub fn query(&self) -> String {
        combined_query(&self.manual_query, &self.keywords)
    }

    /// Snapshot of the current search intent.
    pub fn query_parameters(&self) -> QueryParameters {
        QueryParameters {
            country: self.country,
            language: self.language,
            page: self.page.max(1),
            query: self.query(),
            date_range: self.date_range,
            sources: self.sources.clone(),
        }
    }

    /// Mark a request as in flight and return its token.
    pub fn begin_request(&mut self) -> RequestToken {
        self.loading = true;
        let token = self.sequencer.issue();
        debug!(?token, "Dispatched request");
        token
    }

    /// Apply a completed result if `token` is still current.
    ///
    /// Returns `false` (and changes nothing) for stale tokens.
    pub fn apply_result(&mut self, token: RequestToken, result: PageResult) -> bool {
        if !self.sequencer.is_current(token) {
            info!(?token, "Discarding stale result");
            return false;
        }

        let empty = result.total_results == 0 || result.articles.is_empty();
        self.advisory = (self.date_range.is_active() && empty)
            .then(|| EMPTY_DATE_RANGE_ADVISORY.to_string());
        self.page = result.current_page.max(1);
        self.result = result;
        self.loading = false;
        true
    }

    pub fn total_pages(&self) -> u32 {
        self.result.total_pages()
    }

    /// Run one full resolution cycle for the current state.
    pub async fn refresh<A: NewsApi>(&mut self, resolver: &Resolver<A>) -> bool {
        let token = self.begin_request();
        let params = self.query_parameters();
        let result = resolver.resolve(&params).await;
        self.apply_result(token, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, NewsApiResponse, QueryPair};
    use crate::error::RetrievalError;
    use crate::models::ResultOrigin;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn page(total: u32, current: u32) -> PageResult {
        PageResult {
            articles: vec![],
            total_results: total,
            current_page: current,
            origin: ResultOrigin::Everything,
        }
    }

    struct Unreachable;

    impl NewsApi for Unreachable {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            _params: &[QueryPair],
        ) -> Result<NewsApiResponse, RetrievalError> {
            Err(RetrievalError::Timeout {
                endpoint: endpoint.to_string(),
            })
        }
    }

    #[test]
    fn test_country_change_resets_language_and_page() {
        let mut session = Session::new(Country::Us, Language::En);
        session.set_language(Language::De);
        session.set_page(4);
        session.set_country(Country::De);
        assert_eq!(session.country, Country::De);
        assert_eq!(session.language, Language::En);
        assert_eq!(session.page, 1);
    }

    #[test]
    fn test_query_combines_manual_text_and_chips() {
        let mut session = Session::new(Country::Us, Language::En);
        session.set_manual_query(" bank ");
        session.toggle_keyword("malware");
        session.toggle_keyword("privacy");
        session.toggle_keyword("malware");
        assert_eq!(session.query(), "bank privacy");
        assert_eq!(session.query_parameters().query, "bank privacy");
    }

    #[test]
    fn test_toggle_source() {
        let mut session = Session::new(Country::Us, Language::En);
        session.toggle_source(KnownSource::Wired);
        session.toggle_source(KnownSource::Engadget);
        session.toggle_source(KnownSource::Wired);
        assert_eq!(session.sources, vec![KnownSource::Engadget]);
    }

    #[test]
    fn test_invalid_date_edit_is_rejected() {
        let mut session = Session::new(Country::Us, Language::En);
        session.set_date_to(Some(date("2026-10-10"))).unwrap();
        session.set_date_from(Some(date("2026-10-01"))).unwrap();

        assert!(session.set_date_from(Some(date("2026-10-12"))).is_err());
        assert!(session.set_date_to(Some(date("2026-09-30"))).is_err());
        assert_eq!(session.date_range.from(), Some(date("2026-10-01")));
        assert_eq!(session.date_range.to(), Some(date("2026-10-10")));
    }

    #[test]
    fn test_clear_filters() {
        let mut session = Session::new(Country::Us, Language::En);
        session.set_manual_query("x");
        session.toggle_keyword("exploit");
        session.toggle_source(KnownSource::Wired);
        session.set_date_from(Some(date("2026-10-01"))).unwrap();
        assert_eq!(session.active_filter_count(), 3);
        session.clear_filters();
        assert_eq!(session.active_filter_count(), 0);
        assert_eq!(session.query_parameters(), QueryParameters::default());
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut session = Session::new(Country::Us, Language::En);
        let first = session.begin_request();
        let second = session.begin_request();
        assert!(second > first);

        assert!(session.apply_result(second, page(41, 2)));
        assert!(!session.apply_result(first, page(100, 1)));
        assert_eq!(session.result.total_results, 41);
        assert_eq!(session.total_pages(), 3);
        assert!(!session.loading);
    }

    #[test]
    fn test_advisory_only_with_date_filter() {
        let mut session = Session::new(Country::Us, Language::En);
        let token = session.begin_request();
        session.apply_result(token, page(0, 1));
        assert_eq!(session.advisory, None);

        session.set_date_from(Some(date("2026-10-01"))).unwrap();
        let token = session.begin_request();
        session.apply_result(token, page(0, 1));
        assert_eq!(session.advisory.as_deref(), Some(EMPTY_DATE_RANGE_ADVISORY));
    }

    #[test]
    fn test_theme_toggle_and_parse() {
        let mut session = Session::default();
        assert_eq!(session.theme, Theme::Light);
        session.toggle_theme();
        assert_eq!(session.theme, Theme::Dark);
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[tokio::test]
    async fn test_refresh_without_credential_uses_offline_set() {
        let resolver = Resolver::new(Unreachable, None);
        let mut session = Session::new(Country::Gb, Language::En);
        session.set_page(2);
        assert!(session.refresh(&resolver).await);
        assert_eq!(session.result.origin, ResultOrigin::Fallback);
        assert_eq!(session.result.current_page, 2);
        assert_eq!(session.result.articles.len(), 20);
        assert_eq!(session.total_pages(), 5);
    }

    #[tokio::test]
    async fn test_refresh_with_failing_api_uses_offline_set() {
        let resolver = Resolver::new(Unreachable, Some("secret".into()));
        let mut session = Session::new(Country::Us, Language::En);
        session.refresh(&resolver).await;
        assert_eq!(session.result.origin, ResultOrigin::Fallback);
        assert!(!session.loading);
    }
}
