//! # Application State
//!
//! Core business state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn CountrySource>   // where records come from
//! ├── theme: ThemeStore                // shared dark/light flag
//! ├── countries: ListState             // list view data
//! ├── query / region / selected        // list filter + cursor
//! ├── route: Route                     // which view is showing
//! ├── history: Vec<DetailRequest>      // detail pages to go back to
//! ├── detail: Option<DetailState>      // detail view data
//! ├── active_token: Option<NavigationToken>
//! └── status_message: String           // footer text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::theme::ThemeStore;
use crate::countries::{BorderResolutionError, CountryDetail, CountrySource, DetailRequest, RawCountryRecord};

/// Identifies one navigation to a detail view. Deliveries tagged with any
/// other token are stale and get dropped.
pub type NavigationToken = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded(Vec<RawCountryRecord>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    All,
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// Cycles to the next region filter (wraps around)
    pub fn next(self) -> Region {
        match self {
            Region::All => Region::Africa,
            Region::Africa => Region::Americas,
            Region::Americas => Region::Asia,
            Region::Asia => Region::Europe,
            Region::Europe => Region::Oceania,
            Region::Oceania => Region::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::All => "All regions",
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }

    pub fn matches(self, region: &str) -> bool {
        match self {
            Region::All => true,
            other => other.label().eq_ignore_ascii_case(region),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Detail(DetailRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading {
        label: String,
    },
    NotFound {
        name: String,
    },
    Ready {
        detail: CountryDetail,
        /// True until the border fan-out has settled.
        borders_pending: bool,
        unresolved: Vec<BorderResolutionError>,
        selected_border: Option<usize>,
    },
}

pub struct App {
    pub source: Arc<dyn CountrySource>,
    pub theme: ThemeStore,
    pub countries: ListState,
    pub query: String,
    pub region: Region,
    /// Index into `visible_countries()`.
    pub selected: usize,
    pub route: Route,
    pub history: Vec<DetailRequest>,
    pub detail: Option<DetailState>,
    pub active_token: Option<NavigationToken>,
    next_token: NavigationToken,
    pub status_message: String,
}

impl App {
    pub fn new(source: Arc<dyn CountrySource>, theme: ThemeStore) -> Self {
        Self {
            source,
            theme,
            countries: ListState::Loading,
            query: String::new(),
            region: Region::default(),
            selected: 0,
            route: Route::Home,
            history: Vec::new(),
            detail: None,
            active_token: None,
            next_token: 0,
            status_message: String::from("Where in the world?"),
        }
    }

    /// Hands out a fresh token and marks it active.
    pub fn issue_token(&mut self) -> NavigationToken {
        self.next_token += 1;
        self.active_token = Some(self.next_token);
        self.next_token
    }

    /// Countries passing the current name query and region filter, in API order.
    pub fn visible_countries(&self) -> Vec<&RawCountryRecord> {
        let ListState::Loaded(records) = &self.countries else {
            return Vec::new();
        };
        let query = self.query.to_lowercase();
        records
            .iter()
            .filter(|record| self.region.matches(&record.region))
            .filter(|record| query.is_empty() || record.common_name().to_lowercase().contains(&query))
            .collect()
    }

    pub fn selected_country(&self) -> Option<&RawCountryRecord> {
        self.visible_countries().get(self.selected).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.countries, ListState::Loading);
        assert!(app.active_token.is_none());
        assert!(app.visible_countries().is_empty());
    }

    #[test]
    fn test_issue_token_is_monotonic() {
        let mut app = test_app();
        let first = app.issue_token();
        let second = app.issue_token();
        assert!(second > first);
        assert_eq!(app.active_token, Some(second));
    }

    #[test]
    fn test_visible_countries_filters_by_query_and_region() {
        let mut app = test_app();
        let mut japan = record("Japan", &[]);
        japan.region = "Asia".to_string();
        app.countries = ListState::Loaded(vec![
            record("France", &[]),
            record("Finland", &[]),
            japan,
        ]);

        app.query = "fin".to_string();
        let names: Vec<_> = app.visible_countries().iter().map(|r| r.common_name()).collect();
        assert_eq!(names, vec!["Finland"]);

        app.query.clear();
        app.region = Region::Asia;
        let names: Vec<_> = app.visible_countries().iter().map(|r| r.common_name()).collect();
        assert_eq!(names, vec!["Japan"]);
    }

    #[test]
    fn test_region_cycle_wraps() {
        let mut region = Region::All;
        for _ in 0..6 {
            region = region.next();
        }
        assert_eq!(region, Region::All);
        assert!(Region::Europe.matches("europe"));
        assert!(!Region::Europe.matches("Asia"));
        assert!(Region::All.matches(""));
    }
}
