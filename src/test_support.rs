//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::state::App;
use crate::core::theme::{Theme, ThemeStore};
use crate::countries::types::{NameParts, RawName};
use crate::countries::{CountrySource, RawCountryRecord, SourceError};

/// Builds a minimal record with the given common name and border codes.
/// An empty border slice produces an absent `borders` field.
pub fn record(name: &str, borders: &[&str]) -> RawCountryRecord {
    RawCountryRecord {
        name: RawName::Structured(NameParts {
            common: Some(name.to_string()),
            ..Default::default()
        }),
        population: 1000,
        region: "Europe".to_string(),
        subregion: String::new(),
        capital: vec![format!("{name} City")],
        flags: Default::default(),
        tld: Vec::new(),
        languages: Default::default(),
        currencies: Default::default(),
        borders: if borders.is_empty() {
            None
        } else {
            Some(borders.iter().map(|b| b.to_string()).collect())
        },
    }
}

/// An in-memory source that records every lookup it serves.
#[derive(Default)]
pub struct FakeSource {
    by_name: HashMap<String, RawCountryRecord>,
    by_code: HashMap<String, RawCountryRecord>,
    delays: HashMap<String, Duration>,
    name_calls: Mutex<Vec<String>>,
    code_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, record: RawCountryRecord) -> Self {
        self.by_name.insert(record.common_name().to_string(), record);
        self
    }

    pub fn with_code(mut self, code: &str, record: RawCountryRecord) -> Self {
        self.by_code.insert(code.to_string(), record);
        self
    }

    pub fn with_delay(mut self, code: &str, delay: Duration) -> Self {
        self.delays.insert(code.to_string(), delay);
        self
    }

    pub fn name_calls(&self) -> Vec<String> {
        self.name_calls.lock().unwrap().clone()
    }

    pub fn code_calls(&self) -> Vec<String> {
        self.code_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CountrySource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn all_countries(&self) -> Result<Vec<RawCountryRecord>, SourceError> {
        Ok(self.by_name.values().cloned().collect())
    }

    async fn by_name(&self, name: &str) -> Result<RawCountryRecord, SourceError> {
        self.name_calls.lock().unwrap().push(name.to_string());
        self.by_name.get(name).cloned().ok_or(SourceError::Api {
            status: 404,
            message: "Not Found".to_string(),
        })
    }

    async fn by_code(&self, code: &str) -> Result<RawCountryRecord, SourceError> {
        self.code_calls.lock().unwrap().push(code.to_string());
        if let Some(delay) = self.delays.get(code) {
            tokio::time::sleep(*delay).await;
        }
        self.by_code.get(code).cloned().ok_or(SourceError::Api {
            status: 404,
            message: "Not Found".to_string(),
        })
    }
}

/// Creates a test App backed by an empty FakeSource, light theme.
pub fn test_app() -> App {
    App::new(Arc::new(FakeSource::new()), ThemeStore::new(Theme::Light))
}
