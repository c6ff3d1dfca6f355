use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

// ============================================================================
// Raw API Types
// ============================================================================

/// A JSON object whose keys are kept in document order.
///
/// The upstream API keys languages, currencies and native names by code.
/// Display strings are joined in the order the API sent them, so a sorted
/// map would change what the user sees.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T>(pub Vec<(String, T)>);

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Keyed(Vec::new())
    }
}

impl<T> Keyed<T> {
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Keyed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedVisitor<T> {
            type Value = Keyed<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by code")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(Keyed(entries))
            }

            // Some records carry `null` where a map is expected
            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Keyed::default())
            }
        }

        deserializer.deserialize_any(KeyedVisitor(PhantomData))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NativeName {
    #[serde(default)]
    pub official: Option<String>,
    #[serde(default)]
    pub common: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NameParts {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
    #[serde(rename = "nativeName", default)]
    pub native_name: Keyed<NativeName>,
}

/// The `name` field: normally an object, occasionally a bare string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawName {
    Plain(String),
    Structured(NameParts),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// One country as returned by the REST Countries v3.1 API.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawCountryRecord {
    pub name: RawName,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub languages: Keyed<String>,
    #[serde(default)]
    pub currencies: Keyed<Currency>,
    /// Absent for island nations.
    #[serde(default)]
    pub borders: Option<Vec<String>>,
}

impl RawCountryRecord {
    /// Common name, falling back to the official name or the bare name string.
    pub fn common_name(&self) -> &str {
        match &self.name {
            RawName::Plain(name) => name,
            RawName::Structured(parts) => parts
                .common
                .as_deref()
                .or(parts.official.as_deref())
                .unwrap_or_default(),
        }
    }

    /// First native name in document order, if the record has any.
    pub fn native_name(&self) -> Option<&str> {
        match &self.name {
            RawName::Plain(_) => None,
            RawName::Structured(parts) => parts
                .native_name
                .values()
                .next()
                .and_then(|native| native.common.as_deref()),
        }
    }

    /// Border codes; an absent list reads as empty.
    pub fn border_codes(&self) -> &[String] {
        self.borders.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Normalized Detail
// ============================================================================

/// The detail view's record.
///
/// `borders` starts empty and is filled in once, after every border lookup
/// has settled. Consumers must not assume it is populated on first delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountryDetail {
    pub name: String,
    pub native_name: Option<String>,
    pub population: u64,
    pub region: String,
    pub subregion: String,
    pub capital: Vec<String>,
    pub flag: String,
    pub top_level_domains: Vec<String>,
    pub languages: String,
    pub currencies: String,
    pub borders: Vec<String>,
}

impl CountryDetail {
    /// Builds every non-border field from a raw record. Deterministic and total.
    pub fn from_raw(raw: &RawCountryRecord) -> Self {
        Self {
            name: raw.common_name().to_string(),
            native_name: raw.native_name().map(str::to_string),
            population: raw.population,
            region: raw.region.clone(),
            subregion: raw.subregion.clone(),
            capital: raw.capital.clone(),
            flag: raw.flags.svg.clone(),
            top_level_domains: raw.tld.clone(),
            languages: raw
                .languages
                .values()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            currencies: raw
                .currencies
                .values()
                .map(|currency| currency.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            borders: Vec::new(),
        }
    }

    /// Native name for display; the common name stands in when there is none.
    pub fn display_native_name(&self) -> &str {
        self.native_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns a copy with the resolved border names merged in.
    pub fn with_borders(&self, borders: Vec<String>) -> Self {
        Self {
            borders,
            ..self.clone()
        }
    }
}
