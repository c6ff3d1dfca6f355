//! # Country Detail Assembler
//!
//! Turns a country name (or a record the list view already has) into a
//! [`CountryDetail`], delivered in two ordered stages:
//!
//! ```text
//! request ──► resolve_primary ──► Stage::Partial (borders = [])
//!                                      │
//!                                      ▼
//!                    fan-out: one by_code lookup per border code
//!                                      │  (join_all, results kept by index)
//!                                      ▼
//!                               Stage::Complete (borders resolved)
//! ```
//!
//! A failed border lookup never sinks the record. The failed code is left
//! out of `borders` and reported in `unresolved` instead.

use std::fmt;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::sync::mpsc::Sender;

use crate::countries::{CountryDetail, CountrySource, RawCountryRecord, SourceError};

/// What the detail view was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailRequest {
    /// Exact common name; triggers a primary fetch.
    ByName(String),
    /// A record handed over by the caller; the primary fetch is skipped.
    Precomputed(Box<RawCountryRecord>),
}

impl DetailRequest {
    /// Name to show while the request is in flight.
    pub fn label(&self) -> &str {
        match self {
            DetailRequest::ByName(name) => name,
            DetailRequest::Precomputed(record) => record.common_name(),
        }
    }
}

/// A border code whose lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderResolutionError {
    pub code: String,
    pub reason: SourceError,
}

impl fmt::Display for BorderResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "border {}: {}", self.code, self.reason)
    }
}

impl std::error::Error for BorderResolutionError {}

/// One delivery from [`assemble`]. `Partial` always precedes `Complete`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Partial(CountryDetail),
    Complete {
        detail: CountryDetail,
        unresolved: Vec<BorderResolutionError>,
    },
}

impl Stage {
    pub fn detail(&self) -> &CountryDetail {
        match self {
            Stage::Partial(detail) | Stage::Complete { detail, .. } => detail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// The primary lookup failed or matched nothing. Terminal: no stages follow.
    NotFound { name: String, reason: SourceError },
    /// The receiver was dropped before delivery.
    ChannelClosed,
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleError::NotFound { name, reason } => {
                write!(f, "country '{name}' not found: {reason}")
            }
            AssembleError::ChannelClosed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for AssembleError {}

/// Resolves the primary record, fetching by exact name unless one was supplied.
pub async fn resolve_primary(
    source: &dyn CountrySource,
    request: DetailRequest,
) -> Result<RawCountryRecord, AssembleError> {
    match request {
        DetailRequest::Precomputed(record) => {
            debug!("Using precomputed record for {}", record.common_name());
            Ok(*record)
        }
        DetailRequest::ByName(name) => {
            info!("Resolving '{}' via {}", name, source.name());
            source
                .by_name(&name)
                .await
                .map_err(|reason| {
                    warn!("Primary lookup for '{}' failed: {}", name, reason);
                    AssembleError::NotFound { name, reason }
                })
        }
    }
}

/// Looks up every border code concurrently.
///
/// Returned names follow the order of `codes`, whatever order the lookups
/// complete in. Failed codes are collected separately, also in source order.
pub async fn resolve_borders(
    source: &dyn CountrySource,
    codes: &[String],
) -> (Vec<String>, Vec<BorderResolutionError>) {
    if codes.is_empty() {
        return (Vec::new(), Vec::new());
    }

    debug!("Resolving {} border codes: {:?}", codes.len(), codes);

    let lookups = codes.iter().map(|code| async move {
        let result = source.by_code(code).await;
        (code, result)
    });

    let mut names = Vec::with_capacity(codes.len());
    let mut unresolved = Vec::new();

    for (code, result) in join_all(lookups).await {
        match result {
            Ok(record) => names.push(record.common_name().to_string()),
            Err(reason) => {
                warn!("Border lookup for {} failed: {}", code, reason);
                unresolved.push(BorderResolutionError {
                    code: code.clone(),
                    reason,
                });
            }
        }
    }

    (names, unresolved)
}

/// Assembles a country detail and delivers it to `sender` in two stages.
///
/// Returns `Err(NotFound)` without sending anything if the primary record
/// cannot be resolved.
pub async fn assemble(
    source: &dyn CountrySource,
    request: DetailRequest,
    sender: Sender<Stage>,
) -> Result<(), AssembleError> {
    let primary = resolve_primary(source, request).await?;
    let partial = CountryDetail::from_raw(&primary);

    if sender.send(Stage::Partial(partial.clone())).await.is_err() {
        warn!("Partial stage send failed: receiver dropped");
        return Err(AssembleError::ChannelClosed);
    }

    let (borders, unresolved) = resolve_borders(source, primary.border_codes()).await;
    info!(
        "Assembled {}: {} borders resolved, {} unresolved",
        partial.name,
        borders.len(),
        unresolved.len()
    );

    let complete = Stage::Complete {
        detail: partial.with_borders(borders),
        unresolved,
    };
    if sender.send(complete).await.is_err() {
        warn!("Complete stage send failed: receiver dropped");
        return Err(AssembleError::ChannelClosed);
    }

    Ok(())
}
