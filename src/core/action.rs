//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User presses Enter on a country? That's `Action::OpenSelected`.
//! A border lookup batch settles? That's `Action::DetailStage { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! caller should start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::{App, DetailState, ListState, NavigationToken, Route};
use crate::countries::{AssembleError, DetailRequest, RawCountryRecord, Stage};

#[derive(Debug)]
pub enum Action {
    Quit,
    /// (Re)fetch the country list.
    LoadCountries,
    CountriesLoaded(Vec<RawCountryRecord>),
    CountriesFailed(String),

    // List view
    QueryInput(char),
    QueryBackspace,
    CycleRegion,
    SelectNext,
    SelectPrev,
    SelectBy(isize),
    OpenSelected,

    // Detail view
    /// Navigate to a country by exact common name.
    OpenCountry(String),
    SelectBorderNext,
    SelectBorderPrev,
    OpenSelectedBorder,
    Back,

    ToggleTheme,

    // Background results
    DetailStage {
        token: NavigationToken,
        stage: Stage,
    },
    DetailFailed {
        token: NavigationToken,
        error: AssembleError,
    },
}

/// I/O the event loop should perform after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    LoadCountries,
    /// Cancel any running assembly and start this one.
    SpawnDetail {
        token: NavigationToken,
        request: DetailRequest,
    },
    /// Cancel any running assembly.
    CancelDetail,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::LoadCountries => {
            app.countries = ListState::Loading;
            Effect::LoadCountries
        }
        Action::CountriesLoaded(records) => {
            info!("Country list loaded: {} records", records.len());
            app.countries = ListState::Loaded(records);
            app.selected = 0;
            Effect::None
        }
        Action::CountriesFailed(message) => {
            warn!("Country list failed: {}", message);
            app.countries = ListState::Failed(message);
            Effect::None
        }

        Action::QueryInput(c) => {
            app.query.push(c);
            app.selected = 0;
            Effect::None
        }
        Action::QueryBackspace => {
            app.query.pop();
            app.selected = 0;
            Effect::None
        }
        Action::CycleRegion => {
            app.region = app.region.next();
            app.selected = 0;
            app.status_message = format!("Filter: {}", app.region.label());
            Effect::None
        }
        Action::SelectNext => update(app, Action::SelectBy(1)),
        Action::SelectPrev => update(app, Action::SelectBy(-1)),
        Action::SelectBy(delta) => {
            let count = app.visible_countries().len();
            if count > 0 {
                let last = count - 1;
                app.selected = app.selected.saturating_add_signed(delta).min(last);
            }
            Effect::None
        }
        Action::OpenSelected => match app.selected_country().cloned() {
            Some(record) => navigate(app, DetailRequest::Precomputed(Box::new(record)), true),
            None => Effect::None,
        },

        Action::OpenCountry(name) => navigate(app, DetailRequest::ByName(name), true),
        Action::SelectBorderNext => {
            step_border(app, 1);
            Effect::None
        }
        Action::SelectBorderPrev => {
            step_border(app, -1);
            Effect::None
        }
        Action::OpenSelectedBorder => {
            let target = match &app.detail {
                Some(DetailState::Ready {
                    detail,
                    selected_border: Some(idx),
                    ..
                }) => detail.borders.get(*idx).cloned(),
                _ => None,
            };
            match target {
                Some(name) => navigate(app, DetailRequest::ByName(name), true),
                None => Effect::None,
            }
        }
        Action::Back => go_back(app),

        Action::ToggleTheme => {
            let theme = app.theme.toggle();
            app.status_message = format!("Theme: {:?}", theme);
            Effect::None
        }

        Action::DetailStage { token, stage } => {
            if app.active_token != Some(token) {
                debug!("Discarding stale stage for token {}", token);
                return Effect::None;
            }
            apply_stage(app, stage);
            Effect::None
        }
        Action::DetailFailed { token, error } => {
            if app.active_token != Some(token) {
                debug!("Discarding stale failure for token {}: {}", token, error);
                return Effect::None;
            }
            match error {
                AssembleError::NotFound { name, .. } => {
                    app.detail = Some(DetailState::NotFound { name });
                }
                AssembleError::ChannelClosed => {
                    debug!("Assembly for token {} lost its receiver", token);
                }
            }
            Effect::None
        }
    }
}

/// Starts a detail navigation. The current page is pushed onto history
/// when `push_history` is set.
fn navigate(app: &mut App, request: DetailRequest, push_history: bool) -> Effect {
    if push_history && let Route::Detail(current) = &app.route {
        app.history.push(current.clone());
    }

    let token = app.issue_token();
    info!("Navigating to '{}' (token {})", request.label(), token);

    app.detail = Some(DetailState::Loading {
        label: request.label().to_string(),
    });
    app.route = Route::Detail(request.clone());
    // Status lines describe the page they were raised on
    app.status_message.clear();
    Effect::SpawnDetail { token, request }
}

fn go_back(app: &mut App) -> Effect {
    match app.route {
        Route::Home => Effect::None,
        Route::Detail(_) => match app.history.pop() {
            Some(previous) => navigate(app, previous, false),
            None => {
                info!("Back to country list");
                app.route = Route::Home;
                app.detail = None;
                app.active_token = None;
                app.status_message.clear();
                Effect::CancelDetail
            }
        },
    }
}

fn apply_stage(app: &mut App, stage: Stage) {
    match stage {
        Stage::Partial(detail) => {
            app.detail = Some(DetailState::Ready {
                detail,
                borders_pending: true,
                unresolved: Vec::new(),
                selected_border: None,
            });
        }
        Stage::Complete { detail, unresolved } => {
            app.status_message = if unresolved.is_empty() {
                String::new()
            } else {
                format!("{} border(s) could not be resolved", unresolved.len())
            };
            let selected_border = if detail.borders.is_empty() { None } else { Some(0) };
            app.detail = Some(DetailState::Ready {
                detail,
                borders_pending: false,
                unresolved,
                selected_border,
            });
        }
    }
}

fn step_border(app: &mut App, delta: isize) {
    if let Some(DetailState::Ready {
        detail,
        selected_border: Some(idx),
        ..
    }) = &mut app.detail
    {
        let last = detail.borders.len().saturating_sub(1);
        *idx = idx.saturating_add_signed(delta).min(last);
    }
}
