//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Network calls run on tokio tasks and report back over a std `mpsc`
//! channel of `Action`s. The loop drains that channel after each draw.
//! A partial detail stage ends the drain early, so it is always drawn
//! before the complete stage that follows it is applied.
//!
//! Navigating away aborts the running assembly. Anything that still slips
//! through carries a stale token and is dropped by `update()`.
//!
//! ## Redraw Strategy
//!
//! - **Loading** (list, detail or borders pending): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, results or theme changes.

mod component;
mod components;
mod event;
mod palette;
#[cfg(test)]
mod test_helpers;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, DetailState, ListState, NavigationToken, Route};
use crate::core::theme::ThemeStore;
use crate::countries::{CountrySource, DetailRequest, RestCountriesSource, Stage, assemble};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const PAGE: isize = 10;

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Translates a key event into an action for the current view.
fn action_for(event: TuiEvent, route: &Route) -> Option<Action> {
    match (route, event) {
        (_, TuiEvent::ForceQuit) => Some(Action::Quit),
        (_, TuiEvent::ToggleTheme) => Some(Action::ToggleTheme),
        (_, TuiEvent::Resize) => None,

        (Route::Home, TuiEvent::Reload) => Some(Action::LoadCountries),
        (Route::Home, TuiEvent::Escape) => Some(Action::Quit),
        (Route::Home, TuiEvent::InputChar(c)) => Some(Action::QueryInput(c)),
        (Route::Home, TuiEvent::Backspace) => Some(Action::QueryBackspace),
        (Route::Home, TuiEvent::Tab) => Some(Action::CycleRegion),
        (Route::Home, TuiEvent::Up) => Some(Action::SelectPrev),
        (Route::Home, TuiEvent::Down) => Some(Action::SelectNext),
        (Route::Home, TuiEvent::PageUp) => Some(Action::SelectBy(-PAGE)),
        (Route::Home, TuiEvent::PageDown) => Some(Action::SelectBy(PAGE)),
        (Route::Home, TuiEvent::Submit) => Some(Action::OpenSelected),

        (Route::Detail(_), TuiEvent::Escape | TuiEvent::Backspace) => Some(Action::Back),
        (Route::Detail(_), TuiEvent::Left | TuiEvent::Up) => Some(Action::SelectBorderPrev),
        (Route::Detail(_), TuiEvent::Right | TuiEvent::Down | TuiEvent::Tab) => {
            Some(Action::SelectBorderNext)
        }
        (Route::Detail(_), TuiEvent::Submit) => Some(Action::OpenSelectedBorder),
        (Route::Detail(_), TuiEvent::InputChar('q')) => Some(Action::Quit),

        _ => None,
    }
}

/// True while a spinner is on screen.
fn is_loading(app: &App) -> bool {
    match app.route {
        Route::Home => matches!(app.countries, ListState::Loading),
        Route::Detail(_) => matches!(
            app.detail,
            Some(DetailState::Loading { .. }) | Some(DetailState::Ready { borders_pending: true, .. })
        ),
    }
}

/// Performs the I/O an effect asks for. Returns true when the app should quit.
fn run_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    detail_handles: &mut Vec<tokio::task::AbortHandle>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::LoadCountries => {
            spawn_country_list(app.source.clone(), tx.clone());
            false
        }
        Effect::SpawnDetail { token, request } => {
            cancel(detail_handles);
            *detail_handles = spawn_detail(app.source.clone(), token, request, tx.clone());
            false
        }
        Effect::CancelDetail => {
            cancel(detail_handles);
            false
        }
    }
}

/// What a pass over the background result channel did.
#[derive(Debug, Default, PartialEq)]
struct Drained {
    received: bool,
    quit: bool,
}

/// Applies queued background results.
///
/// Stops right after a partial stage for the active navigation, so that
/// stage is drawn before whatever sits behind it in the channel. Stale
/// stages are dropped by `update()` and do not end the pass.
fn drain_results(
    app: &mut App,
    rx: &mpsc::Receiver<Action>,
    tx: &mpsc::Sender<Action>,
    detail_handles: &mut Vec<tokio::task::AbortHandle>,
) -> Drained {
    let mut drained = Drained::default();
    while let Ok(action) = rx.try_recv() {
        drained.received = true;
        let live_partial = matches!(
            &action,
            Action::DetailStage {
                token,
                stage: Stage::Partial(_),
            } if app.active_token == Some(*token)
        );
        let effect = update(app, action);
        if run_effect(effect, app, tx, detail_handles) {
            drained.quit = true;
            break;
        }
        if live_partial {
            break;
        }
    }
    drained
}

fn cancel(handles: &mut Vec<tokio::task::AbortHandle>) {
    if !handles.is_empty() {
        debug!("Aborting {} in-flight detail task(s)", handles.len());
    }
    for handle in handles.drain(..) {
        handle.abort();
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn CountrySource> = Arc::new(RestCountriesSource::new(
        Some(config.base_url.clone()),
        config.timeout,
    ));
    let theme = ThemeStore::new(config.theme);
    let mut theme_updates = theme.subscribe();
    let mut app = App::new(source, theme);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handles for the current detail assembly
    let mut detail_handles: Vec<tokio::task::AbortHandle> = Vec::new();

    let mut should_quit = run_effect(update(&mut app, Action::LoadCountries), &app, &tx, &mut detail_handles);
    if let Some(name) = config.initial_country.clone() {
        let effect = update(&mut app, Action::OpenCountry(name));
        should_quit |= run_effect(effect, &app, &tx, &mut detail_handles);
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        if theme_updates.has_changed().unwrap_or(false) {
            theme_updates.borrow_and_update();
            needs_redraw = true;
        }

        let loading = is_loading(&app);
        if needs_redraw || loading {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when a spinner is showing, long when idle
        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = action_for(event, &app.route) {
                debug!("Key action: {:?}", action);
                let effect = update(&mut app, action);
                if run_effect(effect, &app, &tx, &mut detail_handles) {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results
        let drained = drain_results(&mut app, &rx, &tx, &mut detail_handles);
        needs_redraw |= drained.received;
        should_quit |= drained.quit;
    }

    cancel(&mut detail_handles);
    ratatui::restore();
    info!("Atlas shutting down");
    Ok(())
}

fn spawn_country_list(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>) {
    info!("Spawning country list fetch via {}", source.name());
    tokio::spawn(async move {
        let action = match source.all_countries().await {
            Ok(records) => Action::CountriesLoaded(records),
            Err(e) => Action::CountriesFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send country list result: receiver dropped");
        }
    });
}

fn spawn_detail(
    source: Arc<dyn CountrySource>,
    token: NavigationToken,
    request: DetailRequest,
    tx: mpsc::Sender<Action>,
) -> Vec<tokio::task::AbortHandle> {
    info!("Spawning detail assembly for '{}' (token {})", request.label(), token);

    // Async channel for the two stages
    let (stage_tx, mut stage_rx) = tokio::sync::mpsc::channel::<Stage>(2);

    let tx_assemble = tx.clone();
    let assemble_handle = tokio::spawn(async move {
        if let Err(error) = assemble(source.as_ref(), request, stage_tx).await {
            info!("Assembly for token {} ended: {}", token, error);
            if tx_assemble
                .send(Action::DetailFailed { token, error })
                .is_err()
            {
                warn!("Failed to send assembly failure: receiver dropped");
            }
        }
    });

    // Forward stages to the Action channel, tagged with the token
    let forward_handle = tokio::spawn(async move {
        while let Some(stage) = stage_rx.recv().await {
            debug!("Forwarding {} stage for token {}", stage_name(&stage), token);
            if tx.send(Action::DetailStage { token, stage }).is_err() {
                warn!("Failed to forward detail stage: receiver dropped");
                return;
            }
        }
    });

    vec![assemble_handle.abort_handle(), forward_handle.abort_handle()]
}

fn stage_name(stage: &Stage) -> &'static str {
    match stage {
        Stage::Partial(_) => "partial",
        Stage::Complete { .. } => "complete",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use crate::countries::CountryDetail;
    use crate::test_support::{FakeSource, record, test_app};

    #[test]
    fn test_home_keys() {
        assert!(matches!(action_for(TuiEvent::InputChar('a'), &Route::Home), Some(Action::QueryInput('a'))));
        assert!(matches!(action_for(TuiEvent::Submit, &Route::Home), Some(Action::OpenSelected)));
        assert!(matches!(action_for(TuiEvent::Tab, &Route::Home), Some(Action::CycleRegion)));
        assert!(matches!(action_for(TuiEvent::Escape, &Route::Home), Some(Action::Quit)));
        assert!(action_for(TuiEvent::Left, &Route::Home).is_none());
    }

    #[test]
    fn test_detail_keys() {
        let route = Route::Detail(DetailRequest::ByName("France".to_string()));
        assert!(matches!(action_for(TuiEvent::Escape, &route), Some(Action::Back)));
        assert!(matches!(action_for(TuiEvent::Right, &route), Some(Action::SelectBorderNext)));
        assert!(matches!(action_for(TuiEvent::Submit, &route), Some(Action::OpenSelectedBorder)));
        // Typing does not leak into the list query from the detail view
        assert!(action_for(TuiEvent::InputChar('a'), &route).is_none());
        assert!(matches!(action_for(TuiEvent::ToggleTheme, &route), Some(Action::ToggleTheme)));
    }

    #[tokio::test]
    async fn test_spawn_detail_tags_stages_with_token() {
        let source: Arc<dyn CountrySource> = Arc::new(
            FakeSource::new()
                .with_country(record("Hub", &["AAA"]))
                .with_code("AAA", record("Alpha", &[])),
        );
        let (tx, rx) = mpsc::channel();

        let handles = spawn_detail(source, 7, DetailRequest::ByName("Hub".to_string()), tx);
        assert_eq!(handles.len(), 2);

        let received = tokio::task::spawn_blocking(move || {
            let mut actions = Vec::new();
            while let Ok(action) = rx.recv_timeout(Duration::from_secs(5)) {
                actions.push(action);
                if actions.len() == 2 {
                    break;
                }
            }
            actions
        })
        .await
        .unwrap();

        match received.as_slice() {
            [
                Action::DetailStage { token: 7, stage: Stage::Partial(partial) },
                Action::DetailStage { token: 7, stage: Stage::Complete { detail, .. } },
            ] => {
                assert!(partial.borders.is_empty());
                assert_eq!(detail.borders, vec!["Alpha"]);
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    fn stage(token: NavigationToken, stage: Stage) -> Action {
        Action::DetailStage { token, stage }
    }

    fn partial(name: &str) -> Stage {
        Stage::Partial(CountryDetail {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn complete(name: &str, borders: &[&str]) -> Stage {
        Stage::Complete {
            detail: CountryDetail {
                name: name.to_string(),
                borders: borders.iter().map(|b| b.to_string()).collect(),
                ..Default::default()
            },
            unresolved: Vec::new(),
        }
    }

    fn open(app: &mut App, name: &str) -> NavigationToken {
        match update(app, Action::OpenCountry(name.to_string())) {
            Effect::SpawnDetail { token, .. } => token,
            other => panic!("expected SpawnDetail, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_stage_drawn_before_complete() {
        let mut app = test_app();
        let token = open(&mut app, "France");
        let (tx, rx) = mpsc::channel();
        let mut handles = Vec::new();

        tx.send(stage(token, partial("France"))).unwrap();
        tx.send(stage(token, complete("France", &["Andorra", "Belgium"]))).unwrap();

        // First pass stops on the partial stage
        let drained = drain_results(&mut app, &rx, &tx, &mut handles);
        assert_eq!(drained, Drained { received: true, quit: false });
        assert!(matches!(
            app.detail,
            Some(DetailState::Ready { borders_pending: true, .. })
        ));

        // Next pass (after a draw) merges the borders
        drain_results(&mut app, &rx, &tx, &mut handles);
        match &app.detail {
            Some(DetailState::Ready { detail, borders_pending: false, .. }) => {
                assert_eq!(detail.borders, vec!["Andorra", "Belgium"]);
            }
            other => panic!("expected complete detail, got {:?}", other),
        }

        assert_eq!(drain_results(&mut app, &rx, &tx, &mut handles), Drained::default());
    }

    #[test]
    fn test_stale_partial_does_not_end_drain() {
        let mut app = test_app();
        let stale = open(&mut app, "France");
        let current = open(&mut app, "Spain");
        let (tx, rx) = mpsc::channel();
        let mut handles = Vec::new();

        tx.send(stage(stale, partial("France"))).unwrap();
        tx.send(stage(current, partial("Spain"))).unwrap();
        tx.send(stage(current, complete("Spain", &["Portugal"]))).unwrap();

        drain_results(&mut app, &rx, &tx, &mut handles);
        match &app.detail {
            Some(DetailState::Ready { detail, borders_pending: true, .. }) => {
                assert_eq!(detail.name, "Spain");
            }
            other => panic!("expected Spain partial, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_navigation_aborts_running_assembly() {
        let source: Arc<dyn CountrySource> = Arc::new(
            FakeSource::new()
                .with_country(record("Hub", &["AAA"]))
                .with_code("AAA", record("Alpha", &[]))
                .with_delay("AAA", Duration::from_millis(200))
                .with_country(record("Iceland", &[])),
        );
        let mut app = App::new(source, ThemeStore::new(Theme::Light));
        let (tx, rx) = mpsc::channel();
        let mut handles = Vec::new();

        let effect = update(&mut app, Action::OpenCountry("Hub".to_string()));
        run_effect(effect, &app, &tx, &mut handles);
        let hub = app.active_token.unwrap();

        // Hub is now waiting on its border lookup
        tokio::time::sleep(Duration::from_millis(50)).await;

        let effect = update(&mut app, Action::OpenCountry("Iceland".to_string()));
        run_effect(effect, &app, &tx, &mut handles);
        let iceland = app.active_token.unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;

        let received: Vec<Action> = rx.try_iter().collect();
        assert!(!received.iter().any(|action| matches!(
            action,
            Action::DetailStage { token, stage: Stage::Complete { .. } } if *token == hub
        )));
        assert!(received.iter().any(|action| matches!(
            action,
            Action::DetailStage { token, stage: Stage::Complete { .. } } if *token == iceland
        )));
    }

    #[test]
    fn test_back_to_list_cancels_handles() {
        let mut app = test_app();
        open(&mut app, "France");
        let (tx, _rx) = mpsc::channel();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let task = runtime.spawn(std::future::pending::<()>());
        let mut handles = vec![task.abort_handle()];

        let effect = update(&mut app, Action::Back);
        assert!(!run_effect(effect, &app, &tx, &mut handles));
        assert!(handles.is_empty());
        let result = runtime.block_on(task);
        assert!(result.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_spawn_detail_reports_not_found() {
        let source: Arc<dyn CountrySource> = Arc::new(FakeSource::new());
        let (tx, rx) = mpsc::channel();

        spawn_detail(source, 3, DetailRequest::ByName("Unknownland".to_string()), tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(action, Action::DetailFailed { token: 3, .. }));
    }
}
