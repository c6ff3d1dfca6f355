//! # Core Application Logic
//!
//! This module contains Atlas's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • ThemeStore           │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │ countries  │
//!             │  Adapter   │          │ (HTTP I/O) │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, holding all application state
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`theme`]: The injectable dark/light `ThemeStore`
//! - [`config`]: Layered configuration
//! - [`format`]: Display formatting shared by the views

pub mod action;
pub mod config;
pub mod format;
pub mod state;
pub mod theme;
