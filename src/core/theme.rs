//! # Theme Store
//!
//! One process-wide dark/light flag. Created once at startup and handed to
//! whoever needs it; nothing reads it from a global.
//!
//! ```text
//! ThemeStore ──toggle()──► watch channel ──► subscribers (watch::Receiver)
//!            ──current()─► Theme
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[serde(rename = "light")]
    #[default]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the header toggle: names the mode you would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Cheap to clone; every clone shares the same flag.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    sender: Arc<watch::Sender<Theme>>,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Theme {
        *self.sender.borrow()
    }

    pub fn is_dark(&self) -> bool {
        self.current().is_dark()
    }

    /// Flips the flag and returns the new value. Works with zero subscribers.
    pub fn toggle(&self) -> Theme {
        self.sender.send_modify(|theme| *theme = theme.toggled());
        let theme = self.current();
        log::info!("Theme switched to {:?}", theme);
        theme
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_returns_new_value() {
        let store = ThemeStore::new(Theme::Light);
        assert!(!store.is_dark());
        assert_eq!(store.toggle(), Theme::Dark);
        assert!(store.is_dark());
        assert_eq!(store.toggle(), Theme::Light);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ThemeStore::new(Theme::Light);
        let other = store.clone();
        other.toggle();
        assert_eq!(store.current(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_subscriber_sees_toggle() {
        let store = ThemeStore::new(Theme::Dark);
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow(), Theme::Dark);

        store.toggle();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Theme::Light);
    }

    #[test]
    fn test_parse_and_labels() {
        assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light "), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggle_label(), "Dark Mode");
        assert_eq!(Theme::Dark.toggle_label(), "Light Mode");
    }
}
