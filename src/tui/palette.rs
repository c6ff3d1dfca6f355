//! Colours for each theme. Every component takes a `Palette` prop instead
//! of hard-coding colours, so a theme switch is one redraw away.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::Theme;

/// Braille spinner frames for loading states.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub element: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(32, 44, 55),
                element: Color::Rgb(43, 57, 69),
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                error: Color::LightRed,
            },
            Theme::Light => Self {
                background: Color::Rgb(250, 250, 250),
                element: Color::White,
                text: Color::Rgb(17, 21, 23),
                muted: Color::DarkGray,
                accent: Color::Blue,
                error: Color::Red,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn element(&self) -> Style {
        Style::default().fg(self.text).bg(self.element)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }
}
