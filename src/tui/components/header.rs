//! # Header Component
//!
//! Top bar: the app title on the left, the theme toggle hint on the right.
//!
//! ```text
//! Where in the world?                                   ☾ Dark Mode (Ctrl+T)
//! ```
//!
//! Stateless. The toggle label names the mode you would switch *to*, so it
//! reads "Dark Mode" while the light theme is active.

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub const TITLE: &str = "Where in the world?";

pub struct Header {
    pub theme: Theme,
    pub palette: Palette,
}

impl Header {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            palette: Palette::for_theme(theme),
        }
    }

    fn toggle_text(&self) -> String {
        let icon = if self.theme.is_dark() { "☀" } else { "☾" };
        format!("{icon} {} (Ctrl+T)", self.theme.toggle_label())
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let toggle = self.toggle_text();
        let used = TITLE.width() + toggle.width();
        // Narrow terminals lose the padding first, then the toggle hint
        let gap = (area.width as usize).saturating_sub(used);

        let mut spans = vec![Span::styled(
            TITLE,
            self.palette.label().add_modifier(Modifier::BOLD),
        )];
        if (area.width as usize) >= used {
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(toggle, self.palette.muted()));
        }

        let header = Paragraph::new(Line::from(spans)).style(self.palette.element());
        frame.render_widget(header, area);
    }
}
