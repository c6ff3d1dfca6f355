//! # CountryDetailView Component
//!
//! Renders one `DetailState`: loading, not found, or the assembled record.
//! Border names arrive after the rest of the record; until then the border
//! row shows a spinner.

use crate::core::format;
use crate::core::state::DetailState;
use crate::countries::{BorderResolutionError, CountryDetail};
use crate::tui::component::Component;
use crate::tui::palette::{Palette, spinner};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

pub struct CountryDetailView<'a> {
    pub state: &'a DetailState,
    pub palette: Palette,
    pub spinner_frame: usize,
}

impl CountryDetailView<'_> {
    fn field(&self, label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label}: "), self.palette.label()),
            Span::raw(value),
        ])
    }

    fn border_line(
        &self,
        detail: &CountryDetail,
        borders_pending: bool,
        selected: Option<usize>,
    ) -> Line<'static> {
        let mut spans = vec![Span::styled("Border Countries: ", self.palette.label())];

        if borders_pending {
            spans.push(Span::styled(
                format!("{} resolving…", spinner(self.spinner_frame)),
                self.palette.muted(),
            ));
        } else if detail.borders.is_empty() {
            spans.push(Span::styled("none", self.palette.muted()));
        } else {
            for (idx, border) in detail.borders.iter().enumerate() {
                let style = if selected == Some(idx) {
                    self.palette.highlight()
                } else {
                    self.palette.element()
                };
                spans.push(Span::styled(format!(" {border} "), style));
                spans.push(Span::raw(" "));
            }
        }

        Line::from(spans)
    }

    fn ready_lines(
        &self,
        detail: &CountryDetail,
        borders_pending: bool,
        unresolved: &[BorderResolutionError],
        selected: Option<usize>,
    ) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled("← Back (Esc)", self.palette.muted()),
            Line::default(),
            Line::styled(
                detail.name.clone(),
                self.palette.label().add_modifier(Modifier::UNDERLINED),
            ),
            Line::default(),
            self.field("Native name", detail.display_native_name().to_string()),
            self.field("Population", format::population(detail.population)),
            self.field("Region", detail.region.clone()),
            self.field("Sub Region", detail.subregion.clone()),
            self.field("Capital", format::list(&detail.capital)),
            self.field("Top Level Domain", format::list(&detail.top_level_domains)),
            self.field("Currencies", detail.currencies.clone()),
            self.field("Languages", detail.languages.clone()),
            self.field("Flag", detail.flag.clone()),
            Line::default(),
            self.border_line(detail, borders_pending, selected),
        ];

        if !unresolved.is_empty() {
            let codes: Vec<&str> = unresolved.iter().map(|e| e.code.as_str()).collect();
            lines.push(Line::styled(
                format!("Could not resolve: {}", codes.join(", ")),
                self.palette.error(),
            ));
        }

        if !borders_pending && !detail.borders.is_empty() {
            lines.push(Line::styled(
                "←/→ choose a border country, Enter to open it",
                self.palette.muted(),
            ));
        }

        lines
    }
}

impl Component for CountryDetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(self.palette.muted())
            .padding(Padding::horizontal(1));

        let paragraph = match self.state {
            DetailState::Loading { label } => Paragraph::new(vec![
                Line::from(format!("{} loading...", spinner(self.spinner_frame))),
                Line::styled(label.clone(), self.palette.muted()),
            ])
            .alignment(Alignment::Center)
            .block(block),
            DetailState::NotFound { name } => Paragraph::new(vec![
                Line::styled("Country not Found", self.palette.error()),
                Line::styled(format!("\"{name}\" (Esc to go back)"), self.palette.muted()),
            ])
            .alignment(Alignment::Center)
            .block(block),
            DetailState::Ready {
                detail,
                borders_pending,
                unresolved,
                selected_border,
            } => Paragraph::new(self.ready_lines(
                detail,
                *borders_pending,
                unresolved,
                *selected_border,
            ))
            .block(block.title(format!(" {} ", detail.name)))
            .wrap(Wrap { trim: false }),
        };

        frame.render_widget(paragraph, area);
    }
}
