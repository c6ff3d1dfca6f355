//! # CountryList Component
//!
//! The home view: a search box, the region filter, and the scrolling list
//! of countries that pass both.
//!
//! ```text
//! ┌Search for a country...──────────────────────┐
//! │fin                                          │
//! └─────────────────────────────────────────────┘
//! Filter by Region: Europe (Tab)
//! > Finland   Population: 55,30,780  Region: Europe  Capital: Helsinki
//! ```
//!
//! Filtering itself happens in `App::visible_countries`; this component only
//! draws what it is handed.

use crate::core::format;
use crate::core::state::{ListState, Region};
use crate::countries::RawCountryRecord;
use crate::tui::component::Component;
use crate::tui::palette::{Palette, spinner};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState as Selection, Paragraph, Wrap};

pub struct CountryList<'a> {
    pub countries: &'a ListState,
    pub visible: Vec<&'a RawCountryRecord>,
    pub query: &'a str,
    pub region: Region,
    pub selected: usize,
    pub palette: Palette,
    pub spinner_frame: usize,
}

impl CountryList<'_> {
    fn row(&self, record: &RawCountryRecord) -> ListItem<'static> {
        let p = &self.palette;
        ListItem::new(Line::from(vec![
            Span::styled(record.common_name().to_string(), p.label()),
            Span::styled("  Population: ", p.muted()),
            Span::raw(format::population(record.population)),
            Span::styled("  Region: ", p.muted()),
            Span::raw(record.region.clone()),
            Span::styled("  Capital: ", p.muted()),
            Span::raw(format::list(&record.capital)),
        ]))
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title("Search for a country...")
            .border_style(self.palette.muted());
        let search = if self.query.is_empty() {
            Paragraph::new(Span::styled("type to filter by name", self.palette.muted()))
        } else {
            Paragraph::new(self.query)
        };
        frame.render_widget(search.block(block).style(self.palette.element()), area);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, line: Line) {
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [search_area, filter_area, list_area] =
            Layout::vertical([Length(3), Length(1), Min(0)]).areas(area);

        self.render_search(frame, search_area);

        let filter = Line::from(vec![
            Span::styled("Filter by Region: ", self.palette.muted()),
            Span::styled(self.region.label(), self.palette.label()),
            Span::styled(" (Tab)", self.palette.muted()),
        ]);
        frame.render_widget(Paragraph::new(filter), filter_area);

        match self.countries {
            ListState::Loading => {
                let line = Line::from(format!("{} loading...", spinner(self.spinner_frame)));
                self.render_message(frame, list_area, line);
            }
            ListState::Failed(message) => {
                let line = Line::styled(
                    format!("Something went wrong: {message} (Ctrl+R to retry)"),
                    self.palette.error(),
                );
                self.render_message(frame, list_area, line);
            }
            ListState::Loaded(_) if self.visible.is_empty() => {
                let line = Line::styled("No countries match", self.palette.muted());
                self.render_message(frame, list_area, line);
            }
            ListState::Loaded(_) => {
                let items: Vec<ListItem> = self.visible.iter().map(|r| self.row(r)).collect();
                let list = List::new(items)
                    .highlight_style(self.palette.highlight())
                    .highlight_symbol("> ");
                let mut selection = Selection::default().with_selected(Some(self.selected));
                frame.render_stateful_widget(list, list_area, &mut selection);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use crate::test_support::record;
    use crate::tui::test_helpers::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(list: &mut CountryList) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal.draw(|f| list.render(f, f.area())).unwrap();
        buffer_text(&terminal)
    }

    fn props<'a>(countries: &'a ListState, visible: Vec<&'a RawCountryRecord>) -> CountryList<'a> {
        CountryList {
            countries,
            visible,
            query: "",
            region: Region::All,
            selected: 0,
            palette: Palette::for_theme(Theme::Light),
            spinner_frame: 0,
        }
    }

    #[test]
    fn test_renders_rows_with_formatted_population() {
        let mut india = record("India", &[]);
        india.population = 1380004385;
        india.region = "Asia".to_string();
        let countries = ListState::Loaded(vec![india.clone()]);

        let text = draw(&mut props(&countries, vec![&india]));

        assert!(text.contains("India"));
        assert!(text.contains("1,38,00,04,385"));
        assert!(text.contains("India City"));
        assert!(text.contains("All regions"));
    }

    #[test]
    fn test_loading_and_failure_messages() {
        let loading = ListState::Loading;
        assert!(draw(&mut props(&loading, Vec::new())).contains("loading..."));

        let failed = ListState::Failed("network error: refused".to_string());
        let text = draw(&mut props(&failed, Vec::new()));
        assert!(text.contains("Something went wrong"));
    }

    #[test]
    fn test_empty_filter_result() {
        let countries = ListState::Loaded(vec![record("France", &[])]);
        let mut list = props(&countries, Vec::new());
        list.query = "zzz";

        let text = draw(&mut list);
        assert!(text.contains("No countries match"));
        assert!(text.contains("zzz"));
    }
}
