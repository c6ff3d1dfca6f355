use crate::core::state::{App, Route};
use crate::tui::component::Component;
use crate::tui::components::{CountryDetailView, CountryList, Header};
use crate::tui::palette::Palette;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

/// Key hints for the footer, per view.
fn key_hints(route: &Route) -> &'static str {
    match route {
        Route::Home => "↑/↓ select · Enter open · Tab region · Ctrl+T theme · Esc quit",
        Route::Detail(_) => "←/→ border · Enter open · Esc back · Ctrl+T theme · q quit",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    let theme = app.theme.current();
    let palette = Palette::for_theme(theme);

    // Paint the whole screen so the theme covers every cell
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [header_area, main_area, footer_area] = layout.areas(frame.area());

    Header::new(theme).render(frame, header_area);

    match (&app.route, &app.detail) {
        (Route::Detail(_), Some(state)) => {
            CountryDetailView {
                state,
                palette,
                spinner_frame,
            }
            .render(frame, main_area);
        }
        _ => {
            CountryList {
                countries: &app.countries,
                visible: app.visible_countries(),
                query: &app.query,
                region: app.region,
                selected: app.selected,
                palette,
                spinner_frame,
            }
            .render(frame, main_area);
        }
    }

    let footer = Line::from(vec![
        Span::styled(key_hints(&app.route), palette.muted()),
        Span::raw("  "),
        Span::raw(app.status_message.as_str()),
    ]);
    frame.render_widget(Paragraph::new(footer), footer_area);
}
