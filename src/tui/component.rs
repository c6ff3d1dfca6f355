use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components follow the props pattern:
/// - They receive everything they show via struct fields (borrowed from `App`).
/// - They never reach into global state.
/// - They render to a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so a component may keep render-time caches,
/// matching Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
