//! Rendering helpers for component tests.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Flattens the test buffer into one string of cell symbols.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
