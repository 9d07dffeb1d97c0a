use crate::core::dialog::{ACCEPT_LABEL, DialogService};
use async_trait::async_trait;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Result,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Result => style(text).green().bold(),
        StyleType::Error => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned numeric cell. Non-positive rates are flagged in red since
/// they cannot be converted.
pub fn rate_cell(tax_rate: f64) -> Cell {
    let cell = Cell::new(format!("{tax_rate:.4}")).set_alignment(CellAlignment::Right);
    if tax_rate > 0.0 {
        cell
    } else {
        cell.fg(Color::Red)
    }
}

/// Creates a spinner shown while rates load.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Reports view-model messages on stderr.
pub struct ConsoleDialog;

#[async_trait]
impl DialogService for ConsoleDialog {
    async fn show_message(&self, title: &str, message: &str) {
        eprintln!(
            "{} {} {}",
            style_text(title, StyleType::Error),
            message,
            style_text(&format!("[{ACCEPT_LABEL}]"), StyleType::Subtle)
        );
    }
}
