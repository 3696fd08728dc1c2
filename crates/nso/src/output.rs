//! Rendering for `--output`.
//!
//! Lists become a rounded `tabled` table, one value per line for `plain`,
//! or the raw serde shape for `json` / `json-compact` / `yaml`.

use std::io::{IsTerminal, Write, stdout};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Color ────────────────────────────────────────────────────────────

/// `--color auto` means stdout is a terminal and `NO_COLOR` is unset.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Auto => stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        ColorMode::Always => true,
        ColorMode::Never => false,
    }
}

/// An HTTP status code, green for 2xx and red otherwise.
pub fn status(code: u16, success: bool, color: bool) -> String {
    match (color, success) {
        (false, _) => code.to_string(),
        (true, true) => code.green().to_string(),
        (true, false) => code.red().to_string(),
    }
}

// ── Rendering ────────────────────────────────────────────────────────

/// Render a collection. `to_row` feeds the table, `key` feeds `plain`.
pub fn render_list<T, R>(
    format: &OutputFormat,
    items: &[T],
    to_row: impl Fn(&T) -> R,
    key: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table if items.is_empty() => "(none)".into(),
        OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Plain => items.iter().map(key).collect::<Vec<_>>().join("\n"),
        structured => structured_text(structured, items),
    }
}

/// Render one value. Table output is whatever `detail` formats.
pub fn render_single<T: Serialize>(
    format: &OutputFormat,
    item: &T,
    detail: impl Fn(&T) -> String,
    key: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Table => detail(item),
        OutputFormat::Plain => key(item),
        structured => structured_text(structured, item),
    }
}

/// JSON or YAML; table and plain never reach here.
fn structured_text<T: Serialize + ?Sized>(format: &OutputFormat, item: &T) -> String {
    let rendered = match format {
        OutputFormat::JsonCompact => serde_json::to_string(item).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(item).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(item).map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| format!("<serialization failed: {e}>"))
}

/// Write to stdout unless quiet or there is nothing to say.
pub fn print_output(text: &str, quiet: bool) {
    if quiet || text.is_empty() {
        return;
    }
    let _ = writeln!(stdout().lock(), "{text}");
}
