//! Stdout Sink - Human-readable report output
//!
//! Renders a report table as aligned text (or JSON records) for dry runs
//! and the `pull` command. Nothing is cleared; every write prints.
//!
//! # Example Output
//!
//! ```text
//! Date        Number of Orders  Revenue (Net)  Revenue (Total)
//! 2023-05-01                 3         150.00           180.00
//! 2023-05-02                 1          42.50            50.58
//! ```

use std::io::Write;

use ordersync_protocol::{Cell, Table};
use owo_colors::{OwoColorize, Style};
use tracing::debug;

use crate::common::{SinkError, TabularSink};

/// Column separator for text output
const GAP: &str = "  ";

/// Output encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Text,
    /// Pretty-printed array of `{header: value}` objects
    Json,
}

/// Configuration for stdout sink
#[derive(Debug, Clone)]
pub struct StdoutConfig {
    /// Enable colored output (text format only)
    pub color: bool,

    pub format: OutputFormat,

    /// Maximum rows to show (0 = all)
    pub max_rows: usize,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
            max_rows: 0, // Show all
        }
    }
}

impl StdoutConfig {
    /// Create config with colors disabled (for piped output)
    pub fn no_color() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    /// Create config for JSON output
    pub fn json() -> Self {
        Self {
            color: false,
            format: OutputFormat::Json,
            ..Self::default()
        }
    }
}

// =============================================================================
// Color Styles
// =============================================================================

/// Color styles for terminal output
struct Styles {
    enabled: bool,
    header: Style,
    note: Style,
}

impl Styles {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            header: Style::new().bold(),
            note: Style::new().dimmed(),
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Stdout sink for report tables
#[derive(Debug, Clone, Default)]
pub struct StdoutSink {
    config: StdoutConfig,
}

impl StdoutSink {
    pub fn new(config: StdoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StdoutConfig {
        &self.config
    }

    /// Render a table in the configured format
    pub fn render(&self, table: &Table) -> Result<String, SinkError> {
        match self.config.format {
            OutputFormat::Text => Ok(render_text(table, self.config.max_rows, self.config.color)),
            OutputFormat::Json => render_json(table, self.config.max_rows),
        }
    }
}

impl TabularSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn clear(&self) -> Result<(), SinkError> {
        debug!("stdout sink has nothing to clear");
        Ok(())
    }

    async fn write(&self, table: &Table) -> Result<(), SinkError> {
        let rendered = self.render(table)?;
        let mut out = std::io::stdout().lock();
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Render a table as aligned text
///
/// Numeric cells are right-aligned, everything else left-aligned. With
/// `max_rows > 0`, rows past the limit are summarized in a trailing note.
pub fn render_text(table: &Table, max_rows: usize, color: bool) -> String {
    let styles = Styles::new(color);
    let shown = visible_rows(table, max_rows);

    let cells: Vec<Vec<(String, bool)>> = shown
        .iter()
        .map(|row| row.iter().map(|c| (c.display(), is_numeric(c))).collect())
        .collect();

    let mut widths: Vec<usize> = table.headers().iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, (text, _)) in row.iter().enumerate() {
            widths[i] = widths[i].max(text.chars().count());
        }
    }

    let mut out = String::new();
    let header = table
        .headers()
        .iter()
        .zip(&widths)
        .map(|(h, &w)| pad(h, w, false))
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(&styles.paint(header.trim_end(), styles.header));
    out.push('\n');

    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|((text, numeric), &w)| pad(text, w, *numeric))
            .collect::<Vec<_>>()
            .join(GAP);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let hidden = table.len() - shown.len();
    if hidden > 0 {
        let note = format!("... {} more rows", hidden);
        out.push_str(&styles.paint(&note, styles.note));
        out.push('\n');
    }

    out
}

/// Render a table as a pretty JSON array of records
pub fn render_json(table: &Table, max_rows: usize) -> Result<String, SinkError> {
    let mut records = table.to_json_records();
    if max_rows > 0 {
        records.truncate(max_rows);
    }
    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');
    Ok(json)
}

fn visible_rows(table: &Table, max_rows: usize) -> &[Vec<Cell>] {
    let rows = table.rows();
    if max_rows > 0 && rows.len() > max_rows {
        &rows[..max_rows]
    } else {
        rows
    }
}

fn is_numeric(cell: &Cell) -> bool {
    matches!(cell, Cell::Integer(_) | Cell::Decimal(_))
}

fn pad(text: &str, width: usize, right: bool) -> String {
    if right {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}
