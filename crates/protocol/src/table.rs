//! Tabulated report output
//!
//! A `Table` is what sinks consume: headers, ordered rows, and the columns
//! the destination must format as plain numbers.

use chrono::NaiveDate;
use serde_json::Value;

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Integer(u64),
    Decimal(f64),
}

impl Cell {
    /// Render for text output (dates as YYYY-MM-DD, decimals with 2 places)
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Decimal(v) => format!("{:.2}", v),
        }
    }

    /// Convert to a JSON value for APIs that take typed cells
    ///
    /// Dates become strings; the destination decides how to parse them.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Self::Integer(n) => Value::from(*n),
            Self::Decimal(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(v) => Some(*v),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Headers plus ordered rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    numeric_columns: Vec<usize>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            numeric_columns: Vec::new(),
        }
    }

    /// Mark a column as one the sink must number-format
    pub fn with_numeric_column(mut self, index: usize) -> Self {
        if index < self.headers.len() && !self.numeric_columns.contains(&index) {
            self.numeric_columns.push(index);
        }
        self
    }

    /// Append a row
    ///
    /// # Panics
    ///
    /// Panics if the row width does not match the header count.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        assert_eq!(
            row.len(),
            self.headers.len(),
            "row width must match header count"
        );
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn numeric_columns(&self) -> &[usize] {
        &self.numeric_columns
    }

    /// Number of data rows (headers excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Headers and rows as JSON arrays, header row first
    pub fn to_json_rows(&self) -> Vec<Vec<Value>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(
            self.headers
                .iter()
                .map(|h| Value::String(h.clone()))
                .collect(),
        );
        for row in &self.rows {
            out.push(row.iter().map(Cell::to_json).collect());
        }
        out
    }

    /// Rows as JSON objects keyed by header
    pub fn to_json_records(&self) -> Vec<serde_json::Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().map(Cell::to_json))
                    .collect()
            })
            .collect()
    }
}
