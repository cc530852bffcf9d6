//! Table display helpers for CLI commands

use chrono::{DateTime, Utc};

/// Truncate a string for table display, handling Unicode safely.
///
/// If the string exceeds `max_len` characters, it is cut and "..." appended.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Parse a comma-separated string into a list, filtering empty entries.
pub fn parse_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// `YYYY-MM-DD HH:MM` in UTC, or `-`.
pub fn format_when(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `YYYY-MM-DD`, or `-`.
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Fixed-width text table. Column widths are the header widths given; cells
/// longer than their column are truncated.
pub struct Table {
    columns: Vec<(&'static str, usize)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.line(self.columns.iter().map(|(name, _)| name.to_string())));
        let total: usize = self.columns.iter().map(|(_, w)| w + 1).sum();
        out.push_str(&"-".repeat(total.saturating_sub(1)));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&self.line(row.iter().cloned()));
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn line(&self, cells: impl Iterator<Item = String>) -> String {
        let mut line = cells
            .zip(&self.columns)
            .map(|(cell, (_, width))| format!("{:<width$}", truncate(&cell, *width), width = width))
            .collect::<Vec<_>>()
            .join(" ");
        let trimmed = line.trim_end().len();
        line.truncate(trimmed);
        line.push('\n');
        line
    }
}
