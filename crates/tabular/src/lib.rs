//! Table and string formatting for devkit CLIs
//!
//! Wraps `comfy-table` behind a small builder plus the string helpers the
//! tools share for listing output.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

/// Builder for rendered text tables
#[derive(Debug, Default)]
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_width: Option<u16>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header row
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Append a data row
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Cap the rendered width
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Render the table to a string
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        if !self.headers.is_empty() {
            table.set_header(
                self.headers
                    .iter()
                    .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
            );
        }

        for row in &self.rows {
            table.add_row(row.clone());
        }

        table.to_string()
    }
}

/// Truncate a string to `max_len`, appending `...` when truncated
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Align `key  value` pairs into two columns
pub fn key_value<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let pairs: Vec<_> = pairs.into_iter().collect();
    let width = pairs
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    pairs
        .iter()
        .map(|(key, value)| format!("{:<width$}  {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_and_rows() {
        let rendered = TableBuilder::new()
            .headers(["Hash", "Summary"])
            .row(["abc12345", "initial commit"])
            .row(["def67890", "add config loader"])
            .render();

        assert!(rendered.contains("Hash"));
        assert!(rendered.contains("initial commit"));
        assert!(rendered.contains("def67890"));
    }

    #[test]
    fn renders_without_headers() {
        let rendered = TableBuilder::new().row(["only", "data"]).render();
        assert!(rendered.contains("only"));
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("a rather long summary", 10), "a rathe...");
    }

    #[test]
    fn key_value_aligns_on_the_longest_key() {
        let listing = key_value([
            ("Commits", "120".to_string()),
            ("Authors", "7".to_string()),
            ("Newest", "2024-05-01".to_string()),
        ]);

        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Commits  120"));
        assert!(lines[2].starts_with("Newest   2024-05-01"));
    }
}
