//! Fixed-width table rendering.
//!
//! Every column has a declared width. Cells are padded to that width, or
//! truncated with a `...` marker when they overflow, and columns are
//! joined by a single space. The separator under the header spans the sum
//! of the widths plus the joining spaces.

/// Pad `text` to `width`, or truncate it with a trailing `...`.
///
/// Widths are counted in characters, not bytes.
pub fn fit(text: &str, width: usize) -> String {
    let length = text.chars().count();
    if length > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", text)
    }
}

/// A table with fixed column widths.
#[derive(Debug)]
pub struct Table {
    columns: Vec<(String, usize)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from `(header, width)` column declarations.
    pub fn new(columns: &[(&str, usize)]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|(header, width)| (header.to_string(), *width))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing cells render empty, extra cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render the header, separator, and rows, without a trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&headers(&self.columns)));
        lines.push("-".repeat(self.separator_width()));
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String]) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (_, width))| {
                let cell = row.get(i).map(|c| c.as_str()).unwrap_or("");
                fit(cell, *width)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn separator_width(&self) -> usize {
        let widths: usize = self.columns.iter().map(|(_, width)| width).sum();
        widths + self.columns.len().saturating_sub(1)
    }
}

fn headers(columns: &[(String, usize)]) -> Vec<String> {
    columns.iter().map(|(header, _)| header.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_short_text() {
        assert_eq!(fit("3.11.4", 10), "3.11.4    ");
        assert_eq!(fit("", 4), "    ");
    }

    #[test]
    fn fit_keeps_exact_width_text() {
        assert_eq!(fit("abcdefghij", 10), "abcdefghij");
    }

    #[test]
    fn fit_truncates_with_marker() {
        assert_eq!(fit("abcdefghijk", 10), "abcdefg...");
        assert_eq!(fit("/very/long/interpreter/path", 10), "/very/l...");
    }

    #[test]
    fn fit_counts_characters_not_bytes() {
        // Four three-byte characters still fit in width 4.
        assert_eq!(fit("⠋⠙⠹⠸", 4), "⠋⠙⠹⠸");
    }

    #[test]
    fn fit_handles_widths_narrower_than_the_marker() {
        assert_eq!(fit("abcdef", 2), "...");
        assert_eq!(fit("ab", 2), "ab");
    }

    #[test]
    fn renders_header_separator_and_rows() {
        let mut table = Table::new(&[("Version", 20), ("Name", 10), ("Path", 60), ("Source", 22)]);
        table.add_row(vec![
            "Python 3.11.4".to_string(),
            "python3".to_string(),
            "/usr/bin/python3".to_string(),
            "PATH".to_string(),
        ]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Version"));
        assert_eq!(lines[1], "-".repeat(115));
        assert!(lines[2].starts_with("Python 3.11.4"));
        // Every column is padded, the last one included.
        assert_eq!(lines[2].chars().count(), 115);
    }

    #[test]
    fn separator_spans_widths_plus_joins() {
        let table = Table::new(&[
            ("ID", 4),
            ("Python Version", 20),
            ("Pip Version", 40),
            ("Python Path", 60),
            ("Source", 22),
        ]);

        let rendered = table.render();
        let separator = rendered.lines().nth(1).unwrap();

        assert_eq!(separator, "-".repeat(150));
    }

    #[test]
    fn long_cells_are_truncated_to_their_column() {
        let mut table = Table::new(&[("Path", 10)]);
        table.add_row(vec!["/opt/python/versions/3.11.4/bin/python3".to_string()]);

        let rendered = table.render();
        let row = rendered.lines().nth(2).unwrap();

        assert_eq!(row, "/opt/py...");
    }

    #[test]
    fn missing_cells_render_empty() {
        let mut table = Table::new(&[("A", 4), ("B", 4)]);
        table.add_row(vec!["x".to_string()]);

        let rendered = table.render();
        let row = rendered.lines().nth(2).unwrap();

        assert_eq!(row, "x        ");
    }
}
