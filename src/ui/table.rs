//! Column-aligned table rendering for `apiconf list`.

/// A plain-text table with left-aligned columns separated by two spaces.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing cells render empty, extra cells are dropped.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table, one line per row, headers first.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| render_row(row, &widths))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(["A", "B"]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.render(), "A  B");
    }

    #[test]
    fn table_aligns_columns() {
        let mut table = Table::new(["ENVIRONMENT", "URL"]);
        table.add_row(["development", "http://localhost:5000"]);
        table.add_row(["production", "https://kaam-asaasan-api.herokuapp.com"]);

        insta::assert_snapshot!(table.render(), @r###"
        ENVIRONMENT  URL
        development  http://localhost:5000
        production   https://kaam-asaasan-api.herokuapp.com
        "###);
    }

    #[test]
    fn table_handles_missing_cells() {
        let mut table = Table::new(["A", "B", "C"]);
        table.add_row(["only", "two"]);

        let output = table.render();
        assert_eq!(output.lines().nth(1), Some("only  two"));
    }

    #[test]
    fn table_drops_extra_cells() {
        let mut table = Table::new(["A"]);
        table.add_row(["a", "extra"]);
        assert!(!table.render().contains("extra"));
    }
}
