use serde::{Deserialize, Serialize};

/// Contenu tabulaire chargé une fois depuis le classeur, immuable ensuite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularContent {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularContent {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Restitution textuelle alignée, telle qu'injectée dans les prompts.
    pub fn render_text(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        let index_width = self
            .rows
            .len()
            .saturating_sub(1)
            .to_string()
            .chars()
            .count();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let mut header = " ".repeat(index_width);
        for (idx, column) in self.columns.iter().enumerate() {
            header.push_str("  ");
            header.push_str(&pad(column, widths[idx]));
        }
        lines.push(header.trim_end().to_string());

        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut line = format!("{:>width$}", row_idx, width = index_width);
            for (idx, cell) in row.iter().enumerate() {
                line.push_str("  ");
                line.push_str(&pad(cell, widths.get(idx).copied().unwrap_or(0)));
            }
            lines.push(line.trim_end().to_string());
        }

        lines.join("\n")
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.to_string()
    } else {
        let mut padded = String::with_capacity(width);
        padded.push_str(value);
        padded.extend(std::iter::repeat(' ').take(width - len));
        padded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TabularContent {
        TabularContent::new(
            vec!["titre".to_string(), "statut".to_string()],
            vec![
                vec!["capteur optique".to_string(), "ok".to_string()],
                vec!["valve".to_string(), "en attente".to_string()],
            ],
        )
    }

    #[test]
    fn render_text_aligns_columns() {
        let text = sample().render_text();
        let expected = "\
   titre            statut
0  capteur optique  ok
1  valve            en attente";
        assert_eq!(text, expected);
    }

    #[test]
    fn render_text_empty_table() {
        let table = TabularContent::new(Vec::new(), Vec::new());
        assert_eq!(table.render_text(), "");
    }

    #[test]
    fn render_text_tolerates_rows_wider_than_the_header() {
        let table = TabularContent::new(
            vec!["titre".to_string()],
            vec![vec!["valve".to_string(), "supplément".to_string()]],
        );
        let text = table.render_text();
        assert!(text.contains("valve"));
        assert!(text.contains("supplément"));
    }

    #[test]
    fn rows_are_exposed_in_order() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        let first: Vec<&str> = table.rows().next().unwrap().iter().map(String::as_str).collect();
        assert_eq!(first, vec!["capteur optique", "ok"]);
    }
}
