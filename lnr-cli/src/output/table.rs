//! Fixed-width column tables.

use colored::Colorize;

/// A table column: header, value extractor and optional fixed width.
pub struct TableColumn<T> {
    pub header: &'static str,
    value: Box<dyn Fn(&T) -> String>,
    pub width: Option<usize>,
}

impl<T> TableColumn<T> {
    pub fn new(header: &'static str, value: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            header,
            value: Box::new(value),
            width: None,
        }
    }

    /// Fix the column width. Longer values are cut without an ellipsis.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn value(&self, item: &T) -> String {
        (self.value)(item)
    }
}

/// Render a table, one line per row, with a header and separator when `verbose`.
pub fn render_table<T>(items: &[T], columns: &[TableColumn<T>], verbose: bool) -> Vec<String> {
    if items.is_empty() {
        return vec!["no results".dimmed().to_string()];
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|col| {
            col.width.unwrap_or_else(|| {
                items
                    .iter()
                    .map(|item| col.value(item).chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(col.header.chars().count())
            })
        })
        .collect();

    let mut lines = Vec::with_capacity(items.len() + 2);

    if verbose {
        let header = columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| format!("{:<w$}", col.header, w = w))
            .collect::<Vec<_>>()
            .join("  ");
        let separator = "-".repeat(header.chars().count());
        lines.push(header.dimmed().to_string());
        lines.push(separator.dimmed().to_string());
    }

    for item in items {
        let row = columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| {
                let value: String = col.value(item).chars().take(w).collect();
                format!("{:<w$}", value, w = w)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(row);
    }

    lines
}

/// Print a table to stdout.
pub fn output_table<T>(items: &[T], columns: &[TableColumn<T>], verbose: bool) {
    for line in render_table(items, columns, verbose) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: &'static str,
        title: &'static str,
    }

    fn columns() -> Vec<TableColumn<Row>> {
        vec![
            TableColumn::new("ID", |r: &Row| r.id.to_owned()),
            TableColumn::new("TITLE", |r: &Row| r.title.to_owned()).width(8),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "ENG-1",
                title: "short",
            },
            Row {
                id: "ENG-10",
                title: "much longer title",
            },
        ]
    }

    #[test]
    fn test_empty_table() {
        colored::control::set_override(false);
        assert_eq!(render_table::<Row>(&[], &columns(), true), vec!["no results"]);
    }

    #[test]
    fn test_rows_are_padded_and_cut() {
        colored::control::set_override(false);
        let lines = render_table(&rows(), &columns(), false);
        assert_eq!(lines, vec!["ENG-1   short   ", "ENG-10  much lon"]);
    }

    #[test]
    fn test_verbose_header() {
        colored::control::set_override(false);
        let lines = render_table(&rows(), &columns(), true);
        assert_eq!(lines[0], "ID      TITLE   ");
        assert_eq!(lines[1], "-".repeat(16));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_header_sets_minimum_width() {
        colored::control::set_override(false);
        let cols = vec![TableColumn::new("IDENTIFIER", |r: &Row| r.id.to_owned())];
        let lines = render_table(&rows(), &cols, false);
        assert_eq!(lines[0], "ENG-1     ");
    }
}
