//! Column-aligned text tables.

use crate::theme::{Palette, Style};
use crate::utils::{display_width, pad_left, pad_right};

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }

    pub fn center(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Center,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub style: Style,
}

impl Cell {
    pub fn new(
        text: impl Into<String>,
        style: Style,
    ) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }
}

#[derive(Debug, Clone)]
pub struct TextTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl TextTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(
        &mut self,
        row: Vec<Cell>,
    ) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| display_width(&cell.text))
                    .chain(std::iter::once(display_width(&column.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders the header, a rule and every row. Padding is applied before
    /// colouring so escape codes never affect alignment.
    pub fn render(
        &self,
        palette: Palette,
    ) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| {
                palette.paint(&align(&column.header, width, column.align), Style::Heading)
            })
            .collect();
        out.push_str(header.join(COLUMN_GAP).trim_end());
        out.push('\n');

        let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        out.push_str(&palette.paint(&"─".repeat(rule_width), Style::Muted));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (column, &width))| match row.get(i) {
                    Some(cell) => palette.paint(&align(&cell.text, width, column.align), cell.style),
                    None => " ".repeat(width),
                })
                .collect();
            out.push_str(cells.join(COLUMN_GAP).trim_end());
            out.push('\n');
        }
        out
    }
}

fn align(
    text: &str,
    width: usize,
    align: Align,
) -> String {
    match align {
        Align::Left => pad_right(text, width),
        Align::Right => pad_left(text, width),
        Align::Center => {
            let padding = width.saturating_sub(display_width(text));
            let left = padding / 2;
            pad_right(&format!("{}{text}", " ".repeat(left)), width)
        }
    }
}
