use console::{measure_text_width, pad_str, Alignment};

/// Gap between aligned columns.
const PADDING: usize = 3;

/// Column-aligned plain-text table.
///
/// Widths are measured on visible characters so styled cells line up. The
/// last cell of a row is never padded.
#[derive(Debug, Default)]
pub(crate) struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub(crate) fn render(&self, out: &mut String) {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
                let width = measure_text_width(cell);
                match widths.get_mut(idx) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }

        for row in &self.rows {
            let mut line = String::new();
            for (idx, cell) in row.iter().enumerate() {
                if idx + 1 < row.len() {
                    line.push_str(&pad_str(cell, widths[idx] + PADDING, Alignment::Left, None));
                } else {
                    line.push_str(cell);
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
}
