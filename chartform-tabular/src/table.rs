/// A single parsed value. CSV fields and workbook cells both funnel into
/// this representation before any chart preprocessing happens.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric coercion. Text is parsed after trimming, booleans map to
    /// 1/0, and NaN counts as missing rather than a value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value).filter(|v| !v.is_nan()),
            Cell::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Cell::Text(text) => text.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
            Cell::Null => None,
        }
    }
}

/// Rows by named columns, exactly as the source file yielded them. Short
/// rows are padded with nulls so every row spans the full width.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(mut headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Table {
        let width = rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(headers.len());
        headers.resize(width, String::new());
        for row in &mut rows {
            row.resize(width, Cell::Null);
        }
        Table { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn last_column_index(&self) -> Option<usize> {
        self.column_count().checked_sub(1)
    }
}
