use crate::error::TabularError;
use crate::table::Table;

/// The last column coerced to numbers. Each surviving value keeps the row
/// index it came from so chart labels stay aligned with the source table,
/// and every dropped row is reported instead of silently vanishing.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    points: Vec<(usize, f64)>,
    dropped: Vec<usize>,
}

impl NumericSeries {
    pub fn from_table(table: &Table) -> Result<NumericSeries, TabularError> {
        let column = table.last_column_index().ok_or(TabularError::NoColumns)?;
        let mut points = Vec::new();
        let mut dropped = Vec::new();
        for (index, row) in table.rows().iter().enumerate() {
            match row[column].as_number() {
                Some(value) => points.push((index, value)),
                None => dropped.push(index),
            }
        }
        Ok(NumericSeries { points, dropped })
    }

    /// `(original_row_index, value)` pairs, in source order.
    pub fn points(&self) -> &[(usize, f64)] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, value)| *value)
    }

    /// Row indices excluded by null filtering or failed coercion.
    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `(x, y)` pairs from the last two columns for scatter plots. Both axes
/// are coerced the same way as [`NumericSeries`]; a row is dropped when
/// either coordinate fails.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    points: Vec<(f64, f64)>,
    dropped: Vec<usize>,
}

impl PointSeries {
    pub fn from_table(table: &Table) -> Result<PointSeries, TabularError> {
        let y_column = table.last_column_index().ok_or(TabularError::NoColumns)?;
        let x_column = y_column
            .checked_sub(1)
            .ok_or(TabularError::NotEnoughColumns {
                needed: 2,
                found: table.column_count(),
            })?;
        let mut points = Vec::new();
        let mut dropped = Vec::new();
        for (index, row) in table.rows().iter().enumerate() {
            match (row[x_column].as_number(), row[y_column].as_number()) {
                (Some(x), Some(y)) => points.push((x, y)),
                _ => dropped.push(index),
            }
        }
        Ok(PointSeries { points, dropped })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn table_with_last_column(cells: Vec<Cell>) -> Table {
        Table::new(
            vec!["label".to_string(), "value".to_string()],
            cells
                .into_iter()
                .enumerate()
                .map(|(i, cell)| vec![Cell::Number(i as f64 * 10.0), cell])
                .collect(),
        )
    }

    #[test]
    fn drops_rows_that_fail_coercion() {
        let table = table_with_last_column(vec![
            Cell::Number(1.0),
            Cell::Number(2.0),
            Cell::Text("x".to_string()),
            Cell::Number(4.0),
        ]);
        let series = NumericSeries::from_table(&table).unwrap();
        assert_eq!(series.points(), [(0, 1.0), (1, 2.0), (3, 4.0)]);
        assert_eq!(series.dropped(), [2]);
    }

    #[test]
    fn null_rows_are_dropped_and_reported() {
        let table = table_with_last_column(vec![Cell::Null, Cell::Number(7.0), Cell::Null]);
        let series = NumericSeries::from_table(&table).unwrap();
        assert_eq!(series.points(), [(1, 7.0)]);
        assert_eq!(series.dropped(), [0, 2]);
    }

    #[test]
    fn point_count_plus_dropped_count_covers_every_row() {
        let table = table_with_last_column(vec![
            Cell::Number(1.0),
            Cell::Text("nope".to_string()),
            Cell::Null,
            Cell::Number(2.0),
        ]);
        let series = NumericSeries::from_table(&table).unwrap();
        assert_eq!(series.len() + series.dropped().len(), table.row_count());
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = Table::new(vec![], vec![]);
        assert!(matches!(
            NumericSeries::from_table(&table),
            Err(TabularError::NoColumns)
        ));
    }

    #[test]
    fn scatter_pairs_last_two_columns() {
        let table = Table::new(
            vec!["x".to_string(), "y".to_string()],
            vec![
                vec![Cell::Number(1.0), Cell::Number(10.0)],
                vec![Cell::Number(2.0), Cell::Number(20.0)],
                vec![Cell::Number(3.0), Cell::Text("x".to_string())],
                vec![Cell::Number(4.0), Cell::Number(40.0)],
            ],
        );
        let series = PointSeries::from_table(&table).unwrap();
        assert_eq!(series.points(), [(1.0, 10.0), (2.0, 20.0), (4.0, 40.0)]);
        assert_eq!(series.dropped(), [2]);
    }

    #[test]
    fn scatter_drops_rows_missing_either_coordinate() {
        let table = Table::new(
            vec!["x".to_string(), "y".to_string()],
            vec![
                vec![Cell::Null, Cell::Number(10.0)],
                vec![Cell::Number(2.0), Cell::Null],
                vec![Cell::Number(3.0), Cell::Number(30.0)],
            ],
        );
        let series = PointSeries::from_table(&table).unwrap();
        assert_eq!(series.points(), [(3.0, 30.0)]);
        assert_eq!(series.dropped(), [0, 1]);
    }

    #[test]
    fn scatter_needs_two_columns() {
        let table = Table::new(vec!["only".to_string()], vec![vec![Cell::Number(1.0)]]);
        assert!(matches!(
            PointSeries::from_table(&table),
            Err(TabularError::NotEnoughColumns { needed: 2, found: 1 })
        ));
    }
}
