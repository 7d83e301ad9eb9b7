use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("csv parse failed {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook parse failed {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheets,
    #[error("table has no columns")]
    NoColumns,
    #[error("table needs at least {needed} columns, found {found}")]
    NotEnoughColumns { needed: usize, found: usize },
}
