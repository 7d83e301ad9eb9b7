use chartform_tabular::TabularError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown chart type {0:?}")]
    UnknownChartType(String),
    #[error("no numeric rows left to chart")]
    EmptySeries,
    #[error("tabular data error {0}")]
    Tabular(#[from] TabularError),
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    #[error("chart rendering failed {0}")]
    Draw(String),
}
