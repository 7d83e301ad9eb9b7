//! Renders a parsed [`Table`] into one of four chart images with plotters.
//!
//! The drawing routines are generic over [`plotters::prelude::DrawingBackend`]
//! so tests can render into memory; [`render_chart`] is the file-producing
//! entry point the web layer calls.

mod draw;
mod error;

use std::path::Path;
use std::str::FromStr;

use plotters::prelude::*;

use chartform_tabular::{NumericSeries, PointSeries, Table};

pub use draw::{draw_bar_graph, draw_line_graph, draw_pie_chart, draw_scatter_plot};
pub use error::ChartError;

/// The four chart modes the upload form offers. Parsed from the form tag
/// at the upload boundary, before any file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Pie,
    Bar,
    Line,
    Scatter,
}

impl ChartType {
    /// Output filename for this chart type inside the request's output
    /// directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartType::Pie => "pie_graph.png",
            ChartType::Bar => "bar_graph.png",
            ChartType::Line => "line_graph.png",
            ChartType::Scatter => "scatter_plot.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartType::Pie => "Pie Chart",
            ChartType::Bar => "Bar Graph",
            ChartType::Line => "Line Graph",
            ChartType::Scatter => "Scatter Plot",
        }
    }

    /// Canvas size in pixels. The pie chart is square; the rest share a
    /// wide landscape canvas.
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            ChartType::Pie => (800, 800),
            _ => (1000, 600),
        }
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(tag: &str) -> Result<ChartType, ChartError> {
        match tag {
            "Pie" => Ok(ChartType::Pie),
            "Bar" => Ok(ChartType::Bar),
            "Line" => Ok(ChartType::Line),
            "Scatter" => Ok(ChartType::Scatter),
            other => Err(ChartError::UnknownChartType(other.to_string())),
        }
    }
}

/// Preprocesses the table for the requested chart type and renders the
/// result as a PNG at `output`, overwriting whatever was there.
pub fn render_chart(chart_type: ChartType, table: &Table, output: &Path) -> Result<(), ChartError> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let size = chart_type.canvas_size();
    match chart_type {
        ChartType::Pie | ChartType::Bar | ChartType::Line => {
            let series = NumericSeries::from_table(table)?;
            if series.is_empty() {
                return Err(ChartError::EmptySeries);
            }
            let backend = BitMapBackend::new(output, size);
            match chart_type {
                ChartType::Pie => draw_pie_chart(backend, &series),
                ChartType::Bar => draw_bar_graph(backend, &series),
                _ => draw_line_graph(backend, &series),
            }
            .map_err(|error| ChartError::Draw(error.to_string()))
        }
        ChartType::Scatter => {
            let series = PointSeries::from_table(table)?;
            if series.is_empty() {
                return Err(ChartError::EmptySeries);
            }
            draw_scatter_plot(BitMapBackend::new(output, size), &series)
                .map_err(|error| ChartError::Draw(error.to_string()))
        }
    }
}
