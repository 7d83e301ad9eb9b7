use chartform_tabular::{NumericSeries, PointSeries};
use itertools::Itertools;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::full_palette::{ORANGE, PURPLE, TEAL};

type DrawResult<'a> = Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>;

const WEDGE_PALETTE: [RGBColor; 8] = [YELLOW, RED, GREEN, BLUE, PURPLE, ORANGE, TEAL, MAGENTA];

/// Proportional wedges from the coerced last column, labeled by the row
/// index each value came from.
pub fn draw_pie_chart<'a, T>(backend: T, series: &NumericSeries) -> DrawResult<'a>
where
    T: DrawingBackend + 'a,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Pie Chart", ("sans-serif", 40))?;
    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;
    let sizes: Vec<f64> = series.values().collect();
    let labels: Vec<String> = series
        .points()
        .iter()
        .map(|(index, _)| index.to_string())
        .collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|slice| WEDGE_PALETTE[slice % WEDGE_PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 20).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
    root.draw(&pie)?;

    // present so backend save failures surface instead of being dropped
    root.present()?;
    Ok(())
}

/// Vertical bars in row order, tick labels showing the original row index
/// of each surviving value.
pub fn draw_bar_graph<'a, T>(backend: T, series: &NumericSeries) -> DrawResult<'a>
where
    T: DrawingBackend + 'a,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let (y_min, y_max) = value_range(series.values());
    let count = series.len();
    let points = series.points();

    let mut chart = ChartBuilder::on(&root)
        .caption("Bar Graph", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..count).into_segmented(), y_min.min(0.0)..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count.min(20))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::Exact(position) | SegmentValue::CenterOf(position)
                if *position < points.len() =>
            {
                points[*position].0.to_string()
            }
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .margin(3)
            .data(
                points
                    .iter()
                    .enumerate()
                    .map(|(position, (_, value))| (position, *value)),
            ),
    )?;

    root.present()?;
    Ok(())
}

/// Connected line over the coerced last column with circular markers,
/// x positions taken from the original row indices.
pub fn draw_line_graph<'a, T>(backend: T, series: &NumericSeries) -> DrawResult<'a>
where
    T: DrawingBackend + 'a,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let (y_min, y_max) = value_range(series.values());
    let (x_min, x_max) = series
        .points()
        .iter()
        .map(|(index, _)| *index)
        .minmax()
        .into_option()
        .unwrap_or((0, 1));
    // a single surviving row would make a zero-width axis
    let x_end = if x_max > x_min { x_max } else { x_min + 1 };

    let mut chart = ChartBuilder::on(&root)
        .caption("Line Graph", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_end, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(series.len().min(20))
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.points().iter().map(|(index, value)| (*index, *value)),
        &BLUE,
    ))?;
    chart.draw_series(
        series
            .points()
            .iter()
            .map(|(index, value)| Circle::new((*index, *value), 4, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Filled circles at the (x, y) pairs coerced from the last two columns.
pub fn draw_scatter_plot<'a, T>(backend: T, series: &PointSeries) -> DrawResult<'a>
where
    T: DrawingBackend + 'a,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let (x_min, x_max) = value_range(series.points().iter().map(|(x, _)| *x));
    let (y_min, y_max) = value_range(series.points().iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(&root)
        .caption("Scatter Plot", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(
        series
            .points()
            .iter()
            .map(|(x, y)| Circle::new((*x, *y), 5, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Padded value range so points never sit on the plot edge and a constant
/// series still gets a non-degenerate axis.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let Some((min, max)) = values.minmax().into_option() else {
        return (0.0, 1.0);
    };
    let padding = ((max - min) * 0.05).max(1.0);
    (min - padding, max + padding)
}
