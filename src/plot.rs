//! Convergence plots

use crate::{
    convergence::{Convergence, IterationProfile, Quantity},
    output::OutputError,
};
use itertools::{Itertools, MinMaxResult};
use plotters::{coord::Shift, prelude::*};
use std::{fmt::Display, path::Path};
use strum::IntoEnumIterator;

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("failed to load the convergence data")]
    Output(#[from] OutputError),
    #[error("failed to draw the plot: {0}")]
    Drawing(String),
}
type Result<T> = std::result::Result<T, PlotError>;

fn drawing<E: Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Figure pixels per inch
const DPI: f64 = 100.;

/// Convergence figure options
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Description of the run used as figure title
    pub title: Option<String>,
    /// Figure (width,height) in inches
    pub figsize: (f64, f64),
}
impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: None,
            figsize: (14., 10.),
        }
    }
}
impl PlotOptions {
    fn pixels(&self) -> (u32, u32) {
        ((self.figsize.0 * DPI) as u32, (self.figsize.1 * DPI) as u32)
    }
    /// Font size in pixels, scaled with the figure width
    fn font_size(&self) -> f64 {
        18. / 14. * self.figsize.0 * DPI / 72.
    }
}

/// Renders the convergence figure to `path`, as SVG if the extension is `svg`, PNG otherwise
///
/// The rows are the temperature and the largest state vector change, the
/// columns are the relative change and its log10 magnitude versus depth for
/// each iteration, and the largest change versus iteration.
pub fn pconv<P: AsRef<Path>>(convergence: &Convergence, path: P, options: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let size = options.pixels();
    log::info!("Plotting convergence into {:?}", path);
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => draw(SVGBackend::new(path, size).into_drawing_area(), convergence, options),
        _ => draw(BitMapBackend::new(path, size).into_drawing_area(), convergence, options),
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    convergence: &Convergence,
    options: &PlotOptions,
) -> Result<()> {
    let font_size = options.font_size();
    root.fill(&WHITE).map_err(drawing)?;
    let figure = match &options.title {
        Some(title) => root
            .titled(title, ("serif", font_size))
            .map_err(drawing)?,
        None => root,
    };
    let (width, height) = figure.dim_in_pixel();
    let (plots, legend) = figure.split_horizontally((width as f64 * 0.7) as i32);
    let panels = plots.split_evenly((2, 3));

    let log_mass: Vec<f64> = convergence.depths.log_mass().collect();
    for (row, quantity) in Quantity::iter().enumerate() {
        let profiles = convergence.profiles(quantity)?;
        depth_panel(&panels[3 * row], &log_mass, &profiles, quantity, false)?;
        depth_panel(&panels[3 * row + 1], &log_mass, &profiles, quantity, true)?;
        history_panel(&panels[3 * row + 2], &convergence.history(quantity)?, quantity)?;
    }

    let style = TextStyle::from(("serif", font_size).into_font());
    let x = 10;
    let mut y = (height as f64 * 0.15) as i32;
    legend
        .draw_text(&format!("Time={:.2} s", convergence.time), &style, (x, y))
        .map_err(drawing)?;
    y = (height as f64 * 0.25) as i32;
    let departure = format!("={:.2} pct", convergence.flux_departure);
    for line in ["Max Departure", "from Flux Unity", departure.as_str()] {
        legend.draw_text(line, &style, (x, y)).map_err(drawing)?;
        y += (font_size * 1.2) as i32;
    }
    figure.present().map_err(drawing)?;
    Ok(())
}

/// Axis range of `values`, padded if degenerate
fn range<I: Iterator<Item = f64>>(values: I) -> std::ops::Range<f64> {
    match values.filter(|v| v.is_finite()).minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => 0f64..1f64,
        MinMaxResult::OneElement(v) => (v - 1.)..(v + 1.),
        MinMaxResult::MinMax(min, max) if min == max => (min - 1.)..(max + 1.),
        MinMaxResult::MinMax(min, max) => min..max,
    }
}

fn viridis(k: usize, n: usize) -> RGBColor {
    let t = if n > 1 { k as f64 / (n - 1) as f64 } else { 0. };
    let color = colorous::VIRIDIS.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

fn depth_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    log_mass: &[f64],
    profiles: &[IterationProfile],
    quantity: Quantity,
    log_scale: bool,
) -> Result<()> {
    let series: Vec<Vec<(f64, f64)>> = profiles
        .iter()
        .map(|profile| {
            log_mass
                .iter()
                .zip(&profile.change)
                .map(|(&x, &y)| (x, if log_scale { y.abs().log10() } else { y }))
                .filter(|(_, y)| y.is_finite())
                .collect()
        })
        .collect();
    let x_range = range(series.iter().flatten().map(|(x, _)| *x));
    let y_range = range(
        series
            .iter()
            .flatten()
            .map(|(_, y)| *y)
            .chain(std::iter::once(0.)),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(quantity.to_string(), ("serif", 16))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(drawing)?;
    let mut mesh = chart.configure_mesh();
    mesh.x_desc("Log Depth (Mass)");
    if !log_scale {
        mesh.y_desc("Relative Change");
    }
    mesh.draw().map_err(drawing)?;

    let n = series.len();
    for (k, points) in series.into_iter().enumerate() {
        chart
            .draw_series(LineSeries::new(points, &viridis(k, n)))
            .map_err(drawing)?;
    }
    chart
        .draw_series(zero_line(&x_range))
        .map_err(drawing)?;
    Ok(())
}

/// Dashed y = 0 reference across `x_range`
fn zero_line(x_range: &std::ops::Range<f64>) -> DashedLineSeries<std::vec::IntoIter<(f64, f64)>, i32> {
    DashedLineSeries::new(
        vec![(x_range.start, 0.), (x_range.end, 0.)],
        5,
        3,
        BLACK.stroke_width(1),
    )
}

fn history_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    history: &[(u32, f64)],
    quantity: Quantity,
) -> Result<()> {
    let points: Vec<(f64, f64)> = history.iter().map(|&(i, v)| (i as f64, v)).collect();
    let mut chart = ChartBuilder::on(area)
        .caption(quantity.to_string(), ("serif", 16))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(
            range(points.iter().map(|(x, _)| *x)),
            range(points.iter().map(|(_, y)| *y)),
        )
        .map_err(drawing)?;
    chart
        .configure_mesh()
        .x_desc("Iteration")
        .draw()
        .map_err(drawing)?;
    chart
        .draw_series(LineSeries::new(points.iter().cloned(), &BLACK))
        .map_err(drawing)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Cross::new((x, y), 5, BLACK.stroke_width(2))),
        )
        .map_err(drawing)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convergence::tests::run_directory;

    #[test]
    #[ignore = "needs a system serif font"]
    fn svg_figure() {
        let dir = run_directory();
        let convergence = Convergence::load(dir.path()).unwrap();
        let path = dir.path().join("pconv.svg");
        let options = PlotOptions {
            title: Some(String::from("DA 20000K log g=8")),
            figsize: (7., 5.),
        };
        pconv(&convergence, &path, &options).unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("Time=1.60 s"));
        assert!(svg.contains("=4.00 pct"));
    }

    #[test]
    fn dashed_zero_line() {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (200, 100)).into_drawing_area();
            let mut chart = ChartBuilder::on(&root)
                .build_cartesian_2d(0f64..10f64, -1f64..1f64)
                .unwrap();
            chart.draw_series(zero_line(&(0f64..10f64))).unwrap();
            root.present().unwrap();
        }
        assert!(svg.matches("<polyline").count() > 1);
    }

    #[test]
    fn axis_ranges() {
        assert_eq!(range(std::iter::empty::<f64>()), 0.0..1.0);
        assert_eq!(range([2., f64::NEG_INFINITY].into_iter()), 1.0..3.0);
        assert_eq!(range([3., -1., 2.].into_iter()), -1.0..3.0);
    }
}
