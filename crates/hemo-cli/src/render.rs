use anyhow::{anyhow, Result};
use hemo_lib::plot::{Color, Figure, PlotBackend, Style};
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Draws figures to PNG files with plotters' bitmap backend.
pub struct PngBackend {
    pub size: (u32, u32),
    /// Draw title, axis labels, legend and annotations. Text needs a system
    /// font; without it only the series are drawn.
    pub text: bool,
}

impl Default for PngBackend {
    fn default() -> Self {
        Self {
            size: (1000, 600),
            text: true,
        }
    }
}

impl PlotBackend for PngBackend {
    fn draw(&mut self, fig: &Figure, path: &Path) -> Result<()> {
        draw_plotters_figure(path, fig, self.size, self.text)
    }
}

fn rgb(color: Color) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

fn shape(style: &Style) -> ShapeStyle {
    rgb(style.color).stroke_width(style.width.round().max(1.0) as u32)
}

fn bounds(values: impl Iterator<Item = f64>, fallback: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        fallback
    } else if lo == hi {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    }
}

fn draw_plotters_figure(path: &Path, fig: &Figure, size: (u32, u32), text: bool) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let (x_min, x_max) = bounds(
        fig.lines()
            .flat_map(|line| line.points.iter().map(|p| p[0]))
            .chain(fig.vlines().map(|v| v.x)),
        (0.0, 1.0),
    );
    let (y_min, y_max) = bounds(
        fig.lines().flat_map(|line| line.points.iter().map(|p| p[1])),
        (0.0, 1.0),
    );
    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if text {
        builder
            .caption(
                fig.title.clone().unwrap_or_else(|| "Plot".into()),
                ("sans-serif", 22),
            )
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    if text {
        chart
            .configure_mesh()
            .x_desc(fig.x.label.clone().unwrap_or_default())
            .y_desc(fig.y.label.clone().unwrap_or_default())
            .draw()?;
    }

    for line in fig.lines() {
        let style = shape(&line.style);
        chart
            .draw_series(LineSeries::new(
                line.points
                    .iter()
                    .filter(|p| p[1].is_finite())
                    .map(|p| (p[0], p[1])),
                style,
            ))?
            .label(line.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }
    for vline in fig.vlines() {
        let style = shape(&vline.style);
        let [dash, gap] = vline.style.dash.unwrap_or([6.0, 0.0]);
        let series = chart.draw_series(DashedLineSeries::new(
            vec![(vline.x, y_min), (vline.x, y_max)],
            dash.round() as u32,
            gap.round() as u32,
            style,
        ))?;
        if let Some(label) = &vline.label {
            series
                .label(label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }
    if !text {
        root.present()
            .map_err(|e| anyhow!("writing {}: {}", path.display(), e))?;
        return Ok(());
    }
    let text_style =
        TextStyle::from(("sans-serif", 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    for note in &fig.annotations {
        // axes-relative placement
        let x = x_min + (x_max - x_min) * note.x;
        let y = y_min + (y_max - y_min) * note.y;
        chart.draw_series(std::iter::once(Text::new(
            note.text.clone(),
            (x, y),
            text_style.clone(),
        )))?;
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()
        .map_err(|e| anyhow!("writing {}: {}", path.display(), e))?;
    Ok(())
}
