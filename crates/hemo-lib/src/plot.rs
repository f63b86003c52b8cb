use crate::analysis::{Group, GroupAnalysis, RecordingAnalysis};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub dash: Option<[f32; 2]>,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLUE: Color = Color(0x1F77B4);
    pub const GREEN: Color = Color(0x2CA02C);
    pub const RED: Color = Color(0xD62728);

    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

/// Full-height vertical line at `x`. Only labelled markers get a legend entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VLine {
    pub x: f64,
    pub label: Option<String>,
    pub style: Style,
}

/// Text placed in axes-relative coordinates (0..1 on both axes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
    VLine(VLine),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn annotate(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.annotations.push(Annotation {
            text: text.into(),
            x,
            y,
        });
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSeries> {
        self.series.iter().filter_map(|s| match s {
            Series::Line(line) => Some(line),
            Series::VLine(_) => None,
        })
    }

    pub fn vlines(&self) -> impl Iterator<Item = &VLine> {
        self.series.iter().filter_map(|s| match s {
            Series::VLine(v) => Some(v),
            Series::Line(_) => None,
        })
    }
}

/// Rendering target for figures, e.g. a raster image writer.
pub trait PlotBackend {
    fn draw(&mut self, fig: &Figure, path: &Path) -> anyhow::Result<()>;
}

/// `<dir>/<id>_average_curve_<group>.png`
pub fn plot_path(dir: &Path, id: &str, group: Group) -> PathBuf {
    dir.join(format!("{}_average_curve_{}.png", id, group.as_str()))
}

fn format_mean(value: Option<f64>) -> String {
    format!("{:.2}", value.unwrap_or(f64::NAN))
}

fn marker(x: Option<f64>, label: Option<&str>, color: Color) -> Option<Series> {
    x.map(|x| {
        Series::VLine(VLine {
            x,
            label: label.map(String::from),
            style: Style {
                width: 1.0,
                dash: Some([6.0, 4.0]),
                color,
            },
        })
    })
}

/// Average-curve figure for one group: both pressure curves, dashed markers
/// at the aortic and diastolic window bounds, and the three plain means.
pub fn figure_from_group(analysis: &RecordingAnalysis, group: &GroupAnalysis) -> Figure {
    let mut fig = Figure::new(Some(format!(
        "Average Curve between Diastolic Peaks ({} - {})",
        analysis.condition.label(),
        group.group.label()
    )));
    fig.x.label = Some("Time".into());
    fig.y.label = Some("Pressure".into());
    for (name, curve, color) in [
        ("p_aortic_smooth", &group.aortic, Color::BLUE),
        ("p_distal_smooth", &group.distal, Color::GREEN),
    ] {
        fig.add_series(Series::Line(LineSeries {
            name: name.into(),
            points: curve.points(),
            style: Style {
                width: 1.5,
                dash: None,
                color,
            },
        }));
    }
    let m = &group.measurements;
    let markers = [
        marker(m.aortic.start, Some("Aortic Start/End"), Color::RED),
        marker(m.aortic.end, None, Color::RED),
        marker(m.diastolic.start, Some("Diastolic Start/End"), Color::BLUE),
        marker(m.diastolic.end, None, Color::BLUE),
    ];
    for series in markers.into_iter().flatten() {
        fig.add_series(series);
    }
    fig.annotate(format!("iFR: {}", format_mean(m.ifr_mean)), 0.5, 0.9);
    fig.annotate(
        format!("mid_systolic_ratio: {}", format_mean(m.mid_systolic_ratio_mean)),
        0.5,
        0.85,
    );
    fig.annotate(format!("pd/pa: {}", format_mean(m.pdpa_mean)), 0.5, 0.8);
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_recording;
    use crate::analysis::fixtures::synthetic_recording;
    use crate::config::AnalysisConfig;

    #[test]
    fn group_figure_has_curves_markers_and_means() {
        let rec = synthetic_recording("P01_dobu", 4, 100);
        let analysis = analyze_recording(&rec, &AnalysisConfig::default()).unwrap();
        let group = analysis.group(Group::High).unwrap();
        let fig = figure_from_group(&analysis, group);
        assert_eq!(
            fig.title.as_deref(),
            Some("Average Curve between Diastolic Peaks (Dobu - High)")
        );
        let names: Vec<&str> = fig.lines().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["p_aortic_smooth", "p_distal_smooth"]);
        assert_eq!(fig.lines().next().unwrap().points.len(), 100);
        assert_eq!(fig.vlines().count(), 4);
        assert_eq!(fig.vlines().filter(|v| v.label.is_some()).count(), 2);
        assert_eq!(fig.annotations.len(), 3);
        assert!(fig.annotations[0].text.starts_with("iFR: 0."));
    }

    #[test]
    fn undefined_timings_drop_their_markers() {
        let mut rec = synthetic_recording("P02_rest", 4, 100);
        rec.aortic_ratio.iter_mut().for_each(|v| *v = f64::NAN);
        let analysis = analyze_recording(&rec, &AnalysisConfig::default()).unwrap();
        let fig = figure_from_group(&analysis, &analysis.groups[0]);
        assert_eq!(fig.vlines().count(), 2);
        assert!(fig.vlines().all(|v| v.style.color == Color::BLUE));
    }

    #[test]
    fn plot_path_follows_naming_scheme() {
        let path = plot_path(Path::new("/data/P01"), "P01_rest", Group::Low);
        assert_eq!(path, PathBuf::from("/data/P01/P01_rest_average_curve_low.png"));
        assert_eq!(Color(0x102030).rgb(), (0x10, 0x20, 0x30));
    }
}
